// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

use crate::config::RouterConfig;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::router::LoginError;
use base64::{engine::general_purpose, Engine as _};
use log::Level;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Form handler shared by every `goform` command.
pub const LOGIN_PATH: &str = "/goform/goform_set_cmd_process";

/// Value of the `goformId` field selecting the login command.
pub const LOGIN_COMMAND: &str = "LOGIN";

/// Encode a credential the way the router's web UI does before posting it.
///
/// The router expects obfuscated credentials: base64 with the URL-safe
/// alphabet, padding kept.
pub fn encode_credential(value: &str) -> String {
    general_purpose::URL_SAFE.encode(value.as_bytes())
}

/// Full URL of the login form handler for a management base URL.
pub fn login_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), LOGIN_PATH)
}

// Fields are serialized in declaration order, which matches the byte order
// produced by the router's reference client (keys sorted).
#[derive(Serialize)]
struct LoginForm {
    #[serde(rename = "goformId")]
    goform_id: &'static str,
    #[serde(rename = "isTest")]
    is_test: &'static str,
    password: String,
    username: String,
}

impl LoginForm {
    fn new(username: &str, password: &str) -> Self {
        Self {
            goform_id: LOGIN_COMMAND,
            is_test: "false",
            password: encode_credential(password),
            username: encode_credential(username),
        }
    }
}

// The router encodes the result as a string, e.g. {"result":"0"}
fn deserialize_string_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).and_then(|string| {
        string.parse::<i64>().map_err(serde::de::Error::custom)
    })
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(deserialize_with = "deserialize_string_number")]
    result: i64,
}

/// Result code reported by the router for one login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
    result: i64,
}

impl LoginOutcome {
    pub fn result(&self) -> i64 {
        self.result
    }

    pub fn is_success(&self) -> bool {
        self.result == 0
    }

    /// Parse a login response body.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let response: LoginResponse = serde_json::from_slice(body)?;
        Ok(Self {
            result: response.result,
        })
    }
}

/// Client for the router's login handshake.
///
/// Each [`login`](RouterSession::login) is a single request with no retry
/// and no timeout other than the one configured on the HTTP client. The
/// session keeps no state between calls besides the connection pool.
#[derive(Clone)]
pub struct RouterSession {
    client: reqwest::Client,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for RouterSession {
    fn default() -> Self {
        Self::with_client(reqwest::Client::new())
    }
}

impl fmt::Debug for RouterSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterSession")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl RouterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Log in with the address and credentials of a resolved configuration.
    pub async fn login_with(
        &self,
        config: &RouterConfig,
    ) -> Result<LoginOutcome, LoginError> {
        self.login(config.address(), config.username(), config.password())
            .await
    }

    /// Submit the credentials to `{base_url}/goform/goform_set_cmd_process`.
    ///
    /// Returns the outcome when the router answers with result `0`.
    pub async fn login(
        &self,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, LoginError> {
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::CredentialsMissing);
        }

        let url = login_url(base_url);
        self.diagnostics.log(
            Level::Debug,
            "Sending login request",
            &[("url", &url), ("username", username)],
        );

        let resp = self
            .client
            .post(&url)
            .form(&LoginForm::new(username, password))
            .send()
            .await
            .map_err(|source| LoginError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        // Consumes the response; the connection is released on every path
        let body = resp.bytes().await.map_err(|source| {
            LoginError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        self.diagnostics.log(
            Level::Debug,
            "Received login response",
            &[("url", &url), ("status", status.as_str())],
        );

        let outcome = LoginOutcome::from_body(&body).map_err(|source| {
            LoginError::MalformedResponse {
                status: status.as_u16(),
                source,
            }
        })?;

        if outcome.is_success() {
            Ok(outcome)
        } else {
            Err(LoginError::Rejected {
                code: outcome.result(),
            })
        }
    }
}
