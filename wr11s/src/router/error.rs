// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

use thiserror::Error;

/// Reasons a login attempt did not yield an authenticated session.
///
/// None of these are fatal: without a session the router still serves its
/// public endpoints, so callers may continue with reduced data.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("username or password not provided, not all data will be available without logging in")]
    CredentialsMissing,

    #[error("transport error sending login request to {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("malformed response from router (HTTP {status}): {source}")]
    MalformedResponse {
        status: u16,
        source: serde_json::Error,
    },

    #[error("router rejected credentials with result {code}, not all data will be available without logging in")]
    Rejected { code: i64 },
}

impl LoginError {
    /// Result code returned by the router, if it answered with one
    pub fn code(&self) -> Option<i64> {
        match self {
            LoginError::Rejected { code } => Some(*code),
            _ => None,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            LoginError::CredentialsMissing
            | LoginError::Transport { .. }
            | LoginError::MalformedResponse { .. }
            | LoginError::Rejected { .. } => true,
        }
    }
}
