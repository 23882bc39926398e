// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

//! Layered configuration for the router session.
//!
//! Three sources are merged with a clear precedence order:
//!
//! 1. Command-line flags (highest priority)
//! 2. Environment variables (`WR11_ADDRESS`, `WR11_USERNAME`, `WR11_PASSWORD`)
//! 3. Configuration file (TOML, `config.toml` by default, lowest priority)
//!
//! A layer only overrides the fields it sets to a non-empty value. After
//! merging, every field is required.
//!
//! ## Example Configuration File
//!
//! ```toml
//! address = "http://192.168.150.1"
//! username = "admin"
//! password = "admin"
//! ```

mod env;
mod error;
mod file_config;
mod resolver;

pub use env::*;
pub use error::*;
pub use file_config::*;
pub use resolver::*;

use crate::diagnostics::{redact, Diagnostics, UNSET};
use log::Level;
use serde::Deserialize;
use std::fmt;

pub const ADDRESS: &str = "address";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";

/// Validated settings needed to log into the router.
///
/// Only obtainable through validation, so all fields are non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct RouterConfig {
    address: String,
    username: String,
    password: String,
}

impl RouterConfig {
    /// Build a configuration from explicit values, applying the same
    /// validation as [`ConfigResolver::load`].
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        PartialConfig {
            address: Some(address.into()),
            username: Some(username.into()),
            password: Some(password.into()),
        }
        .validate()
    }

    /// Base URL of the router management interface
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &redact(Some(self.password.as_str())))
            .finish()
    }
}

/// The contribution of a single configuration source.
///
/// `None` means the source did not set the field. Empty strings are turned
/// into `None` by [`PartialConfig::normalized`] so they never override a
/// lower layer.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl PartialConfig {
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            address: non_empty(self.address),
            username: non_empty(self.username),
            password: non_empty(self.password),
        }
    }

    /// Overlay `higher` on top of `self`; fields set in `higher` win.
    pub fn merge(self, higher: PartialConfig) -> Self {
        Self {
            address: higher.address.or(self.address),
            username: higher.username.or(self.username),
            password: higher.password.or(self.password),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.username.is_none()
            && self.password.is_none()
    }

    /// Check the required fields in order: address, username, password.
    ///
    /// Only the first missing field is reported.
    pub fn validate(self) -> Result<RouterConfig, ConfigError> {
        let PartialConfig {
            address,
            username,
            password,
        } = self.normalized();

        let address = address.ok_or(ConfigError::MissingField(ADDRESS))?;
        let username = username.ok_or(ConfigError::MissingField(USERNAME))?;
        let password = password.ok_or(ConfigError::MissingField(PASSWORD))?;

        Ok(RouterConfig {
            address,
            username,
            password,
        })
    }

    pub(crate) fn report(&self, diagnostics: &dyn Diagnostics, message: &str) {
        diagnostics.log(
            Level::Debug,
            message,
            &[
                (ADDRESS, self.address.as_deref().unwrap_or(UNSET)),
                (USERNAME, self.username.as_deref().unwrap_or(UNSET)),
                (PASSWORD, redact(self.password.as_deref())),
            ],
        );
    }
}

impl fmt::Debug for PartialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &redact(self.password.as_deref()))
            .finish()
    }
}
