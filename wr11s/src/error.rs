// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::router::LoginError;

/// Any failure of the configuration-then-login pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("login failed: {0}")]
    Login(#[from] LoginError),
}

impl Error {
    /// Whether the caller may continue running with reduced capability.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => false,
            Error::Login(e) => e.is_recoverable(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
