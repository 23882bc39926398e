// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

//! Building blocks for talking to the WR11S router web-management API.
//!
//! The crate has two parts that run as one linear pipeline:
//!
//! 1. [`config::ConfigResolver`] merges the configuration file, the `WR11_*`
//!    environment variables and command-line flags into a validated
//!    [`config::RouterConfig`].
//! 2. [`router::RouterSession`] performs the form-based login handshake with
//!    the resolved address and credentials.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod router;

pub use error::{Error, Result};
