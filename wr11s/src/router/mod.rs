// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

//! Login handshake with the router's `goform` management endpoint.

mod error;
mod login;

pub use error::*;
pub use login::*;
