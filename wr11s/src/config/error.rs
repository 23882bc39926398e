// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    // A required option is still empty after every layer was applied
    #[error("{0} is required")]
    MissingField(&'static str),

    // Configuration file requested explicitly but absent
    #[error("Specified configuration file not found: {path}")]
    MissingConfigFile { path: String },
}
