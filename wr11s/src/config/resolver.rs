// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

use crate::config::{
    ConfigError, EnvLayer, FileLayer, PartialConfig, RouterConfig,
};
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use log::Level;
use std::{fmt, path::PathBuf, sync::Arc};

/// Merges the file, environment and flag layers into a [`RouterConfig`].
///
/// # Examples
///
/// ```no_run
/// use wr11s::config::{ConfigResolver, PartialConfig};
///
/// let flags = PartialConfig {
///     address: Some("http://192.168.150.1".to_string()),
///     ..Default::default()
/// };
/// let config = ConfigResolver::new().flags(flags).load()?;
/// # Ok::<(), wr11s::config::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    file: FileLayer,
    env: EnvLayer,
    flags: PartialConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self {
            file: FileLayer::default(),
            env: EnvLayer::process(),
            flags: PartialConfig::default(),
            diagnostics: Arc::new(LogDiagnostics),
        }
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("file", &self.file)
            .field("env", &self.env)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: FileLayer) -> Self {
        self.file = file;
        self
    }

    /// Use `path` as a required configuration file, or the default optional
    /// location when `None`.
    pub fn config_file(self, path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => self.file(FileLayer::required(path)),
            None => self.file(FileLayer::default()),
        }
    }

    pub fn env(mut self, env: EnvLayer) -> Self {
        self.env = env;
        self
    }

    /// Values given on the command line. Fields left `None` keep the value
    /// of the lower layers.
    pub fn flags(mut self, flags: PartialConfig) -> Self {
        self.flags = flags;
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Resolve the configuration: file, then environment, then flags, then
    /// validation of the required fields.
    pub fn load(&self) -> Result<RouterConfig, ConfigError> {
        let diagnostics = self.diagnostics.as_ref();

        let merged = self.file.load(diagnostics)?;
        merged.report(diagnostics, "Loaded configuration from TOML");

        let merged = merged.merge(self.env.load(diagnostics));
        merged.report(
            diagnostics,
            "Loaded configuration from environment variables",
        );

        let merged = merged.merge(self.flags.clone().normalized());
        merged.report(diagnostics, "Loaded configuration from CLI flags");

        merged.validate().map_err(|e| {
            diagnostics.log(Level::Error, &e.to_string(), &[]);
            e
        })
    }
}
