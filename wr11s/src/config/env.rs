// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

use crate::config::PartialConfig;
use crate::diagnostics::Diagnostics;
use config::{Config, Environment, Map};
use log::Level;
use std::fmt;

/// Prefix of the variables read by [`EnvLayer`]: `WR11_ADDRESS`,
/// `WR11_USERNAME` and `WR11_PASSWORD`.
pub static ENV_PREFIX: &str = "WR11";

/// Middle layer: environment variables. Empty variables are ignored.
#[derive(Clone, Default)]
pub struct EnvLayer {
    // None reads the process environment
    vars: Option<Map<String, String>>,
}

// Values may hold the password, so only the variable names are shown
impl fmt::Debug for EnvLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.vars.as_ref().map(|vars| {
            let mut keys: Vec<&String> = vars.keys().collect();
            keys.sort();
            keys
        });
        f.debug_struct("EnvLayer").field("vars", &keys).finish()
    }
}

impl EnvLayer {
    /// Read the process environment.
    pub fn process() -> Self {
        Self::default()
    }

    /// Read from the given variables instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ),
        }
    }

    fn source(&self) -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .ignore_empty(true)
            .source(self.vars.clone())
    }

    pub fn load(&self, diagnostics: &dyn Diagnostics) -> PartialConfig {
        let parsed = Config::builder()
            .add_source(self.source())
            .build()
            .and_then(|c| c.try_deserialize::<PartialConfig>());

        match parsed {
            Ok(partial) => partial.normalized(),
            Err(e) => {
                diagnostics.log(
                    Level::Warn,
                    "Failed to read environment configuration, ignoring it",
                    &[("error", &e.to_string())],
                );
                PartialConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::RecordingDiagnostics;

    #[test]
    fn test_env_vars() {
        let layer = EnvLayer::from_vars([
            ("WR11_ADDRESS", "http://envaddress.com"),
            ("WR11_USERNAME", "envuser"),
            ("WR11_PASSWORD", "envpassword"),
            ("HOME", "/root"),
        ]);

        let partial = layer.load(&RecordingDiagnostics::default());
        assert_eq!(
            partial.address.as_deref(),
            Some("http://envaddress.com")
        );
        assert_eq!(partial.username.as_deref(), Some("envuser"));
        assert_eq!(partial.password.as_deref(), Some("envpassword"));
    }

    #[test]
    fn test_empty_env_vars_are_unset() {
        let layer = EnvLayer::from_vars([
            ("WR11_ADDRESS", ""),
            ("WR11_USERNAME", "envuser"),
        ]);

        let partial = layer.load(&RecordingDiagnostics::default());
        assert_eq!(partial.address, None);
        assert_eq!(partial.username.as_deref(), Some("envuser"));
        assert_eq!(partial.password, None);
    }

    #[test]
    fn test_debug_hides_values() {
        let layer = EnvLayer::from_vars([("WR11_PASSWORD", "hunter2")]);
        let printed = format!("{layer:?}");
        assert!(printed.contains("WR11_PASSWORD"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_only_prefixed_vars() {
        let layer = EnvLayer::from_vars([
            ("ADDRESS", "http://wrong"),
            ("WR11_USER", "legacy"),
        ]);

        assert!(layer.load(&RecordingDiagnostics::default()).is_empty());
    }
}
