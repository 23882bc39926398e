// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

use crate::config::{ConfigError, PartialConfig};
use crate::diagnostics::Diagnostics;
use config::{Config, File, FileFormat};
use log::Level;
use std::path::{Path, PathBuf};

/// Well-known location of the configuration file, relative to the working
/// directory.
pub static DEFAULT_CONFIG: &str = "config.toml";

/// Lowest-precedence layer: a TOML file with `address`, `username` and
/// `password` keys.
#[derive(Debug, Clone)]
pub struct FileLayer {
    path: PathBuf,
    required: bool,
}

impl Default for FileLayer {
    fn default() -> Self {
        Self::optional(DEFAULT_CONFIG)
    }
}

impl FileLayer {
    /// A file that is skipped when absent.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// A file that was asked for explicitly and must exist.
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the layer.
    ///
    /// Malformed content is reported and the layer counts as empty. The only
    /// error is a required file that does not exist.
    pub fn load(
        &self,
        diagnostics: &dyn Diagnostics,
    ) -> Result<PartialConfig, ConfigError> {
        let path = self.path.display().to_string();

        if !self.path.exists() {
            if self.required {
                return Err(ConfigError::MissingConfigFile { path });
            }
            diagnostics.log(
                Level::Debug,
                "Configuration file not found, skipping",
                &[("path", &path)],
            );
            return Ok(PartialConfig::default());
        }

        let parsed = Config::builder()
            .add_source(
                File::from(self.path.as_path())
                    .format(FileFormat::Toml)
                    .required(true),
            )
            .build()
            .and_then(|c| c.try_deserialize::<PartialConfig>());

        match parsed {
            Ok(partial) => Ok(partial.normalized()),
            Err(_) => {
                // The parser error quotes the offending line, which may hold
                // the password, so only the location is reported
                diagnostics.log(
                    Level::Warn,
                    "Failed to parse configuration file, ignoring it",
                    &[("path", &path)],
                );
                Ok(PartialConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::RecordingDiagnostics;
    use std::{fs::File as FsFile, io::Write};
    use tempfile::tempdir;

    fn write_file(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("config.toml");
        let mut f = FsFile::create(&path).expect("failed to create file");
        f.write_all(contents.as_bytes())
            .expect("failed to write file");
        path
    }

    #[test]
    fn test_load_all_keys() {
        let dir = tempdir().expect("failed to create temporary dir");
        let path = write_file(
            dir.path(),
            "address = \"http://example.com\"\nusername = \"testuser\"\npassword = \"testpassword\"\n",
        );

        let diag = RecordingDiagnostics::default();
        let partial = FileLayer::optional(&path).load(&diag).unwrap(); //#[allow_ci]

        assert_eq!(partial.address.as_deref(), Some("http://example.com"));
        assert_eq!(partial.username.as_deref(), Some("testuser"));
        assert_eq!(partial.password.as_deref(), Some("testpassword"));
    }

    #[test]
    fn test_missing_keys_are_unset() {
        let dir = tempdir().expect("failed to create temporary dir");
        let path = write_file(
            dir.path(),
            "address = \"http://example.com\"\nusername = \"\"\nunrelated = 1\n",
        );

        let diag = RecordingDiagnostics::default();
        let partial = FileLayer::optional(&path).load(&diag).unwrap(); //#[allow_ci]

        assert_eq!(partial.address.as_deref(), Some("http://example.com"));
        assert_eq!(partial.username, None);
        assert_eq!(partial.password, None);
    }

    #[test]
    fn test_absent_optional_file() {
        let dir = tempdir().expect("failed to create temporary dir");
        let diag = RecordingDiagnostics::default();

        let partial = FileLayer::optional(dir.path().join("nope.toml"))
            .load(&diag)
            .unwrap(); //#[allow_ci]
        assert!(partial.is_empty());
        assert_eq!(diag.records()[0].level, Level::Debug);
    }

    #[test]
    fn test_absent_required_file() {
        let dir = tempdir().expect("failed to create temporary dir");
        let diag = RecordingDiagnostics::default();

        let result =
            FileLayer::required(dir.path().join("nope.toml")).load(&diag);
        assert!(matches!(
            result,
            Err(ConfigError::MissingConfigFile { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let dir = tempdir().expect("failed to create temporary dir");
        let path = write_file(
            dir.path(),
            "address = \"http://example.com\"\npassword = \"s3cr3t\n",
        );

        let diag = RecordingDiagnostics::default();
        let partial = FileLayer::required(&path).load(&diag).unwrap(); //#[allow_ci]

        assert!(partial.is_empty());
        let records = diag.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Warn);
        assert!(!diag.contains_text("s3cr3t"));
    }
}
