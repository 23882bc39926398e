// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

//! Diagnostic sink used by the library instead of process-wide logger state.
//!
//! Components receive a [`Diagnostics`] implementation explicitly. The
//! default, [`LogDiagnostics`], forwards every record to the `log` facade so
//! the binary's logger decides what is printed.

use log::Level;
use std::fmt::Write as _;

/// Log target used for records emitted through [`LogDiagnostics`].
pub const LOG_TARGET: &str = "wr11s";

/// Replacement shown wherever a secret would otherwise be logged.
pub const REDACTED: &str = "*****";

/// Placeholder for a field no source has provided.
pub const UNSET: &str = "<unset>";

/// A structured diagnostic record consumer.
///
/// Implementations must not fail: diagnostics are best effort and can never
/// abort the operation that emits them.
pub trait Diagnostics: Send + Sync {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &str)]);
}

/// Forwards records to the `log` crate as `message key=value ...`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &str)]) {
        if !log::log_enabled!(target: LOG_TARGET, level) {
            return;
        }
        log::log!(target: LOG_TARGET, level, "{}", render(message, fields));
    }
}

/// Formats a record the way [`LogDiagnostics`] prints it.
pub fn render(message: &str, fields: &[(&str, &str)]) -> String {
    let mut line = String::from(message);
    for (key, value) in fields {
        // Writing into a String cannot fail
        let _ = write!(line, " {key}={value:?}");
    }
    line
}

/// Shows whether a secret is set without revealing it.
pub fn redact(secret: Option<&str>) -> &'static str {
    match secret {
        Some(s) if !s.is_empty() => REDACTED,
        _ => UNSET,
    }
}
