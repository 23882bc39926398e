// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 wr11s-router-exporter Authors

//! # wr11s-router-exporter
//!
//! Resolves the router address and credentials, then logs into the router's
//! web-management API so authenticated endpoints can be queried.

#![deny(
    nonstandard_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

use clap::Parser;
use log::{error, info, warn};
use std::{path::PathBuf, process};
use wr11s::config::{ConfigResolver, PartialConfig};
use wr11s::router::RouterSession;

/// Exporter agent for the WR11S router
#[derive(Parser)]
#[command(
    name = "wr11s-router-exporter",
    version,
    about = "Log into a WR11S router's web-management API",
    after_long_help = "CONFIGURATION SOURCES (highest to lowest priority):\n  \
        1. Command-line arguments (--address, --username, --password)\n  \
        2. Environment variables (WR11_ADDRESS, WR11_USERNAME, WR11_PASSWORD)\n  \
        3. Configuration file (config.toml in the working directory, or --config)"
)]
struct Cli {
    /// Configuration file path [default: config.toml, optional]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL for HTTP requests
    #[arg(long, value_name = "URL")]
    address: Option<String>,

    /// Login username
    #[arg(long)]
    username: Option<String>,

    /// Login password
    #[arg(long)]
    password: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Values given on the command line; absent flags stay unset
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            address: self.address.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
        .normalized()
    }

    fn resolver(&self) -> ConfigResolver {
        ConfigResolver::new()
            .config_file(self.config.clone())
            .flags(self.overrides())
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = match cli.resolver().load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };
    info!("Using router at {}", config.address());

    match RouterSession::new().login_with(&config).await {
        Ok(_) => info!("Login succeeded"),
        // Without a session only public data is available; keep running
        Err(e) => warn!("Login failed: {e}"),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    pretty_env_logger::formatted_builder()
        .filter_level(log_level)
        .parse_default_env()
        .target(pretty_env_logger::env_logger::Target::Stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unset_flags_stay_unset() {
        let cli = Cli::try_parse_from(["wr11s-router-exporter"]).unwrap(); //#[allow_ci]
        assert!(cli.overrides().is_empty());
        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::try_parse_from([
            "wr11s-router-exporter",
            "--address",
            "http://192.168.150.1",
            "--password",
            "",
            "-vv",
        ])
        .unwrap(); //#[allow_ci]

        let overrides = cli.overrides();
        assert_eq!(overrides.address.as_deref(), Some("http://192.168.150.1"));
        assert_eq!(overrides.username, None);
        // An explicitly empty flag does not clobber lower layers
        assert_eq!(overrides.password, None);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from([
            "wr11s-router-exporter",
            "-c",
            "/etc/wr11s/config.toml",
        ])
        .unwrap(); //#[allow_ci]
        assert_eq!(cli.config, Some(PathBuf::from("/etc/wr11s/config.toml")));
    }
}
