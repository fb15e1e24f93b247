//! interpol CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or data
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use interpol_core::InterpolError;

mod commands;
mod data;

use commands::{Cli, Commands};
use data::DataError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const TEMPLATE_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so rendered output stays clean. A subscriber that
    // is already installed is kept.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(log_filter(cli.verbose, cli.quiet))
        .try_init();

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args),
        Commands::Keys(args) => commands::keys::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Build the log filter. `RUST_LOG` wins over the verbosity flags.
fn log_filter(verbose: bool, quiet: bool) -> EnvFilter {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "interpol_cli={level},interpol_core={level},warn",
            level = level
        ))
    })
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if cause.is::<InterpolError>() {
            return ExitCodes::TEMPLATE_ERROR;
        }
        if cause.is::<DataError>()
            || cause.is::<serde_json::Error>()
            || cause.is::<serde_yaml::Error>()
            || cause.is::<toml::de::Error>()
        {
            return ExitCodes::INVALID_ARGS;
        }
    }
    ExitCodes::GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_template_errors() {
        let err = anyhow::Error::new(InterpolError::KeyNotFound("x".to_string()))
            .context("Failed to render template");
        assert_eq!(categorize_error(&err), ExitCodes::TEMPLATE_ERROR);
    }

    #[test]
    fn test_categorize_data_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{")
            .context("Failed to parse data file")
            .unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_data_argument_errors() {
        let err = data::Data::load(std::path::Path::new("values.txt"), None).unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let mut list = data::Data::parse("[1]", data::DataFormat::Json).unwrap();
        let err = list
            .set("x", "1")
            .context("Failed to apply --set")
            .unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_other_errors() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }

    #[test]
    fn test_cli_parses_render_args() {
        let cli = Cli::try_parse_from([
            "interpol", "-v", "render", "t.tmpl", "--data", "v.json", "--set", "a=b",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Render(_)));

        assert!(Cli::try_parse_from(["interpol", "render", "--set", "nope"]).is_err());
        assert!(Cli::try_parse_from(["interpol", "-v", "-q", "keys"]).is_err());
    }
}
