//! CLI command definitions.
//!
//! This module defines the command structure for the interpol CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub mod keys;
pub mod render;

/// interpol - {{key}} string interpolation from data files
#[derive(Parser)]
#[command(name = "interpol")]
#[command(version, about = "interpol - {{key}} string interpolation from data files")]
#[command(long_about = r#"
interpol replaces {{key}} placeholders in a template with values from a JSON,
YAML or TOML data file. Everything between {{ and the next }} is the key,
taken verbatim. A missing key fails the whole render.

COMMANDS:
  render  → Render a template with data
  keys    → List the placeholder keys of a template

ENVIRONMENT:
  INTERPOL_DATA    Default data file for render
  INTERPOL_FORMAT  Default data format (json, yaml, toml)
  RUST_LOG         Log filter (logs go to stderr)

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or data
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template with values from a data file
    Render(render::RenderArgs),

    /// List the placeholder keys of a template
    Keys(keys::KeysArgs),
}

/// Read a template from `path`, or from stdin when `path` is absent or `-`.
pub fn read_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {:?}", path)),
        _ => {
            let mut template = String::new();
            io::stdin()
                .read_to_string(&mut template)
                .context("Failed to read template from stdin")?;
            Ok(template)
        }
    }
}
