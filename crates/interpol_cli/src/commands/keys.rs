//! Keys command - List the placeholder keys of a template.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use interpol_core::placeholders;

use crate::commands::read_template;

#[derive(Args)]
pub struct KeysArgs {
    /// Template file (reads stdin when omitted or "-")
    template: Option<PathBuf>,
}

pub fn execute(args: KeysArgs) -> Result<()> {
    let template = read_template(args.template.as_deref())?;

    for key in unique_keys(&template)? {
        println!("{}", key);
    }

    Ok(())
}

/// Placeholder keys in order of first appearance.
fn unique_keys(template: &str) -> Result<Vec<&str>> {
    let keys = placeholders(template).context("Failed to scan template")?;
    debug!("Found {} placeholder(s)", keys.len());

    let mut seen = HashSet::new();
    Ok(keys.into_iter().filter(|key| seen.insert(*key)).collect())
}
