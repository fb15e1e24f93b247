//! Render command - Interpolate a template with data.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use interpol_core::Templater;

use crate::commands::read_template;
use crate::data::{Data, DataFormat};

#[derive(Args)]
pub struct RenderArgs {
    /// Template file (reads stdin when omitted or "-")
    template: Option<PathBuf>,

    /// Data file (JSON, YAML or TOML)
    #[arg(short, long, env = "INTERPOL_DATA")]
    data: Option<PathBuf>,

    /// Data format (inferred from the data file extension when omitted)
    #[arg(short, long, value_enum, env = "INTERPOL_FORMAT")]
    format: Option<DataFormat>,

    /// Set a value, overriding the data file (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let template = read_template(args.template.as_deref())?;

    let mut data = match &args.data {
        Some(path) => Data::load(path, args.format)?,
        None => Data::default(),
    };
    for (key, value) in &args.set {
        debug!("Overriding {:?}", key);
        data.set(key, value)?;
    }

    let rendered = data
        .render(&Templater::new(), &template)
        .context("Failed to render template")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output {:?}", path))?;
            info!("Rendered {} bytes to {:?}", rendered.len(), path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&rendered)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Parse a `KEY=VALUE` assignment. The value may itself contain `=`.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid assignment {:?}: expected KEY=VALUE", s))?;
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use interpol_core::InterpolError;
    use tempfile::tempdir;

    fn args(template: PathBuf, output: PathBuf) -> RenderArgs {
        RenderArgs {
            template: Some(template),
            data: None,
            format: None,
            set: Vec::new(),
            output: Some(output),
        }
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=api").unwrap(),
            ("name".to_string(), "api".to_string())
        );
        assert_eq!(
            parse_assignment("url=http://x?a=b").unwrap(),
            ("url".to_string(), "http://x?a=b".to_string())
        );
        assert_eq!(
            parse_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn test_render_with_data_and_overrides() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("app.conf.tmpl");
        let data = temp.path().join("values.yaml");
        let output = temp.path().join("app.conf");
        fs::write(&template, "name={{name}}\nport={{port}}\n").unwrap();
        fs::write(&data, "name: api\nport: 8080\n").unwrap();

        let mut render_args = args(template, output.clone());
        render_args.data = Some(data);
        render_args.set = vec![("name".to_string(), "web".to_string())];
        execute(render_args).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "name=web\nport=8080\n");
    }

    #[test]
    fn test_render_missing_key_writes_nothing() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("t.txt");
        let output = temp.path().join("out.txt");
        fs::write(&template, "{{missing}}").unwrap();

        let err = execute(args(template, output.clone())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InterpolError>(),
            Some(InterpolError::KeyNotFound(key)) if key == "missing"
        ));
        assert!(!output.exists());
    }
}
