//! Data file loading.
//!
//! JSON and TOML documents are loaded as `serde_json::Value`. YAML documents
//! stay `serde_yaml::Value` so non-string mapping keys are still visible to
//! getter dispatch.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use thiserror::Error;
use tracing::debug;

use interpol_core::{InterpolResult, Templater};

/// Errors caused by the data arguments rather than the template.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Cannot infer data format of {0:?}; pass --format json|yaml|toml")]
    UnknownFormat(PathBuf),

    #[error("Cannot set {0:?}: data document is not a mapping")]
    NotAMapping(String),
}

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A loaded data document.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Json(serde_json::Value),
    Yaml(serde_yaml::Value),
}

impl Default for Data {
    fn default() -> Self {
        Data::Json(serde_json::Value::Object(serde_json::Map::new()))
    }
}

impl Data {
    /// Load a data file, inferring the format from its extension unless given.
    pub fn load(path: &Path, format: Option<DataFormat>) -> Result<Self> {
        let format = match format.or_else(|| DataFormat::from_path(path)) {
            Some(format) => format,
            None => return Err(DataError::UnknownFormat(path.to_path_buf()).into()),
        };

        debug!("Loading {:?} data from {:?}", format, path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file {:?}", path))?;
        Self::parse(&content, format)
            .with_context(|| format!("Failed to parse data file {:?}", path))
    }

    /// Parse a data document.
    pub fn parse(content: &str, format: DataFormat) -> Result<Self> {
        let data = match format {
            DataFormat::Json => Data::Json(serde_json::from_str(content)?),
            DataFormat::Yaml => Data::Yaml(serde_yaml::from_str(content)?),
            DataFormat::Toml => Data::Json(toml_to_json(toml::Value::Table(
                toml::from_str::<toml::Table>(content)?,
            ))),
        };
        Ok(data)
    }

    /// Set `key` to the string `value`, replacing any existing entry.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            Data::Json(serde_json::Value::Object(map)) => {
                map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
            }
            Data::Yaml(serde_yaml::Value::Mapping(mapping)) => {
                mapping.insert(
                    serde_yaml::Value::String(key.to_string()),
                    serde_yaml::Value::String(value.to_string()),
                );
            }
            _ => return Err(DataError::NotAMapping(key.to_string()).into()),
        }
        Ok(())
    }

    /// Interpolate `template` with this document as the data source.
    pub fn render(&self, templater: &Templater, template: &str) -> InterpolResult<Vec<u8>> {
        match self {
            Data::Json(value) => templater.exec_bytes(template, value),
            Data::Yaml(value) => templater.exec_bytes(template, value),
        }
    }
}

/// Convert a TOML value, keeping datetimes as their TOML text.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        toml::Value::String(s) => Json::String(s),
        toml::Value::Integer(i) => Json::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Json::Number)
            .unwrap_or_else(|| Json::String(f.to_string())),
        toml::Value::Boolean(b) => Json::Bool(b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(items) => Json::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Json::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use interpol_core::InterpolError;

    fn render(data: &Data, template: &str) -> String {
        String::from_utf8(data.render(&Templater::new(), template).unwrap()).unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DataFormat::from_path(Path::new("a.json")), Some(DataFormat::Json));
        assert_eq!(DataFormat::from_path(Path::new("a.YML")), Some(DataFormat::Yaml));
        assert_eq!(DataFormat::from_path(Path::new("a.yaml")), Some(DataFormat::Yaml));
        assert_eq!(DataFormat::from_path(Path::new("a.toml")), Some(DataFormat::Toml));
        assert_eq!(DataFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(DataFormat::from_path(Path::new("data")), None);
    }

    #[test]
    fn test_parse_formats() {
        let json = Data::parse(r#"{"name": "api", "port": 8080}"#, DataFormat::Json).unwrap();
        assert_eq!(render(&json, "{{name}}:{{port}}"), "api:8080");

        let yaml = Data::parse("name: api\nport: 8080\n", DataFormat::Yaml).unwrap();
        assert_eq!(render(&yaml, "{{name}}:{{port}}"), "api:8080");

        let toml = Data::parse("name = \"api\"\nport = 8080\n", DataFormat::Toml).unwrap();
        assert_eq!(render(&toml, "{{name}}:{{port}}"), "api:8080");
    }

    #[test]
    fn test_set_overrides_entries() {
        let mut data = Data::parse("name: api\n", DataFormat::Yaml).unwrap();
        data.set("name", "web").unwrap();
        data.set("env", "prod").unwrap();
        assert_eq!(render(&data, "{{name}}-{{env}}"), "web-prod");

        let mut empty = Data::default();
        empty.set("x", "1").unwrap();
        assert_eq!(render(&empty, "{{x}}"), "1");

        let mut list = Data::parse("[1, 2]", DataFormat::Json).unwrap();
        let err = list.set("x", "1").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::NotAMapping(key)) if key == "x"
        ));
    }

    #[test]
    fn test_toml_datetimes_render_as_text() {
        let data = Data::parse(
            "when = 1979-05-27T07:32:00Z
day = 1979-05-27
[server]
ratio = 0.5
",
            DataFormat::Toml,
        )
        .unwrap();
        assert_eq!(render(&data, "{{when}} / {{day}}"), "1979-05-27T07:32:00Z / 1979-05-27");

        match &data {
            Data::Json(value) => assert_eq!(value["server"]["ratio"], serde_json::json!(0.5)),
            other => panic!("expected a JSON document, got {:?}", other),
        }
    }

    #[test]
    fn test_yaml_non_string_keys_rejected() {
        let data = Data::parse("1: one\n", DataFormat::Yaml).unwrap();
        assert!(matches!(
            data.render(&Templater::new(), "plain"),
            Err(InterpolError::UnsupportedKeyType { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.toml");
        fs::write(&path, "greeting = \"hello\"\n").unwrap();

        let data = Data::load(&path, None).unwrap();
        assert_eq!(render(&data, "{{greeting}}"), "hello");

        let unknown = temp.path().join("values.txt");
        fs::write(&unknown, "{}").unwrap();
        let err = Data::load(&unknown, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::UnknownFormat(path)) if path == &unknown
        ));
        let data = Data::load(&unknown, Some(DataFormat::Json)).unwrap();
        assert_eq!(data, Data::default());
    }
}
