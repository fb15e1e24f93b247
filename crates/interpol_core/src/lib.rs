//! # interpol_core
//!
//! `{{key}}` string interpolation over in-memory key-value data.
//!
//! This crate scans a template for placeholders and replaces each one with a
//! value looked up in a caller-supplied data source. There are no
//! conditionals, loops or escapes: everything between `{{` and the next `}}` is
//! a key, taken verbatim.
//!
//! Supported data sources:
//!
//! - `HashMap` / `BTreeMap` with string keys and string, byte, `Render` or
//!   scalar values
//! - `serde_json::Value` and `serde_json::Map` objects
//! - `serde_yaml::Value` and `serde_yaml::Mapping` with string keys
//!
//! The shape of the source is inspected once per call to pick a lookup
//! strategy (see [`getter`]).
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use interpol_core::{exec, InterpolError};
//!
//! let mut data = HashMap::new();
//! data.insert("project_name", "my-api");
//! data.insert("port", "8080");
//!
//! let text = exec("{{project_name}} listens on {{port}}", &data).unwrap();
//! assert_eq!(text, "my-api listens on 8080");
//!
//! let err = exec("{{missing}}", &data).unwrap_err();
//! assert!(matches!(err, InterpolError::KeyNotFound(_)));
//! ```

pub mod coerce;
pub mod error;
pub mod getter;
pub mod scanner;
pub mod source;
pub mod templater;

pub use coerce::Scalar;
pub use error::{InterpolError, InterpolResult};
pub use getter::{Getter, Strategy};
pub use scanner::{placeholders, Scanner, Segment, CLOSE_MARKER, OPEN_MARKER};
pub use source::{DataSource, KeyKind, MapValue, Render, Rendered, SourceType, ValueKind};
pub use templater::{exec, LookupFn, Templater};
