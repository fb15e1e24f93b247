//! Template interpolation.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::error::InterpolResult;
use crate::getter::{self, Getter};
use crate::scanner::{Scanner, Segment};
use crate::source::DataSource;

/// Custom lookup used in place of getter dispatch.
pub type LookupFn = Box<dyn Fn(&str) -> InterpolResult<Vec<u8>> + Send + Sync>;

/// Interpolates `{{key}}` placeholders with values from a data source.
///
/// A templater keeps no state between calls. Each call runs getter dispatch
/// once for its data source and reuses the resulting getter for every
/// placeholder.
#[derive(Default)]
pub struct Templater {
    lookup: Option<LookupFn>,
}

impl Templater {
    /// Create a templater that looks keys up in the data source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a templater that resolves every key with `lookup`.
    ///
    /// The data source passed to [`Templater::exec`] must still have string
    /// keys, but it is not consulted.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> InterpolResult<Vec<u8>> + Send + Sync + 'static,
    {
        Self {
            lookup: Some(Box::new(lookup)),
        }
    }

    /// Interpolate `template` and return the result as text.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use interpol_core::Templater;
    ///
    /// let mut data = HashMap::new();
    /// data.insert("name", "world");
    ///
    /// let text = Templater::new().exec("hello {{name}}", &data).unwrap();
    /// assert_eq!(text, "hello world");
    /// ```
    pub fn exec<D>(&self, template: &str, source: &D) -> InterpolResult<String>
    where
        D: DataSource + ?Sized,
    {
        let bytes = self.exec_bytes(template, source)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Interpolate `template` and return the raw output bytes.
    pub fn exec_bytes<D>(&self, template: &str, source: &D) -> InterpolResult<Vec<u8>>
    where
        D: DataSource + ?Sized,
    {
        let getter = self.getter(source)?;
        let mut output = Vec::with_capacity(template.len());
        let mut substituted = 0usize;

        for segment in Scanner::new(template) {
            match segment? {
                Segment::Literal(text) => output.extend_from_slice(text.as_bytes()),
                Segment::Placeholder { key, offset } => {
                    trace!("Substituting {:?} at offset {}", key, offset);
                    output.extend_from_slice(&getter(key)?);
                    substituted += 1;
                }
            }
        }

        debug!(
            "Interpolated {} placeholder(s) into {} bytes",
            substituted,
            output.len()
        );
        Ok(output)
    }

    fn getter<'a, D>(&'a self, source: &'a D) -> InterpolResult<Getter<'a>>
    where
        D: DataSource + ?Sized,
    {
        let strategy = getter::select(&source.source_type())?;
        Ok(match &self.lookup {
            Some(lookup) => Box::new(move |key: &str| lookup(key).map(Cow::Owned)),
            None => strategy.bind(source),
        })
    }
}

/// Interpolate `template` from `source` with a default [`Templater`].
pub fn exec<D>(template: &str, source: &D) -> InterpolResult<String>
where
    D: DataSource + ?Sized,
{
    Templater::new().exec(template, source)
}
