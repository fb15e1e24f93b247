//! Getter dispatch.
//!
//! Dispatch inspects a data source's [`SourceType`] once and picks one of a
//! closed set of lookup strategies. Binding the strategy to the source yields
//! the [`Getter`] used for every placeholder of a single interpolation call.

use std::borrow::Cow;

use tracing::debug;

use crate::coerce::coerce;
use crate::error::{InterpolError, InterpolResult};
use crate::source::{DataSource, KeyKind, MapValue, SourceType, ValueKind};

/// Lookup function from a raw placeholder key to the bytes it expands to.
pub type Getter<'a> = Box<dyn Fn(&str) -> InterpolResult<Cow<'a, [u8]>> + 'a>;

/// Lookup strategy, in selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Stored strings are returned as their bytes.
    Text,
    /// Stored byte sequences are returned as-is.
    Bytes,
    /// Stored values are rendered through [`crate::Render`].
    Render,
    /// Stored values are coerced one by one.
    Coerce,
}

/// Select the lookup strategy for a data source shape.
///
/// Sources whose keys are not strings are rejected here, before any lookup.
pub fn select(source_type: &SourceType) -> InterpolResult<Strategy> {
    if let KeyKind::Other(key_type) = source_type.key {
        return Err(InterpolError::UnsupportedKeyType {
            source_type: source_type.name.to_string(),
            key_type: key_type.to_string(),
        });
    }

    let strategy = match source_type.value {
        ValueKind::Str => Strategy::Text,
        ValueKind::Bytes => Strategy::Bytes,
        ValueKind::Render => Strategy::Render,
        ValueKind::Any => Strategy::Coerce,
    };
    debug!("Selected {:?} lookup for {}", strategy, source_type.name);
    Ok(strategy)
}

impl Strategy {
    /// Bind this strategy to a concrete source.
    ///
    /// The returned getter borrows `source` and does not inspect its type again.
    pub fn bind<'a, D>(self, source: &'a D) -> Getter<'a>
    where
        D: DataSource + ?Sized,
    {
        match self {
            Strategy::Text => Box::new(move |key: &str| {
                let value = entry(source, key)?;
                match value.as_str() {
                    Some(text) => Ok(Cow::Borrowed(text.as_bytes())),
                    None => coerce(key, value.as_scalar()),
                }
            }),
            Strategy::Bytes => Box::new(move |key: &str| {
                let value = entry(source, key)?;
                match value.as_bytes() {
                    Some(bytes) => Ok(Cow::Borrowed(bytes)),
                    None => coerce(key, value.as_scalar()),
                }
            }),
            Strategy::Render => Box::new(move |key: &str| {
                let value = entry(source, key)?;
                match value.as_render() {
                    Some(render) => Ok(Cow::Owned(render.render().into_bytes())),
                    None => coerce(key, value.as_scalar()),
                }
            }),
            Strategy::Coerce => Box::new(move |key: &str| {
                let value = entry(source, key)?;
                coerce(key, value.as_scalar())
            }),
        }
    }
}

/// Select and bind a getter for `source`.
pub fn for_source<D>(source: &D) -> InterpolResult<Getter<'_>>
where
    D: DataSource + ?Sized,
{
    let strategy = select(&source.source_type())?;
    Ok(strategy.bind(source))
}

fn entry<'a, D>(source: &'a D, key: &str) -> InterpolResult<&'a D::Value>
where
    D: DataSource + ?Sized,
{
    source
        .get(key)
        .ok_or_else(|| InterpolError::KeyNotFound(key.to_string()))
}
