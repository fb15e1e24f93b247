//! Data source shapes understood by getter dispatch.
//!
//! A data source is a string-keyed container. It reports its runtime shape as
//! a [`SourceType`] and hands out stored values by key; each stored value type
//! declares through [`MapValue`] which lookup strategy fits it.
//!
//! Std maps are typed, so their key type is checked by the compiler. Dynamic
//! documents (`serde_json::Value`, `serde_yaml::Value`) only learn their shape
//! at runtime and report non-string keys through [`KeyKind::Other`].

use std::any::type_name;
use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use crate::coerce::Scalar;

/// Key shape of a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Keys are strings.
    Str,
    /// Keys are something else, named for error reporting.
    Other(&'static str),
}

/// Value shape of a data source, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    Bytes,
    Render,
    Any,
}

/// Runtime type descriptor of a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceType {
    pub name: &'static str,
    pub key: KeyKind,
    pub value: ValueKind,
}

/// Values that can describe themselves as text.
///
/// Every `Display` type is `Render`. Store values as `Box<dyn Render>` (or
/// wrap them in [`Rendered`]) to get the render lookup strategy.
pub trait Render {
    fn render(&self) -> String;
}

impl<T: fmt::Display + ?Sized> Render for T {
    fn render(&self) -> String {
        self.to_string()
    }
}

/// Wrapper marking a `Display` value for the render lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rendered<T>(pub T);

/// A value stored in a data source.
///
/// `KIND` drives strategy selection; the accessor matching `KIND` must return
/// `Some`. [`MapValue::as_scalar`] is what the generic fallback coerces.
pub trait MapValue {
    const KIND: ValueKind;

    fn as_str(&self) -> Option<&str> {
        None
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }

    fn as_render(&self) -> Option<&dyn Render> {
        None
    }

    fn as_scalar(&self) -> Scalar<'_>;
}

/// A string-keyed container that getter dispatch can inspect.
pub trait DataSource {
    type Value: MapValue + ?Sized;

    /// Describe the runtime shape of this source.
    fn source_type(&self) -> SourceType;

    /// Look up the value stored under `key`.
    fn get(&self, key: &str) -> Option<&Self::Value>;
}

// Strings

impl MapValue for str {
    const KIND: ValueKind = ValueKind::Str;

    fn as_str(&self) -> Option<&str> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Str(self)
    }
}

impl MapValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn as_str(&self) -> Option<&str> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Str(self)
    }
}

impl MapValue for Cow<'_, str> {
    const KIND: ValueKind = ValueKind::Str;

    fn as_str(&self) -> Option<&str> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Str(self)
    }
}

// Byte sequences

impl MapValue for [u8] {
    const KIND: ValueKind = ValueKind::Bytes;

    fn as_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Bytes(self)
    }
}

impl MapValue for Vec<u8> {
    const KIND: ValueKind = ValueKind::Bytes;

    fn as_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Bytes(self)
    }
}

impl MapValue for Cow<'_, [u8]> {
    const KIND: ValueKind = ValueKind::Bytes;

    fn as_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Bytes(self)
    }
}

// Render capability

impl MapValue for dyn Render + '_ {
    const KIND: ValueKind = ValueKind::Render;

    fn as_render(&self) -> Option<&dyn Render> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Render(self)
    }
}

impl MapValue for dyn Render + Send + Sync + '_ {
    const KIND: ValueKind = ValueKind::Render;

    fn as_render(&self) -> Option<&dyn Render> {
        Some(self)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Render(self)
    }
}

impl<T: fmt::Display> MapValue for Rendered<T> {
    const KIND: ValueKind = ValueKind::Render;

    fn as_render(&self) -> Option<&dyn Render> {
        Some(&self.0)
    }

    fn as_scalar(&self) -> Scalar<'_> {
        Scalar::Render(&self.0)
    }
}

// Pointers delegate to their target.

macro_rules! impl_map_value_for_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: MapValue + ?Sized> MapValue for $ptr<T> {
                const KIND: ValueKind = T::KIND;

                fn as_str(&self) -> Option<&str> {
                    (**self).as_str()
                }

                fn as_bytes(&self) -> Option<&[u8]> {
                    (**self).as_bytes()
                }

                fn as_render(&self) -> Option<&dyn Render> {
                    (**self).as_render()
                }

                fn as_scalar(&self) -> Scalar<'_> {
                    (**self).as_scalar()
                }
            }
        )*
    };
}

impl_map_value_for_pointer!(Box, Rc, Arc);

impl<T: MapValue + ?Sized> MapValue for &T {
    const KIND: ValueKind = T::KIND;

    fn as_str(&self) -> Option<&str> {
        (**self).as_str()
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        (**self).as_bytes()
    }

    fn as_render(&self) -> Option<&dyn Render> {
        (**self).as_render()
    }

    fn as_scalar(&self) -> Scalar<'_> {
        (**self).as_scalar()
    }
}

// Generic fallback values

macro_rules! impl_map_value_for_scalar {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl MapValue for $ty {
                const KIND: ValueKind = ValueKind::Any;

                fn as_scalar(&self) -> Scalar<'_> {
                    Scalar::$variant((*self).into())
                }
            }
        )*
    };
}

impl_map_value_for_scalar!(Int: i8, i16, i32, i64);
impl_map_value_for_scalar!(UInt: u8, u16, u32, u64);
impl_map_value_for_scalar!(Bool: bool);
impl_map_value_for_scalar!(Char: char);
impl_map_value_for_scalar!(F32: f32);
impl_map_value_for_scalar!(F64: f64);

impl MapValue for isize {
    const KIND: ValueKind = ValueKind::Any;

    fn as_scalar(&self) -> Scalar<'_> {
        i64::try_from(*self).map_or(Scalar::Unsupported("isize"), Scalar::Int)
    }
}

impl MapValue for usize {
    const KIND: ValueKind = ValueKind::Any;

    fn as_scalar(&self) -> Scalar<'_> {
        u64::try_from(*self).map_or(Scalar::Unsupported("usize"), Scalar::UInt)
    }
}

impl<T: MapValue> MapValue for Option<T> {
    const KIND: ValueKind = ValueKind::Any;

    fn as_scalar(&self) -> Scalar<'_> {
        match self {
            Some(value) => value.as_scalar(),
            None => Scalar::Unsupported("none"),
        }
    }
}

impl MapValue for serde_json::Value {
    const KIND: ValueKind = ValueKind::Any;

    fn as_scalar(&self) -> Scalar<'_> {
        use serde_json::Value;

        match self {
            Value::String(s) => Scalar::Str(s),
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Scalar::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Scalar::UInt(u)
                } else {
                    n.as_f64().map_or(Scalar::Unsupported("number"), Scalar::F64)
                }
            }
            Value::Null => Scalar::Unsupported("null"),
            Value::Array(_) => Scalar::Unsupported("array"),
            Value::Object(_) => Scalar::Unsupported("object"),
        }
    }
}

impl MapValue for serde_yaml::Value {
    const KIND: ValueKind = ValueKind::Any;

    fn as_scalar(&self) -> Scalar<'_> {
        use serde_yaml::Value;

        match self {
            Value::String(s) => Scalar::Str(s),
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Scalar::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Scalar::UInt(u)
                } else {
                    n.as_f64().map_or(Scalar::Unsupported("number"), Scalar::F64)
                }
            }
            other => Scalar::Unsupported(yaml_kind(other)),
        }
    }
}

// Containers

impl<K, V, S> DataSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: MapValue,
    S: BuildHasher,
{
    type Value = V;

    fn source_type(&self) -> SourceType {
        SourceType {
            name: type_name::<Self>(),
            key: KeyKind::Str,
            value: V::KIND,
        }
    }

    fn get(&self, key: &str) -> Option<&V> {
        HashMap::get(self, key)
    }
}

impl<K, V> DataSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: MapValue,
{
    type Value = V;

    fn source_type(&self) -> SourceType {
        SourceType {
            name: type_name::<Self>(),
            key: KeyKind::Str,
            value: V::KIND,
        }
    }

    fn get(&self, key: &str) -> Option<&V> {
        BTreeMap::get(self, key)
    }
}

impl DataSource for serde_json::Map<String, serde_json::Value> {
    type Value = serde_json::Value;

    fn source_type(&self) -> SourceType {
        SourceType {
            name: "serde_json::Map",
            key: KeyKind::Str,
            value: ValueKind::Any,
        }
    }

    fn get(&self, key: &str) -> Option<&serde_json::Value> {
        serde_json::Map::get(self, key)
    }
}

impl DataSource for serde_json::Value {
    type Value = serde_json::Value;

    fn source_type(&self) -> SourceType {
        use serde_json::Value;

        let key = match self {
            Value::Object(_) => KeyKind::Str,
            Value::Array(_) => KeyKind::Other("array index"),
            Value::Null => KeyKind::Other("null"),
            Value::Bool(_) => KeyKind::Other("bool"),
            Value::Number(_) => KeyKind::Other("number"),
            Value::String(_) => KeyKind::Other("string"),
        };
        SourceType {
            name: "serde_json::Value",
            key,
            value: ValueKind::Any,
        }
    }

    fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.as_object()?.get(key)
    }
}

impl DataSource for serde_yaml::Mapping {
    type Value = serde_yaml::Value;

    fn source_type(&self) -> SourceType {
        let key = self
            .keys()
            .find(|k| !k.is_string())
            .map_or(KeyKind::Str, |k| KeyKind::Other(yaml_kind(k)));
        SourceType {
            name: "serde_yaml::Mapping",
            key,
            value: ValueKind::Any,
        }
    }

    fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        serde_yaml::Mapping::get(self, key)
    }
}

impl DataSource for serde_yaml::Value {
    type Value = serde_yaml::Value;

    fn source_type(&self) -> SourceType {
        match self {
            serde_yaml::Value::Mapping(mapping) => SourceType {
                name: "serde_yaml::Value",
                ..mapping.source_type()
            },
            other => SourceType {
                name: "serde_yaml::Value",
                key: KeyKind::Other(yaml_kind(other)),
                value: ValueKind::Any,
            },
        }
    }

    fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.as_mapping()?.get(key)
    }
}

impl<T: DataSource + ?Sized> DataSource for &T {
    type Value = T::Value;

    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn get(&self, key: &str) -> Option<&T::Value> {
        (**self).get(key)
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
