//! Scalar coercion for the generic lookup fallback.

use std::borrow::Cow;

use crate::error::{InterpolError, InterpolResult};
use crate::source::Render;

/// A single value as seen by the generic fallback.
///
/// Values that cannot be turned into text carry the name of their type in
/// [`Scalar::Unsupported`] so the error can say what was found.
#[derive(Clone, Copy)]
pub enum Scalar<'a> {
    Str(&'a str),
    Bytes(&'a [u8]),
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Render(&'a dyn Render),
    Unsupported(&'static str),
}

impl std::fmt::Debug for Scalar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Scalar::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Scalar::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Scalar::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Scalar::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Scalar::UInt(n) => f.debug_tuple("UInt").field(n).finish(),
            Scalar::F32(n) => f.debug_tuple("F32").field(n).finish(),
            Scalar::F64(n) => f.debug_tuple("F64").field(n).finish(),
            Scalar::Render(r) => f.debug_tuple("Render").field(&r.render()).finish(),
            Scalar::Unsupported(kind) => f.debug_tuple("Unsupported").field(kind).finish(),
        }
    }
}

/// Convert the value stored under `key` to bytes.
///
/// Numbers use their `Display` form, so `3.0_f64` becomes `3` and `1.5_f32`
/// becomes `1.5`.
pub fn coerce<'a>(key: &str, value: Scalar<'a>) -> InterpolResult<Cow<'a, [u8]>> {
    let bytes = match value {
        Scalar::Str(s) => Cow::Borrowed(s.as_bytes()),
        Scalar::Bytes(b) => Cow::Borrowed(b),
        Scalar::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }.as_bytes()),
        Scalar::Char(c) => Cow::Owned(c.to_string().into_bytes()),
        Scalar::Int(n) => Cow::Owned(n.to_string().into_bytes()),
        Scalar::UInt(n) => Cow::Owned(n.to_string().into_bytes()),
        Scalar::F32(n) => Cow::Owned(n.to_string().into_bytes()),
        Scalar::F64(n) => Cow::Owned(n.to_string().into_bytes()),
        Scalar::Render(r) => Cow::Owned(r.render().into_bytes()),
        Scalar::Unsupported(value_type) => {
            return Err(InterpolError::UnsupportedValueType {
                key: key.to_string(),
                value_type: value_type.to_string(),
            })
        }
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: Scalar<'_>) -> String {
        String::from_utf8(coerce("k", value).unwrap().into_owned()).unwrap()
    }

    #[test]
    fn test_text_and_bytes_are_borrowed() {
        assert!(matches!(coerce("k", Scalar::Str("abc")).unwrap(), Cow::Borrowed(b"abc")));
        assert!(matches!(
            coerce("k", Scalar::Bytes(&[0xff, 0x00])).unwrap(),
            Cow::Borrowed(&[0xff, 0x00])
        ));
    }

    #[test]
    fn test_booleans_and_chars() {
        assert_eq!(text(Scalar::Bool(true)), "true");
        assert_eq!(text(Scalar::Bool(false)), "false");
        assert_eq!(text(Scalar::Char('ß')), "ß");
    }

    #[test]
    fn test_numbers_use_base_ten() {
        assert_eq!(text(Scalar::Int(-42)), "-42");
        assert_eq!(text(Scalar::UInt(u64::MAX)), "18446744073709551615");
        assert_eq!(text(Scalar::F64(1.5)), "1.5");
        assert_eq!(text(Scalar::F64(3.0)), "3");
        assert_eq!(text(Scalar::F32(0.1)), "0.1");
    }

    #[test]
    fn test_render_capability() {
        let addr = std::net::Ipv4Addr::new(127, 0, 0, 1);
        assert_eq!(text(Scalar::Render(&addr)), "127.0.0.1");
    }

    #[test]
    fn test_unsupported_value() {
        let err = coerce("nested", Scalar::Unsupported("object")).unwrap_err();
        match err {
            InterpolError::UnsupportedValueType { key, value_type } => {
                assert_eq!(key, "nested");
                assert_eq!(value_type, "object");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
