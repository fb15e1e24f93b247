//! Placeholder scanning.
//!
//! The scanner makes a single left-to-right pass over a template. It looks for
//! the next `{{`, then for the next `}}` after it, and hands back everything in
//! between as the raw key. Nothing is trimmed or balanced, so stray single
//! braces and whitespace inside a placeholder become part of its key, and
//! braces outside a placeholder are plain text.

use crate::error::{InterpolError, InterpolResult};

/// Marker opening a placeholder.
pub const OPEN_MARKER: &str = "{{";

/// Marker closing a placeholder.
pub const CLOSE_MARKER: &str = "}}";

/// A piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text copied to the output verbatim.
    Literal(&'t str),
    /// A placeholder span.
    Placeholder {
        /// Raw content between the markers.
        key: &'t str,
        /// Byte offset of the open marker in the template.
        offset: usize,
    },
}

/// Iterator over the segments of a template.
///
/// Empty literals are never yielded. An open marker with no close marker after
/// it yields [`InterpolError::UnterminatedPlaceholder`], after which the
/// iterator is exhausted.
///
/// ```
/// use interpol_core::scanner::{Scanner, Segment};
///
/// let segments: Vec<_> = Scanner::new("hi {{name}}!")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Literal("hi "),
///         Segment::Placeholder { key: "name", offset: 3 },
///         Segment::Literal("!"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'t> {
    template: &'t str,
    cursor: usize,
    pending: Option<Segment<'t>>,
    done: bool,
}

impl<'t> Scanner<'t> {
    /// Create a scanner positioned at the start of `template`.
    pub fn new(template: &'t str) -> Self {
        Self {
            template,
            cursor: 0,
            pending: None,
            done: false,
        }
    }
}

impl<'t> Iterator for Scanner<'t> {
    type Item = InterpolResult<Segment<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            return Some(Ok(segment));
        }
        if self.done {
            return None;
        }

        let rest = &self.template[self.cursor..];
        let Some(open) = rest.find(OPEN_MARKER) else {
            self.done = true;
            return (!rest.is_empty()).then_some(Ok(Segment::Literal(rest)));
        };

        let open_at = self.cursor + open;
        let key_start = open_at + OPEN_MARKER.len();
        let Some(close) = self.template[key_start..].find(CLOSE_MARKER) else {
            self.done = true;
            return Some(Err(InterpolError::UnterminatedPlaceholder { offset: open_at }));
        };

        let key_end = key_start + close;
        let literal = &self.template[self.cursor..open_at];
        let placeholder = Segment::Placeholder {
            key: &self.template[key_start..key_end],
            offset: open_at,
        };
        self.cursor = key_end + CLOSE_MARKER.len();

        if literal.is_empty() {
            Some(Ok(placeholder))
        } else {
            self.pending = Some(placeholder);
            Some(Ok(Segment::Literal(literal)))
        }
    }
}

/// List the raw placeholder keys of a template in order of appearance.
///
/// Duplicates are kept.
pub fn placeholders(template: &str) -> InterpolResult<Vec<&str>> {
    let mut keys = Vec::new();
    for segment in Scanner::new(template) {
        if let Segment::Placeholder { key, .. } = segment? {
            keys.push(key);
        }
    }
    Ok(keys)
}
