//! Errors returned by decoding.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Display};

use tomlbind_core::ReflectError;

/// A location in the source text, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the start
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    /// Creates a span from an offset and a length.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

impl From<core::ops::Range<usize>> for Span {
    fn from(range: core::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end.saturating_sub(range.start))
    }
}

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A table key
    Key(String),
    /// An array index
    Index(usize),
}

/// A key path rendered the way it would be written in a document,
/// e.g. `Main.MainDeep.Field` or `servers[2].port`.
pub struct DisplayPath<'a>(pub &'a [PathSegment]);

impl Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    if is_bare_key(key) {
                        f.write_str(key)?;
                    } else {
                        write!(f, "{key:?}")?;
                    }
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Error returned by every decode entry point.
#[derive(Debug)]
pub struct DecodeError {
    /// What went wrong
    pub kind: DecodeErrorKind,
    /// Key path from the document root to the offending value
    pub path: Vec<PathSegment>,
    /// Where in the source text, when known
    pub span: Option<Span>,
    /// The source text, for diagnostics
    pub source_code: Option<String>,
}

impl DecodeError {
    /// Creates an error at the document root.
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
            span: None,
            source_code: None,
        }
    }

    /// Prepends a path segment. Called while unwinding out of a nested value.
    pub fn with_path(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Attaches a source span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attaches the source text, for rich diagnostics.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source_code = Some(source.to_owned());
        self
    }

    /// The key path, rendered.
    pub fn path_string(&self) -> String {
        DisplayPath(&self.path).to_string()
    }

    pub(crate) fn key(self, key: &str) -> Self {
        self.with_path(PathSegment::Key(key.to_owned()))
    }

    pub(crate) fn index(self, index: usize) -> Self {
        self.with_path(PathSegment::Index(index))
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", DisplayPath(&self.path), self.kind)
        }
    }
}

impl core::error::Error for DecodeError {}

impl From<DecodeErrorKind> for DecodeError {
    fn from(kind: DecodeErrorKind) -> Self {
        DecodeError::new(kind)
    }
}

impl From<ReflectError> for DecodeError {
    fn from(err: ReflectError) -> Self {
        DecodeError::new(err.into())
    }
}

impl miette::Diagnostic for DecodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.kind.help().map(|h| Box::new(h) as Box<dyn Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_code
            .as_ref()
            .map(|s| s as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(core::iter::once(miette::LabeledSpan::new(
            Some(self.kind.label()),
            span.offset,
            span.len,
        ))))
    }
}

/// The kinds of decode failure.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeErrorKind {
    /// A document value cannot go into the destination at its path.
    TypeMismatch {
        /// What the destination accepts
        expected: String,
        /// What the document holds
        got: String,
    },

    /// A table key cannot be converted to a map's key type.
    UnconvertibleKey {
        /// The key as written
        key: String,
        /// The map's key type
        target: &'static str,
        /// Why conversion failed
        reason: String,
    },

    /// A declared default does not parse as its field's type.
    InvalidDefaultLiteral {
        /// The field, by its Rust name
        field: &'static str,
        /// The declared literal
        literal: &'static str,
        /// The field's type
        target: &'static str,
        /// Why parsing failed
        reason: String,
    },

    /// The destination has no binding strategy.
    UnsupportedTarget {
        /// The destination's type
        target: &'static str,
    },

    /// An integer does not fit the destination and the overflow policy is
    /// [`OverflowPolicy::Error`](crate::OverflowPolicy::Error).
    NumberOutOfRange {
        /// The integer, rendered
        value: String,
        /// The destination's type
        target: &'static str,
    },

    /// The input text is not valid TOML.
    Parse(String),
}

impl Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            DecodeErrorKind::UnconvertibleKey {
                key,
                target,
                reason,
            } => write!(f, "cannot convert key `{key}` to {target}: {reason}"),
            DecodeErrorKind::InvalidDefaultLiteral {
                field,
                literal,
                target,
                reason,
            } => write!(
                f,
                "invalid default for field `{field}`: `{literal}` is not a valid {target}: {reason}"
            ),
            DecodeErrorKind::UnsupportedTarget { target } => {
                write!(f, "cannot decode into {target}: no binding strategy for this type")
            }
            DecodeErrorKind::NumberOutOfRange { value, target } => {
                write!(f, "number `{value}` out of range for {target}")
            }
            DecodeErrorKind::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl DecodeErrorKind {
    /// A stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeErrorKind::TypeMismatch { .. } => "tomlbind::type_mismatch",
            DecodeErrorKind::UnconvertibleKey { .. } => "tomlbind::unconvertible_key",
            DecodeErrorKind::InvalidDefaultLiteral { .. } => "tomlbind::invalid_default_literal",
            DecodeErrorKind::UnsupportedTarget { .. } => "tomlbind::unsupported_target",
            DecodeErrorKind::NumberOutOfRange { .. } => "tomlbind::number_out_of_range",
            DecodeErrorKind::Parse(_) => "tomlbind::parse",
        }
    }

    /// A short description of what the span points at.
    pub fn label(&self) -> String {
        match self {
            DecodeErrorKind::TypeMismatch { expected, got } => {
                format!("expected {expected}, got {got}")
            }
            DecodeErrorKind::UnconvertibleKey { target, .. } => format!("not a valid {target}"),
            DecodeErrorKind::InvalidDefaultLiteral { target, .. } => {
                format!("not a valid {target}")
            }
            DecodeErrorKind::UnsupportedTarget { target } => format!("{target} cannot be decoded"),
            DecodeErrorKind::NumberOutOfRange { target, .. } => format!("out of range for {target}"),
            DecodeErrorKind::Parse(msg) => msg.clone(),
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            DecodeErrorKind::NumberOutOfRange { .. } => Some(
                "use a wider integer type, or DecodeOptions::overflow to wrap or saturate",
            ),
            DecodeErrorKind::UnsupportedTarget { .. } => {
                Some("remove the key from the document, or mark the field #[bind(skip)]")
            }
            _ => None,
        }
    }
}

impl From<ReflectError> for DecodeErrorKind {
    fn from(err: ReflectError) -> Self {
        match err {
            ReflectError::TypeMismatch { expected, got } => DecodeErrorKind::TypeMismatch {
                expected: expected.type_identifier.to_string(),
                got: got.to_string(),
            },
            ReflectError::OutOfRange { value, target } => DecodeErrorKind::NumberOutOfRange {
                value,
                target: target.type_identifier,
            },
            ReflectError::InvalidLiteral {
                literal,
                target,
                reason,
            } => DecodeErrorKind::TypeMismatch {
                expected: target.type_identifier.to_string(),
                got: format!("`{literal}` ({reason})"),
            },
            ReflectError::UnconvertibleKey {
                key,
                target,
                reason,
            } => DecodeErrorKind::UnconvertibleKey {
                key,
                target,
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_render_like_keys() {
        let path = [
            PathSegment::Key("servers".into()),
            PathSegment::Index(2),
            PathSegment::Key("port".into()),
        ];
        assert_eq!(DisplayPath(&path).to_string(), "servers[2].port");

        let path = [
            PathSegment::Key("site".into()),
            PathSegment::Key("example.com".into()),
        ];
        assert_eq!(DisplayPath(&path).to_string(), "site.\"example.com\"");

        assert_eq!(DisplayPath(&[]).to_string(), "<root>");
    }

    #[test]
    fn with_path_prepends() {
        let err = DecodeError::new(DecodeErrorKind::UnsupportedTarget { target: "fn()" })
            .key("Field")
            .key("MainDeep")
            .key("Main");
        assert_eq!(err.path_string(), "Main.MainDeep.Field");
        assert_eq!(err.kind.code(), "tomlbind::unsupported_target");
    }
}
