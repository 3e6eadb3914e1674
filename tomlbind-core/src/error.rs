use alloc::string::String;

use crate::Shape;

/// Errors raised by a destination when asked to accept a value.
#[derive(Debug, Clone)]
pub enum ReflectError {
    /// The value's kind does not fit the destination, e.g. a string written
    /// into a `u32`.
    TypeMismatch {
        /// The destination's shape.
        expected: &'static Shape,
        /// Kind of the value that was offered.
        got: &'static str,
    },

    /// An integer does not fit the destination's range.
    OutOfRange {
        /// The offending number, rendered.
        value: String,
        /// The destination's shape.
        target: &'static Shape,
    },

    /// A literal could not be parsed into the destination's type.
    InvalidLiteral {
        /// The literal text.
        literal: String,
        /// The destination's shape.
        target: &'static Shape,
        /// Why parsing failed.
        reason: String,
    },

    /// A table key could not be converted to a map's key type.
    UnconvertibleKey {
        /// The table key.
        key: String,
        /// Name of the map's key type.
        target: &'static str,
        /// Why conversion failed.
        reason: String,
    },
}

impl core::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectError::TypeMismatch { expected, got } => {
                write!(f, "Wrong type: expected {expected}, but got {got}")
            }
            ReflectError::OutOfRange { value, target } => {
                write!(f, "Number {value} out of range for {target}")
            }
            ReflectError::InvalidLiteral {
                literal,
                target,
                reason,
            } => write!(f, "Cannot parse `{literal}` as {target}: {reason}"),
            ReflectError::UnconvertibleKey {
                key,
                target,
                reason,
            } => write!(f, "Cannot convert key `{key}` to {target}: {reason}"),
        }
    }
}

impl core::error::Error for ReflectError {}
