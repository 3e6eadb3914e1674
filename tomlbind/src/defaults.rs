//! Declared defaults, applied before any document data.

use alloc::format;
use alloc::string::{String, ToString};

use log::trace;
use tomlbind_core::{Field, Poke, ReflectError};

use crate::{DecodeError, DecodeErrorKind};

/// Writes declared default literals into the zero-valued fields of the struct
/// behind `poke`, recursing through struct-valued (not optional) fields.
///
/// Anything other than a struct is left alone.
pub(crate) fn apply_defaults(poke: &mut Poke<'_>) -> Result<(), DecodeError> {
    let Poke::Struct(s) = poke else {
        return Ok(());
    };

    for (index, field) in s.fields().iter().enumerate() {
        let Some(mut child) = s.field(index) else {
            continue;
        };
        let applied = match field.default {
            Some(literal) => apply_literal(field, literal, &mut child),
            None => apply_defaults(&mut child),
        };
        applied.map_err(|e| e.key(field.name))?;
    }
    Ok(())
}

fn apply_literal(field: &Field, literal: &'static str, poke: &mut Poke<'_>) -> Result<(), DecodeError> {
    match poke {
        Poke::Scalar(scalar) => {
            if !scalar.is_zero() {
                trace!("keeping caller value of `{}`", field.rust_name);
                return Ok(());
            }
            trace!("default `{}` = {literal:?}", field.rust_name);
            let target = scalar.shape().type_identifier;
            scalar
                .parse_literal(literal)
                .map_err(|e| invalid_default(field, literal, target, reason(e)))
        }
        Poke::Option(option) => {
            if option.is_some() {
                return Ok(());
            }
            let mut inner = option.allocate();
            apply_literal(field, literal, &mut inner)
        }
        other => {
            let shape = other.shape();
            Err(invalid_default(
                field,
                literal,
                shape.type_identifier,
                format!(
                    "defaults can only be declared on scalar fields, not on a {}",
                    shape.def.kind_name()
                ),
            ))
        }
    }
}

fn invalid_default(
    field: &Field,
    literal: &'static str,
    target: &'static str,
    reason: String,
) -> DecodeError {
    DecodeErrorKind::InvalidDefaultLiteral {
        field: field.rust_name,
        literal,
        target,
        reason,
    }
    .into()
}

fn reason(err: ReflectError) -> String {
    match err {
        ReflectError::InvalidLiteral { reason, .. } => reason,
        other => other.to_string(),
    }
}
