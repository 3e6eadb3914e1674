//! Document scalars into scalar destinations.

use alloc::format;
use alloc::string::ToString;

use log::trace;
use tomlbind_core::{Document, PokeScalar, ScalarType, ScalarValue};

use crate::{DecodeError, DecodeErrorKind, OverflowPolicy};

pub(crate) fn bind_scalar(
    doc: &Document,
    slot: &mut dyn PokeScalar,
    overflow: OverflowPolicy,
) -> Result<(), DecodeError> {
    let ty = slot.scalar_type();
    let shape = slot.shape();
    trace!("scalar {} <- {}", shape, doc.kind());

    let value = match doc {
        Document::Integer(n) if ty.is_integer() => ScalarValue::Int(fit_integer(*n, ty, overflow)?),
        Document::Integer(n) if ty.is_float() => ScalarValue::Int(i128::from(*n)),
        Document::Float(x) if ty.is_float() => ScalarValue::Float(*x),
        Document::String(s) if ty == ScalarType::String => ScalarValue::Str(s),
        Document::String(s) if ty == ScalarType::Char => {
            let count = s.chars().count();
            if count != 1 {
                return Err(DecodeErrorKind::TypeMismatch {
                    expected: shape.type_identifier.to_string(),
                    got: format!("string of {count} characters"),
                }
                .into());
            }
            ScalarValue::Str(s)
        }
        Document::Boolean(b) if ty == ScalarType::Bool => ScalarValue::Bool(*b),
        Document::Datetime(dt) if ty == ScalarType::Datetime => ScalarValue::Datetime(*dt),
        other => {
            return Err(DecodeErrorKind::TypeMismatch {
                expected: shape.type_identifier.to_string(),
                got: other.kind().to_string(),
            }
            .into());
        }
    };

    slot.set(value)?;
    Ok(())
}

/// Brings `n` into `ty`'s range according to `policy`.
pub(crate) fn fit_integer(
    n: i64,
    ty: ScalarType,
    policy: OverflowPolicy,
) -> Result<i128, DecodeErrorKind> {
    let (Some((min, max)), Some((bits, signed))) = (ty.integer_bounds(), ty.integer_bits()) else {
        return Ok(i128::from(n));
    };
    let wide = i128::from(n);
    if (min..=max).contains(&wide) {
        return Ok(wide);
    }

    match policy {
        OverflowPolicy::Error => Err(DecodeErrorKind::NumberOutOfRange {
            value: n.to_string(),
            target: type_name(ty),
        }),
        OverflowPolicy::Saturate => Ok(wide.clamp(min, max)),
        OverflowPolicy::Wrap => {
            let modulus = 1i128 << bits;
            let mut wrapped = wide.rem_euclid(modulus);
            if signed && wrapped > max {
                wrapped -= modulus;
            }
            Ok(wrapped)
        }
    }
}

fn type_name(ty: ScalarType) -> &'static str {
    match ty {
        ScalarType::I8 => "i8",
        ScalarType::I16 => "i16",
        ScalarType::I32 => "i32",
        ScalarType::I64 => "i64",
        ScalarType::Isize => "isize",
        ScalarType::U8 => "u8",
        ScalarType::U16 => "u16",
        ScalarType::U32 => "u32",
        ScalarType::U64 => "u64",
        ScalarType::Usize => "usize",
        ScalarType::F32 => "f32",
        ScalarType::F64 => "f64",
        ScalarType::Bool => "bool",
        ScalarType::Char => "char",
        ScalarType::String => "String",
        ScalarType::Datetime => "Datetime",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_passes_through() {
        for policy in [OverflowPolicy::Error, OverflowPolicy::Wrap, OverflowPolicy::Saturate] {
            assert_eq!(fit_integer(200, ScalarType::U8, policy), Ok(200));
            assert_eq!(fit_integer(-128, ScalarType::I8, policy), Ok(-128));
        }
    }

    #[test]
    fn error_policy_reports_target() {
        assert_eq!(
            fit_integer(300, ScalarType::U8, OverflowPolicy::Error),
            Err(DecodeErrorKind::NumberOutOfRange {
                value: "300".into(),
                target: "u8",
            })
        );
    }

    #[test]
    fn wrap_matches_as_casts() {
        let wrap = OverflowPolicy::Wrap;
        assert_eq!(fit_integer(300, ScalarType::U8, wrap), Ok(300i64 as u8 as i128));
        assert_eq!(fit_integer(-1, ScalarType::U32, wrap), Ok(-1i64 as u32 as i128));
        assert_eq!(fit_integer(200, ScalarType::I8, wrap), Ok(200i64 as i8 as i128));
        assert_eq!(fit_integer(-1, ScalarType::U64, wrap), Ok(u64::MAX as i128));
    }

    #[test]
    fn saturate_clamps() {
        let sat = OverflowPolicy::Saturate;
        assert_eq!(fit_integer(300, ScalarType::U8, sat), Ok(255));
        assert_eq!(fit_integer(-5, ScalarType::U16, sat), Ok(0));
        assert_eq!(fit_integer(i64::MIN, ScalarType::I32, sat), Ok(i32::MIN as i128));
    }
}
