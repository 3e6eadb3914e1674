use alloc::boxed::Box;
use alloc::string::{String, ToString};

use crate::{Bind, Datetime, Poke, PokeScalar, ReflectError, ScalarType, ScalarValue, Shape};

fn mismatch<T: Bind>(value: ScalarValue<'_>) -> ReflectError {
    ReflectError::TypeMismatch {
        expected: T::SHAPE,
        got: value.kind_name(),
    }
}

fn invalid<T: Bind>(literal: &str, reason: impl ToString) -> ReflectError {
    ReflectError::InvalidLiteral {
        literal: literal.to_string(),
        target: T::SHAPE,
        reason: reason.to_string(),
    }
}

macro_rules! impl_integer {
    ($($ty:ident => $st:ident),* $(,)?) => {
        $(
            impl Bind for $ty {
                const SHAPE: &'static Shape = &Shape::scalar(stringify!($ty), ScalarType::$st);

                fn zero() -> Self {
                    0
                }

                fn poke(&mut self) -> Poke<'_> {
                    Poke::Scalar(self)
                }
            }

            impl PokeScalar for $ty {
                fn shape(&self) -> &'static Shape {
                    <Self as Bind>::SHAPE
                }

                fn scalar_type(&self) -> ScalarType {
                    ScalarType::$st
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError> {
                    match value {
                        ScalarValue::Int(n) => {
                            *self = $ty::try_from(n).map_err(|_| ReflectError::OutOfRange {
                                value: n.to_string(),
                                target: <Self as Bind>::SHAPE,
                            })?;
                            Ok(())
                        }
                        other => Err(mismatch::<Self>(other)),
                    }
                }

                fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError> {
                    *self = literal
                        .trim()
                        .parse::<$ty>()
                        .map_err(|e| invalid::<Self>(literal, e))?;
                    Ok(())
                }
            }
        )*
    };
}

impl_integer!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
);

macro_rules! impl_float {
    ($($ty:ident => $st:ident),* $(,)?) => {
        $(
            impl Bind for $ty {
                const SHAPE: &'static Shape = &Shape::scalar(stringify!($ty), ScalarType::$st);

                fn zero() -> Self {
                    0.0
                }

                fn poke(&mut self) -> Poke<'_> {
                    Poke::Scalar(self)
                }
            }

            impl PokeScalar for $ty {
                fn shape(&self) -> &'static Shape {
                    <Self as Bind>::SHAPE
                }

                fn scalar_type(&self) -> ScalarType {
                    ScalarType::$st
                }

                fn is_zero(&self) -> bool {
                    *self == 0.0
                }

                fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError> {
                    // integers widen into floats
                    match value {
                        ScalarValue::Int(n) => *self = n as $ty,
                        ScalarValue::Float(n) => *self = n as $ty,
                        other => return Err(mismatch::<Self>(other)),
                    }
                    Ok(())
                }

                fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError> {
                    *self = literal
                        .trim()
                        .parse::<$ty>()
                        .map_err(|e| invalid::<Self>(literal, e))?;
                    Ok(())
                }
            }
        )*
    };
}

impl_float!(f32 => F32, f64 => F64);

impl Bind for bool {
    const SHAPE: &'static Shape = &Shape::scalar("bool", ScalarType::Bool);

    fn zero() -> Self {
        false
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(self)
    }
}

impl PokeScalar for bool {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn scalar_type(&self) -> ScalarType {
        ScalarType::Bool
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError> {
        match value {
            ScalarValue::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError> {
        *self = literal
            .trim()
            .parse::<bool>()
            .map_err(|e| invalid::<Self>(literal, e))?;
        Ok(())
    }
}

impl Bind for char {
    const SHAPE: &'static Shape = &Shape::scalar("char", ScalarType::Char);

    fn zero() -> Self {
        '\0'
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(self)
    }
}

impl PokeScalar for char {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn scalar_type(&self) -> ScalarType {
        ScalarType::Char
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }

    fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError> {
        match value {
            ScalarValue::Str(s) => self.parse_literal(s),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError> {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(invalid::<Self>(literal, "expected exactly one character")),
        }
    }
}

impl Bind for String {
    const SHAPE: &'static Shape = &Shape::scalar("String", ScalarType::String);

    fn zero() -> Self {
        String::new()
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(self)
    }
}

impl PokeScalar for String {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn scalar_type(&self) -> ScalarType {
        ScalarType::String
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError> {
        match value {
            ScalarValue::Str(s) => {
                self.clear();
                self.push_str(s);
                Ok(())
            }
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError> {
        literal.clone_into(self);
        Ok(())
    }
}

impl Bind for Box<str> {
    const SHAPE: &'static Shape = &Shape::scalar("Box<str>", ScalarType::String);

    fn zero() -> Self {
        Box::from("")
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(self)
    }
}

impl PokeScalar for Box<str> {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn scalar_type(&self) -> ScalarType {
        ScalarType::String
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError> {
        match value {
            ScalarValue::Str(s) => {
                *self = Box::from(s);
                Ok(())
            }
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError> {
        *self = Box::from(literal);
        Ok(())
    }
}

impl Bind for Datetime {
    const SHAPE: &'static Shape = &Shape::scalar("Datetime", ScalarType::Datetime);

    fn zero() -> Self {
        Datetime::default()
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Scalar(self)
    }
}

impl PokeScalar for Datetime {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn scalar_type(&self) -> ScalarType {
        ScalarType::Datetime
    }

    // the zero datetime has month 0, which no document can spell
    fn is_zero(&self) -> bool {
        *self == Datetime::default()
    }

    fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError> {
        match value {
            ScalarValue::Datetime(dt) => {
                *self = dt;
                Ok(())
            }
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError> {
        *self = literal
            .trim()
            .parse::<Datetime>()
            .map_err(|e| invalid::<Self>(literal, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_reject_out_of_range() {
        let mut n: u8 = 0;
        n.set(ScalarValue::Int(255)).unwrap();
        assert_eq!(n, 255);
        let err = n.set(ScalarValue::Int(256)).unwrap_err();
        assert!(matches!(err, ReflectError::OutOfRange { .. }));
        assert_eq!(n, 255);

        let mut n: u32 = 0;
        assert!(n.set(ScalarValue::Int(-1)).is_err());
    }

    #[test]
    fn floats_accept_integers() {
        let mut x: f32 = 0.0;
        x.set(ScalarValue::Int(3)).unwrap();
        assert_eq!(x, 3.0);
        x.set(ScalarValue::Float(0.5)).unwrap();
        assert_eq!(x, 0.5);
        assert!(x.set(ScalarValue::Str("1.0")).is_err());
    }

    #[test]
    fn strings_reject_other_kinds() {
        let mut s = String::from("kept");
        let err = s.set(ScalarValue::Int(1)).unwrap_err();
        assert!(matches!(
            err,
            ReflectError::TypeMismatch { got: "integer", .. }
        ));
        assert_eq!(s, "kept");
    }

    #[test]
    fn literals_parse_with_type_syntax() {
        let mut n: i64 = 0;
        n.parse_literal("456").unwrap();
        assert_eq!(n, 456);
        assert!(n.parse_literal("four").is_err());

        let mut b = false;
        b.parse_literal("true").unwrap();
        assert!(b);

        let mut dt = Datetime::default();
        assert!(dt.is_zero());
        dt.parse_literal("1979-05-27").unwrap();
        assert_eq!(dt, Datetime::local_date(1979, 5, 27));

        dt.parse_literal("0000-01-01").unwrap();
        assert!(!dt.is_zero());
    }

    #[test]
    fn zero_detection() {
        assert!(0u16.is_zero());
        assert!(!1i8.is_zero());
        assert!(String::new().is_zero());
        assert!(!true.is_zero());
        assert!('\0'.is_zero());
    }
}
