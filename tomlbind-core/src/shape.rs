use core::fmt;

/// Static description of a bindable type: its name and what kind of
/// destination it is.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// The type's name, without generic parameters, e.g. `u32`, `Vec`, `Config`
    pub type_identifier: &'static str,

    /// What the type is: a scalar, a struct, a map...
    pub def: Def,
}

impl Shape {
    /// Creates a shape from its parts.
    pub const fn new(type_identifier: &'static str, def: Def) -> Self {
        Self {
            type_identifier,
            def,
        }
    }

    /// Creates the shape of a scalar.
    pub const fn scalar(type_identifier: &'static str, ty: ScalarType) -> Self {
        Self::new(type_identifier, Def::Scalar(ty))
    }

    /// Creates the shape of something with no binding strategy.
    pub const fn opaque(type_identifier: &'static str) -> Self {
        Self::new(type_identifier, Def::Opaque)
    }

    /// Returns the fields if this shape is a struct.
    pub const fn fields(&self) -> &'static [Field] {
        match self.def {
            Def::Struct(sd) => sd.fields,
            _ => &[],
        }
    }

    /// Returns the scalar type if this shape is a scalar.
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        match self.def {
            Def::Scalar(ty) => Some(ty),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_identifier)
    }
}

/// The semantic definition of a shape: is it more like a scalar, a map, a list?
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub enum Def {
    /// Scalar, e.g. `u32`, `String`, `bool`, `Datetime`
    Scalar(ScalarType),

    /// Struct with named fields, e.g. `struct Config { .. }`
    Struct(StructDef),

    /// Map from string-convertible keys to homogeneous values,
    /// e.g. `HashMap<String, T>`
    Map,

    /// Ordered list of homogeneous values, variable size, e.g. `Vec<T>`
    List,

    /// Fixed-size array of homogeneous values, e.g. `[T; 3]`
    Array {
        /// Number of elements
        n: usize,
    },

    /// Nullable indirection, allocated on demand, e.g. `Option<T>`
    Option,

    /// Value that takes its shape from the data, e.g. `tomlbind::Value`
    Dynamic,

    /// No binding strategy exists for this type
    Opaque,
}

impl Def {
    /// Short lowercase name of this kind of definition.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Def::Scalar(_) => "scalar",
            Def::Struct(_) => "struct",
            Def::Map => "map",
            Def::List => "list",
            Def::Array { .. } => "array",
            Def::Option => "option",
            Def::Dynamic => "dynamic value",
            Def::Opaque => "opaque",
        }
    }
}

/// Fields of a struct, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct StructDef {
    /// The fields exposed for binding (skipped fields are absent)
    pub fields: &'static [Field],
}

/// Describes a field in a struct
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// Serialized name, after `rename` / `rename_all`
    pub name: &'static str,

    /// The identifier as written in the source
    pub rust_name: &'static str,

    /// Declared default literal, from `#[bind(default = ...)]`
    pub default: Option<&'static str>,

    /// Shape of the field's type
    pub shape: &'static Shape,
}

/// The primitive types a [`Def::Scalar`] can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `String`, `Box<str>`
    String,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `tomlbind::Datetime`
    Datetime,
}

impl ScalarType {
    /// Returns true for the integer family.
    pub const fn is_integer(self) -> bool {
        self.integer_bits().is_some()
    }

    /// Returns true for the float family.
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }

    /// Width in bits and signedness, for integer types.
    pub const fn integer_bits(self) -> Option<(u32, bool)> {
        match self {
            ScalarType::I8 => Some((8, true)),
            ScalarType::I16 => Some((16, true)),
            ScalarType::I32 => Some((32, true)),
            ScalarType::I64 => Some((64, true)),
            ScalarType::Isize => Some((isize::BITS, true)),
            ScalarType::U8 => Some((8, false)),
            ScalarType::U16 => Some((16, false)),
            ScalarType::U32 => Some((32, false)),
            ScalarType::U64 => Some((64, false)),
            ScalarType::Usize => Some((usize::BITS, false)),
            _ => None,
        }
    }

    /// Inclusive `(min, max)` range for integer types.
    pub const fn integer_bounds(self) -> Option<(i128, i128)> {
        match self.integer_bits() {
            Some((bits, true)) => {
                let max = (1i128 << (bits - 1)) - 1;
                Some((-max - 1, max))
            }
            Some((bits, false)) => Some((0, (1i128 << bits) - 1)),
            None => None,
        }
    }
}
