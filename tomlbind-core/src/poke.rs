//! Mutable views over destinations, one per kind of [`Def`](crate::Def).
//!
//! A [`Poke`] is built on demand for the location being written and dropped as
//! soon as that location is done. It borrows the caller's storage; it never
//! owns it.

use tomlbind_value::{Datetime, Value};

use crate::{Bind, Field, ReflectError, ScalarType, Shape};

/// A mutable view into a destination, tagged by kind.
pub enum Poke<'mem> {
    /// A primitive: number, string, bool, datetime
    Scalar(&'mem mut dyn PokeScalar),
    /// A struct with named fields
    Struct(&'mem mut dyn PokeStruct),
    /// A map keyed by strings (or string-convertible keys)
    Map(&'mem mut dyn PokeMap),
    /// A growable list
    List(&'mem mut dyn PokeList),
    /// A fixed-size array
    Array(&'mem mut dyn PokeArray),
    /// A nullable indirection
    Option(&'mem mut dyn PokeOption),
    /// A dynamically-typed value
    Dynamic(&'mem mut Value),
    /// Something that cannot be bound
    Opaque(&'static Shape),
}

impl Poke<'_> {
    /// Returns the shape of the destination.
    pub fn shape(&self) -> &'static Shape {
        match self {
            Poke::Scalar(p) => p.shape(),
            Poke::Struct(p) => p.shape(),
            Poke::Map(p) => p.shape(),
            Poke::List(p) => p.shape(),
            Poke::Array(p) => p.shape(),
            Poke::Option(p) => p.shape(),
            Poke::Dynamic(_) => <Value as Bind>::SHAPE,
            Poke::Opaque(shape) => *shape,
        }
    }
}

impl core::fmt::Debug for Poke<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let shape = self.shape();
        write!(f, "Poke<{}: {}>", shape, shape.def.kind_name())
    }
}

/// A scalar value offered to a [`PokeScalar`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue<'a> {
    /// A boolean
    Bool(bool),
    /// An integer, wide enough for any supported integer type
    Int(i128),
    /// A float
    Float(f64),
    /// A string
    Str(&'a str),
    /// A datetime
    Datetime(Datetime),
}

impl ScalarValue<'_> {
    /// Lowercase name of the value's kind, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            ScalarValue::Bool(_) => "boolean",
            ScalarValue::Int(_) => "integer",
            ScalarValue::Float(_) => "float",
            ScalarValue::Str(_) => "string",
            ScalarValue::Datetime(_) => "datetime",
        }
    }
}

/// Mutable access to a scalar destination.
pub trait PokeScalar {
    /// Shape of the scalar.
    fn shape(&self) -> &'static Shape;

    /// Which primitive this is.
    fn scalar_type(&self) -> ScalarType;

    /// Whether the current value is the type's zero value.
    fn is_zero(&self) -> bool;

    /// Overwrites the value. Integers must already be in range; floats accept
    /// integers.
    fn set(&mut self, value: ScalarValue<'_>) -> Result<(), ReflectError>;

    /// Overwrites the value by parsing `literal` with the type's own syntax.
    fn parse_literal(&mut self, literal: &str) -> Result<(), ReflectError>;
}

/// Mutable access to a struct's fields.
pub trait PokeStruct {
    /// Shape of the struct.
    fn shape(&self) -> &'static Shape;

    /// The fields exposed for binding, in declaration order.
    fn fields(&self) -> &'static [Field] {
        self.shape().fields()
    }

    /// A view into the field at `index` in [`PokeStruct::fields`].
    fn field(&mut self, index: usize) -> Option<Poke<'_>>;
}

/// Mutable access to a map.
pub trait PokeMap {
    /// Shape of the map.
    fn shape(&self) -> &'static Shape;

    /// Number of entries currently in the map.
    fn len(&self) -> usize;

    /// Whether the map has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts `key` to the map's key type, puts a zero value at that key
    /// (replacing whatever was there) and returns a view into it.
    ///
    /// Other entries are left untouched.
    fn fresh_entry(&mut self, key: &str) -> Result<Poke<'_>, ReflectError>;
}

/// Mutable access to a growable list.
pub trait PokeList {
    /// Shape of the list.
    fn shape(&self) -> &'static Shape;

    /// Number of elements currently in the list.
    fn len(&self) -> usize;

    /// Whether the list has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element.
    fn clear(&mut self);

    /// Appends a zero value and returns a view into it.
    fn push_fresh(&mut self) -> Poke<'_>;
}

/// Mutable access to a fixed-size array.
pub trait PokeArray {
    /// Shape of the array.
    fn shape(&self) -> &'static Shape;

    /// Number of elements, fixed by the type.
    fn len(&self) -> usize;

    /// Whether the array type has zero elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resets the element at `index` to its zero value and returns a view into it.
    fn fresh_element(&mut self, index: usize) -> Option<Poke<'_>>;
}

/// Mutable access to a nullable indirection.
pub trait PokeOption {
    /// Shape of the option.
    fn shape(&self) -> &'static Shape;

    /// Whether a pointee is currently allocated.
    fn is_some(&self) -> bool;

    /// Installs a freshly allocated zero value and returns a view into it.
    fn allocate(&mut self) -> Poke<'_>;
}
