#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod shape;
pub use shape::*;

mod poke;
pub use poke::*;

mod key;
pub use key::*;

mod error;
pub use error::*;

mod impls;

pub use tomlbind_value::{Datetime, DatetimeKind, Document, Kind, Table, Value, ValueType};

/// A type that can be the destination of a decode.
///
/// Implementations describe themselves statically through [`Bind::SHAPE`] and
/// hand out a [`Poke`] over their storage on demand. Usually derived with
/// `#[derive(Bind)]`.
pub trait Bind: 'static {
    /// The shape of this type.
    const SHAPE: &'static Shape;

    /// The type's zero value: what a freshly allocated location holds before
    /// defaults or data are written into it.
    fn zero() -> Self
    where
        Self: Sized;

    /// A mutable view over this value's storage.
    fn poke(&mut self) -> Poke<'_>;
}

/// Returns `T`'s shape.
pub const fn shape_of<T: Bind>() -> &'static Shape {
    T::SHAPE
}
