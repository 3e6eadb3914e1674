#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

pub use tomlbind_core::*;

/// Derives [`Bind`] for a struct.
///
/// Field attributes: `#[bind(rename = "...")]`, `#[bind(default = ...)]`,
/// `#[bind(skip)]`, `#[bind(opaque)]`. Container attributes:
/// `#[bind(rename_all = "...")]`, `#[bind(key)]` (newtypes only),
/// `#[bind(crate = path)]`.
pub use tomlbind_macros::Bind;

mod decode;
mod defaults;
mod error;
mod options;
mod scalar;
mod toml;

pub use decode::Decoder;
pub use error::*;
pub use options::*;
pub use toml::parse_document;

/// Decodes `doc` into a fresh `T` with default options.
pub fn decode<T: Bind>(doc: &Document) -> Result<T, DecodeError> {
    Decoder::default().decode(doc)
}

/// Decodes `doc` over an existing value with default options.
///
/// Fields the document does not mention keep their current values, and map
/// entries it does not mention are kept.
pub fn decode_into<T: Bind>(doc: &Document, target: &mut T) -> Result<(), DecodeError> {
    Decoder::default().decode_into(doc, target)
}

/// Parses TOML text and decodes it into a fresh `T` with default options.
pub fn from_str<T: Bind>(input: &str) -> Result<T, DecodeError> {
    Decoder::default().from_str(input)
}

/// Parses TOML text and decodes it over an existing value with default options.
pub fn from_str_into<T: Bind>(input: &str, target: &mut T) -> Result<(), DecodeError> {
    Decoder::default().from_str_into(input, target)
}
