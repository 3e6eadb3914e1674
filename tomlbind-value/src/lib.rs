#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod datetime;
pub use datetime::*;

mod document;
pub use document::*;

mod value;
pub use value::*;
