#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod parse;
mod process_struct;
mod rename;

/// Derives `tomlbind::Bind` for a struct.
///
/// See the crate documentation for the accepted `#[bind(...)]` attributes.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn bind_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    match parse::parse_struct(input) {
        Ok(parsed) => process_struct::process_struct(parsed),
        Err(err) => process_struct::compile_error(&err.message, err.span),
    }
    .into()
}
