//! `#[test]` wrapper that runs `tomlbind_testhelpers::setup()` first.

use unsynn::*;

unsynn! {
    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        signature: Signature,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

/// Marks a test and sets up logging before its body runs.
///
/// ```ignore
/// #[tomlbind_testhelpers::test]
/// fn decodes_nested_tables() {
///     // decoder logs are captured here
/// }
/// ```
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    let TestFn { signature, body } = match tokens.parse::<TestFn>() {
        Ok(f) => f,
        Err(_) => {
            return quote::quote! {
                ::core::compile_error!("#[tomlbind_testhelpers::test] expects a function");
            }
            .into();
        }
    };

    if !attr.is_empty() {
        return quote::quote! {
            ::core::compile_error!("#[tomlbind_testhelpers::test] takes no arguments");
        }
        .into();
    }

    let body = body.0.stream();
    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #signature {
            ::tomlbind_testhelpers::setup();

            #body
        }
    }
    .into()
}
