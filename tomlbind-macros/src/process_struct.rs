use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};

use crate::parse::{GenericParam, PBody, PField, PStruct};

/// Generates the `Bind` impl (and `PokeStruct` / `BindKey` where they apply).
pub(crate) fn process_struct(parsed: PStruct) -> TokenStream {
    let krate = parsed
        .attrs
        .crate_path
        .clone()
        .unwrap_or_else(|| quote! { ::tomlbind });

    let name = &parsed.name;
    let type_name = name.to_string();
    let impl_generics = impl_generics(&parsed.generics, &krate);
    let type_args = type_args(&parsed.generics);
    let where_clause = parsed.where_clause.as_ref().map(|w| quote! { where #w });

    match &parsed.body {
        PBody::Tuple(fields) => {
            let Some(inner) = fields.first() else {
                return compile_error(
                    "tuple structs must have exactly one field to derive Bind",
                    name.span(),
                );
            };
            let inner_ty = &inner.ty;
            let key_impl = parsed.attrs.key.map(|_| {
                let preds = parsed.where_clause.as_ref().map(|w| quote! { #w, });
                quote! {
                    #[automatically_derived]
                    impl #impl_generics #krate::BindKey for #name #type_args
                    where
                        #preds
                        #inner_ty: #krate::BindKey,
                    {
                        const KEY_TYPE: &'static str = #type_name;

                        fn from_key(key: &str) -> ::core::result::Result<Self, ::std::string::String> {
                            <#inner_ty as #krate::BindKey>::from_key(key).map(#name)
                        }
                    }
                }
            });

            quote! {
                #[automatically_derived]
                impl #impl_generics #krate::Bind for #name #type_args #where_clause {
                    const SHAPE: &'static #krate::Shape = <#inner_ty as #krate::Bind>::SHAPE;

                    fn zero() -> Self {
                        #name(<#inner_ty as #krate::Bind>::zero())
                    }

                    fn poke(&mut self) -> #krate::Poke<'_> {
                        #krate::Bind::poke(&mut self.0)
                    }
                }

                #key_impl
            }
        }
        PBody::Named(fields) => {
            let bound: Vec<&PField> = fields.iter().filter(|f| !f.attrs.skip).collect();

            let field_descs = bound.iter().map(|f| field_desc(f, &krate));
            let zero_inits = fields.iter().map(|f| {
                let ident = &f.ident;
                let ty = &f.ty;
                if f.attrs.skip || f.attrs.opaque {
                    quote_spanned! { f.span => #ident: ::core::default::Default::default() }
                } else {
                    quote! { #ident: <#ty as #krate::Bind>::zero() }
                }
            });
            let poke_arms = bound.iter().enumerate().map(|(index, f)| {
                let ident = &f.ident;
                if f.attrs.opaque {
                    quote! {
                        #index => ::core::option::Option::Some(
                            #krate::Poke::Opaque(<Self as #krate::Bind>::SHAPE.fields()[#index].shape)
                        ),
                    }
                } else {
                    quote! {
                        #index => ::core::option::Option::Some(#krate::Bind::poke(&mut self.#ident)),
                    }
                }
            });

            let field_list = if bound.is_empty() {
                quote! { &[] }
            } else {
                quote! { &const { [#(#field_descs),*] } }
            };

            struct_impls(
                &parsed,
                &krate,
                field_list,
                quote! { Self { #(#zero_inits),* } },
                quote! {
                    match index {
                        #(#poke_arms)*
                        _ => ::core::option::Option::None,
                    }
                },
            )
        }
        PBody::Unit => struct_impls(
            &parsed,
            &krate,
            quote! { &[] },
            quote! { Self },
            quote! {
                let _ = index;
                ::core::option::Option::None
            },
        ),
    }
}

fn struct_impls(
    parsed: &PStruct,
    krate: &TokenStream,
    fields: TokenStream,
    zero: TokenStream,
    field_body: TokenStream,
) -> TokenStream {
    let name = &parsed.name;
    let type_name = name.to_string();
    let impl_generics = impl_generics(&parsed.generics, krate);
    let type_args = type_args(&parsed.generics);
    let where_clause = parsed.where_clause.as_ref().map(|w| quote! { where #w });

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Bind for #name #type_args #where_clause {
            const SHAPE: &'static #krate::Shape = &const {
                #krate::Shape::new(
                    #type_name,
                    #krate::Def::Struct(#krate::StructDef { fields: #fields }),
                )
            };

            fn zero() -> Self {
                #zero
            }

            fn poke(&mut self) -> #krate::Poke<'_> {
                #krate::Poke::Struct(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics #krate::PokeStruct for #name #type_args #where_clause {
            fn shape(&self) -> &'static #krate::Shape {
                <Self as #krate::Bind>::SHAPE
            }

            fn field(&mut self, index: usize) -> ::core::option::Option<#krate::Poke<'_>> {
                #field_body
            }
        }
    }
}

fn field_desc(f: &PField, krate: &TokenStream) -> TokenStream {
    let rust_name = f
        .ident
        .as_ref()
        .map(|i| i.to_string())
        .unwrap_or_default();
    let rust_name = rust_name.strip_prefix("r#").unwrap_or(&rust_name).to_string();
    let name = f.attrs.rename.clone().unwrap_or_else(|| rust_name.clone());
    let default = match &f.attrs.default {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    };
    let ty = &f.ty;
    let shape = if f.attrs.opaque {
        let ty_name = ty.to_string().replace(' ', "");
        quote! { &const { #krate::Shape::opaque(#ty_name) } }
    } else {
        quote_spanned! { f.span => <#ty as #krate::Bind>::SHAPE }
    };

    quote! {
        #krate::Field {
            name: #name,
            rust_name: #rust_name,
            default: #default,
            shape: #shape,
        }
    }
}

fn impl_generics(params: &[GenericParam], krate: &TokenStream) -> TokenStream {
    if params.is_empty() {
        return TokenStream::new();
    }
    let params = params.iter().map(|p| match p {
        GenericParam::Type { name, bounds } if bounds.is_empty() => quote! { #name: #krate::Bind },
        GenericParam::Type { name, bounds } => quote! { #name: #krate::Bind + #bounds },
        GenericParam::Const { decl, .. } => decl.clone(),
    });
    quote! { <#(#params),*> }
}

fn type_args(params: &[GenericParam]) -> TokenStream {
    if params.is_empty() {
        return TokenStream::new();
    }
    let args = params.iter().map(|p| match p {
        GenericParam::Type { name, .. } | GenericParam::Const { name, .. } => name,
    });
    quote! { <#(#args),*> }
}

/// Renders an error as `compile_error!` at its span.
pub(crate) fn compile_error(message: &str, span: Span) -> TokenStream {
    quote_spanned! { span => ::core::compile_error!(#message); }
}
