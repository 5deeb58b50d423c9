#![warn(missing_docs)]

//! This crate contains the derive macro which lets field-less enums be used as command
//! parameter types in `quartz_interceptor`.

extern crate proc_macro;

use proc_macro2::Literal;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields};

/// Derives `FromArgument` for an enum whose variants are all field-less. Each variant is matched
/// by its kebab-case name, so `DiamondSword` accepts the argument `diamond-sword`.
#[proc_macro_derive(FromArgument)]
pub fn derive_from_argument(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let data_enum = match input.data {
        Data::Enum(data_enum) => data_enum,
        _ =>
            return Error::new_spanned(
                input,
                "FromArgument can only be derived on enums whose variants are field-less.",
            )
            .to_compile_error()
            .into(),
    };

    let mut match_arms = Vec::with_capacity(data_enum.variants.len());
    for variant in &data_enum.variants {
        if !matches!(&variant.fields, Fields::Unit) {
            return Error::new_spanned(variant, "Variants cannot have fields.")
                .to_compile_error()
                .into();
        }

        let arg_repr = Literal::string(&pascal_to_kebab(&variant.ident.to_string()));
        let variant_name = &variant.ident;
        match_arms.push(quote! {
            #arg_repr => ::core::result::Result::Ok(Self::#variant_name)
        });
    }

    let ident = &input.ident;
    let ident_str = Literal::string(&pascal_to_kebab(&ident.to_string()));

    (quote! {
        impl ::quartz_interceptor::FromArgument for #ident {
            fn from_arg(arg: &str) -> ::core::result::Result<Self, ::std::string::String> {
                match arg {
                    #( #match_arms, )*
                    _ => ::core::result::Result::Err(::std::format!(
                        "\"{}\" is not a valid {}",
                        arg,
                        #ident_str
                    )),
                }
            }
        }
    })
    .into()
}

fn pascal_to_kebab(pascal: &str) -> String {
    let mut result = String::with_capacity(pascal.len() + 4);
    for ch in pascal.chars() {
        if ch.is_uppercase() && !result.is_empty() {
            result.push('-');
        }

        result.extend(ch.to_lowercase());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::pascal_to_kebab;

    #[test]
    fn kebab_case_splits_on_capitals() {
        assert_eq!(pascal_to_kebab("DiamondSword"), "diamond-sword");
        assert_eq!(pascal_to_kebab("Stone"), "stone");
        assert_eq!(pascal_to_kebab(""), "");
    }
}
