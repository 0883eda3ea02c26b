use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Maps every unit variant to its kebab-case name, e.g.
/// `SpinUpComplete` becomes `"spin-up-complete"`.
#[proc_macro_derive(IntoStaticStr)]
pub fn into_static_str(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let variants = match input.data {
        Data::Enum(ref data) => &data.variants,
        _ => {
            return syn::Error::new_spanned(name, "IntoStaticStr can only be derived for enums")
                .to_compile_error()
                .into()
        }
    };

    if let Some(bad) = variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
        return syn::Error::new_spanned(bad, "IntoStaticStr only supports unit variants")
            .to_compile_error()
            .into();
    }

    let match_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let text = kebab_case(&variant_name.to_string());
        quote! {
            #name::#variant_name => #text
        }
    });

    let lookup_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let text = kebab_case(&variant_name.to_string());
        quote! {
            #text => ::core::option::Option::Some(#name::#variant_name)
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#match_arms),*
                }
            }

            pub fn from_static_str(text: &str) -> ::core::option::Option<Self> {
                match text {
                    #(#lookup_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::core::convert::From<#name> for &'static str {
            fn from(value: #name) -> &'static str {
                value.as_str()
            }
        }
    };

    TokenStream::from(expanded)
}

fn kebab_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
