use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, FieldsNamed};

/// Generates `set_<field>` for every field tagged `#[dirty_setter]`.
///
/// A setter only stores the value and calls `self.set_dirty()` when the new
/// value differs from the current one, so the field type must be `PartialEq`
/// and the struct must provide `set_dirty`.
#[proc_macro_derive(Dirty, attributes(dirty_setter))]
pub fn dirty_macro_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impl_dirty_macro(&ast)
}

fn impl_dirty_macro(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(FieldsNamed { named, .. }) => named,
            _ => {
                return syn::Error::new_spanned(name, "Dirty needs a struct with named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Dirty can only be derived for structs")
                .to_compile_error()
                .into()
        }
    };

    let setters = fields
        .iter()
        .filter(|field| {
            field
                .attrs
                .iter()
                .any(|attr| attr.path().is_ident("dirty_setter"))
        })
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)))
        .map(|(field_name, field_type)| {
            let setter_name = format_ident!("set_{}", field_name);
            let getter_name = format_ident!("{}", field_name);

            quote! {
                pub fn #setter_name(&mut self, value: #field_type) {
                    if self.#field_name != value {
                        self.#field_name = value;
                        self.set_dirty();
                    }
                }

                pub fn #getter_name(&self) -> &#field_type {
                    &self.#field_name
                }
            }
        });

    let gen = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#setters)*
        }
    };

    gen.into()
}
