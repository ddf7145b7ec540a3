//! Implementation of the `#[derive(Inspect)]` macro.
//!
//! Generates `glimpse::Inspect` (record probe and type label) and
//! `glimpse::HasLabeledFields` (the field list) for a struct.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, spanned::Spanned, Data, DeriveInput, Error, GenericParam, Generics, Index,
    Member, Result,
};

use super::attrs::{parse_container_attrs, parse_field_attrs};

/// Main implementation of the Inspect derive macro.
pub fn inspect_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new(
                input.span(),
                "Inspect can only be derived for structs",
            ))
        }
    };

    let container = parse_container_attrs(&input.attrs)?;
    let label = container.name.unwrap_or_else(|| struct_name.to_string());

    let mut entries: Vec<TokenStream> = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        let display = attrs.rename.unwrap_or_else(|| match &member {
            Member::Named(ident) => ident.to_string(),
            Member::Unnamed(index) => index.index.to_string(),
        });

        entries.push(quote! {
            ::glimpse::Field::new(#display, &self.#member)
        });
    }

    let generics = add_inspect_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::glimpse::Inspect for #struct_name #ty_generics #where_clause {
            fn as_record(&self) -> ::core::option::Option<&dyn ::glimpse::HasLabeledFields> {
                ::core::option::Option::Some(self)
            }

            fn type_name(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(#label)
            }
        }

        impl #impl_generics ::glimpse::HasLabeledFields for #struct_name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::glimpse::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    };

    Ok(expanded)
}

/// Adds `T: glimpse::Inspect` for every type parameter.
fn add_inspect_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::glimpse::Inspect));
        }
    }
    generics
}
