use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Generics, Ident, Result};

use super::field::ParsedField;

pub(crate) struct ParsedRecord {
    name: Ident,
    generics: Generics,
    fields: Vec<ParsedField>,
}

impl ParsedRecord {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        if let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("sieve")) {
            return Err(Error::new_spanned(attr, "#[sieve(...)] is only supported on fields"));
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let mut parsed = Vec::new();
                    for field in &named.named {
                        if let Some(field) = ParsedField::from_field(field)? {
                            parsed.push(field);
                        }
                    }
                    parsed
                }
                _ => return Err(Error::new(input.ident.span(), "Searchable requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "Searchable can only be derived for structs")),
        };

        Ok(Self {
            name: input.ident.clone(),
            generics: input.generics.clone(),
            fields,
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let consts = self.fields.iter().map(ParsedField::const_tokens);
        let arms = self.fields.iter().map(ParsedField::member_arm);

        // field types of a generic record only satisfy the runtime traits under bounds
        let record_where = if self.generics.params.is_empty() {
            quote! { #where_clause }
        } else {
            let bounds = self.fields.iter().map(ParsedField::bound);
            let existing = where_clause.into_iter().flat_map(|clause| clause.predicates.iter());
            quote! { where #(#existing,)* #(#bounds,)* }
        };

        quote! {
            impl #impl_generics #name #ty_generics #where_clause {
                #(#consts)*
            }

            impl #impl_generics ::sieve::Record for #name #ty_generics #record_where {
                fn member(&self, name: &str) -> ::core::option::Option<::sieve::Member<'_>> {
                    match name {
                        #(#arms)*
                        _ => ::core::option::Option::None,
                    }
                }
            }

            impl #impl_generics ::sieve::Searchable for #name #ty_generics #record_where {}
        }
    }
}
