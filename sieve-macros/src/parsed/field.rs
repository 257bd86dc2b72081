use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Error, Field, Ident, LitStr, Result, Type, spanned::Spanned};

use super::types::{to_screaming_snake_case, unwrap_option, unwrap_vec};

/// How a field is exposed to the evaluator.
pub(crate) enum FieldShape {
    /// A scalar resolved through `FieldValue::to_value`.
    Value,
    /// A navigable record, optionally behind `Option`.
    Nested { target: Type, optional: bool },
    /// A `Vec` of records matched with `Any`.
    Collection,
}

pub(crate) struct ParsedField {
    ident: Ident,
    path: String,
    ty: Type,
    shape: FieldShape,
}

impl ParsedField {
    /// Returns `None` for `#[sieve(skip)]` fields.
    pub(crate) fn from_field(field: &Field) -> Result<Option<Self>> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "Searchable requires named fields"))?;
        let raw_name = ident.to_string();
        let mut path = raw_name.strip_prefix("r#").unwrap_or(&raw_name).to_string();

        let mut skip = false;
        let mut nested = false;
        let mut collection = false;

        for attr in &field.attrs {
            if attr.path().is_ident("sieve") {
                Self::parse_field_attr(attr, &mut path, &mut skip, &mut nested, &mut collection)?;
            }
        }

        if skip {
            return Ok(None);
        }

        let shape = match (nested, collection) {
            (true, true) => {
                return Err(Error::new(
                    ident.span(),
                    "#[sieve(nested)] and #[sieve(collection)] are mutually exclusive",
                ));
            }
            (true, false) => match unwrap_option(&field.ty) {
                Some(inner) => FieldShape::Nested {
                    target: inner.clone(),
                    optional: true,
                },
                None => FieldShape::Nested {
                    target: field.ty.clone(),
                    optional: false,
                },
            },
            (false, true) => {
                if unwrap_vec(&field.ty).is_none() {
                    return Err(Error::new(field.ty.span(), "#[sieve(collection)] requires a Vec<T> field"));
                }
                FieldShape::Collection
            }
            (false, false) => FieldShape::Value,
        };

        Ok(Some(Self {
            ident,
            path,
            ty: field.ty.clone(),
            shape,
        }))
    }

    fn parse_field_attr(
        attr: &Attribute,
        path: &mut String,
        skip: &mut bool,
        nested: &mut bool,
        collection: &mut bool,
    ) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                *skip = true;
            } else if meta.path.is_ident("nested") {
                *nested = true;
            } else if meta.path.is_ident("collection") {
                *collection = true;
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                let value = lit.value();
                if value.is_empty() {
                    return Err(meta.error("rename must not be empty"));
                }
                *path = value;
            } else {
                return Err(meta.error("unknown sieve attribute; expected skip, nested, collection or rename"));
            }
            Ok(())
        })
    }

    /// Type parameter of the emitted `Field<Self, _>` const.
    fn accessor_type(&self) -> &Type {
        match &self.shape {
            FieldShape::Nested { target, .. } => target,
            FieldShape::Value | FieldShape::Collection => &self.ty,
        }
    }

    pub(crate) fn const_tokens(&self) -> TokenStream2 {
        let const_ident = format_ident!("{}", to_screaming_snake_case(&self.ident.to_string()));
        let accessor = self.accessor_type();
        let path = &self.path;
        let doc = format!("Accessor for `{path}`.");
        quote! {
            #[doc = #doc]
            pub const #const_ident: ::sieve::Field<Self, #accessor> = ::sieve::Field::new(#path);
        }
    }

    pub(crate) fn member_arm(&self) -> TokenStream2 {
        let ident = &self.ident;
        let path = &self.path;
        let member = match &self.shape {
            FieldShape::Value => quote! {
                ::sieve::Member::Value(::sieve::FieldValue::to_value(&self.#ident))
            },
            FieldShape::Nested { optional: false, .. } => quote! {
                ::sieve::Member::Record(&self.#ident)
            },
            FieldShape::Nested { optional: true, .. } => quote! {
                match &self.#ident {
                    ::core::option::Option::Some(inner) => ::sieve::Member::Record(inner),
                    ::core::option::Option::None => ::sieve::Member::Value(::sieve::Value::Null),
                }
            },
            FieldShape::Collection => quote! {
                ::sieve::Member::Records(
                    self.#ident
                        .iter()
                        .map(|item| item as &dyn ::sieve::Record)
                        .collect(),
                )
            },
        };
        quote! {
            #path => ::core::option::Option::Some(#member),
        }
    }

    /// Where-clause bound needed when the record is generic.
    pub(crate) fn bound(&self) -> TokenStream2 {
        match &self.shape {
            FieldShape::Value => {
                let ty = &self.ty;
                quote! { #ty: ::sieve::FieldValue }
            }
            FieldShape::Nested { target, .. } => quote! { #target: ::sieve::Record },
            FieldShape::Collection => {
                let element = unwrap_vec(&self.ty).unwrap_or(&self.ty);
                quote! { #element: ::sieve::Record }
            }
        }
    }
}
