// Copyright 2019 The Druid Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// Adapted for use in tether.

//! Struct/variant field parsing shared by the derives.
use proc_macro2::{Ident, Literal, Span, TokenTree};
use syn::{ext::IdentExt, spanned::Spanned, Error, ExprPath, Meta, NestedMeta};

/// The fields for a struct or an enum variant.
#[derive(Debug)]
pub struct Fields<Attrs> {
    pub kind: FieldKind,
    fields: Vec<Field<Attrs>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Named,
    // this also covers Unit; we determine 'unit-ness' based on the number
    // of fields.
    Unnamed,
}

#[derive(Debug)]
pub enum FieldIdent {
    /// As written, raw identifiers (`r#type`) included.
    Named(Ident),
    Unnamed(usize),
}

#[derive(Debug)]
pub struct Field<Attrs> {
    pub ident: FieldIdent,
    pub ty: syn::Type,
    pub attrs: Attrs,
}

/// Per-field attributes of a derive, parsed from `#[<PATH>(...)]`.
pub trait FieldAttrs: Default {
    /// Attribute path, e.g. `data` for `#[data(ignore)]`.
    const PATH: &'static str;

    /// Handles one item of the attribute list.
    fn parse_nested(&mut self, nested: &NestedMeta) -> Result<(), Error>;
}

impl<Attrs: FieldAttrs> Fields<Attrs> {
    pub fn parse_ast(fields: &syn::Fields) -> Result<Self, Error> {
        let kind = match fields {
            syn::Fields::Named(_) => FieldKind::Named,
            syn::Fields::Unnamed(_) | syn::Fields::Unit => FieldKind::Unnamed,
        };

        let fields = fields
            .iter()
            .enumerate()
            .map(|(i, field)| Field::<Attrs>::parse_ast(field, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Fields { kind, fields })
    }
}

impl<Attrs> Fields<Attrs> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field<Attrs>> {
        self.fields.iter()
    }
}

impl<Attrs: FieldAttrs> Field<Attrs> {
    pub fn parse_ast(field: &syn::Field, index: usize) -> Result<Self, Error> {
        let ident = match field.ident.as_ref() {
            Some(ident) => FieldIdent::Named(ident.clone()),
            None => FieldIdent::Unnamed(index),
        };

        let mut attrs = Attrs::default();
        for attr in field.attrs.iter().filter(|attr| attr.path.is_ident(Attrs::PATH)) {
            match attr.parse_meta()? {
                Meta::List(meta) => {
                    for nested in meta.nested.iter() {
                        attrs.parse_nested(nested)?;
                    }
                }
                other => {
                    return Err(Error::new(
                        other.span(),
                        format!("Expected attribute list (the form #[{}(one, two)])", Attrs::PATH),
                    ));
                }
            }
        }

        Ok(Field {
            ident,
            ty: field.ty.clone(),
            attrs,
        })
    }
}

impl<Attrs> Field<Attrs> {
    /// The tokens to access the field on a value (`name` or `0`).
    pub fn ident_tokens(&self) -> TokenTree {
        match self.ident {
            FieldIdent::Named(ref ident) => ident.clone().into(),
            FieldIdent::Unnamed(num) => Literal::usize_unsuffixed(num).into(),
        }
    }

    /// The field name without the `r#` prefix, for messages and derived identifiers.
    pub fn ident_string(&self) -> String {
        match self.ident {
            FieldIdent::Named(ref ident) => ident.unraw().to_string(),
            FieldIdent::Unnamed(num) => num.to_string(),
        }
    }
}

/// Parses a string literal containing a path, as in `same_fn = "path::to::function"`.
pub fn parse_lit_into_expr_path(lit: &syn::Lit) -> Result<ExprPath, Error> {
    let string = if let syn::Lit::Str(lit) = lit {
        lit
    } else {
        return Err(Error::new(lit.span(), "expected str, found... something else"));
    };

    let tokens = syn::parse_str(&string.value())?;
    syn::parse2(tokens)
}

/// Parses a string literal containing an identifier, as in `name = "other"`.
pub fn parse_lit_into_ident(lit: &syn::Lit) -> Result<Ident, Error> {
    if let syn::Lit::Str(lit) = lit {
        syn::parse_str::<Ident>(&lit.value()).map_err(|_| Error::new(lit.span(), "expected an identifier"))
    } else {
        Err(Error::new(lit.span(), "expected str, found... something else"))
    }
}

pub fn ident_from_str(s: &str) -> Ident {
    Ident::new(s, Span::call_site())
}
