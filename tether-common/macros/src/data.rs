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

//! `#[derive(Data)]`
use crate::{
    fields::{ident_from_str, parse_lit_into_expr_path, Field, FieldAttrs, FieldKind, Fields},
    CRATE,
};
use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Data, DataEnum, DataStruct, Error, ExprPath, Meta, NestedMeta};

const IGNORE_ATTR_PATH: &str = "ignore";
const DATA_SAME_FN_ATTR_PATH: &str = "same_fn";

#[derive(Debug, Default)]
pub struct DataAttrs {
    /// `true` if this field should be ignored.
    pub ignore: bool,
    pub same_fn: Option<ExprPath>,
}

impl FieldAttrs for DataAttrs {
    const PATH: &'static str = "data";

    fn parse_nested(&mut self, nested: &NestedMeta) -> Result<(), Error> {
        match nested {
            NestedMeta::Meta(Meta::Path(path)) if path.is_ident(IGNORE_ATTR_PATH) => {
                if self.ignore {
                    return Err(Error::new(nested.span(), "Duplicate attribute"));
                }
                self.ignore = true;
            }
            NestedMeta::Meta(Meta::NameValue(meta)) if meta.path.is_ident(DATA_SAME_FN_ATTR_PATH) => {
                if self.same_fn.is_some() {
                    return Err(Error::new(meta.span(), "Duplicate attribute"));
                }
                self.same_fn = Some(parse_lit_into_expr_path(&meta.lit)?);
            }
            other => return Err(Error::new(other.span(), "Unknown attribute")),
        }
        Ok(())
    }
}

/// The tokens to be used as the function for 'same'.
fn same_fn_path_tokens(field: &Field<DataAttrs>) -> TokenStream {
    match field.attrs.same_fn {
        Some(ref f) => quote!(#f),
        None => {
            let span = Span::call_site();
            quote_spanned!(span=> ::#CRATE::Data::same)
        }
    }
}

pub(crate) fn derive_data_impl(input: syn::DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    match &input.data {
        Data::Struct(s) => derive_struct(&input, s),
        Data::Enum(e) => derive_enum(&input, e),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            "Data implementations cannot be derived from unions",
        )),
    }
}

fn derive_struct(input: &syn::DeriveInput, s: &DataStruct) -> Result<proc_macro2::TokenStream, syn::Error> {
    let ident = &input.ident;
    let impl_generics = generics_bounds(&input.generics);
    let (_, ty_generics, where_clause) = &input.generics.split_for_impl();

    let fields = Fields::<DataAttrs>::parse_ast(&s.fields)?;

    let compared: Vec<_> = fields.iter().filter(|f| !f.attrs.ignore).collect();
    let diff = if !compared.is_empty() {
        let same_fns = compared.iter().map(|f| same_fn_path_tokens(f));
        let fields = compared.iter().map(|f| f.ident_tokens());
        quote!( #( #same_fns(&self.#fields, &other.#fields) )&&* )
    } else {
        quote!(true)
    };

    let res = quote! {
        impl<#impl_generics> ::#CRATE::Data for #ident #ty_generics #where_clause {
            fn same(&self, other: &Self) -> bool {
                #diff
            }
        }
    };

    Ok(res)
}

fn is_c_style_enum(s: &DataEnum) -> bool {
    s.variants.iter().all(|variant| match &variant.fields {
        syn::Fields::Named(fs) => fs.named.is_empty(),
        syn::Fields::Unnamed(fs) => fs.unnamed.is_empty(),
        syn::Fields::Unit => true,
    })
}

fn derive_enum(input: &syn::DeriveInput, s: &DataEnum) -> Result<proc_macro2::TokenStream, syn::Error> {
    let ident = &input.ident;
    let impl_generics = generics_bounds(&input.generics);
    let (_, ty_generics, where_clause) = &input.generics.split_for_impl();

    if is_c_style_enum(s) {
        let res = quote! {
            impl<#impl_generics> ::#CRATE::Data for #ident #ty_generics #where_clause {
                fn same(&self, other: &Self) -> bool {
                    ::std::mem::discriminant(self) == ::std::mem::discriminant(other)
                }
            }
        };
        return Ok(res);
    }

    let cases: Vec<proc_macro2::TokenStream> = s
        .variants
        .iter()
        .map(|variant| {
            let fields = Fields::<DataAttrs>::parse_ast(&variant.fields)?;
            let variant = &variant.ident;

            // the various inner `same()` calls, to the right of the match arm.
            let tests: Vec<_> = fields
                .iter()
                .filter(|field| !field.attrs.ignore)
                .map(|field| {
                    let same_fn = same_fn_path_tokens(field);
                    let var_left = ident_from_str(&format!("__self_{}", field.ident_string()));
                    let var_right = ident_from_str(&format!("__other_{}", field.ident_string()));
                    quote!( #same_fn(#var_left, #var_right) )
                })
                .collect();
            let tests = if tests.is_empty() {
                quote!(true)
            } else {
                quote!( #( #tests )&&* )
            };

            if let FieldKind::Named = fields.kind {
                let lefts: Vec<_> = fields
                    .iter()
                    .map(|field| {
                        let ident = field.ident_tokens();
                        let var = ident_from_str(&format!("__self_{}", field.ident_string()));
                        quote!( #ident: #var )
                    })
                    .collect();
                let rights: Vec<_> = fields
                    .iter()
                    .map(|field| {
                        let ident = field.ident_tokens();
                        let var = ident_from_str(&format!("__other_{}", field.ident_string()));
                        quote!( #ident: #var )
                    })
                    .collect();

                Ok(quote! {
                    (#ident :: #variant { #( #lefts ),* }, #ident :: #variant { #( #rights ),* }) => {
                        #tests
                    }
                })
            } else {
                let vars_left: Vec<_> = fields
                    .iter()
                    .map(|field| ident_from_str(&format!("__self_{}", field.ident_string())))
                    .collect();
                let vars_right: Vec<_> = fields
                    .iter()
                    .map(|field| ident_from_str(&format!("__other_{}", field.ident_string())))
                    .collect();

                if fields.len() > 0 {
                    Ok(quote! {
                        ( #ident :: #variant( #(#vars_left),* ),  #ident :: #variant( #(#vars_right),* )) => {
                            #tests
                        }
                    })
                } else {
                    Ok(quote! {
                        ( #ident :: #variant ,  #ident :: #variant ) => { true }
                    })
                }
            }
        })
        .collect::<Result<Vec<proc_macro2::TokenStream>, syn::Error>>()?;

    let res = quote! {
        impl<#impl_generics> ::#CRATE::Data for #ident #ty_generics #where_clause {
            fn same(&self, other: &Self) -> bool {
                match (self, other) {
                    #( #cases ),*
                    _ => false,
                }
            }
        }
    };

    Ok(res)
}

fn generics_bounds(generics: &syn::Generics) -> proc_macro2::TokenStream {
    let res = generics.params.iter().map(|gp| {
        use syn::GenericParam::*;
        match gp {
            Type(ty) => {
                let ident = &ty.ident;
                let bounds = &ty.bounds;
                if bounds.is_empty() {
                    quote_spanned!(ty.span()=> #ident : ::#CRATE::Data)
                } else {
                    quote_spanned!(ty.span()=> #ident : #bounds + ::#CRATE::Data)
                }
            }
            Lifetime(lf) => quote!(#lf),
            Const(cst) => quote!(#cst),
        }
    });

    quote!( #( #res, )* )
}
