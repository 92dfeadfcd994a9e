//! `#[derive(Focus)]`
use crate::{
    fields::{ident_from_str, parse_lit_into_ident, Field, FieldAttrs, FieldIdent, Fields},
    CRATE,
};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, Data, DataStruct, Error, Meta, NestedMeta};

const IGNORE_ATTR_PATH: &str = "ignore";
const NAME_ATTR_PATH: &str = "name";

#[derive(Debug, Default)]
pub struct FocusAttrs {
    /// `true` if no focus should be generated for this field.
    pub ignore: bool,
    /// Overrides the name of the associated constant.
    pub name: Option<Ident>,
}

impl FieldAttrs for FocusAttrs {
    const PATH: &'static str = "focus";

    fn parse_nested(&mut self, nested: &NestedMeta) -> Result<(), Error> {
        match nested {
            NestedMeta::Meta(Meta::Path(path)) if path.is_ident(IGNORE_ATTR_PATH) => {
                if self.ignore {
                    return Err(Error::new(nested.span(), "Duplicate attribute"));
                }
                self.ignore = true;
            }
            NestedMeta::Meta(Meta::NameValue(meta)) if meta.path.is_ident(NAME_ATTR_PATH) => {
                if self.name.is_some() {
                    return Err(Error::new(meta.span(), "Duplicate attribute"));
                }
                self.name = Some(parse_lit_into_ident(&meta.lit)?);
            }
            other => return Err(Error::new(other.span(), "Unknown attribute")),
        }
        Ok(())
    }
}

/// Name of the zero-sized type implementing the focus on a field: the field name (raw if the field
/// is), or `_N` for tuple struct fields.
fn focus_type_ident(field: &Field<FocusAttrs>) -> Ident {
    match field.ident {
        FieldIdent::Named(ref ident) => ident.clone(),
        FieldIdent::Unnamed(num) => ident_from_str(&format!("_{num}")),
    }
}

pub(crate) fn derive_focus_impl(input: syn::DeriveInput) -> Result<TokenStream, Error> {
    match &input.data {
        Data::Struct(s) => derive_struct(&input, s),
        Data::Enum(e) => Err(Error::new(
            e.enum_token.span(),
            "Focus implementations cannot be derived from enums",
        )),
        Data::Union(u) => Err(Error::new(
            u.union_token.span(),
            "Focus implementations cannot be derived from unions",
        )),
    }
}

fn derive_struct(input: &syn::DeriveInput, s: &DataStruct) -> Result<TokenStream, Error> {
    let ident = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = Fields::<FocusAttrs>::parse_ast(&s.fields)?;
    let focused: Vec<_> = fields.iter().filter(|f| !f.attrs.ignore).collect();
    let module = ident_from_str(&format!("{}_fields", ident.unraw()));

    let type_idents: Vec<_> = focused.iter().map(|f| focus_type_ident(f)).collect();

    let focus_impls = focused.iter().zip(type_idents.iter()).map(|(field, ty_ident)| {
        let field_ty = &field.ty;
        let access = field.ident_tokens();
        let focus_trait = quote!(::#CRATE::Focus<#ident #ty_generics, #field_ty>);
        quote! {
            impl #impl_generics #focus_trait for #module::#ty_ident #where_clause {
                fn with<__R, __F>(&self, data: &#ident #ty_generics, f: __F) -> __R
                where
                    __F: ::std::ops::FnOnce(&#field_ty) -> __R,
                {
                    f(&data.#access)
                }

                fn with_mut<__R, __F>(&self, data: &mut #ident #ty_generics, f: __F) -> __R
                where
                    __F: ::std::ops::FnOnce(&mut #field_ty) -> __R,
                {
                    f(&mut data.#access)
                }
            }
        }
    });

    let consts = focused.iter().zip(type_idents.iter()).map(|(field, ty_ident)| {
        let name = field.attrs.name.clone().unwrap_or_else(|| ty_ident.clone());
        let doc = format!("Focus on the `{}` field of [`{}`].", field.ident_string(), ident);
        quote! {
            #[doc = #doc]
            pub const #name: #module::#ty_ident = #module::#ty_ident;
        }
    });

    let module_doc = format!("Field foci of [`{ident}`](super::{ident}).");

    Ok(quote! {
        #[doc = #module_doc]
        #[allow(non_snake_case)]
        #vis mod #module {
            #(
                #[allow(non_camel_case_types)]
                #[derive(Copy, Clone, Debug, Default)]
                pub struct #type_idents;
            )*
        }

        #( #focus_impls )*

        #[allow(non_upper_case_globals)]
        impl #impl_generics #ident #ty_generics #where_clause {
            #( #consts )*
        }
    })
}
