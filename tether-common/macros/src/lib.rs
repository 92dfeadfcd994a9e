//! Derive macros for `tether_common`.
extern crate proc_macro;

mod data;
mod fields;
mod focus;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::parse_macro_input;

/// Path to the runtime crate in generated code.
struct CrateName;

impl ToTokens for CrateName {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        tokens.extend(quote!(tether_common))
    }
}

pub(crate) const CRATE: CrateName = CrateName;

/// Implements `Data` by comparing all fields with `Data::same`.
///
/// Field attributes:
/// - `#[data(ignore)]`: the field is not compared
/// - `#[data(same_fn = "path")]`: compare the field with `path(&a, &b)` instead
#[proc_macro_derive(Data, attributes(data))]
pub fn derive_data(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    data::derive_data_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Generates one focus per field of a struct.
///
/// For `struct Model { count: i32 }` this creates a zero-sized type implementing
/// `Focus<Model, i32>`, reachable as the associated constant `Model::count`. Tuple struct fields
/// are named `_0`, `_1`, ...
///
/// Field attributes:
/// - `#[focus(ignore)]`: no focus is generated for the field
/// - `#[focus(name = "other")]`: the associated constant is named `other`
#[proc_macro_derive(Focus, attributes(focus))]
pub fn derive_focus(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    focus::derive_focus_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
