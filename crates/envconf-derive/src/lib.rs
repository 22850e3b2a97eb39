//! Derive macro for `envconf` records.
//!
//! `#[derive(Record)]` implements `envconf::Record` and `envconf::Bindable`
//! for a struct with named fields. Each field is presented to the binder in
//! declaration order, together with its `#[env(...)]` annotation:
//!
//! - `#[env(key = "PORT")]` binds the field from `PORT`.
//! - `#[env(key = "PORT", default = "8080")]` falls back to `8080` when `PORT`
//!   is absent.
//! - `#[env(skip)]` hides the field from the binder entirely, for types that
//!   do not implement `envconf::Bindable`.
//!
//! Fields without an attribute are still visited. Nested records are
//! traversed and unannotated scalars are left alone.

mod attr;
mod expand;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive `envconf::Record` and `envconf::Bindable`.
#[proc_macro_derive(Record, attributes(env))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
