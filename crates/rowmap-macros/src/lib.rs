//! Procedural macros for rowmap.
//!
//! - `#[derive(Model)]` implements `rowmap_core::Model` for a struct with
//!   named fields, emitting the static field metadata, the shared and
//!   mutable field-view lists, and typed column constants.
//! - `#[derive(SqlEnum)]` implements `rowmap_core::SqlEnum` and
//!   `rowmap_core::Column` for a fieldless enum, stored by variant name.

use proc_macro::TokenStream;

mod enum_derive;
mod model_derive;

/// Derive `rowmap_core::Model` for a struct with named fields.
///
/// # Attributes
///
/// Struct level:
/// - `#[rowmap(table = "accounts")]` — required; the table name.
/// - `#[rowmap(unique(owner_id, name))]` — optional, repeatable; a
///   multi-column UNIQUE group.
///
/// Field level:
/// - `#[rowmap(primary_key)]`
/// - `#[rowmap(auto_increment)]` — implies `primary_key`.
/// - `#[rowmap(unique)]`
/// - `#[rowmap(not_null)]` — force NOT NULL on an `Option` field.
/// - `#[rowmap(column = "other_name")]` — override the column name.
///
/// Every field type must implement `rowmap_core::Column`, and the struct
/// must implement `Default` (row materialization starts from a default
/// instance).
#[proc_macro_derive(Model, attributes(rowmap))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    model_derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive `rowmap_core::SqlEnum` (and with it `rowmap_core::Column`) for
/// a fieldless enum. Values are stored as TEXT under the variant's name;
/// reading back an unknown name yields `Error::InvalidEnumValue`.
#[proc_macro_derive(SqlEnum, attributes(rowmap))]
pub fn derive_sql_enum(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    enum_derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
