//! Implementation of the SqlEnum derive macro.
//!
//! Fieldless enums map to TEXT storage under their variant names. The
//! generated `Column` implementation parses strictly: an unknown stored
//! name is reported as `InvalidEnumValue`, never replaced by a default.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, Result};

/// Expand `#[derive(SqlEnum)]` for the given input.
pub fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let variants = parse_variants(input)?;
    Ok(generate_enum_impl(&input.ident, &variants))
}

/// Collect the variant identifiers, rejecting anything but a fieldless,
/// non-empty, non-generic enum.
pub fn parse_variants(input: &DeriveInput) -> Result<Vec<Ident>> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "SqlEnum cannot be derived for generic types",
        ));
    }

    let data = match &input.data {
        Data::Enum(data) => data,
        Data::Struct(_) | Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "SqlEnum can only be derived for enums",
            ));
        }
    };

    if data.variants.is_empty() {
        return Err(Error::new_spanned(
            &input.ident,
            "SqlEnum requires at least one variant",
        ));
    }

    data.variants
        .iter()
        .map(|variant| match &variant.fields {
            Fields::Unit => Ok(variant.ident.clone()),
            Fields::Named(_) | Fields::Unnamed(_) => Err(Error::new_spanned(
                variant,
                "SqlEnum variants must not carry data",
            )),
        })
        .collect()
}

/// Generate the `SqlEnum` and `Column` implementations.
pub fn generate_enum_impl(name: &Ident, variants: &[Ident]) -> TokenStream {
    let name_str = name.to_string();
    let variant_names: Vec<String> = variants.iter().map(Ident::to_string).collect();

    quote! {
        impl ::rowmap_core::SqlEnum for #name {
            const ENUM_NAME: &'static str = #name_str;

            fn as_sql_name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #variant_names,)*
                }
            }

            fn from_sql_name(name: &str) -> ::std::option::Option<Self> {
                match name {
                    #(#variant_names => ::std::option::Option::Some(Self::#variants),)*
                    _ => ::std::option::Option::None,
                }
            }

            fn variant_names() -> &'static [&'static str] {
                &[#(#variant_names),*]
            }
        }

        impl ::rowmap_core::Column for #name {
            const SQL_TYPE: ::rowmap_core::SqlType = ::rowmap_core::SqlType::Text;

            fn bind(
                &self,
                stmt: &mut dyn ::rowmap_core::Statement,
                index: usize,
            ) -> ::rowmap_core::Result<()> {
                stmt.bind_text(index, <Self as ::rowmap_core::SqlEnum>::as_sql_name(self))
            }

            fn read(
                stmt: &dyn ::rowmap_core::Statement,
                col: usize,
            ) -> ::rowmap_core::Result<Self> {
                let raw = stmt.column_text(col)?;
                <Self as ::rowmap_core::SqlEnum>::from_sql_name(&raw).ok_or(
                    ::rowmap_core::Error::InvalidEnumValue {
                        enum_name: <Self as ::rowmap_core::SqlEnum>::ENUM_NAME,
                        value: raw,
                    },
                )
            }
        }
    }
}
