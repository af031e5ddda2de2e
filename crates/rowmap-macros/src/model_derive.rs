//! Implementation of the Model derive macro.
//!
//! Parses the struct and its `#[rowmap(...)]` attributes into a
//! [`ModelDef`], then generates the `rowmap_core::Model` implementation
//! plus typed column constants.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, Lit, Result, Type};

/// Parsed model definition from a struct with `#[derive(Model)]`.
#[derive(Debug)]
pub struct ModelDef {
    /// The struct name.
    pub name: Ident,
    /// The table name from `#[rowmap(table = "...")]`.
    pub table: String,
    /// Multi-column UNIQUE groups from `#[rowmap(unique(a, b))]`.
    pub unique_groups: Vec<Vec<String>>,
    /// Parsed fields in declaration order.
    pub fields: Vec<ModelFieldDef>,
}

/// Parsed column mapping for a single field.
#[derive(Debug)]
pub struct ModelFieldDef {
    /// The field name.
    pub name: Ident,
    /// The field type.
    pub ty: Type,
    /// The column name (field name unless overridden).
    pub column: String,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
    /// Whether the engine assigns the value on insert.
    pub auto_increment: bool,
    /// Whether the column is declared unique.
    pub unique: bool,
    /// Whether NOT NULL is forced even for an `Option` type.
    pub not_null: bool,
}

/// Expand `#[derive(Model)]` for the given input.
pub fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let def = parse_model(input)?;
    Ok(generate_model_impl(&def))
}

/// Parse a `DeriveInput` into a `ModelDef`.
pub fn parse_model(input: &DeriveInput) -> Result<ModelDef> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Model cannot be derived for generic types",
        ));
    }

    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Model can only be derived for structs",
            ));
        }
    };

    let named = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unnamed(_) | Fields::Unit => {
            return Err(Error::new_spanned(
                &data.fields,
                "Model requires a struct with named fields",
            ));
        }
    };

    let mut table = None;
    let mut unique_groups = Vec::new();

    for attr in &input.attrs {
        if !attr.path().is_ident("rowmap") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let lit: Lit = meta.value()?.parse()?;
                let Lit::Str(lit_str) = lit else {
                    return Err(meta.error("expected string literal for table name"));
                };
                let value = lit_str.value();
                if value.is_empty() {
                    return Err(Error::new_spanned(lit_str, "table name must not be empty"));
                }
                table = Some(value);
                Ok(())
            } else if meta.path.is_ident("unique") {
                let mut group = Vec::new();
                meta.parse_nested_meta(|inner| {
                    let ident = inner
                        .path
                        .get_ident()
                        .ok_or_else(|| inner.error("expected a column name"))?;
                    group.push(ident.to_string());
                    Ok(())
                })?;
                if group.len() < 2 {
                    return Err(meta.error("a unique group needs at least two columns"));
                }
                unique_groups.push(group);
                Ok(())
            } else {
                Err(meta.error("unknown rowmap attribute. Valid here: table, unique"))
            }
        })?;
    }

    let table = table.ok_or_else(|| {
        Error::new_spanned(&input.ident, "Model requires #[rowmap(table = \"...\")]")
    })?;

    let fields: Vec<ModelFieldDef> = named.iter().map(parse_model_field).collect::<Result<_>>()?;
    if fields.is_empty() {
        return Err(Error::new_spanned(
            &input.ident,
            "Model requires at least one field",
        ));
    }

    for (i, field) in fields.iter().enumerate() {
        if fields[..i].iter().any(|f| f.column == field.column) {
            return Err(Error::new_spanned(
                &field.name,
                format!("duplicate column name `{}`", field.column),
            ));
        }
    }

    for group in &unique_groups {
        for column in group {
            if !fields.iter().any(|f| &f.column == column) {
                return Err(Error::new_spanned(
                    &input.ident,
                    format!("unique group references unknown column `{column}`"),
                ));
            }
        }
    }

    Ok(ModelDef {
        name: input.ident.clone(),
        table,
        unique_groups,
        fields,
    })
}

/// Parse a single field and its `#[rowmap(...)]` attributes.
fn parse_model_field(field: &Field) -> Result<ModelFieldDef> {
    let name = field
        .ident
        .clone()
        .ok_or_else(|| Error::new_spanned(field, "expected named field"))?;

    let mut column = None;
    let mut primary_key = false;
    let mut auto_increment = false;
    let mut unique = false;
    let mut not_null = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("rowmap") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                primary_key = true;
            } else if meta.path.is_ident("auto_increment") {
                auto_increment = true;
            } else if meta.path.is_ident("unique") {
                unique = true;
            } else if meta.path.is_ident("not_null") {
                not_null = true;
            } else if meta.path.is_ident("column") {
                let lit: Lit = meta.value()?.parse()?;
                let Lit::Str(lit_str) = lit else {
                    return Err(meta.error("expected string literal for column name"));
                };
                let value = lit_str.value();
                if value.is_empty() {
                    return Err(Error::new_spanned(lit_str, "column name must not be empty"));
                }
                column = Some(value);
            } else {
                return Err(meta.error(
                    "unknown rowmap attribute. Valid here: \
                     primary_key, auto_increment, unique, not_null, column",
                ));
            }
            Ok(())
        })?;
    }

    Ok(ModelFieldDef {
        column: column.unwrap_or_else(|| name.to_string()),
        name,
        ty: field.ty.clone(),
        primary_key,
        auto_increment,
        unique,
        not_null,
    })
}

/// Build the constraint-set expression for one field.
fn constraints_expr(field: &ModelFieldDef) -> TokenStream {
    let mut parts = Vec::new();
    if field.auto_increment {
        parts.push(quote!(::rowmap_core::Constraints::AUTO_INCREMENT));
    } else if field.primary_key {
        parts.push(quote!(::rowmap_core::Constraints::PRIMARY_KEY));
    }
    if field.unique {
        parts.push(quote!(::rowmap_core::Constraints::UNIQUE));
    }
    if field.not_null {
        parts.push(quote!(::rowmap_core::Constraints::NOT_NULL));
    }

    match parts.split_first() {
        None => quote!(::rowmap_core::Constraints::NONE),
        Some((first, rest)) => {
            let mut expr = first.clone();
            for part in rest {
                expr = quote!(#expr.union(#part));
            }
            expr
        }
    }
}

/// Generate the `Model` implementation and typed column constants.
pub fn generate_model_impl(def: &ModelDef) -> TokenStream {
    let name = &def.name;
    let table = &def.table;
    let field_count = def.fields.len();

    let infos: Vec<TokenStream> = def
        .fields
        .iter()
        .map(|f| {
            let field_name = f.name.to_string();
            let column = &f.column;
            let ty = &f.ty;
            let constraints = constraints_expr(f);
            quote! {
                ::rowmap_core::FieldInfo::new(
                    #field_name,
                    #column,
                    <#ty as ::rowmap_core::Column>::SQL_TYPE,
                )
                .constraints(#constraints)
                .resolve_nullability(<#ty as ::rowmap_core::Column>::NULLABLE)
            }
        })
        .collect();

    let shared_views: Vec<TokenStream> = def
        .fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let field_name = &f.name;
            quote!(::rowmap_core::FieldView::shared(&fields[#i], &self.#field_name))
        })
        .collect();

    let writable_views: Vec<TokenStream> = def
        .fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let field_name = &f.name;
            quote!(::rowmap_core::FieldView::writable(&fields[#i], &mut self.#field_name))
        })
        .collect();

    let unique_groups_fn = if def.unique_groups.is_empty() {
        TokenStream::new()
    } else {
        let group_count = def.unique_groups.len();
        let groups: Vec<TokenStream> = def
            .unique_groups
            .iter()
            .map(|group| {
                let columns = group.iter();
                quote!(&[#(#columns),*])
            })
            .collect();
        quote! {
            fn unique_groups() -> &'static [&'static [&'static str]] {
                static GROUPS: [&'static [&'static str]; #group_count] = [#(#groups),*];
                &GROUPS
            }
        }
    };

    let column_consts: Vec<TokenStream> = def
        .fields
        .iter()
        .map(|f| {
            let const_name = format_ident!("{}", f.name.to_string().to_uppercase());
            let column = &f.column;
            let ty = &f.ty;
            let doc = format!("Typed reference to the `{column}` column.");
            if f.unique {
                quote! {
                    #[doc = #doc]
                    pub const #const_name: ::rowmap_core::UniqueCol<#name, #ty> =
                        ::rowmap_core::UniqueCol::new(#column);
                }
            } else {
                quote! {
                    #[doc = #doc]
                    pub const #const_name: ::rowmap_core::Col<#name, #ty> =
                        ::rowmap_core::Col::new(#column);
                }
            }
        })
        .collect();

    quote! {
        impl ::rowmap_core::Model for #name {
            const TABLE: ::rowmap_core::Ident = ::rowmap_core::Ident::new(#table);

            fn fields() -> &'static [::rowmap_core::FieldInfo] {
                static FIELDS: [::rowmap_core::FieldInfo; #field_count] = [#(#infos),*];
                &FIELDS
            }

            fn field_views(&self) -> ::std::vec::Vec<::rowmap_core::FieldView<'_>> {
                let fields = <Self as ::rowmap_core::Model>::fields();
                ::std::vec![#(#shared_views),*]
            }

            fn field_views_mut(&mut self) -> ::std::vec::Vec<::rowmap_core::FieldView<'_>> {
                let fields = <Self as ::rowmap_core::Model>::fields();
                ::std::vec![#(#writable_views),*]
            }

            #unique_groups_fn
        }

        impl #name {
            #(#column_consts)*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_basic_model() {
        let input: DeriveInput = parse_quote! {
            #[rowmap(table = "accounts")]
            struct Account {
                #[rowmap(auto_increment)]
                id: Option<i64>,
                #[rowmap(unique)]
                name: String,
                balance: f64,
            }
        };
        let def = parse_model(&input).unwrap();

        assert_eq!(def.table, "accounts");
        assert_eq!(def.fields.len(), 3);
        assert!(def.fields[0].auto_increment);
        assert!(def.fields[1].unique);
        assert!(!def.fields[2].primary_key);
        assert_eq!(def.fields[2].column, "balance");
    }

    #[test]
    fn test_parse_column_override_and_groups() {
        let input: DeriveInput = parse_quote! {
            #[rowmap(table = "entries", unique(owner, label))]
            struct Entry {
                #[rowmap(primary_key)]
                id: i64,
                owner: i64,
                #[rowmap(column = "label")]
                display_label: String,
            }
        };
        let def = parse_model(&input).unwrap();

        assert_eq!(def.fields[2].column, "label");
        assert_eq!(def.unique_groups, vec![vec![
            "owner".to_string(),
            "label".to_string()
        ]]);
    }

    #[test]
    fn test_missing_table_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Account {
                id: i64,
            }
        };
        let err = parse_model(&input).unwrap_err();
        assert!(err.to_string().contains("table"));
    }

    #[test]
    fn test_unique_group_must_reference_known_columns() {
        let input: DeriveInput = parse_quote! {
            #[rowmap(table = "entries", unique(owner, missing))]
            struct Entry {
                id: i64,
                owner: i64,
            }
        };
        let err = parse_model(&input).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let input: DeriveInput = parse_quote! {
            #[rowmap(table = "entries")]
            struct Entry {
                id: i64,
                #[rowmap(column = "id")]
                other: i64,
            }
        };
        let err = parse_model(&input).unwrap_err();
        assert!(err.to_string().contains("duplicate column"));
    }

    #[test]
    fn test_tuple_struct_rejected() {
        let input: DeriveInput = parse_quote! {
            #[rowmap(table = "pairs")]
            struct Pair(i64, i64);
        };
        assert!(parse_model(&input).is_err());
    }

    #[test]
    fn test_generated_impl_mentions_every_column() {
        let input: DeriveInput = parse_quote! {
            #[rowmap(table = "accounts")]
            struct Account {
                #[rowmap(auto_increment)]
                id: Option<i64>,
                #[rowmap(unique)]
                name: String,
            }
        };
        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("accounts"));
        assert!(tokens.contains("UniqueCol"));
        assert!(tokens.contains("AUTO_INCREMENT"));
    }
}
