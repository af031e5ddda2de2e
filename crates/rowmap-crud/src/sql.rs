//! SQL text builders.
//!
//! Pure string assembly from model metadata; no engine involvement.
//! Column order always follows the model's canonical field order, and
//! identifiers are always quoted.

use rowmap_core::{FieldInfo, Model, quote_ident};

fn select_list<M: Model>() -> String {
    M::fields()
        .iter()
        .map(|f| f.column.quoted())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `CREATE TABLE IF NOT EXISTS <table> (<col ddl>, ..., UNIQUE(...))`.
///
/// Multi-column uniqueness groups are appended after the column
/// definitions. Idempotent given `IF NOT EXISTS`.
#[must_use]
pub fn create_table_sql<M: Model>() -> String {
    let mut defs: Vec<String> = M::fields().iter().map(FieldInfo::ddl).collect();
    for group in M::unique_groups() {
        let columns: Vec<String> = group.iter().map(|c| quote_ident(c)).collect();
        defs.push(format!("UNIQUE({})", columns.join(", ")));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        M::TABLE.quoted(),
        defs.join(", ")
    )
}

/// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)`.
///
/// Auto-increment columns are excluded; the engine assigns them.
#[must_use]
pub fn insert_sql<M: Model>() -> String {
    let columns: Vec<String> = M::fields()
        .iter()
        .filter(|f| !f.is_auto_increment())
        .map(|f| f.column.quoted())
        .collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        M::TABLE.quoted(),
        columns.join(", "),
        placeholders
    )
}

/// `UPDATE <table> SET <non-PK columns> = ? WHERE <PK columns> = ?`.
///
/// Callers verify a primary key exists before building this.
#[must_use]
pub fn update_sql<M: Model>() -> String {
    let assignments: Vec<String> = M::fields()
        .iter()
        .filter(|f| !f.is_primary_key())
        .map(|f| format!("{} = ?", f.column.quoted()))
        .collect();
    let predicates: Vec<String> = M::fields()
        .iter()
        .filter(|f| f.is_primary_key())
        .map(|f| format!("{} = ?", f.column.quoted()))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {}",
        M::TABLE.quoted(),
        assignments.join(", "),
        predicates.join(" AND ")
    )
}

/// `SELECT <all columns> FROM <table>`, no filter.
#[must_use]
pub fn select_all_sql<M: Model>() -> String {
    format!("SELECT {} FROM {}", select_list::<M>(), M::TABLE.quoted())
}

/// `SELECT <all columns> FROM <table> WHERE <column> = ?`.
#[must_use]
pub fn select_by_column_sql<M: Model>(column: &str) -> String {
    format!("{} WHERE {} = ?", select_all_sql::<M>(), quote_ident(column))
}

/// `DELETE FROM <table> WHERE <column> = ?`.
#[must_use]
pub fn delete_sql<M: Model>(column: &str) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?",
        M::TABLE.quoted(),
        quote_ident(column)
    )
}
