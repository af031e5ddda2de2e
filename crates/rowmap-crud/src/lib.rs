//! Generic single-table CRUD algorithms.
//!
//! Every operation here is a pure function of (connection, model type,
//! optional key or field value): it builds SQL text by projecting field
//! views over the model's reflection metadata, prepares the statement
//! through the engine, binds values through the same views, executes, and
//! materializes result rows back into model instances. Statements are
//! single-use: each call prepares, executes to completion, and releases.
//!
//! The central invariant: the column order used to generate SQL and the
//! field-view order used for binding and materialization are both the
//! model's canonical field order, so values can never be cross-assigned.

pub mod ops;
pub mod sql;

pub use ops::{
    create_table, delete_by_pk, get_all, get_by_field, get_by_pk, get_by_unique, insert, update,
};
