//! Core types and traits for rowmap.
//!
//! `rowmap-core` is the **contract layer** for the workspace. It defines
//! everything the other crates build on, with no SQL generation and no
//! driver code of its own.
//!
//! # Role In The Architecture
//!
//! - **Data model**: [`Ident`], [`Constraints`], [`SqlType`], and
//!   [`FieldInfo`] describe named, typed, constrained columns.
//! - **Binder strategies**: [`Column`] converts domain values to and from
//!   the three SQL-storable primitive kinds; [`AnyColumn`] is its
//!   object-safe erasure.
//! - **Reflection**: [`Model`] exposes a table identifier and an ordered
//!   field list; [`FieldView`] lets generic algorithms iterate
//!   heterogeneous fields uniformly.
//! - **Engine contract**: [`Connection`] and [`Statement`] are the exact
//!   surface consumed from the storage engine; drivers implement them.
//! - **Transactions**: [`Transaction`] wraps a unit of work with
//!   deterministic rollback-on-abandon.
//!
//! # Who Uses This Crate
//!
//! - `rowmap-macros` generates the [`Model`] and `SqlEnum`/[`Column`]
//!   implementations defined here.
//! - `rowmap-crud` consumes [`Model`] metadata and [`FieldView`]s to build
//!   and execute SQL.
//! - `rowmap-sqlite` implements [`Connection`] and [`Statement`].
//!
//! Most applications should use the `rowmap` facade; reach for
//! `rowmap-core` directly when writing drivers.

pub mod column;
pub mod connection;
pub mod constraint;
pub mod error;
pub mod field;
pub mod ident;
pub mod model;
pub mod transaction;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use column::{AnyColumn, Column, Id};
pub use connection::{Connection, Statement, Step};
pub use constraint::Constraints;
pub use error::{Error, Result};
pub use field::{Col, FieldInfo, UniqueCol};
pub use ident::{Ident, quote_ident};
pub use model::Model;
pub use transaction::{Transaction, TransactionBehavior, TransactionState};
pub use types::{SqlEnum, SqlType};
pub use view::FieldView;
