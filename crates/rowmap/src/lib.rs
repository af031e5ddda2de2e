//! rowmap: compile-time record-to-SQL mapping with scoped transactions.
//!
//! A model is a plain struct deriving [`Model`]; every field type
//! implements a binder strategy ([`Column`]) for one of the three
//! SQL-storable primitive kinds. The CRUD engine projects type-erased
//! field views over the model to generate SQL, bind values, and
//! materialize result rows, all in one canonical column order.
//!
//! ```ignore
//! use rowmap::prelude::*;
//! use rowmap_sqlite::SqliteConnection;
//!
//! #[derive(Debug, Default, Model)]
//! #[rowmap(table = "accounts")]
//! struct Account {
//!     #[rowmap(auto_increment)]
//!     id: Option<i64>,
//!     #[rowmap(unique)]
//!     name: String,
//!     balance: f64,
//! }
//!
//! let conn = SqliteConnection::open_in_memory()?;
//! create_table::<Account, _>(&conn)?;
//!
//! let mut tx = Transaction::begin(&conn)?;
//! let id = insert(&conn, &Account {
//!     id: None,
//!     name: "savings".into(),
//!     balance: 125.0,
//! })?;
//! tx.commit()?;
//!
//! let found = get_by_pk::<Account, _, _>(&conn, &id)?;
//! # Ok::<(), rowmap::Error>(())
//! ```
//!
//! This crate is the facade: it re-exports the contract layer
//! (`rowmap-core`), the engine (`rowmap-crud`), and the derives
//! (`rowmap-macros`). Drivers such as `rowmap-sqlite` are separate.

pub use rowmap_core::{
    AnyColumn, Col, Column, Connection, Constraints, Error, FieldInfo, FieldView, Id, Ident,
    Model, Result, SqlEnum, SqlType, Statement, Step, Transaction, TransactionBehavior,
    TransactionState, UniqueCol, quote_ident,
};

pub use rowmap_crud as crud;
pub use rowmap_crud::{
    create_table, delete_by_pk, get_all, get_by_field, get_by_pk, get_by_unique, insert, update,
};

pub use rowmap_macros::{Model, SqlEnum};

/// Everything an application needs in scope to declare and use models.
pub mod prelude {
    pub use rowmap_core::{
        Col, Column, Connection, Error, Id, Model, Result, SqlEnum, Transaction,
        TransactionBehavior, UniqueCol,
    };
    pub use rowmap_crud::{
        create_table, delete_by_pk, get_all, get_by_field, get_by_pk, get_by_unique, insert,
        update,
    };
    pub use rowmap_macros::{Model, SqlEnum};
}
