//! Persistence error taxonomy.
//!
//! Structural precondition failures (`NoPrimaryKey`, `NotReadable`) are
//! raised before any SQL reaches the engine; engine-level failures are
//! wrapped with the offending SQL text attached.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure reasons surfaced by the CRUD engine and transactions.
#[derive(Debug, Error)]
pub enum Error {
    /// A PK-keyed operation was attempted on a model with no primary key
    /// column. Raised before any SQL is issued.
    #[error("model for table `{table}` declares no primary key column")]
    NoPrimaryKey {
        /// Table the offending model maps to.
        table: &'static str,
    },

    /// An UPDATE matched no rows. The row either never existed or its key
    /// changed underneath the caller.
    #[error("update of `{table}` affected no rows")]
    NoRowsUpdated {
        /// Table the update targeted.
        table: &'static str,
    },

    /// An UPDATE matched more than one row, which means the declared
    /// primary key is not actually unique in the table.
    #[error("update of `{table}` affected {count} rows, expected exactly 1")]
    MultipleRowsUpdated {
        /// Table the update targeted.
        table: &'static str,
        /// Engine-reported affected-row count.
        count: u64,
    },

    /// An INSERT completed without inserting exactly one row.
    #[error("insert into `{table}` affected {count} rows, expected exactly 1")]
    InsertFailed {
        /// Table the insert targeted.
        table: &'static str,
        /// Engine-reported affected-row count.
        count: u64,
    },

    /// A unique-field lookup resolved to no row.
    #[error("no `{table}` row matched unique column `{column}`")]
    NotFound {
        /// Table the lookup ran against.
        table: &'static str,
        /// Unique column used as the key.
        column: &'static str,
    },

    /// A stored enumeration value did not match any known variant name.
    /// Never coerced to a default: an unknown name means corrupt data.
    #[error("`{value}` is not a known `{enum_name}` value")]
    InvalidEnumValue {
        /// Enumeration type name, for diagnostics.
        enum_name: &'static str,
        /// The raw stored text that failed to parse.
        value: String,
    },

    /// A field view was asked to bind a value it cannot produce.
    #[error("field view for column `{column}` cannot bind")]
    NotBindable {
        /// Column the view was built for.
        column: &'static str,
    },

    /// `read_from` was called on a field view built from a shared
    /// reference. A contract violation on the caller's side, surfaced as
    /// a typed error rather than undefined behavior.
    #[error("field view for column `{column}` is read-only")]
    NotReadable {
        /// Column the view was built for.
        column: &'static str,
    },

    /// A prepared statement failed inside the storage engine. Carries the
    /// SQL text that was being executed.
    #[error("statement failed: {message} (sql: `{sql}`)")]
    Statement {
        /// Engine-reported failure message.
        message: String,
        /// The SQL text that triggered the failure.
        sql: String,
    },

    /// A connection-level engine failure (open, pragma, transaction
    /// control) with no single statement to blame.
    #[error("connection error: {0}")]
    Connection(String),
}

impl Error {
    /// Attach the offending SQL text to an engine-level error.
    ///
    /// Leaves structural errors untouched; `Connection` errors become
    /// `Statement` errors once a concrete statement is known.
    #[must_use]
    pub fn with_sql(self, sql: &str) -> Self {
        match self {
            Error::Connection(message) => Error::Statement {
                message,
                sql: sql.to_owned(),
            },
            Error::Statement { message, .. } => Error::Statement {
                message,
                sql: sql.to_owned(),
            },
            other => other,
        }
    }
}
