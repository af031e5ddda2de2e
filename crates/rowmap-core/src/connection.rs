//! Storage engine connection and prepared statement contracts.
//!
//! The storage engine itself lives outside this workspace's core; these
//! traits are the exact surface the CRUD engine and transactions consume.
//! `rowmap-sqlite` adapts a real engine to them.
//!
//! Index conventions follow the engine: bind parameter indices are
//! 1-based, result column indices are 0-based.

use crate::error::Result;

/// Outcome of advancing a prepared statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A result row is available for column reads.
    Row,
    /// Execution finished; no further rows.
    Done,
}

/// A compiled, parameterized statement.
///
/// Statements are single-use per CRUD call: prepare, bind, step to
/// completion, release. `reset` exists for callers that drive the
/// statement directly.
pub trait Statement {
    /// Bind a 64-bit integer at the 1-based parameter `index`.
    fn bind_i64(&mut self, index: usize, value: i64) -> Result<()>;

    /// Bind a 64-bit float at the 1-based parameter `index`.
    fn bind_f64(&mut self, index: usize, value: f64) -> Result<()>;

    /// Bind UTF-8 text at the 1-based parameter `index`.
    fn bind_text(&mut self, index: usize, value: &str) -> Result<()>;

    /// Bind SQL NULL at the 1-based parameter `index`.
    fn bind_null(&mut self, index: usize) -> Result<()>;

    /// Execute or advance the statement by one row.
    fn step(&mut self) -> Result<Step>;

    /// Read the 0-based column `col` of the current row as an integer.
    fn column_i64(&self, col: usize) -> Result<i64>;

    /// Read the 0-based column `col` of the current row as a float.
    fn column_f64(&self, col: usize) -> Result<f64>;

    /// Read the 0-based column `col` of the current row as text.
    fn column_text(&self, col: usize) -> Result<String>;

    /// Whether the 0-based column `col` of the current row is NULL.
    fn column_is_null(&self, col: usize) -> Result<bool>;

    /// Rewind the statement so it can be stepped again.
    fn reset(&mut self) -> Result<()>;
}

/// An open storage engine connection.
///
/// One connection, fully synchronous: every call blocks until the engine
/// responds. Callers needing concurrency serialize access themselves;
/// this layer performs no internal locking.
pub trait Connection {
    /// Run non-parameterized SQL to completion.
    fn execute(&self, sql: &str) -> Result<()>;

    /// Compile a parameterized statement.
    fn prepare(&self, sql: &str) -> Result<Box<dyn Statement + '_>>;

    /// The row identity assigned by the most recent successful INSERT.
    fn last_insert_id(&self) -> i64;

    /// Rows affected by the most recent INSERT/UPDATE/DELETE.
    fn affected_rows(&self) -> u64;
}
