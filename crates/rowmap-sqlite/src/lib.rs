//! SQLite driver for rowmap.
//!
//! Adapts [`rusqlite`] to the `rowmap-core` engine contract. One open
//! connection, fully synchronous; any busy-timeout policy is configured
//! once here and is opaque to the CRUD engine.
//!
//! Prepared statements are single-use per CRUD call, so the adapter runs
//! the query on the first `step` and buffers the result rows; subsequent
//! steps drain the buffer. This keeps the `step`/`column_*` surface of
//! the core contract without holding `rusqlite`'s borrowing row cursor
//! across calls.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use rowmap_core::{Connection, Error, Result, Statement, Step};
use rusqlite::types::Value;

fn connection_error(err: &rusqlite::Error) -> Error {
    Error::Connection(err.to_string())
}

fn statement_error(err: &rusqlite::Error, sql: &str) -> Error {
    Error::Statement {
        message: err.to_string(),
        sql: sql.to_owned(),
    }
}

/// An open SQLite database.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = rusqlite::Connection::open(path).map_err(|e| connection_error(&e))?;
        tracing::debug!("opened sqlite database");
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(|e| connection_error(&e))?;
        tracing::debug!("opened in-memory sqlite database");
        Ok(Self { conn })
    }

    /// Configure how long the engine waits on a locked database before
    /// reporting busy. Applies to every subsequent statement.
    pub fn busy_timeout(&self, timeout: Duration) -> Result<()> {
        self.conn
            .busy_timeout(timeout)
            .map_err(|e| connection_error(&e))
    }
}

impl Connection for SqliteConnection {
    fn execute(&self, sql: &str) -> Result<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| statement_error(&e, sql))
    }

    fn prepare(&self, sql: &str) -> Result<Box<dyn Statement + '_>> {
        let stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| statement_error(&e, sql))?;
        Ok(Box::new(SqliteStatement {
            stmt,
            sql: sql.to_owned(),
            executed: false,
            pending: VecDeque::new(),
            current: None,
        }))
    }

    fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    fn affected_rows(&self) -> u64 {
        self.conn.changes()
    }
}

struct SqliteStatement<'c> {
    stmt: rusqlite::Statement<'c>,
    sql: String,
    executed: bool,
    pending: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl SqliteStatement<'_> {
    fn cell(&self, col: usize) -> Result<&Value> {
        let row = self.current.as_ref().ok_or_else(|| Error::Statement {
            message: "no current row".to_string(),
            sql: self.sql.clone(),
        })?;
        row.get(col).ok_or_else(|| Error::Statement {
            message: format!("column index {col} out of range"),
            sql: self.sql.clone(),
        })
    }

    fn type_error(&self, col: usize, wanted: &str) -> Error {
        Error::Statement {
            message: format!("column {col} cannot be read as {wanted}"),
            sql: self.sql.clone(),
        }
    }
}

impl Statement for SqliteStatement<'_> {
    fn bind_i64(&mut self, index: usize, value: i64) -> Result<()> {
        self.stmt
            .raw_bind_parameter(index, value)
            .map_err(|e| statement_error(&e, &self.sql))
    }

    fn bind_f64(&mut self, index: usize, value: f64) -> Result<()> {
        self.stmt
            .raw_bind_parameter(index, value)
            .map_err(|e| statement_error(&e, &self.sql))
    }

    fn bind_text(&mut self, index: usize, value: &str) -> Result<()> {
        self.stmt
            .raw_bind_parameter(index, value)
            .map_err(|e| statement_error(&e, &self.sql))
    }

    fn bind_null(&mut self, index: usize) -> Result<()> {
        self.stmt
            .raw_bind_parameter(index, rusqlite::types::Null)
            .map_err(|e| statement_error(&e, &self.sql))
    }

    fn step(&mut self) -> Result<Step> {
        if !self.executed {
            self.executed = true;
            let columns = self.stmt.column_count();
            if columns == 0 {
                // DML produces no rows; run it in one shot.
                self.stmt
                    .raw_execute()
                    .map_err(|e| statement_error(&e, &self.sql))?;
                self.current = None;
                return Ok(Step::Done);
            }
            let mut rows = self.stmt.raw_query();
            loop {
                match rows.next() {
                    Ok(Some(row)) => {
                        let mut values = Vec::with_capacity(columns);
                        for i in 0..columns {
                            let value = row
                                .get::<usize, Value>(i)
                                .map_err(|e| statement_error(&e, &self.sql))?;
                            values.push(value);
                        }
                        self.pending.push_back(values);
                    }
                    Ok(None) => break,
                    Err(e) => return Err(statement_error(&e, &self.sql)),
                }
            }
        }
        match self.pending.pop_front() {
            Some(row) => {
                self.current = Some(row);
                Ok(Step::Row)
            }
            None => {
                self.current = None;
                Ok(Step::Done)
            }
        }
    }

    fn column_i64(&self, col: usize) -> Result<i64> {
        match self.cell(col)? {
            Value::Integer(v) => Ok(*v),
            _ => Err(self.type_error(col, "INTEGER")),
        }
    }

    fn column_f64(&self, col: usize) -> Result<f64> {
        match self.cell(col)? {
            Value::Real(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            _ => Err(self.type_error(col, "REAL")),
        }
    }

    fn column_text(&self, col: usize) -> Result<String> {
        match self.cell(col)? {
            Value::Text(v) => Ok(v.clone()),
            _ => Err(self.type_error(col, "TEXT")),
        }
    }

    fn column_is_null(&self, col: usize) -> Result<bool> {
        Ok(matches!(self.cell(col)?, Value::Null))
    }

    fn reset(&mut self) -> Result<()> {
        self.executed = false;
        self.pending.clear();
        self.current = None;
        Ok(())
    }
}
