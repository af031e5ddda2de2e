//! In-memory statement stub shared by the crate's unit tests.

use std::collections::BTreeMap;

use crate::connection::{Statement, Step};
use crate::error::{Error, Result};

/// A value captured by or served from the stub.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Bound {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

/// Records binds and serves a single canned row.
#[derive(Debug, Default)]
pub(crate) struct MockStatement {
    pub(crate) bound: BTreeMap<usize, Bound>,
    pub(crate) row: Vec<Bound>,
}

impl MockStatement {
    pub(crate) fn with_row(row: Vec<Bound>) -> Self {
        Self {
            bound: BTreeMap::new(),
            row,
        }
    }

    fn cell(&self, col: usize) -> Result<&Bound> {
        self.row.get(col).ok_or_else(|| Error::Statement {
            message: format!("no column {col} in mock row"),
            sql: "<mock>".to_string(),
        })
    }

    fn type_error(&self, col: usize, wanted: &str) -> Error {
        Error::Statement {
            message: format!("mock column {col} is not {wanted}"),
            sql: "<mock>".to_string(),
        }
    }
}

impl Statement for MockStatement {
    fn bind_i64(&mut self, index: usize, value: i64) -> Result<()> {
        self.bound.insert(index, Bound::Int(value));
        Ok(())
    }

    fn bind_f64(&mut self, index: usize, value: f64) -> Result<()> {
        self.bound.insert(index, Bound::Float(value));
        Ok(())
    }

    fn bind_text(&mut self, index: usize, value: &str) -> Result<()> {
        self.bound.insert(index, Bound::Text(value.to_string()));
        Ok(())
    }

    fn bind_null(&mut self, index: usize) -> Result<()> {
        self.bound.insert(index, Bound::Null);
        Ok(())
    }

    fn step(&mut self) -> Result<Step> {
        Ok(if self.row.is_empty() {
            Step::Done
        } else {
            Step::Row
        })
    }

    fn column_i64(&self, col: usize) -> Result<i64> {
        match self.cell(col)? {
            Bound::Int(v) => Ok(*v),
            _ => Err(self.type_error(col, "INTEGER")),
        }
    }

    fn column_f64(&self, col: usize) -> Result<f64> {
        match self.cell(col)? {
            Bound::Float(v) => Ok(*v),
            Bound::Int(v) => Ok(*v as f64),
            _ => Err(self.type_error(col, "REAL")),
        }
    }

    fn column_text(&self, col: usize) -> Result<String> {
        match self.cell(col)? {
            Bound::Text(v) => Ok(v.clone()),
            _ => Err(self.type_error(col, "TEXT")),
        }
    }

    fn column_is_null(&self, col: usize) -> Result<bool> {
        Ok(matches!(self.cell(col)?, Bound::Null))
    }

    fn reset(&mut self) -> Result<()> {
        self.bound.clear();
        Ok(())
    }
}
