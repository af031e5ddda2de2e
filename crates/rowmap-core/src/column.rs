//! Binder strategies: conversions between domain value types and the
//! three SQL-storable primitive kinds.
//!
//! [`Column`] is the statically-dispatched contract a value type
//! implements; [`AnyColumn`] is its object-safe erasure, which is what
//! field views and the CRUD engine iterate over. The only runtime cost of
//! the erasure is one indirect call per field.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::connection::Statement;
use crate::error::Result;
use crate::types::SqlType;

/// A value type that can be bound into and read back from a statement.
pub trait Column: Sized + 'static {
    /// The primitive kind this value is stored as.
    const SQL_TYPE: SqlType;

    /// Whether the type itself admits NULL (true for `Option<_>`).
    const NULLABLE: bool = false;

    /// Bind `self` at the 1-based parameter `index`.
    fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()>;

    /// Read a fresh value from the 0-based column `col` of the current row.
    fn read(stmt: &dyn Statement, col: usize) -> Result<Self>;
}

/// Object-safe erasure of [`Column`].
///
/// Blanket-implemented for every `Column` type; generic algorithms see a
/// heterogeneous set of fields through this one interface.
pub trait AnyColumn {
    /// Bind the current value at the 1-based parameter `index`.
    fn bind_into(&self, stmt: &mut dyn Statement, index: usize) -> Result<()>;

    /// Replace the current value with one read from the 0-based column
    /// `col` of the current row.
    fn load_from(&mut self, stmt: &dyn Statement, col: usize) -> Result<()>;
}

impl<V: Column> AnyColumn for V {
    fn bind_into(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        self.bind(stmt, index)
    }

    fn load_from(&mut self, stmt: &dyn Statement, col: usize) -> Result<()> {
        *self = V::read(stmt, col)?;
        Ok(())
    }
}

impl Column for i64 {
    const SQL_TYPE: SqlType = SqlType::Integer;

    fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        stmt.bind_i64(index, *self)
    }

    fn read(stmt: &dyn Statement, col: usize) -> Result<Self> {
        stmt.column_i64(col)
    }
}

impl Column for bool {
    const SQL_TYPE: SqlType = SqlType::Integer;

    fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        stmt.bind_i64(index, i64::from(*self))
    }

    // Any non-zero stored integer reads back as true.
    fn read(stmt: &dyn Statement, col: usize) -> Result<Self> {
        Ok(stmt.column_i64(col)? != 0)
    }
}

impl Column for f64 {
    const SQL_TYPE: SqlType = SqlType::Real;

    fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        stmt.bind_f64(index, *self)
    }

    fn read(stmt: &dyn Statement, col: usize) -> Result<Self> {
        stmt.column_f64(col)
    }
}

impl Column for String {
    const SQL_TYPE: SqlType = SqlType::Text;

    fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        stmt.bind_text(index, self)
    }

    fn read(stmt: &dyn Statement, col: usize) -> Result<Self> {
        stmt.column_text(col)
    }
}

impl<V: Column> Column for Option<V> {
    const SQL_TYPE: SqlType = V::SQL_TYPE;
    const NULLABLE: bool = true;

    fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        match self {
            Some(value) => value.bind(stmt, index),
            None => stmt.bind_null(index),
        }
    }

    fn read(stmt: &dyn Statement, col: usize) -> Result<Self> {
        if stmt.column_is_null(col)? {
            Ok(None)
        } else {
            V::read(stmt, col).map(Some)
        }
    }
}

/// A strongly-typed row identity: an integer wrapped in a tag type.
///
/// `Id<Account>` and `Id<Profile>` are distinct types, so identities
/// cannot be mixed up across tables. Stored as the underlying integer.
pub struct Id<M> {
    raw: i64,
    _marker: PhantomData<fn() -> M>,
}

impl<M> Id<M> {
    /// Wrap a raw engine identity.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// The underlying integer.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.raw
    }
}

impl<M> fmt::Debug for Id<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<M> fmt::Display for Id<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<M> Clone for Id<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Id<M> {}

impl<M> PartialEq for Id<M> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<M> Eq for Id<M> {}

impl<M> Hash for Id<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<M> Default for Id<M> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<M> From<i64> for Id<M> {
    fn from(raw: i64) -> Self {
        Self::new(raw)
    }
}

impl<M: 'static> Column for Id<M> {
    const SQL_TYPE: SqlType = SqlType::Integer;

    fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        stmt.bind_i64(index, self.raw)
    }

    fn read(stmt: &dyn Statement, col: usize) -> Result<Self> {
        stmt.column_i64(col).map(Self::new)
    }
}
