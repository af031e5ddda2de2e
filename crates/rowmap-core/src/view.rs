//! Type-erased field views.
//!
//! A [`FieldView`] pairs one field's static metadata with a borrow of its
//! live value, erased to [`AnyColumn`]. This is what lets the CRUD engine
//! iterate a compile-time-known tuple of differently-typed fields through
//! one homogeneous runtime interface.

use crate::column::AnyColumn;
use crate::connection::Statement;
use crate::error::{Error, Result};
use crate::field::FieldInfo;

enum Slot<'a> {
    Shared(&'a dyn AnyColumn),
    Writable(&'a mut dyn AnyColumn),
}

/// A non-owning handle over exactly one live field of a model instance.
///
/// `bind` and `ddl` are always valid. `read_from` is valid only for views
/// built from a mutable reference; on a shared view it reports
/// [`Error::NotReadable`] instead of silently doing nothing. A view must
/// not outlive the model it was built from, which the borrow it carries
/// enforces.
pub struct FieldView<'a> {
    info: &'static FieldInfo,
    slot: Slot<'a>,
}

impl<'a> FieldView<'a> {
    /// Build a read-incapable view from a shared reference.
    #[must_use]
    pub fn shared(info: &'static FieldInfo, value: &'a dyn AnyColumn) -> Self {
        Self {
            info,
            slot: Slot::Shared(value),
        }
    }

    /// Build a full view from a mutable reference.
    #[must_use]
    pub fn writable(info: &'static FieldInfo, value: &'a mut dyn AnyColumn) -> Self {
        Self {
            info,
            slot: Slot::Writable(value),
        }
    }

    /// The field's static metadata.
    #[must_use]
    pub fn info(&self) -> &'static FieldInfo {
        self.info
    }

    /// The column name.
    #[must_use]
    pub fn column_name(&self) -> &'static str {
        self.info.column.as_str()
    }

    /// Whether the column participates in the primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.info.is_primary_key()
    }

    /// Whether the engine assigns the column's value on insert.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.info.is_auto_increment()
    }

    /// Whether the column carries a single-column UNIQUE constraint.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.info.is_unique()
    }

    /// The column definition fragment for CREATE TABLE.
    #[must_use]
    pub fn ddl(&self) -> String {
        self.info.ddl()
    }

    /// Bind the field's current value at the 1-based parameter `index`.
    pub fn bind(&self, stmt: &mut dyn Statement, index: usize) -> Result<()> {
        match &self.slot {
            Slot::Shared(value) => value.bind_into(stmt, index),
            Slot::Writable(value) => value.bind_into(stmt, index),
        }
    }

    /// Replace the field's value with one read from the 0-based column
    /// `col` of the statement's current row.
    pub fn read_from(&mut self, stmt: &dyn Statement, col: usize) -> Result<()> {
        match &mut self.slot {
            Slot::Writable(value) => value.load_from(stmt, col),
            Slot::Shared(_) => Err(Error::NotReadable {
                column: self.info.column.as_str(),
            }),
        }
    }
}
