//! Field metadata and typed column references.

use std::marker::PhantomData;

use crate::constraint::Constraints;
use crate::ident::Ident;
use crate::types::SqlType;

/// Static metadata for one model field: name, column identifier, storage
/// type, and constraint set.
///
/// Resolved at build time by `#[derive(Model)]` and never mutated; the
/// value half of a field lives in the model struct itself.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    /// Rust field name.
    pub name: &'static str,
    /// Database column identifier.
    pub column: Ident,
    /// Storage kind of the field's value type.
    pub sql_type: SqlType,
    /// Declared and derived constraints.
    pub constraints: Constraints,
}

impl FieldInfo {
    /// Create metadata with no constraints.
    #[must_use]
    pub const fn new(name: &'static str, column: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            column: Ident::new(column),
            sql_type,
            constraints: Constraints::NONE,
        }
    }

    /// Attach declared constraints.
    #[must_use]
    pub const fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Resolve nullability from the value type.
    ///
    /// An optional value type without an explicit `NOT_NULL` becomes
    /// `NULLABLE`; everything else becomes `NOT_NULL`.
    #[must_use]
    pub const fn resolve_nullability(mut self, type_is_optional: bool) -> Self {
        if self.constraints.contains(Constraints::NOT_NULL) {
            return self;
        }
        if type_is_optional {
            self.constraints = self.constraints.union(Constraints::NULLABLE);
        } else {
            self.constraints = self.constraints.union(Constraints::NOT_NULL);
        }
        self
    }

    /// Whether this column participates in the primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.constraints.contains(Constraints::PRIMARY_KEY)
    }

    /// Whether the engine assigns this column's value on insert.
    #[must_use]
    pub const fn is_auto_increment(&self) -> bool {
        self.constraints.contains(Constraints::AUTO_INCREMENT)
    }

    /// Whether this column carries a single-column UNIQUE constraint.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.constraints.contains(Constraints::UNIQUE)
    }

    /// Whether this column accepts NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.constraints.contains(Constraints::NULLABLE)
    }

    /// The column definition fragment for CREATE TABLE.
    ///
    /// Constraint keywords are appended in a fixed order so generated DDL
    /// is deterministic: PRIMARY KEY, AUTOINCREMENT, NOT NULL, UNIQUE.
    #[must_use]
    pub fn ddl(&self) -> String {
        let mut out = format!("{} {}", self.column.quoted(), self.sql_type.sql_name());
        if self.is_primary_key() {
            out.push_str(" PRIMARY KEY");
        }
        if self.is_auto_increment() {
            out.push_str(" AUTOINCREMENT");
        }
        if self.constraints.contains(Constraints::NOT_NULL) {
            out.push_str(" NOT NULL");
        }
        if self.is_unique() {
            out.push_str(" UNIQUE");
        }
        out
    }
}

/// A typed reference to one column of model `M` holding values of type `V`.
///
/// Emitted as associated constants by `#[derive(Model)]` so lookups are
/// checked against the model's actual fields at compile time.
#[derive(Debug)]
pub struct Col<M, V> {
    /// The column name.
    pub name: &'static str,
    _marker: PhantomData<fn() -> (M, V)>,
}

impl<M, V> Col<M, V> {
    /// Create a typed column reference.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }
}

impl<M, V> Clone for Col<M, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, V> Copy for Col<M, V> {}

/// A typed reference to a column declared `unique`.
///
/// Only `#[derive(Model)]` emits these, and only for unique fields, so a
/// unique-keyed lookup over a non-unique column is unrepresentable.
#[derive(Debug)]
pub struct UniqueCol<M, V> {
    /// The column name.
    pub name: &'static str,
    _marker: PhantomData<fn() -> (M, V)>,
}

impl<M, V> UniqueCol<M, V> {
    /// Create a typed unique-column reference.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }
}

impl<M, V> Clone for UniqueCol<M, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, V> Copy for UniqueCol<M, V> {}

impl<M, V> From<UniqueCol<M, V>> for Col<M, V> {
    fn from(unique: UniqueCol<M, V>) -> Self {
        Col::new(unique.name)
    }
}
