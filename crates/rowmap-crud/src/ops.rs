//! The CRUD engine operations.
//!
//! All operations are synchronous and block until the engine completes.
//! Structural preconditions (a missing primary key) are checked before
//! any SQL is issued; engine failures are wrapped with the offending SQL
//! text attached.

use rowmap_core::{
    Col, Column, Connection, Error, FieldInfo, Model, Result, Statement, Step, UniqueCol,
};

use crate::sql;

/// The first declared primary-key column, or `NoPrimaryKey`.
fn primary_key<M: Model>() -> Result<&'static FieldInfo> {
    M::primary_key().ok_or(Error::NoPrimaryKey {
        table: M::TABLE.as_str(),
    })
}

/// Step a DML statement to completion, discarding any rows.
fn run_to_completion(stmt: &mut dyn Statement, sql: &str) -> Result<()> {
    loop {
        match stmt.step().map_err(|e| e.with_sql(sql))? {
            Step::Done => return Ok(()),
            Step::Row => {}
        }
    }
}

/// Materialize the statement's current row into a fresh model instance.
///
/// Column index `i` is read by field view `i`; both run in the model's
/// canonical field order, matching the generated SELECT list.
fn read_row<M: Model>(stmt: &dyn Statement, sql: &str) -> Result<M> {
    let mut row = M::default();
    {
        let mut views = row.field_views_mut();
        for (i, view) in views.iter_mut().enumerate() {
            view.read_from(stmt, i).map_err(|e| e.with_sql(sql))?;
        }
    }
    Ok(row)
}

/// Create the model's table if it does not already exist.
pub fn create_table<M, C>(conn: &C) -> Result<()>
where
    M: Model,
    C: Connection + ?Sized,
{
    let sql = sql::create_table_sql::<M>();
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "creating table");
    conn.execute(&sql).map_err(|e| e.with_sql(&sql))
}

/// Insert one row and return the engine-assigned identity.
///
/// Auto-increment columns are never part of the column list or the bound
/// values; everything else binds in canonical order.
pub fn insert<M, C>(conn: &C, row: &M) -> Result<i64>
where
    M: Model,
    C: Connection + ?Sized,
{
    let sql = sql::insert_sql::<M>();
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "inserting row");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.with_sql(&sql))?;
    let views = row.field_views();
    let mut index = 1;
    for view in views.iter().filter(|v| !v.is_auto_increment()) {
        view.bind(stmt.as_mut(), index).map_err(|e| e.with_sql(&sql))?;
        index += 1;
    }
    run_to_completion(stmt.as_mut(), &sql)?;
    drop(stmt);

    let affected = conn.affected_rows();
    if affected != 1 {
        return Err(Error::InsertFailed {
            table: M::TABLE.as_str(),
            count: affected,
        });
    }
    Ok(conn.last_insert_id())
}

/// Update the row identified by the instance's primary key value(s).
///
/// The affected-row count is checked unconditionally: 0 rows is
/// `NoRowsUpdated`, more than 1 is `MultipleRowsUpdated`. Either outcome
/// indicates a key-uniqueness or data-integrity problem and is never
/// silently accepted.
pub fn update<M, C>(conn: &C, row: &M) -> Result<()>
where
    M: Model,
    C: Connection + ?Sized,
{
    primary_key::<M>()?;

    let sql = sql::update_sql::<M>();
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "updating row");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.with_sql(&sql))?;
    let views = row.field_views();
    let mut index = 1;
    // Non-PK values first, then PK values, matching the clause order.
    for view in views.iter().filter(|v| !v.is_primary_key()) {
        view.bind(stmt.as_mut(), index).map_err(|e| e.with_sql(&sql))?;
        index += 1;
    }
    for view in views.iter().filter(|v| v.is_primary_key()) {
        view.bind(stmt.as_mut(), index).map_err(|e| e.with_sql(&sql))?;
        index += 1;
    }
    run_to_completion(stmt.as_mut(), &sql)?;
    drop(stmt);

    match conn.affected_rows() {
        1 => Ok(()),
        0 => Err(Error::NoRowsUpdated {
            table: M::TABLE.as_str(),
        }),
        count => Err(Error::MultipleRowsUpdated {
            table: M::TABLE.as_str(),
            count,
        }),
    }
}

/// Point lookup by primary key. Zero rows is a normal outcome (`None`).
pub fn get_by_pk<M, C, K>(conn: &C, key: &K) -> Result<Option<M>>
where
    M: Model,
    C: Connection + ?Sized,
    K: Column,
{
    let pk = primary_key::<M>()?;
    let sql = sql::select_by_column_sql::<M>(pk.column.as_str());
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "point lookup");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.with_sql(&sql))?;
    key.bind(stmt.as_mut(), 1).map_err(|e| e.with_sql(&sql))?;
    match stmt.step().map_err(|e| e.with_sql(&sql))? {
        Step::Row => read_row::<M>(stmt.as_ref(), &sql).map(Some),
        Step::Done => Ok(None),
    }
}

/// Lookup by a column declared `unique`.
///
/// A unique lookup is expected to resolve, so zero rows is reported as
/// `NotFound` rather than an empty optional. Using a non-unique column
/// here is unrepresentable: only unique fields get a [`UniqueCol`].
pub fn get_by_unique<M, C, V>(conn: &C, column: UniqueCol<M, V>, value: &V) -> Result<M>
where
    M: Model,
    C: Connection + ?Sized,
    V: Column,
{
    let sql = sql::select_by_column_sql::<M>(column.name);
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "unique lookup");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.with_sql(&sql))?;
    value.bind(stmt.as_mut(), 1).map_err(|e| e.with_sql(&sql))?;
    match stmt.step().map_err(|e| e.with_sql(&sql))? {
        Step::Row => read_row::<M>(stmt.as_ref(), &sql),
        Step::Done => Err(Error::NotFound {
            table: M::TABLE.as_str(),
            column: column.name,
        }),
    }
}

/// All rows whose `column` equals `value`, in the engine's natural order.
pub fn get_by_field<M, C, V>(
    conn: &C,
    column: impl Into<Col<M, V>>,
    value: &V,
) -> Result<Vec<M>>
where
    M: Model,
    C: Connection + ?Sized,
    V: Column,
{
    let column = column.into();
    let sql = sql::select_by_column_sql::<M>(column.name);
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "field scan");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.with_sql(&sql))?;
    value.bind(stmt.as_mut(), 1).map_err(|e| e.with_sql(&sql))?;

    let mut rows = Vec::new();
    while let Step::Row = stmt.step().map_err(|e| e.with_sql(&sql))? {
        rows.push(read_row::<M>(stmt.as_ref(), &sql)?);
    }
    Ok(rows)
}

/// Every row of the table, in the engine's natural order.
pub fn get_all<M, C>(conn: &C) -> Result<Vec<M>>
where
    M: Model,
    C: Connection + ?Sized,
{
    let sql = sql::select_all_sql::<M>();
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "full scan");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.with_sql(&sql))?;
    let mut rows = Vec::new();
    while let Step::Row = stmt.step().map_err(|e| e.with_sql(&sql))? {
        rows.push(read_row::<M>(stmt.as_ref(), &sql)?);
    }
    Ok(rows)
}

/// Delete the row matching the primary key value.
///
/// Deleting a nonexistent key is not a failure; no row count is checked.
pub fn delete_by_pk<M, C, K>(conn: &C, key: &K) -> Result<()>
where
    M: Model,
    C: Connection + ?Sized,
    K: Column,
{
    let pk = primary_key::<M>()?;
    let sql = sql::delete_sql::<M>(pk.column.as_str());
    tracing::debug!(table = M::TABLE.as_str(), sql = %sql, "deleting row");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.with_sql(&sql))?;
    key.bind(stmt.as_mut(), 1).map_err(|e| e.with_sql(&sql))?;
    run_to_completion(stmt.as_mut(), &sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::{Constraints, FieldView, Ident, SqlType};

    // A model that (incorrectly) declares no primary key.
    #[derive(Debug, Default)]
    struct Note {
        body: String,
    }

    impl Model for Note {
        const TABLE: Ident = Ident::new("notes");

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: [FieldInfo; 1] = [FieldInfo::new("body", "body", SqlType::Text)
                .constraints(Constraints::NONE)
                .resolve_nullability(false)];
            &FIELDS
        }

        fn field_views(&self) -> Vec<FieldView<'_>> {
            vec![FieldView::shared(&Self::fields()[0], &self.body)]
        }

        fn field_views_mut(&mut self) -> Vec<FieldView<'_>> {
            vec![FieldView::writable(&Self::fields()[0], &mut self.body)]
        }
    }

    // Proves an operation never reached the engine: every method panics.
    struct UnreachableConnection;

    impl Connection for UnreachableConnection {
        fn execute(&self, sql: &str) -> Result<()> {
            panic!("engine contacted with: {sql}");
        }

        fn prepare(&self, sql: &str) -> Result<Box<dyn Statement + '_>> {
            panic!("engine contacted with: {sql}");
        }

        fn last_insert_id(&self) -> i64 {
            panic!("engine contacted");
        }

        fn affected_rows(&self) -> u64 {
            panic!("engine contacted");
        }
    }

    #[test]
    fn test_update_without_pk_never_contacts_engine() {
        let conn = UnreachableConnection;
        let note = Note {
            body: "orphan".to_string(),
        };
        let err = update(&conn, &note).unwrap_err();
        assert!(matches!(err, Error::NoPrimaryKey { table: "notes" }));
    }

    #[test]
    fn test_delete_without_pk_never_contacts_engine() {
        let conn = UnreachableConnection;
        let err = delete_by_pk::<Note, _, i64>(&conn, &1).unwrap_err();
        assert!(matches!(err, Error::NoPrimaryKey { table: "notes" }));
    }

    #[test]
    fn test_get_by_pk_without_pk_never_contacts_engine() {
        let conn = UnreachableConnection;
        let err = get_by_pk::<Note, _, i64>(&conn, &1).unwrap_err();
        assert!(matches!(err, Error::NoPrimaryKey { table: "notes" }));
    }
}
