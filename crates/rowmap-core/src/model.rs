//! Model reflection.

use crate::field::FieldInfo;
use crate::ident::Ident;
use crate::view::FieldView;

/// A record type mapped to exactly one table.
///
/// Implementations come from `#[derive(Model)]`. The central invariant of
/// the whole design: `fields()`, `field_views()`, and `field_views_mut()`
/// present the model's columns in the same canonical order, and that
/// order is used everywhere SQL is generated — the SELECT list, INSERT
/// value list, and row materialization must all agree.
///
/// Models are transient: construct one per query or row, use it, discard
/// it. `Default` supplies the fresh instance row materialization fills in.
pub trait Model: Default {
    /// The table this model maps to.
    const TABLE: Ident;

    /// Static field metadata in canonical column order.
    fn fields() -> &'static [FieldInfo];

    /// Read-incapable views over this instance's fields, in canonical
    /// order. Suitable for binding (insert/update) and DDL projection.
    fn field_views(&self) -> Vec<FieldView<'_>>;

    /// Full views over this instance's fields, in canonical order.
    /// Row materialization requires these.
    fn field_views_mut(&mut self) -> Vec<FieldView<'_>>;

    /// Multi-column uniqueness groups, appended to CREATE TABLE as
    /// `UNIQUE(col, ...)` clauses. Empty by default.
    #[must_use]
    fn unique_groups() -> &'static [&'static [&'static str]] {
        &[]
    }

    /// The first primary-key column, if any is declared.
    #[must_use]
    fn primary_key() -> Option<&'static FieldInfo> {
        Self::fields().iter().find(|f| f.is_primary_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraints;
    use crate::testing::{Bound, MockStatement};
    use crate::types::SqlType;

    // A hand-written implementation of the reflection contract, shaped
    // exactly like `#[derive(Model)]` output.
    #[derive(Debug, Default, PartialEq)]
    struct Ledger {
        id: Option<i64>,
        label: String,
        balance: f64,
    }

    impl Model for Ledger {
        const TABLE: Ident = Ident::new("ledgers");

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: [FieldInfo; 3] = [
                FieldInfo::new("id", "id", SqlType::Integer)
                    .constraints(Constraints::AUTO_INCREMENT)
                    .resolve_nullability(true),
                FieldInfo::new("label", "label", SqlType::Text)
                    .constraints(Constraints::UNIQUE)
                    .resolve_nullability(false),
                FieldInfo::new("balance", "balance", SqlType::Real)
                    .constraints(Constraints::NONE)
                    .resolve_nullability(false),
            ];
            &FIELDS
        }

        fn field_views(&self) -> Vec<FieldView<'_>> {
            let fields = Self::fields();
            vec![
                FieldView::shared(&fields[0], &self.id),
                FieldView::shared(&fields[1], &self.label),
                FieldView::shared(&fields[2], &self.balance),
            ]
        }

        fn field_views_mut(&mut self) -> Vec<FieldView<'_>> {
            let fields = Self::fields();
            vec![
                FieldView::writable(&fields[0], &mut self.id),
                FieldView::writable(&fields[1], &mut self.label),
                FieldView::writable(&fields[2], &mut self.balance),
            ]
        }
    }

    #[test]
    fn test_view_order_matches_field_order() {
        let ledger = Ledger::default();
        let names: Vec<_> = ledger
            .field_views()
            .iter()
            .map(FieldView::column_name)
            .collect();
        let declared: Vec<_> = Ledger::fields().iter().map(|f| f.column.as_str()).collect();
        assert_eq!(names, declared);
        assert_eq!(names, vec!["id", "label", "balance"]);
    }

    #[test]
    fn test_primary_key_lookup() {
        let pk = Ledger::primary_key().expect("ledger has a pk");
        assert_eq!(pk.column.as_str(), "id");
        assert!(pk.is_auto_increment());
    }

    #[test]
    fn test_materialization_through_mutable_views() {
        let stmt = MockStatement::with_row(vec![
            Bound::Int(7),
            Bound::Text("savings".to_string()),
            Bound::Float(250.75),
        ]);

        let mut ledger = Ledger::default();
        {
            let mut views = ledger.field_views_mut();
            for (i, view) in views.iter_mut().enumerate() {
                view.read_from(&stmt, i).unwrap();
            }
        }

        assert_eq!(
            ledger,
            Ledger {
                id: Some(7),
                label: "savings".to_string(),
                balance: 250.75,
            }
        );
    }
}
