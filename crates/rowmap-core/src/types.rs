//! SQL storage types and the enumeration mapping trait.

/// The three primitive kinds a column value can be stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    /// 64-bit signed integer storage.
    Integer,
    /// 64-bit floating point storage.
    Real,
    /// UTF-8 text storage.
    Text,
}

impl SqlType {
    /// The DDL keyword for this storage kind.
    #[must_use]
    pub const fn sql_name(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
        }
    }
}

/// An enumeration stored by its canonical symbolic name.
///
/// Implemented via `#[derive(SqlEnum)]`, which maps each variant to its
/// name as TEXT. Parsing is strict: a stored name that matches no variant
/// is a data-corruption signal, reported as
/// [`Error::InvalidEnumValue`](crate::Error::InvalidEnumValue) by the
/// generated [`Column`](crate::Column) implementation.
pub trait SqlEnum: Sized {
    /// The enumeration's type name, for diagnostics.
    const ENUM_NAME: &'static str;

    /// The canonical symbolic name of this value.
    fn as_sql_name(&self) -> &'static str;

    /// Parse a symbolic name back into a value. `None` for unknown names.
    fn from_sql_name(name: &str) -> Option<Self>;

    /// All symbolic names, in declaration order.
    fn variant_names() -> &'static [&'static str];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_names() {
        assert_eq!(SqlType::Integer.sql_name(), "INTEGER");
        assert_eq!(SqlType::Real.sql_name(), "REAL");
        assert_eq!(SqlType::Text.sql_name(), "TEXT");
    }
}
