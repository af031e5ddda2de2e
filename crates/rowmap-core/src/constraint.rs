//! Column constraint flags.

use std::fmt;
use std::ops::BitOr;

/// A set of column constraints combined as flags.
///
/// The vocabulary is closed: primary key, auto-increment, unique,
/// not-null, and nullable. [`Constraints::AUTO_INCREMENT`] carries the
/// primary-key bit, so auto-increment implies primary key by
/// construction and the pair can never be separated.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Constraints(u8);

impl Constraints {
    /// No constraints.
    pub const NONE: Self = Self(0);
    /// Column participates in the primary key.
    pub const PRIMARY_KEY: Self = Self(0b0000_0001);
    /// Engine-assigned value on insert. Includes `PRIMARY_KEY`.
    pub const AUTO_INCREMENT: Self = Self(0b0000_0011);
    /// Single-column uniqueness.
    pub const UNIQUE: Self = Self(0b0000_0100);
    /// Column rejects NULL.
    pub const NOT_NULL: Self = Self(0b0000_1000);
    /// Column accepts NULL. Derived from an `Option` value type when
    /// `NOT_NULL` is absent.
    pub const NULLABLE: Self = Self(0b0001_0000);

    /// Combine two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every flag in `other` is present in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no flags are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Constraints {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Self::PRIMARY_KEY) {
            set.entry(&"PrimaryKey");
        }
        if self.contains(Self::AUTO_INCREMENT) {
            set.entry(&"AutoIncrement");
        }
        if self.contains(Self::UNIQUE) {
            set.entry(&"Unique");
        }
        if self.contains(Self::NOT_NULL) {
            set.entry(&"NotNull");
        }
        if self.contains(Self::NULLABLE) {
            set.entry(&"Nullable");
        }
        set.finish()
    }
}
