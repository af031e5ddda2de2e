//! Scoped transactions with deterministic rollback-on-abandon.

use crate::connection::Connection;
use crate::error::Result;

/// How a transaction acquires its locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionBehavior {
    /// Locks are acquired lazily, on first use.
    #[default]
    Deferred,
    /// A reserved (write) lock is taken up front.
    Immediate,
    /// An exclusive lock is taken up front.
    Exclusive,
}

impl TransactionBehavior {
    /// The statement that opens a transaction with this behavior.
    #[must_use]
    pub const fn begin_sql(&self) -> &'static str {
        match self {
            TransactionBehavior::Deferred => "BEGIN",
            TransactionBehavior::Immediate => "BEGIN IMMEDIATE",
            TransactionBehavior::Exclusive => "BEGIN EXCLUSIVE",
        }
    }
}

/// Lifecycle state of a [`Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// BEGIN has been issued; COMMIT/ROLLBACK has not.
    Active,
    /// Terminal: COMMIT succeeded.
    Committed,
    /// Terminal: ROLLBACK was issued (explicitly or on drop).
    RolledBack,
}

/// A scoped unit of work.
///
/// Becomes inactive exactly once: by [`commit`](Self::commit), by
/// [`rollback`](Self::rollback), or — if still active — by the implicit
/// rollback performed on drop. Commit or rollback after the transaction
/// is inactive are no-ops, never errors.
///
/// The transaction exclusively owns its connection's "in transaction"
/// state for its lifetime; opening a second transaction on the same
/// connection while one is active is a caller error this layer does not
/// guard against.
pub struct Transaction<'c, C: Connection + ?Sized> {
    conn: &'c C,
    state: TransactionState,
}

impl<'c, C: Connection + ?Sized> Transaction<'c, C> {
    /// Open a deferred transaction.
    pub fn begin(conn: &'c C) -> Result<Self> {
        Self::begin_with(conn, TransactionBehavior::Deferred)
    }

    /// Open a transaction that takes its write lock up front.
    pub fn begin_immediate(conn: &'c C) -> Result<Self> {
        Self::begin_with(conn, TransactionBehavior::Immediate)
    }

    /// Open a transaction with an explicit behavior.
    pub fn begin_with(conn: &'c C, behavior: TransactionBehavior) -> Result<Self> {
        conn.execute(behavior.begin_sql())?;
        tracing::debug!(behavior = ?behavior, "transaction opened");
        Ok(Self {
            conn,
            state: TransactionState::Active,
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Whether the transaction is still active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Commit the unit of work. No-op once inactive.
    pub fn commit(&mut self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.conn.execute("COMMIT")?;
        self.state = TransactionState::Committed;
        tracing::debug!("transaction committed");
        Ok(())
    }

    /// Roll the unit of work back. No-op once inactive.
    pub fn rollback(&mut self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.conn.execute("ROLLBACK")?;
        self.state = TransactionState::RolledBack;
        tracing::debug!("transaction rolled back");
        Ok(())
    }
}

impl<C: Connection + ?Sized> Drop for Transaction<'_, C> {
    fn drop(&mut self) {
        if !self.is_active() {
            return;
        }
        // An error here cannot be acted on safely; log and move on.
        if let Err(err) = self.conn.execute("ROLLBACK") {
            tracing::warn!(error = %err, "implicit rollback failed");
        } else {
            tracing::debug!("transaction rolled back on drop");
        }
        self.state = TransactionState::RolledBack;
    }
}
