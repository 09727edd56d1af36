//! External transaction manager contract.
//!
//! The surrounding environment owns the transaction; this crate only talks
//! to it through [`UserTransaction`]. Nothing here implements a manager.

mod status;

pub use status::TxStatus;

/// Failures reported by an external transaction manager.
///
/// The variants follow the failure classes a JTA-style `UserTransaction`
/// can raise. Implementations pick whichever fits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    #[error("illegal transaction state: {0}")]
    IllegalState(String),

    #[error("operation not supported: {0}")]
    NotSupported(String),

    #[error("transaction system failure: {0}")]
    System(String),

    #[error("transaction rolled back: {0}")]
    RolledBack(String),

    #[error("heuristic mixed outcome: {0}")]
    HeuristicMixed(String),

    #[error("heuristic rollback: {0}")]
    HeuristicRollback(String),

    #[error("not permitted: {0}")]
    Security(String),
}

/// Handle to the ambient transaction manager.
///
/// Obtained through a [`TransactionLookup`](crate::lookup::TransactionLookup)
/// and shared as `Arc<dyn UserTransaction>`. Every call may fail with an
/// implementation-defined [`ManagerError`].
pub trait UserTransaction: Send + Sync {
    /// Status of the transaction associated with the calling thread.
    fn status(&self) -> Result<TxStatus, ManagerError>;

    /// Start a new transaction.
    fn begin(&self) -> Result<(), ManagerError>;

    /// Complete the current transaction.
    fn commit(&self) -> Result<(), ManagerError>;

    /// Roll back the current transaction.
    fn rollback(&self) -> Result<(), ManagerError>;

    /// Doom the current transaction: whoever completes it must roll back.
    fn set_rollback_only(&self) -> Result<(), ManagerError>;
}
