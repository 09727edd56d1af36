//! # Transaction Coordinator
//!
//! The demarcation contract between a data-access layer and whatever
//! manages the ambient transaction. Callers `begin()`, do their work, then
//! `commit()` or `rollback()`; the variant decides what that means.
//!
//! ## Implementations
//!
//! | Coordinator | Module | Description |
//! |-------------|--------|-------------|
//! | `AmbientCoordinator` | `ambient` | Drives or joins the environment's transaction manager |
//! | `NoopCoordinator` | `noop` | Satisfies the contract without touching anything |
//!
//! ## Failure policy
//!
//! `begin()` propagates every failure: the caller must not go on believing a
//! transaction is active. `commit()` and `rollback()` never fail observably;
//! problems are logged at warning level, since a joined transaction's fate
//! belongs to whoever started it.

pub mod ambient;
pub mod noop;

use crate::Result;

pub use ambient::{AmbientCoordinator, CoordinatorState};
pub use noop::NoopCoordinator;

/// Polymorphic begin/commit/rollback contract.
///
/// An instance covers one transaction attempt and is discarded afterwards.
/// Use [`create`](TransactionCoordinator::create) to get a fresh one.
pub trait TransactionCoordinator: Send + Sync + std::fmt::Debug {
    /// A new, independent instance of the same variant that owns nothing
    /// and has resolved nothing.
    fn create(&self) -> Box<dyn TransactionCoordinator>;

    /// Start a transaction, or join the one already active.
    fn begin(&self) -> Result<()>;

    /// Commit, if this instance started the transaction. Never fails.
    fn commit(&self);

    /// Roll back an owned transaction, or mark a joined one rollback-only.
    /// Never fails.
    fn rollback(&self);

    /// Whether `begin()` started the transaction rather than joining one.
    fn owns_transaction(&self) -> bool;
}
