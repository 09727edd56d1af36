//! Coordinator backed by the environment's transaction manager.
//!
//! `begin()` starts a transaction only when none is active, and remembers
//! whether it did. Only the starter commits or rolls back; a joiner can at
//! most doom the transaction with `set_rollback_only()`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::lookup::TransactionLookup;
use crate::resolver::LookupResolver;
use crate::tx::UserTransaction;
use crate::{Error, Result};
use super::TransactionCoordinator;

// ============================================================================
// CoordinatorState
// ============================================================================

/// The part of an [`AmbientCoordinator`] that may leave the process.
///
/// The resolved lookup is process-local and is never part of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorState {
    pub owns_transaction: bool,
}

// ============================================================================
// AmbientCoordinator
// ============================================================================

pub struct AmbientCoordinator {
    resolver: Arc<LookupResolver>,
    /// Resolved on first use, at most once per instance.
    lookup: Mutex<Option<Arc<dyn TransactionLookup>>>,
    owns_transaction: AtomicBool,
}

impl AmbientCoordinator {
    pub fn new(resolver: Arc<LookupResolver>) -> Self {
        Self::restore(CoordinatorState::default(), resolver)
    }

    /// Rebuild a coordinator from a saved state. The lookup is resolved
    /// again on first use.
    pub fn restore(state: CoordinatorState, resolver: Arc<LookupResolver>) -> Self {
        Self {
            resolver,
            lookup: Mutex::new(None),
            owns_transaction: AtomicBool::new(state.owns_transaction),
        }
    }

    pub fn state(&self) -> CoordinatorState {
        CoordinatorState { owns_transaction: self.owns_transaction() }
    }

    /// Whether the lookup strategy has been resolved yet.
    pub fn is_lookup_resolved(&self) -> bool {
        self.lookup.lock().is_some()
    }

    fn cached_lookup(&self) -> Arc<dyn TransactionLookup> {
        let mut slot = self.lookup.lock();
        Arc::clone(slot.get_or_insert_with(|| self.resolver.resolve()))
    }

    fn user_transaction(&self) -> Result<Arc<dyn UserTransaction>> {
        self.cached_lookup().lookup()
    }

    fn try_commit(&self) -> Result<()> {
        let ut = self.user_transaction()?;
        ut.commit().map_err(Error::Finalization)
    }

    fn try_rollback(&self) -> Result<()> {
        let ut = self.user_transaction()?;
        if self.owns_transaction() {
            ut.rollback().map_err(Error::Finalization)
        } else {
            ut.set_rollback_only().map_err(Error::Finalization)
        }
    }
}

impl TransactionCoordinator for AmbientCoordinator {
    fn create(&self) -> Box<dyn TransactionCoordinator> {
        Box::new(AmbientCoordinator::new(Arc::clone(&self.resolver)))
    }

    fn begin(&self) -> Result<()> {
        let ut = self.user_transaction()?;
        let status = ut.status()?;
        if status.is_active() {
            tracing::debug!("joining active ambient transaction");
            return Ok(());
        }
        ut.begin()?;
        self.owns_transaction.store(true, Ordering::SeqCst);
        tracing::debug!(?status, "started ambient transaction");
        Ok(())
    }

    fn commit(&self) {
        if !self.owns_transaction() {
            tracing::trace!("commit left to the transaction's owner");
            return;
        }
        if let Err(e) = self.try_commit() {
            tracing::warn!(error = %e, "cannot commit external transaction");
        }
    }

    fn rollback(&self) {
        if let Err(e) = self.try_rollback() {
            tracing::warn!(error = %e, "cannot roll back external transaction");
        }
    }

    fn owns_transaction(&self) -> bool {
        self.owns_transaction.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for AmbientCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientCoordinator")
            .field("owns_transaction", &self.owns_transaction())
            .field("lookup_resolved", &self.is_lookup_resolved())
            .finish()
    }
}
