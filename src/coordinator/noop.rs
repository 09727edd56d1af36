//! Inert coordinator for when no external participation is wanted.

use serde::{Deserialize, Serialize};

use crate::Result;
use super::TransactionCoordinator;

/// Satisfies [`TransactionCoordinator`] without doing anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoopCoordinator;

impl NoopCoordinator {
    pub fn new() -> Self {
        Self
    }
}

impl TransactionCoordinator for NoopCoordinator {
    fn create(&self) -> Box<dyn TransactionCoordinator> {
        Box::new(NoopCoordinator)
    }

    fn begin(&self) -> Result<()> {
        Ok(())
    }

    fn commit(&self) {}

    fn rollback(&self) {}

    fn owns_transaction(&self) -> bool {
        false
    }
}
