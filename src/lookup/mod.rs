//! Resolution of the transaction manager handle.
//!
//! A [`TransactionLookup`] turns "some registry somewhere" into an
//! `Arc<dyn UserTransaction>`. The default implementation,
//! [`DirectoryLookup`], asks a naming/directory service for a configured name.
//! Other implementations can be plugged in through the
//! [`resolver`](crate::resolver) module.

mod directory;

use std::sync::Arc;

use crate::tx::UserTransaction;
use crate::Result;

pub use directory::DirectoryLookup;

/// Resolves a handle to the ambient transaction manager.
///
/// Implementations hold no per-call state; a lookup may be invoked any
/// number of times and from any thread.
pub trait TransactionLookup: Send + Sync {
    /// Resolve the manager handle.
    fn lookup(&self) -> Result<Arc<dyn UserTransaction>>;

    /// Human-readable name, used in logs.
    fn describe(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Failures raised by a naming/directory service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("name not found: {0}")]
    NameNotFound(String),

    #[error("directory service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("directory communication failure: {0}")]
    Communication(String),

    #[error("naming failure: {0}")]
    Other(String),
}

/// Naming/directory service able to open lookup contexts.
pub trait Directory: Send + Sync {
    fn open(&self) -> std::result::Result<Box<dyn DirectoryContext>, NamingError>;
}

/// An open connection to a [`Directory`]. Must be closed once done.
pub trait DirectoryContext {
    fn lookup(&self, name: &str) -> std::result::Result<Arc<dyn UserTransaction>, NamingError>;

    fn close(&mut self) -> std::result::Result<(), NamingError>;
}
