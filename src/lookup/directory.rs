//! Directory-backed lookup, the default strategy.

use std::sync::Arc;

use crate::config::LookupConfig;
use crate::tx::UserTransaction;
use crate::Result;
use super::{Directory, DirectoryContext, NamingError, TransactionLookup};

// ============================================================================
// DirectoryLookup
// ============================================================================

/// Looks the manager handle up by name in a [`Directory`].
///
/// Each call opens its own context and closes it before returning, on the
/// success path and on every failure path.
pub struct DirectoryLookup {
    directory: Arc<dyn Directory>,
    name: String,
}

impl DirectoryLookup {
    pub fn new(directory: Arc<dyn Directory>, name: impl Into<String>) -> Self {
        Self { directory, name: name.into() }
    }

    /// Use the lookup name from `config`.
    pub fn from_config(directory: Arc<dyn Directory>, config: &LookupConfig) -> Self {
        Self::new(directory, config.lookup_name.clone())
    }

    /// The directory name this lookup resolves.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TransactionLookup for DirectoryLookup {
    fn lookup(&self) -> Result<Arc<dyn UserTransaction>> {
        let context = ScopedContext::open(self.directory.as_ref())?;
        // On failure the context is closed by its drop.
        let handle = context.lookup(&self.name)?;
        context.close()?;
        Ok(handle)
    }

    fn describe(&self) -> &str {
        "directory"
    }
}

// ============================================================================
// ScopedContext
// ============================================================================

/// Closes the wrapped context when dropped, unless closed explicitly.
struct ScopedContext {
    inner: Box<dyn DirectoryContext>,
    closed: bool,
}

impl ScopedContext {
    fn open(directory: &dyn Directory) -> std::result::Result<Self, NamingError> {
        let inner = directory.open()?;
        tracing::trace!("directory context opened");
        Ok(Self { inner, closed: false })
    }

    fn lookup(&self, name: &str) -> std::result::Result<Arc<dyn UserTransaction>, NamingError> {
        self.inner.lookup(name)
    }

    fn close(mut self) -> std::result::Result<(), NamingError> {
        self.closed = true;
        tracing::trace!("directory context closed");
        self.inner.close()
    }
}

impl Drop for ScopedContext {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.inner.close() {
            tracing::debug!(error = %e, "failed to close directory context");
        }
    }
}
