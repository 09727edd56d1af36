//! Selection of the active [`TransactionLookup`].
//!
//! Lookups are contributed through an [`ExtensionDiscovery`] facility. The
//! first discovered lookup wins; with none registered the resolver hands out
//! its default. The resolver is built once at startup and shared by `Arc`
//! with every coordinator.

use std::sync::Arc;
use parking_lot::RwLock;

use crate::config::LookupConfig;
use crate::lookup::{Directory, DirectoryLookup, TransactionLookup};

// ============================================================================
// Extension discovery
// ============================================================================

/// Pluggable source of registered lookup implementations.
pub trait ExtensionDiscovery: Send + Sync {
    /// All registered lookups, in priority order. May be empty.
    fn discover(&self) -> Vec<Arc<dyn TransactionLookup>>;
}

/// Discovery facility with nothing registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtensions;

impl ExtensionDiscovery for NoExtensions {
    fn discover(&self) -> Vec<Arc<dyn TransactionLookup>> {
        Vec::new()
    }
}

/// In-process registry of lookup extensions. Registration order is
/// priority order.
#[derive(Default)]
pub struct LookupRegistry {
    entries: RwLock<Vec<Arc<dyn TransactionLookup>>>,
}

impl LookupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, lookup: Arc<dyn TransactionLookup>) {
        tracing::debug!(lookup = lookup.describe(), "registered transaction lookup");
        self.entries.write().push(lookup);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ExtensionDiscovery for LookupRegistry {
    fn discover(&self) -> Vec<Arc<dyn TransactionLookup>> {
        self.entries.read().clone()
    }
}

// ============================================================================
// LookupResolver
// ============================================================================

/// Picks the lookup strategy: first registered extension, else the default.
pub struct LookupResolver {
    discovery: Arc<dyn ExtensionDiscovery>,
    fallback: Arc<dyn TransactionLookup>,
}

impl LookupResolver {
    pub fn new(discovery: Arc<dyn ExtensionDiscovery>, fallback: Arc<dyn TransactionLookup>) -> Self {
        Self { discovery, fallback }
    }

    /// Resolver whose default is a [`DirectoryLookup`] of the configured name.
    pub fn with_directory(
        discovery: Arc<dyn ExtensionDiscovery>,
        directory: Arc<dyn Directory>,
        config: &LookupConfig,
    ) -> Self {
        Self::new(discovery, Arc::new(DirectoryLookup::from_config(directory, config)))
    }

    /// Find the active lookup. Never fails: no extension simply means the
    /// default is used.
    pub fn resolve(&self) -> Arc<dyn TransactionLookup> {
        match self.discovery.discover().into_iter().next() {
            Some(lookup) => {
                tracing::debug!(lookup = lookup.describe(), "using registered transaction lookup");
                lookup
            }
            None => {
                tracing::debug!(
                    lookup = self.fallback.describe(),
                    "no transaction lookup registered, using default"
                );
                Arc::clone(&self.fallback)
            }
        }
    }
}
