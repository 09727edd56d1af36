//! # ambient-tx — External Transaction Demarcation
//!
//! Lets a data-access layer take part in a transaction owned by the
//! surrounding environment (a JTA-style `UserTransaction`) without knowing
//! which transaction technology is in play.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `TransactionCoordinator` is the contract; variants are plain structs
//! 2. **Starter finishes**: only the coordinator that began a transaction commits it
//! 3. **Asymmetric failures**: `begin()` propagates, `commit()`/`rollback()` log and carry on
//! 4. **Lazy resolution**: the manager lookup is resolved once per coordinator, on first use
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ambient_tx::{LookupConfig, LookupRegistry, LookupResolver, Directory};
//!
//! # fn example(directory: Arc<dyn Directory>) -> ambient_tx::Result<()> {
//! let config = LookupConfig::from_env()?;
//! let registry = Arc::new(LookupRegistry::new());
//! let resolver = Arc::new(LookupResolver::with_directory(registry, directory, &config));
//!
//! let tx = config.build_coordinator(resolver);
//! tx.begin()?;
//! // ... enlist resources, do work ...
//! tx.commit();
//! # Ok(())
//! # }
//! ```
//!
//! ## Coordinators
//!
//! | Coordinator | Config | Description |
//! |-------------|--------|-------------|
//! | `AmbientCoordinator` | `ambient` (default) | Starts or joins the environment's transaction |
//! | `NoopCoordinator` | `noop` | Inert; same contract, no participation |

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod coordinator;
pub mod lookup;
pub mod resolver;
pub mod tx;

// ============================================================================
// Re-exports: Coordinators
// ============================================================================

pub use coordinator::{
    TransactionCoordinator, AmbientCoordinator, NoopCoordinator, CoordinatorState,
};

// ============================================================================
// Re-exports: Lookup & resolution
// ============================================================================

pub use lookup::{
    TransactionLookup, DirectoryLookup, Directory, DirectoryContext, NamingError,
};
pub use resolver::{LookupResolver, LookupRegistry, ExtensionDiscovery, NoExtensions};

// ============================================================================
// Re-exports: Manager contract & config
// ============================================================================

pub use tx::{UserTransaction, TxStatus, ManagerError};
pub use config::{LookupConfig, CoordinatorKind, DEFAULT_LOOKUP_NAME};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manager could not report its status or start a transaction.
    #[error("Transaction state error: {0}")]
    TransactionState(#[from] ManagerError),

    /// The manager handle could not be resolved.
    #[error("Cannot resolve transaction manager handle: {0}")]
    HandleResolution(#[from] NamingError),

    /// Commit or rollback failed. Only ever logged, never returned to callers
    /// of `commit()`/`rollback()`.
    #[error("Transaction finalization failed: {0}")]
    Finalization(ManagerError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
