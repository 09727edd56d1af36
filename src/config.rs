//! Process-wide configuration.

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::coordinator::{AmbientCoordinator, NoopCoordinator, TransactionCoordinator};
use crate::resolver::LookupResolver;
use crate::{Error, Result};

/// Directory name the default lookup resolves when nothing overrides it.
pub const DEFAULT_LOOKUP_NAME: &str = "java:comp/UserTransaction";

/// Environment variable overriding [`LookupConfig::lookup_name`].
pub const LOOKUP_NAME_ENV: &str = "AMBIENT_TX_LOOKUP_NAME";

/// Environment variable selecting [`LookupConfig::coordinator`].
pub const COORDINATOR_ENV: &str = "AMBIENT_TX_COORDINATOR";

/// Which coordinator variant to hand out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatorKind {
    #[default]
    Ambient,
    Noop,
}

impl std::str::FromStr for CoordinatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ambient" => Ok(CoordinatorKind::Ambient),
            "noop" => Ok(CoordinatorKind::Noop),
            other => Err(Error::Config(format!("unknown coordinator kind '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub lookup_name: String,
    pub coordinator: CoordinatorKind,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            lookup_name: DEFAULT_LOOKUP_NAME.to_string(),
            coordinator: CoordinatorKind::default(),
        }
    }
}

impl LookupConfig {
    /// Defaults, overridden by [`LOOKUP_NAME_ENV`] and [`COORDINATOR_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(name) = var(LOOKUP_NAME_ENV).filter(|n| !n.trim().is_empty()) {
            config.lookup_name = name;
        }
        if let Some(kind) = var(COORDINATOR_ENV) {
            config.coordinator = kind.parse()?;
        }
        Ok(config)
    }

    /// Coordinator of the configured kind.
    pub fn build_coordinator(&self, resolver: Arc<LookupResolver>) -> Box<dyn TransactionCoordinator> {
        match self.coordinator {
            CoordinatorKind::Ambient => Box::new(AmbientCoordinator::new(resolver)),
            CoordinatorKind::Noop => Box::new(NoopCoordinator::new()),
        }
    }
}
