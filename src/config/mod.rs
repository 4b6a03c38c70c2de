//! Core configuration (`toolgate.toml`).
//!
//! Every section is optional: a missing file, a missing section, or a
//! missing key falls back to defaults, and a malformed file logs an error
//! and falls back rather than aborting the host.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::entitlement::catalog::FeatureCatalog;
use crate::entitlement::FeatureDescriptor;
use crate::processing::ProcessingStrategy;

/// Strategy used when a stored connection names none.
const DEFAULT_STRATEGY: &str = "platform";

// ─── ProcessingConfig ─────────────────────────────────────────────────────────

/// Processing defaults (`[processing]` in toolgate.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Default strategy wire name: "open-source" | "api" | "hybrid" |
    /// "platform". Default: "platform".
    pub default_strategy: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_strategy: DEFAULT_STRATEGY.to_string(),
        }
    }
}

// ─── ModelsConfig ─────────────────────────────────────────────────────────────

/// Local model overrides (`[models.table]` in toolgate.toml).
///
/// Keys are tool categories, values are model ids; entries merge over the
/// built-in category → model table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub table: HashMap<String, String>,
}

// ─── CatalogConfig ────────────────────────────────────────────────────────────

/// Feature catalog entries (`[[catalog.feature]]` in toolgate.toml).
///
/// Tier values are kept as raw strings; an unrecognized tier fails closed at
/// evaluation time instead of failing deserialization here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub feature: Vec<FeatureDescriptor>,
}

// ─── CoreConfig ───────────────────────────────────────────────────────────────

/// Top-level configuration for the core.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    pub processing: ProcessingConfig,
    pub models: ModelsConfig,
    pub catalog: CatalogConfig,
}

impl CoreConfig {
    /// Load from a TOML file. A missing file yields defaults silently; a
    /// malformed file logs an error and yields defaults.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                warn!(path = %path.display(), "no config file — using defaults");
                return Self::default();
            }
        };
        match toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), err = %e, "failed to parse config — using defaults");
                Self::default()
            }
        }
    }

    /// Strict variant of [`CoreConfig::load`] for hosts that want a
    /// malformed file to be an error rather than a silent fallback.
    pub fn try_load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// The configured default strategy, failing back to `platform` when the
    /// wire name is unrecognized.
    pub fn default_strategy(&self) -> ProcessingStrategy {
        match ProcessingStrategy::parse(&self.processing.default_strategy) {
            Some(strategy) => strategy,
            None => {
                warn!(
                    strategy = %self.processing.default_strategy,
                    "unrecognized default strategy — using platform"
                );
                ProcessingStrategy::Platform
            }
        }
    }

    /// Build the feature catalog: configured descriptors, or the built-in
    /// set when none are configured.
    pub fn build_catalog(&self) -> FeatureCatalog {
        if self.catalog.feature.is_empty() {
            FeatureCatalog::builtin()
        } else {
            FeatureCatalog::from_descriptors(self.catalog.feature.clone())
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
