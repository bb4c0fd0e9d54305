//! Engine configuration
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid config:
//! a single-threaded engine with a process-unique seed and no misuse
//! detection.

use crate::rng::seed::SeedUniquifier;
use crate::rng::{CompareAndSwap, LegacyRandom, StateCell, Unsynchronized};
use crate::threading::ConcurrencyGuard;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Misuse detection only applies to single-threaded engines")]
    DetectionOnThreadSafeEngine,

    #[error("Guard name must not be empty when misuse detection is enabled")]
    EmptyGuardName,

    #[error("Config asks for a {configured} engine, but a {requested} engine was requested")]
    VariantMismatch {
        configured: &'static str,
        requested: &'static str,
    },
}

/// Which register update strategy to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineVariant {
    #[default]
    SingleThreaded,
    ThreadSafe,
}

impl EngineVariant {
    /// Name shared with [`StateCell::NAME`] and snapshot `variant` fields.
    pub fn name(self) -> &'static str {
        match self {
            EngineVariant::SingleThreaded => Unsynchronized::NAME,
            EngineVariant::ThreadSafe => CompareAndSwap::NAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed; `None` draws one from the uniquifier
    pub seed: Option<i64>,

    pub variant: EngineVariant,

    /// Wrap engine access in a [`ConcurrencyGuard`]
    pub detect_threading: bool,

    /// Resource name reported by the guard
    pub guard_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            variant: EngineVariant::SingleThreaded,
            detect_threading: false,
            guard_name: "LegacyRandom".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.detect_threading {
            return Ok(());
        }
        if self.variant == EngineVariant::ThreadSafe {
            return Err(ConfigError::DetectionOnThreadSafeEngine);
        }
        if self.guard_name.trim().is_empty() {
            return Err(ConfigError::EmptyGuardName);
        }
        Ok(())
    }

    /// The configured seed, or a fresh one from `uniquifier`.
    pub fn resolve_seed(&self, uniquifier: &SeedUniquifier) -> i64 {
        self.seed.unwrap_or_else(|| uniquifier.next_seed())
    }

    /// Builds an engine with strategy `S` from this config's seed.
    ///
    /// Callers dispatch on [`EngineConfig::variant`] to pick `S`.
    ///
    /// # Errors
    /// [`ConfigError::VariantMismatch`] if `S` is not the configured variant.
    /// No seed is drawn in that case.
    pub fn build<S: StateCell>(
        &self,
        uniquifier: &SeedUniquifier,
    ) -> Result<LegacyRandom<S>, ConfigError> {
        if self.variant.name() != S::NAME {
            return Err(ConfigError::VariantMismatch {
                configured: self.variant.name(),
                requested: S::NAME,
            });
        }
        let seed = self.resolve_seed(uniquifier);
        tracing::debug!(seed, variant = S::NAME, "building engine from config");
        Ok(LegacyRandom::new(seed))
    }

    /// Guard to wrap engine access in, when detection is enabled.
    pub fn guard(&self) -> Option<ConcurrencyGuard> {
        self.detect_threading
            .then(|| ConcurrencyGuard::new(self.guard_name.clone()))
    }
}
