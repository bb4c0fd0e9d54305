//! Engine checkpoints
//!
//! A snapshot captures the raw register and any pending Gaussian, which is
//! everything needed to resume a stream exactly where it stopped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Register {state:#x} does not fit in 48 bits")]
    StateOutOfRange { state: u64 },

    #[error("Snapshot of a {found} engine cannot restore a {expected} engine")]
    VariantMismatch { expected: String, found: String },

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomSnapshot {
    /// Update strategy of the engine that produced the snapshot
    pub variant: String,

    /// 48-bit LCG register
    pub state: u64,

    /// Second value of the last polar pair, if not yet returned
    #[serde(default)]
    pub cached_gaussian: Option<f64>,
}

impl RandomSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
