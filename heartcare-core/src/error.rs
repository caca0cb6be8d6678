//! Error types for the heartcare-core crate.
//!
//! Every variant here is startup-fatal: once artifacts are loaded and the
//! pipeline is built, an assessment has no error path.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for HeartCare operations.
#[derive(Debug, Error)]
pub enum HeartcareError {
    #[error("Artifact error ({}): {reason}", path.display())]
    Artifact { path: PathBuf, reason: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Feature catalog columns missing from schema: {}", missing.join(", "))]
    Catalog { missing: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl HeartcareError {
    pub fn artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Artifact {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, HeartcareError>;
