//! Error types for the chunk cache
//!
//! Only setup paths (configuration loading, renderer construction) can fail.
//! Per-frame operations never return errors; they skip the affected chunk.

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
