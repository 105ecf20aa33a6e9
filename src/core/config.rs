//! Chunk cache configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Tunables for the chunk slot pool and the lifecycle manager.
///
/// Missing fields in a JSON document fall back to [`ChunkConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Number of chunk slots in the pool (fixed for the pool's lifetime).
    pub slot_capacity: usize,
    /// Side length of a chunk column in voxels (X and Z).
    pub chunk_size: u32,
    /// Initial vertex capacity of each lazily created display list.
    pub list_capacity_hint: usize,
    /// Default render distance in world units.
    pub render_distance: u32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            slot_capacity: 64,
            chunk_size: 16,
            list_capacity_hint: 256,
            render_distance: 48, // 3-chunk radius at the default chunk size
        }
    }
}

impl ChunkConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Reject configurations the pool cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.slot_capacity == 0 {
            return Err(Error::Config("slot_capacity must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".into()));
        }
        Ok(())
    }
}
