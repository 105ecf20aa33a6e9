//! Chunk residency: slot pool, geometry builds and the per-frame lifecycle

pub mod slot_pool;
pub mod builder;
pub mod lifecycle;
pub mod usage;

pub use slot_pool::{ChunkGeometry, ChunkSlot, ChunkSlotPool, SlotIndex};
pub use builder::{BuildOutcome, ChunkBuilder};
pub use lifecycle::{ChunkLifecycleManager, RefreshStats};
pub use usage::FifoUsage;
