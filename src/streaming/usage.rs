//! Display list usage across resident chunks
//!
//! Read-only diagnostics: how much of the allocated geometry storage the
//! active chunks actually fill.

use crate::streaming::slot_pool::ChunkSlotPool;

/// Summed display list usage, in vertices
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FifoUsage {
    /// Vertices written into the lists of active chunks
    pub used: usize,
    /// Vertices the lists of active chunks can hold
    pub total: usize,
}

impl FifoUsage {
    /// Sum both display lists of every active slot
    pub fn measure(pool: &ChunkSlotPool) -> Self {
        pool.active_slots()
            .filter_map(|(_, slot)| slot.geometry())
            .fold(Self::default(), |acc, geometry| Self {
                used: acc.used + geometry.opaque.used() + geometry.blended.used(),
                total: acc.total + geometry.opaque.capacity() + geometry.blended.capacity(),
            })
    }

    /// Fill ratio (0.0 to 1.0); an empty pool reports 0
    pub fn utilization(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f32 / self.total as f32
    }
}
