//! Far-to-near ordering of visible chunks
//!
//! Blended geometry composites correctly only when drawn back to front, so
//! chunks are sorted by Manhattan distance from the viewer, farthest first.

use std::cmp::Ordering;

use crate::core::types::Vec3;
use crate::streaming::slot_pool::{ChunkSlotPool, SlotIndex};

/// Manhattan distance on the XZ plane from a chunk's origin corner to the viewer
pub fn manhattan_distance(
    chunk_x: u32,
    chunk_z: u32,
    chunk_size: u32,
    viewer_position: Vec3,
) -> f32 {
    let origin_x = (chunk_x * chunk_size) as f32;
    let origin_z = (chunk_z * chunk_size) as f32;
    (origin_x - viewer_position.x).abs() + (origin_z - viewer_position.z).abs()
}

/// Sorts slot indices far-to-near, reusing its key buffer across frames
#[derive(Clone, Debug)]
pub struct DrawOrderSorter {
    chunk_size: u32,
    /// Sort keys: (distance, slot index)
    sort_keys: Vec<(f32, SlotIndex)>,
}

impl DrawOrderSorter {
    pub fn new(chunk_size: u32) -> Self {
        Self {
            chunk_size,
            sort_keys: Vec::new(),
        }
    }

    /// Reorder `selected` in place, farthest chunk first.
    /// Equal distances keep no particular order.
    pub fn order(
        &mut self,
        pool: &ChunkSlotPool,
        selected: &mut [SlotIndex],
        viewer_position: Vec3,
    ) {
        let chunk_size = self.chunk_size;
        self.sort_keys.clear();
        self.sort_keys.extend(selected.iter().map(|&idx| {
            let distance = pool
                .slot(idx)
                .map(|slot| {
                    let (x, z) = slot.coords();
                    manhattan_distance(x, z, chunk_size, viewer_position)
                })
                .unwrap_or(0.0);
            (distance, idx)
        }));

        self.sort_keys
            .sort_unstable_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        for (dst, &(_, idx)) in selected.iter_mut().zip(&self.sort_keys) {
            *dst = idx;
        }
    }
}
