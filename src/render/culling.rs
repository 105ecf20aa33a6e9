//! Per-frame chunk culling and far-to-near sorting

use crate::core::viewer::Viewer;
use crate::render::draw_order::DrawOrderSorter;
use crate::render::visibility::VisibilitySelector;
use crate::streaming::slot_pool::{ChunkSlotPool, SlotIndex};

/// Runs visibility selection then draw ordering over the resident chunks.
///
/// Re-uses allocations across frames to avoid per-frame heap churn.
#[derive(Clone, Debug)]
pub struct ChunkCuller {
    selector: VisibilitySelector,
    sorter: DrawOrderSorter,
    /// Visible slots after culling and sorting (reused each frame)
    visible: Vec<SlotIndex>,
}

impl ChunkCuller {
    pub fn new(chunk_size: u32, world_height: u32, capacity: usize) -> Self {
        Self {
            selector: VisibilitySelector::new(chunk_size, world_height),
            sorter: DrawOrderSorter::new(chunk_size),
            visible: Vec::with_capacity(capacity),
        }
    }

    /// Cull active chunks against the view and sort the survivors far-to-near.
    ///
    /// The returned slice is valid until the next call.
    pub fn cull_and_sort(&mut self, pool: &ChunkSlotPool, viewer: &Viewer) -> &[SlotIndex] {
        self.selector.select_visible(pool, viewer, &mut self.visible);
        self.sorter.order(pool, &mut self.visible, viewer.position);
        &self.visible
    }

    /// Visible count from the last call to [`ChunkCuller::cull_and_sort`]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}
