//! Per-chunk visibility by projecting bounding box corners
//!
//! A chunk is kept when at least one corner is in front of the viewer and the
//! corners do not all lie beyond the same screen edge. The test is
//! conservative: chunks that intersect the view are never dropped, some that
//! do not may be kept.

use crate::core::types::Vec3;
use crate::core::viewer::Viewer;
use crate::math::Aabb;
use crate::streaming::slot_pool::{ChunkSlotPool, SlotIndex};

/// Check whether any part of a box may be on screen
pub fn is_potentially_visible(bounds: &Aabb, viewer: &Viewer) -> bool {
    let (width, height) = (viewer.viewport.x, viewer.viewport.y);
    let mut all_left = true;
    let mut all_right = true;
    let mut all_above = true;
    let mut all_below = true;
    let mut any_in_front = false;

    for corner in bounds.corners() {
        let p = viewer.project(corner);
        if !p.is_in_front() {
            // Screen position of a corner behind the viewer says nothing about
            // which side of an edge the box is on
            all_left = false;
            all_right = false;
            all_above = false;
            all_below = false;
            continue;
        }

        any_in_front = true;
        if p.x >= 0.0 {
            all_left = false;
        }
        if p.x <= width {
            all_right = false;
        }
        if p.y >= 0.0 {
            all_above = false;
        }
        if p.y <= height {
            all_below = false;
        }
    }

    any_in_front && !(all_left || all_right || all_above || all_below)
}

/// Selects the resident chunks that may be visible this frame
#[derive(Clone, Debug)]
pub struct VisibilitySelector {
    chunk_size: u32,
    world_height: u32,
}

impl VisibilitySelector {
    pub fn new(chunk_size: u32, world_height: u32) -> Self {
        Self { chunk_size, world_height }
    }

    /// World-space bounds of a chunk column (full world height)
    pub fn chunk_bounds(&self, chunk_x: u32, chunk_z: u32) -> Aabb {
        let size = self.chunk_size as f32;
        let min = Vec3::new(chunk_x as f32 * size, 0.0, chunk_z as f32 * size);
        Aabb::new(min, min + Vec3::new(size, self.world_height as f32, size))
    }

    /// Replace `out` with the potentially visible active slots, in slot order
    pub fn select_visible(&self, pool: &ChunkSlotPool, viewer: &Viewer, out: &mut Vec<SlotIndex>) {
        out.clear();
        out.extend(
            pool.active_slots()
                .filter(|(_, slot)| {
                    let (x, z) = slot.coords();
                    is_potentially_visible(&self.chunk_bounds(x, z), viewer)
                })
                .map(|(idx, _)| idx),
        );
    }
}
