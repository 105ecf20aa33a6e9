//! Chunk geometry builder
//!
//! Regenerates a slot's opaque and blended display lists from voxel data by
//! walking every voxel of the chunk column and dispatching to the block's
//! render routine.

use crate::core::types::UVec3;
use crate::render::geometry::{DisplayList, RenderPass};
use crate::streaming::slot_pool::{ChunkSlot, ChunkSlotPool};
use crate::voxel::block::BlockContext;
use crate::voxel::world::{WorldDims, AIR};

/// What a build request ended up doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Geometry was regenerated
    Built,
    /// Slot was active and clean; nothing written
    UpToDate,
    /// Chunk lies outside the world grid; ignored
    OutOfBounds,
    /// Every slot is bound to another chunk; chunk stays unrendered for now
    PoolExhausted,
}

/// Rebuilds cached chunk geometry for one world layout
#[derive(Clone, Debug)]
pub struct ChunkBuilder {
    chunk_size: u32,
    /// Chunk columns along X and Z
    grid: (u32, u32),
    world_height: u32,
    list_capacity_hint: usize,
}

impl ChunkBuilder {
    /// `chunk_size` must be non-zero; [`crate::core::ChunkConfig::validate`] checks it
    pub(crate) fn new(chunk_size: u32, dims: WorldDims, list_capacity_hint: usize) -> Self {
        Self {
            chunk_size,
            grid: dims.chunk_grid(chunk_size),
            world_height: dims.y,
            list_capacity_hint,
        }
    }

    /// Chunk columns along X and Z
    pub fn grid(&self) -> (u32, u32) {
        self.grid
    }

    pub fn in_bounds(&self, chunk_x: i64, chunk_z: i64) -> bool {
        chunk_x >= 0
            && chunk_z >= 0
            && chunk_x < self.grid.0 as i64
            && chunk_z < self.grid.1 as i64
    }

    /// Look up (or claim) the slot for a chunk and build it.
    pub fn build_chunk(
        &self,
        pool: &mut ChunkSlotPool,
        ctx: &BlockContext<'_>,
        chunk_x: i64,
        chunk_z: i64,
        force: bool,
    ) -> BuildOutcome {
        if !self.in_bounds(chunk_x, chunk_z) {
            return BuildOutcome::OutOfBounds;
        }
        let (chunk_x, chunk_z) = (chunk_x as u32, chunk_z as u32);

        let Some(idx) = pool.find_or_allocate(chunk_x, chunk_z) else {
            return BuildOutcome::PoolExhausted;
        };
        match pool.slot_mut(idx) {
            Some(slot) => self.build(ctx, slot, force),
            None => BuildOutcome::PoolExhausted,
        }
    }

    /// Build the chunk a slot is bound to.
    ///
    /// Skips the slot when it is active, clean and `force` is false. Otherwise
    /// activates it and refills both display lists.
    pub fn build(&self, ctx: &BlockContext<'_>, slot: &mut ChunkSlot, force: bool) -> BuildOutcome {
        let (chunk_x, chunk_z) = slot.coords();
        if !self.in_bounds(chunk_x as i64, chunk_z as i64) {
            return BuildOutcome::OutOfBounds;
        }
        if slot.is_active() && !slot.needs_rebuild() && !force {
            log::trace!("Chunk ({}, {}) already up to date", chunk_x, chunk_z);
            return BuildOutcome::UpToDate;
        }

        slot.activate();
        log::trace!("Building chunk ({}, {})", chunk_x, chunk_z);

        let origin = UVec3::new(chunk_x * self.chunk_size, 0, chunk_z * self.chunk_size);
        let geometry = slot.geometry_mut(self.list_capacity_hint);

        // Top-down lets block routines stop early beneath solid surfaces
        self.run_pass(
            ctx,
            origin,
            RenderPass::Opaque,
            (0..self.world_height).rev(),
            &mut geometry.opaque,
        );
        self.run_pass(
            ctx,
            origin,
            RenderPass::Blended,
            0..self.world_height,
            &mut geometry.blended,
        );

        log::trace!(
            "Built chunk ({}, {}): {}/{} opaque, {}/{} blended",
            chunk_x,
            chunk_z,
            geometry.opaque.used(),
            geometry.opaque.capacity(),
            geometry.blended.used(),
            geometry.blended.capacity(),
        );
        BuildOutcome::Built
    }

    fn run_pass(
        &self,
        ctx: &BlockContext<'_>,
        origin: UVec3,
        pass: RenderPass,
        layers: impl Iterator<Item = u32>,
        list: &mut DisplayList,
    ) {
        list.clear();
        for y in layers {
            for x in origin.x..origin.x + self.chunk_size {
                for z in origin.z..origin.z + self.chunk_size {
                    let id = ctx.world.voxel(x, y, z);
                    if id == AIR {
                        continue;
                    }
                    if let Some(block) = ctx.registry.get(id) {
                        block.render_block(ctx, UVec3::new(x, y, z), pass, list);
                    }
                }
            }
        }
        list.fit();
    }
}
