//! Chunked renderer: the per-frame entry point
//!
//! Per frame the caller runs, in order: [`ChunkRenderer::refresh`],
//! [`ChunkRenderer::process_updates`] (or on a throttled schedule) and
//! [`ChunkRenderer::render_frame`]. Nothing here fails at frame time; chunks
//! that cannot be placed or built are skipped.

use crate::core::config::ChunkConfig;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::core::viewer::Viewer;
use crate::render::culling::ChunkCuller;
use crate::render::geometry::{DrawSink, RenderPass};
use crate::streaming::builder::ChunkBuilder;
use crate::streaming::lifecycle::{ChunkLifecycleManager, RefreshStats};
use crate::streaming::slot_pool::ChunkSlotPool;
use crate::streaming::usage::FifoUsage;
use crate::voxel::block::{BlockContext, BlockRegistry};
use crate::voxel::world::{BlockId, VoxelSource, VoxelStore};

/// Owns the world, the chunk pool and the per-frame culling state
pub struct ChunkRenderer<W: VoxelSource> {
    config: ChunkConfig,
    world: W,
    registry: BlockRegistry,
    pool: ChunkSlotPool,
    lifecycle: ChunkLifecycleManager,
    culler: ChunkCuller,
}

impl<W: VoxelSource> ChunkRenderer<W> {
    /// Create a renderer; the world must be a whole number of chunks wide
    pub fn new(config: ChunkConfig, world: W, registry: BlockRegistry) -> Result<Self> {
        config.validate()?;
        let dims = world.dims();
        if dims.x % config.chunk_size != 0 || dims.z % config.chunk_size != 0 {
            return Err(Error::Config(format!(
                "world {}x{} is not a multiple of chunk size {}",
                dims.x, dims.z, config.chunk_size
            )));
        }

        let builder = ChunkBuilder::new(config.chunk_size, dims, config.list_capacity_hint);
        log::info!(
            "Chunk renderer: {}x{} chunks of {} voxels, height {}",
            dims.x / config.chunk_size,
            dims.z / config.chunk_size,
            config.chunk_size,
            dims.y
        );

        Ok(Self {
            pool: ChunkSlotPool::new(config.slot_capacity),
            lifecycle: ChunkLifecycleManager::new(config.chunk_size, builder),
            culler: ChunkCuller::new(config.chunk_size, dims.y, config.slot_capacity),
            config,
            world,
            registry,
        })
    }

    /// Evict out-of-range chunks and build newly in-range ones
    pub fn refresh(&mut self, render_distance: u32, viewer: &Viewer) -> RefreshStats {
        let ctx = BlockContext { world: &self.world, registry: &self.registry };
        self.lifecycle.refresh(&mut self.pool, &ctx, render_distance, viewer.position)
    }

    /// Refresh using the configured render distance
    pub fn refresh_default(&mut self, viewer: &Viewer) -> RefreshStats {
        self.refresh(self.config.render_distance, viewer)
    }

    /// Flag a resident chunk for rebuild on the next [`ChunkRenderer::process_updates`]
    pub fn mark_for_update(&mut self, chunk_x: u32, chunk_z: u32) -> bool {
        self.lifecycle.mark_for_update(&mut self.pool, chunk_x, chunk_z)
    }

    /// Rebuild every dirty resident chunk
    pub fn process_updates(&mut self) -> usize {
        let ctx = BlockContext { world: &self.world, registry: &self.registry };
        self.lifecycle.process_updates(&mut self.pool, &ctx)
    }

    /// Cull, sort and submit: all opaque lists, then all blended lists, both
    /// farthest chunk first. Returns the number of chunks drawn.
    pub fn render_frame(&mut self, viewer: &Viewer, sink: &mut impl DrawSink) -> usize {
        let order = self.culler.cull_and_sort(&self.pool, viewer);

        for pass in RenderPass::ALL {
            for &idx in order {
                let Some(geometry) = self.pool.slot(idx).and_then(|slot| slot.geometry()) else {
                    continue;
                };
                let list = match pass {
                    RenderPass::Opaque => &geometry.opaque,
                    RenderPass::Blended => &geometry.blended,
                };
                sink.draw(pass, list);
            }
        }

        log::trace!("Drew {} of {} resident chunks", order.len(), self.pool.active_count());
        order.len()
    }

    /// Vertices written across resident chunks
    pub fn used_capacity(&self) -> usize {
        self.usage().used
    }

    /// Vertex capacity allocated across resident chunks
    pub fn total_capacity(&self) -> usize {
        self.usage().total
    }

    pub fn usage(&self) -> FifoUsage {
        FifoUsage::measure(&self.pool)
    }

    /// Deactivate every chunk (e.g. after loading a different world)
    pub fn reset(&mut self) {
        self.pool.deactivate_all();
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Direct world access; callers must mark edited chunks themselves
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn registry_mut(&mut self) -> &mut BlockRegistry {
        &mut self.registry
    }

    pub fn pool(&self) -> &ChunkSlotPool {
        &self.pool
    }
}

impl<W: VoxelStore> ChunkRenderer<W> {
    /// Place or remove a block and mark every chunk whose faces may change.
    ///
    /// Blocks on a chunk border also dirty the neighbouring chunk. Returns
    /// false when the position is outside the world.
    pub fn set_block(&mut self, x: u32, y: u32, z: u32, id: BlockId) -> bool {
        if !self.world.set_voxel(x, y, z, id) {
            return false;
        }

        let size = self.config.chunk_size;
        let (chunk_x, chunk_z) = (x / size, z / size);
        self.mark_for_update(chunk_x, chunk_z);

        let (local_x, local_z) = (x % size, z % size);
        if local_x == 0 && chunk_x > 0 {
            self.mark_for_update(chunk_x - 1, chunk_z);
        }
        if local_x == size - 1 {
            self.mark_for_update(chunk_x + 1, chunk_z);
        }
        if local_z == 0 && chunk_z > 0 {
            self.mark_for_update(chunk_x, chunk_z - 1);
        }
        if local_z == size - 1 {
            self.mark_for_update(chunk_x, chunk_z + 1);
        }
        true
    }
}
