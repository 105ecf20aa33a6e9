//! Chunk lifecycle: keep the chunks around the viewer resident and fresh
//!
//! Eviction and building use a square window (independent X/Z bounds) whose
//! radius is the render distance divided by the chunk size, truncated.

use crate::core::types::{IVec2, Vec3};
use crate::streaming::builder::{BuildOutcome, ChunkBuilder};
use crate::streaming::slot_pool::ChunkSlotPool;
use crate::voxel::block::BlockContext;

/// Counters from one refresh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Slots deactivated for being out of range
    pub evicted: usize,
    /// Chunks whose geometry was (re)built
    pub built: usize,
    /// In-range chunks that found no free slot
    pub exhausted: usize,
}

/// Drives eviction, building and dirty rebuilds for a slot pool
#[derive(Clone, Debug)]
pub struct ChunkLifecycleManager {
    chunk_size: u32,
    builder: ChunkBuilder,
}

impl ChunkLifecycleManager {
    /// `chunk_size` must be non-zero; [`crate::core::ChunkConfig::validate`] checks it
    pub(crate) fn new(chunk_size: u32, builder: ChunkBuilder) -> Self {
        Self { chunk_size, builder }
    }

    pub fn builder(&self) -> &ChunkBuilder {
        &self.builder
    }

    /// Evict chunks outside the render window, then build the ones inside it.
    ///
    /// A chunk stays resident while `|chunk - viewer| <= radius` on both axes;
    /// chunks are built while `|chunk - viewer| < radius`, clamped to the grid.
    pub fn refresh(
        &self,
        pool: &mut ChunkSlotPool,
        ctx: &BlockContext<'_>,
        render_distance: u32,
        viewer_position: Vec3,
    ) -> RefreshStats {
        let center = self.viewer_chunk(viewer_position);
        let radius = (render_distance / self.chunk_size) as i64;
        let (cx, cz) = (center.x as i64, center.y as i64);

        let mut stats = RefreshStats {
            evicted: pool.retain_active(|x, z| {
                (x as i64 - cx).abs() <= radius && (z as i64 - cz).abs() <= radius
            }),
            ..Default::default()
        };

        let (grid_x, grid_z) = self.builder.grid();
        let x_range = (cx - radius + 1).max(0)..(cx + radius).min(grid_x as i64);
        let z_range = (cz - radius + 1).max(0)..(cz + radius).min(grid_z as i64);

        for x in x_range {
            for z in z_range.clone() {
                match self.builder.build_chunk(pool, ctx, x, z, false) {
                    BuildOutcome::Built => stats.built += 1,
                    BuildOutcome::PoolExhausted => stats.exhausted += 1,
                    BuildOutcome::UpToDate | BuildOutcome::OutOfBounds => {}
                }
            }
        }

        if stats.exhausted > 0 {
            log::warn!(
                "Chunk pool exhausted: {} chunks around ({}, {}) left unrendered",
                stats.exhausted,
                center.x,
                center.y
            );
        }
        log::debug!(
            "Refresh at chunk ({}, {}) radius {}: {} evicted, {} built, {} active",
            center.x,
            center.y,
            radius,
            stats.evicted,
            stats.built,
            pool.active_count()
        );
        stats
    }

    /// Chunk-grid coordinates of a world position (truncating, may be negative)
    pub fn viewer_chunk(&self, position: Vec3) -> IVec2 {
        let size = self.chunk_size as f32;
        IVec2::new((position.x / size) as i32, (position.z / size) as i32)
    }

    /// Flag an active chunk dirty without rebuilding it yet
    pub fn mark_for_update(&self, pool: &mut ChunkSlotPool, chunk_x: u32, chunk_z: u32) -> bool {
        pool.mark_dirty(chunk_x, chunk_z)
    }

    /// Force-rebuild every active dirty chunk. Returns the number rebuilt.
    pub fn process_updates(&self, pool: &mut ChunkSlotPool, ctx: &BlockContext<'_>) -> usize {
        let mut rebuilt = 0;
        for idx in pool.dirty_slots() {
            if let Some(slot) = pool.slot_mut(idx) {
                if self.builder.build(ctx, slot, true) == BuildOutcome::Built {
                    rebuilt += 1;
                }
            }
        }
        if rebuilt > 0 {
            log::debug!("Rebuilt {} dirty chunks", rebuilt);
        }
        rebuilt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UVec3;
    use crate::voxel::block::{BlockRegistry, STONE};
    use crate::voxel::world::{VoxelGrid, VoxelSource, VoxelStore, WorldDims};

    const CHUNK: u32 = 16;

    /// 32x32 chunks of side 16, height 64, with a stone floor
    fn floor_world() -> VoxelGrid {
        let mut world = VoxelGrid::new(WorldDims::new(32 * CHUNK, 64, 32 * CHUNK));
        world.fill(UVec3::ZERO, UVec3::new(32 * CHUNK, 1, 32 * CHUNK), STONE);
        world
    }

    fn manager(world: &VoxelGrid) -> ChunkLifecycleManager {
        ChunkLifecycleManager::new(CHUNK, ChunkBuilder::new(CHUNK, world.dims(), 256))
    }

    fn chunk_center(x: u32, z: u32) -> Vec3 {
        Vec3::new((x * CHUNK + CHUNK / 2) as f32, 32.0, (z * CHUNK + CHUNK / 2) as f32)
    }

    fn active_coords(pool: &ChunkSlotPool) -> Vec<(u32, u32)> {
        let mut coords: Vec<_> = pool.active_slots().map(|(_, s)| s.coords()).collect();
        coords.sort();
        coords
    }

    #[test]
    fn test_viewer_chunk_truncates() {
        let world = floor_world();
        let manager = manager(&world);
        assert_eq!(manager.viewer_chunk(Vec3::new(47.9, 3.0, 16.0)), IVec2::new(2, 1));
        assert_eq!(manager.viewer_chunk(Vec3::new(-5.0, 0.0, 3.0)), IVec2::new(0, 0));
        assert_eq!(manager.viewer_chunk(Vec3::new(-20.0, 0.0, 3.0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_refresh_builds_square_window() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(64);

        // 48 / 16 = radius 3
        let stats = manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        assert_eq!(stats.built, 25);
        assert_eq!(stats.evicted, 0);
        assert_eq!(stats.exhausted, 0);

        let mut expected = Vec::new();
        for x in 3..=7 {
            for z in 3..=7 {
                expected.push((x, z));
            }
        }
        assert_eq!(active_coords(&pool), expected);

        for (_, slot) in pool.active_slots() {
            let geometry = slot.geometry().expect("built chunk has display lists");
            assert!(!geometry.opaque.is_empty());
        }
    }

    #[test]
    fn test_refresh_clamps_at_grid_edge() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(64);

        manager.refresh(&mut pool, &ctx, 48, chunk_center(0, 31));
        let coords = active_coords(&pool);
        assert_eq!(coords.len(), 3 * 3);
        assert!(coords.iter().all(|&(x, z)| x <= 2 && z >= 29));
    }

    #[test]
    fn test_second_refresh_builds_nothing() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(64);

        manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        let stats = manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        assert_eq!(stats, RefreshStats::default());
    }

    #[test]
    fn test_eviction_bounds() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(64);

        let builder = manager.builder();
        builder.build_chunk(&mut pool, &ctx, 4, 0, false); // R + 1
        builder.build_chunk(&mut pool, &ctx, 0, 4, false); // R + 1 on the other axis
        builder.build_chunk(&mut pool, &ctx, 2, 2, false); // R - 1

        let stats = manager.refresh(&mut pool, &ctx, 48, Vec3::new(1.0, 10.0, 1.0));
        assert_eq!(stats.evicted, 2);
        assert!(pool.find_active(4, 0).is_none());
        assert!(pool.find_active(0, 4).is_none());
        assert!(pool.find_active(2, 2).is_some());
    }

    #[test]
    fn test_moving_viewer_recycles_slots() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        // Exactly one window's worth of slots
        let mut pool = ChunkSlotPool::new(25);

        manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        let stats = manager.refresh(&mut pool, &ctx, 48, chunk_center(12, 5));
        assert_eq!(stats.evicted, 25);
        assert_eq!(stats.built, 25);
        assert_eq!(stats.exhausted, 0);
        assert!(pool.find_active(12, 5).is_some());
    }

    #[test]
    fn test_exhaustion_is_not_fatal() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(10);

        let stats = manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        assert_eq!(stats.built, 10);
        assert_eq!(stats.exhausted, 15);
        assert_eq!(pool.active_count(), 10);
    }

    #[test]
    fn test_dirty_round_trip() {
        let mut world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(64);

        {
            let ctx = BlockContext { world: &world, registry: &registry };
            manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        }
        let idx = pool.find_active(5, 5).unwrap();
        let before = pool.slot(idx).unwrap().geometry().unwrap().opaque.used();

        // A block standing on the floor adds 5 faces and hides 1 floor face
        world.set_voxel(5 * CHUNK + 3, 1, 5 * CHUNK + 3, STONE);
        assert!(manager.mark_for_update(&mut pool, 5, 5));
        assert!(pool.slot(idx).unwrap().needs_rebuild());

        let ctx = BlockContext { world: &world, registry: &registry };
        assert_eq!(manager.process_updates(&mut pool, &ctx), 1);

        let slot = pool.slot(idx).unwrap();
        assert!(!slot.needs_rebuild());
        assert_eq!(slot.geometry().unwrap().opaque.used(), before + 4 * 4);
        assert_eq!(manager.process_updates(&mut pool, &ctx), 0);
    }

    #[test]
    fn test_refresh_rebuilds_dirty_in_place() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(64);

        manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        let idx = pool.find_active(6, 4).unwrap();
        pool.mark_dirty(6, 4);

        let stats = manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        assert_eq!(stats.built, 1);
        assert_eq!(pool.find_active(6, 4), Some(idx));
    }

    #[test]
    fn test_mark_out_of_range_is_ignored() {
        let world = floor_world();
        let registry = BlockRegistry::with_defaults();
        let ctx = BlockContext { world: &world, registry: &registry };
        let manager = manager(&world);
        let mut pool = ChunkSlotPool::new(64);

        manager.refresh(&mut pool, &ctx, 48, chunk_center(5, 5));
        assert!(!manager.mark_for_update(&mut pool, 20, 20));
        assert_eq!(manager.process_updates(&mut pool, &ctx), 0);
    }
}
