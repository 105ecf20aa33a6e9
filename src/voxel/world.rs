//! Fixed-size voxel world storage

use crate::core::types::UVec3;

/// Block type identifier stored per voxel
pub type BlockId = u8;

/// Empty voxel
pub const AIR: BlockId = 0;

/// World extent in voxels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldDims {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl WorldDims {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Total number of voxels
    pub fn volume(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Check if a voxel position lies inside the world
    pub fn contains(&self, x: i64, y: i64, z: i64) -> bool {
        x >= 0 && y >= 0 && z >= 0
            && x < self.x as i64 && y < self.y as i64 && z < self.z as i64
    }

    /// Number of chunk columns along X and Z for a chunk side length
    pub fn chunk_grid(&self, chunk_size: u32) -> (u32, u32) {
        (self.x / chunk_size, self.z / chunk_size)
    }
}

/// Read access to voxel data, as consumed by chunk builds and block renderers
pub trait VoxelSource {
    fn dims(&self) -> WorldDims;

    /// Block at a position; implementations return air outside the world
    fn voxel(&self, x: u32, y: u32, z: u32) -> BlockId;

    /// Block at any position; outside the world reads as air
    fn voxel_or_air(&self, x: i64, y: i64, z: i64) -> BlockId {
        if self.dims().contains(x, y, z) {
            self.voxel(x as u32, y as u32, z as u32)
        } else {
            AIR
        }
    }
}

/// Write access to voxel data
pub trait VoxelStore: VoxelSource {
    /// Set a block; returns false (and does nothing) when out of bounds
    fn set_voxel(&mut self, x: u32, y: u32, z: u32, id: BlockId) -> bool;
}

/// Dense voxel grid laid out Y-major, then X, then Z
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    dims: WorldDims,
    blocks: Vec<BlockId>,
}

impl VoxelGrid {
    /// Create a world filled with air
    pub fn new(dims: WorldDims) -> Self {
        Self {
            dims,
            blocks: vec![AIR; dims.volume()],
        }
    }

    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        (y as usize * self.dims.x as usize + x as usize) * self.dims.z as usize + z as usize
    }

    /// Fill the half-open box `[min, max)` with a block, clamped to the world
    pub fn fill(&mut self, min: UVec3, max: UVec3, id: BlockId) {
        let max = max.min(UVec3::new(self.dims.x, self.dims.y, self.dims.z));
        for y in min.y..max.y {
            for x in min.x..max.x {
                for z in min.z..max.z {
                    let i = self.index(x, y, z);
                    self.blocks[i] = id;
                }
            }
        }
    }

    /// Count non-air voxels
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|&&b| b != AIR).count()
    }
}

impl VoxelSource for VoxelGrid {
    fn dims(&self) -> WorldDims {
        self.dims
    }

    fn voxel(&self, x: u32, y: u32, z: u32) -> BlockId {
        if !self.dims.contains(x as i64, y as i64, z as i64) {
            return AIR;
        }
        self.blocks[self.index(x, y, z)]
    }
}

impl VoxelStore for VoxelGrid {
    fn set_voxel(&mut self, x: u32, y: u32, z: u32, id: BlockId) -> bool {
        if !self.dims.contains(x as i64, y as i64, z as i64) {
            return false;
        }
        let i = self.index(x, y, z);
        self.blocks[i] = id;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_air() {
        let grid = VoxelGrid::new(WorldDims::new(4, 4, 4));
        assert_eq!(grid.solid_count(), 0);
        assert_eq!(grid.voxel(3, 3, 3), AIR);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = VoxelGrid::new(WorldDims::new(8, 4, 6));
        assert!(grid.set_voxel(7, 3, 5, 9));
        assert_eq!(grid.voxel(7, 3, 5), 9);
        assert_eq!(grid.voxel(5, 3, 5), AIR);
        assert_eq!(grid.solid_count(), 1);
    }

    #[test]
    fn test_set_out_of_bounds_is_noop() {
        let mut grid = VoxelGrid::new(WorldDims::new(4, 4, 4));
        assert!(!grid.set_voxel(4, 0, 0, 1));
        assert!(!grid.set_voxel(0, 0, 100, 1));
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn test_voxel_or_air_outside() {
        let mut grid = VoxelGrid::new(WorldDims::new(4, 4, 4));
        grid.fill(UVec3::ZERO, UVec3::splat(4), 1);
        assert_eq!(grid.voxel_or_air(-1, 0, 0), AIR);
        assert_eq!(grid.voxel_or_air(0, 4, 0), AIR);
        assert_eq!(grid.voxel_or_air(0, 0, 0), 1);
    }

    #[test]
    fn test_voxel_outside_reads_air() {
        let mut grid = VoxelGrid::new(WorldDims::new(4, 4, 4));
        assert!(grid.set_voxel(0, 1, 0, 7));
        // x = 4 would land on (0, 1, 0) in the flat layout
        assert_eq!(grid.voxel(4, 0, 0), AIR);
        assert_eq!(grid.voxel(0, 0, 4), AIR);
        assert_eq!(grid.voxel(1000, 1000, 1000), AIR);
        assert_eq!(grid.voxel(0, 1, 0), 7);
    }

    #[test]
    fn test_fill_clamps() {
        let mut grid = VoxelGrid::new(WorldDims::new(4, 4, 4));
        grid.fill(UVec3::new(2, 0, 2), UVec3::splat(100), 3);
        assert_eq!(grid.solid_count(), 2 * 4 * 2);
    }

    #[test]
    fn test_chunk_grid() {
        let dims = WorldDims::new(512, 64, 256);
        assert_eq!(dims.chunk_grid(16), (32, 16));
    }
}
