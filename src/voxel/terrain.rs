//! Noise-based heightmap filler for voxel grids

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::voxel::block::{DIRT, GRASS, STONE, WATER};
use crate::voxel::world::{VoxelGrid, VoxelSource, VoxelStore};

/// Parameters controlling terrain generation
#[derive(Clone, Debug)]
pub struct TerrainParams {
    pub seed: u32,
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub height_scale: f32, // Height variation above the base
    pub base_height: f32,  // Lowest possible surface
    pub octaves: u32,
    pub sea_level: u32,    // Air at or below this height becomes water
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 64.0,
            height_scale: 24.0,
            base_height: 16.0,
            octaves: 4,
            sea_level: 24,
        }
    }
}

/// Fills a grid with stone, a dirt/grass crust and water up to sea level
pub struct TerrainGenerator {
    params: TerrainParams,
    noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    pub fn new(params: TerrainParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed).set_octaves(params.octaves as usize);
        Self { params, noise }
    }

    /// Surface height at a world column
    pub fn height_at(&self, x: u32, z: u32) -> u32 {
        let nx = (x as f32 / self.params.scale) as f64;
        let nz = (z as f32 / self.params.scale) as f64;
        let normalized = (self.noise.get([nx, nz]) + 1.0) / 2.0;
        (self.params.base_height + normalized as f32 * self.params.height_scale).max(1.0) as u32
    }

    /// Overwrite every column of the grid
    pub fn fill(&self, grid: &mut VoxelGrid) {
        let dims = grid.dims();
        for x in 0..dims.x {
            for z in 0..dims.z {
                let height = self.height_at(x, z).min(dims.y);
                for y in 0..dims.y {
                    let id = if y + 4 < height {
                        STONE
                    } else if y + 1 < height {
                        DIRT
                    } else if y + 1 == height {
                        if y < self.params.sea_level { DIRT } else { GRASS }
                    } else if y <= self.params.sea_level {
                        WATER
                    } else {
                        break;
                    };
                    grid.set_voxel(x, y, z, id);
                }
            }
        }
    }
}
