//! Voxel storage and per-block rendering

pub mod world;
pub mod block;
pub mod atlas;
pub mod terrain;

pub use world::{BlockId, VoxelGrid, VoxelSource, VoxelStore, WorldDims, AIR};
pub use block::{BlockContext, BlockRegistry, CubeBlock, Renderable};
pub use atlas::AtlasTile;
pub use terrain::{TerrainGenerator, TerrainParams};
