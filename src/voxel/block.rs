//! Per-block-type rendering and the block registry

use crate::core::types::UVec3;
use crate::render::geometry::{DisplayList, RenderPass, Vertex};
use crate::voxel::atlas::AtlasTile;
use crate::voxel::world::{BlockId, VoxelSource, AIR};

pub const STONE: BlockId = 1;
pub const DIRT: BlockId = 2;
pub const GRASS: BlockId = 3;
pub const WATER: BlockId = 4;
pub const GLASS: BlockId = 5;

/// Everything a block render routine may look at while emitting geometry
pub struct BlockContext<'a> {
    pub world: &'a dyn VoxelSource,
    pub registry: &'a BlockRegistry,
}

/// Rendering behavior of one block type.
///
/// Called once per pass for every non-empty voxel of a chunk being rebuilt;
/// implementations write only the geometry belonging to `pass`.
pub trait Renderable {
    fn render_block(
        &self,
        ctx: &BlockContext<'_>,
        pos: UVec3,
        pass: RenderPass,
        out: &mut DisplayList,
    );

    /// Whether the block fully hides the faces of its neighbours
    fn is_opaque(&self) -> bool {
        true
    }
}

/// Lookup table from block id to its render routine
pub struct BlockRegistry {
    entries: Vec<Option<Box<dyn Renderable>>>,
}

impl BlockRegistry {
    /// Create an empty registry (every id unregistered)
    pub fn new() -> Self {
        Self {
            entries: (0..=BlockId::MAX as usize).map(|_| None).collect(),
        }
    }

    /// Registry with the built-in cube blocks
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(STONE, Box::new(CubeBlock::opaque(AtlasTile::new(1, 0))));
        registry.register(DIRT, Box::new(CubeBlock::opaque(AtlasTile::new(2, 0))));
        registry.register(GRASS, Box::new(CubeBlock::opaque(AtlasTile::new(0, 0))));
        registry.register(
            WATER,
            Box::new(CubeBlock::translucent(AtlasTile::new(13, 12), [255, 255, 255, 160])),
        );
        registry.register(
            GLASS,
            Box::new(CubeBlock::translucent(AtlasTile::new(1, 3), [255, 255, 255, 200])),
        );
        registry
    }

    /// Register (or replace) the render routine for a block id.
    /// Air cannot be registered.
    pub fn register(&mut self, id: BlockId, block: Box<dyn Renderable>) {
        if id == AIR {
            log::warn!("Ignoring render routine registered for air");
            return;
        }
        self.entries[id as usize] = Some(block);
    }

    pub fn get(&self, id: BlockId) -> Option<&dyn Renderable> {
        self.entries[id as usize].as_deref()
    }

    /// Air and unregistered ids are treated as see-through
    pub fn is_opaque(&self, id: BlockId) -> bool {
        self.get(id).is_some_and(|block| block.is_opaque())
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Face of a unit cube: neighbour offset, corners, brightness
struct Face {
    normal: [i64; 3],
    corners: [[f32; 3]; 4],
    shade: f32,
}

#[rustfmt::skip]
const FACES: [Face; 6] = [
    Face { normal: [1, 0, 0], corners: [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]], shade: 0.8 },
    Face { normal: [-1, 0, 0], corners: [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]], shade: 0.8 },
    Face { normal: [0, 1, 0], corners: [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]], shade: 1.0 },
    Face { normal: [0, -1, 0], corners: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]], shade: 0.5 },
    Face { normal: [0, 0, 1], corners: [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]], shade: 0.7 },
    Face { normal: [0, 0, -1], corners: [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]], shade: 0.7 },
];

/// Textured unit cube drawn in a single pass
#[derive(Clone, Debug)]
pub struct CubeBlock {
    pub tile: AtlasTile,
    pub color: [u8; 4],
    pub translucent: bool,
}

impl CubeBlock {
    pub fn opaque(tile: AtlasTile) -> Self {
        Self { tile, color: [255; 4], translucent: false }
    }

    pub fn translucent(tile: AtlasTile, color: [u8; 4]) -> Self {
        Self { tile, color, translucent: true }
    }

    /// The pass this cube draws in
    pub fn pass(&self) -> RenderPass {
        if self.translucent { RenderPass::Blended } else { RenderPass::Opaque }
    }

    /// A face is drawn unless the neighbour hides it: opaque neighbours always
    /// do, and translucent blocks merge with their own kind
    fn face_exposed(&self, ctx: &BlockContext<'_>, own: BlockId, neighbour: BlockId) -> bool {
        if neighbour == AIR {
            return true;
        }
        !ctx.registry.is_opaque(neighbour) && neighbour != own
    }
}

impl Renderable for CubeBlock {
    fn render_block(
        &self,
        ctx: &BlockContext<'_>,
        pos: UVec3,
        pass: RenderPass,
        out: &mut DisplayList,
    ) {
        if pass != self.pass() {
            return;
        }

        let own = ctx.world.voxel(pos.x, pos.y, pos.z);
        let (uv_min, uv_max) = self.tile.uv_rect();
        let uvs = [
            [uv_min.x, uv_max.y],
            [uv_min.x, uv_min.y],
            [uv_max.x, uv_min.y],
            [uv_max.x, uv_max.y],
        ];
        let origin = pos.as_vec3();

        for face in &FACES {
            let neighbour = ctx.world.voxel_or_air(
                pos.x as i64 + face.normal[0],
                pos.y as i64 + face.normal[1],
                pos.z as i64 + face.normal[2],
            );
            if !self.face_exposed(ctx, own, neighbour) {
                continue;
            }

            let color = [
                (self.color[0] as f32 * face.shade) as u8,
                (self.color[1] as f32 * face.shade) as u8,
                (self.color[2] as f32 * face.shade) as u8,
                self.color[3],
            ];
            out.push_quad(std::array::from_fn(|i| Vertex {
                position: (origin + glam::Vec3::from_array(face.corners[i])).to_array(),
                uv: uvs[i],
                color,
            }));
        }
    }

    fn is_opaque(&self) -> bool {
        !self.translucent
    }
}
