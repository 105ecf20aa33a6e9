//! CPU-side cached geometry (display lists) and the draw submission seam

use bytemuck::{Pod, Zeroable};

/// Geometry pass a block contributes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Solid geometry
    Opaque,
    /// Translucent geometry drawn back-to-front
    Blended,
}

impl RenderPass {
    /// Both passes in submission order
    pub const ALL: [RenderPass; 2] = [RenderPass::Opaque, RenderPass::Blended];
}

/// Vertex as written into a display list
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [u8; 4],
}

/// Growable vertex list reused across rebuilds.
///
/// A list is cleared and refilled on every rebuild and fitted to its written
/// size afterwards; it is never dropped while its slot lives.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    vertices: Vec<Vertex>,
}

impl DisplayList {
    /// Create a list with room for `capacity_hint` vertices
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity_hint),
        }
    }

    /// Drop all written vertices, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Append a quad as four vertices in winding order
    pub fn push_quad(&mut self, quad: [Vertex; 4]) {
        self.vertices.extend_from_slice(&quad);
    }

    /// Trim the allocation down to the written size
    pub fn fit(&mut self) {
        self.vertices.shrink_to_fit();
    }

    /// Number of vertices written
    pub fn used(&self) -> usize {
        self.vertices.len()
    }

    /// Number of vertices the list can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw vertex bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Receives display lists in draw order.
///
/// Implemented by the graphics layer; the chunk renderer only decides what is
/// drawn and in which order.
pub trait DrawSink {
    fn draw(&mut self, pass: RenderPass, list: &DisplayList);
}
