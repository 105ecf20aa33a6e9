//! Chunk visibility, draw ordering and submission

pub mod geometry;
pub mod visibility;
pub mod draw_order;
pub mod culling;
pub mod renderer;

pub use geometry::{DisplayList, DrawSink, RenderPass, Vertex};
pub use visibility::{is_potentially_visible, VisibilitySelector};
pub use draw_order::{manhattan_distance, DrawOrderSorter};
pub use culling::ChunkCuller;
pub use renderer::ChunkRenderer;
