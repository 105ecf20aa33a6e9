//! Chunkcache - fixed-capacity chunk cache and renderer for voxel worlds
//!
//! Keeps a bounded pool of chunk columns resident around the viewer, rebuilds
//! their cached opaque and blended geometry when voxels change, culls them
//! against the view and orders them far-to-near for drawing.

pub mod core;
pub mod math;
pub mod voxel;
pub mod render;
pub mod streaming;
