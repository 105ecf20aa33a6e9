//! Core types, configuration and the viewer

pub mod types;
pub mod error;
pub mod logging;
pub mod config;
pub mod viewer;

pub use types::*;
pub use error::Error;
pub use config::ChunkConfig;
pub use viewer::{ScreenPoint, Viewer};
