// src/lib.rs
//! Diorama
//!
//! Procedural core of a small 3D winter diorama: a Gaussian hill height
//! field, a seam-free terrain block mesh built on it, and frame-driven snow
//! and chimney smoke particle simulations.

pub mod error;
pub mod gfx;
pub mod prelude;
pub mod scene;
pub mod simulation;
pub mod terrain;

// Re-export main types for convenience
pub use error::{DioramaError, Result};
pub use scene::{Diorama, DioramaSettings};

/// Builds the default diorama scene
pub fn default() -> Result<Diorama> {
    Diorama::build(&DioramaSettings::default())
}
