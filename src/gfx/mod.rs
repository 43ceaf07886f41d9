//! # Graphics Module
//!
//! Renderer-facing geometry for the diorama. Nothing here talks to a GPU API:
//! generators produce plain [`GeometryData`](geometry::GeometryData) fragments,
//! and [`Vertex3D`](vertex::Vertex3D) gives them a `#[repr(C)]` interleaved
//! layout a host renderer can upload as-is.
//!
//! - **Geometry** ([`geometry`]) - grid primitives, terrain block builder, fragment merge
//! - **Vertex** ([`vertex`]) - interleaved vertex format

pub mod geometry;
pub mod vertex;

// Re-export commonly used types
pub use geometry::{GeometryData, TerrainMesh, TerrainMeshBuilder};
pub use vertex::Vertex3D;
