//! # Diorama Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use diorama::prelude::*;
//!
//! let field = HeightField::configure(0.8, 0.0, -1.2, 1.8).unwrap();
//! let mesh = build_terrain_mesh(&field, 6.0, 6.0, 2.0, 48).unwrap();
//! let mut snow = ParticleSystem::snow().with_seed(1).build().unwrap();
//! snow.tick(0.0, 1.0 / 60.0);
//! assert_eq!(mesh.bottom.triangle_count(), 2);
//! ```

// Re-export core types
pub use crate::error::{DioramaError, Result};
pub use crate::scene::{Diorama, DioramaSettings, PlacedProp, Weather};
pub use crate::terrain::HeightField;

// Re-export geometry types
pub use crate::gfx::geometry::{build_terrain_mesh, Edge, GeometryData, TerrainMesh, TerrainMeshBuilder};
pub use crate::gfx::vertex::Vertex3D;

// Re-export simulation framework
pub use crate::simulation::manager::{SimulationManager, SystemHandle};
pub use crate::simulation::particles::{
    create_particle_system, BoundingVolume, Kinematics, ParticleKind, ParticleSystem,
};
pub use crate::simulation::smoke::SmokeKinematics;
pub use crate::simulation::snow::SnowKinematics;
pub use crate::simulation::traits::Simulation;

// Re-export common external dependencies
pub use cgmath::Vector3;
