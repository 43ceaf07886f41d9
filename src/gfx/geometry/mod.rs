//! # Procedural Geometry Generation
//!
//! This module holds the mesh fragment type shared by every generator, the
//! fragment merge, and the generators themselves.
//!
//! ## Generators
//!
//! - **Grid plane** ([`generate_grid`]): flat XZ plane, optionally displaced
//! - **Terrain** ([`terrain`]): height-field top surface, side walls and bottom cap
//!
//! ## Usage
//!
//! ```rust
//! use diorama::gfx::geometry::{generate_grid, GeometryData};
//!
//! let a = generate_grid(2.0, 2.0, 2, 2);
//! let b = generate_grid(1.0, 1.0, 1, 1);
//! let merged = GeometryData::merge(&[a, b]).unwrap();
//! assert_eq!(merged.vertex_count(), 9 + 4);
//! ```

pub mod primitives;
pub mod terrain;

pub use primitives::*;
pub use terrain::{build_terrain_mesh, Edge, TerrainMesh, TerrainMeshBuilder};

use crate::error::{DioramaError, Result};
use crate::gfx::vertex::Vertex3D;

/// An independently generated mesh fragment ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding seen from outside)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty fragment with room for `vertices` vertices and `indices` indices
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            tex_coords: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append one vertex with all of its attributes, returning its index
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    /// Append one triangle
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of indices in this geometry
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check the fragment contract: equal attribute lengths, whole triangles,
    /// and every index inside the vertex array.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        if self.normals.len() != count {
            return Err(DioramaError::MalformedFragment(format!(
                "{} normals for {} vertices",
                self.normals.len(),
                count
            )));
        }
        if self.tex_coords.len() != count {
            return Err(DioramaError::MalformedFragment(format!(
                "{} texture coordinates for {} vertices",
                self.tex_coords.len(),
                count
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(DioramaError::MalformedFragment(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(DioramaError::MalformedFragment(format!(
                "index {bad} out of range for {count} vertices"
            )));
        }
        Ok(())
    }

    /// Concatenate fragments into one buffer.
    ///
    /// Vertex arrays are appended in order and every fragment's indices are
    /// rebased by the number of vertices that precede it. Vertices are never
    /// shared across fragments. Each fragment must pass [`validate`](Self::validate).
    pub fn merge(fragments: &[GeometryData]) -> Result<GeometryData> {
        let mut total_vertices = 0usize;
        let mut total_indices = 0usize;
        for (i, fragment) in fragments.iter().enumerate() {
            fragment.validate().map_err(|err| match err {
                DioramaError::MalformedFragment(msg) => {
                    DioramaError::MalformedFragment(format!("fragment {i}: {msg}"))
                }
                other => other,
            })?;
            total_vertices += fragment.vertex_count();
            total_indices += fragment.index_count();
        }
        if total_vertices > u32::MAX as usize {
            return Err(DioramaError::MalformedFragment(format!(
                "merged vertex count {total_vertices} does not fit 32-bit indices"
            )));
        }

        let mut merged = GeometryData::with_capacity(total_vertices, total_indices);
        for fragment in fragments {
            let offset = merged.vertices.len() as u32;
            merged.vertices.extend_from_slice(&fragment.vertices);
            merged.normals.extend_from_slice(&fragment.normals);
            merged.tex_coords.extend_from_slice(&fragment.tex_coords);
            merged
                .indices
                .extend(fragment.indices.iter().map(|&i| i + offset));
        }

        Ok(merged)
    }

    /// Interleave the attributes into the vertex format consumed by the renderer
    pub fn to_vertex_buffer(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }

    /// Flat `x, y, z` position array
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Flat `x, y, z` normal array
    pub fn flat_normals(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Flat `u, v` texture coordinate array
    pub fn flat_tex_coords(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    /// Raw bytes of the index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
