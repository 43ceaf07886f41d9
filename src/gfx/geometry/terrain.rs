//! # Terrain Mesh Builder
//!
//! Builds the diorama block as three renderable buffers:
//!
//! - **top**: a displaced grid whose normals follow the hill
//! - **sides**: four wall strips hugging the top surface's border, merged into one buffer
//! - **bottom**: a flat cap at `y = -height`
//!
//! Top and walls are disjoint fragments. They meet because the wall edges are
//! sampled on the same lattice as the grid border, not because they share vertices.

use super::primitives::{compute_vertex_normals, displace, generate_grid, lattice};
use super::GeometryData;
use crate::error::{invalid, Result};
use crate::terrain::HeightField;

/// One of the four footprint edges a side wall follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// `z = +depth/2`, walked from -X to +X
    Front,
    /// `z = -depth/2`, walked from +X to -X
    Back,
    /// `x = +width/2`, walked from +Z to -Z
    Right,
    /// `x = -width/2`, walked from -Z to +Z
    Left,
}

impl Edge {
    /// Edges in merge order
    pub const ALL: [Edge; 4] = [Edge::Front, Edge::Back, Edge::Right, Edge::Left];

    /// Outward-facing wall normal
    pub fn normal(self) -> [f32; 3] {
        match self {
            Edge::Front => [0.0, 0.0, 1.0],
            Edge::Back => [0.0, 0.0, -1.0],
            Edge::Right => [1.0, 0.0, 0.0],
            Edge::Left => [-1.0, 0.0, 0.0],
        }
    }
}

/// The three buffers of the finished diorama block
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    pub top: GeometryData,
    pub sides: GeometryData,
    pub bottom: GeometryData,
}

/// Validated dimensions of the diorama block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainMeshBuilder {
    width: f32,
    depth: f32,
    height: f32,
    segments: u32,
}

impl TerrainMeshBuilder {
    /// # Arguments
    /// * `width` - Footprint size along X
    /// * `depth` - Footprint size along Z
    /// * `height` - Depth of the block below `y = 0`
    /// * `segments` - Grid resolution per edge, shared by the top and the walls
    pub fn new(width: f32, depth: f32, height: f32, segments: u32) -> Result<Self> {
        for (name, value) in [("width", width), ("depth", depth), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("terrain {name} must be positive, got {value}")));
            }
        }
        if segments == 0 {
            return Err(invalid("terrain segments must be positive"));
        }
        // The top grid's 6 * segments^2 indices must be countable in u32
        if (segments as u64).pow(2) > u32::MAX as u64 / 6 {
            return Err(invalid(format!("terrain segments {segments} too large")));
        }

        Ok(Self {
            width,
            depth,
            height,
            segments,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Displaced top surface with recomputed normals
    pub fn build_top(&self, field: &HeightField) -> GeometryData {
        let mut top = generate_grid(self.width, self.depth, self.segments, self.segments);
        displace(&mut top, field);
        compute_vertex_normals(&mut top);
        top
    }

    /// Point on `edge` at lattice step `i`, with its elevation from the field
    pub fn edge_point(&self, edge: Edge, i: u32, field: &HeightField) -> [f32; 3] {
        let n = self.segments;
        let (x, z) = match edge {
            Edge::Front => (lattice(i, n, self.width), self.depth * 0.5),
            Edge::Back => (lattice(n - i, n, self.width), -self.depth * 0.5),
            Edge::Right => (self.width * 0.5, lattice(n - i, n, self.depth)),
            Edge::Left => (-self.width * 0.5, lattice(i, n, self.depth)),
        };
        [x, field.height(x, z), z]
    }

    /// One side wall: a top/bottom vertex pair per step, two triangles between pairs
    pub fn build_side(&self, edge: Edge, field: &HeightField) -> GeometryData {
        let n = self.segments;
        let normal = edge.normal();
        let mut strip = GeometryData::with_capacity(2 * (n as usize + 1), 6 * n as usize);

        for i in 0..=n {
            let t = i as f32 / n as f32;
            let [x, y, z] = self.edge_point(edge, i, field);

            // Top vertex follows the terrain, bottom vertex sits on the floor
            strip.push_vertex([x, y, z], normal, [t, 1.0]);
            strip.push_vertex([x, -self.height, z], normal, [t, 0.0]);

            if i < n {
                let base = i * 2;
                strip.push_triangle(base, base + 1, base + 2);
                strip.push_triangle(base + 1, base + 3, base + 2);
            }
        }

        strip
    }

    /// All four walls, unmerged, in [`Edge::ALL`] order
    pub fn build_sides(&self, field: &HeightField) -> Vec<GeometryData> {
        Edge::ALL
            .iter()
            .map(|&edge| self.build_side(edge, field))
            .collect()
    }

    /// Flat cap facing down at `y = -height`
    pub fn build_bottom(&self) -> GeometryData {
        let w = self.width * 0.5;
        let d = self.depth * 0.5;
        let y = -self.height;
        let down = [0.0, -1.0, 0.0];

        let mut bottom = GeometryData::with_capacity(4, 6);
        bottom.push_vertex([-w, y, d], down, [0.0, 1.0]);
        bottom.push_vertex([w, y, d], down, [1.0, 1.0]);
        bottom.push_vertex([-w, y, -d], down, [0.0, 0.0]);
        bottom.push_vertex([w, y, -d], down, [1.0, 0.0]);
        bottom.push_triangle(0, 2, 1);
        bottom.push_triangle(2, 3, 1);
        bottom
    }

    /// Build all three buffers
    pub fn build(&self, field: &HeightField) -> Result<TerrainMesh> {
        let top = self.build_top(field);
        let sides = GeometryData::merge(&self.build_sides(field))?;
        let bottom = self.build_bottom();

        log::debug!(
            "Built terrain mesh {}x{}x{} ({} segments): top {} verts, sides {} verts, bottom {} verts",
            self.width,
            self.depth,
            self.height,
            self.segments,
            top.vertex_count(),
            sides.vertex_count(),
            bottom.vertex_count()
        );

        Ok(TerrainMesh { top, sides, bottom })
    }
}

/// Build the diorama block in one call
///
/// ```rust
/// use diorama::gfx::geometry::build_terrain_mesh;
/// use diorama::terrain::HeightField;
///
/// let field = HeightField::configure(0.8, 0.0, -1.2, 1.8).unwrap();
/// let mesh = build_terrain_mesh(&field, 6.0, 6.0, 2.0, 48).unwrap();
/// assert_eq!(mesh.top.vertex_count(), 49 * 49);
/// ```
pub fn build_terrain_mesh(
    field: &HeightField,
    width: f32,
    depth: f32,
    height: f32,
    segments: u32,
) -> Result<TerrainMesh> {
    TerrainMeshBuilder::new(width, depth, height, segments)?.build(field)
}
