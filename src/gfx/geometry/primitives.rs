//! # Primitive Shape Generation
//!
//! Grid planes and the per-vertex helpers the terrain builder layers on top of
//! them. All shapes use the Y-up convention and are generated with normals and
//! texture coordinates.

use super::GeometryData;
use crate::terrain::HeightField;
use cgmath::{InnerSpace, Vector3, Zero};

/// Coordinate of lattice line `i` out of `segments` on an axis of length
/// `extent` centered at the origin.
///
/// The top grid and the side-wall edges both go through this function, so a
/// wall vertex and the grid vertex it meets are computed identically.
pub fn lattice(i: u32, segments: u32, extent: f32) -> f32 {
    -extent * 0.5 + (i as f32 / segments as f32) * extent
}

/// Generate a flat grid in the XZ plane with its normal pointing up (+Y)
///
/// # Arguments
/// * `width` - Size along X
/// * `depth` - Size along Z
/// * `width_segments` - Number of subdivisions along X
/// * `depth_segments` - Number of subdivisions along Z
///
/// Rows run from `-depth/2` to `+depth/2`; `v` is 1 on the far (-Z) row and 0
/// on the near (+Z) row. Triangles wind counter-clockwise seen from above.
pub fn generate_grid(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);
    let columns = w_segs + 1;

    let mut data = GeometryData::with_capacity(
        columns as usize * (d_segs as usize + 1),
        w_segs as usize * d_segs as usize * 6,
    );

    for iz in 0..=d_segs {
        let z = lattice(iz, d_segs, depth);
        let v = 1.0 - iz as f32 / d_segs as f32;

        for ix in 0..=w_segs {
            let x = lattice(ix, w_segs, width);
            let u = ix as f32 / w_segs as f32;
            data.push_vertex([x, 0.0, z], [0.0, 1.0, 0.0], [u, v]);
        }
    }

    for iz in 0..d_segs {
        for ix in 0..w_segs {
            let a = ix + columns * iz;
            let b = ix + columns * (iz + 1);
            let c = (ix + 1) + columns * (iz + 1);
            let d = (ix + 1) + columns * iz;

            data.push_triangle(a, b, d);
            data.push_triangle(b, c, d);
        }
    }

    data
}

/// Set every vertex's elevation from the height field
pub fn displace(data: &mut GeometryData, field: &HeightField) {
    for position in &mut data.vertices {
        position[1] = field.height(position[0], position[2]);
    }
}

/// Recompute per-vertex normals from the current positions.
///
/// Each triangle adds its unnormalized face normal (twice its area) to its
/// three vertices, and the sums are normalized. Vertices with no usable
/// triangle keep an up-facing normal.
pub fn compute_vertex_normals(data: &mut GeometryData) {
    let mut sums = vec![Vector3::<f32>::zero(); data.vertices.len()];

    for tri in data.indices.chunks_exact(3) {
        let [ia, ib, ic] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let a = Vector3::from(data.vertices[ia]);
        let b = Vector3::from(data.vertices[ib]);
        let c = Vector3::from(data.vertices[ic]);

        let face = (b - a).cross(c - a);
        sums[ia] += face;
        sums[ib] += face;
        sums[ic] += face;
    }

    data.normals = sums
        .into_iter()
        .map(|sum| {
            let len = sum.magnitude();
            if len > f32::EPSILON && len.is_finite() {
                (sum / len).into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_generation() {
        let grid = generate_grid(2.0, 2.0, 2, 2);
        assert_eq!(grid.vertices.len(), 9); // 3x3 grid
        assert_eq!(grid.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_eq!(grid.vertices[0], [-1.0, 0.0, -1.0]);
        assert_eq!(grid.vertices[8], [1.0, 0.0, 1.0]);
        assert_eq!(grid.tex_coords[0], [0.0, 1.0]);
        assert_eq!(grid.tex_coords[8], [1.0, 0.0]);
        grid.validate().unwrap();
    }

    #[test]
    fn test_grid_winding_faces_up() {
        let mut grid = generate_grid(4.0, 3.0, 3, 5);
        compute_vertex_normals(&mut grid);
        for normal in &grid.normals {
            assert!((normal[1] - 1.0).abs() < 1e-6, "normal {normal:?}");
        }
    }

    #[test]
    fn test_zero_segments_clamped() {
        let grid = generate_grid(1.0, 1.0, 0, 0);
        assert_eq!(grid.vertex_count(), 4);
        assert_eq!(grid.triangle_count(), 2);
    }

    #[test]
    fn test_lattice_endpoints() {
        assert_eq!(lattice(0, 48, 6.0), -3.0);
        assert_eq!(lattice(48, 48, 6.0), 3.0);
        assert_eq!(lattice(24, 48, 6.0), 0.0);
    }

    #[test]
    fn test_displaced_normals_follow_slope() {
        let field = HeightField::configure(1.0, 0.0, 0.0, 1.0).unwrap();
        let mut grid = generate_grid(4.0, 4.0, 40, 40);
        displace(&mut grid, &field);
        compute_vertex_normals(&mut grid);

        // Compare against the analytic normal away from the border
        let columns = 41;
        for (ix, iz) in [(10, 20), (30, 20), (20, 10), (25, 33)] {
            let i = iz * columns + ix;
            let [x, _, z] = grid.vertices[i];
            let expected = field.normal(x, z);
            let got = grid.normals[i];
            let dot = expected[0] * got[0] + expected[1] * got[1] + expected[2] * got[2];
            assert!(dot > 0.995, "normal at ({x}, {z}) off: {got:?} vs {expected:?}");
        }

        // East of the peak the surface tilts towards +x
        let east = 20 * columns + 30;
        assert!(grid.normals[east][0] > 0.1);
    }
}
