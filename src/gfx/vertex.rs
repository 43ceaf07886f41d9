//! # Vertex Data Structures
//!
//! This module defines the interleaved vertex layout handed to an external
//! renderer. It carries no GPU API types, only a `#[repr(C)]` struct that can
//! be cast straight into an upload buffer.

/// A 3D vertex with position, normal and texture coordinate data.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout with a stride of 32 bytes:
///
/// | Offset | Attribute   | Format      |
/// |--------|-------------|-------------|
/// | 0      | position    | `f32 x 3`   |
/// | 12     | normal      | `f32 x 3`   |
/// | 24     | tex_coords  | `f32 x 2`   |
///
/// # Examples
///
/// ```rust
/// use diorama::gfx::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     tex_coords: [0.5, 0.5],
/// };
/// let bytes: &[u8] = bytemuck::bytes_of(&vertex);
/// assert_eq!(bytes.len(), Vertex3D::STRIDE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub tex_coords: [f32; 2],
}

impl Vertex3D {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex3D>();

    /// Byte offset of the normal attribute.
    pub const NORMAL_OFFSET: usize = std::mem::size_of::<[f32; 3]>();

    /// Byte offset of the texture coordinate attribute.
    pub const TEX_COORDS_OFFSET: usize = 2 * std::mem::size_of::<[f32; 3]>();
}
