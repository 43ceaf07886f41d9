//! # Terrain Height Field
//!
//! The diorama ground is a single Gaussian hill. The same [`HeightField`] value
//! displaces the top surface mesh, shapes the side walls and lifts props onto
//! the snow, so every consumer agrees on where the ground is.
//!
//! ```rust
//! use diorama::terrain::HeightField;
//!
//! let hill = HeightField::configure(0.8, 0.0, -1.2, 1.8).unwrap();
//! assert_eq!(hill.height(0.0, -1.2), 0.8);
//! ```

use crate::error::{invalid, Result};
use cgmath::{InnerSpace, Vector3};

/// Smooth radially-symmetric bump: `amplitude * exp(-r² / 2σ²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightField {
    amplitude: f32,
    center_x: f32,
    center_z: f32,
    sigma: f32,
    /// Cached `2σ²`
    two_sigma_sq: f32,
}

impl HeightField {
    /// Configure a height field.
    ///
    /// # Arguments
    /// * `amplitude` - Peak height at the center, must be `>= 0`
    /// * `center_x`, `center_z` - Horizontal position of the peak
    /// * `sigma` - Spread of the hill, must be `> 0`
    ///
    /// Non-finite parameters are rejected as well, so [`height`](Self::height)
    /// never yields NaN for finite input.
    pub fn configure(amplitude: f32, center_x: f32, center_z: f32, sigma: f32) -> Result<Self> {
        if !(amplitude.is_finite() && center_x.is_finite() && center_z.is_finite() && sigma.is_finite()) {
            return Err(invalid("height field parameters must be finite"));
        }
        if amplitude < 0.0 {
            return Err(invalid(format!("hill amplitude must be >= 0, got {amplitude}")));
        }
        if sigma <= 0.0 {
            return Err(invalid(format!("hill sigma must be > 0, got {sigma}")));
        }

        // A tiny sigma squares to zero or a subnormal, a huge one to infinity
        let two_sigma_sq = 2.0 * sigma * sigma;
        if !two_sigma_sq.is_normal() {
            return Err(invalid(format!("hill sigma {sigma} is out of range")));
        }

        Ok(Self {
            amplitude,
            center_x,
            center_z,
            sigma,
            two_sigma_sq,
        })
    }

    /// A flat field (zero amplitude) with unit spread.
    pub fn flat() -> Self {
        Self {
            amplitude: 0.0,
            center_x: 0.0,
            center_z: 0.0,
            sigma: 1.0,
            two_sigma_sq: 2.0,
        }
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x, self.center_z)
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Terrain elevation at `(x, z)`.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        let dist_sq = dx * dx + dz * dz;
        self.amplitude * (-dist_sq / self.two_sigma_sq).exp()
    }

    /// Analytic partial derivatives `(dy/dx, dy/dz)` at `(x, z)`.
    pub fn gradient(&self, x: f32, z: f32) -> (f32, f32) {
        let h = self.height(x, z);
        let inv_sigma_sq = 2.0 / self.two_sigma_sq;
        (
            -h * (x - self.center_x) * inv_sigma_sq,
            -h * (z - self.center_z) * inv_sigma_sq,
        )
    }

    /// Unit surface normal at `(x, z)`, always pointing up (+Y).
    pub fn normal(&self, x: f32, z: f32) -> [f32; 3] {
        let (dx, dz) = self.gradient(x, z);
        Vector3::new(-dx, 1.0, -dz).normalize().into()
    }

    /// Lift a point onto the surface: `[x, height(x, z) + y_offset, z]`.
    pub fn place(&self, x: f32, y_offset: f32, z: f32) -> [f32; 3] {
        [x, self.height(x, z) + y_offset, z]
    }
}
