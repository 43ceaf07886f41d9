//! # Falling Snow Kinematics
//!
//! Each flake falls at its own constant speed and drifts sideways on two
//! out-of-phase sine waves. A flake that drops through the floor of its
//! bounding volume is immediately re-launched from a fresh random point high
//! above the footprint, so a fixed pool gives endless snowfall.

use super::particles::{sample, BoundingVolume, ParticleState};
use crate::error::{check_range, invalid, Result};
use rand::Rng;
use std::f32::consts::TAU;

/// Motion parameters for the snow variant
#[derive(Clone, Debug, PartialEq)]
pub struct SnowKinematics {
    /// Fall speed range in units per second, drawn once per flake
    pub speed_range: [f32; 2],
    /// Peak sideways drift speed in units per second
    pub drift: f32,
    /// Drift frequencies for the x and z axes
    pub drift_frequency: [f32; 2],
    /// Height band a flake re-enters from after crossing the floor
    pub spawn_height: [f32; 2],
    /// Height band used when the pool is first filled
    pub initial_height: [f32; 2],
}

impl Default for SnowKinematics {
    fn default() -> Self {
        Self {
            speed_range: [0.3, 1.02],
            drift: 0.12,
            drift_frequency: [0.5, 0.35],
            spawn_height: [4.0, 6.0],
            initial_height: [1.0, 6.0],
        }
    }
}

/// Per-flake state that survives respawns
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowParticle {
    pub speed: f32,
    pub phase: f32,
}

impl SnowKinematics {
    pub(crate) fn validate(&self, volume: &BoundingVolume) -> Result<()> {
        check_range("snow speed range", self.speed_range)?;
        if self.speed_range[0] < 0.0 {
            return Err(invalid("snow speed must not be negative"));
        }
        if !self.drift.is_finite() || self.drift < 0.0 {
            return Err(invalid(format!("snow drift must be >= 0, got {}", self.drift)));
        }
        if !self.drift_frequency.iter().all(|f| f.is_finite()) {
            return Err(invalid("snow drift frequencies must be finite"));
        }
        check_range("snow spawn height", self.spawn_height)?;
        check_range("snow initial height", self.initial_height)?;

        let floor = volume.floor();
        if self.spawn_height[0] <= floor {
            return Err(invalid(format!(
                "snow spawn height {} must be above the floor {floor}",
                self.spawn_height[0]
            )));
        }
        if self.initial_height[0] < floor {
            return Err(invalid(format!(
                "snow initial height {} is below the floor {floor}",
                self.initial_height[0]
            )));
        }
        Ok(())
    }

    /// Fresh flake for the initial pool
    pub(crate) fn spawn<R: Rng>(
        &self,
        volume: &BoundingVolume,
        rng: &mut R,
    ) -> ([f32; 3], SnowParticle) {
        let (x, z) = volume.sample_footprint(rng);
        let position = [x, sample(rng, self.initial_height), z];
        let particle = SnowParticle {
            speed: sample(rng, self.speed_range),
            phase: rng.random_range(0.0..TAU),
        };
        (position, particle)
    }

    /// Advance one flake by `dt` seconds, respawning it if it fell through the floor
    pub(crate) fn advance<R: Rng>(
        &self,
        volume: &BoundingVolume,
        position: &mut [f32; 3],
        particle: &SnowParticle,
        elapsed: f32,
        dt: f32,
        rng: &mut R,
    ) -> ParticleState {
        let [fx, fz] = self.drift_frequency;
        position[1] -= particle.speed * dt;
        position[0] += (elapsed * fx + particle.phase).sin() * self.drift * dt;
        position[2] += (elapsed * fz + particle.phase).cos() * self.drift * dt;

        if position[1] < volume.floor() {
            let (x, z) = volume.sample_footprint(rng);
            *position = [x, sample(rng, self.spawn_height), z];
            return ParticleState::Respawning;
        }

        ParticleState::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn volume() -> BoundingVolume {
        BoundingVolume::around_footprint(6.0, 6.0, 2.0, 0.5, 6.0).unwrap()
    }

    #[test]
    fn test_falls_and_drifts() {
        let snow = SnowKinematics::default();
        let volume = volume();
        let particle = SnowParticle { speed: 0.5, phase: 0.0 };
        let mut position = [0.0, 3.0, 0.0];
        let mut rng = StdRng::seed_from_u64(1);

        let state = snow.advance(&volume, &mut position, &particle, 0.0, 0.1, &mut rng);
        assert_eq!(state, ParticleState::Alive);
        assert!((position[1] - 2.95).abs() < 1e-6);
        // sin(0) = 0, cos(0) = 1
        assert_eq!(position[0], 0.0);
        assert!((position[2] - 0.012).abs() < 1e-6);
    }

    #[test]
    fn test_respawns_below_floor() {
        let snow = SnowKinematics::default();
        let volume = volume();
        let particle = SnowParticle { speed: 0.5, phase: 1.0 };
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..100 {
            let mut position = [3.4, -2.0001, -3.4];
            let state = snow.advance(&volume, &mut position, &particle, 12.0, 1.0 / 60.0, &mut rng);
            assert_eq!(state, ParticleState::Respawning);
            assert!(position[1] >= 4.0 && position[1] < 6.0);
            assert!(position[0] >= -3.5 && position[0] < 3.5);
            assert!(position[2] >= -3.5 && position[2] < 3.5);
        }
    }

    #[test]
    fn test_respawn_draws_are_fresh() {
        let snow = SnowKinematics::default();
        let volume = volume();
        let particle = SnowParticle { speed: 1.0, phase: 0.0 };
        let mut rng = StdRng::seed_from_u64(4);

        let mut first = [0.0, -3.0, 0.0];
        let mut second = [0.0, -3.0, 0.0];
        snow.advance(&volume, &mut first, &particle, 0.0, 0.0, &mut rng);
        snow.advance(&volume, &mut second, &particle, 0.0, 0.0, &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate() {
        let volume = volume();
        assert!(SnowKinematics::default().validate(&volume).is_ok());

        let inverted = SnowKinematics {
            speed_range: [1.0, 0.5],
            ..Default::default()
        };
        assert!(inverted.validate(&volume).is_err());

        let buried = SnowKinematics {
            spawn_height: [-3.0, -2.5],
            ..Default::default()
        };
        assert!(buried.validate(&volume).is_err());

        let negative = SnowKinematics {
            drift: -0.1,
            ..Default::default()
        };
        assert!(negative.validate(&volume).is_err());
    }
}
