//! # Chimney Smoke Kinematics
//!
//! Puffs leave the chimney mouth with a mostly upward velocity, sway sideways
//! as they rise, and are recycled back to the mouth once they outlive their
//! randomized lifetime.

use super::particles::{sample, BoundingVolume, ParticleState};
use crate::error::{check_range, invalid, Result};
use cgmath::Vector3;
use rand::Rng;

/// Motion parameters for the smoke variant
#[derive(Clone, Debug, PartialEq)]
pub struct SmokeKinematics {
    /// Emitter position (chimney mouth)
    pub origin: [f32; 3],
    /// Upward speed range in units per second
    pub rise_range: [f32; 2],
    /// Full width of the horizontal velocity jitter drawn at spawn
    pub horizontal_jitter: f32,
    /// Full width of the spawn position jitter around the origin
    pub spawn_jitter: f32,
    /// Peak sway speed in units per second
    pub sway: f32,
    pub sway_frequency: f32,
    /// Lifetime range in seconds, drawn on every respawn
    pub lifetime_range: [f32; 2],
    /// Initial ages are spread over `[0, initial_age_spread)`
    pub initial_age_spread: f32,
}

impl Default for SmokeKinematics {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            rise_range: [0.35, 0.55],
            horizontal_jitter: 0.1,
            spawn_jitter: 0.06,
            sway: 0.08,
            sway_frequency: 1.5,
            lifetime_range: [2.0, 3.5],
            initial_age_spread: 2.0,
        }
    }
}

/// Per-puff state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmokeParticle {
    pub velocity: Vector3<f32>,
    pub age: f32,
    pub max_lifetime: f32,
}

impl SmokeParticle {
    /// Fraction of the lifetime used up, in `[0, 1]`; handy for fading puffs out
    pub fn life_fraction(&self) -> f32 {
        (self.age / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// Uniform offset in `[-width/2, width/2)`
fn jitter<R: Rng>(rng: &mut R, width: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * width
}

impl SmokeKinematics {
    pub(crate) fn validate(&self, volume: &BoundingVolume) -> Result<()> {
        check_range("smoke lifetime range", self.lifetime_range)?;
        if self.lifetime_range[0] <= 0.0 {
            return Err(invalid(format!(
                "smoke lifetime must be positive, got {}",
                self.lifetime_range[0]
            )));
        }
        check_range("smoke rise range", self.rise_range)?;
        for (name, value) in [
            ("horizontal jitter", self.horizontal_jitter),
            ("spawn jitter", self.spawn_jitter),
            ("sway", self.sway),
            ("initial age spread", self.initial_age_spread),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("smoke {name} must be >= 0, got {value}")));
            }
        }
        if !self.sway_frequency.is_finite() {
            return Err(invalid("smoke sway frequency must be finite"));
        }
        if !volume.contains(self.origin) {
            return Err(invalid(format!(
                "smoke origin {:?} lies outside its bounding volume",
                self.origin
            )));
        }
        Ok(())
    }

    fn emit<R: Rng>(&self, rng: &mut R) -> ([f32; 3], SmokeParticle) {
        let position = [
            self.origin[0] + jitter(rng, self.spawn_jitter),
            self.origin[1],
            self.origin[2] + jitter(rng, self.spawn_jitter),
        ];
        let velocity = Vector3::new(
            jitter(rng, self.horizontal_jitter),
            sample(rng, self.rise_range),
            jitter(rng, self.horizontal_jitter),
        );
        let particle = SmokeParticle {
            velocity,
            age: 0.0,
            max_lifetime: sample(rng, self.lifetime_range),
        };
        (position, particle)
    }

    /// Fresh puff for the initial pool, aged so the pool does not pulse in unison.
    ///
    /// The starting age stays below the puff's own lifetime, however wide
    /// `initial_age_spread` is.
    pub(crate) fn spawn<R: Rng>(&self, rng: &mut R) -> ([f32; 3], SmokeParticle) {
        let (mut position, mut particle) = self.emit(rng);
        let spread = self.initial_age_spread.min(particle.max_lifetime);
        particle.age = sample(rng, [0.0, spread]);

        // Start the puff where it would be had it been emitted `age` seconds ago
        position[0] += particle.velocity.x * particle.age;
        position[1] += particle.velocity.y * particle.age;
        position[2] += particle.velocity.z * particle.age;
        (position, particle)
    }

    /// Horizontal sway for puff `index` at time `elapsed`
    fn sway_at(&self, index: usize, elapsed: f32) -> Vector3<f32> {
        let i = index as f32;
        Vector3::new(
            (elapsed * self.sway_frequency + i * 0.7).sin() * self.sway,
            0.0,
            (elapsed * self.sway_frequency * 0.8 + i * 1.3).cos() * self.sway,
        )
    }

    /// Advance puff `index` by `dt` seconds, recycling it at the end of its life
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn advance<R: Rng>(
        &self,
        volume: &BoundingVolume,
        index: usize,
        position: &mut [f32; 3],
        particle: &mut SmokeParticle,
        elapsed: f32,
        dt: f32,
        rng: &mut R,
    ) -> ParticleState {
        particle.age += dt;
        let step = (particle.velocity + self.sway_at(index, elapsed)) * dt;
        position[0] += step.x;
        position[1] += step.y;
        position[2] += step.z;

        if particle.age > particle.max_lifetime || !volume.contains(*position) {
            let (fresh_position, fresh) = self.emit(rng);
            *position = fresh_position;
            *particle = fresh;
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
        BoundingVolume::new([-4.0, -2.0, -4.0], [4.0, 8.0, 4.0]).unwrap()
    }

    fn chimney() -> SmokeKinematics {
        SmokeKinematics {
            origin: [0.3, 2.5, -1.2],
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_ages_are_staggered() {
        let smoke = chimney();
        let mut rng = StdRng::seed_from_u64(3);
        let ages: Vec<f32> = (0..25).map(|_| smoke.spawn(&mut rng).1.age).collect();

        assert!(ages.iter().all(|&a| (0.0..2.0).contains(&a)));
        let distinct = ages
            .iter()
            .filter(|&&a| (a - ages[0]).abs() > 1e-3)
            .count();
        assert!(distinct > 0);
    }

    #[test]
    fn test_initial_age_never_exceeds_short_lifetime() {
        let smoke = SmokeKinematics {
            lifetime_range: [0.5, 0.6],
            ..chimney()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let (_, particle) = smoke.spawn(&mut rng);
            assert!(particle.age >= 0.0);
            assert!(particle.age < particle.max_lifetime, "age {} over {}", particle.age, particle.max_lifetime);
        }
    }

    #[test]
    fn test_rises_while_alive() {
        let smoke = chimney();
        let volume = volume();
        let mut rng = StdRng::seed_from_u64(5);
        let (mut position, mut particle) = smoke.emit(&mut rng);
        let start = position;

        let state = smoke.advance(&volume, 0, &mut position, &mut particle, 0.0, 0.1, &mut rng);
        assert_eq!(state, ParticleState::Alive);
        assert!(position[1] > start[1]);
        assert!((particle.age - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_respawns_after_lifetime() {
        let smoke = chimney();
        let volume = volume();
        let mut rng = StdRng::seed_from_u64(11);
        let (mut position, mut particle) = smoke.emit(&mut rng);
        particle.age = particle.max_lifetime - 0.01;

        let state = smoke.advance(&volume, 2, &mut position, &mut particle, 4.0, 0.05, &mut rng);
        assert_eq!(state, ParticleState::Respawning);
        assert_eq!(particle.age, 0.0);
        assert!(particle.max_lifetime >= 2.0 && particle.max_lifetime < 3.5);
        assert_eq!(position[1], 2.5);
        assert!((position[0] - 0.3).abs() <= 0.03 + 1e-6);
        assert!((position[2] + 1.2).abs() <= 0.03 + 1e-6);
        assert!(particle.velocity.y >= 0.35 && particle.velocity.y < 0.55);
        assert!(particle.velocity.x.abs() <= 0.05 && particle.velocity.z.abs() <= 0.05);
    }

    #[test]
    fn test_escaping_the_volume_counts_as_expiry() {
        let smoke = chimney();
        let volume = volume();
        let mut rng = StdRng::seed_from_u64(2);
        let (_, mut particle) = smoke.emit(&mut rng);
        let mut position = [0.3, 7.99, -1.2];
        particle.velocity = Vector3::new(0.0, 1.0, 0.0);

        let state = smoke.advance(&volume, 0, &mut position, &mut particle, 0.0, 0.1, &mut rng);
        assert_eq!(state, ParticleState::Respawning);
        assert_eq!(position[1], 2.5);
    }

    #[test]
    fn test_life_fraction() {
        let particle = SmokeParticle {
            velocity: Vector3::new(0.0, 0.4, 0.0),
            age: 1.5,
            max_lifetime: 3.0,
        };
        assert_eq!(particle.life_fraction(), 0.5);
    }

    #[test]
    fn test_validate() {
        let volume = volume();
        assert!(chimney().validate(&volume).is_ok());

        let zero_life = SmokeKinematics {
            lifetime_range: [0.0, 1.0],
            ..chimney()
        };
        assert!(zero_life.validate(&volume).is_err());

        let inverted = SmokeKinematics {
            lifetime_range: [3.0, 2.0],
            ..chimney()
        };
        assert!(inverted.validate(&volume).is_err());

        let outside = SmokeKinematics {
            origin: [10.0, 0.0, 0.0],
            ..chimney()
        };
        assert!(outside.validate(&volume).is_err());
    }
}
