//! # Particle Systems
//!
//! Fixed-size particle pools advanced by an explicit [`ParticleSystem::tick`].
//! Two kinematics are available: falling [snow](super::snow) and rising
//! chimney [smoke](super::smoke). Particles are never created or destroyed
//! after construction; a particle that leaves its valid state is respawned in
//! place during the same tick.
//!
//! ## Examples
//!
//! ### Snowfall over a 6x6 footprint
//! ```rust
//! use diorama::simulation::particles::{BoundingVolume, ParticleSystem};
//!
//! let mut snow = ParticleSystem::snow()
//!     .with_count(600)
//!     .with_volume(BoundingVolume::around_footprint(6.0, 6.0, 2.0, 0.5, 6.0).unwrap())
//!     .with_seed(7)
//!     .build()
//!     .unwrap();
//!
//! snow.tick(0.016, 0.016);
//! assert_eq!(snow.positions().len(), 600);
//! ```
//!
//! ### Smoke from a chimney
//! ```rust
//! use diorama::simulation::particles::ParticleSystem;
//! use diorama::simulation::smoke::SmokeKinematics;
//!
//! let smoke = ParticleSystem::smoke()
//!     .with_kinematics(SmokeKinematics { origin: [0.3, 2.5, -1.2], ..Default::default() })
//!     .build()
//!     .unwrap();
//! assert_eq!(smoke.len(), 25);
//! ```

use super::smoke::{SmokeKinematics, SmokeParticle};
use super::snow::{SnowKinematics, SnowParticle};
use super::stats::SimulationStats;
use super::traits::Simulation;
use crate::error::{invalid, DioramaError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default pool size for snow
pub const DEFAULT_SNOW_COUNT: usize = 600;
/// Default pool size for smoke
pub const DEFAULT_SMOKE_COUNT: usize = 25;
/// Largest delta a single tick integrates, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Outcome of advancing one particle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
    /// Integrated normally
    Alive,
    /// Crossed its boundary or outlived its lifetime and was reset in place
    Respawning,
}

/// Which kinematics a system runs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Snow,
    Smoke,
}

/// Kinematic parameters for either particle kind
#[derive(Clone, Debug, PartialEq)]
pub enum Kinematics {
    Snow(SnowKinematics),
    Smoke(SmokeKinematics),
}

impl Kinematics {
    pub fn kind(&self) -> ParticleKind {
        match self {
            Kinematics::Snow(_) => ParticleKind::Snow,
            Kinematics::Smoke(_) => ParticleKind::Smoke,
        }
    }
}

impl From<SnowKinematics> for Kinematics {
    fn from(snow: SnowKinematics) -> Self {
        Kinematics::Snow(snow)
    }
}

impl From<SmokeKinematics> for Kinematics {
    fn from(smoke: SmokeKinematics) -> Self {
        Kinematics::Smoke(smoke)
    }
}

/// Axis-aligned box a particle system lives in.
///
/// For snow, `min.y` is the floor and the x/z extents are the footprint that
/// respawned flakes are scattered over. Smoke treats leaving the box like
/// reaching the end of its life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingVolume {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingVolume {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Result<Self> {
        let volume = Self { min, max };
        volume.validate()?;
        Ok(volume)
    }

    /// Box over a `width` x `depth` footprint grown by `margin` on each side,
    /// from `y = -height` up to `ceiling`.
    pub fn around_footprint(width: f32, depth: f32, height: f32, margin: f32, ceiling: f32) -> Result<Self> {
        let hw = width * 0.5 + margin;
        let hd = depth * 0.5 + margin;
        Self::new([-hw, -height, -hd], [hw, ceiling, hd])
    }

    pub fn validate(&self) -> Result<()> {
        for axis in 0..3 {
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if !lo.is_finite() || !hi.is_finite() || lo >= hi || !(hi - lo).is_finite() {
                return Err(invalid(format!(
                    "bounding volume axis {axis} is degenerate: [{lo}, {hi}]"
                )));
            }
        }
        Ok(())
    }

    /// Lowest valid `y`
    pub fn floor(&self) -> f32 {
        self.min[1]
    }

    pub fn contains(&self, point: [f32; 3]) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Uniform `(x, z)` inside the footprint
    pub(crate) fn sample_footprint<R: Rng>(&self, rng: &mut R) -> (f32, f32) {
        (
            sample(rng, [self.min[0], self.max[0]]),
            sample(rng, [self.min[2], self.max[2]]),
        )
    }
}

/// Uniform draw from `[lo, hi)`, or `lo` when the range is empty
pub(crate) fn sample<R: Rng>(rng: &mut R, range: [f32; 2]) -> f32 {
    let [lo, hi] = range;
    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Per-particle state, one variant per kinematics
#[derive(Clone, Debug)]
enum Pool {
    Snow {
        kinematics: SnowKinematics,
        particles: Vec<SnowParticle>,
    },
    Smoke {
        kinematics: SmokeKinematics,
        particles: Vec<SmokeParticle>,
    },
}

/// A fixed-size particle pool with its own random source
pub struct ParticleSystem {
    name: String,
    pool: Pool,
    positions: Vec<[f32; 3]>,
    volume: BoundingVolume,
    rng: StdRng,
    seed: Option<u64>,
    max_delta: f32,
    running: bool,
    stats: SimulationStats,
}

impl ParticleSystem {
    /// Builder preloaded with snow defaults
    pub fn snow() -> ParticleSystemBuilder {
        ParticleSystemBuilder::new(Kinematics::Snow(SnowKinematics::default()))
    }

    /// Builder preloaded with smoke defaults
    pub fn smoke() -> ParticleSystemBuilder {
        ParticleSystemBuilder::new(Kinematics::Smoke(SmokeKinematics::default()))
    }

    pub fn kind(&self) -> ParticleKind {
        match self.pool {
            Pool::Snow { .. } => ParticleKind::Snow,
            Pool::Smoke { .. } => ParticleKind::Smoke,
        }
    }

    pub fn kinematics(&self) -> Kinematics {
        match &self.pool {
            Pool::Snow { kinematics, .. } => Kinematics::Snow(kinematics.clone()),
            Pool::Smoke { kinematics, .. } => Kinematics::Smoke(kinematics.clone()),
        }
    }

    pub fn volume(&self) -> &BoundingVolume {
        &self.volume
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Current particle positions, one `[x, y, z]` per particle
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Mutable access to positions for hosts that nudge particles directly.
    /// The pool size cannot change through this slice.
    pub fn positions_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.positions
    }

    /// Position buffer as raw bytes, ready for upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Per-flake state, if this is a snow system
    pub fn snow_particles(&self) -> Option<&[SnowParticle]> {
        match &self.pool {
            Pool::Snow { particles, .. } => Some(particles),
            Pool::Smoke { .. } => None,
        }
    }

    /// Per-puff state, if this is a smoke system
    pub fn smoke_particles(&self) -> Option<&[SmokeParticle]> {
        match &self.pool {
            Pool::Smoke { particles, .. } => Some(particles),
            Pool::Snow { .. } => None,
        }
    }

    /// Mutable per-puff state, if this is a smoke system
    pub fn smoke_particles_mut(&mut self) -> Option<&mut [SmokeParticle]> {
        match &mut self.pool {
            Pool::Smoke { particles, .. } => Some(particles),
            Pool::Snow { .. } => None,
        }
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Clamp a host-supplied delta into `[0, max_delta]`
    fn sanitize_delta(&self, delta_time: f32) -> f32 {
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!(
                "{}: ignoring invalid tick delta {delta_time}",
                self.name
            );
            0.0
        } else if delta_time > self.max_delta {
            log::debug!(
                "{}: clamping tick delta {delta_time} to {}",
                self.name,
                self.max_delta
            );
            self.max_delta
        } else {
            delta_time
        }
    }

    /// Advance every particle once.
    ///
    /// # Arguments
    /// * `elapsed` - Total simulation time in seconds, drives the sway/drift waves
    /// * `delta_time` - Time since the previous tick; negative or non-finite
    ///   values count as 0 and large values are clamped to [`max_delta`](Self::max_delta)
    ///
    /// Returns the number of particles respawned during this tick.
    pub fn tick(&mut self, elapsed: f32, delta_time: f32) -> usize {
        if !self.running {
            return 0;
        }

        let dt = self.sanitize_delta(delta_time);
        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        let volume = self.volume;
        let mut respawned = 0;

        match &mut self.pool {
            Pool::Snow {
                kinematics,
                particles,
            } => {
                for (position, particle) in self.positions.iter_mut().zip(particles.iter()) {
                    let state =
                        kinematics.advance(&volume, position, particle, elapsed, dt, &mut self.rng);
                    if state == ParticleState::Respawning {
                        respawned += 1;
                    }
                }
            }
            Pool::Smoke {
                kinematics,
                particles,
            } => {
                let pairs = self.positions.iter_mut().zip(particles.iter_mut());
                for (index, (position, particle)) in pairs.enumerate() {
                    let state = kinematics.advance(
                        &volume,
                        index,
                        position,
                        particle,
                        elapsed,
                        dt,
                        &mut self.rng,
                    );
                    if state == ParticleState::Respawning {
                        respawned += 1;
                    }
                }
            }
        }

        self.stats.record_step(dt, respawned);
        respawned
    }

    /// Refill the pool as at construction. A seeded system replays the same
    /// sequence after a reset.
    pub fn reset(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let kinematics = self.kinematics();
        let count = self.positions.len();
        let (positions, pool) = populate(&kinematics, count, &self.volume, &mut self.rng);
        self.positions = positions;
        self.pool = pool;
        self.stats.reset_stats();
    }
}

/// Fill a fresh pool of `count` particles
fn populate(kinematics: &Kinematics, count: usize, volume: &BoundingVolume, rng: &mut StdRng) -> (Vec<[f32; 3]>, Pool) {
    let mut positions = Vec::with_capacity(count);
    let pool = match kinematics {
        Kinematics::Snow(snow) => {
            let mut particles = Vec::with_capacity(count);
            for _ in 0..count {
                let (position, particle) = snow.spawn(volume, rng);
                positions.push(position);
                particles.push(particle);
            }
            Pool::Snow {
                kinematics: snow.clone(),
                particles,
            }
        }
        Kinematics::Smoke(smoke) => {
            let mut particles = Vec::with_capacity(count);
            for _ in 0..count {
                let (position, particle) = smoke.spawn(rng);
                positions.push(position);
                particles.push(particle);
            }
            Pool::Smoke {
                kinematics: smoke.clone(),
                particles,
            }
        }
    };
    (positions, pool)
}

impl Simulation for ParticleSystem {
    fn tick(&mut self, elapsed: f32, delta_time: f32) -> usize {
        ParticleSystem::tick(self, elapsed, delta_time)
    }

    fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self) {
        ParticleSystem::reset(self);
    }

    fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Builder for creating particle systems
pub struct ParticleSystemBuilder {
    name: Option<String>,
    count: usize,
    volume: BoundingVolume,
    kinematics: Kinematics,
    seed: Option<u64>,
    rng: Option<StdRng>,
    max_delta: f32,
}

impl ParticleSystemBuilder {
    fn new(kinematics: Kinematics) -> Self {
        let (count, ceiling) = match kinematics.kind() {
            ParticleKind::Snow => (DEFAULT_SNOW_COUNT, 6.0),
            ParticleKind::Smoke => (DEFAULT_SMOKE_COUNT, 8.0),
        };
        Self {
            name: None,
            count,
            volume: BoundingVolume {
                min: [-3.5, -2.0, -3.5],
                max: [3.5, ceiling, 3.5],
            },
            kinematics,
            seed: None,
            rng: None,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the number of particles
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the bounding volume
    pub fn with_volume(mut self, volume: BoundingVolume) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the bounding volume from per-axis ranges
    pub fn with_bounds(mut self, x_range: [f32; 2], y_range: [f32; 2], z_range: [f32; 2]) -> Self {
        self.volume = BoundingVolume {
            min: [x_range[0], y_range[0], z_range[0]],
            max: [x_range[1], y_range[1], z_range[1]],
        };
        self
    }

    /// Replaces the kinematic parameters, which also selects the particle kind
    pub fn with_kinematics(mut self, kinematics: impl Into<Kinematics>) -> Self {
        self.kinematics = kinematics.into();
        self
    }

    /// Seeds the random source for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = None;
        self
    }

    /// Uses a caller-supplied random source
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self.seed = None;
        self
    }

    /// Sets the largest delta one tick integrates
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Validates the configuration and fills the pool
    pub fn build(self) -> Result<ParticleSystem> {
        if self.count == 0 {
            return Err(invalid("particle count must be positive"));
        }
        if !self.max_delta.is_finite() || self.max_delta <= 0.0 {
            return Err(invalid(format!(
                "max tick delta must be positive, got {}",
                self.max_delta
            )));
        }
        self.volume.validate()?;
        match &self.kinematics {
            Kinematics::Snow(snow) => snow.validate(&self.volume)?,
            Kinematics::Smoke(smoke) => smoke.validate(&self.volume)?,
        }

        let mut rng = match (self.rng, self.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => StdRng::seed_from_u64(seed),
            (None, None) => StdRng::from_os_rng(),
        };

        let kind = self.kinematics.kind();
        let name = self.name.unwrap_or_else(|| format!("{kind:?}"));
        let (positions, pool) = populate(&self.kinematics, self.count, &self.volume, &mut rng);

        log::debug!("Created {kind:?} particle system '{name}' with {} particles", self.count);

        Ok(ParticleSystem {
            name,
            pool,
            positions,
            volume: self.volume,
            rng,
            seed: self.seed,
            max_delta: self.max_delta,
            running: true,
            stats: SimulationStats::default(),
        })
    }
}

/// Create a particle system from explicit parameters.
///
/// `kind` must agree with the variant of `kinematics`.
pub fn create_particle_system(
    kind: ParticleKind,
    count: usize,
    volume: BoundingVolume,
    kinematics: Kinematics,
) -> Result<ParticleSystem> {
    if kinematics.kind() != kind {
        return Err(DioramaError::InvalidConfiguration(format!(
            "{kind:?} system given {:?} kinematics",
            kinematics.kind()
        )));
    }
    ParticleSystemBuilder::new(kinematics)
        .with_count(count)
        .with_volume(volume)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snow_volume() -> BoundingVolume {
        BoundingVolume::around_footprint(6.0, 6.0, 2.0, 0.5, 6.0).unwrap()
    }

    fn chimney() -> SmokeKinematics {
        SmokeKinematics {
            origin: [0.3, 2.5, -1.2],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_pool_sizes() {
        let snow = ParticleSystem::snow().with_seed(1).build().unwrap();
        assert_eq!(snow.len(), 600);
        assert_eq!(snow.kind(), ParticleKind::Snow);
        assert_eq!(snow.snow_particles().unwrap().len(), 600);
        assert!(snow.smoke_particles().is_none());

        let smoke = ParticleSystem::smoke()
            .with_kinematics(chimney())
            .with_seed(1)
            .build()
            .unwrap();
        assert_eq!(smoke.len(), 25);
        assert_eq!(smoke.kind(), ParticleKind::Smoke);
        assert_eq!(smoke.position_bytes().len(), 25 * 12);
    }

    #[test]
    fn test_initial_snow_inside_volume() {
        let snow = ParticleSystem::snow().with_seed(2).build().unwrap();
        for p in snow.positions() {
            assert!(p[0] >= -3.5 && p[0] < 3.5);
            assert!(p[1] >= 1.0 && p[1] < 6.0);
            assert!(p[2] >= -3.5 && p[2] < 3.5);
        }
        for flake in snow.snow_particles().unwrap() {
            assert!(flake.speed >= 0.3 && flake.speed < 1.02);
        }
    }

    #[test]
    fn test_snow_below_floor_respawns_next_tick() {
        let mut snow = ParticleSystem::snow()
            .with_volume(snow_volume())
            .with_seed(3)
            .build()
            .unwrap();
        snow.positions_mut()[42] = [1.0, -2.0001, 1.0];

        let respawned = snow.tick(1.0, 1.0 / 60.0);
        assert!(respawned >= 1);
        let p = snow.positions()[42];
        assert!(p[1] >= 4.0 && p[1] < 6.0, "y = {}", p[1]);
        assert!(p[0] >= -3.5 && p[0] < 3.5);
        assert!(p[2] >= -3.5 && p[2] < 3.5);
    }

    #[test]
    fn test_snow_never_stays_below_floor() {
        let mut snow = ParticleSystem::snow().with_seed(4).build().unwrap();
        let mut elapsed = 0.0;
        for frame in 0..2000 {
            let dt = if frame % 97 == 0 { 0.1 } else { 1.0 / 60.0 };
            elapsed += dt;
            snow.tick(elapsed, dt);
            assert!(snow.positions().iter().all(|p| p[1] >= -2.0));
        }
        assert!(snow.stats().respawns > 0);
    }

    #[test]
    fn test_smoke_age_bounded_by_lifetime() {
        let mut smoke = ParticleSystem::smoke()
            .with_kinematics(chimney())
            .with_seed(5)
            .build()
            .unwrap();
        let mut elapsed = 0.0;
        for frame in 0..1500 {
            let dt = if frame % 50 == 0 { 0.09 } else { 1.0 / 60.0 };
            elapsed += dt;
            smoke.tick(elapsed, dt);
            for puff in smoke.smoke_particles().unwrap() {
                assert!(puff.age <= puff.max_lifetime);
                assert!(puff.max_lifetime >= 2.0 && puff.max_lifetime < 3.5);
            }
        }
        assert!(smoke.stats().respawns >= 25);
    }

    #[test]
    fn test_short_lived_smoke_starts_within_lifetime() {
        let mut smoke = ParticleSystem::smoke()
            .with_kinematics(SmokeKinematics {
                lifetime_range: [0.5, 0.6],
                ..chimney()
            })
            .with_seed(3)
            .build()
            .unwrap();
        for puff in smoke.smoke_particles().unwrap() {
            assert!(puff.age < puff.max_lifetime);
        }

        smoke.tick(1.0 / 60.0, 1.0 / 60.0);
        for puff in smoke.smoke_particles().unwrap() {
            assert!(puff.age <= puff.max_lifetime);
        }
    }

    #[test]
    fn test_huge_and_invalid_deltas_stay_finite() {
        let mut snow = ParticleSystem::snow().with_seed(6).build().unwrap();
        let mut smoke = ParticleSystem::smoke()
            .with_kinematics(chimney())
            .with_seed(6)
            .build()
            .unwrap();

        for dt in [1.0e6, f32::INFINITY, f32::NAN, -5.0, 3600.0, 0.0] {
            snow.tick(1.0e7, dt);
            smoke.tick(f32::NAN, dt);
            for p in snow.positions().iter().chain(smoke.positions()) {
                assert!(p.iter().all(|c| c.is_finite()), "non-finite position {p:?}");
            }
        }
        assert!(snow.positions().iter().all(|p| p[1] >= -2.0));
        assert!(snow.stats().total_time() <= 3.0 * DEFAULT_MAX_DELTA + 1e-6);
    }

    #[test]
    fn test_same_seed_same_simulation() {
        let run = |seed| {
            let mut snow = ParticleSystem::snow().with_count(50).with_seed(seed).build().unwrap();
            for frame in 0..300 {
                snow.tick(frame as f32 / 60.0, 1.0 / 60.0);
            }
            snow.positions().to_vec()
        };
        assert_eq!(run(8), run(8));
        assert_ne!(run(8), run(9));
    }

    #[test]
    fn test_reset_replays_seeded_pool() {
        let mut snow = ParticleSystem::snow().with_count(20).with_seed(10).build().unwrap();
        let initial = snow.positions().to_vec();
        for frame in 0..60 {
            snow.tick(frame as f32 / 60.0, 1.0 / 60.0);
        }
        assert_ne!(snow.positions(), initial.as_slice());

        snow.reset();
        assert_eq!(snow.positions(), initial.as_slice());
        assert_eq!(snow.stats().step_count, 0);
    }

    #[test]
    fn test_paused_system_does_not_move() {
        let mut snow = ParticleSystem::snow().with_count(10).with_seed(11).build().unwrap();
        Simulation::set_running(&mut snow, false);
        let before = snow.positions().to_vec();
        assert_eq!(snow.tick(1.0, 0.05), 0);
        assert_eq!(snow.positions(), before.as_slice());
    }

    #[test]
    fn test_rejects_bad_configuration() {
        let err = |result: Result<ParticleSystem>| match result {
            Err(DioramaError::InvalidConfiguration(_)) => (),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("configuration accepted"),
        };

        err(ParticleSystem::snow().with_count(0).build());
        err(ParticleSystem::snow().with_max_delta(0.0).build());
        err(ParticleSystem::snow().with_bounds([1.0, -1.0], [-2.0, 6.0], [-3.0, 3.0]).build());
        err(ParticleSystem::smoke()
            .with_kinematics(SmokeKinematics {
                lifetime_range: [3.0, 1.0],
                ..chimney()
            })
            .build());
        err(ParticleSystem::smoke()
            .with_kinematics(SmokeKinematics {
                lifetime_range: [-1.0, 1.0],
                ..chimney()
            })
            .build());
        err(ParticleSystem::snow()
            .with_bounds([-3.0e38, 3.0e38], [-2.0, 6.0], [-3.0, 3.0])
            .with_seed(1)
            .build());
        err(ParticleSystem::smoke()
            .with_kinematics(SmokeKinematics {
                rise_range: [-3.0e38, 3.0e38],
                ..chimney()
            })
            .with_seed(1)
            .build());
        err(create_particle_system(
            ParticleKind::Snow,
            10,
            snow_volume(),
            Kinematics::Smoke(chimney()),
        ));
    }

    #[test]
    fn test_create_particle_system() {
        let smoke = create_particle_system(
            ParticleKind::Smoke,
            12,
            BoundingVolume::new([-4.0, -2.0, -4.0], [4.0, 8.0, 4.0]).unwrap(),
            chimney().into(),
        )
        .unwrap();
        assert_eq!(smoke.len(), 12);
        assert_eq!(smoke.name(), "Smoke");
        assert_eq!(smoke.kinematics(), Kinematics::Smoke(chimney()));
    }

    #[test]
    fn test_bounding_volume() {
        let volume = snow_volume();
        assert_eq!(volume.min, [-3.5, -2.0, -3.5]);
        assert_eq!(volume.max, [3.5, 6.0, 3.5]);
        assert_eq!(volume.floor(), -2.0);
        assert!(volume.contains([0.0, 0.0, 0.0]));
        assert!(!volume.contains([0.0, -2.1, 0.0]));
        assert!(BoundingVolume::new([0.0; 3], [0.0, 1.0, 1.0]).is_err());
    }
}
