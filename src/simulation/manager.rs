//! Simulation manager
//!
//! Owns the scene's particle systems and turns the host's per-frame deltas
//! into ticks. Systems can also be ticked one at a time through the
//! [`SystemHandle`] returned when they were added.

use super::particles::ParticleSystem;
use super::traits::Simulation;
use crate::error::{invalid, DioramaError, Result};

/// Upper bound on fixed steps run for a single frame
const MAX_SUBSTEPS: u32 = 8;

/// Opaque handle to a system owned by a [`SimulationManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemHandle(usize);

impl SystemHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Drives every attached simulation from one clock
pub struct SimulationManager {
    systems: Vec<Box<dyn Simulation>>,
    is_paused: bool,
    time_scale: f32,
    accumulated_time: f32,
    fixed_timestep: Option<f32>, // For deterministic simulations
    elapsed: f32,
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationManager {
    /// Create a new simulation manager
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: None,
            elapsed: 0.0,
        }
    }

    /// Attach a simulation and return its handle
    pub fn add(&mut self, simulation: impl Simulation + 'static) -> SystemHandle {
        let handle = SystemHandle(self.systems.len());
        log::debug!(
            "Attached simulation '{}' as handle {}",
            simulation.name(),
            handle.0
        );
        self.systems.push(Box::new(simulation));
        handle
    }

    pub fn get(&self, handle: SystemHandle) -> Option<&dyn Simulation> {
        self.systems.get(handle.0).map(|s| &**s)
    }

    pub fn get_mut(&mut self, handle: SystemHandle) -> Option<&mut (dyn Simulation + 'static)> {
        self.systems.get_mut(handle.0).map(|s| &mut **s)
    }

    /// Typed access to a particle system
    pub fn particles(&self, handle: SystemHandle) -> Option<&ParticleSystem> {
        self.get(handle)?.as_any().downcast_ref::<ParticleSystem>()
    }

    /// Typed mutable access to a particle system
    pub fn particles_mut(&mut self, handle: SystemHandle) -> Option<&mut ParticleSystem> {
        self.get_mut(handle)?
            .as_any_mut()
            .downcast_mut::<ParticleSystem>()
    }

    /// Tick one system with an explicit clock
    pub fn tick(&mut self, handle: SystemHandle, elapsed: f32, delta_time: f32) -> Result<usize> {
        let system = self
            .systems
            .get_mut(handle.0)
            .ok_or(DioramaError::UnknownSystem(handle.0))?;
        Ok(system.tick(elapsed, delta_time))
    }

    /// Advance every system by one host frame
    ///
    /// # Arguments
    /// * `delta_time` - Wall time since the previous frame in seconds
    ///
    /// Returns the number of particles respawned across all systems.
    pub fn update(&mut self, delta_time: f32) -> usize {
        if self.is_paused {
            return 0;
        }

        let scaled_delta = if delta_time.is_finite() && delta_time > 0.0 {
            delta_time * self.time_scale
        } else {
            0.0
        };

        if let Some(fixed_dt) = self.fixed_timestep {
            // Fixed timestep simulation for deterministic results
            self.accumulated_time += scaled_delta;

            let mut respawned = 0;
            let mut steps = 0;
            while self.accumulated_time >= fixed_dt && steps < MAX_SUBSTEPS {
                respawned += self.step_all(fixed_dt);
                self.accumulated_time -= fixed_dt;
                steps += 1;
            }
            if steps == MAX_SUBSTEPS && self.accumulated_time >= fixed_dt {
                log::debug!(
                    "Dropping {:.3}s of simulation backlog",
                    self.accumulated_time
                );
                self.accumulated_time %= fixed_dt;
            }
            respawned
        } else {
            // Variable timestep
            self.step_all(scaled_delta)
        }
    }

    fn step_all(&mut self, delta_time: f32) -> usize {
        self.elapsed += delta_time;
        let elapsed = self.elapsed;
        self.systems
            .iter_mut()
            .map(|system| system.tick(elapsed, delta_time))
            .sum()
    }

    /// Total simulated time driven through [`update`](Self::update)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Reset every system and the clock
    pub fn reset(&mut self) {
        for system in &mut self.systems {
            system.reset();
        }
        self.elapsed = 0.0;
        self.accumulated_time = 0.0;
    }

    /// Check if simulation manager is paused
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set pause state
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        for system in &mut self.systems {
            system.set_running(!paused);
        }
    }

    /// Fixed timestep in seconds, or None for variable timestep
    pub fn fixed_timestep(&self) -> Option<f32> {
        self.fixed_timestep
    }

    /// Enable or disable fixed timestep mode
    pub fn set_fixed_timestep(&mut self, timestep: Option<f32>) -> Result<()> {
        if let Some(dt) = timestep {
            if !dt.is_finite() || dt <= 0.0 {
                return Err(invalid(format!("fixed timestep must be positive, got {dt}")));
            }
        }
        self.fixed_timestep = timestep;
        self.accumulated_time = 0.0; // Reset accumulator
        Ok(())
    }

    /// Get current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set time scale (1.0 = normal speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 }; // Prevent negative time
    }
}
