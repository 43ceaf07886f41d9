//! Core simulation trait
//!
//! Defines the interface a frame-driven simulation exposes to the
//! [`SimulationManager`](super::manager::SimulationManager) and to the host
//! renderer that uploads its positions.

use super::stats::SimulationStats;

/// A simulation advanced by explicit ticks from an external clock
pub trait Simulation {
    /// Advance simulation state
    ///
    /// # Arguments
    /// * `elapsed` - Total simulation time in seconds
    /// * `delta_time` - Time since the previous tick in seconds
    ///
    /// Returns the number of particles respawned during the tick.
    fn tick(&mut self, elapsed: f32, delta_time: f32) -> usize;

    /// Current positions for the renderer to upload
    fn positions(&self) -> &[[f32; 3]];

    /// Get simulation name for display and logging
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self);

    fn stats(&self) -> &SimulationStats;

    fn as_any(&self) -> &dyn std::any::Any;

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
