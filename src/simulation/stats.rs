//! Running statistics kept by every particle system

/// Tick counters for one simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub step_count: u64,
    /// Simulated time integrated so far, after delta clamping
    pub delta_accumulator: f32,
    /// Particles respawned since the last reset
    pub respawns: u64,
    /// Respawns in the most recent tick
    pub last_respawns: usize,
}

impl SimulationStats {
    /// Record a simulation step
    pub fn record_step(&mut self, delta_time: f32, respawned: usize) {
        self.step_count += 1;
        self.delta_accumulator += delta_time;
        self.respawns += respawned as u64;
        self.last_respawns = respawned;
    }

    /// Total simulated time in seconds
    pub fn total_time(&self) -> f32 {
        self.delta_accumulator
    }

    /// Get average tick delta over the simulation's lifetime
    pub fn average_frame_time(&self) -> f32 {
        if self.step_count > 0 {
            self.delta_accumulator / self.step_count as f32
        } else {
            0.0
        }
    }

    /// Get simulation frequency (steps per second)
    pub fn frequency(&self) -> f32 {
        let avg = self.average_frame_time();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        *self = Self::default();
    }
}
