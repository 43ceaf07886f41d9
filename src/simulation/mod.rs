// src/simulation/mod.rs
//! Simulation system
//!
//! Frame-driven particle simulations (snow, chimney smoke) and the manager
//! that ticks them from the host's clock.

pub mod manager;
pub mod particles;
pub mod smoke;
pub mod snow;
pub mod stats;
pub mod traits;
