//! # Headless Diorama Demo
//!
//! Builds the default diorama, prints its buffer sizes, and runs a few seconds
//! of snowfall and chimney smoke without a renderer.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example headless
//! ```

use anyhow::Context;
use diorama::prelude::*;

const FRAMES: usize = 300;
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let diorama = Diorama::build(&DioramaSettings::default()).context("building diorama")?;
    let mesh = &diorama.terrain;
    for (label, part) in [("top", &mesh.top), ("sides", &mesh.sides), ("bottom", &mesh.bottom)] {
        log::info!(
            "{label}: {} vertices, {} triangles, {} bytes interleaved",
            part.vertex_count(),
            part.triangle_count(),
            part.to_vertex_buffer().len() * Vertex3D::STRIDE
        );
    }
    for prop in diorama.props.iter().take(5) {
        log::info!("{} at {:?}", prop.name, prop.position);
    }

    let mut weather = diorama.spawn_weather(Some(2024)).context("spawning weather")?;
    let mut respawned = 0;
    for _ in 0..FRAMES {
        respawned += weather.manager.update(FRAME_TIME);
    }

    let snow = weather
        .manager
        .particles(weather.snow)
        .context("snow system missing")?;
    let smoke = weather
        .manager
        .particles(weather.smoke)
        .context("smoke system missing")?;
    let lowest = snow
        .positions()
        .iter()
        .map(|p| p[1])
        .fold(f32::INFINITY, f32::min);

    log::info!(
        "Simulated {:.2}s: {respawned} respawns, lowest flake at {lowest:.3}, {} puffs ({} respawns)",
        weather.manager.elapsed(),
        smoke.len(),
        smoke.stats().respawns
    );
    println!(
        "{} terrain vertices, {} props, {} snow + {} smoke particles after {FRAMES} frames",
        mesh.top.vertex_count() + mesh.sides.vertex_count() + mesh.bottom.vertex_count(),
        diorama.props.len(),
        snow.len(),
        smoke.len()
    );

    Ok(())
}
