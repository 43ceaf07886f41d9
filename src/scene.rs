//! # Diorama Scene Layout
//!
//! Assembles the whole winter diorama from one [`DioramaSettings`] value: the
//! hill, the three terrain buffers, the cabin and props lifted onto the snow,
//! and the snow/smoke systems. Props are named by asset identifier only;
//! loading and drawing them is up to the host renderer.
//!
//! ```rust
//! use diorama::scene::{Diorama, DioramaSettings};
//!
//! let diorama = Diorama::build(&DioramaSettings::default()).unwrap();
//! let mut weather = diorama.spawn_weather(Some(42)).unwrap();
//! weather.manager.update(1.0 / 60.0);
//! ```

use crate::error::Result;
use crate::gfx::geometry::{TerrainMesh, TerrainMeshBuilder};
use crate::simulation::manager::{SimulationManager, SystemHandle};
use crate::simulation::particles::{BoundingVolume, ParticleSystem};
use crate::simulation::smoke::SmokeKinematics;
use crate::terrain::HeightField;
use std::f32::consts::PI;

/// Horizontal position of the cabin
pub const CABIN_POSITION: [f32; 2] = [0.0, -1.2];

/// Chimney mouth relative to the cabin anchor
pub const CHIMNEY_MOUTH_OFFSET: [f32; 3] = [0.3, 1.75, 0.0];

/// Top-level diorama configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DioramaSettings {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub segments: u32,
    pub hill_amplitude: f32,
    pub hill_center: [f32; 2],
    pub hill_sigma: f32,
    pub snow_count: usize,
    /// Extra footprint around the block that snow still falls over
    pub snow_margin: f32,
    pub snow_ceiling: f32,
    pub smoke_count: usize,
    /// Extra footprint around the block that smoke may drift over
    pub smoke_margin: f32,
    pub smoke_ceiling: f32,
}

impl Default for DioramaSettings {
    fn default() -> Self {
        Self {
            width: 6.0,
            depth: 6.0,
            height: 2.0,
            segments: 48,
            hill_amplitude: 0.8,
            hill_center: CABIN_POSITION,
            hill_sigma: 1.8,
            snow_count: 600,
            snow_margin: 0.5,
            snow_ceiling: 6.0,
            smoke_count: 25,
            smoke_margin: 0.5,
            smoke_ceiling: 8.0,
        }
    }
}

impl DioramaSettings {
    pub fn height_field(&self) -> Result<HeightField> {
        HeightField::configure(
            self.hill_amplitude,
            self.hill_center[0],
            self.hill_center[1],
            self.hill_sigma,
        )
    }
}

/// Where an asset goes, before terrain placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSpec {
    pub name: &'static str,
    /// `[x, y_offset, z]`; the offset is added to the ground height
    pub offset: [f32; 3],
    pub rotation_y: f32,
}

const fn prop(name: &'static str, x: f32, z: f32, rotation_y: f32) -> PropSpec {
    PropSpec {
        name,
        offset: [x, 0.0, z],
        rotation_y,
    }
}

/// Free-standing props scattered over the hill
pub const SCENE_PROPS: &[PropSpec] = &[
    prop("tree-snow-a", -2.0, -1.5, 0.0),
    prop("tree-snow-b", 1.8, 0.5, PI / 4.0),
    prop("tree-snow-c", -1.5, 1.5, PI / 6.0),
    prop("tree-snow-a", 2.2, -2.0, PI / 3.0),
    prop("tree-snow-b", -2.2, -2.5, PI / 2.0),
    prop("tree-snow-c", 0.8, -0.3, 0.0),
    prop("tree-snow-a", -0.3, 2.3, PI / 5.0),
    prop("snowman-hat", -0.5, 0.5, PI / 8.0),
    prop("sled", 1.0, 0.8, -PI / 6.0),
    prop("bench", -1.8, 0.3, PI / 2.0),
    prop("rocks-large", 2.5, -0.5, 0.0),
    prop("rocks-medium", -2.3, -2.2, PI / 3.0),
    prop("rocks-small", 1.5, 2.2, PI / 4.0),
    prop("rocks-small", -0.8, 0.2, PI),
    prop("lantern", -1.0, -0.5, 0.0),
    prop("lantern", 0.3, -1.6, 0.0),
    prop("snow-pile", 2.0, 1.5, 0.0),
    prop("snow-pile", -0.8, 2.0, PI / 2.0),
    prop("snow-bunker", 1.8, -1.8, PI / 4.0),
    prop("snow-bunker", -1.0, -2.3, PI / 6.0),
    prop("cabin-fence", 0.8, -0.5, 0.0),
    prop("cabin-fence", -0.5, -0.7, PI / 2.0),
];

/// Cabin pieces, relative to the cabin anchor
pub const CABIN_PIECES: &[PropSpec] = &[
    PropSpec { name: "cabin-doorway", offset: [0.0, 0.0, 0.5], rotation_y: 0.0 },
    PropSpec { name: "cabin-window-large", offset: [0.0, 0.0, -0.5], rotation_y: PI },
    PropSpec { name: "cabin-window-a", offset: [-0.5, 0.0, 0.0], rotation_y: PI / 2.0 },
    PropSpec { name: "cabin-wall", offset: [0.5, 0.0, 0.0], rotation_y: -PI / 2.0 },
    PropSpec { name: "cabin-corner", offset: [-0.5, 0.0, 0.5], rotation_y: 0.0 },
    PropSpec { name: "cabin-corner", offset: [0.5, 0.0, 0.5], rotation_y: -PI / 2.0 },
    PropSpec { name: "cabin-corner", offset: [-0.5, 0.0, -0.5], rotation_y: PI / 2.0 },
    PropSpec { name: "cabin-corner", offset: [0.5, 0.0, -0.5], rotation_y: PI },
    PropSpec { name: "cabin-roof-snow", offset: [-0.25, 1.0, 0.0], rotation_y: 0.0 },
    PropSpec { name: "cabin-roof-snow-chimney", offset: [0.25, 1.0, 0.0], rotation_y: 0.0 },
    PropSpec { name: "cabin-roof-top", offset: [0.0, 1.0, 0.0], rotation_y: 0.0 },
    PropSpec { name: "floor-wood-snow", offset: [0.0, 0.0, 1.0], rotation_y: 0.0 },
    PropSpec { name: "lantern", offset: [0.4, 0.0, 0.8], rotation_y: 0.0 },
];

/// An asset with its final world transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedProp {
    pub name: &'static str,
    pub position: [f32; 3],
    pub rotation_y: f32,
}

/// The assembled scene, ready to hand to a renderer
#[derive(Debug, Clone)]
pub struct Diorama {
    pub settings: DioramaSettings,
    pub field: HeightField,
    pub terrain: TerrainMesh,
    pub cabin_anchor: [f32; 3],
    pub chimney_mouth: [f32; 3],
    pub props: Vec<PlacedProp>,
}

/// Particle systems of a diorama with their handles
pub struct Weather {
    pub manager: SimulationManager,
    pub snow: SystemHandle,
    pub smoke: SystemHandle,
}

impl Diorama {
    /// Build the terrain and place every prop
    pub fn build(settings: &DioramaSettings) -> Result<Self> {
        let field = settings.height_field()?;
        let terrain = TerrainMeshBuilder::new(
            settings.width,
            settings.depth,
            settings.height,
            settings.segments,
        )?
        .build(&field)?;

        let [cabin_x, cabin_z] = CABIN_POSITION;
        let cabin_anchor = field.place(cabin_x, 0.0, cabin_z);
        let chimney_mouth = [
            cabin_anchor[0] + CHIMNEY_MOUTH_OFFSET[0],
            cabin_anchor[1] + CHIMNEY_MOUTH_OFFSET[1],
            cabin_anchor[2] + CHIMNEY_MOUTH_OFFSET[2],
        ];

        // Cabin pieces move with the cabin group; loose props each follow the ground
        let cabin = CABIN_PIECES.iter().map(|piece| PlacedProp {
            name: piece.name,
            position: [
                cabin_anchor[0] + piece.offset[0],
                cabin_anchor[1] + piece.offset[1],
                cabin_anchor[2] + piece.offset[2],
            ],
            rotation_y: piece.rotation_y,
        });
        let scattered = SCENE_PROPS.iter().map(|spec| {
            let [x, y_offset, z] = spec.offset;
            PlacedProp {
                name: spec.name,
                position: field.place(x, y_offset, z),
                rotation_y: spec.rotation_y,
            }
        });
        let props: Vec<PlacedProp> = cabin.chain(scattered).collect();

        log::info!(
            "Assembled diorama {}x{}x{}: {} terrain triangles, {} props, cabin at {:?}",
            settings.width,
            settings.depth,
            settings.height,
            terrain.top.triangle_count() + terrain.sides.triangle_count() + terrain.bottom.triangle_count(),
            props.len(),
            cabin_anchor
        );

        Ok(Self {
            settings: settings.clone(),
            field,
            terrain,
            cabin_anchor,
            chimney_mouth,
            props,
        })
    }

    /// Volume the snow falls through
    pub fn snow_volume(&self) -> Result<BoundingVolume> {
        let s = &self.settings;
        BoundingVolume::around_footprint(s.width, s.depth, s.height, s.snow_margin, s.snow_ceiling)
    }

    /// Volume the smoke may drift through before being recycled
    pub fn smoke_volume(&self) -> Result<BoundingVolume> {
        let s = &self.settings;
        BoundingVolume::around_footprint(s.width, s.depth, s.height, s.smoke_margin, s.smoke_ceiling)
    }

    /// Create the snow and chimney smoke systems.
    ///
    /// With a seed the two systems get distinct but reproducible random streams.
    pub fn spawn_weather(&self, seed: Option<u64>) -> Result<Weather> {
        let mut snow = ParticleSystem::snow()
            .with_name("Snowfall")
            .with_count(self.settings.snow_count)
            .with_volume(self.snow_volume()?);
        let mut smoke = ParticleSystem::smoke()
            .with_name("Chimney smoke")
            .with_count(self.settings.smoke_count)
            .with_volume(self.smoke_volume()?)
            .with_kinematics(SmokeKinematics {
                origin: self.chimney_mouth,
                ..Default::default()
            });
        if let Some(seed) = seed {
            snow = snow.with_seed(seed);
            smoke = smoke.with_seed(seed.wrapping_add(1));
        }

        let mut manager = SimulationManager::new();
        let snow = manager.add(snow.build()?);
        let smoke = manager.add(smoke.build()?);
        Ok(Weather {
            manager,
            snow,
            smoke,
        })
    }

    /// Ground height at `(x, z)`
    pub fn height(&self, x: f32, z: f32) -> f32 {
        self.field.height(x, z)
    }
}
