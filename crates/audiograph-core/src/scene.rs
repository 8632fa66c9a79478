//! Contract with the scene collaborator and the time-driven mesh animation.

use crate::audio::EffectLevel;
use crate::camera::Camera;
use crate::constants::{
    EFFECT_ACTIVE, EFFECT_IDLE, MESH_BOB_AMPLITUDE, MESH_BOB_OFFSET, MESH_SPIN_PER_SEC,
};
use crate::palette::{Palette, Rgb};
use glam::Vec3;

/// World transform of the animated mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTransform {
    pub position: Vec3,
    pub rotation_y: f32,
}

impl MeshTransform {
    /// Pose at `elapsed` seconds; a pure function of the clock.
    pub fn at_time(elapsed: f32) -> Self {
        let y = elapsed.sin() * MESH_BOB_AMPLITUDE + MESH_BOB_OFFSET;
        Self {
            position: Vec3::new(0.0, y, 0.0),
            rotation_y: elapsed * MESH_SPIN_PER_SEC,
        }
    }
}

/// Press/release handlers for scene hotspots.
///
/// Each handler only writes the shared effect level.
#[derive(Clone, Debug)]
pub struct Hotspot {
    effect: EffectLevel,
}

impl Hotspot {
    pub fn new(effect: EffectLevel) -> Self {
        Self { effect }
    }

    pub fn on_down(&self) {
        self.effect.set(EFFECT_ACTIVE);
    }

    pub fn on_up(&self) {
        self.effect.set(EFFECT_IDLE);
    }
}

/// Everything handed to the scene collaborator at startup.
#[derive(Clone, Debug)]
pub struct SceneSetup {
    pub palettes: Vec<Palette>,
    /// White palette after its first entry became the background.
    pub white_palette: Palette,
    pub background: Rgb,
    pub camera: Camera,
    pub hotspot: Hotspot,
    pub supports_media: bool,
}

/// Builds scene geometry; returns a handle for geometry control.
pub trait SceneCollaborator {
    type Geometry;

    fn create(&mut self, setup: SceneSetup) -> Self::Geometry;
}
