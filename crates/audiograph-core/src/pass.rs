//! Post-processing pass descriptions.

use crate::target::TargetSlot;
use smallvec::SmallVec;

/// Where a pass writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassRole {
    /// Writes to an off-screen target read by the next pass.
    Intermediate,
    /// Writes to the visible surface; exactly one per chain, last.
    Terminal,
}

/// Which program a backend runs for the pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Draws the scene geometry (captures color + depth).
    Scene,
    /// Depth-aware ambient occlusion.
    AmbientOcclusion,
    /// Bright-pass + blur + composite.
    Bloom,
}

impl PassKind {
    pub fn label(self) -> &'static str {
        match self {
            PassKind::Scene => "scene_pass",
            PassKind::AmbientOcclusion => "ssao_pass",
            PassKind::Bloom => "bloom_pass",
        }
    }
}

/// Value bound to a named uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    /// Color texture of a target slot.
    Texture(TargetSlot),
    /// Depth texture of a target slot.
    DepthTexture(TargetSlot),
}

impl UniformValue {
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            UniformValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<[f32; 2]> {
        match *self {
            UniformValue::Vec2(v) => Some(v),
            _ => None,
        }
    }
}

/// Conventional uniform names.
pub mod names {
    pub const RESOLUTION: &str = "resolution";
    pub const CAMERA_NEAR: &str = "cameraNear";
    pub const CAMERA_FAR: &str = "cameraFar";
    pub const TIME: &str = "time";
    pub const EFFECT: &str = "effect";
    pub const T_DIFFUSE: &str = "tDiffuse";
    pub const T_DEPTH: &str = "tDepth";
    pub const STRENGTH: &str = "strength";
    pub const THRESHOLD: &str = "threshold";
    pub const RADIUS: &str = "radius";
    pub const INTENSITY: &str = "intensity";
}

/// Ordered set of named uniform bindings. Declaration order is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Uniforms {
    entries: SmallVec<[(&'static str, UniformValue); 8]>,
}

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or overwrite) a uniform; builder form.
    pub fn with(mut self, name: &'static str, value: UniformValue) -> Self {
        self.declare(name, value);
        self
    }

    pub fn declare(&mut self, name: &'static str, value: UniformValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    #[inline]
    pub fn declares(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Update an already declared uniform. Undeclared names are ignored and
    /// `false` is returned.
    pub fn set(&mut self, name: &str, value: UniformValue) -> bool {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => {
                *v = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &UniformValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pass {
    pub kind: PassKind,
    pub role: PassRole,
    pub uniforms: Uniforms,
}

impl Pass {
    pub fn new(kind: PassKind, role: PassRole, uniforms: Uniforms) -> Self {
        Self {
            kind,
            role,
            uniforms,
        }
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.role == PassRole::Terminal
    }
}
