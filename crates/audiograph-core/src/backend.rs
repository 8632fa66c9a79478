//! The seam between pipeline orchestration and a concrete graphics API.

use crate::pass::Pass;
use crate::scene::MeshTransform;
use crate::target::{TargetSet, TargetSlot};
use glam::{Mat4, Vec3};

/// Destination of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    /// The visible framebuffer.
    Screen,
    Target(TargetSlot),
}

/// Per-frame values every draw may read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    pub view_proj: Mat4,
    pub camera_eye: Vec3,
    pub mesh: Option<MeshTransform>,
    pub time: f32,
    pub effect: f32,
}

/// One pass execution inside the compositor.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall<'a> {
    pub index: usize,
    pub pass: &'a Pass,
    /// Output of the previous pass; `None` for the first pass.
    pub input: Option<TargetSlot>,
    pub output: Surface,
    pub frame: &'a FrameInputs,
}

/// Graphics API used by the compositor and orchestrator.
///
/// Every method that talks to the GPU returns `anyhow::Result`; failures are
/// fatal at this layer and are never retried.
pub trait RenderBackend {
    /// Make GPU storage match the target descriptions (sizes, depth textures).
    fn sync_targets(&mut self, targets: &TargetSet) -> anyhow::Result<()>;

    /// Reset the current render target binding.
    fn bind_surface(&mut self, surface: Surface);

    /// Drop any scene-wide material override left from a previous draw.
    fn clear_scene_override(&mut self);

    fn draw_pass(&mut self, draw: &DrawCall<'_>, targets: &TargetSet) -> anyhow::Result<()>;

    /// Render the scene straight to the screen, bypassing compositing.
    fn draw_scene(&mut self, frame: &FrameInputs) -> anyhow::Result<()>;

    /// Submit the frame's work and show it.
    fn present(&mut self) -> anyhow::Result<()>;
}
