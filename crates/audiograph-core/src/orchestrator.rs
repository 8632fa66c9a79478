//! Per-frame driver.

use crate::audio::EffectLevel;
use crate::backend::{FrameInputs, RenderBackend, Surface};
use crate::camera::Camera;
use crate::clock::FrameClock;
use crate::compositor::Compositor;
use crate::pass::{names, UniformValue};
use crate::resize::Viewport;
use crate::scene::MeshTransform;

/// Owns everything a frame touches: clock, camera, compositor, the optional
/// animated mesh and the current viewport.
pub struct FrameOrchestrator {
    clock: FrameClock,
    camera: Camera,
    compositor: Compositor,
    viewport: Viewport,
    effect: EffectLevel,
    mesh: Option<MeshTransform>,
    frames: u64,
}

impl FrameOrchestrator {
    pub fn new(
        compositor: Compositor,
        camera: Camera,
        viewport: Viewport,
        effect: EffectLevel,
    ) -> Self {
        let mut orchestrator = Self {
            clock: FrameClock::new(),
            camera,
            compositor,
            viewport,
            effect,
            mesh: None,
            frames: 0,
        };
        orchestrator.resize(viewport);
        orchestrator
    }

    /// Start animating a mesh (called once the scene exists).
    pub fn attach_mesh(&mut self) {
        self.mesh = Some(MeshTransform::at_time(self.clock.elapsed() as f32));
    }

    /// Apply a new viewport to every target. Idempotent.
    pub fn resize(&mut self, viewport: Viewport) -> usize {
        self.viewport = viewport;
        self.compositor.resize(&viewport)
    }

    pub fn render_frame<B: RenderBackend + ?Sized>(
        &mut self,
        raw_delta_ms: f32,
        backend: &mut B,
    ) -> anyhow::Result<()> {
        // 1. clock
        self.clock.tick(raw_delta_ms);
        let time = self.clock.elapsed() as f32;

        // 2. scene transform, derived from time only
        if self.mesh.is_some() {
            self.mesh = Some(MeshTransform::at_time(time));
        }

        // 3. projection before anything reads near/far
        self.camera.update_projection(self.viewport.aspect());

        // 4. dynamic uniforms
        let effect = self.effect.get();
        let (near, far) = (self.camera.znear, self.camera.zfar);
        let c = &mut self.compositor;
        c.push_resolution();
        c.set_uniform(names::CAMERA_NEAR, UniformValue::Float(near));
        c.set_uniform(names::CAMERA_FAR, UniformValue::Float(far));
        c.set_uniform(names::TIME, UniformValue::Float(time));
        c.set_uniform(names::EFFECT, UniformValue::Float(effect));

        // 5. no stale bindings or overrides
        backend.bind_surface(Surface::Screen);
        backend.clear_scene_override();

        // 6. dispatch
        let frame = FrameInputs {
            view_proj: self.camera.view_projection(),
            camera_eye: self.camera.eye,
            mesh: self.mesh,
            time,
            effect,
        };
        self.compositor.render(backend, &frame)?;
        backend.present()?;
        self.frames += 1;
        Ok(())
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn mesh(&self) -> Option<MeshTransform> {
        self.mesh
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
