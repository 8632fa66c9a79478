//! Builds the compositor for a given capability set.

use crate::compositor::Compositor;
use crate::config::PipelineConfig;
use crate::constants::{
    BLOOM_STRENGTH, BLOOM_THRESHOLD, CAMERA_FAR, CAMERA_NEAR, EFFECT_IDLE, SSAO_INTENSITY,
    SSAO_RADIUS,
};
use crate::pass::{names, Pass, PassKind, PassRole, UniformValue, Uniforms};
use crate::resize::Viewport;
use crate::target::{TargetSet, TargetSlot};

fn scene_pass() -> Pass {
    Pass::new(
        PassKind::Scene,
        PassRole::Intermediate,
        Uniforms::new()
            .with(names::TIME, UniformValue::Float(0.0))
            .with(names::EFFECT, UniformValue::Float(EFFECT_IDLE)),
    )
}

fn ambient_occlusion_pass(resolution: [f32; 2]) -> Pass {
    Pass::new(
        PassKind::AmbientOcclusion,
        PassRole::Intermediate,
        Uniforms::new()
            .with(names::T_DIFFUSE, UniformValue::Texture(TargetSlot::Initial))
            .with(names::T_DEPTH, UniformValue::DepthTexture(TargetSlot::Initial))
            .with(names::RESOLUTION, UniformValue::Vec2(resolution))
            .with(names::CAMERA_NEAR, UniformValue::Float(CAMERA_NEAR))
            .with(names::CAMERA_FAR, UniformValue::Float(CAMERA_FAR))
            .with(names::RADIUS, UniformValue::Float(SSAO_RADIUS))
            .with(names::INTENSITY, UniformValue::Float(SSAO_INTENSITY)),
    )
}

fn bloom_pass(resolution: [f32; 2]) -> Pass {
    Pass::new(
        PassKind::Bloom,
        PassRole::Terminal,
        Uniforms::new()
            .with(names::T_DIFFUSE, UniformValue::Texture(TargetSlot::Initial))
            .with(names::RESOLUTION, UniformValue::Vec2(resolution))
            .with(names::STRENGTH, UniformValue::Float(BLOOM_STRENGTH))
            .with(names::THRESHOLD, UniformValue::Float(BLOOM_THRESHOLD))
            .with(names::TIME, UniformValue::Float(0.0)),
    )
}

/// Allocate targets and assemble the pass chain.
///
/// Scene capture, then ambient occlusion when depth textures are supported,
/// then bloom as the terminal pass. The capability is read once, here.
pub fn build_compositor(config: &PipelineConfig, viewport: &Viewport) -> Compositor {
    let (width, height) = viewport.physical_size();
    let mut compositor = Compositor::new(TargetSet::new(width, height, config.supports_depth));
    let resolution = compositor.resolution();

    compositor.add_pass(scene_pass());
    if config.supports_depth {
        compositor.add_pass(ambient_occlusion_pass(resolution));
    } else {
        log::warn!("[pipeline] depth textures unsupported; ambient occlusion disabled");
    }
    compositor.add_pass(bloom_pass(resolution));

    log::info!(
        "[pipeline] {} passes at {}x{} (depth={})",
        compositor.passes().len(),
        width,
        height,
        config.supports_depth
    );
    compositor
}
