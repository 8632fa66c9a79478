// Host-side tests for per-frame ordering and resize propagation.

mod common;

use audiograph_core::backend::Surface;
use audiograph_core::compositor::Compositor;
use audiograph_core::pass::{names, Pass, PassKind, PassRole, UniformValue, Uniforms};
use audiograph_core::resize::Viewport;
use audiograph_core::target::TargetSet;
use audiograph_core::{
    build_compositor, Camera, EffectLevel, FrameOrchestrator, MeshTransform, PipelineConfig,
};
use common::{Call, RecordingBackend};

fn orchestrator(supports_depth: bool, viewport: Viewport) -> FrameOrchestrator {
    let compositor = build_compositor(&PipelineConfig::new(supports_depth), &viewport);
    FrameOrchestrator::new(
        compositor,
        Camera::default(),
        viewport,
        EffectLevel::default(),
    )
}

#[test]
fn frame_binds_screen_and_clears_override_before_drawing() {
    let mut o = orchestrator(true, Viewport::new(200.0, 100.0, 1.0));
    let mut backend = RecordingBackend::default();
    o.render_frame(16.0, &mut backend).expect("frame");

    assert_eq!(backend.calls[0], Call::Bind(Surface::Screen));
    assert_eq!(backend.calls[1], Call::ClearOverride);
    assert!(matches!(backend.calls[2], Call::Sync { .. }));
    assert_eq!(backend.draws().len(), 3);
    assert_eq!(backend.calls.last(), Some(&Call::Present));
}

#[test]
fn single_pass_chain_renders_directly() {
    let vp = Viewport::new(200.0, 100.0, 1.0);
    let mut compositor = Compositor::new(TargetSet::new(200, 100, false));
    compositor.add_pass(Pass::new(PassKind::Scene, PassRole::Terminal, Uniforms::new()));
    let mut o = FrameOrchestrator::new(compositor, Camera::default(), vp, EffectLevel::default());
    let mut backend = RecordingBackend::default();
    o.render_frame(16.0, &mut backend).expect("frame");

    assert!(backend.draws().is_empty());
    assert!(!backend.calls.iter().any(|c| matches!(c, Call::Sync { .. })));
    assert_eq!(
        backend
            .calls
            .iter()
            .filter(|c| matches!(c, Call::DirectScene))
            .count(),
        1
    );
}

#[test]
fn empty_chain_renders_directly() {
    let vp = Viewport::new(64.0, 64.0, 1.0);
    let compositor = Compositor::new(TargetSet::new(64, 64, false));
    let mut o = FrameOrchestrator::new(compositor, Camera::default(), vp, EffectLevel::default());
    let mut backend = RecordingBackend::default();
    o.render_frame(16.0, &mut backend).expect("frame");
    assert!(backend.draws().is_empty());
    assert!(backend.calls.contains(&Call::DirectScene));
}

#[test]
fn resize_is_visible_to_next_frame() {
    let mut o = orchestrator(true, Viewport::new(400.0, 300.0, 1.0));
    let mut backend = RecordingBackend::default();
    o.render_frame(16.0, &mut backend).expect("frame");

    o.resize(Viewport::new(500.0, 250.0, 2.0));
    backend.clear();
    o.render_frame(16.0, &mut backend).expect("frame");

    for (_, t) in o.compositor().targets().iter() {
        assert_eq!(t.size(), (1000, 500));
    }
    for call in backend.draws() {
        if let Call::Draw { uniforms, .. } = call {
            if uniforms.declares(names::RESOLUTION) {
                assert_eq!(
                    uniforms.get(names::RESOLUTION),
                    Some(&UniformValue::Vec2([1000.0, 500.0]))
                );
            }
        }
    }
    assert!((o.camera().aspect - 2.0).abs() < 1e-6);
}

#[test]
fn repeated_resize_with_same_viewport_changes_nothing() {
    let vp = Viewport::new(400.0, 300.0, 1.0);
    let mut o = orchestrator(false, vp);
    assert_eq!(o.resize(vp), 0);
    let gens: Vec<_> = o.compositor().targets().iter().map(|(_, t)| t.generation()).collect();
    assert_eq!(o.resize(vp), 0);
    let again: Vec<_> = o.compositor().targets().iter().map(|(_, t)| t.generation()).collect();
    assert_eq!(gens, again);
}

#[test]
fn mesh_pose_follows_clock_only() {
    let mut o = orchestrator(true, Viewport::new(100.0, 100.0, 1.0));
    let mut backend = RecordingBackend::default();
    assert!(o.mesh().is_none());
    o.attach_mesh();
    for d in [16.0, 400.0, 12.0, 30.0] {
        o.render_frame(d, &mut backend).expect("frame");
    }
    let elapsed = o.clock().elapsed();
    assert!((elapsed - 0.088).abs() < 1e-6);
    let t = elapsed as f32;
    assert_eq!(o.mesh(), Some(MeshTransform::at_time(t)));
    let mesh = o.mesh().expect("mesh");
    assert!((mesh.position.y - (t.sin() * 0.25 + 1.0)).abs() < 1e-6);
}

#[test]
fn camera_near_far_pushed_after_projection_update() {
    let mut o = orchestrator(true, Viewport::new(100.0, 100.0, 1.0));
    let mut backend = RecordingBackend::default();
    o.render_frame(16.0, &mut backend).expect("frame");
    let ao = backend
        .draws()
        .into_iter()
        .find_map(|c| match c {
            Call::Draw {
                kind: PassKind::AmbientOcclusion,
                uniforms,
                ..
            } => Some(uniforms.clone()),
            _ => None,
        })
        .expect("ao draw");
    assert_eq!(
        ao.get(names::CAMERA_NEAR),
        Some(&UniformValue::Float(o.camera().znear))
    );
    assert_eq!(
        ao.get(names::CAMERA_FAR),
        Some(&UniformValue::Float(o.camera().zfar))
    );
}

#[test]
fn effect_level_is_sampled_each_frame() {
    let vp = Viewport::new(100.0, 100.0, 1.0);
    let effect = EffectLevel::default();
    let compositor = build_compositor(&PipelineConfig::new(false), &vp);
    let mut o = FrameOrchestrator::new(compositor, Camera::default(), vp, effect.clone());
    let mut backend = RecordingBackend::default();

    effect.set(1.0);
    o.render_frame(16.0, &mut backend).expect("frame");
    let scene_effect = |backend: &RecordingBackend| {
        backend.draws().into_iter().find_map(|c| match c {
            Call::Draw {
                kind: PassKind::Scene,
                uniforms,
                ..
            } => uniforms.get(names::EFFECT).copied(),
            _ => None,
        })
    };
    assert_eq!(scene_effect(&backend), Some(UniformValue::Float(1.0)));

    effect.set(0.0);
    backend.clear();
    o.render_frame(16.0, &mut backend).expect("frame");
    assert_eq!(scene_effect(&backend), Some(UniformValue::Float(0.0)));
}

#[test]
fn draw_failure_is_not_retried() {
    let mut o = orchestrator(true, Viewport::new(100.0, 100.0, 1.0));
    let mut backend = RecordingBackend {
        fail_draws: true,
        ..Default::default()
    };
    assert!(o.render_frame(16.0, &mut backend).is_err());
    assert!(!backend.calls.contains(&Call::Present));
    assert_eq!(o.frames(), 0);
}
