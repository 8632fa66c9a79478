//! Render pipeline orchestration and frame synchronization for audiograph.
//!
//! Platform independent: the web front-end plugs a wgpu backend and a WebAudio
//! source into the traits defined here.

pub mod audio;
pub mod backend;
pub mod camera;
pub mod clock;
pub mod compositor;
pub mod config;
pub mod constants;
pub mod error;
pub mod orchestrator;
pub mod palette;
pub mod pass;
pub mod pipeline;
pub mod resize;
pub mod scene;
pub mod target;

pub use audio::{AudioSource, AudioState, AudioSyncLoop, EffectLevel, ReadySignal};
pub use backend::{DrawCall, FrameInputs, RenderBackend, Surface};
pub use camera::Camera;
pub use clock::FrameClock;
pub use compositor::{Compositor, PassChain};
pub use config::{PipelineConfig, Platform, RendererOptions};
pub use error::ChainError;
pub use orchestrator::FrameOrchestrator;
pub use palette::{Palette, PaletteProvider, Rgb};
pub use pass::{Pass, PassKind, PassRole, UniformValue, Uniforms};
pub use pipeline::build_compositor;
pub use resize::{resize_targets, Viewport};
pub use scene::{Hotspot, MeshTransform, SceneCollaborator, SceneSetup};
pub use target::{create_target, RenderTarget, TargetSet, TargetSlot, TextureDesc};
