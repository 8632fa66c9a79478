#![cfg(target_arch = "wasm32")]
//! Browser front-end: wgpu backend, WebAudio source and DOM wiring around
//! `audiograph_core`.

use audiograph_core::audio::{self as sync, AudioSyncLoop, EffectLevel};
use audiograph_core::camera::Camera;
use audiograph_core::config::{PipelineConfig, Platform, RendererOptions};
use audiograph_core::constants::WHITE_PALETTE;
use audiograph_core::orchestrator::FrameOrchestrator;
use audiograph_core::palette::{parse_palette, split_background, PaletteProvider};
use audiograph_core::pipeline::build_compositor;
use audiograph_core::scene::{Hotspot, SceneCollaborator, SceneSetup};
use constants::{AUDIO_TRACK_URL, CANVAS_ID, PALETTES, PALETTE_SEED};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod filter;
mod frame;
mod render;
mod scene;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("audiograph starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;

    let platform = Platform::from_user_agent(&dom::user_agent(&window));
    log::info!(
        "[platform] mobile={} ios={}",
        platform.is_mobile,
        platform.is_ios
    );

    let viewport = dom::current_viewport(&window)?;
    dom::sync_canvas_backing_size(&canvas, &viewport);

    let options = RendererOptions::default();
    let mut gpu = frame::init_gpu(&canvas, &options).await?;
    let config = PipelineConfig {
        supports_depth: gpu.supports_depth(),
        renderer: options,
    };
    let compositor = build_compositor(&config, &viewport);
    gpu.prepare(compositor.passes());

    let effect = EffectLevel::default();
    let camera = Camera::default();
    let orchestrator = Rc::new(RefCell::new(FrameOrchestrator::new(
        compositor,
        camera.clone(),
        viewport,
        effect.clone(),
    )));

    events::wire_resize(&window, &canvas, orchestrator.clone());
    events::wire_touch_suppression(&window);
    if platform.is_ios {
        events::wire_ios_scroll_fix(&window);
    }
    events::wire_space_suppression(&window);

    // Scene
    dom::show_canvas(&canvas);
    let palettes = PaletteProvider::from_hex_lists(PALETTES)
        .shuffled(PALETTE_SEED)
        .into_palettes();
    let (background, white_palette) = split_background(parse_palette(&WHITE_PALETTE));
    let geometry = scene::OrbScene::new(canvas.clone()).create(SceneSetup {
        palettes,
        white_palette,
        background,
        camera,
        hotspot: Hotspot::new(effect.clone()),
        supports_media: platform.supports_media(),
    });
    gpu.set_palette(geometry.palette());
    gpu.set_clear_color(geometry.background);
    dom::set_body_background(&document, &geometry.background.to_css());

    // Audio
    let source = audio::WebAudioSource::new(AUDIO_TRACK_URL)?;
    let audio = Rc::new(RefCell::new(AudioSyncLoop::with_effect(source, effect)));
    sync::start(&audio, &platform);

    orchestrator.borrow_mut().attach_mesh();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        orchestrator,
        gpu,
        audio: audio.clone(),
        canvas,
        last_instant: Instant::now(),
    }));
    let handle = frame::start_loop(frame_ctx);
    events::wire_pagehide(&window, handle, audio);
    Ok(())
}
