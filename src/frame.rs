use crate::audio::WebAudioSource;
use crate::render;
use audiograph_core::audio::AudioSyncLoop;
use audiograph_core::config::RendererOptions;
use audiograph_core::orchestrator::FrameOrchestrator;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub orchestrator: Rc<RefCell<FrameOrchestrator>>,
    pub gpu: render::GpuState<'a>,
    pub audio: Rc<RefCell<AudioSyncLoop<WebAudioSource>>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    /// One tick. Returns false when rendering failed and the loop must stop.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        let rendered = self
            .orchestrator
            .borrow_mut()
            .render_frame(dt_sec * 1000.0, &mut self.gpu);
        if let Err(e) = rendered {
            log::error!("[frame] render error: {:?}", e);
            return false;
        }

        self.audio.borrow_mut().update(dt_sec);
        true
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    options: &RendererOptions,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, options).await
}

/// Cancels the animation-frame loop.
#[derive(Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &Tick, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame error: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let handle = LoopHandle {
        running: Rc::new(Cell::new(true)),
        raf_id: Rc::new(Cell::new(None)),
    };
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let h = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        h.raf_id.set(None);
        if !h.running.get() {
            return;
        }
        if !frame_ctx.borrow_mut().frame() {
            h.running.set(false);
            return;
        }
        request_frame(&tick_clone, &h.raf_id);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle.raf_id);
    handle
}
