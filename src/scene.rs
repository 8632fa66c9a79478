use audiograph_core::palette::{Palette, Rgb};
use audiograph_core::scene::{Hotspot, SceneCollaborator, SceneSetup};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Ray-marched orb drawn by the scene pass. The canvas is the hotspot.
pub struct OrbScene {
    canvas: web::HtmlCanvasElement,
}

/// Geometry handle returned to the front-end.
pub struct OrbGeometry {
    palettes: Vec<Palette>,
    white_palette: Palette,
    pub background: Rgb,
    pub supports_media: bool,
}

impl OrbGeometry {
    /// First palette, falling back to the white remainder.
    pub fn palette(&self) -> &[Rgb] {
        self.palettes
            .first()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.white_palette)
    }
}

impl OrbScene {
    pub fn new(canvas: web::HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    fn listen(&self, event: &str, hotspot: Hotspot, pressed: bool) {
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if pressed {
                hotspot.on_down();
            } else {
                hotspot.on_up();
            }
        }) as Box<dyn FnMut(web::PointerEvent)>);
        if let Err(e) = self
            .canvas
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::error!("[scene] {} listener error: {:?}", event, e);
        }
        closure.forget();
    }
}

impl SceneCollaborator for OrbScene {
    type Geometry = OrbGeometry;

    fn create(&mut self, setup: SceneSetup) -> OrbGeometry {
        self.listen("pointerdown", setup.hotspot.clone(), true);
        self.listen("pointerup", setup.hotspot.clone(), false);
        self.listen("pointercancel", setup.hotspot.clone(), false);
        self.listen("pointerleave", setup.hotspot, false);
        log::info!(
            "[scene] palettes={} media={}",
            setup.palettes.len(),
            setup.supports_media
        );
        OrbGeometry {
            palettes: setup.palettes,
            white_palette: setup.white_palette,
            background: setup.background,
            supports_media: setup.supports_media,
        }
    }
}
