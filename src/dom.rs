use audiograph_core::resize::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(
    document: &web::Document,
    id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn user_agent(window: &web::Window) -> String {
    window.navigator().user_agent().unwrap_or_default()
}

/// Window inner size in CSS pixels plus devicePixelRatio.
pub fn current_viewport(window: &web::Window) -> anyhow::Result<Viewport> {
    let width = window
        .inner_width()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_f64()
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_f64()
        .unwrap_or(1.0);
    Ok(Viewport::new(width, height, window.device_pixel_ratio()))
}

/// Match the canvas backing store to the viewport's physical size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w, h) = viewport.physical_size();
    if canvas.width() != w || canvas.height() != h {
        canvas.set_width(w);
        canvas.set_height(h);
    }
}

pub fn show_canvas(canvas: &web::HtmlCanvasElement) {
    _ = canvas.style().set_property("display", "block");
}

pub fn set_body_background(document: &web::Document, css: &str) {
    if let Some(body) = document.body() {
        _ = body.style().set_property("background", css);
    }
}
