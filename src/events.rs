use crate::audio::WebAudioSource;
use crate::constants::KEY_SPACE;
use crate::dom;
use crate::frame::LoopHandle;
use audiograph_core::audio::AudioSyncLoop;
use audiograph_core::constants::IOS_SCROLL_FIX_DELAY_MS;
use audiograph_core::orchestrator::FrameOrchestrator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<T: ?Sized + wasm_bindgen::closure::WasmClosure>(
    target: &web::EventTarget,
    event: &str,
    closure: Closure<T>,
) {
    let callback = closure.as_ref().unchecked_ref();
    if let Err(e) = target.add_event_listener_with_callback(event, callback) {
        log::error!("{} listener error: {:?}", event, e);
    }
    closure.forget();
}

/// Resize canvas and targets synchronously so the next frame sees it.
pub fn wire_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    orchestrator: Rc<RefCell<FrameOrchestrator>>,
) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else {
            return;
        };
        match dom::current_viewport(&w) {
            Ok(viewport) => {
                dom::sync_canvas_backing_size(&canvas, &viewport);
                orchestrator.borrow_mut().resize(viewport);
            }
            Err(e) => log::error!("[resize] viewport error: {:?}", e),
        }
    }) as Box<dyn FnMut()>);
    listen(window, "resize", closure);
}

pub fn wire_touch_suppression(window: &web::Window) {
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        ev.prevent_default();
    }) as Box<dyn FnMut(web::TouchEvent)>);
    listen(window, "touchstart", closure);
}

/// Keep the space bar from scrolling the page.
pub fn wire_space_suppression(window: &web::Window) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.key() == KEY_SPACE {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    listen(window, "keydown", closure);
}

fn schedule_scroll_fix(window: &web::Window) {
    let closure = Closure::once_into_js(move || {
        if let Some(w) = web::window() {
            w.scroll_to_with_x_and_y(0.0, 1.0);
        }
    });
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        IOS_SCROLL_FIX_DELAY_MS,
    ) {
        log::error!("scroll fix timeout error: {:?}", e);
    }
}

/// Pin the page to the top on iOS now and after every orientation change.
pub fn wire_ios_scroll_fix(window: &web::Window) {
    schedule_scroll_fix(window);
    let closure = Closure::wrap(Box::new(move || {
        if let Some(w) = web::window() {
            schedule_scroll_fix(&w);
        }
    }) as Box<dyn FnMut()>);
    listen(window, "orientationchange", closure);
}

/// Stop the frame loop and drop the audio subscription when the page goes away.
pub fn wire_pagehide(
    window: &web::Window,
    handle: LoopHandle,
    audio: Rc<RefCell<AudioSyncLoop<WebAudioSource>>>,
) {
    let closure = Closure::wrap(Box::new(move || {
        handle.cancel();
        let mut a = audio.borrow_mut();
        a.teardown();
        a.source().pause();
        log::info!("[audio] torn down");
    }) as Box<dyn FnMut()>);
    listen(window, "pagehide", closure);
}
