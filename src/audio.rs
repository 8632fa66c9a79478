use crate::constants::{FILTER_CUTOFF_OPEN_HZ, FILTER_Q, MASTER_GAIN};
use crate::filter::{cutoff_for_effect, smooth_toward};
use audiograph_core::audio::{AudioSource, ReadySignal};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Looping track routed element -> low-pass -> gain -> destination.
pub struct WebAudioSource {
    ctx: web::AudioContext,
    element: web::HtmlAudioElement,
    filter: web::BiquadFilterNode,
    _media: web::MediaElementAudioSourceNode,
    _gain: web::GainNode,
    url: String,
    ready: ReadySignal,
    on_ready: Option<Closure<dyn FnMut()>>,
    skipped: bool,
    cutoff: f32,
    target_cutoff: f32,
}

impl WebAudioSource {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(js_err)?;
        let element = web::HtmlAudioElement::new().map_err(js_err)?;
        element.set_loop(true);
        element.set_cross_origin(Some("anonymous"));
        element.set_preload("auto");

        let media = ctx.create_media_element_source(&element).map_err(js_err)?;
        let filter = ctx.create_biquad_filter().map_err(js_err)?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(FILTER_CUTOFF_OPEN_HZ);
        filter.q().set_value(FILTER_Q);
        let gain = ctx.create_gain().map_err(js_err)?;
        gain.gain().set_value(MASTER_GAIN);

        media.connect_with_audio_node(&filter).map_err(js_err)?;
        filter.connect_with_audio_node(&gain).map_err(js_err)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(js_err)?;

        Ok(Self {
            ctx,
            element,
            filter,
            _media: media,
            _gain: gain,
            url: url.to_string(),
            ready: ReadySignal::new(),
            on_ready: None,
            skipped: false,
            cutoff: FILTER_CUTOFF_OPEN_HZ,
            target_cutoff: FILTER_CUTOFF_OPEN_HZ,
        })
    }

    pub fn pause(&self) {
        _ = self.element.pause();
        _ = self.ctx.suspend();
    }
}

impl AudioSource for WebAudioSource {
    fn queue(&mut self) {
        let ready = self.ready.clone();
        let closure = Closure::wrap(Box::new(move || {
            ready.notify();
        }) as Box<dyn FnMut()>);
        if let Err(e) = self
            .element
            .add_event_listener_with_callback("canplaythrough", closure.as_ref().unchecked_ref())
        {
            log::error!("[audio] canplaythrough listener error: {:?}", e);
        }
        self.on_ready = Some(closure);
        self.element.set_src(&self.url);
        self.element.load();
        log::info!("[audio] queued {}", self.url);
    }

    fn skip(&mut self) {
        self.skipped = true;
    }

    fn play_queued(&mut self) {
        if let Some(closure) = self.on_ready.take() {
            _ = self.element.remove_event_listener_with_callback(
                "canplaythrough",
                closure.as_ref().unchecked_ref(),
            );
        }
        _ = self.ctx.resume();
        if let Err(e) = self.element.play() {
            log::error!("[audio] play error: {:?}", e);
        }
    }

    fn update(&mut self, dt_sec: f32) {
        if self.skipped {
            return;
        }
        let next = smooth_toward(self.cutoff, self.target_cutoff, dt_sec);
        if next != self.cutoff {
            self.cutoff = next;
            self.filter.frequency().set_value(next);
        }
    }

    fn ready(&self) -> ReadySignal {
        self.ready.clone()
    }

    fn set_effect(&mut self, level: f32) {
        self.target_cutoff = cutoff_for_effect(level);
    }
}
