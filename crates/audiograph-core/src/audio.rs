//! Audio-reactive clock and the contract with the audio collaborator.
//!
//! The loop never drives frame cadence. It advances its own playback time,
//! tracks the Idle/Queued/Playing/Skipped lifecycle and exposes the shared
//! [`EffectLevel`] that hotspots write and per-frame uniforms sample.

use crate::config::Platform;
use crate::constants::EFFECT_IDLE;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared, continuously valued effect control (observed usage: 0 or 1).
#[derive(Clone, Debug)]
pub struct EffectLevel(Rc<Cell<f32>>);

impl EffectLevel {
    pub fn new(value: f32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.0.set(value);
    }
}

impl Default for EffectLevel {
    fn default() -> Self {
        Self::new(EFFECT_IDLE)
    }
}

enum ReadyInner {
    Pending(Option<Box<dyn FnOnce()>>),
    Fired,
    Cancelled,
}

/// Single-resolution readiness notification.
///
/// At most one subscriber; it runs exactly once, either when the signal fires
/// or immediately if it already has. Clones share state.
#[derive(Clone)]
pub struct ReadySignal {
    inner: Rc<RefCell<ReadyInner>>,
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ReadyInner::Pending(None))),
        }
    }
}

impl fmt::Debug for ReadySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.inner.borrow() {
            ReadyInner::Pending(None) => "pending",
            ReadyInner::Pending(Some(_)) => "subscribed",
            ReadyInner::Fired => "fired",
            ReadyInner::Cancelled => "cancelled",
        };
        f.debug_tuple("ReadySignal").field(&state).finish()
    }
}

impl ReadySignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe once. A second subscription replaces the first.
    pub fn once(&self, callback: impl FnOnce() + 'static) {
        let run_now = {
            let mut inner = self.inner.borrow_mut();
            match &mut *inner {
                ReadyInner::Pending(slot) => {
                    *slot = Some(Box::new(callback));
                    None
                }
                ReadyInner::Fired => Some(callback),
                ReadyInner::Cancelled => None,
            }
        };
        // Borrow released before the callback runs.
        if let Some(cb) = run_now {
            cb();
        }
    }

    /// Resolve the signal; later calls are no-ops.
    pub fn notify(&self) {
        let callback = {
            let mut inner = self.inner.borrow_mut();
            match std::mem::replace(&mut *inner, ReadyInner::Fired) {
                ReadyInner::Pending(cb) => cb,
                other => {
                    *inner = other;
                    None
                }
            }
        };
        if let Some(cb) = callback {
            cb();
        }
    }

    /// Drop any subscriber; the signal will never fire.
    pub fn cancel(&self) {
        *self.inner.borrow_mut() = ReadyInner::Cancelled;
    }

    pub fn has_subscriber(&self) -> bool {
        matches!(&*self.inner.borrow(), ReadyInner::Pending(Some(_)))
    }

    pub fn is_fired(&self) -> bool {
        matches!(&*self.inner.borrow(), ReadyInner::Fired)
    }
}

/// Audio collaborator contract (decoding/playback/beat detection live there).
pub trait AudioSource {
    fn queue(&mut self);
    fn skip(&mut self);
    fn play_queued(&mut self);
    fn update(&mut self, dt_sec: f32);
    /// Readiness of the queued track.
    fn ready(&self) -> ReadySignal;
    fn set_effect(&mut self, level: f32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioState {
    Idle,
    Queued,
    Playing,
    /// Terminal; media is not supported on this platform.
    Skipped,
}

pub struct AudioSyncLoop<S: AudioSource> {
    source: S,
    state: AudioState,
    effect: EffectLevel,
    playback_time: f64,
    subscription: Option<ReadySignal>,
}

impl<S: AudioSource> AudioSyncLoop<S> {
    pub fn new(source: S) -> Self {
        Self::with_effect(source, EffectLevel::default())
    }

    pub fn with_effect(source: S, effect: EffectLevel) -> Self {
        Self {
            source,
            state: AudioState::Idle,
            effect,
            playback_time: 0.0,
            subscription: None,
        }
    }

    #[inline]
    pub fn state(&self) -> AudioState {
        self.state
    }

    /// Shared handle to the effect level.
    #[inline]
    pub fn effect(&self) -> &EffectLevel {
        &self.effect
    }

    #[inline]
    pub fn playback_time(&self) -> f64 {
        self.playback_time
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The ready subscription created by [`start`], if any.
    pub fn subscription(&self) -> Option<&ReadySignal> {
        self.subscription.as_ref()
    }

    /// Idle -> Queued.
    pub fn queue(&mut self) {
        if self.state != AudioState::Idle {
            log::warn!("[audio] queue ignored in state {:?}", self.state);
            return;
        }
        self.source.queue();
        self.state = AudioState::Queued;
    }

    /// Idle -> Skipped.
    pub fn skip(&mut self) {
        if self.state != AudioState::Idle {
            log::warn!("[audio] skip ignored in state {:?}", self.state);
            return;
        }
        self.source.skip();
        self.state = AudioState::Skipped;
        log::info!("[audio] skipped");
    }

    /// Queued -> Playing; other states ignore it.
    pub fn play_queued(&mut self) {
        if self.state != AudioState::Queued {
            return;
        }
        self.source.play_queued();
        self.state = AudioState::Playing;
        self.subscription = None;
        log::info!("[audio] playing");
    }

    pub fn update(&mut self, dt_sec: f32) {
        if self.state == AudioState::Playing && dt_sec.is_finite() && dt_sec > 0.0 {
            self.playback_time += dt_sec as f64;
        }
        self.source.set_effect(self.effect.get());
        self.source.update(dt_sec);
    }

    /// Drop the pending ready subscription, if any.
    pub fn teardown(&mut self) {
        if let Some(signal) = self.subscription.take() {
            signal.cancel();
        }
    }
}

/// Pick the autoplay strategy once at startup.
///
/// Mobile platforms skip audio outright and never subscribe to readiness.
/// Elsewhere the track is queued and plays when the source reports ready.
pub fn start<S: AudioSource + 'static>(
    audio: &Rc<RefCell<AudioSyncLoop<S>>>,
    platform: &Platform,
) {
    let signal = {
        let mut a = audio.borrow_mut();
        if platform.is_mobile {
            a.skip();
            return;
        }
        a.queue();
        let signal = a.source.ready();
        a.subscription = Some(signal.clone());
        signal
    };
    let weak = Rc::downgrade(audio);
    signal.once(move || {
        if let Some(a) = weak.upgrade() {
            a.borrow_mut().play_queued();
        }
    });
}
