// Host-side tests for the audio lifecycle, readiness and hotspot effect.

mod common;

use audiograph_core::audio::{self, AudioState, AudioSyncLoop, EffectLevel, ReadySignal};
use audiograph_core::{Hotspot, Platform};
use common::FakeAudio;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const DESKTOP_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Version/17.0 Safari/605.1.15";
const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

#[test]
fn user_agent_classification() {
    let desktop = Platform::from_user_agent(DESKTOP_UA);
    assert!(!desktop.is_mobile && !desktop.is_ios);
    assert!(desktop.supports_media());

    let iphone = Platform::from_user_agent(IPHONE_UA);
    assert!(iphone.is_mobile && iphone.is_ios);
    assert!(!iphone.supports_media());

    let android = Platform::from_user_agent("Mozilla/5.0 (Linux; Android 14) Mobile Safari");
    assert!(android.is_mobile && !android.is_ios);
}

#[test]
fn desktop_queues_then_plays_when_ready() {
    let audio = Rc::new(RefCell::new(AudioSyncLoop::new(FakeAudio::default())));
    audio::start(&audio, &Platform::from_user_agent(DESKTOP_UA));
    assert_eq!(audio.borrow().state(), AudioState::Queued);
    assert_eq!(audio.borrow().source().queued, 1);

    let ready = audio.borrow().source().ready.clone();
    assert!(ready.has_subscriber());
    ready.notify();
    assert_eq!(audio.borrow().state(), AudioState::Playing);
    assert_eq!(audio.borrow().source().played, 1);

    // a second notification is ignored
    ready.notify();
    assert_eq!(audio.borrow().source().played, 1);
}

#[test]
fn mobile_skips_without_subscribing() {
    let audio = Rc::new(RefCell::new(AudioSyncLoop::new(FakeAudio::default())));
    audio::start(&audio, &Platform::from_user_agent(IPHONE_UA));
    let a = audio.borrow();
    assert_eq!(a.state(), AudioState::Skipped);
    assert_eq!(a.source().skipped, 1);
    assert_eq!(a.source().queued, 0);
    assert_eq!(a.effect().get(), 0.0);
    assert!(a.subscription().is_none());
    assert!(!a.source().ready.has_subscriber());
}

#[test]
fn skipped_is_terminal() {
    let mut a = AudioSyncLoop::new(FakeAudio::default());
    a.skip();
    a.queue();
    a.play_queued();
    assert_eq!(a.state(), AudioState::Skipped);
    assert_eq!(a.source().queued, 0);
    assert_eq!(a.source().played, 0);
}

#[test]
fn ready_before_subscription_runs_immediately() {
    let signal = ReadySignal::new();
    signal.notify();
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    signal.once(move || h.set(h.get() + 1));
    assert_eq!(hits.get(), 1);
    assert!(signal.is_fired());
}

#[test]
fn teardown_drops_subscription() {
    let audio = Rc::new(RefCell::new(AudioSyncLoop::new(FakeAudio::default())));
    audio::start(&audio, &Platform::default());
    let ready = audio.borrow().source().ready.clone();
    audio.borrow_mut().teardown();
    assert!(!ready.has_subscriber());
    ready.notify();
    assert_eq!(audio.borrow().state(), AudioState::Queued);
    assert_eq!(audio.borrow().source().played, 0);
}

#[test]
fn playback_time_advances_only_while_playing() {
    let mut a = AudioSyncLoop::new(FakeAudio::default());
    a.update(0.5);
    assert_eq!(a.playback_time(), 0.0);
    a.queue();
    a.update(0.5);
    assert_eq!(a.playback_time(), 0.0);
    a.play_queued();
    a.update(0.25);
    a.update(0.25);
    assert!((a.playback_time() - 0.5).abs() < 1e-9);
    assert_eq!(a.source().updates, 4);
}

#[test]
fn update_forwards_effect_level() {
    let effect = EffectLevel::default();
    let mut a = AudioSyncLoop::with_effect(FakeAudio::default(), effect.clone());
    effect.set(0.4);
    a.update(0.016);
    assert_eq!(a.source().last_effect, Some(0.4));
}

#[test]
fn hotspot_press_release_toggles_effect_only() {
    let audio = Rc::new(RefCell::new(AudioSyncLoop::new(FakeAudio::default())));
    audio::start(&audio, &Platform::default());
    let hotspot = Hotspot::new(audio.borrow().effect().clone());
    let state_before = audio.borrow().state();
    let time_before = audio.borrow().playback_time();

    assert_eq!(audio.borrow().effect().get(), 0.0);
    hotspot.on_down();
    assert_eq!(audio.borrow().effect().get(), 1.0);
    hotspot.on_up();
    assert_eq!(audio.borrow().effect().get(), 0.0);

    let a = audio.borrow();
    assert_eq!(a.state(), state_before);
    assert_eq!(a.playback_time(), time_before);
    assert_eq!(a.source().played, 0);
    assert_eq!(a.source().updates, 0);
}
