// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use audiograph_core::palette::{parse_palette, Rgb};
use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn filter_range_is_audible_and_ordered() {
    assert!(FILTER_CUTOFF_CLOSED_HZ > 20.0);
    assert!(FILTER_CUTOFF_OPEN_HZ <= 22_050.0);
    assert!(FILTER_CUTOFF_CLOSED_HZ < FILTER_CUTOFF_OPEN_HZ);
    assert!(FILTER_Q > 0.0);
    assert!(FILTER_SMOOTHING_PER_SEC > 0.0);
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
}

#[test]
fn every_palette_entry_is_valid_hex() {
    assert!(!PALETTES.is_empty());
    for palette in PALETTES {
        assert!(palette.len() >= 2, "orb needs two tints");
        for hex in palette.iter() {
            assert!(Rgb::from_hex(hex).is_some(), "bad colour {}", hex);
        }
        assert_eq!(parse_palette(palette).len(), palette.len());
    }
}

#[test]
fn canvas_and_track_are_named() {
    assert_eq!(CANVAS_ID, "canvas");
    assert!(AUDIO_TRACK_URL.ends_with(".mp3"));
    assert_eq!(KEY_SPACE, " ");
}
