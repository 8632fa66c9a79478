// Host-side tests for the effect -> low-pass mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod filter {
    include!("../src/filter.rs");
}

use constants::{FILTER_CUTOFF_CLOSED_HZ, FILTER_CUTOFF_OPEN_HZ};
use filter::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn idle_and_active_map_to_range_ends() {
    assert!(approx(cutoff_for_effect(0.0), FILTER_CUTOFF_OPEN_HZ, 0.5));
    assert!(approx(cutoff_for_effect(1.0), FILTER_CUTOFF_CLOSED_HZ, 0.5));
}

#[test]
fn cutoff_falls_monotonically_with_effect() {
    let mut prev = cutoff_for_effect(0.0);
    for i in 1..=10 {
        let c = cutoff_for_effect(i as f32 / 10.0);
        assert!(c < prev, "step {} did not close the filter", i);
        prev = c;
    }
}

#[test]
fn out_of_range_levels_clamp() {
    assert!(approx(cutoff_for_effect(-3.0), FILTER_CUTOFF_OPEN_HZ, 0.5));
    assert!(approx(cutoff_for_effect(7.0), FILTER_CUTOFF_CLOSED_HZ, 0.5));
    assert!(approx(cutoff_for_effect(f32::NAN), FILTER_CUTOFF_OPEN_HZ, 0.5));
}

#[test]
fn smoothing_moves_toward_target_without_overshoot() {
    let next = smooth_toward(1000.0, 500.0, 1.0 / 60.0);
    assert!(next < 1000.0 && next > 500.0);
    let settled = (0..600).fold(1000.0, |c, _| smooth_toward(c, 500.0, 1.0 / 60.0));
    assert!(approx(settled, 500.0, 0.5));
}

#[test]
fn smoothing_ignores_bad_deltas() {
    assert_eq!(smooth_toward(800.0, 100.0, 0.0), 800.0);
    assert_eq!(smooth_toward(800.0, 100.0, -0.5), 800.0);
    assert_eq!(smooth_toward(800.0, 100.0, f32::INFINITY), 800.0);
}
