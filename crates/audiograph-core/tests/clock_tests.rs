// Host-side tests for the frame clock.

use audiograph_core::constants::MAX_FRAME_DELTA_MS;
use audiograph_core::FrameClock;

#[test]
fn tick_returns_clamped_seconds() {
    let mut clock = FrameClock::new();
    for d in [0.0_f32, 1.0, 16.6, 29.9, 30.0, 30.1, 250.0, 10_000.0] {
        let dt = clock.tick(d);
        let expected = d.min(30.0) / 1000.0;
        assert!((dt - expected).abs() < 1e-7, "delta {d}: got {dt}, want {expected}");
    }
}

#[test]
fn elapsed_is_sum_of_clamped_ticks() {
    let mut clock = FrameClock::new();
    let raw = [16.0_f32, 17.0, 500.0, 8.0, 33.0, 0.0, 16.7];
    let mut sum = 0.0_f64;
    for d in raw {
        sum += f64::from(clock.tick(d));
    }
    let expected: f64 = raw
        .iter()
        .map(|d| f64::from(d.min(MAX_FRAME_DELTA_MS) / 1000.0))
        .sum();
    assert!((clock.elapsed() - sum).abs() < 1e-6);
    assert!((clock.elapsed() - expected).abs() < 1e-6);
}

#[test]
fn stall_does_not_jump_time() {
    let mut clock = FrameClock::new();
    clock.tick(16.0);
    let before = clock.elapsed();
    // backgrounded tab for a minute
    clock.tick(60_000.0);
    assert!((clock.elapsed() - before - 0.030).abs() < 1e-6);
    assert!((clock.last_delta() - 0.030).abs() < 1e-7);
}

#[test]
fn elapsed_never_decreases() {
    let mut clock = FrameClock::new();
    let mut prev = clock.elapsed();
    for d in [16.0_f32, -5.0, f32::NAN, f32::NEG_INFINITY, f32::INFINITY, 12.0] {
        clock.tick(d);
        assert!(clock.elapsed() >= prev);
        prev = clock.elapsed();
    }
    // 16 + 0 + 0 + 0 + 30 + 12 ms
    assert!((clock.elapsed() - 0.058).abs() < 1e-6);
}

#[test]
fn infinite_delta_clamps_like_a_stall() {
    let mut clock = FrameClock::new();
    let dt = clock.tick(f32::INFINITY);
    assert!((dt - 0.030).abs() < 1e-7);
    assert!((clock.elapsed() - 0.030).abs() < 1e-9);
    assert_eq!(clock.tick(f32::NAN), 0.0);
    assert_eq!(clock.tick(-16.0), 0.0);
}

#[test]
fn elapsed_keeps_growing_over_long_sessions() {
    let mut clock = FrameClock::new();
    let frames = 40_000_000_u64;
    let mut sum = 0.0_f64;
    for _ in 0..frames {
        sum += f64::from(clock.tick(16.67));
    }
    // past the point where an f32 accumulator stops moving
    assert!(clock.elapsed() > 600_000.0);
    assert!((clock.elapsed() - sum).abs() < 1e-3);

    let before = clock.elapsed();
    clock.tick(16.67);
    assert!(clock.elapsed() - before > 0.016);
}
