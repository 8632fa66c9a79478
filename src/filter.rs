use crate::constants::{FILTER_CUTOFF_CLOSED_HZ, FILTER_CUTOFF_OPEN_HZ, FILTER_SMOOTHING_PER_SEC};

/// Low-pass cutoff for an effect level in [0, 1]; log-spaced so the sweep
/// sounds even. Out-of-range levels clamp, non-finite ones count as idle.
pub fn cutoff_for_effect(level: f32) -> f32 {
    let t = if level.is_finite() {
        level.clamp(0.0, 1.0)
    } else {
        0.0
    };
    FILTER_CUTOFF_OPEN_HZ * (FILTER_CUTOFF_CLOSED_HZ / FILTER_CUTOFF_OPEN_HZ).powf(t)
}

/// Frame-rate independent exponential approach of `current` toward `target`.
pub fn smooth_toward(current: f32, target: f32, dt_sec: f32) -> f32 {
    if !dt_sec.is_finite() || dt_sec <= 0.0 {
        return current;
    }
    let k = 1.0 - (-FILTER_SMOOTHING_PER_SEC * dt_sec).exp();
    current + (target - current) * k
}
