use crate::constants::MAX_FRAME_DELTA_MS;

/// Simulation clock advanced once per displayed frame.
///
/// Raw deltas are clamped to [`MAX_FRAME_DELTA_MS`] so a backgrounded tab or
/// a long stall does not make animated state jump. Elapsed time only grows.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    elapsed: f64,
    last_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `raw_delta_ms`; returns the clamped delta in seconds.
    pub fn tick(&mut self, raw_delta_ms: f32) -> f32 {
        // NaN and negatives count as no time; +inf clamps like any stall
        let ms = if raw_delta_ms.is_nan() {
            0.0
        } else {
            raw_delta_ms.clamp(0.0, MAX_FRAME_DELTA_MS)
        };
        let dt = ms / 1000.0;
        self.elapsed += f64::from(dt);
        self.last_delta = dt;
        dt
    }

    /// Accumulated simulation time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }
}
