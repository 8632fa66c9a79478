// Front-end wiring and audio tuning constants.
// Rendering and timing constants shared with the host tests live in
// `audiograph_core::constants`.
pub const CANVAS_ID: &str = "canvas";
pub const AUDIO_TRACK_URL: &str = "assets/audio/track.mp3";

// Low-pass cutoff at effect 0 and effect 1 (Hz)
pub const FILTER_CUTOFF_OPEN_HZ: f32 = 20_000.0;
pub const FILTER_CUTOFF_CLOSED_HZ: f32 = 420.0;
pub const FILTER_Q: f32 = 1.2;
// Exponential approach rate of the live cutoff toward its target (1/s)
pub const FILTER_SMOOTHING_PER_SEC: f32 = 6.0;

pub const MASTER_GAIN: f32 = 0.8;

pub const KEY_SPACE: &str = " ";

// Seed for the palette order; fixed so reloads look the same
pub const PALETTE_SEED: u64 = 0x5eed_0a11;

pub const PALETTES: &[&[&str]] = &[
    &["#69d2e7", "#a7dbd8", "#e0e4cc", "#f38630", "#fa6900"],
    &["#fe4365", "#fc9d9a", "#f9cdad", "#c8c8a9", "#83af9b"],
    &["#ecd078", "#d95b43", "#c02942", "#542437", "#53777a"],
    &["#556270", "#4ecdc4", "#c7f464", "#ff6b6b", "#c44d58"],
    &["#774f38", "#e08e79", "#f1d4af", "#ece5ce", "#c5e0dc"],
    &["#e8ddcb", "#cdb380", "#036564", "#033649", "#031634"],
    &["#490a3d", "#bd1550", "#e97f02", "#f8ca00", "#8a9b0f"],
    &["#594f4f", "#547980", "#45ada8", "#9de0ad", "#e5fcc2"],
];
