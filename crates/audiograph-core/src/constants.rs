// Shared pipeline/visual tuning constants.

// Frame clock
pub const MAX_FRAME_DELTA_MS: f32 = 30.0; // single-frame clamp (tab switches, stalls)

// Camera
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 4.0;

// Scene animation (orb bob + slow spin)
pub const MESH_BOB_AMPLITUDE: f32 = 0.25;
pub const MESH_BOB_OFFSET: f32 = 1.0;
pub const MESH_SPIN_PER_SEC: f32 = 0.05; // radians per elapsed second

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;
pub const SSAO_RADIUS: f32 = 6.0; // kernel radius in physical pixels
pub const SSAO_INTENSITY: f32 = 0.7;

// Effect level toggled by hotspot interaction
pub const EFFECT_IDLE: f32 = 0.0;
pub const EFFECT_ACTIVE: f32 = 1.0;

// iOS landscape scroll fix delay
pub const IOS_SCROLL_FIX_DELAY_MS: i32 = 500;

// Background/white palette, first entry becomes the clear colour
pub const WHITE_PALETTE: [&str; 3] = ["#fff", "#d3d3d3", "#a5a5a5"];
