// Tuning constants shared by the core state machines and the web frontend.

// Scroll phase breakpoints (progress is 0-100)
pub const MAP_PHASE_END: f32 = 33.0;
pub const REGION_PHASE_END: f32 = 66.0;
pub const FESTIVAL_PHASE_SPAN: f32 = 34.0;

// Note pool
pub const MAX_NOTES: usize = 8;
pub const NOTE_OPACITY_MIN: f32 = 0.75;
pub const NOTE_OPACITY_MAX: f32 = 1.0;
pub const NOTE_DISABLED_OPACITY: f32 = 0.2;

// Note lifecycle timing (milliseconds)
pub const REVEAL_DELAY_MS: f64 = 100.0;
pub const FLOAT_DELAY_MS: f64 = 500.0;
pub const CLICK_REMOVE_DELAY_MS: f64 = 500.0;
pub const CLICK_REPLACE_MIN_MS: f64 = 300.0;
pub const CLICK_REPLACE_MAX_MS: f64 = 1000.0;
pub const SPAWN_STAGGER_MS: f64 = 200.0;
pub const SWEEP_INTERVAL_MS: f64 = 2000.0;
pub const SWEEP_REPLACE_MIN_MS: f64 = 200.0;
pub const SWEEP_REPLACE_MAX_MS: f64 = 700.0;
pub const STATS_INTERVAL_MS: f64 = 5000.0;

// A note is recycled once its rectangle is fully past the viewport edge by
// this many pixels.
pub const SWEEP_MARGIN_PX: f64 = 50.0;

// Spawn placement (viewport-percentage units around the phase anchor)
pub const SPAWN_DISTANCE_MIN_PCT: f32 = 15.0;
pub const SPAWN_DISTANCE_MAX_PCT: f32 = 40.0;
pub const RETRY_DISTANCE_MIN_PCT: f32 = 30.0;
pub const RETRY_DISTANCE_MAX_PCT: f32 = 50.0;
pub const VIEWPORT_MIN_PCT: f32 = 5.0;
pub const VIEWPORT_MAX_PCT: f32 = 95.0;

// Input router
pub const SCROLL_SAMPLE_INTERVAL_MS: f64 = 8.0; // ~120 samples/sec
pub const WHEEL_STEP_VIEWPORT_FRACTION: f32 = 0.25;
pub const KEY_STEP_VIEWPORT_FRACTION: f32 = 0.35;
