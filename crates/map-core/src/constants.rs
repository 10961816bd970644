// Shared geometry/animation tuning constants used by the core and the web frontend.

// Projection window. Must match the bounds of the external dot-field generator
// (EPSG:3857 cropped to this rectangle) or dots and arcs drift apart.
pub const LAT_MIN: f64 = -56.0;
pub const LAT_MAX: f64 = 71.0;
pub const LNG_MIN: f64 = -179.0;
pub const LNG_MAX: f64 = 179.0;

// Logical surface (view box) height; width follows the window aspect (~841)
pub const SURFACE_HEIGHT: f32 = 400.0;

// Arcs
pub const ARC_HEIGHT: f32 = 50.0; // apex lift above the higher endpoint
pub const CURVE_REVEAL_SECS: f32 = 1.5;
pub const CURVE_REVEAL_STAGGER_SECS: f32 = 0.4;

// Traveling markers
pub const MARKER_APPEAR_SECS: f32 = 0.2;
pub const MARKER_TRAVEL_SECS: f32 = 4.0;
pub const MARKER_BURST_SECS: f32 = 0.6;
pub const MARKER_REPEAT_DELAY_SECS: f32 = 8.0;
pub const MARKER_BASE_DELAY_SECS: f32 = 1.5;
pub const MARKER_STAGGER_SECS: f32 = 0.5;
pub const MARKER_RADIUS: f32 = 5.5;
pub const MARKER_GLOW_RADIUS: f32 = 8.0;

// Burst at the end of a trip
pub const BURST_PARTICLES: usize = 6;
pub const BURST_DISTANCE: f32 = 18.0;
pub const BURST_OVERSHOOT: f32 = 1.5; // final distance multiplier
pub const BURST_PARTICLE_RADIUS: f32 = 2.5;
pub const BURST_FLASH_RADIUS: f32 = 4.0;
pub const BURST_FLASH_MAX_SCALE: f32 = 3.0;

// Drag/inertia
pub const DECAY_FRICTION: f32 = 0.97;
pub const DECAY_MIN_VELOCITY: f32 = 0.015; // surface units per ms
pub const DECAY_FRAME_INTERVAL_MS: f32 = 16.0;
pub const DECAY_MAX_STEPS_PER_FRAME: u32 = 8;
pub const RELEASE_WINDOW_MS: f32 = 100.0; // held still longer than this: no fling

// Fidelity tiers
pub const MOBILE_BREAKPOINT_PX: f32 = 1024.0;
pub const FULL_MAX_MARKERS: usize = 8;
pub const FULL_MAX_OVERLAYS: usize = 96;
pub const REDUCED_MAX_MARKERS: usize = 3;
pub const REDUCED_MAX_OVERLAYS: usize = 16;

// Frame pacing
pub const MAX_FRAME_DT_SECS: f32 = 0.1; // hidden tabs resume instead of fast-forwarding
pub const VISIBILITY_FALLBACK_MS: u32 = 1500;

// Endpoint dots
pub const ENDPOINT_RADIUS: f32 = 4.0;
pub const ENDPOINT_PULSE_MAX_RADIUS: f32 = 10.0;
pub const ENDPOINT_PULSE_SECS: f32 = 3.0;

// Default palette
pub const DEFAULT_LINE_COLOR: &str = "#00D4FF";
