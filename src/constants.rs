/// Browser-side tuning for the map widget.
///
/// Geometry and animation constants live in `map_core::constants`; this file
/// only holds what the DOM glue needs.
// Element ids and assets
pub const DEFAULT_CANVAS_ID: &str = "world-map";
pub const DEFAULT_BACKGROUND_SRC: &str = "/world-map-dots.svg";

// Visibility observer
pub const VISIBILITY_THRESHOLD: f64 = 0.05; // fraction of the canvas on screen
pub const VISIBILITY_ROOT_MARGIN: &str = "200px";

// Painter
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0; // caps backing store cost on dense screens
pub const LABEL_FONT_FAMILY: &str = "ui-sans-serif, system-ui, sans-serif";
pub const PATH_CACHE_MAX: usize = 256;

// Drag affordance
pub const CURSOR_IDLE: &str = "grab";
pub const CURSOR_DRAGGING: &str = "grabbing";

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
