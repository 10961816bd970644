// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use map_core::constants as core;

#[test]
#[allow(clippy::assertions_on_constants)]
fn web_constants_are_within_reasonable_bounds() {
    // Visibility threshold is a fraction of the element
    assert!(VISIBILITY_THRESHOLD > 0.0 && VISIBILITY_THRESHOLD <= 1.0);

    // Pixel ratio cap should never shrink below CSS pixels
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);

    assert!(PATH_CACHE_MAX > 0);
    assert!(VISIBILITY_ROOT_MARGIN.ends_with("px"));
    assert!(DEFAULT_BACKGROUND_SRC.starts_with('/'));
    assert!(!DEFAULT_CANVAS_ID.is_empty());
}

#[test]
fn cursors_and_queries_are_css_tokens() {
    assert_ne!(CURSOR_IDLE, CURSOR_DRAGGING);
    assert!(REDUCED_MOTION_QUERY.starts_with('(') && REDUCED_MOTION_QUERY.ends_with(')'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn core_constants_have_logical_relationships() {
    // Projection window excludes the poles
    assert!(core::LAT_MIN > -90.0 && core::LAT_MAX < 90.0);
    assert!(core::LNG_MIN < core::LNG_MAX);

    // Friction decays, the floor is positive
    assert!(core::DECAY_FRICTION > 0.0 && core::DECAY_FRICTION < 1.0);
    assert!(core::DECAY_MIN_VELOCITY > 0.0);

    // Reduced tier is a subset of full
    assert!(core::REDUCED_MAX_MARKERS <= core::FULL_MAX_MARKERS);
    assert!(core::REDUCED_MAX_OVERLAYS <= core::FULL_MAX_OVERLAYS);

    // Endpoint pulse grows outwards
    assert!(core::ENDPOINT_PULSE_MAX_RADIUS > core::ENDPOINT_RADIUS);

    // A clamped frame still fits several decay steps
    assert!(core::MAX_FRAME_DT_SECS * 1000.0 > core::DECAY_FRAME_INTERVAL_MS);
}
