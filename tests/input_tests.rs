// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn cover_fit_fills_wide_box() {
    // Surface 841x400 into a 1682x400 box: width decides, height overflows
    let fit = cover_fit(Vec2::new(1682.0, 400.0), Vec2::new(841.0, 400.0));
    assert!((fit.scale - 2.0).abs() < 1e-6);
    assert!((fit.offset.x).abs() < 1e-4);
    assert!((fit.offset.y - (400.0 - 800.0) * 0.5).abs() < 1e-4);
}

#[test]
fn cover_fit_fills_tall_box() {
    let fit = cover_fit(Vec2::new(400.0, 800.0), Vec2::new(841.0, 400.0));
    assert!((fit.scale - 2.0).abs() < 1e-6);
    assert!(fit.offset.x < 0.0);
    assert!(fit.offset.y.abs() < 1e-4);
}

#[test]
fn cover_fit_degenerate_box_is_identity() {
    assert_eq!(
        cover_fit(Vec2::new(0.0, 300.0), Vec2::new(841.0, 400.0)),
        CoverFit::IDENTITY
    );
    assert_eq!(
        cover_fit(Vec2::new(300.0, 300.0), Vec2::ZERO),
        CoverFit::IDENTITY
    );
}

#[test]
fn to_surface_inverts_the_fit() {
    let fit = cover_fit(Vec2::new(1200.0, 500.0), Vec2::new(841.0, 400.0));
    let surface_point = Vec2::new(420.0, 200.0);
    let css = surface_point * fit.scale + fit.offset;
    let back = fit.to_surface(css);
    assert!((back - surface_point).length() < 1e-3);
}

#[test]
fn drag_delta_scales_with_fit() {
    // A 100 css px swipe on a 2x fit moves the surface by 50 units
    let fit = cover_fit(Vec2::new(1682.0, 800.0), Vec2::new(841.0, 400.0));
    let a = fit.to_surface(Vec2::new(300.0, 0.0));
    let b = fit.to_surface(Vec2::new(400.0, 0.0));
    assert!(((b.x - a.x) - 50.0).abs() < 1e-4);
}

#[test]
fn only_primary_mouse_button_presses() {
    assert!(is_primary_press("mouse", 0));
    assert!(!is_primary_press("mouse", 2));
    assert!(is_primary_press("touch", 0));
    assert!(is_primary_press("pen", -1));
}
