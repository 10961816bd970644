//! Web-Mercator projection bounded to the dot-field window.
//!
//! The normalization constants are derived once from the window bounds in
//! [`Projector::new`]; `project` itself is a handful of flops. Inputs outside
//! the window are clamped onto its edge, so the function is total and never
//! produces NaN (the window excludes the poles).

use crate::constants::{LAT_MAX, LAT_MIN, LNG_MAX, LNG_MIN, SURFACE_HEIGHT};
use crate::geo::{GeoPoint, ProjectedPoint};
use glam::Vec2;
use std::f64::consts::FRAC_PI_4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[inline]
fn mercator_y(lat_deg: f64) -> f64 {
    (FRAC_PI_4 + lat_deg.to_radians() / 2.0).tan().ln()
}

#[derive(Clone, Debug)]
pub struct Projector {
    size: SurfaceSize,
    y_max: f64,
    y_range: f64,
    x_min: f64,
    x_range: f64,
}

impl Projector {
    pub fn new(size: SurfaceSize) -> Self {
        let y_min = mercator_y(LAT_MIN);
        let y_max = mercator_y(LAT_MAX);
        let x_min = LNG_MIN.to_radians();
        let x_max = LNG_MAX.to_radians();
        Self {
            size,
            y_max,
            y_range: y_max - y_min,
            x_min,
            x_range: x_max - x_min,
        }
    }

    /// Surface matching the dot-field aspect for a given height.
    pub fn view_box_size(height: f32) -> SurfaceSize {
        let x_range = (LNG_MAX - LNG_MIN).to_radians();
        let y_range = mercator_y(LAT_MAX) - mercator_y(LAT_MIN);
        let width = (height as f64 * x_range / y_range).round() as f32;
        SurfaceSize::new(width, height)
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn project(&self, lat: f64, lng: f64) -> ProjectedPoint {
        // NaN input would survive clamp; pin it to the window origin instead.
        let lat = if lat.is_nan() { 0.0 } else { lat.clamp(LAT_MIN, LAT_MAX) };
        let lng = if lng.is_nan() { 0.0 } else { lng.clamp(LNG_MIN, LNG_MAX) };
        let x = self.size.width as f64 * (lng.to_radians() - self.x_min) / self.x_range;
        let y = self.size.height as f64 * (self.y_max - mercator_y(lat)) / self.y_range;
        Vec2::new(x as f32, y as f32)
    }

    pub fn project_point(&self, p: &GeoPoint) -> ProjectedPoint {
        self.project(p.lat, p.lng)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(Self::view_box_size(SURFACE_HEIGHT))
    }
}
