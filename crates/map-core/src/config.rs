//! Widget configuration.
//!
//! Every field has a default taken from `constants.rs`; hosts usually only
//! flip `markers_enabled` or swap the line color.

use crate::constants::*;
use crate::error::ConfigError;
use crate::geo::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaParams {
    pub friction: f32,
    pub min_velocity: f32,
    pub frame_interval_ms: f32,
    pub max_steps_per_frame: u32,
    /// Pointer-up later than this after the last motion releases without momentum.
    pub release_window_ms: f32,
}

impl Default for InertiaParams {
    fn default() -> Self {
        Self {
            friction: DECAY_FRICTION,
            min_velocity: DECAY_MIN_VELOCITY,
            frame_interval_ms: DECAY_FRAME_INTERVAL_MS,
            max_steps_per_frame: DECAY_MAX_STEPS_PER_FRAME,
            release_window_ms: RELEASE_WINDOW_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerTimings {
    pub appear_secs: f32,
    pub travel_secs: f32,
    pub burst_secs: f32,
    pub repeat_delay_secs: f32,
    pub base_delay_secs: f32,
    pub stagger_secs: f32,
}

impl MarkerTimings {
    /// First dormant wait for the marker on connection `index`.
    pub fn start_delay(&self, index: usize) -> f32 {
        self.base_delay_secs + self.stagger_secs * index as f32
    }
}

impl Default for MarkerTimings {
    fn default() -> Self {
        Self {
            appear_secs: MARKER_APPEAR_SECS,
            travel_secs: MARKER_TRAVEL_SECS,
            burst_secs: MARKER_BURST_SECS,
            repeat_delay_secs: MARKER_REPEAT_DELAY_SECS,
            base_delay_secs: MARKER_BASE_DELAY_SECS,
            stagger_secs: MARKER_STAGGER_SECS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub surface_height: f32,
    pub arc_height: f32,
    pub line_color: String,
    pub markers_enabled: bool,
    pub overlays_enabled: bool,
    pub inertia: InertiaParams,
    pub markers: MarkerTimings,
    pub mobile_breakpoint_px: f32,
    pub visibility_fallback_ms: u32,
    pub max_frame_dt_secs: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            surface_height: SURFACE_HEIGHT,
            arc_height: ARC_HEIGHT,
            line_color: DEFAULT_LINE_COLOR.to_string(),
            markers_enabled: true,
            overlays_enabled: true,
            inertia: InertiaParams::default(),
            markers: MarkerTimings::default(),
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            visibility_fallback_ms: VISIBILITY_FALLBACK_MS,
            max_frame_dt_secs: MAX_FRAME_DT_SECS,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("surface_height", self.surface_height)?;
        positive("mobile_breakpoint_px", self.mobile_breakpoint_px)?;
        positive("max_frame_dt_secs", self.max_frame_dt_secs)?;
        positive("inertia.min_velocity", self.inertia.min_velocity)?;
        positive("inertia.frame_interval_ms", self.inertia.frame_interval_ms)?;
        positive("inertia.release_window_ms", self.inertia.release_window_ms)?;
        positive("markers.appear_secs", self.markers.appear_secs)?;
        positive("markers.travel_secs", self.markers.travel_secs)?;
        positive("markers.burst_secs", self.markers.burst_secs)?;
        if !(self.arc_height.is_finite() && self.arc_height >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "arc_height",
                value: self.arc_height,
            });
        }
        let f = self.inertia.friction;
        if !(f > 0.0 && f < 1.0) {
            return Err(ConfigError::FrictionOutOfRange(f));
        }
        self.line_rgba()?;
        Ok(())
    }

    pub fn line_rgba(&self) -> Result<Rgba, ConfigError> {
        Rgba::from_hex(&self.line_color)
            .ok_or_else(|| ConfigError::BadLineColor(self.line_color.clone()))
    }
}
