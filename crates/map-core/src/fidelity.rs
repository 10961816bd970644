//! Decoration quality tiers.
//!
//! The tier only ever trims decoration: projection, arcs and drag physics
//! behave identically in both tiers.

use crate::constants::{
    FULL_MAX_MARKERS, FULL_MAX_OVERLAYS, MOBILE_BREAKPOINT_PX, REDUCED_MAX_MARKERS,
    REDUCED_MAX_OVERLAYS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierName {
    Full,
    Reduced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FidelityTier {
    pub name: TierName,
    pub max_markers: usize,
    pub max_overlay_entities: usize,
    pub heavy_effects_enabled: bool,
}

impl FidelityTier {
    pub const FULL: FidelityTier = FidelityTier {
        name: TierName::Full,
        max_markers: FULL_MAX_MARKERS,
        max_overlay_entities: FULL_MAX_OVERLAYS,
        heavy_effects_enabled: true,
    };

    pub const REDUCED: FidelityTier = FidelityTier {
        name: TierName::Reduced,
        max_markers: REDUCED_MAX_MARKERS,
        max_overlay_entities: REDUCED_MAX_OVERLAYS,
        heavy_effects_enabled: false,
    };

    pub fn is_reduced(&self) -> bool {
        self.name == TierName::Reduced
    }
}

pub fn select_tier(viewport_width: f32, reduced_motion_hint: bool) -> FidelityTier {
    select_tier_with_breakpoint(viewport_width, reduced_motion_hint, MOBILE_BREAKPOINT_PX)
}

pub fn select_tier_with_breakpoint(
    viewport_width: f32,
    reduced_motion_hint: bool,
    breakpoint_px: f32,
) -> FidelityTier {
    // An unknown width (NaN) is treated as narrow.
    if reduced_motion_hint || viewport_width.is_nan() || viewport_width < breakpoint_px {
        FidelityTier::REDUCED
    } else {
        FidelityTier::FULL
    }
}

/// Device signals read once at mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceSignals {
    pub viewport_width: f32,
    pub prefers_reduced_motion: bool,
    pub save_data: bool,
}

impl DeviceSignals {
    pub fn constrained(&self) -> bool {
        self.prefers_reduced_motion || self.save_data
    }
}

/// Caches the current tier; recomputes only on viewport resize.
#[derive(Clone, Debug)]
pub struct FidelitySelector {
    signals: DeviceSignals,
    breakpoint_px: f32,
    tier: FidelityTier,
}

impl FidelitySelector {
    pub fn new(signals: DeviceSignals, breakpoint_px: f32) -> Self {
        let tier = select_tier_with_breakpoint(
            signals.viewport_width,
            signals.constrained(),
            breakpoint_px,
        );
        log::info!("[fidelity] initial tier {:?}", tier.name);
        Self {
            signals,
            breakpoint_px,
            tier,
        }
    }

    pub fn tier(&self) -> FidelityTier {
        self.tier
    }

    pub fn signals(&self) -> DeviceSignals {
        self.signals
    }

    /// Returns true when the tier changed.
    pub fn on_resize(&mut self, viewport_width: f32) -> bool {
        self.signals.viewport_width = viewport_width;
        let next = select_tier_with_breakpoint(
            viewport_width,
            self.signals.constrained(),
            self.breakpoint_px,
        );
        if next != self.tier {
            log::info!(
                "[fidelity] tier {:?} -> {:?} (width {})",
                self.tier.name,
                next.name,
                viewport_width
            );
            self.tier = next;
            true
        } else {
            false
        }
    }
}
