//! Builds one frame's [`Scene`] from already-advanced state.
//!
//! `compose` is a pure function of its input: it never advances time or
//! touches the drag controller, so it can run any number of times per frame.

use crate::constants::{
    BURST_FLASH_RADIUS, BURST_PARTICLE_RADIUS, CURVE_REVEAL_SECS, CURVE_REVEAL_STAGGER_SECS,
    ENDPOINT_PULSE_MAX_RADIUS, ENDPOINT_PULSE_SECS, ENDPOINT_RADIUS, MARKER_GLOW_RADIUS,
    MARKER_RADIUS,
};
use crate::fidelity::FidelityTier;
use crate::geo::{GeoPoint, Rgba};
use crate::marker::MarkerSample;
use crate::overlay::OverlaySet;
use crate::path::QuadCurve;
use crate::projection::{Projector, SurfaceSize};
use crate::scene::{DrawItem, LayerKind, Scene, TextAlign};
use crate::timeline::{ease_out_cubic, TimedCycle};
use glam::Vec2;

const LABEL_COLOR: Rgba = Rgba {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.35,
};
const CONTINENT_LABEL_SIZE: f32 = 9.0;
const ENDPOINT_LABEL_SIZE: f32 = 8.0;
const HINT_TEXT: &str = "Drag to explore";

// name, lat, lng
const CONTINENT_LABELS: [(&str, f64, f64); 6] = [
    ("NORTH AMERICA", 45.0, -100.0),
    ("SOUTH AMERICA", -15.0, -60.0),
    ("EUROPE", 50.0, 10.0),
    ("AFRICA", 0.0, 20.0),
    ("ASIA", 35.0, 90.0),
    ("OCEANIA", -25.0, 135.0),
];

/// One connection as the composer sees it: the projected arc, its resolved
/// color and the optional endpoint labels.
#[derive(Clone, Debug)]
pub struct ComposedArc<'a> {
    pub curve: QuadCurve,
    pub color: Rgba,
    pub start: &'a GeoPoint,
    pub end: &'a GeoPoint,
}

pub struct ComposeInput<'a> {
    pub projector: &'a Projector,
    pub offset: f32,
    pub arcs: &'a [ComposedArc<'a>],
    pub markers: &'a [MarkerSample],
    pub overlays: Option<&'a OverlaySet>,
    pub tier: FidelityTier,
    /// Seconds since the loop first ran.
    pub elapsed: f32,
    pub show_hint: bool,
}

pub fn compose(input: &ComposeInput) -> Scene {
    let size = input.projector.size();
    let pan_x = wrap_pan(input.offset, size.width);
    let mut scene = Scene::new(size, pan_x);

    scene.layer_mut(LayerKind::Background).push(DrawItem::Image {
        size: size.as_vec2(),
    });

    compose_connections(input, scene.layer_mut(LayerKind::Connections));
    compose_markers(input, scene.layer_mut(LayerKind::Markers));
    if let Some(overlays) = input.overlays {
        overlays.emit(
            input.elapsed,
            input.tier.max_overlay_entities,
            input.tier.heavy_effects_enabled,
            scene.layer_mut(LayerKind::Overlays),
        );
    }
    compose_foreground(input, size, scene.layer_mut(LayerKind::Foreground));
    scene
}

/// Pan offset folded into `[0, width)`.
pub fn wrap_pan(offset: f32, width: f32) -> f32 {
    if width.is_nan() || width <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    let p = offset.rem_euclid(width);
    // rem_euclid can round up to exactly `width` for tiny negative inputs.
    if p >= width {
        0.0
    } else {
        p
    }
}

/// Fraction of connection `index` drawn at `elapsed`.
pub fn reveal_fraction(index: usize, elapsed: f32) -> f32 {
    let local = elapsed - CURVE_REVEAL_STAGGER_SECS * index as f32;
    ease_out_cubic(local / CURVE_REVEAL_SECS)
}

fn compose_connections(input: &ComposeInput, out: &mut Vec<DrawItem>) {
    let heavy = input.tier.heavy_effects_enabled;
    for (i, arc) in input.arcs.iter().enumerate() {
        let reveal = reveal_fraction(i, input.elapsed);
        if reveal <= 0.0 {
            continue;
        }
        let shown = if reveal >= 1.0 {
            arc.curve
        } else {
            arc.curve.prefix(reveal)
        };
        if heavy {
            out.push(DrawItem::Curve {
                curve: shown,
                color: arc.color.with_alpha(0.3),
                width: 4.0,
                glow: 6.0,
            });
        }
        out.push(DrawItem::Curve {
            curve: shown,
            color: arc.color.with_alpha(0.85),
            width: 1.2,
            glow: 0.0,
        });

        let begin = i as f32 * 0.5;
        for (point, extra) in [(arc.curve.p0, 0.0), (arc.curve.p1, 0.3)] {
            out.push(DrawItem::dot(point, ENDPOINT_RADIUS, arc.color));
            let pulse = TimedCycle::looping(ENDPOINT_PULSE_SECS, begin + extra);
            if let Some(u) = pulse.progress(input.elapsed) {
                let r = ENDPOINT_RADIUS + (ENDPOINT_PULSE_MAX_RADIUS - ENDPOINT_RADIUS) * u;
                out.push(DrawItem::ring(
                    point,
                    r,
                    arc.color.with_alpha(0.6 * (1.0 - u)),
                    1.0,
                ));
            }
        }
    }
}

fn compose_markers(input: &ComposeInput, out: &mut Vec<DrawItem>) {
    let heavy = input.tier.heavy_effects_enabled;
    for m in input.markers {
        let color = Rgba::from_hex(m.style.color).unwrap_or(Rgba::WHITE);
        if let Some(burst) = &m.burst {
            for p in &burst.particles {
                out.push(DrawItem::dot(
                    *p,
                    BURST_PARTICLE_RADIUS * burst.particle_scale,
                    color.with_alpha(burst.particle_opacity),
                ));
            }
            if burst.flash_opacity > 0.0 {
                out.push(DrawItem::dot(
                    burst.center,
                    BURST_FLASH_RADIUS * burst.flash_scale,
                    Rgba::WHITE.with_alpha(burst.flash_opacity),
                ));
            }
            continue;
        }
        if m.opacity <= 0.0 || m.scale <= 0.0 {
            continue;
        }
        if heavy {
            out.push(DrawItem::dot(
                m.position,
                MARKER_GLOW_RADIUS * m.scale,
                color.with_alpha(0.25 * m.opacity),
            ));
        }
        out.push(DrawItem::Circle {
            center: m.position,
            radius: MARKER_RADIUS * m.scale,
            fill: Some(color.with_alpha(m.opacity)),
            stroke: Some((Rgba::WHITE.with_alpha(0.8 * m.opacity), 0.6)),
            glow: 0.0,
        });
        out.push(DrawItem::Text {
            pos: m.position + Vec2::new(0.0, 2.5 * m.scale),
            text: m.style.symbol.to_string(),
            color: Rgba::WHITE.with_alpha(m.opacity),
            size: 7.0 * m.scale,
            align: TextAlign::Center,
        });
    }
}

fn compose_foreground(input: &ComposeInput, size: SurfaceSize, out: &mut Vec<DrawItem>) {
    for &(name, lat, lng) in &CONTINENT_LABELS {
        out.push(DrawItem::Text {
            pos: input.projector.project(lat, lng),
            text: name.to_string(),
            color: LABEL_COLOR,
            size: CONTINENT_LABEL_SIZE,
            align: TextAlign::Center,
        });
    }
    for arc in input.arcs {
        for (point, geo) in [(arc.curve.p0, arc.start), (arc.curve.p1, arc.end)] {
            if let Some(text) = &geo.label {
                out.push(DrawItem::Text {
                    pos: point + Vec2::new(7.0, -6.0),
                    text: text.clone(),
                    color: arc.color.with_alpha(0.9),
                    size: ENDPOINT_LABEL_SIZE,
                    align: TextAlign::Left,
                });
            }
        }
    }
    if input.show_hint {
        out.push(DrawItem::Text {
            pos: Vec2::new(size.width * 0.5, size.height - 14.0),
            text: HINT_TEXT.to_string(),
            color: Rgba::WHITE.with_alpha(0.5),
            size: 10.0,
            align: TextAlign::Center,
        });
    }
}
