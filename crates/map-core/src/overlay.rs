//! Decorative overlays: hotspot pulses, radar sweep, orbiting satellites and
//! meteors. Each one is a [`ParticleCycle`]: a [`TimedCycle`] plus a shape
//! whose parameters are sampled from keyframes. Nothing here owns time; the
//! composer passes the elapsed seconds in.

use crate::constants::SURFACE_HEIGHT;
use crate::geo::Rgba;
use crate::path::QuadCurve;
use crate::projection::{Projector, SurfaceSize};
use crate::scene::DrawItem;
use crate::timeline::{Keyframes, TimedCycle};
use glam::Vec2;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub enum ParticleShape {
    /// Filled dot with animated radius/opacity.
    Dot {
        center: Vec2,
        radius: Keyframes,
        opacity: Keyframes,
        color: Rgba,
    },
    /// Stroked ring with animated radius/opacity.
    Ring {
        center: Vec2,
        radius: Keyframes,
        opacity: Keyframes,
        color: Rgba,
        width: f32,
    },
    /// Small body circling `center` once per cycle.
    Orbit {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        color: Rgba,
    },
    /// Rotating pie-slice with a bright leading edge.
    Sweep {
        center: Vec2,
        radius: f32,
        arc: f32,
        color: Rgba,
    },
    /// Meteor: shrinking head plus a fading tail along `from -> to`.
    Streak {
        from: Vec2,
        to: Vec2,
        tail: f32,
        head: Keyframes,
        opacity: Keyframes,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleCycle {
    pub cycle: TimedCycle,
    pub shape: ParticleShape,
    /// Dropped entirely when the tier disables heavy effects.
    pub heavy: bool,
}

impl ParticleCycle {
    pub fn new(cycle: TimedCycle, shape: ParticleShape) -> Self {
        Self {
            cycle,
            shape,
            heavy: false,
        }
    }

    pub fn heavy(mut self) -> Self {
        self.heavy = true;
        self
    }

    /// Push this entity's draw items at `elapsed` seconds. `glow` toggles
    /// blur halos.
    pub fn emit(&self, elapsed: f32, glow: bool, out: &mut Vec<DrawItem>) {
        let Some(u) = self.cycle.progress(elapsed) else {
            return;
        };
        match &self.shape {
            ParticleShape::Dot {
                center,
                radius,
                opacity,
                color,
            } => {
                let a = opacity.sample(u);
                if a > 0.0 {
                    out.push(DrawItem::dot(*center, radius.sample(u), color.with_alpha(a)));
                }
            }
            ParticleShape::Ring {
                center,
                radius,
                opacity,
                color,
                width,
            } => {
                let a = opacity.sample(u);
                if a > 0.0 {
                    out.push(DrawItem::ring(
                        *center,
                        radius.sample(u),
                        color.with_alpha(color.a * a),
                        *width,
                    ));
                }
            }
            ParticleShape::Orbit {
                center,
                radius,
                start_angle,
                color,
            } => {
                let p = *center + Vec2::from_angle(start_angle + u * TAU) * *radius;
                out.push(DrawItem::dot(p, 1.0, *color));
            }
            ParticleShape::Sweep {
                center,
                radius,
                arc,
                color,
            } => {
                let a0 = u * TAU;
                out.push(DrawItem::Wedge {
                    center: *center,
                    radius: *radius,
                    start_angle: a0,
                    end_angle: a0 + arc,
                    color: color.with_alpha(0.35),
                });
                out.push(DrawItem::Line {
                    from: *center,
                    to: *center + Vec2::from_angle(a0) * *radius,
                    color: color.with_alpha(0.7),
                    width: 1.0,
                });
            }
            ParticleShape::Streak {
                from,
                to,
                tail,
                head,
                opacity,
            } => {
                let a = opacity.sample(u);
                let pos = from.lerp(*to, u);
                let dir = (*to - *from).normalize_or_zero();
                // Tail grows over the first half, then burns away.
                let tail_len = tail * (1.0 - (2.0 * u - 1.0).abs());
                out.push(DrawItem::Line {
                    from: pos - dir * tail_len,
                    to: pos,
                    color: Rgba::rgb(1.0, 0.65, 0.0).with_alpha(a * 0.6),
                    width: 1.5,
                });
                let r = head.sample(u);
                if r > 0.0 && a > 0.0 {
                    out.push(DrawItem::Circle {
                        center: pos,
                        radius: r,
                        fill: Some(Rgba::WHITE.with_alpha(a)),
                        stroke: None,
                        glow: if glow { 6.0 } else { 0.0 },
                    });
                }
            }
        }
    }
}

// lat, lng, color; finance hubs
const HOTSPOTS: [(f64, f64, &str); 7] = [
    (40.7128, -74.006, "#00D4FF"), // New York
    (51.5074, -0.1278, "#FF6B35"), // London
    (1.3521, 103.8198, "#00FFA3"), // Singapore
    (25.2048, 55.2708, "#F7931A"), // Dubai
    (35.6762, 139.6503, "#E84142"), // Tokyo
    (22.3193, 114.1694, "#627EEA"), // Hong Kong
    (47.3769, 8.5417, "#F3BA2F"), // Zurich
];

// startX, startY, angle (deg), length, delay, duration; view-box units
const METEORS: [(f32, f32, f32, f32, f32, f32); 12] = [
    (80.0, 6.0, 28.0, 75.0, 0.0, 1.0),
    (200.0, 3.0, 22.0, 95.0, 2.8, 1.3),
    (350.0, 10.0, 33.0, 60.0, 5.2, 0.8),
    (460.0, 2.0, 18.0, 110.0, 7.8, 1.5),
    (580.0, 14.0, 26.0, 70.0, 10.5, 0.9),
    (700.0, 4.0, 35.0, 65.0, 13.0, 1.1),
    (150.0, 8.0, 30.0, 85.0, 15.5, 1.2),
    (310.0, 5.0, 24.0, 100.0, 18.0, 1.4),
    (520.0, 11.0, 38.0, 55.0, 20.5, 0.7),
    (670.0, 7.0, 20.0, 90.0, 23.0, 1.3),
    (420.0, 1.0, 29.0, 78.0, 26.0, 1.0),
    (760.0, 9.0, 32.0, 60.0, 28.5, 0.85),
];
const METEOR_CYCLE_SECS: f32 = 30.0;
const METEOR_TIMES: [f32; 5] = [0.0, 0.1, 0.6, 0.9, 1.0];

const RADAR_CENTER: (f64, f64) = (25.0, -35.0); // mid-Atlantic
const RADAR_RADIUS: f32 = 60.0;
const RADAR_SWEEP_SECS: f32 = 6.0;
const RADAR_BLIPS: [(f32, f32); 6] = [
    (20.0, -15.0),
    (-25.0, 10.0),
    (10.0, 30.0),
    (-15.0, -25.0),
    (35.0, 5.0),
    (-8.0, 40.0),
];

fn hex(c: &str) -> Rgba {
    Rgba::from_hex(c).unwrap_or(Rgba::WHITE)
}

/// All decorative entities in priority order; tiers keep a prefix.
#[derive(Clone, Debug, Default)]
pub struct OverlaySet {
    entities: Vec<ParticleCycle>,
}

impl OverlaySet {
    pub fn build(projector: &Projector, curves: &[QuadCurve]) -> Self {
        let mut entities = Vec::new();
        push_hotspots(projector, &mut entities);
        push_radar(projector, &mut entities);
        push_satellites(curves, &mut entities);
        push_meteors(projector.size(), &mut entities);
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Indices of entities allowed under the given limits, in priority order.
    pub fn active_indices(&self, max_entities: usize, heavy_enabled: bool) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| heavy_enabled || !e.heavy)
            .map(|(i, _)| i)
            .take(max_entities)
            .collect()
    }

    pub fn emit(
        &self,
        elapsed: f32,
        max_entities: usize,
        heavy_enabled: bool,
        out: &mut Vec<DrawItem>,
    ) {
        for i in self.active_indices(max_entities, heavy_enabled) {
            self.entities[i].emit(elapsed, heavy_enabled, out);
        }
    }
}

fn push_hotspots(projector: &Projector, out: &mut Vec<ParticleCycle>) {
    // Core dots first so the reduced tier keeps every city visible.
    for (i, &(lat, lng, color)) in HOTSPOTS.iter().enumerate() {
        out.push(ParticleCycle::new(
            TimedCycle::looping(2.0, i as f32 * 0.2),
            ParticleShape::Dot {
                center: projector.project(lat, lng),
                radius: Keyframes::even(&[3.0]),
                opacity: Keyframes::even(&[0.6, 1.0, 0.6]),
                color: hex(color),
            },
        ));
    }
    for (i, &(lat, lng, color)) in HOTSPOTS.iter().enumerate() {
        let center = projector.project(lat, lng);
        let begin = i as f32 * 0.4;
        out.push(ParticleCycle::new(
            TimedCycle::looping(3.0, begin),
            ParticleShape::Ring {
                center,
                radius: Keyframes::even(&[3.0, 12.0, 3.0]),
                opacity: Keyframes::even(&[0.5, 0.0, 0.5]),
                color: hex(color),
                width: 0.6,
            },
        ));
        out.push(ParticleCycle::new(
            TimedCycle::looping(4.0, begin + 1.0),
            ParticleShape::Ring {
                center,
                radius: Keyframes::even(&[3.0, 16.0, 3.0]),
                opacity: Keyframes::even(&[0.3, 0.0, 0.3]),
                color: hex(color),
                width: 0.4,
            },
        ));
    }
}

fn push_radar(projector: &Projector, out: &mut Vec<ParticleCycle>) {
    let center = projector.project(RADAR_CENTER.0, RADAR_CENTER.1);
    let cyan = Rgba::rgb(0.0, 0.83, 1.0);
    out.push(ParticleCycle::new(
        TimedCycle::looping(4.0, 0.0),
        ParticleShape::Ring {
            center,
            radius: Keyframes::even(&[RADAR_RADIUS]),
            opacity: Keyframes::even(&[0.15, 0.35, 0.15]),
            color: cyan,
            width: 1.5,
        },
    ));
    for frac in [0.66, 0.33] {
        out.push(ParticleCycle::new(
            TimedCycle::looping(1.0, 0.0),
            ParticleShape::Ring {
                center,
                radius: Keyframes::even(&[RADAR_RADIUS * frac]),
                opacity: Keyframes::even(&[0.15]),
                color: cyan,
                width: 0.5,
            },
        ));
    }
    out.push(
        ParticleCycle::new(
            TimedCycle::looping(RADAR_SWEEP_SECS, 0.0),
            ParticleShape::Sweep {
                center,
                radius: RADAR_RADIUS,
                arc: std::f32::consts::FRAC_PI_4,
                color: cyan,
            },
        )
        .heavy(),
    );
    for (bi, (dx, dy)) in RADAR_BLIPS.iter().enumerate() {
        out.push(ParticleCycle::new(
            TimedCycle::looping(RADAR_SWEEP_SECS, bi as f32),
            ParticleShape::Dot {
                center: center + Vec2::new(*dx, *dy),
                radius: Keyframes::even(&[1.0, 2.5, 2.5, 1.0]),
                opacity: Keyframes::even(&[0.0, 1.0, 1.0, 0.0]),
                color: cyan,
            },
        ));
    }
}

fn push_satellites(curves: &[QuadCurve], out: &mut Vec<ParticleCycle>) {
    let start_color = Rgba::WHITE.with_alpha(0.7);
    let end_color = Rgba::WHITE.with_alpha(0.6);
    for c in curves {
        for s in 0..3 {
            let s = s as f32;
            out.push(ParticleCycle::new(
                TimedCycle::looping(4.0 + s * 1.5, 0.0),
                ParticleShape::Orbit {
                    center: c.p0,
                    radius: 12.0 + s * 3.0,
                    start_angle: (s * 120.0).to_radians(),
                    color: start_color,
                },
            ));
        }
        for s in 0..2 {
            let s = s as f32;
            out.push(ParticleCycle::new(
                TimedCycle::looping(3.5 + s * 2.0, 0.0),
                ParticleShape::Orbit {
                    center: c.p1,
                    radius: 10.0 + s * 4.0,
                    start_angle: (s * 180.0).to_radians(),
                    color: end_color,
                },
            ));
        }
    }
}

fn push_meteors(size: SurfaceSize, out: &mut Vec<ParticleCycle>) {
    let view = Projector::view_box_size(SURFACE_HEIGHT);
    let scale = Vec2::new(size.width / view.width, size.height / view.height);
    for &(x, y, angle, length, delay, dur) in METEORS.iter() {
        let from = Vec2::new(x, y);
        let to = from + Vec2::from_angle(angle.to_radians()) * length;
        out.push(
            ParticleCycle::new(
                TimedCycle::new(delay, dur, METEOR_CYCLE_SECS - dur),
                ParticleShape::Streak {
                    from: from * scale,
                    to: to * scale,
                    tail: length * 0.7 * scale.x,
                    head: Keyframes::timed(&METEOR_TIMES, &[2.0, 1.8, 1.2, 0.4, 0.0]),
                    opacity: Keyframes::timed(&METEOR_TIMES, &[0.0, 1.0, 1.0, 0.6, 0.0]),
                },
            )
            .heavy(),
        );
    }
}
