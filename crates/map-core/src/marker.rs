//! Traveling markers ("coins") that ride each connection arc.
//!
//! Every marker cycles `Dormant -> Appearing -> Traveling -> Bursting -> Dormant`
//! on a fixed cadence. Time only moves through [`MarkerAnimator::advance`],
//! which takes a wall-clock delta, so dropped frames stretch nothing and a
//! paused loop simply resumes where it stopped.

use crate::config::MarkerTimings;
use crate::constants::{
    BURST_DISTANCE, BURST_FLASH_MAX_SCALE, BURST_OVERSHOOT, BURST_PARTICLES,
};
use crate::fidelity::FidelityTier;
use crate::path::QuadCurve;
use crate::timeline::Keyframes;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerPhase {
    Dormant,
    Appearing,
    Traveling,
    Bursting,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub symbol: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

const fn coin(symbol: &'static str, label: &'static str, color: &'static str) -> MarkerStyle {
    MarkerStyle {
        symbol,
        label,
        color,
    }
}

pub const COIN_STYLES: [MarkerStyle; 8] = [
    coin("₿", "BTC", "#F7931A"),
    coin("Ξ", "ETH", "#627EEA"),
    coin("◎", "SOL", "#00FFA3"),
    coin("✕", "XRP", "#00AAE4"),
    coin("◆", "BNB", "#F3BA2F"),
    coin("Ð", "DOGE", "#C2A633"),
    coin("●", "ADA", "#0033AD"),
    coin("◈", "AVAX", "#E84142"),
];

pub fn style_for(connection_index: usize) -> MarkerStyle {
    COIN_STYLES[connection_index % COIN_STYLES.len()]
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerState {
    pub connection_index: usize,
    pub progress: f32,
    pub phase: MarkerPhase,
    phase_elapsed: f32,
    wait: f32,
}

impl MarkerState {
    fn new(connection_index: usize, first_wait: f32) -> Self {
        Self {
            connection_index,
            progress: 0.0,
            phase: MarkerPhase::Dormant,
            phase_elapsed: 0.0,
            wait: first_wait,
        }
    }

    fn enter(&mut self, phase: MarkerPhase) {
        self.phase = phase;
        self.phase_elapsed = 0.0;
        if phase != MarkerPhase::Traveling {
            self.progress = if phase == MarkerPhase::Bursting { 1.0 } else { 0.0 };
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != MarkerPhase::Dormant
    }
}

/// Scheduling limits derived from the fidelity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerPolicy {
    pub max_active: usize,
    pub bursts: bool,
}

impl From<&FidelityTier> for MarkerPolicy {
    fn from(tier: &FidelityTier) -> Self {
        Self {
            max_active: tier.max_markers,
            bursts: tier.heavy_effects_enabled,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BurstSample {
    pub center: Vec2,
    pub particles: SmallVec<[Vec2; BURST_PARTICLES]>,
    pub particle_opacity: f32,
    pub particle_scale: f32,
    pub flash_scale: f32,
    pub flash_opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSample {
    pub connection_index: usize,
    pub phase: MarkerPhase,
    pub position: Vec2,
    pub opacity: f32,
    pub scale: f32,
    pub style: MarkerStyle,
    pub burst: Option<BurstSample>,
}

struct Curves {
    scale: Keyframes,
    burst_distance: Keyframes,
    burst_opacity: Keyframes,
    burst_scale: Keyframes,
    flash_scale: Keyframes,
    flash_opacity: Keyframes,
}

impl Curves {
    fn new() -> Self {
        Self {
            scale: Keyframes::timed(&[0.0, 0.85, 0.92, 0.97, 1.0], &[1.0, 1.0, 1.0, 1.8, 0.0]),
            burst_distance: Keyframes::even(&[
                0.0,
                BURST_DISTANCE,
                BURST_DISTANCE * BURST_OVERSHOOT,
            ]),
            burst_opacity: Keyframes::timed(&[0.0, 0.3, 1.0], &[0.0, 0.9, 0.0]),
            burst_scale: Keyframes::timed(&[0.0, 0.3, 1.0], &[0.0, 1.0, 0.0]),
            flash_scale: Keyframes::timed(&[0.0, 0.3, 1.0], &[0.0, BURST_FLASH_MAX_SCALE, 0.0]),
            flash_opacity: Keyframes::timed(&[0.0, 0.3, 1.0], &[0.0, 0.8, 0.0]),
        }
    }
}

pub struct MarkerAnimator {
    timings: MarkerTimings,
    policy: MarkerPolicy,
    markers: Vec<MarkerState>,
    curves: Curves,
}

// Upper bound on phase changes a single marker may take in one frame.
const MAX_TRANSITIONS_PER_ADVANCE: usize = 8;

impl MarkerAnimator {
    pub fn new(count: usize, timings: MarkerTimings, tier: &FidelityTier) -> Self {
        let markers = (0..count)
            .map(|i| MarkerState::new(i, timings.start_delay(i)))
            .collect();
        Self {
            timings,
            policy: MarkerPolicy::from(tier),
            markers,
            curves: Curves::new(),
        }
    }

    pub fn markers(&self) -> &[MarkerState] {
        &self.markers
    }

    pub fn policy(&self) -> MarkerPolicy {
        self.policy
    }

    pub fn active_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_active()).count()
    }

    /// Applies a new tier. In-flight markers finish their current phase; the
    /// new limits apply from the next transition.
    pub fn set_tier(&mut self, tier: &FidelityTier) {
        self.policy = MarkerPolicy::from(tier);
    }

    pub fn advance(&mut self, dt_secs: f32) {
        if dt_secs.is_nan() || dt_secs <= 0.0 {
            return;
        }
        let mut active = self.active_count();
        for m in &mut self.markers {
            step_marker(m, dt_secs, &self.timings, self.policy, &mut active);
        }
    }

    /// Render-ready samples for every non-dormant marker whose curve exists.
    pub fn samples(&self, curves: &[QuadCurve]) -> Vec<MarkerSample> {
        let mut out = Vec::with_capacity(self.policy.max_active.min(self.markers.len()));
        for m in &self.markers {
            let Some(curve) = curves.get(m.connection_index) else {
                continue;
            };
            let style = style_for(m.connection_index);
            let sample = match m.phase {
                MarkerPhase::Dormant => continue,
                MarkerPhase::Appearing => MarkerSample {
                    connection_index: m.connection_index,
                    phase: m.phase,
                    position: curve.p0,
                    opacity: (m.phase_elapsed / self.timings.appear_secs).clamp(0.0, 1.0),
                    scale: 1.0,
                    style,
                    burst: None,
                },
                MarkerPhase::Traveling => MarkerSample {
                    connection_index: m.connection_index,
                    phase: m.phase,
                    position: curve.point_at(m.progress),
                    opacity: 1.0,
                    scale: self.curves.scale.sample(m.progress),
                    style,
                    burst: None,
                },
                MarkerPhase::Bursting => {
                    let u = (m.phase_elapsed / self.timings.burst_secs).clamp(0.0, 1.0);
                    MarkerSample {
                        connection_index: m.connection_index,
                        phase: m.phase,
                        position: curve.p1,
                        opacity: 0.0,
                        scale: 0.0,
                        style,
                        burst: Some(self.burst_at(curve.p1, u)),
                    }
                }
            };
            out.push(sample);
        }
        out
    }

    fn burst_at(&self, center: Vec2, u: f32) -> BurstSample {
        let dist = self.curves.burst_distance.sample(u);
        let step = std::f32::consts::TAU / BURST_PARTICLES as f32;
        let particles = (0..BURST_PARTICLES)
            .map(|i| center + Vec2::from_angle(step * i as f32) * dist)
            .collect();
        BurstSample {
            center,
            particles,
            particle_opacity: self.curves.burst_opacity.sample(u),
            particle_scale: self.curves.burst_scale.sample(u),
            flash_scale: self.curves.flash_scale.sample(u),
            flash_opacity: self.curves.flash_opacity.sample(u),
        }
    }
}

fn phase_duration(m: &MarkerState, t: &MarkerTimings) -> f32 {
    match m.phase {
        MarkerPhase::Dormant => m.wait,
        MarkerPhase::Appearing => t.appear_secs,
        MarkerPhase::Traveling => t.travel_secs,
        MarkerPhase::Bursting => t.burst_secs,
    }
}

fn step_marker(
    m: &mut MarkerState,
    mut dt: f32,
    t: &MarkerTimings,
    policy: MarkerPolicy,
    active: &mut usize,
) {
    for _ in 0..MAX_TRANSITIONS_PER_ADVANCE {
        if dt <= 0.0 {
            return;
        }
        let left = phase_duration(m, t) - m.phase_elapsed;
        if dt < left {
            m.phase_elapsed += dt;
            if m.phase == MarkerPhase::Traveling {
                m.progress = (m.phase_elapsed / t.travel_secs).clamp(0.0, 1.0);
            }
            return;
        }
        dt -= left.max(0.0);
        match m.phase {
            MarkerPhase::Dormant => {
                if *active >= policy.max_active {
                    // Hold at the end of the wait until a slot frees up.
                    m.phase_elapsed = m.wait;
                    log::debug!(
                        "[markers] marker {} held at cap {}",
                        m.connection_index,
                        policy.max_active
                    );
                    return;
                }
                *active += 1;
                m.enter(MarkerPhase::Appearing);
            }
            MarkerPhase::Appearing => {
                m.enter(MarkerPhase::Traveling);
                m.progress = 0.0;
            }
            MarkerPhase::Traveling => {
                m.progress = 1.0;
                if policy.bursts {
                    m.enter(MarkerPhase::Bursting);
                } else {
                    // Burst time folds into the wait so the cadence is unchanged.
                    *active = active.saturating_sub(1);
                    m.enter(MarkerPhase::Dormant);
                    m.wait = t.repeat_delay_secs + t.burst_secs;
                }
            }
            MarkerPhase::Bursting => {
                *active = active.saturating_sub(1);
                m.enter(MarkerPhase::Dormant);
                m.wait = t.repeat_delay_secs;
            }
        }
    }
}
