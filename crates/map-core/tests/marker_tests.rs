use glam::Vec2;
use map_core::config::MarkerTimings;
use map_core::{curve, FidelityTier, MarkerAnimator, MarkerPhase, QuadCurve};

fn curves(n: usize) -> Vec<QuadCurve> {
    (0..n)
        .map(|i| {
            let y = 200.0 + i as f32 * 10.0;
            curve(Vec2::new(100.0, y), Vec2::new(500.0, y), 50.0)
        })
        .collect()
}

#[test]
fn markers_start_dormant_with_staggered_delays() {
    let mut a = MarkerAnimator::new(3, MarkerTimings::default(), &FidelityTier::FULL);
    assert!(a.markers().iter().all(|m| m.phase == MarkerPhase::Dormant));
    a.advance(1.0);
    assert_eq!(a.active_count(), 0);
    // First delay 1.5 s, second 2.0 s
    a.advance(0.6);
    assert_eq!(a.markers()[0].phase, MarkerPhase::Appearing);
    assert_eq!(a.markers()[1].phase, MarkerPhase::Dormant);
    assert_eq!(a.samples(&curves(3)).len(), 1);
}

#[test]
fn marker_runs_a_full_cycle() {
    let c = curves(1);
    let mut a = MarkerAnimator::new(1, MarkerTimings::default(), &FidelityTier::FULL);

    a.advance(1.6);
    assert_eq!(a.markers()[0].phase, MarkerPhase::Appearing);
    let s = &a.samples(&c)[0];
    assert_eq!(s.position, c[0].p0);
    assert!(s.opacity > 0.0 && s.opacity < 1.0);

    a.advance(2.1);
    let m = &a.markers()[0];
    assert_eq!(m.phase, MarkerPhase::Traveling);
    assert!((m.progress - 0.5).abs() < 1e-3);
    let s = &a.samples(&c)[0];
    assert!((s.position - c[0].point_at(m.progress)).length() < 1e-4);
    assert_eq!(s.scale, 1.0);

    a.advance(2.1);
    assert_eq!(a.markers()[0].phase, MarkerPhase::Bursting);
    let s = &a.samples(&c)[0];
    assert_eq!(s.scale, 0.0);
    let burst = s.burst.as_ref().expect("burst sample while bursting");
    assert_eq!(burst.center, c[0].p1);
    assert_eq!(burst.particles.len(), 6);

    a.advance(0.6);
    assert_eq!(a.markers()[0].phase, MarkerPhase::Dormant);
    assert!(a.samples(&c).is_empty());

    // Repeat delay before the next run
    a.advance(7.5);
    assert_eq!(a.markers()[0].phase, MarkerPhase::Dormant);
    a.advance(1.0);
    assert_ne!(a.markers()[0].phase, MarkerPhase::Dormant);
}

#[test]
fn progress_is_monotonic_while_traveling() {
    let mut a = MarkerAnimator::new(1, MarkerTimings::default(), &FidelityTier::FULL);
    a.advance(1.75);
    let mut last = -1.0;
    for _ in 0..30 {
        a.advance(0.1);
        let m = &a.markers()[0];
        if m.phase != MarkerPhase::Traveling {
            break;
        }
        assert!(m.progress > last);
        assert!((0.0..=1.0).contains(&m.progress));
        last = m.progress;
    }
    assert!(last > 0.5);
}

#[test]
fn large_delta_matches_many_small_ones() {
    let mut one = MarkerAnimator::new(2, MarkerTimings::default(), &FidelityTier::FULL);
    let mut many = MarkerAnimator::new(2, MarkerTimings::default(), &FidelityTier::FULL);
    one.advance(3.7);
    for _ in 0..37 {
        many.advance(0.1);
    }
    for (a, b) in one.markers().iter().zip(many.markers()) {
        assert_eq!(a.phase, b.phase);
        assert!((a.progress - b.progress).abs() < 1e-3);
    }
}

#[test]
fn reduced_tier_caps_active_markers() {
    let timings = MarkerTimings {
        stagger_secs: 0.0,
        ..MarkerTimings::default()
    };
    let mut a = MarkerAnimator::new(6, timings, &FidelityTier::REDUCED);
    let mut late_ran = false;
    for _ in 0..400 {
        a.advance(0.05);
        assert!(a.active_count() <= FidelityTier::REDUCED.max_markers);
        late_ran |= a.markers()[3..].iter().any(|m| m.is_active());
    }
    // Held markers get their turn once a slot frees
    assert!(late_ran);
}

#[test]
fn reduced_tier_skips_bursts() {
    let mut a = MarkerAnimator::new(1, MarkerTimings::default(), &FidelityTier::REDUCED);
    for _ in 0..300 {
        a.advance(0.05);
        assert_ne!(a.markers()[0].phase, MarkerPhase::Bursting);
    }
}

#[test]
fn samples_skip_missing_curves() {
    let mut a = MarkerAnimator::new(2, MarkerTimings::default(), &FidelityTier::FULL);
    a.advance(2.1);
    assert_eq!(a.active_count(), 2);
    assert_eq!(a.samples(&curves(1)).len(), 1);
}

#[test]
fn non_positive_delta_is_ignored() {
    let mut a = MarkerAnimator::new(1, MarkerTimings::default(), &FidelityTier::FULL);
    a.advance(1.6);
    let before = a.markers()[0].clone();
    a.advance(0.0);
    a.advance(-1.0);
    a.advance(f32::NAN);
    assert_eq!(a.markers()[0], before);
}
