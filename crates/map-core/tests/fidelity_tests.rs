use map_core::{
    default_connections, curve, select_tier, DeviceSignals, FidelitySelector, FidelityTier,
    OverlaySet, Projector, TierName,
};

#[test]
fn narrow_viewports_get_reduced_tier() {
    assert_eq!(select_tier(320.0, false), FidelityTier::REDUCED);
    assert_eq!(select_tier(1023.0, false), FidelityTier::REDUCED);
    assert_eq!(select_tier(f32::NAN, false), FidelityTier::REDUCED);
}

#[test]
fn wide_viewports_get_full_tier() {
    assert_eq!(select_tier(1920.0, false), FidelityTier::FULL);
    assert_eq!(select_tier(1024.0, false), FidelityTier::FULL);
}

#[test]
fn reduced_motion_hint_wins() {
    assert_eq!(select_tier(1920.0, true), FidelityTier::REDUCED);
}

#[test]
fn reduced_counts_are_subset_of_full() {
    let full = FidelityTier::FULL;
    let reduced = FidelityTier::REDUCED;
    assert!(reduced.max_markers <= full.max_markers);
    assert!(reduced.max_overlay_entities <= full.max_overlay_entities);
    assert!(full.heavy_effects_enabled && !reduced.heavy_effects_enabled);
}

#[test]
fn reduced_overlays_are_a_subset_of_full_overlays() {
    let p = Projector::default();
    let curves: Vec<_> = default_connections()
        .iter()
        .map(|c| curve(p.project_point(&c.start), p.project_point(&c.end), 50.0))
        .collect();
    let set = OverlaySet::build(&p, &curves);
    let full = set.active_indices(FidelityTier::FULL.max_overlay_entities, true);
    let reduced = set.active_indices(FidelityTier::REDUCED.max_overlay_entities, false);
    assert_eq!(full.len(), set.len());
    assert_eq!(reduced.len(), FidelityTier::REDUCED.max_overlay_entities);
    assert!(reduced.iter().all(|i| full.contains(i)));
}

#[test]
fn selector_recomputes_on_resize() {
    let mut s = FidelitySelector::new(
        DeviceSignals {
            viewport_width: 1440.0,
            prefers_reduced_motion: false,
            save_data: false,
        },
        1024.0,
    );
    assert_eq!(s.tier().name, TierName::Full);
    assert!(s.on_resize(800.0));
    assert_eq!(s.tier().name, TierName::Reduced);
    assert!(!s.on_resize(700.0));
    assert!(s.on_resize(1300.0));
    assert_eq!(s.signals().viewport_width, 1300.0);
}

#[test]
fn save_data_pins_reduced_tier() {
    let mut s = FidelitySelector::new(
        DeviceSignals {
            viewport_width: 1920.0,
            prefers_reduced_motion: false,
            save_data: true,
        },
        1024.0,
    );
    assert!(s.tier().is_reduced());
    assert!(!s.on_resize(2560.0));
}
