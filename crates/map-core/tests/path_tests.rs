use glam::Vec2;
use map_core::{curve, Projector};

#[test]
fn endpoints_are_exact() {
    let p = Projector::default();
    let a = p.project(40.7128, -74.006);
    let b = p.project(51.5074, -0.1278);
    let c = curve(a, b, 50.0);
    assert_eq!(c.point_at(0.0), a);
    assert_eq!(c.point_at(1.0), b);
    // Parameters outside [0, 1] clamp onto the ends
    assert_eq!(c.point_at(-0.5), a);
    assert_eq!(c.point_at(3.0), b);
}

#[test]
fn control_point_lifts_above_higher_endpoint() {
    let a = Vec2::new(100.0, 200.0);
    let b = Vec2::new(300.0, 120.0);
    let c = curve(a, b, 50.0);
    assert_eq!(c.control, Vec2::new(200.0, 70.0));
    // Order of endpoints does not move the apex
    assert_eq!(curve(b, a, 50.0).control, c.control);
}

#[test]
fn curve_stays_below_control_point() {
    let c = curve(Vec2::new(10.0, 300.0), Vec2::new(700.0, 250.0), 50.0);
    for i in 0..=100 {
        let q = c.point_at(i as f32 / 100.0);
        assert!(q.y >= c.control.y);
        assert!(q.x >= 10.0 - 1e-3 && q.x <= 700.0 + 1e-3);
    }
}

#[test]
fn coincident_endpoints_stay_pinned() {
    let p = Vec2::new(50.0, 50.0);
    let c = curve(p, p, 50.0);
    assert_eq!(c.point_at(0.0), p);
    assert_eq!(c.point_at(1.0), p);
    assert!(c.point_at(0.5).y < p.y);
}

#[test]
fn prefix_follows_the_curve() {
    let c = curve(Vec2::new(0.0, 200.0), Vec2::new(400.0, 220.0), 50.0);
    assert_eq!(c.prefix(1.0), c);
    for t in [0.25_f32, 0.5, 0.8] {
        let sub = c.prefix(t);
        assert_eq!(sub.p0, c.p0);
        assert!((sub.p1 - c.point_at(t)).length() < 1e-4);
        // The prefix midpoint sits at t/2 on the full curve
        assert!((sub.point_at(0.5) - c.point_at(t * 0.5)).length() < 1e-3);
    }
}

#[test]
fn svg_path_uses_quadratic_command() {
    let c = curve(Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0), 50.0);
    assert_eq!(c.to_svg_path(), "M 0 100 Q 100 50 200 100");
}
