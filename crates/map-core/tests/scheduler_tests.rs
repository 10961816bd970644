use instant::Instant;
use map_core::{FrameScheduler, FrameTime, GateState, Stage, TaskStatus, VisibilityGate};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn frame() -> FrameTime {
    FrameTime {
        index: 0,
        dt_secs: 0.016,
        elapsed_secs: 0.016,
    }
}

#[test]
fn stages_run_in_order_regardless_of_subscription_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut s = FrameScheduler::new(0.1);
    for (stage, name) in [
        (Stage::Composite, "composite"),
        (Stage::Geometry, "geometry-a"),
        (Stage::Animate, "animate"),
        (Stage::Geometry, "geometry-b"),
    ] {
        let log = log.clone();
        s.subscribe(stage, move |_| {
            log.borrow_mut().push(name);
            TaskStatus::Continue
        });
    }
    s.run(&frame());
    assert_eq!(
        *log.borrow(),
        vec!["geometry-a", "geometry-b", "animate", "composite"]
    );
}

#[test]
fn done_tasks_are_removed() {
    let count = Rc::new(RefCell::new(0));
    let mut s = FrameScheduler::new(0.1);
    let c = count.clone();
    s.subscribe(Stage::Animate, move |_| {
        *c.borrow_mut() += 1;
        if *c.borrow() >= 2 {
            TaskStatus::Done
        } else {
            TaskStatus::Continue
        }
    });
    for _ in 0..5 {
        s.run(&frame());
    }
    assert_eq!(*count.borrow(), 2);
    assert!(s.is_empty());
}

#[test]
fn unsubscribe_and_clear() {
    let mut s = FrameScheduler::new(0.1);
    let a = s.subscribe(Stage::Geometry, |_| TaskStatus::Continue);
    let _b = s.subscribe(Stage::Animate, |_| TaskStatus::Continue);
    assert_eq!(s.len(), 2);
    assert!(s.unsubscribe(a));
    assert!(!s.unsubscribe(a));
    assert_eq!(s.len(), 1);
    s.clear();
    assert!(s.is_empty());
}

#[test]
fn clock_clamps_long_gaps() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut s = FrameScheduler::new(0.1);
    let sink = seen.clone();
    s.subscribe(Stage::Animate, move |f| {
        sink.borrow_mut().push(f.dt_secs);
        TaskStatus::Continue
    });
    let t0 = Instant::now();
    s.tick(t0);
    s.tick(t0 + Duration::from_millis(50));
    s.tick(t0 + Duration::from_secs(5));
    let seen = seen.borrow();
    assert_eq!(seen[0], 0.0);
    assert!((seen[1] - 0.05).abs() < 1e-4);
    assert!((seen[2] - 0.1).abs() < 1e-4);
}

#[test]
fn pause_resets_delta() {
    let mut s = FrameScheduler::new(0.1);
    let t0 = Instant::now();
    s.tick(t0);
    s.pause();
    let f = s.tick(t0 + Duration::from_millis(40));
    assert_eq!(f.dt_secs, 0.0);
    assert_eq!(f.index, 1);
}

#[test]
fn visibility_gate_starts_on_intersection() {
    let mut g = VisibilityGate::new(1500);
    assert_eq!(g.state(), GateState::Pending);
    assert!(!g.observe(false));
    assert!(!g.should_run());
    assert!(g.observe(true));
    assert!(g.should_run());
    assert!(g.observe(false));
    assert_eq!(g.state(), GateState::Hidden);
}

#[test]
fn visibility_gate_falls_back_without_signal() {
    let mut g = VisibilityGate::new(1500);
    assert!(!g.wait(1000.0));
    assert!(g.wait(600.0));
    assert!(g.should_run());
    assert!(!g.wait(10_000.0));
}

#[test]
fn visibility_signal_disables_fallback() {
    let mut g = VisibilityGate::new(1500);
    g.observe(false);
    assert!(!g.wait(5000.0));
    assert_eq!(g.state(), GateState::Pending);
}
