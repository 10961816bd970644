use map_core::drag::steps_to_rest;
use map_core::{DragController, DragPhase, InertiaParams, PointerSample};

fn ctl() -> DragController {
    DragController::new(InertiaParams::default())
}

#[test]
fn drag_moves_offset_opposite_to_pointer() {
    let mut d = ctl();
    let token = d.pointer_down(PointerSample::new(1, 500.0, 0.0)).unwrap();
    assert!(matches!(d.phase(), DragPhase::Dragging(_)));
    assert!(d.pointer_move(&token, PointerSample::new(1, 470.0, 16.0)));
    assert_eq!(d.offset(), 30.0);
    assert!(d.pointer_move(&token, PointerSample::new(1, 520.0, 32.0)));
    assert_eq!(d.offset(), -20.0);
}

#[test]
fn second_drag_continues_from_current_offset() {
    let mut d = ctl();
    let t = d.pointer_down(PointerSample::new(1, 100.0, 0.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 60.0, 10_000.0));
    d.pointer_up(&t, PointerSample::new(1, 60.0, 10_000.0));
    assert!(d.is_idle());
    assert_eq!(d.offset(), 40.0);

    let t = d.pointer_down(PointerSample::new(1, 300.0, 11_000.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 290.0, 12_000.0));
    assert_eq!(d.offset(), 50.0);
}

#[test]
fn other_pointers_are_ignored_while_captured() {
    let mut d = ctl();
    let t = d.pointer_down(PointerSample::new(1, 100.0, 0.0)).unwrap();
    assert!(d.pointer_down(PointerSample::new(2, 10.0, 5.0)).is_none());
    assert!(!d.pointer_move(&t, PointerSample::new(2, 10.0, 6.0)));
    assert_eq!(d.offset(), 0.0);
    assert_eq!(d.owner(), Some(t));
}

#[test]
fn stale_token_is_rejected() {
    let mut d = ctl();
    let old = d.pointer_down(PointerSample::new(1, 100.0, 0.0)).unwrap();
    d.pointer_up(&old, PointerSample::new(1, 100.0, 10.0));
    let _new = d.pointer_down(PointerSample::new(1, 100.0, 20.0)).unwrap();
    assert!(!d.pointer_move(&old, PointerSample::new(1, 0.0, 30.0)));
    assert!(!d.pointer_up(&old, PointerSample::new(1, 0.0, 30.0)));
    assert_eq!(d.offset(), 0.0);
}

fn flick(d: &mut DragController) {
    let t = d.pointer_down(PointerSample::new(1, 500.0, 0.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 450.0, 50.0));
    d.pointer_move(&t, PointerSample::new(1, 400.0, 100.0));
    d.pointer_up(&t, PointerSample::new(1, 400.0, 100.0));
}

#[test]
fn fast_release_decays_to_rest_monotonically() {
    let mut d = ctl();
    flick(&mut d);
    let v0 = d.velocity();
    assert!(d.is_decaying());
    assert!((v0 - 1.0).abs() < 1e-6);

    let bound = steps_to_rest(v0, &InertiaParams::default());
    let mut last = d.offset();
    let mut steps = 0;
    while d.decay_step() {
        steps += 1;
        assert!(d.offset() > last, "offset must keep moving in sign(v0)");
        last = d.offset();
        assert!(steps <= bound);
    }
    assert!(d.is_idle());
    assert!(d.offset() >= last);
    assert_eq!(d.velocity(), 0.0);
}

#[test]
fn leftward_flick_decays_leftward() {
    let mut d = ctl();
    let t = d.pointer_down(PointerSample::new(1, 100.0, 0.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 180.0, 40.0));
    d.pointer_up(&t, PointerSample::new(1, 180.0, 40.0));
    assert!(d.velocity() < 0.0);
    let mut last = d.offset();
    while d.decay_step() {
        assert!(d.offset() < last);
        last = d.offset();
    }
}

#[test]
fn slow_release_goes_idle() {
    let mut d = ctl();
    let t = d.pointer_down(PointerSample::new(1, 100.0, 0.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 99.0, 1000.0));
    assert!(d.pointer_up(&t, PointerSample::new(1, 99.0, 1000.0)));
    assert!(d.is_idle());
    assert_eq!(d.owner(), None);
}

#[test]
fn holding_still_before_release_drops_momentum() {
    let mut d = ctl();
    let t = d.pointer_down(PointerSample::new(1, 500.0, 0.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 400.0, 100.0));
    assert!(d.velocity() > 0.5);

    // Two seconds held in place, then released where it stopped
    assert!(d.pointer_up(&t, PointerSample::new(1, 400.0, 2100.0)));
    assert!(d.is_idle());
    assert_eq!(d.velocity(), 0.0);
    assert_eq!(d.advance(160.0), 0);
    assert_eq!(d.offset(), 100.0);
}

#[test]
fn release_within_window_keeps_momentum() {
    let mut d = ctl();
    let window = InertiaParams::default().release_window_ms as f64;
    let t = d.pointer_down(PointerSample::new(1, 500.0, 0.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 400.0, 100.0));
    d.pointer_up(&t, PointerSample::new(1, 400.0, 100.0 + window * 0.5));
    assert!(d.is_decaying());
}

#[test]
fn final_up_position_counts_as_a_move() {
    let mut d = ctl();
    let t = d.pointer_down(PointerSample::new(1, 100.0, 0.0)).unwrap();
    d.pointer_up(&t, PointerSample::new(1, 80.0, 2000.0));
    assert_eq!(d.offset(), 20.0);
}

#[test]
fn cancel_behaves_like_release() {
    let mut d = ctl();
    let t = d.pointer_down(PointerSample::new(1, 500.0, 0.0)).unwrap();
    d.pointer_move(&t, PointerSample::new(1, 400.0, 100.0));
    assert!(d.pointer_cancel(&t));
    assert!(d.is_decaying());
    assert_eq!(d.owner(), None);
}

#[test]
fn pointer_down_during_decay_halts_momentum() {
    let mut d = ctl();
    flick(&mut d);
    d.advance(100.0);
    let held = d.offset();
    let t = d.pointer_down(PointerSample::new(1, 200.0, 500.0)).unwrap();
    assert!(!d.is_decaying());
    assert!(!d.decay_step());
    assert_eq!(d.advance(200.0), 0);
    assert_eq!(d.offset(), held);

    // Residual velocity is discarded: releasing in place does not resume
    d.pointer_up(&t, PointerSample::new(1, 200.0, 900.0));
    assert!(d.is_idle());
    assert_eq!(d.offset(), held);
}

#[test]
fn advance_uses_fixed_timestep() {
    let mut d = ctl();
    flick(&mut d);
    assert_eq!(d.advance(8.0), 0);
    assert_eq!(d.advance(8.0), 1);
    assert_eq!(d.advance(33.0), 2);
}

#[test]
fn advance_caps_catch_up_steps() {
    let mut d = ctl();
    flick(&mut d);
    let max = InertiaParams::default().max_steps_per_frame;
    assert_eq!(d.advance(10_000.0), max);
    // Backlog was dropped
    assert!(d.advance(16.0) <= 2);
}

#[test]
fn idle_controller_ignores_time() {
    let mut d = ctl();
    assert_eq!(d.advance(100.0), 0);
    assert_eq!(d.offset(), 0.0);
    assert!(!d.has_dragged());
}

#[test]
fn steps_to_rest_bounds() {
    let p = InertiaParams::default();
    assert_eq!(steps_to_rest(0.01, &p), 0);
    let n = steps_to_rest(1.0, &p);
    assert!(n > 100 && n < 200, "{n}");
    assert_eq!(steps_to_rest(-1.0, &p), n);
}
