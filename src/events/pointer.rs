use crate::constants::{CURSOR_DRAGGING, CURSOR_IDLE};
use crate::dom::{self, Listener};
use crate::input;
use crate::paint::Painter;
use map_core::{CaptureToken, WorldMap};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub map: Rc<RefCell<WorldMap>>,
    pub painter: Rc<RefCell<Painter>>,
    pub capture: Rc<RefCell<Option<CaptureToken>>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) -> Vec<Listener> {
    dom::set_cursor(&w.canvas, CURSOR_IDLE);
    // Horizontal drags belong to the map; vertical swipes still scroll the page.
    _ = w.canvas.style().set_property("touch-action", "pan-y");
    vec![
        wire_pointerdown(&w),
        wire_pointermove(&w),
        wire_pointerup(&w),
        wire_pointer_cancel(&w, "pointercancel"),
        wire_pointer_cancel(&w, "lostpointercapture"),
    ]
}

/// Forget the captured pointer, if any, and hand it back to the page.
pub fn release_capture(w: &PointerWiring) {
    if let Some(token) = w.capture.borrow_mut().take() {
        _ = w.canvas.release_pointer_capture(token.pointer_id());
        dom::set_cursor(&w.canvas, CURSOR_IDLE);
    }
}

#[inline]
fn pointer_event(ev: web::Event) -> Option<web::PointerEvent> {
    ev.dyn_into::<web::PointerEvent>().ok()
}

fn wire_pointerdown(w: &PointerWiring) -> Listener {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::new(&target, "pointerdown", move |ev| {
        let Some(ev) = pointer_event(ev) else {
            return;
        };
        if !input::is_primary_press(&ev.pointer_type(), ev.button()) {
            return;
        }
        let fit = w.painter.borrow().fit();
        let sample = input::pointer_sample(&ev, &w.canvas, &fit);
        let Some(token) = w.map.borrow_mut().pointer_down(sample) else {
            return;
        };
        *w.capture.borrow_mut() = Some(token);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        dom::set_cursor(&w.canvas, CURSOR_DRAGGING);
        ev.prevent_default();
    })
}

fn wire_pointermove(w: &PointerWiring) -> Listener {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::new(&target, "pointermove", move |ev| {
        let Some(ev) = pointer_event(ev) else {
            return;
        };
        let Some(token) = *w.capture.borrow() else {
            return;
        };
        let fit = w.painter.borrow().fit();
        let sample = input::pointer_sample(&ev, &w.canvas, &fit);
        w.map.borrow_mut().pointer_move(&token, sample);
    })
}

fn wire_pointerup(w: &PointerWiring) -> Listener {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::new(&target, "pointerup", move |ev| {
        let Some(ev) = pointer_event(ev) else {
            return;
        };
        let token = match *w.capture.borrow() {
            Some(t) if t.pointer_id() == ev.pointer_id() => t,
            _ => return,
        };
        w.capture.borrow_mut().take();
        let fit = w.painter.borrow().fit();
        let sample = input::pointer_sample(&ev, &w.canvas, &fit);
        w.map.borrow_mut().pointer_up(&token, sample);
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        dom::set_cursor(&w.canvas, CURSOR_IDLE);
    })
}

fn wire_pointer_cancel(w: &PointerWiring, kind: &'static str) -> Listener {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::new(&target, kind, move |ev| {
        let Some(ev) = pointer_event(ev) else {
            return;
        };
        let token = match *w.capture.borrow() {
            Some(t) if t.pointer_id() == ev.pointer_id() => t,
            _ => return,
        };
        w.capture.borrow_mut().take();
        w.map.borrow_mut().pointer_cancel(&token);
        dom::set_cursor(&w.canvas, CURSOR_IDLE);
    })
}
