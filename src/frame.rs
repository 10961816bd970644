use crate::constants::{VISIBILITY_ROOT_MARGIN, VISIBILITY_THRESHOLD};
use instant::Instant;
use map_core::{FrameScheduler, VisibilityGate};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct LoopState {
    scheduler: Rc<RefCell<FrameScheduler>>,
    gate: RefCell<VisibilityGate>,
    alive: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    observer: RefCell<Option<web::IntersectionObserver>>,
    observer_cb: RefCell<Option<Closure<dyn FnMut(js_sys::Array)>>>,
    fallback_id: Cell<Option<i32>>,
    fallback_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    on_flip: RefCell<Option<Box<dyn FnMut(bool)>>>,
}

impl LoopState {
    fn request(&self) {
        if !self.alive.get() || self.raf_id.get().is_some() {
            return;
        }
        let Some(w) = web::window() else {
            return;
        };
        if let Some(tick) = self.tick.borrow().as_ref() {
            if let Ok(id) = w.request_animation_frame(tick.as_ref().unchecked_ref()) {
                self.raf_id.set(Some(id));
            }
        }
    }

    fn suspend(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.scheduler.borrow_mut().pause();
    }

    fn frame(&self) {
        self.raf_id.set(None);
        if !self.alive.get() || !self.gate.borrow().should_run() {
            return;
        }
        self.scheduler.borrow_mut().tick(Instant::now());
        self.request();
    }

    fn on_visibility(&self, intersecting: bool) {
        let flipped = self.gate.borrow_mut().observe(intersecting);
        if !flipped {
            return;
        }
        let running = self.gate.borrow().should_run();
        if let Some(hook) = self.on_flip.borrow_mut().as_mut() {
            hook(running);
        }
        if running {
            log::info!("[frame] visible; resuming");
            self.request();
        } else {
            log::info!("[frame] hidden; suspending");
            self.suspend();
        }
    }
}

/// Animation-frame loop driving a [`FrameScheduler`], gated on the canvas
/// being on screen. `on_flip` hears every visible/hidden transition.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start(
        canvas: &web::HtmlCanvasElement,
        scheduler: Rc<RefCell<FrameScheduler>>,
        fallback_ms: u32,
        on_flip: impl FnMut(bool) + 'static,
    ) -> Self {
        let state = Rc::new(LoopState {
            scheduler,
            gate: RefCell::new(VisibilityGate::new(fallback_ms)),
            alive: Cell::new(true),
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
            observer: RefCell::new(None),
            observer_cb: RefCell::new(None),
            fallback_id: Cell::new(None),
            fallback_cb: RefCell::new(None),
            on_flip: RefCell::new(Some(Box::new(on_flip))),
        });

        let weak: Weak<LoopState> = Rc::downgrade(&state);
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(s) = weak.upgrade() {
                s.frame();
            }
        }) as Box<dyn FnMut()>));

        if let Err(e) = observe(&state, canvas) {
            log::warn!("[frame] no IntersectionObserver ({:?}); starting now", e);
            state.gate.borrow_mut().fallback_elapsed();
            state.request();
        }
        arm_fallback(&state, fallback_ms);
        Self { state }
    }

    /// Stop for good. No callback registered by this loop runs afterwards.
    pub fn destroy(&self) {
        let s = &self.state;
        if !s.alive.replace(false) {
            return;
        }
        s.suspend();
        if let Some(o) = s.observer.borrow_mut().take() {
            o.disconnect();
        }
        if let Some(id) = s.fallback_id.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
        }
        s.scheduler.borrow_mut().clear();
        s.tick.borrow_mut().take();
        s.observer_cb.borrow_mut().take();
        s.fallback_cb.borrow_mut().take();
        s.on_flip.borrow_mut().take();
        log::info!("[frame] destroyed");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn observe(state: &Rc<LoopState>, canvas: &web::HtmlCanvasElement) -> Result<(), JsValue> {
    let weak = Rc::downgrade(state);
    let cb = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        let Some(s) = weak.upgrade() else {
            return;
        };
        // Entries arrive oldest first; the last one is current.
        if let Some(entry) = entries
            .iter()
            .last()
            .map(|e| e.unchecked_into::<web::IntersectionObserverEntry>())
        {
            s.on_visibility(entry.is_intersecting());
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let opts = web::IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    opts.set_root_margin(VISIBILITY_ROOT_MARGIN);
    let observer =
        web::IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &opts)?;
    observer.observe(canvas);
    *state.observer.borrow_mut() = Some(observer);
    *state.observer_cb.borrow_mut() = Some(cb);
    Ok(())
}

fn arm_fallback(state: &Rc<LoopState>, fallback_ms: u32) {
    let Some(w) = web::window() else {
        return;
    };
    let weak = Rc::downgrade(state);
    let cb = Closure::wrap(Box::new(move || {
        let Some(s) = weak.upgrade() else {
            return;
        };
        s.fallback_id.set(None);
        let waited = s.gate.borrow().fallback_ms() as f64;
        let fired = s.gate.borrow_mut().wait(waited);
        if fired {
            s.request();
        }
    }) as Box<dyn FnMut()>);
    match w.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        fallback_ms as i32,
    ) {
        Ok(id) => {
            state.fallback_id.set(Some(id));
            *state.fallback_cb.borrow_mut() = Some(cb);
        }
        Err(e) => log::warn!("[frame] fallback timer failed: {:?}", e),
    }
}
