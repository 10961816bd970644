#![cfg(target_arch = "wasm32")]
use map_core::{
    attach, default_connections, Connection, FrameScheduler, GeoPoint, MapConfig, WorldMap,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod paint;

use constants::{DEFAULT_BACKGROUND_SRC, DEFAULT_CANVAS_ID};

#[inline]
fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

struct Mounted {
    frame: frame::FrameLoop,
    _listeners: Vec<dom::Listener>,
}

/// Handle exported to the host page. Connections and options are set before
/// `mount`; `destroy` (or dropping the handle) tears everything down.
#[wasm_bindgen]
pub struct WorldMapHandle {
    canvas: web::HtmlCanvasElement,
    map: Rc<RefCell<WorldMap>>,
    painter: Rc<RefCell<paint::Painter>>,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl WorldMapHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WorldMapHandle, JsValue> {
        Self::build(canvas_id, Vec::new()).map_err(to_js)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_connection(
        &mut self,
        start_lat: f64,
        start_lng: f64,
        end_lat: f64,
        end_lng: f64,
        color: Option<String>,
        start_label: Option<String>,
        end_label: Option<String>,
    ) {
        let point = |lat, lng, label: Option<String>| match label {
            Some(l) => GeoPoint::labeled(lat, lng, l),
            None => GeoPoint::new(lat, lng),
        };
        let mut c = Connection::new(
            point(start_lat, start_lng, start_label),
            point(end_lat, end_lng, end_label),
        );
        if let Some(color) = color {
            c = c.with_color(color);
        }
        self.map.borrow_mut().add_connection(c);
    }

    pub fn set_markers_enabled(&mut self, enabled: bool) {
        self.map.borrow_mut().set_markers_enabled(enabled);
    }

    pub fn set_background_src(&mut self, src: &str) -> Result<(), JsValue> {
        self.painter
            .borrow_mut()
            .set_background_src(src)
            .map_err(to_js)
    }

    /// Start input handling and the animation loop. Idempotent.
    pub fn mount(&mut self) {
        if self.mounted.is_some() {
            return;
        }
        let fallback_ms = self.map.borrow().config().visibility_fallback_ms;
        let max_dt = self.map.borrow().config().max_frame_dt_secs;

        let scheduler = Rc::new(RefCell::new(FrameScheduler::new(max_dt)));
        let painter = self.painter.clone();
        attach(&self.map, &mut scheduler.borrow_mut(), move |scene| {
            if let Err(e) = painter.borrow_mut().paint(scene) {
                log::error!("paint error: {:?}", e);
            }
        });

        let wiring = events::PointerWiring {
            canvas: self.canvas.clone(),
            map: self.map.clone(),
            painter: self.painter.clone(),
            capture: Rc::new(RefCell::new(None)),
        };
        let mut listeners = events::wire_pointer_handlers(wiring.clone());
        listeners.extend(events::wire_resize(self.map.clone()));

        let frame = frame::FrameLoop::start(&self.canvas, scheduler, fallback_ms, move |visible| {
            if !visible {
                events::release_capture(&wiring);
            }
            wiring.map.borrow_mut().on_visibility(visible);
        });
        log::info!(
            "[map] mounted: {} connections, tier {:?}",
            self.map.borrow().connections().len(),
            self.map.borrow().tier().name
        );
        self.mounted = Some(Mounted {
            frame,
            _listeners: listeners,
        });
    }

    pub fn destroy(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.frame.destroy();
            self.map.borrow_mut().cancel_interaction();
            log::info!("[map] unmounted");
        }
    }
}

impl WorldMapHandle {
    fn build(canvas_id: &str, connections: Vec<Connection>) -> anyhow::Result<Self> {
        let canvas = dom::canvas_by_id(canvas_id)?;
        dom::sync_canvas_backing_size(&canvas);
        let map = WorldMap::new(MapConfig::default(), connections, dom::device_signals())?;
        let mut painter = paint::Painter::new(canvas.clone())?;
        painter.set_background_src(DEFAULT_BACKGROUND_SRC)?;
        Ok(Self {
            canvas,
            map: Rc::new(RefCell::new(map)),
            painter: Rc::new(RefCell::new(painter)),
            mounted: None,
        })
    }
}

impl Drop for WorldMapHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount the widget with the built-in hero connections.
#[wasm_bindgen]
pub fn mount_default(canvas_id: Option<String>) -> Result<WorldMapHandle, JsValue> {
    let id = canvas_id.unwrap_or_else(|| DEFAULT_CANVAS_ID.to_string());
    let mut handle = WorldMapHandle::build(&id, default_connections()).map_err(to_js)?;
    handle.mount();
    Ok(handle)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("map-web starting");

    // A canvas with the default id and `data-autostart` gets the hero map
    // without any script of its own.
    spawn_local(async move {
        let autostart = dom::window_document()
            .and_then(|d| d.get_element_by_id(DEFAULT_CANVAS_ID))
            .is_some_and(|el| el.has_attribute("data-autostart"));
        if !autostart {
            return;
        }
        match mount_default(None) {
            // The page owns no handle in this path; keep the widget alive.
            Ok(handle) => std::mem::forget(handle),
            Err(e) => log::error!("init error: {:?}", e),
        }
    });
    Ok(())
}
