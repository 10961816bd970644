mod pointer;

pub use pointer::{release_capture, wire_pointer_handlers, PointerWiring};

use crate::dom::{self, Listener};
use map_core::WorldMap;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Viewport resizes re-evaluate the fidelity tier. The canvas backing store
/// is re-synced by the painter on the next frame.
pub fn wire_resize(map: Rc<RefCell<WorldMap>>) -> Option<Listener> {
    let window = web::window()?;
    Some(Listener::new(&window, "resize", move |_| {
        map.borrow_mut().on_viewport_resize(dom::viewport_width());
    }))
}
