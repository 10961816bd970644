use glam::Vec2;
use map_core::PointerSample;
use web_sys as web;

/// How the map surface is laid onto the canvas: uniformly scaled to cover
/// the whole box and centered, cropping the overflow (CSS `cover`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub scale: f32,
    pub offset: Vec2,
}

impl CoverFit {
    pub const IDENTITY: CoverFit = CoverFit {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    #[inline]
    pub fn to_surface(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.scale
    }
}

#[inline]
pub fn cover_fit(box_size: Vec2, surface: Vec2) -> CoverFit {
    if box_size.x <= 0.0 || box_size.y <= 0.0 || surface.x <= 0.0 || surface.y <= 0.0 {
        return CoverFit::IDENTITY;
    }
    let scale = (box_size.x / surface.x).max(box_size.y / surface.y);
    CoverFit {
        scale,
        offset: (box_size - surface * scale) * 0.5,
    }
}

/// Pointer position relative to the canvas' CSS box.
#[inline]
pub fn pointer_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Reduce a DOM pointer event to a sample in surface units.
#[inline]
pub fn pointer_sample(
    ev: &web::PointerEvent,
    canvas: &web::HtmlCanvasElement,
    fit: &CoverFit,
) -> PointerSample {
    let p = fit.to_surface(pointer_css(ev, canvas));
    PointerSample::new(ev.pointer_id(), p.x, ev.time_stamp())
}

/// Only primary buttons start a drag; touch and pen always qualify.
#[inline]
pub fn is_primary_press(pointer_type: &str, button: i16) -> bool {
    pointer_type != "mouse" || button == 0
}
