//! Display list produced by the composer and consumed by a painter.

use crate::geo::Rgba;
use crate::path::QuadCurve;
use crate::projection::SurfaceSize;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LayerKind {
    Background,
    Connections,
    Markers,
    Overlays,
    Foreground,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Background,
        LayerKind::Connections,
        LayerKind::Markers,
        LayerKind::Overlays,
        LayerKind::Foreground,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem {
    /// External dot-field image stretched over the whole surface.
    Image { size: Vec2 },
    Curve {
        curve: QuadCurve,
        color: Rgba,
        width: f32,
        /// Blur radius of a soft halo; 0 disables it.
        glow: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f32)>,
        glow: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    Wedge {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Rgba,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Rgba,
        size: f32,
        align: TextAlign,
    },
}

impl DrawItem {
    pub fn dot(center: Vec2, radius: f32, fill: Rgba) -> Self {
        DrawItem::Circle {
            center,
            radius,
            fill: Some(fill),
            stroke: None,
            glow: 0.0,
        }
    }

    pub fn ring(center: Vec2, radius: f32, color: Rgba, width: f32) -> Self {
        DrawItem::Circle {
            center,
            radius,
            fill: None,
            stroke: Some((color, width)),
            glow: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub items: Vec<DrawItem>,
}

/// One frame's worth of drawing, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub size: SurfaceSize,
    /// Horizontal pan wrapped into `[0, width)`; the painter tiles the
    /// surface at `-pan_x` and `width - pan_x`.
    pub pan_x: f32,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(size: SurfaceSize, pan_x: f32) -> Self {
        Self {
            size,
            pan_x,
            layers: LayerKind::ALL
                .iter()
                .map(|&kind| Layer {
                    kind,
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind as usize]
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Vec<DrawItem> {
        &mut self.layers[kind as usize].items
    }
}
