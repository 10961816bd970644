//! Input records supplied by the host page.

use glam::Vec2;

/// Planar point in surface-local units.
pub type ProjectedPoint = Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub label: Option<String>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            label: None,
        }
    }

    pub fn labeled(lat: f64, lng: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            label: Some(label.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub color: Option<String>,
}

impl Connection {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Stroke color for this connection, falling back to the widget's line color.
    pub fn resolved_color(&self, fallback: Rgba) -> Rgba {
        self.color
            .as_deref()
            .and_then(Rgba::from_hex)
            .unwrap_or(fallback)
    }
}

/// Straight RGBA color, components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let (r, g, b, a) = match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                (nib(0)?, nib(1)?, nib(2)?, 255)
            }
            6 => (channel(0)?, channel(2)?, channel(4)?, 255),
            8 => (channel(0)?, channel(2)?, channel(4)?, channel(6)?),
            _ => return None,
        };
        Some(Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        })
    }

    pub fn to_css(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({},{},{},{:.3})",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

/// Connections shown in the store hero when the host supplies none.
pub fn default_connections() -> Vec<Connection> {
    vec![
        Connection::new(
            GeoPoint::labeled(40.7128, -74.006, "New York"),
            GeoPoint::labeled(51.5074, -0.1278, "London"),
        )
        .with_color("#00D4FF"),
        Connection::new(
            GeoPoint::labeled(1.3521, 103.8198, "Singapore"),
            GeoPoint::labeled(25.2048, 55.2708, "Dubai"),
        )
        .with_color("#00FFA3"),
        Connection::new(
            GeoPoint::labeled(35.6762, 139.6503, "Tokyo"),
            GeoPoint::labeled(37.7749, -122.4194, "San Francisco"),
        )
        .with_color("#FF6B35"),
    ]
}
