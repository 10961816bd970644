use crate::geo::ProjectedPoint;
use glam::Vec2;
use std::fmt::Write as _;

/// Quadratic Bézier with a single control point lifted above the endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
    pub p0: Vec2,
    pub control: Vec2,
    pub p1: Vec2,
}

/// Build the arc between two projected points. The apex sits `arc_height`
/// above whichever endpoint is higher on screen (smaller y).
pub fn curve(p0: ProjectedPoint, p1: ProjectedPoint, arc_height: f32) -> QuadCurve {
    let control = Vec2::new((p0.x + p1.x) * 0.5, p0.y.min(p1.y) - arc_height);
    QuadCurve { p0, control, p1 }
}

impl QuadCurve {
    /// Evaluate at parameter `t` (clamped to [0, 1]). Exact at both ends.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return self.p0;
        }
        if t == 1.0 {
            return self.p1;
        }
        let u = 1.0 - t;
        self.p0 * (u * u) + self.control * (2.0 * u * t) + self.p1 * (t * t)
    }

    /// Sub-curve covering parameters [0, t] (de Casteljau split), used for
    /// the draw-in reveal of connection strokes.
    pub fn prefix(&self, t: f32) -> QuadCurve {
        let t = t.clamp(0.0, 1.0);
        let c = self.p0.lerp(self.control, t);
        QuadCurve {
            p0: self.p0,
            control: c,
            p1: self.point_at(t),
        }
    }

    pub fn to_svg_path(&self) -> String {
        let mut s = String::with_capacity(48);
        let _ = write!(
            s,
            "M {} {} Q {} {} {} {}",
            self.p0.x, self.p0.y, self.control.x, self.control.y, self.p1.x, self.p1.y
        );
        s
    }
}
