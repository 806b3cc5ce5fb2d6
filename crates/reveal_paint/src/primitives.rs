//! Geometric primitives

use crate::path::{Point, Vec2};

/// A width/height pair, used for the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite extents become zero
    pub fn sanitized(self) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self::new(clean(self.width), clean(self.height))
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The rectangle covering this size from the origin
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// The same rectangle moved by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

/// A rotated ellipse
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f32,
    pub radius_y: f32,
    /// Rotation of the x radius in degrees
    pub rotation: f32,
}

impl Ellipse {
    pub const fn new(center: Point, radius_x: f32, radius_y: f32, rotation: f32) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            rotation,
        }
    }

    /// Same orientation, both radii multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            radius_x: self.radius_x * factor,
            radius_y: self.radius_y * factor,
            ..*self
        }
    }

    /// Same shape moved to `center`
    pub fn at(&self, center: Point) -> Self {
        Self { center, ..*self }
    }

    /// The two ends of the x axis after rotation, start first
    pub fn axis_endpoints(&self) -> (Point, Point) {
        let angle = self.rotation.to_radians();
        let half = Vec2::new(angle.cos(), angle.sin()).scale(self.radius_x);
        (self.center - half, self.center + half)
    }

    /// Point on the outline at parametric angle `t` (radians, before rotation)
    pub fn point_at(&self, t: f32) -> Point {
        let (sin_r, cos_r) = self.rotation.to_radians().sin_cos();
        let (x, y) = (self.radius_x * t.cos(), self.radius_y * t.sin());
        self.center + Vec2::new(x * cos_r - y * sin_r, x * sin_r + y * cos_r)
    }

    /// Whether `other` lies entirely inside this ellipse.
    ///
    /// Tested on a fixed number of outline samples, which is exact enough
    /// at screen scale.
    pub fn encloses(&self, other: &Ellipse) -> bool {
        const SAMPLES: usize = 32;
        if !self.contains(other.center) {
            return false;
        }
        (0..SAMPLES).all(|i| {
            let t = i as f32 / SAMPLES as f32 * std::f32::consts::TAU;
            self.contains(other.point_at(t))
        })
    }

    /// Whether `point` lies inside the rotated ellipse
    pub fn contains(&self, point: Point) -> bool {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return false;
        }
        let angle = -self.rotation.to_radians();
        let d = point - self.center;
        let local_x = d.x * angle.cos() - d.y * angle.sin();
        let local_y = d.x * angle.sin() + d.y * angle.cos();
        let nx = local_x / self.radius_x;
        let ny = local_y / self.radius_y;
        nx * nx + ny * ny <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center_and_translate() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.center(), Point::new(60.0, 40.0));
        assert_eq!(
            rect.translate(Vec2::new(-10.0, 5.0)),
            Rect::new(0.0, 25.0, 100.0, 40.0)
        );
    }

    #[test]
    fn test_size_sanitized() {
        assert_eq!(Size::new(-5.0, f32::NAN).sanitized(), Size::new(0.0, 0.0));
        assert_eq!(Size::new(800.0, 600.0).center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_ellipse_contains_respects_rotation() {
        let flat = Ellipse::new(Point::ZERO, 20.0, 5.0, 0.0);
        assert!(flat.contains(Point::new(15.0, 0.0)));
        assert!(!flat.contains(Point::new(0.0, 15.0)));

        let upright = Ellipse::new(Point::ZERO, 20.0, 5.0, 90.0);
        assert!(upright.contains(Point::new(0.0, 15.0)));
        assert!(!upright.contains(Point::new(15.0, 0.0)));
    }

    #[test]
    fn test_point_at_follows_rotation() {
        let upright = Ellipse::new(Point::new(10.0, 10.0), 20.0, 5.0, 90.0);
        let top = upright.point_at(0.0);
        assert!((top.x - 10.0).abs() < 1e-4);
        assert!((top.y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_encloses() {
        let outer = Ellipse::new(Point::ZERO, 100.0, 60.0, 0.0);
        assert!(outer.encloses(&outer.scaled(0.6)));
        assert!(outer.encloses(&Ellipse::new(Point::new(30.0, 0.0), 40.0, 20.0, 0.0)));
        // sticks out along y once rotated
        assert!(!outer.encloses(&Ellipse::new(Point::ZERO, 70.0, 20.0, 90.0)));
        assert!(!outer.encloses(&Ellipse::new(Point::new(200.0, 0.0), 1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_ellipse_scaled_keeps_center_and_rotation() {
        let e = Ellipse::new(Point::new(3.0, 4.0), 10.0, 6.0, 30.0);
        let s = e.scaled(0.5);
        assert_eq!(s.center, e.center);
        assert_eq!(s.rotation, 30.0);
        assert_eq!((s.radius_x, s.radius_y), (5.0, 3.0));
    }
}
