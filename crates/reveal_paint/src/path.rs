//! Path building and representation

use std::ops::{Add, Sub};

use smallvec::SmallVec;

use crate::format::Precision;
use crate::primitives::{Ellipse, Rect};

/// A 2D point in viewport coordinates (y grows downwards)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        (other - self).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A 2D displacement
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector in degrees, measured from +x towards +y
    pub fn angle_degrees(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn lerp(self, other: Vec2, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    fn sub(self, rhs: Vec2) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Fill rule used to decide which regions of a path are inside
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FillRule {
    #[default]
    NonZero,
    /// Regions enclosed an even number of times are outside. Drawing a shape
    /// inside a covering rectangle therefore cuts a hole into it.
    EvenOdd,
}

impl FillRule {
    /// The SVG `fill-rule` keyword
    pub fn as_svg(self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// SVG-style elliptical arc from the current point to `end`
    EllipticArcTo {
        radius_x: f32,
        radius_y: f32,
        /// Rotation of the ellipse's x-axis in degrees
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of subpaths (one per `MoveTo`)
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Serialize to SVG path data (`d` attribute) using absolute commands
    pub fn to_svg_data(&self, precision: Precision) -> String {
        let mut out = String::with_capacity(self.commands.len() * 24);
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match *command {
                PathCommand::MoveTo(p) => {
                    out.push('M');
                    write_point(&mut out, p, precision);
                }
                PathCommand::LineTo(p) => {
                    out.push('L');
                    write_point(&mut out, p, precision);
                }
                PathCommand::EllipticArcTo {
                    radius_x,
                    radius_y,
                    x_rotation,
                    large_arc,
                    sweep,
                    end,
                } => {
                    out.push('A');
                    precision.write(&mut out, radius_x);
                    out.push(',');
                    precision.write(&mut out, radius_y);
                    out.push(' ');
                    precision.write(&mut out, x_rotation);
                    out.push(' ');
                    out.push(if large_arc { '1' } else { '0' });
                    out.push(' ');
                    out.push(if sweep { '1' } else { '0' });
                    out.push(' ');
                    write_point(&mut out, end, precision);
                }
                PathCommand::Close => out.push('Z'),
            }
        }
        out
    }
}

fn write_point(out: &mut String, p: Point, precision: Precision) {
    precision.write(out, p.x);
    out.push(',');
    precision.write(out, p.y);
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
        }
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::MoveTo(point));
        self.current = point;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::LineTo(point));
        self.current = point;
        self
    }

    pub fn elliptic_arc_to(
        mut self,
        radius_x: f32,
        radius_y: f32,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    ) -> Self {
        self.path.commands.push(PathCommand::EllipticArcTo {
            radius_x,
            radius_y,
            x_rotation,
            large_arc,
            sweep,
            end,
        });
        self.current = end;
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    /// Append a clockwise rectangle as its own subpath
    pub fn rect(self, rect: Rect) -> Self {
        let right = rect.x + rect.width;
        let bottom = rect.y + rect.height;
        self.move_to(rect.x, rect.y)
            .line_to(right, rect.y)
            .line_to(right, bottom)
            .line_to(rect.x, bottom)
            .close()
    }

    /// Append a full ellipse as its own subpath.
    ///
    /// Drawn as two half arcs between the ends of the major axis, wound
    /// counter-clockwise so it reads as a hole inside a clockwise outline.
    pub fn ellipse(self, ellipse: &Ellipse) -> Self {
        let (start, opposite) = ellipse.axis_endpoints();
        let (rx, ry, rot) = (ellipse.radius_x, ellipse.radius_y, ellipse.rotation);
        self.move_to(start.x, start.y)
            .elliptic_arc_to(rx, ry, rot, true, false, opposite)
            .elliptic_arc_to(rx, ry, rot, true, false, start)
            .close()
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
