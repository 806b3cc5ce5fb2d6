//! Geometry emission
//!
//! Converts an aperture and its trail into a [`RenderCommand`] for the
//! configured [`EmitterStrategy`]. Emission is pure: the same inputs always
//! produce the same command, down to the serialized strings.

use std::fmt;

use reveal_paint::{
    Color, Ellipse, FillRule, Gradient, GradientStop, Path, PathBuilder, Point, Precision, Rect, Size,
};
use serde::Serialize;

use crate::aperture::ApertureGeometry;
use crate::config::{EmitterStrategy, RevealConfig};
use crate::trail::{render_scale, TrailPoint};

/// One frame's worth of geometry for the reveal surface
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RenderCommand {
    Path(SubtractivePath),
    Attributes(EllipseAttributes),
    Mask(MaskExpression),
}

impl RenderCommand {
    pub fn strategy(&self) -> EmitterStrategy {
        match self {
            RenderCommand::Path(_) => EmitterStrategy::Path,
            RenderCommand::Attributes(_) => EmitterStrategy::Attributes,
            RenderCommand::Mask(_) => EmitterStrategy::Mask,
        }
    }

    /// Number of holes cut into the cover
    pub fn exclusion_count(&self) -> usize {
        match self {
            RenderCommand::Path(path) => path.exclusions,
            RenderCommand::Attributes(attrs) => usize::from(attrs.visible),
            RenderCommand::Mask(mask) => mask.exclusions,
        }
    }

    /// Whether the cover is drawn without any hole
    pub fn is_full_cover(&self) -> bool {
        self.exclusion_count() == 0
    }
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCommand::Path(path) => f.write_str(&path.data),
            RenderCommand::Attributes(attrs) => {
                for (i, (name, value)) in attrs.to_pairs().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{name}=\"{value}\"")?;
                }
                Ok(())
            }
            RenderCommand::Mask(mask) => f.write_str(&mask.css),
        }
    }
}

/// Viewport rectangle with elliptical holes, filled even-odd
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubtractivePath {
    #[serde(skip)]
    pub path: Path,
    /// Outer boundary and holes, in drawing order
    #[serde(skip)]
    pub bounds: Rect,
    #[serde(skip)]
    pub holes: Vec<Ellipse>,
    pub fill_rule: FillRule,
    /// Number of ellipse subpaths after the outer rectangle
    pub exclusions: usize,
    /// SVG path data (`d` attribute)
    pub data: String,
}

impl SubtractivePath {
    /// Whether the cover is painted at `point` under the even-odd rule
    pub fn covers(&self, point: Point) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        let crossings = self.holes.iter().filter(|hole| hole.contains(point)).count();
        crossings % 2 == 0
    }
}

/// Attributes for a single ellipse primitive
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EllipseAttributes {
    pub cx: f32,
    pub cy: f32,
    pub rx: f32,
    pub ry: f32,
    /// Degrees, about (cx, cy)
    pub rotation: f32,
    pub visible: bool,
    #[serde(skip)]
    pub precision: Precision,
}

impl EllipseAttributes {
    fn hidden(precision: Precision) -> Self {
        Self {
            cx: 0.0,
            cy: 0.0,
            rx: 0.0,
            ry: 0.0,
            rotation: 0.0,
            visible: false,
            precision,
        }
    }

    /// Attribute name/value pairs, formatted at the configured precision
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let p = self.precision;
        let (cx, cy) = (p.format(self.cx), p.format(self.cy));
        let transform = format!("rotate({} {} {})", p.format(self.rotation), cx, cy);
        vec![
            ("cx", cx),
            ("cy", cy),
            ("rx", p.format(self.rx)),
            ("ry", p.format(self.ry)),
            ("transform", transform),
            (
                "visibility",
                if self.visible { "visible" } else { "hidden" }.to_string(),
            ),
        ]
    }
}

/// Stack of gradient layers intersected into a `mask-image`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaskExpression {
    pub layers: Vec<Gradient>,
    /// Number of transparent elliptical layers
    pub exclusions: usize,
    /// CSS `mask-image` value
    pub css: String,
}

impl MaskExpression {
    /// `mask-composite` keyword the layers expect
    pub const COMPOSITE: &'static str = "intersect";

    fn new(layers: Vec<Gradient>, exclusions: usize, precision: Precision) -> Self {
        let css = layers
            .iter()
            .map(|layer| layer.to_css(precision))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            layers,
            exclusions,
            css,
        }
    }
}

/// Pure `(aperture, trail) -> RenderCommand` conversion
#[derive(Clone, Debug)]
pub struct GeometryEmitter {
    strategy: EmitterStrategy,
    trail_capacity: usize,
    trail_decay: f32,
    mask_feather: f32,
    precision: Precision,
}

impl GeometryEmitter {
    /// Build from a sanitized configuration
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            strategy: config.emitter_strategy,
            trail_capacity: config.trail_length,
            trail_decay: config.trail_decay,
            mask_feather: config.mask_feather,
            precision: config.precision,
        }
    }

    pub fn strategy(&self) -> EmitterStrategy {
        self.strategy
    }

    pub fn emit(
        &self,
        viewport: Size,
        aperture: Option<&ApertureGeometry>,
        trail: &[TrailPoint],
    ) -> RenderCommand {
        let Some(aperture) = aperture else {
            return self.full_cover(viewport);
        };
        match self.strategy {
            EmitterStrategy::Path => self.emit_path(viewport, aperture, trail),
            EmitterStrategy::Attributes => self.emit_attributes(aperture),
            EmitterStrategy::Mask => self.emit_mask(aperture, trail),
        }
    }

    /// The strategy's representation of a surface with no hole
    pub fn full_cover(&self, viewport: Size) -> RenderCommand {
        match self.strategy {
            EmitterStrategy::Path => self.path_command(viewport, Vec::new()),
            EmitterStrategy::Attributes => {
                RenderCommand::Attributes(EllipseAttributes::hidden(self.precision))
            }
            EmitterStrategy::Mask => RenderCommand::Mask(MaskExpression::new(
                vec![Gradient::linear_simple(180.0, Color::BLACK, Color::BLACK)],
                0,
                self.precision,
            )),
        }
    }

    /// The trail points worth drawing under this strategy.
    ///
    /// Even-odd filling toggles coverage wherever ellipses overlap, so in
    /// path mode a trail ellipse that contains the aperture center, or lies
    /// entirely inside the aperture, would re-cover part of the hole. Those
    /// points are dropped. The other strategies keep the whole trail.
    pub fn visible_trail(
        &self,
        aperture: &ApertureGeometry,
        trail: &[TrailPoint],
    ) -> Vec<TrailPoint> {
        if self.strategy != EmitterStrategy::Path {
            return trail.to_vec();
        }
        let main = aperture.ellipse();
        trail
            .iter()
            .filter(|point| {
                let ellipse = self.trail_ellipse(&main, point);
                !ellipse.contains(main.center) && !main.encloses(&ellipse)
            })
            .copied()
            .collect()
    }

    fn trail_ellipse(&self, main: &Ellipse, point: &TrailPoint) -> Ellipse {
        let scale = render_scale(point.age, self.trail_capacity, self.trail_decay);
        main.at(point.position).scaled(scale)
    }

    /// Trail ellipses, oldest first, followed by the main aperture
    fn exclusions(&self, aperture: &ApertureGeometry, trail: &[TrailPoint]) -> Vec<Ellipse> {
        let main = aperture.ellipse();
        let mut ellipses: Vec<Ellipse> = trail
            .iter()
            .rev()
            .map(|point| self.trail_ellipse(&main, point))
            .collect();
        ellipses.push(main);
        ellipses
    }

    fn emit_path(
        &self,
        viewport: Size,
        aperture: &ApertureGeometry,
        trail: &[TrailPoint],
    ) -> RenderCommand {
        self.path_command(viewport, self.exclusions(aperture, trail))
    }

    fn path_command(&self, viewport: Size, holes: Vec<Ellipse>) -> RenderCommand {
        let bounds = viewport.sanitized().to_rect();
        let path: Path = holes
            .iter()
            .fold(PathBuilder::new().rect(bounds), |builder, ellipse| {
                builder.ellipse(ellipse)
            })
            .build();
        let data = path.to_svg_data(self.precision);
        RenderCommand::Path(SubtractivePath {
            path,
            bounds,
            exclusions: holes.len(),
            holes,
            fill_rule: FillRule::EvenOdd,
            data,
        })
    }

    fn emit_attributes(&self, aperture: &ApertureGeometry) -> RenderCommand {
        RenderCommand::Attributes(EllipseAttributes {
            cx: aperture.center.x,
            cy: aperture.center.y,
            rx: aperture.radius_major,
            ry: aperture.radius_minor,
            rotation: aperture.rotation,
            visible: true,
            precision: self.precision,
        })
    }

    fn emit_mask(&self, aperture: &ApertureGeometry, trail: &[TrailPoint]) -> RenderCommand {
        let layers: Vec<Gradient> = self
            .exclusions(aperture, trail)
            .iter()
            .map(|ellipse| self.mask_layer(ellipse))
            .collect();
        let count = layers.len();
        RenderCommand::Mask(MaskExpression::new(layers, count, self.precision))
    }

    /// Radial gradients are axis-aligned, so a rotated ellipse is drawn with
    /// the half-extents of its bounding box.
    fn mask_layer(&self, ellipse: &Ellipse) -> Gradient {
        let (sin, cos) = ellipse.rotation.to_radians().sin_cos();
        let (a, b) = (ellipse.radius_x, ellipse.radius_y);
        let radius_x = ((a * cos).powi(2) + (b * sin).powi(2)).sqrt();
        let radius_y = ((a * sin).powi(2) + (b * cos).powi(2)).sqrt();
        Gradient::Radial {
            center: ellipse.center,
            radius_x,
            radius_y,
            stops: vec![
                GradientStop::new(0.0, Color::TRANSPARENT),
                GradientStop::new(1.0 - self.mask_feather, Color::TRANSPARENT),
                GradientStop::new(1.0, Color::BLACK),
            ],
        }
    }
}
