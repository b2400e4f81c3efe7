//! Annotation geometry: shape descriptors in a plot's data space
//!
//! Each interval pair yields one shape per placement. Square plots map the
//! first interval to x and the second to y, so the `top` placement sits
//! above the diagonal at (mid1, mid2) and the `bottom` placement mirrors it
//! to (mid2, mid1). All sizes are base pairs; `shift` is in matrix cells and
//! scaled by the plot's resolution.

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::RenderTarget;
use crate::defaults;
use crate::errors::{AnnotateError, AnnotationWarning};
use crate::genome::{IntervalPair, IntervalTable};
use crate::half::PlotHalf;
use crate::page::{Axis, Page};
use crate::types::{Color, PhysicalLength};
use crate::viewport::Viewport;

/// Supported annotation shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Box,
    Circle,
    Arrow,
}

impl FromStr for ShapeKind {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(ShapeKind::Box),
            "circle" => Ok(ShapeKind::Circle),
            "arrow" => Ok(ShapeKind::Arrow),
            _ => Err(AnnotateError::UnsupportedShapeKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Box => "box",
            ShapeKind::Circle => "circle",
            ShapeKind::Arrow => "arrow",
        })
    }
}

/// Resolved drawing attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub stroke: Color,
    pub fill: Color,
    /// Points
    pub line_width: f64,
    pub alpha: f64,
}

impl ShapeStyle {
    /// Settle stroke and fill for `kind`.
    ///
    /// Boxes and circles are never filled. Arrows fill their head with the
    /// stroke color unless both colors are given; a fill without a stroke is
    /// ambiguous and falls back to the default stroke for both.
    pub fn resolve(
        kind: ShapeKind,
        stroke: Option<Color>,
        fill: Option<Color>,
        line_width: f64,
        alpha: f64,
    ) -> (Self, Option<AnnotationWarning>) {
        let default_stroke = Color::named(defaults::STROKE);
        let mut warning = None;
        let (stroke, fill) = match kind {
            ShapeKind::Box | ShapeKind::Circle => {
                (stroke.unwrap_or(default_stroke), Color::None)
            }
            ShapeKind::Arrow => match (stroke, fill) {
                (Some(stroke), Some(fill)) => (stroke, fill),
                (Some(stroke), None) => (stroke.clone(), stroke),
                (None, None) => (default_stroke.clone(), default_stroke),
                (None, Some(fill)) => {
                    let w = AnnotationWarning::AmbiguousArrowFill {
                        fill: fill.to_string(),
                        stroke: default_stroke.to_string(),
                    };
                    crate::log::warn!(warning = %w, "arrow style");
                    warning = Some(w);
                    (default_stroke.clone(), default_stroke)
                }
            },
        };
        (
            Self {
                stroke,
                fill,
                line_width,
                alpha,
            },
            warning,
        )
    }
}

// ============================================================================
// Shape descriptors
// ============================================================================

/// Common behavior of shape descriptors
#[enum_dispatch]
pub trait Shape {
    /// Which side of the diagonal this shape was placed on
    fn placement(&self) -> PlotHalf;

    fn style(&self) -> &ShapeStyle;

    /// Data-space bounding box as (min, max)
    fn bounds(&self) -> (DVec2, DVec2);

    /// Draw into `target` in top-origin page coordinates
    fn emit(
        &self,
        viewport: &Viewport,
        page: &Page,
        target: &mut dyn RenderTarget,
    ) -> Result<(), AnnotateError>;
}

/// Square outline centred on a feature
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub center: DVec2,
    pub side: f64,
    pub placement: PlotHalf,
    pub style: ShapeStyle,
}

/// Circle outline centred on a feature
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: DVec2,
    pub radius: f64,
    pub placement: PlotHalf,
    pub style: ShapeStyle,
}

/// Short diagonal arrow whose head touches a feature's corner
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowShape {
    pub tail: DVec2,
    pub head: DVec2,
    pub head_length: PhysicalLength,
    pub head_width: PhysicalLength,
    pub placement: PlotHalf,
    pub style: ShapeStyle,
}

impl Shape for BoxShape {
    fn placement(&self) -> PlotHalf {
        self.placement
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn bounds(&self) -> (DVec2, DVec2) {
        let half = DVec2::splat(self.side / 2.0);
        (self.center - half, self.center + half)
    }

    fn emit(
        &self,
        viewport: &Viewport,
        page: &Page,
        target: &mut dyn RenderTarget,
    ) -> Result<(), AnnotateError> {
        let (lo, hi) = self.bounds();
        let corners = [lo, dvec2(hi.x, lo.y), hi, dvec2(lo.x, hi.y)]
            .map(|p| page.flip(viewport.native_to_page(p)));
        target.polygon(&corners, &self.style);
        Ok(())
    }
}

impl Shape for CircleShape {
    fn placement(&self) -> PlotHalf {
        self.placement
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn bounds(&self) -> (DVec2, DVec2) {
        let r = DVec2::splat(self.radius);
        (self.center - r, self.center + r)
    }

    fn emit(
        &self,
        viewport: &Viewport,
        page: &Page,
        target: &mut dyn RenderTarget,
    ) -> Result<(), AnnotateError> {
        let center = page.flip(viewport.native_to_page(self.center));
        // Radius follows the x scale
        let radius = viewport.native_size(self.radius, 0.0).x;
        target.circle(center, radius, &self.style);
        Ok(())
    }
}

impl Shape for ArrowShape {
    fn placement(&self) -> PlotHalf {
        self.placement
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn bounds(&self) -> (DVec2, DVec2) {
        (self.tail.min(self.head), self.tail.max(self.head))
    }

    fn emit(
        &self,
        viewport: &Viewport,
        page: &Page,
        target: &mut dyn RenderTarget,
    ) -> Result<(), AnnotateError> {
        let tail = page.flip(viewport.native_to_page(self.tail));
        let head = page.flip(viewport.native_to_page(self.head));
        target.segment(tail, head, &self.style);

        let length = page.to_page_units(self.head_length, Axis::X)?;
        let width = page.to_page_units(self.head_width, Axis::X)?;
        if let Some(points) = arrowhead(tail, head, length, width) {
            let head_style = ShapeStyle {
                stroke: self.style.fill.clone(),
                ..self.style.clone()
            };
            target.polygon(&points, &head_style);
        }
        Ok(())
    }
}

/// Triangle with its tip at `end`, pointing away from `start`.
/// `None` for zero-length segments.
fn arrowhead(start: DVec2, end: DVec2, length: f64, width: f64) -> Option<[DVec2; 3]> {
    let delta = end - start;
    let len = delta.length();
    if len < 1e-9 {
        return None;
    }
    let unit = delta / len;
    let perp = dvec2(-unit.y, unit.x);
    let base = end - unit * length;
    let half_width = width / 2.0;
    Some([end, base + perp * half_width, base - perp * half_width])
}

/// A generated shape
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDescriptor {
    Box(BoxShape),
    Circle(CircleShape),
    Arrow(ArrowShape),
}

// ============================================================================
// Generation
// ============================================================================

/// Per-call geometry settings
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySpec {
    pub kind: ShapeKind,
    /// Matrix cells
    pub shift: f64,
    /// Base pairs per matrix cell
    pub resolution: u64,
    pub style: ShapeStyle,
}

impl GeometrySpec {
    /// Shift in base pairs
    pub fn offset(&self) -> f64 {
        self.shift * self.resolution as f64
    }

    /// Shape for one row at one placement
    pub fn shape(&self, pair: &IntervalPair, placement: PlotHalf) -> ShapeDescriptor {
        let s = self.offset();
        let (mid1, mid2) = (pair.first.midpoint(), pair.second.midpoint());
        let center = match placement {
            PlotHalf::Bottom => dvec2(mid2, mid1),
            _ => dvec2(mid1, mid2),
        };
        let span2 = pair.second.end as f64 - pair.second.start as f64;
        let style = self.style.clone();

        match self.kind {
            ShapeKind::Box => BoxShape {
                center,
                side: span2 + 2.0 * s,
                placement,
                style,
            }
            .into(),
            ShapeKind::Circle => CircleShape {
                center,
                radius: 0.5 * span2 + s,
                placement,
                style,
            }
            .into(),
            ShapeKind::Arrow => {
                let (end1, start2) = (pair.first.end as f64, pair.second.start as f64);
                let (head, tail_dir) = match placement {
                    PlotHalf::Bottom => (dvec2(start2, end1), dvec2(-1.0, 1.0)),
                    _ => (dvec2(end1, start2), dvec2(1.0, -1.0)),
                };
                ArrowShape {
                    tail: head + tail_dir * s,
                    head,
                    head_length: defaults::ARROW_HEAD_LENGTH,
                    head_width: defaults::ARROW_HEAD_WIDTH,
                    placement,
                    style,
                }
                .into()
            }
        }
    }

    /// Lazy shapes for every row of `data`, in table order; within a row,
    /// placements follow [`PlotHalf::placements`]
    pub fn shapes<'a>(&'a self, data: &'a IntervalTable, half: PlotHalf) -> ShapeIter<'a> {
        ShapeIter {
            spec: self,
            rows: data.iter(),
            placements: half.placements(),
            current: None,
            next_placement: 0,
        }
    }
}

/// Iterator over generated shapes; clone it to restart from the same point
#[derive(Debug, Clone)]
pub struct ShapeIter<'a> {
    spec: &'a GeometrySpec,
    rows: std::slice::Iter<'a, IntervalPair>,
    placements: &'static [PlotHalf],
    current: Option<&'a IntervalPair>,
    next_placement: usize,
}

impl Iterator for ShapeIter<'_> {
    type Item = ShapeDescriptor;

    fn next(&mut self) -> Option<ShapeDescriptor> {
        loop {
            if let Some(pair) = self.current {
                if let Some(&placement) = self.placements.get(self.next_placement) {
                    self.next_placement += 1;
                    return Some(self.spec.shape(pair, placement));
                }
            }
            self.current = Some(self.rows.next()?);
            self.next_placement = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = if self.current.is_some() {
            self.placements.len().saturating_sub(self.next_placement)
        } else {
            0
        };
        let n = pending + self.rows.len() * self.placements.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for ShapeIter<'_> {}
