//! Layered annotation parameters: explicit > bundled > hard default

use crate::annotate::{AnnotationRequest, PixelAnnotation, ShapeKind, annotate_pixels};
use crate::defaults;
use crate::errors::AnnotateError;
use crate::genome::IntervalTable;
use crate::half::Half;
use crate::page::Page;
use crate::plot::MatrixPlot;
use crate::types::Color;

/// Bundle of loosely-typed parameters shared between calls.
///
/// Strings are parsed when a request is built, so a bad bundle value
/// surfaces as the same error an explicit argument would.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationParams {
    pub shape: Option<String>,
    pub half: Option<String>,
    pub shift: Option<f64>,
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub line_width: Option<f64>,
    pub alpha: Option<f64>,
    pub draw: Option<bool>,
}

/// Explicit arguments for one annotation call
#[derive(Debug, Clone, Default)]
pub struct PixelAnnotationBuilder<'a> {
    plot: Option<&'a MatrixPlot>,
    data: Option<&'a IntervalTable>,
    params: Option<&'a AnnotationParams>,
    shape: Option<ShapeKind>,
    half: Option<Half>,
    shift: Option<f64>,
    stroke: Option<Color>,
    fill: Option<Color>,
    line_width: Option<f64>,
    alpha: Option<f64>,
    draw: Option<bool>,
}

/// A request with its inputs, ready to run
#[derive(Debug, Clone)]
pub struct ResolvedAnnotation<'a> {
    pub plot: &'a MatrixPlot,
    pub data: &'a IntervalTable,
    pub request: AnnotationRequest,
}

impl ResolvedAnnotation<'_> {
    pub fn annotate(&self, page: &mut Page) -> Result<PixelAnnotation, AnnotateError> {
        annotate_pixels(page, self.plot, self.data, &self.request)
    }
}

impl<'a> PixelAnnotationBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plot(mut self, plot: &'a MatrixPlot) -> Self {
        self.plot = Some(plot);
        self
    }

    pub fn data(mut self, data: &'a IntervalTable) -> Self {
        self.data = Some(data);
        self
    }

    pub fn params(mut self, params: &'a AnnotationParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn shape(mut self, shape: ShapeKind) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn half(mut self, half: Half) -> Self {
        self.half = Some(half);
        self
    }

    pub fn shift(mut self, shift: f64) -> Self {
        self.shift = Some(shift);
        self
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(Color::named(color));
        self
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(Color::named(color));
        self
    }

    pub fn line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn draw(mut self, draw: bool) -> Self {
        self.draw = Some(draw);
        self
    }

    /// Resolve every field once.
    ///
    /// Fails with `MissingRequiredArgument` when the plot or the data is
    /// absent, and with the parse error of any bundled string it had to use.
    pub fn build(&self) -> Result<ResolvedAnnotation<'a>, AnnotateError> {
        let plot = self
            .plot
            .ok_or(AnnotateError::MissingRequiredArgument { name: "plot" })?;
        let data = self
            .data
            .ok_or(AnnotateError::MissingRequiredArgument { name: "data" })?;
        let empty = AnnotationParams::default();
        let bundle = self.params.unwrap_or(&empty);

        let kind = match (self.shape, &bundle.shape) {
            (Some(kind), _) => kind,
            (None, Some(name)) => name.parse()?,
            (None, None) => defaults::SHAPE,
        };
        let half = match (self.half, &bundle.half) {
            (Some(half), _) => half,
            (None, Some(name)) => name.parse()?,
            (None, None) => defaults::HALF,
        };
        let color = |explicit: &Option<Color>, bundled: &Option<String>| {
            explicit
                .clone()
                .or_else(|| bundled.as_deref().map(Color::named))
        };

        let request = AnnotationRequest {
            kind,
            half,
            shift: self.shift.or(bundle.shift).unwrap_or(defaults::SHIFT),
            stroke: color(&self.stroke, &bundle.stroke),
            fill: color(&self.fill, &bundle.fill),
            line_width: self
                .line_width
                .or(bundle.line_width)
                .unwrap_or(defaults::LINE_WIDTH),
            alpha: self.alpha.or(bundle.alpha).unwrap_or(defaults::ALPHA),
            draw: self.draw.or(bundle.draw).unwrap_or(defaults::DRAW),
        };
        crate::log::debug!(?request, "annotation request resolved");
        Ok(ResolvedAnnotation {
            plot,
            data,
            request,
        })
    }

    /// Build and run on `page`
    pub fn annotate(&self, page: &mut Page) -> Result<PixelAnnotation, AnnotateError> {
        self.build()?.annotate(page)
    }
}
