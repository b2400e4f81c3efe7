//! Pixel annotation over contact-matrix plots
//!
//! [`annotate_pixels`] runs the whole pipeline for one call: validation,
//! half selection, subsetting, viewport composition, geometry generation and
//! scene assembly. Every fatal check runs before the page is touched.

mod geometry;
mod scene;

pub use geometry::{
    ArrowShape, BoxShape, CircleShape, GeometrySpec, Shape, ShapeDescriptor, ShapeIter, ShapeKind,
    ShapeStyle,
};
pub use scene::{RenderTarget, SceneGroup};

use crate::defaults;
use crate::errors::{AnnotateError, AnnotationWarning};
use crate::genome::IntervalTable;
use crate::half::{Half, PlotHalf, resolve_half};
use crate::page::Page;
use crate::plot::MatrixPlot;
use crate::subset::subset_pairs;
use crate::types::{Color, NumericError, check_finite};
use crate::viewport::{ViewportRequest, compose_viewport};

/// Fully resolved settings for one annotation call
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRequest {
    pub kind: ShapeKind,
    pub half: Half,
    /// Matrix cells
    pub shift: f64,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    /// Points
    pub line_width: f64,
    pub alpha: f64,
    /// Queue the scene on the page's display list
    pub draw: bool,
}

impl Default for AnnotationRequest {
    fn default() -> Self {
        Self {
            kind: defaults::SHAPE,
            half: defaults::HALF,
            shift: defaults::SHIFT,
            stroke: None,
            fill: None,
            line_width: defaults::LINE_WIDTH,
            alpha: defaults::ALPHA,
            draw: defaults::DRAW,
        }
    }
}

impl AnnotationRequest {
    fn validate(&self) -> Result<(), AnnotateError> {
        let non_negative = |what: &'static str, v: f64| -> Result<(), AnnotateError> {
            check_finite(v).map_err(|source| AnnotateError::InvalidNumber { what, source })?;
            if v < 0.0 {
                return Err(AnnotateError::InvalidNumber {
                    what,
                    source: NumericError::Negative,
                });
            }
            Ok(())
        };
        non_negative("shift", self.shift)?;
        non_negative("line width", self.line_width)?;
        non_negative("alpha", self.alpha)?;
        Ok(())
    }
}

/// Result of an annotation call.
///
/// Carries the source plot so it can be annotated again.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelAnnotation {
    plot: MatrixPlot,
    scene: SceneGroup,
    half: PlotHalf,
    data: IntervalTable,
    warnings: Vec<AnnotationWarning>,
}

impl PixelAnnotation {
    /// The annotated plot, usable as input to a further call
    pub fn plot(&self) -> &MatrixPlot {
        &self.plot
    }

    pub fn scene(&self) -> &SceneGroup {
        &self.scene
    }

    /// Name of the composed viewport
    pub fn viewport_name(&self) -> &str {
        &self.scene.viewport().name
    }

    /// Half the shapes were placed on
    pub fn half(&self) -> PlotHalf {
        self.half
    }

    /// Rows that were drawn
    pub fn data(&self) -> &IntervalTable {
        &self.data
    }

    pub fn warnings(&self) -> &[AnnotationWarning] {
        &self.warnings
    }
}

/// Annotate the pixels of `plot` covered by the rows of `data`.
pub fn annotate_pixels(
    page: &mut Page,
    plot: &MatrixPlot,
    data: &IntervalTable,
    request: &AnnotationRequest,
) -> Result<PixelAnnotation, AnnotateError> {
    request.validate()?;
    plot.check_chromosomes()?;
    let resolution = resolve_half(request.half, plot)?;
    let mut warnings = resolution.warnings;

    let (style, style_warning) = ShapeStyle::resolve(
        request.kind,
        request.stroke.clone(),
        request.fill.clone(),
        request.line_width,
        request.alpha,
    );
    warnings.extend(style_warning);

    let frame = plot.annotation_frame(page)?;

    let subset = subset_pairs(plot, data);
    if subset.is_empty() {
        let window = plot.window();
        let warning = AnnotationWarning::NoElementsFound {
            chrom: window.chrom.clone(),
            start: window.start,
            end: window.end,
        };
        crate::log::warn!(%warning, "annotate pixels");
        warnings.push(warning);
    }

    let viewport = compose_viewport(
        page,
        &ViewportRequest::new(defaults::CATEGORY, &frame.region)
            .clip(true)
            .angle(frame.angle),
    )?;

    let spec = GeometrySpec {
        kind: request.kind,
        shift: request.shift,
        resolution: plot.resolution(),
        style,
    };
    let mut scene = SceneGroup::new(viewport);
    scene.extend(spec.shapes(&subset, resolution.half));

    let outside = scene.outside_scales();
    if outside > 0 {
        let warning = AnnotationWarning::ShapesOutsidePlot {
            viewport: scene.viewport().name.clone(),
            count: outside,
            total: scene.len(),
        };
        crate::log::warn!(%warning, "annotate pixels");
        warnings.push(warning);
    }

    crate::log::info!(
        viewport = %scene.viewport().name,
        kind = %request.kind,
        half = %resolution.half,
        shapes = scene.len(),
        "pixels annotated"
    );
    if request.draw {
        page.hand_off(scene.clone());
    }

    Ok(PixelAnnotation {
        plot: plot.clone(),
        scene,
        half: resolution.half,
        data: subset,
        warnings,
    })
}
