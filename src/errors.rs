//! Error and warning types with rich diagnostics using miette
//!
//! Fatal conditions are [`AnnotateError`]; they abort the current call.
//! Non-fatal conditions are [`AnnotationWarning`]; they are returned next to
//! a valid (possibly empty) result.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::half::{Half, PlotHalf};
use crate::types::{NumericError, Unit};

// ============================================================================
// Fatal errors
// ============================================================================

/// Errors that abort an annotation or layout call
#[derive(Error, Diagnostic, Debug)]
pub enum AnnotateError {
    #[error("numeric coordinate {value} has no unit")]
    #[diagnostic(
        code(hicpage::unit::missing_unit),
        help("pass a physical length such as `1.5in`, or supply a default unit")
    )]
    MissingUnit { value: f64 },

    #[error("invalid coordinate: expected a number or a physical length, got {found}")]
    #[diagnostic(code(hicpage::unit::invalid_coordinate_type))]
    InvalidCoordinateType { found: String },

    #[error("malformed length literal")]
    #[diagnostic(code(hicpage::unit::malformed_length))]
    MalformedLength {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a number with an optional unit")]
        span: SourceSpan,
    },

    #[error("unknown unit: {unit}")]
    #[diagnostic(
        code(hicpage::unit::unknown_unit),
        help("known units: inches, cm, mm, points, bigpts, picas, px, npc, native")
    )]
    UnknownUnit { unit: String },

    #[error("`{unit}` lengths need an enclosing viewport to convert")]
    #[diagnostic(code(hicpage::unit::frame_relative))]
    NativeUnitOutsideViewport { unit: Unit },

    #[error("invalid {what}: {source}")]
    #[diagnostic(code(hicpage::unit::invalid_number))]
    InvalidNumber {
        what: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("chromosome `{chrom}` does not follow the {assembly} naming convention")]
    #[diagnostic(
        code(hicpage::genome::chromosome_format),
        help("{assembly} chromosome names start with `{prefix}`")
    )]
    ChromosomeFormat {
        chrom: String,
        assembly: String,
        prefix: String,
    },

    #[error("cannot annotate the {requested} half of a plot drawn on the {plot} half")]
    #[diagnostic(code(hicpage::half::incompatible))]
    IncompatibleHalf { requested: Half, plot: PlotHalf },

    #[error("unknown half: {value}")]
    #[diagnostic(
        code(hicpage::half::unknown),
        help("expected one of: inherit, both, top, bottom")
    )]
    UnknownHalf { value: String },

    #[error("unsupported annotation shape: {kind}")]
    #[diagnostic(
        code(hicpage::shape::unsupported),
        help("expected one of: box, circle, arrow")
    )]
    UnsupportedShapeKind { kind: String },

    #[error("missing required argument: {name}")]
    #[diagnostic(code(hicpage::params::missing_argument))]
    MissingRequiredArgument { name: &'static str },

    #[error("plot region has zero {axis}")]
    #[diagnostic(code(hicpage::viewport::degenerate_region))]
    DegenerateRegion { axis: &'static str },

    #[error("invalid justification: {value}")]
    #[diagnostic(
        code(hicpage::viewport::justification),
        help("use one or two of: left, right, center, top, bottom")
    )]
    InvalidJustification { value: String },

    #[error("no viewport named {name} on this page")]
    #[diagnostic(code(hicpage::viewport::unknown))]
    UnknownViewport { name: String },

    #[error("malformed interval table: {message}")]
    #[diagnostic(code(hicpage::genome::malformed_table))]
    MalformedTable {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

// ============================================================================
// Warnings
// ============================================================================

/// Non-fatal conditions reported alongside a valid result
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum AnnotationWarning {
    #[error("no elements found in {chrom}:{start}-{end}")]
    #[diagnostic(code(hicpage::subset::no_elements), severity(Warning))]
    NoElementsFound { chrom: String, start: u64, end: u64 },

    #[error("triangular plots are annotated on the top half; ignoring requested `{requested}`")]
    #[diagnostic(code(hicpage::half::triangle_override), severity(Warning))]
    TriangleHalfOverride { requested: Half },

    #[error("arrow fill `{fill}` given without a stroke color; using stroke `{stroke}` for both")]
    #[diagnostic(code(hicpage::shape::ambiguous_arrow_fill), severity(Warning))]
    AmbiguousArrowFill { fill: String, stroke: String },

    #[error("annotating pixels with {x_chrom} on the x-axis and {y_chrom} on the y-axis")]
    #[diagnostic(code(hicpage::half::swapped_axes), severity(Advice))]
    SwappedAxes { x_chrom: String, y_chrom: String },

    #[error("{count} of {total} shapes in {viewport} lie entirely outside the plot's scales")]
    #[diagnostic(
        code(hicpage::shape::outside_plot),
        severity(Warning),
        help("the clip region hides them; check the requested half against the plot's axes")
    )]
    ShapesOutsidePlot {
        viewport: String,
        count: usize,
        total: usize,
    },
}
