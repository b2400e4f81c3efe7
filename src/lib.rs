//! Page layout for genomic plots.
//!
//! Resolves mixed numeric and physical-unit coordinates onto a fixed-size
//! [`Page`], composes named nestable [`Viewport`]s and overlays box, circle
//! and arrow annotations on Hi-C contact-matrix plots at positions taken
//! from paired genomic intervals.
//!
//! ```no_run
//! use hicpage::{
//!     GenomicInterval, IntervalTable, Justification, MatrixPlot, Page, PageOptions,
//!     PhysicalLength, PixelAnnotationBuilder, PlotRegion, ShapeKind, SquarePlot,
//! };
//!
//! # fn main() -> Result<(), hicpage::AnnotateError> {
//! let mut page = Page::new(PageOptions::default())?;
//! let region = PlotRegion::new(
//!     PhysicalLength::inches(0.5),
//!     PhysicalLength::inches(0.5),
//!     PhysicalLength::inches(3.0),
//!     PhysicalLength::inches(3.0),
//!     Justification::LEFT_BOTTOM,
//! )?;
//! let plot: MatrixPlot =
//!     SquarePlot::new(GenomicInterval::new("chr21", 28_000_000, 30_300_000), 10_000, region)?.into();
//! let loops = IntervalTable::parse_bedpe(
//!     "loops.bedpe",
//!     "chr21 28210000 28220000 chr21 29085000 29095000\n",
//! )?;
//!
//! let annotation = PixelAnnotationBuilder::new()
//!     .plot(&plot)
//!     .data(&loops)
//!     .shape(ShapeKind::Circle)
//!     .annotate(&mut page)?;
//! assert_eq!(annotation.scene().len(), 2);
//! # Ok(())
//! # }
//! ```

use pest_derive::Parser;

pub mod annotate;
pub mod defaults;
pub mod errors;
pub mod genome;
pub mod half;
mod log;
pub mod page;
pub mod params;
pub mod parse;
pub mod plot;
pub mod subset;
pub mod types;
pub mod units;
pub mod viewport;

pub use annotate::{
    AnnotationRequest, PixelAnnotation, RenderTarget, SceneGroup, Shape, ShapeDescriptor,
    ShapeKind, ShapeStyle, annotate_pixels,
};
pub use errors::{AnnotateError, AnnotationWarning};
pub use genome::{Assembly, GenomicInterval, IntervalPair, IntervalTable};
pub use half::{Half, HalfResolution, PlotHalf, resolve_half};
pub use page::{Page, PageOptions};
pub use params::{AnnotationParams, PixelAnnotationBuilder};
pub use plot::{MatrixPlot, SquarePlot, TrianglePlot};
pub use subset::subset_pairs;
pub use types::{Angle, Color, DataScale, PhysicalLength, Unit};
pub use units::{Coord, RegionSpec, resolve_length};
pub use viewport::{Justification, PlotRegion, Viewport, ViewportRequest, compose_viewport};

#[derive(Parser)]
#[grammar = "hicpage.pest"]
pub struct HicpageParser;
