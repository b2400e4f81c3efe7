//! Hi-C contact-matrix plots, as seen by the annotation pipeline
//!
//! A plot owns its genomic window(s), its resolution and its [`PlotRegion`].
//! Annotation code only reads from it.

use std::f64::consts::SQRT_2;

use crate::errors::AnnotateError;
use crate::genome::{Assembly, GenomicInterval};
use crate::half::PlotHalf;
use crate::page::{Axis, Page};
use crate::types::{Angle, DataScale, NumericError, PhysicalLength};
use crate::viewport::{Justification, PlotRegion};

/// Square contact matrix, optionally with a distinct y-axis window
#[derive(Debug, Clone, PartialEq)]
pub struct SquarePlot {
    /// Primary window (chrom, start, end)
    pub window: GenomicInterval,
    /// Orthogonal window (altchrom, altstart, altend); the primary window by default
    pub alt: GenomicInterval,
    /// Half the matrix is drawn on
    pub half: PlotHalf,
    /// Set when the axes are swapped: `top` puts `window` on x and `alt` on y,
    /// `bottom` puts `alt` on x and `window` on y
    pub swapped: Option<PlotHalf>,
    /// Base pairs per matrix cell
    pub resolution: u64,
    pub region: PlotRegion,
    pub assembly: Assembly,
}

/// Triangular contact matrix: the upper half of a square rotated 45°
#[derive(Debug, Clone, PartialEq)]
pub struct TrianglePlot {
    pub window: GenomicInterval,
    pub resolution: u64,
    pub region: PlotRegion,
    pub assembly: Assembly,
}

fn check_resolution(resolution: u64) -> Result<(), AnnotateError> {
    if resolution == 0 {
        return Err(AnnotateError::InvalidNumber {
            what: "resolution",
            source: NumericError::Zero,
        });
    }
    Ok(())
}

fn window_scale(window: &GenomicInterval) -> Result<DataScale, AnnotateError> {
    DataScale::try_new(window.start as f64, window.end as f64).map_err(|source| {
        AnnotateError::InvalidNumber {
            what: "genomic window",
            source,
        }
    })
}

impl SquarePlot {
    pub fn new(
        window: GenomicInterval,
        resolution: u64,
        region: PlotRegion,
    ) -> Result<Self, AnnotateError> {
        check_resolution(resolution)?;
        window_scale(&window)?;
        Ok(Self {
            alt: window.clone(),
            window,
            half: PlotHalf::Both,
            swapped: None,
            resolution,
            region,
            assembly: Assembly::default(),
        })
    }

    pub fn alt(mut self, alt: GenomicInterval) -> Self {
        self.alt = alt;
        self
    }

    pub fn half(mut self, half: PlotHalf) -> Self {
        self.half = half;
        self
    }

    pub fn swapped(mut self, orientation: PlotHalf) -> Self {
        self.swapped = Some(orientation);
        self
    }

    pub fn assembly(mut self, assembly: Assembly) -> Self {
        self.assembly = assembly;
        self
    }

    /// Windows on the x and y axis, in that order
    pub fn axis_windows(&self) -> (&GenomicInterval, &GenomicInterval) {
        match self.swapped {
            Some(PlotHalf::Bottom) => (&self.alt, &self.window),
            _ => (&self.window, &self.alt),
        }
    }

    /// Data scales, from the region if it carries them, else from the windows
    pub fn scales(&self) -> Result<(DataScale, DataScale), AnnotateError> {
        if let (Some(x), Some(y)) = (self.region.xscale, self.region.yscale) {
            return Ok((x, y));
        }
        let (x, y) = self.axis_windows();
        Ok((window_scale(x)?, window_scale(y)?))
    }
}

impl TrianglePlot {
    pub fn new(
        window: GenomicInterval,
        resolution: u64,
        region: PlotRegion,
    ) -> Result<Self, AnnotateError> {
        check_resolution(resolution)?;
        window_scale(&window)?;
        Ok(Self {
            window,
            resolution,
            region,
            assembly: Assembly::default(),
        })
    }

    pub fn assembly(mut self, assembly: Assembly) -> Self {
        self.assembly = assembly;
        self
    }

    /// Scale along the triangle's base; both axes of the unrotated square use it
    pub fn scale(&self) -> Result<DataScale, AnnotateError> {
        match self.region.xscale {
            Some(x) => Ok(x),
            None => window_scale(&self.window),
        }
    }
}

/// A contact-matrix plot
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixPlot {
    Square(SquarePlot),
    Triangle(TrianglePlot),
}

impl From<SquarePlot> for MatrixPlot {
    fn from(p: SquarePlot) -> Self {
        MatrixPlot::Square(p)
    }
}

impl From<TrianglePlot> for MatrixPlot {
    fn from(p: TrianglePlot) -> Self {
        MatrixPlot::Triangle(p)
    }
}

/// Where annotations over a plot are drawn: a region in page units,
/// its data scales and its rotation
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationFrame {
    pub region: PlotRegion,
    pub angle: Angle,
}

impl MatrixPlot {
    /// Primary genomic window
    pub fn window(&self) -> &GenomicInterval {
        match self {
            MatrixPlot::Square(p) => &p.window,
            MatrixPlot::Triangle(p) => &p.window,
        }
    }

    /// Window of the second interval of each record
    pub fn alt_window(&self) -> &GenomicInterval {
        match self {
            MatrixPlot::Square(p) => &p.alt,
            MatrixPlot::Triangle(p) => &p.window,
        }
    }

    pub fn resolution(&self) -> u64 {
        match self {
            MatrixPlot::Square(p) => p.resolution,
            MatrixPlot::Triangle(p) => p.resolution,
        }
    }

    pub fn region(&self) -> &PlotRegion {
        match self {
            MatrixPlot::Square(p) => &p.region,
            MatrixPlot::Triangle(p) => &p.region,
        }
    }

    pub fn assembly(&self) -> &Assembly {
        match self {
            MatrixPlot::Square(p) => &p.assembly,
            MatrixPlot::Triangle(p) => &p.assembly,
        }
    }

    /// Half the plot is drawn on; the swapped orientation wins when set
    pub fn own_half(&self) -> PlotHalf {
        match self {
            MatrixPlot::Square(p) => p.swapped.unwrap_or(p.half),
            MatrixPlot::Triangle(_) => PlotHalf::Top,
        }
    }

    /// Check the plot's chromosome names against its assembly
    pub fn check_chromosomes(&self) -> Result<(), AnnotateError> {
        let assembly = self.assembly();
        assembly.check_chrom(&self.window().chrom)?;
        assembly.check_chrom(&self.alt_window().chrom)
    }

    /// Region, scales and angle for an annotation viewport over this plot.
    ///
    /// Square plots reuse their own region. Triangle plots get the square
    /// whose diagonal is the triangle's base: side `width / √2`, anchored at
    /// the triangle region's bottom-left corner and rotated −45°.
    pub fn annotation_frame(&self, page: &Page) -> Result<AnnotationFrame, AnnotateError> {
        match self {
            MatrixPlot::Square(p) => {
                let (x, y) = p.scales()?;
                Ok(AnnotationFrame {
                    region: p.region.clone().with_scales(x, y),
                    angle: Angle::ZERO,
                })
            }
            MatrixPlot::Triangle(p) => {
                let r = &p.region;
                let width = page.to_page_units(r.width, Axis::X)?;
                let height = page.to_page_units(r.height, Axis::Y)?;
                let anchor = glam::DVec2::new(
                    page.to_page_units(r.x, Axis::X)?,
                    page.to_page_units(r.y, Axis::Y)?,
                );
                let bottom_left = anchor + r.just.anchor_offset(width, height);
                let side = width / SQRT_2;
                let unit = page.unit();
                let scale = p.scale()?;
                let region = PlotRegion::new(
                    PhysicalLength::new(bottom_left.x, unit),
                    PhysicalLength::new(bottom_left.y, unit),
                    PhysicalLength::new(side, unit),
                    PhysicalLength::new(side, unit),
                    Justification::LEFT_BOTTOM,
                )?
                .with_scales(scale, scale);
                Ok(AnnotationFrame {
                    region,
                    angle: Angle::TRIANGLE,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageOptions;

    fn region(x: f64, y: f64, w: f64, h: f64) -> PlotRegion {
        PlotRegion::new(
            PhysicalLength::inches(x),
            PhysicalLength::inches(y),
            PhysicalLength::inches(w),
            PhysicalLength::inches(h),
            Justification::LEFT_BOTTOM,
        )
        .unwrap()
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let err = TrianglePlot::new(GenomicInterval::new("chr1", 0, 100), 0, region(0.0, 0.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            AnnotateError::InvalidNumber { what: "resolution", source: NumericError::Zero }
        ));
    }

    #[test]
    fn empty_window_is_rejected() {
        let err = SquarePlot::new(GenomicInterval::new("chr1", 50, 50), 10, region(0.0, 0.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidNumber { what: "genomic window", .. }));
    }

    #[test]
    fn square_scales_follow_axis_swap() {
        let plot = SquarePlot::new(GenomicInterval::new("chr1", 0, 100), 10, region(0.0, 0.0, 1.0, 1.0))
            .unwrap()
            .alt(GenomicInterval::new("chr2", 500, 900));
        let (x, y) = plot.scales().unwrap();
        assert_eq!((x.min, x.max, y.min, y.max), (0.0, 100.0, 500.0, 900.0));

        let (x, y) = plot.swapped(PlotHalf::Bottom).scales().unwrap();
        assert_eq!((x.min, x.max, y.min, y.max), (500.0, 900.0, 0.0, 100.0));
    }

    #[test]
    fn own_half_prefers_swapped_orientation() {
        let plot = SquarePlot::new(GenomicInterval::new("chr1", 0, 100), 10, region(0.0, 0.0, 1.0, 1.0))
            .unwrap()
            .half(PlotHalf::Top);
        assert_eq!(MatrixPlot::from(plot.clone()).own_half(), PlotHalf::Top);
        assert_eq!(MatrixPlot::from(plot.swapped(PlotHalf::Bottom)).own_half(), PlotHalf::Bottom);
    }

    #[test]
    fn triangle_frame_is_rotated_inscribed_square() {
        let page = Page::new(PageOptions::default()).unwrap();
        let plot: MatrixPlot = TrianglePlot::new(
            GenomicInterval::new("chr1", 1_000, 2_000),
            10,
            PlotRegion::new(
                PhysicalLength::inches(1.0),
                PhysicalLength::inches(3.0),
                PhysicalLength::inches(4.0),
                PhysicalLength::inches(2.0),
                Justification::LEFT_TOP,
            )
            .unwrap(),
        )
        .unwrap()
        .into();

        let frame = plot.annotation_frame(&page).unwrap();
        assert_eq!(frame.angle, Angle::TRIANGLE);
        assert_eq!(frame.region.x, PhysicalLength::inches(1.0));
        assert_eq!(frame.region.y, PhysicalLength::inches(1.0));
        assert!((frame.region.width.value - 4.0 / SQRT_2).abs() < 1e-12);
        assert_eq!(frame.region.xscale, frame.region.yscale);
        assert_eq!(frame.region.xscale.map(|s| (s.min, s.max)), Some((1_000.0, 2_000.0)));
    }

    #[test]
    fn chromosome_check_covers_both_windows() {
        let plot: MatrixPlot =
            SquarePlot::new(GenomicInterval::new("chr1", 0, 100), 10, region(0.0, 0.0, 1.0, 1.0))
                .unwrap()
                .alt(GenomicInterval::new("2", 0, 100))
                .into();
        let err = plot.check_chromosomes().unwrap_err();
        assert!(matches!(err, AnnotateError::ChromosomeFormat { ref chrom, .. } if chrom == "2"));
    }
}
