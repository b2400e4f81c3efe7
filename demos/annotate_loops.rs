//! Annotate loops on a square and a triangular Hi-C plot and print SVG.
//!
//! `cargo run --example annotate_loops --features tracing -- loops.bedpe`

use glam::DVec2;
use hicpage::{
    GenomicInterval, Half, IntervalTable, Justification, MatrixPlot, Page, PageOptions,
    PixelAnnotationBuilder, RegionSpec, RenderTarget, ShapeKind, ShapeStyle, SquarePlot,
    TrianglePlot, Unit, Viewport,
};
use svg::Document;
use svg::Node;
use svg::node::element::{Circle, ClipPath, Group, Line, Polygon};
use tracing_subscriber::EnvFilter;

const LOOPS: &str = "\
# chrom1 start1 end1 chrom2 start2 end2 name
chr21 28210000 28220000 chr21 29085000 29095000 a
chr21 28500000 28510000 chr21 28700000 28710000 b
chr21 29400000 29410000 chr21 29900000 29910000 c
";

const PX_PER_INCH: f64 = 96.0;

/// Builds an SVG document from drawing calls; page units are inches
struct SvgTarget {
    document: Document,
    group: Option<Group>,
}

impl SvgTarget {
    fn new(page: &Page) -> Self {
        let (w, h) = (page.width() * PX_PER_INCH, page.height() * PX_PER_INCH);
        Self {
            document: Document::new()
                .set("viewBox", (0.0, 0.0, w, h))
                .set("width", w)
                .set("height", h),
            group: None,
        }
    }

    fn draw(&mut self, node: impl Into<Box<dyn Node>>) {
        match &mut self.group {
            Some(group) => group.append(node),
            None => self.document.append(node),
        }
    }
}

fn points(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x * PX_PER_INCH, p.y * PX_PER_INCH))
        .collect::<Vec<_>>()
        .join(" ")
}

fn paint(node: &mut impl Node, style: &ShapeStyle) {
    node.assign("stroke", style.stroke.to_string());
    node.assign("fill", style.fill.to_string());
    node.assign("stroke-width", style.line_width * PX_PER_INCH / 72.0);
    node.assign("opacity", style.alpha);
}

impl RenderTarget for SvgTarget {
    fn begin_group(&mut self, viewport: &Viewport, clip: Option<&[DVec2; 4]>) {
        let mut group = Group::new().set("id", viewport.name.as_str());
        if let Some(corners) = clip {
            let id = format!("{}-clip", viewport.name);
            self.document.append(
                ClipPath::new()
                    .set("id", id.as_str())
                    .add(Polygon::new().set("points", points(corners))),
            );
            group = group.set("clip-path", format!("url(#{id})"));
        }
        self.group = Some(group);
    }

    fn end_group(&mut self, _viewport: &Viewport) {
        if let Some(group) = self.group.take() {
            self.document.append(group);
        }
    }

    fn polygon(&mut self, corners: &[DVec2], style: &ShapeStyle) {
        let mut polygon = Polygon::new().set("points", points(corners));
        paint(&mut polygon, style);
        self.draw(polygon);
    }

    fn circle(&mut self, center: DVec2, radius: f64, style: &ShapeStyle) {
        let mut circle = Circle::new()
            .set("cx", center.x * PX_PER_INCH)
            .set("cy", center.y * PX_PER_INCH)
            .set("r", radius * PX_PER_INCH);
        paint(&mut circle, style);
        self.draw(circle);
    }

    fn segment(&mut self, from: DVec2, to: DVec2, style: &ShapeStyle) {
        let mut line = Line::new()
            .set("x1", from.x * PX_PER_INCH)
            .set("y1", from.y * PX_PER_INCH)
            .set("x2", to.x * PX_PER_INCH)
            .set("y2", to.y * PX_PER_INCH);
        paint(&mut line, style);
        self.draw(line);
    }
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (name, text) = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|e| miette::miette!("{path}: {e}"))?;
            (path, text)
        }
        None => ("loops.bedpe".to_string(), LOOPS.to_string()),
    };
    let loops = IntervalTable::parse_bedpe(&name, &text)?;
    let window = GenomicInterval::new("chr21", 28_000_000, 30_000_000);

    let mut page = Page::new(PageOptions::default())?;

    let square_region = RegionSpec::new()
        .x(0.5)
        .y("10.5in")
        .width(3.0)
        .height(3.0)
        .just(Justification::LEFT_TOP)
        .default_units(Unit::Inches)
        .resolve()?;
    let square: MatrixPlot = SquarePlot::new(window.clone(), 10_000, square_region)?.into();

    let triangle_region = RegionSpec::new()
        .x("0.5in")
        .y("1in")
        .width("6in")
        .height("3in")
        .just("left bottom".parse()?)
        .resolve()?;
    let triangle: MatrixPlot = TrianglePlot::new(window, 10_000, triangle_region)?.into();

    let boxes = PixelAnnotationBuilder::new()
        .plot(&square)
        .data(&loops)
        .half(Half::Both)
        .stroke("steelblue")
        .annotate(&mut page)?;
    let arrows = PixelAnnotationBuilder::new()
        .plot(boxes.plot())
        .data(boxes.data())
        .shape(ShapeKind::Arrow)
        .half(Half::Top)
        .stroke("firebrick")
        .annotate(&mut page)?;
    let circles = PixelAnnotationBuilder::new()
        .plot(&triangle)
        .data(&loops)
        .shape(ShapeKind::Circle)
        .half(Half::Bottom)
        .annotate(&mut page)?;

    for annotation in [&boxes, &arrows, &circles] {
        for warning in annotation.warnings() {
            eprintln!("{:?}", miette::Report::new(warning.clone()));
        }
    }

    let mut target = SvgTarget::new(&page);
    page.render(&mut target)?;
    println!("{}", target.document);
    Ok(())
}
