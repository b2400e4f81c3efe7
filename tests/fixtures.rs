//! Annotate every BEDPE fixture under tests/fixtures.
//!
//! Each fixture starts with `#!` directives (comments to the BEDPE reader):
//!
//! ```text
//! #! plot square chr1:0-1000 [chr2:0-1000] half=both
//! #! shapes 4
//! ```

use datatest_stable::Utf8Path;
use hicpage::{
    AnnotationWarning, GenomicInterval, Half, IntervalTable, Justification, MatrixPlot, Page,
    PageOptions, PhysicalLength, PixelAnnotationBuilder, PlotHalf, PlotRegion, SquarePlot,
    TrianglePlot, subset_pairs,
};

const RESOLUTION: u64 = 10_000;

struct Fixture {
    plot: MatrixPlot,
    half: Half,
    shapes: usize,
}

fn interval(text: &str) -> Result<GenomicInterval, String> {
    let (chrom, range) = text.split_once(':').ok_or(format!("bad interval {text}"))?;
    let (start, end) = range.split_once('-').ok_or(format!("bad interval {text}"))?;
    let start = start.parse().map_err(|e| format!("{text}: {e}"))?;
    let end = end.parse().map_err(|e| format!("{text}: {e}"))?;
    Ok(GenomicInterval::new(chrom, start, end))
}

fn region() -> PlotRegion {
    PlotRegion::new(
        PhysicalLength::inches(1.0),
        PhysicalLength::inches(1.0),
        PhysicalLength::inches(4.0),
        PhysicalLength::inches(4.0),
        Justification::LEFT_BOTTOM,
    )
    .expect("valid region")
}

fn read_directives(source: &str) -> datatest_stable::Result<Fixture> {
    let mut plot = None;
    let mut half = Half::Inherit;
    let mut plot_half = None;
    let mut shapes = None;

    for line in source.lines().filter_map(|l| l.strip_prefix("#!")) {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["plot", kind, rest @ ..] => {
                let mut windows = Vec::new();
                for word in rest {
                    match word.strip_prefix("half=") {
                        Some(h) => {
                            half = h.parse()?;
                            plot_half = h.parse::<PlotHalf>().ok();
                        }
                        None => windows.push(interval(word)?),
                    }
                }
                let window = windows.first().cloned().ok_or("plot needs a window")?;
                plot = Some(match *kind {
                    "square" => {
                        let mut p = SquarePlot::new(window, RESOLUTION, region())?;
                        if let Some(alt) = windows.get(1) {
                            p = p.alt(alt.clone());
                        }
                        if let Some(own) = plot_half {
                            p = p.half(own);
                        }
                        MatrixPlot::from(p)
                    }
                    "triangle" => TrianglePlot::new(window, RESOLUTION, region())?.into(),
                    other => return Err(format!("unknown plot kind {other}").into()),
                });
            }
            ["shapes", n] => shapes = Some(n.parse()?),
            _ => return Err(format!("unknown directive `{line}`").into()),
        }
    }

    Ok(Fixture {
        plot: plot.ok_or("missing `#! plot` directive")?,
        half,
        shapes: shapes.ok_or("missing `#! shapes` directive")?,
    })
}

fn annotate_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let fixture = read_directives(&source)?;
    let data = IntervalTable::parse_bedpe(path.as_str(), &source)?;
    let plot = &fixture.plot;

    // Subsetting keeps only contained rows and is idempotent
    let kept = subset_pairs(plot, &data);
    for pair in &kept {
        assert!(plot.window().contains(&pair.first), "{path}: {pair:?}");
        assert!(plot.alt_window().contains(&pair.second), "{path}: {pair:?}");
    }
    assert_eq!(subset_pairs(plot, &kept), kept, "{path}: subsetting is not idempotent");

    let mut page = Page::new(PageOptions::default())?;
    let annotation = PixelAnnotationBuilder::new()
        .plot(plot)
        .data(&data)
        .half(fixture.half)
        .annotate(&mut page)?;

    assert_eq!(annotation.data(), &kept, "{path}");
    assert_eq!(annotation.scene().len(), fixture.shapes, "{path}: shape count");
    assert_eq!(
        annotation.scene().len(),
        kept.len() * annotation.half().placements().len(),
        "{path}: one shape per row and placement"
    );
    if kept.is_empty() {
        assert!(
            annotation
                .warnings()
                .iter()
                .any(|w| matches!(w, AnnotationWarning::NoElementsFound { .. })),
            "{path}: empty subset must warn"
        );
    }
    if let MatrixPlot::Triangle(_) = plot {
        assert_eq!(annotation.half(), PlotHalf::Top, "{path}");
    }
    Ok(())
}

datatest_stable::harness! {
    { test = annotate_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.bedpe$" },
}
