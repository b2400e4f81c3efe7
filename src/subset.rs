//! Region subsetting: keep the interval pairs that fall inside a plot

use crate::genome::{IntervalPair, IntervalTable};
use crate::plot::MatrixPlot;

/// True when both intervals of `pair` lie inside the plot's windows.
///
/// The first interval is checked against the primary window and the second
/// against the alternate window (the primary one again for triangles).
pub fn pair_in_plot(plot: &MatrixPlot, pair: &IntervalPair) -> bool {
    plot.window().contains(&pair.first) && plot.alt_window().contains(&pair.second)
}

/// Rows of `data` fully contained in `plot`, in table order.
///
/// An empty result is not an error here; the caller decides how to report it.
pub fn subset_pairs(plot: &MatrixPlot, data: &IntervalTable) -> IntervalTable {
    let kept = data.filtered(|pair| pair_in_plot(plot, pair));
    crate::log::debug!(
        window = %plot.window(),
        alt = %plot.alt_window(),
        rows = data.len(),
        kept = kept.len(),
        "subset interval pairs"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GenomicInterval;
    use crate::plot::{SquarePlot, TrianglePlot};
    use crate::types::PhysicalLength;
    use crate::viewport::{Justification, PlotRegion};

    fn region() -> PlotRegion {
        PlotRegion::new(
            PhysicalLength::inches(0.0),
            PhysicalLength::inches(0.0),
            PhysicalLength::inches(2.0),
            PhysicalLength::inches(2.0),
            Justification::LEFT_BOTTOM,
        )
        .unwrap()
    }

    fn table() -> IntervalTable {
        IntervalTable::new(vec![
            IntervalPair::from_columns("chr1", 100, 200, "chr2", 5_000, 5_100),
            // first interval pokes out of the window
            IntervalPair::from_columns("chr1", 950, 1_050, "chr2", 5_000, 5_100),
            IntervalPair::from_columns("chr1", 300, 400, "chr1", 600, 700),
            // exactly on the window bounds
            IntervalPair::from_columns("chr1", 0, 1_000, "chr2", 4_000, 6_000),
            IntervalPair::from_columns("chr3", 100, 200, "chr2", 5_000, 5_100),
        ])
    }

    fn square() -> MatrixPlot {
        SquarePlot::new(GenomicInterval::new("chr1", 0, 1_000), 10, region())
            .unwrap()
            .alt(GenomicInterval::new("chr2", 4_000, 6_000))
            .into()
    }

    fn triangle() -> MatrixPlot {
        TrianglePlot::new(GenomicInterval::new("chr1", 0, 1_000), 10, region())
            .unwrap()
            .into()
    }

    #[test]
    fn square_uses_alt_window_for_second_interval() {
        let kept = subset_pairs(&square(), &table());
        let firsts: Vec<u64> = kept.iter().map(|p| p.first.start).collect();
        assert_eq!(firsts, vec![100, 0]);
    }

    #[test]
    fn triangle_uses_primary_window_twice() {
        let kept = subset_pairs(&triangle(), &table());
        assert_eq!(kept.rows(), &[IntervalPair::from_columns("chr1", 300, 400, "chr1", 600, 700)]);
    }

    #[test]
    fn subsetting_is_idempotent() {
        for plot in [square(), triangle()] {
            let once = subset_pairs(&plot, &table());
            assert_eq!(subset_pairs(&plot, &once), once);
        }
    }

    #[test]
    fn results_lie_inside_the_windows() {
        for plot in [square(), triangle()] {
            for pair in &subset_pairs(&plot, &table()) {
                let (w, a) = (plot.window(), plot.alt_window());
                assert!(pair.first.start >= w.start && pair.first.end <= w.end);
                assert!(pair.second.start >= a.start && pair.second.end <= a.end);
            }
        }
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let data = IntervalTable::new(vec![IntervalPair::from_columns(
            "chr9", 0, 10, "chr9", 0, 10,
        )]);
        assert!(subset_pairs(&square(), &data).is_empty());
    }
}
