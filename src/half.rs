//! Half selection - which side of a contact matrix's diagonal to annotate

use std::fmt;
use std::str::FromStr;

use crate::errors::{AnnotateError, AnnotationWarning};
use crate::plot::MatrixPlot;

/// Requested half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Half {
    /// Use the source plot's own half
    #[default]
    Inherit,
    Both,
    Top,
    Bottom,
}

/// A resolved half; also the half a plot is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotHalf {
    Both,
    Top,
    Bottom,
}

impl PlotHalf {
    /// Placements to draw, in scene order
    pub fn placements(self) -> &'static [PlotHalf] {
        match self {
            PlotHalf::Both => &[PlotHalf::Bottom, PlotHalf::Top],
            PlotHalf::Top => &[PlotHalf::Top],
            PlotHalf::Bottom => &[PlotHalf::Bottom],
        }
    }
}

impl From<PlotHalf> for Half {
    fn from(h: PlotHalf) -> Self {
        match h {
            PlotHalf::Both => Half::Both,
            PlotHalf::Top => Half::Top,
            PlotHalf::Bottom => Half::Bottom,
        }
    }
}

impl FromStr for Half {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inherit" => Ok(Half::Inherit),
            "both" => Ok(Half::Both),
            "top" => Ok(Half::Top),
            "bottom" => Ok(Half::Bottom),
            _ => Err(AnnotateError::UnknownHalf {
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for PlotHalf {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Half>()? {
            Half::Both => Ok(PlotHalf::Both),
            Half::Top => Ok(PlotHalf::Top),
            Half::Bottom => Ok(PlotHalf::Bottom),
            Half::Inherit => Err(AnnotateError::UnknownHalf {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Half::Inherit => "inherit",
            Half::Both => "both",
            Half::Top => "top",
            Half::Bottom => "bottom",
        })
    }
}

impl fmt::Display for PlotHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Half::from(*self).fmt(f)
    }
}

/// Outcome of half selection
#[derive(Debug, Clone, PartialEq)]
pub struct HalfResolution {
    pub half: PlotHalf,
    pub warnings: Vec<AnnotationWarning>,
}

/// Resolve `requested` against the source plot's orientation.
///
/// Square plots restricted to one half reject the other half and `both`.
/// Square plots with swapped axes accept anything and report which
/// chromosome sits on which axis. Triangles always resolve to `top`.
pub fn resolve_half(requested: Half, plot: &MatrixPlot) -> Result<HalfResolution, AnnotateError> {
    let mut warnings = Vec::new();
    let half = match plot {
        MatrixPlot::Triangle(_) => {
            if matches!(requested, Half::Both | Half::Bottom) {
                report(&mut warnings, AnnotationWarning::TriangleHalfOverride { requested });
            }
            PlotHalf::Top
        }
        MatrixPlot::Square(square) => match square.swapped {
            Some(swapped) => {
                let (x_chrom, y_chrom) = match swapped {
                    PlotHalf::Bottom => (&square.alt.chrom, &square.window.chrom),
                    _ => (&square.window.chrom, &square.alt.chrom),
                };
                report(
                    &mut warnings,
                    AnnotationWarning::SwappedAxes {
                        x_chrom: x_chrom.clone(),
                        y_chrom: y_chrom.clone(),
                    },
                );
                concrete(requested).unwrap_or(swapped)
            }
            None => {
                let own = square.half;
                let half = concrete(requested).unwrap_or(own);
                let compatible = match (own, half) {
                    (PlotHalf::Top, PlotHalf::Bottom) | (PlotHalf::Bottom, PlotHalf::Top) => false,
                    (PlotHalf::Top | PlotHalf::Bottom, PlotHalf::Both) => false,
                    _ => true,
                };
                if !compatible {
                    return Err(AnnotateError::IncompatibleHalf {
                        requested: half.into(),
                        plot: own,
                    });
                }
                half
            }
        },
    };

    Ok(HalfResolution { half, warnings })
}

fn report(warnings: &mut Vec<AnnotationWarning>, warning: AnnotationWarning) {
    crate::log::warn!(%warning, "half selection");
    warnings.push(warning);
}

fn concrete(half: Half) -> Option<PlotHalf> {
    match half {
        Half::Inherit => None,
        Half::Both => Some(PlotHalf::Both),
        Half::Top => Some(PlotHalf::Top),
        Half::Bottom => Some(PlotHalf::Bottom),
    }
}
