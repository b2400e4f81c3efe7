//! Unit resolution: turn loosely-typed coordinates into [`PhysicalLength`]s

use crate::errors::AnnotateError;
use crate::parse::parse_length;
use crate::types::{PhysicalLength, Unit};
use crate::viewport::{Justification, PlotRegion};

/// A coordinate or size as handed in by a caller
#[derive(Debug, Clone, PartialEq)]
pub enum Coord {
    /// A plain number; needs a default unit
    Number(f64),
    /// Already tagged with a unit
    Length(PhysicalLength),
    /// A literal such as `"1.5in"`; a bare number in text counts as `Number`
    Text(String),
}

impl From<f64> for Coord {
    fn from(v: f64) -> Self {
        Coord::Number(v)
    }
}

impl From<i32> for Coord {
    fn from(v: i32) -> Self {
        Coord::Number(v as f64)
    }
}

impl From<PhysicalLength> for Coord {
    fn from(l: PhysicalLength) -> Self {
        Coord::Length(l)
    }
}

impl From<&str> for Coord {
    fn from(s: &str) -> Self {
        Coord::Text(s.to_string())
    }
}

/// Resolve `value` to a physical length.
///
/// Lengths pass through unchanged; numbers take `default_unit` or fail with
/// `MissingUnit`. Text that reads as neither, and non-finite numbers, are
/// `InvalidCoordinateType`.
pub fn resolve_length(
    value: &Coord,
    default_unit: Option<Unit>,
) -> Result<PhysicalLength, AnnotateError> {
    match value {
        Coord::Length(l) => Ok(*l),
        Coord::Number(n) => tag_number(*n, default_unit),
        Coord::Text(text) => {
            let literal = parse_length(text).map_err(|err| AnnotateError::InvalidCoordinateType {
                found: format!("`{text}` ({err})"),
            })?;
            match literal.unit {
                Some(unit) => Ok(PhysicalLength::new(literal.value, unit)),
                None => tag_number(literal.value, default_unit),
            }
        }
    }
}

fn tag_number(n: f64, default_unit: Option<Unit>) -> Result<PhysicalLength, AnnotateError> {
    if !n.is_finite() {
        return Err(AnnotateError::InvalidCoordinateType {
            found: format!("non-finite number {n}"),
        });
    }
    match default_unit {
        Some(unit) => Ok(PhysicalLength::new(n, unit)),
        None => Err(AnnotateError::MissingUnit { value: n }),
    }
}

/// Unresolved placement for a plot region.
///
/// Every field is optional so a missing argument surfaces as
/// `MissingRequiredArgument` instead of a default position.
#[derive(Debug, Clone, Default)]
pub struct RegionSpec {
    pub x: Option<Coord>,
    pub y: Option<Coord>,
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub just: Justification,
    pub default_units: Option<Unit>,
}

impl RegionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, x: impl Into<Coord>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn y(mut self, y: impl Into<Coord>) -> Self {
        self.y = Some(y.into());
        self
    }

    pub fn width(mut self, w: impl Into<Coord>) -> Self {
        self.width = Some(w.into());
        self
    }

    pub fn height(mut self, h: impl Into<Coord>) -> Self {
        self.height = Some(h.into());
        self
    }

    pub fn just(mut self, just: Justification) -> Self {
        self.just = just;
        self
    }

    pub fn default_units(mut self, unit: Unit) -> Self {
        self.default_units = Some(unit);
        self
    }

    /// Resolve every field, in x, y, width, height order
    pub fn resolve(&self) -> Result<PlotRegion, AnnotateError> {
        let field = |value: &Option<Coord>,
                     name: &'static str|
         -> Result<PhysicalLength, AnnotateError> {
            let value = value
                .as_ref()
                .ok_or(AnnotateError::MissingRequiredArgument { name })?;
            resolve_length(value, self.default_units)
        };
        let x = field(&self.x, "x")?;
        let y = field(&self.y, "y")?;
        let width = field(&self.width, "width")?;
        let height = field(&self.height, "height")?;
        PlotRegion::new(x, y, width, height, self.just)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_passes_through_unchanged() {
        let l = PhysicalLength::new(2.0, Unit::Centimeters);
        assert_eq!(resolve_length(&l.into(), Some(Unit::Inches)).unwrap(), l);
    }

    #[test]
    fn number_takes_default_unit() {
        for v in [0.0, 1.0, -3.5, 1e6] {
            let l = resolve_length(&Coord::Number(v), Some(Unit::Inches)).unwrap();
            assert_eq!(l, PhysicalLength::inches(v));
        }
    }

    #[test]
    fn number_without_default_is_missing_unit() {
        let err = resolve_length(&Coord::from(5), None).unwrap_err();
        assert!(matches!(err, AnnotateError::MissingUnit { value } if value == 5.0));
    }

    #[test]
    fn nan_is_not_a_coordinate() {
        let err = resolve_length(&Coord::Number(f64::NAN), Some(Unit::Inches)).unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidCoordinateType { .. }));
    }

    #[test]
    fn text_with_unit_ignores_default() {
        let l = resolve_length(&Coord::from("3cm"), Some(Unit::Inches)).unwrap();
        assert_eq!(l, PhysicalLength::new(3.0, Unit::Centimeters));
    }

    #[test]
    fn bare_text_number_needs_default() {
        let err = resolve_length(&Coord::from("3"), None).unwrap_err();
        assert!(matches!(err, AnnotateError::MissingUnit { .. }));
    }

    #[test]
    fn text_that_is_not_a_length_is_invalid() {
        for text in ["abc", "3furlongs", "1 2in"] {
            let err = resolve_length(&Coord::from(text), Some(Unit::Inches)).unwrap_err();
            assert!(
                matches!(err, AnnotateError::InvalidCoordinateType { ref found } if found.contains(text)),
                "{text}: {err:?}"
            );
        }
    }

    #[test]
    fn region_spec_reports_first_missing_field() {
        let err = RegionSpec::new()
            .x(1.0)
            .y(1.0)
            .height(2.0)
            .default_units(Unit::Inches)
            .resolve()
            .unwrap_err();
        assert!(matches!(err, AnnotateError::MissingRequiredArgument { name: "width" }));
    }

    #[test]
    fn region_spec_mixes_units() {
        let region = RegionSpec::new()
            .x("1in")
            .y(2.0)
            .width("5cm")
            .height(3.0)
            .default_units(Unit::Inches)
            .resolve()
            .unwrap();
        assert_eq!(region.x, PhysicalLength::inches(1.0));
        assert_eq!(region.width, PhysicalLength::new(5.0, Unit::Centimeters));
        assert_eq!(region.height, PhysicalLength::inches(3.0));
    }
}
