//! Strongly-typed numeric primitives for hicpage.
//!
//! - No raw `f64` reaches placement without a [`Unit`]
//! - Absolute units convert through inches
//! - `native` and `npc` only make sense relative to a frame (page or viewport)

use std::fmt;
use std::str::FromStr;

use crate::errors::AnnotateError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities
#[inline]
pub fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Physical unit attached to a length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Inches,
    Centimeters,
    Millimeters,
    /// TeX points, 72.27 per inch
    Points,
    /// PostScript points, 72 per inch
    BigPoints,
    /// 12 points
    Picas,
    /// CSS pixels, 96 per inch
    Pixels,
    /// Normalized parent coordinates, 0..1 across the enclosing frame
    Npc,
    /// The enclosing viewport's data scale
    Native,
}

impl Unit {
    /// Inches per one of this unit, `None` for frame-relative units.
    pub fn inches_per_unit(self) -> Option<f64> {
        match self {
            Unit::Inches => Some(1.0),
            Unit::Centimeters => Some(1.0 / 2.54),
            Unit::Millimeters => Some(1.0 / 25.4),
            Unit::Points => Some(1.0 / 72.27),
            Unit::BigPoints => Some(1.0 / 72.0),
            Unit::Picas => Some(12.0 / 72.27),
            Unit::Pixels => Some(1.0 / 96.0),
            Unit::Npc | Unit::Native => None,
        }
    }

    pub fn is_absolute(self) -> bool {
        self.inches_per_unit().is_some()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Inches => "inches",
            Unit::Centimeters => "cm",
            Unit::Millimeters => "mm",
            Unit::Points => "points",
            Unit::BigPoints => "bigpts",
            Unit::Picas => "picas",
            Unit::Pixels => "px",
            Unit::Npc => "npc",
            Unit::Native => "native",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            "cm" | "centimeters" | "centimetres" => Ok(Unit::Centimeters),
            "mm" | "millimeters" | "millimetres" => Ok(Unit::Millimeters),
            "pt" | "points" => Ok(Unit::Points),
            "bigpts" => Ok(Unit::BigPoints),
            "pc" | "picas" => Ok(Unit::Picas),
            "px" | "pixels" => Ok(Unit::Pixels),
            "npc" => Ok(Unit::Npc),
            "native" => Ok(Unit::Native),
            _ => Err(AnnotateError::UnknownUnit { unit: s.to_string() }),
        }
    }
}

/// A magnitude tagged with its unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalLength {
    pub value: f64,
    pub unit: Unit,
}

impl PhysicalLength {
    pub const fn new(value: f64, unit: Unit) -> Self {
        PhysicalLength { value, unit }
    }

    pub const fn inches(value: f64) -> Self {
        PhysicalLength::new(value, Unit::Inches)
    }

    pub const fn native(value: f64) -> Self {
        PhysicalLength::new(value, Unit::Native)
    }

    /// Length in inches, `None` for `npc`/`native`.
    pub fn to_inches(self) -> Option<f64> {
        self.unit.inches_per_unit().map(|k| self.value * k)
    }

    /// Convert between absolute units.
    pub fn convert_to(self, unit: Unit) -> Result<PhysicalLength, AnnotateError> {
        if self.unit == unit {
            return Ok(self);
        }
        let inches = self.to_inches().ok_or(AnnotateError::NativeUnitOutsideViewport {
            unit: self.unit,
        })?;
        let per = unit
            .inches_per_unit()
            .ok_or(AnnotateError::NativeUnitOutsideViewport { unit })?;
        Ok(PhysicalLength::new(inches / per, unit))
    }

    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }
}

impl fmt::Display for PhysicalLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Angle in degrees, counter-clockwise positive
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    /// Rotation applied to triangular matrices
    pub const TRIANGLE: Angle = Angle(-45.0);

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simple color model; anything not `none` is kept as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Color {
    None,
    Named(String),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("na") {
            Color::None
        } else {
            Color::Named(name)
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Color::None)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => f.write_str("none"),
            Color::Named(s) => f.write_str(s),
        }
    }
}

/// Linear data scale across one viewport axis. `min > max` is allowed
/// and flips the axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataScale {
    pub min: f64,
    pub max: f64,
}

impl DataScale {
    /// Create a scale with validation (rejects non-finite bounds and zero span)
    pub fn try_new(min: f64, max: f64) -> Result<Self, NumericError> {
        check_finite(min)?;
        check_finite(max)?;
        if min == max {
            return Err(NumericError::Zero);
        }
        Ok(DataScale { min, max })
    }

    /// Unit scale used when a viewport has no data scale of its own
    pub const UNIT: DataScale = DataScale { min: 0.0, max: 1.0 };

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Fraction of the axis at which `value` falls
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Whether `[lo, hi]` touches the axis at all
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        let (min, max) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        lo <= max && hi >= min
    }
}
