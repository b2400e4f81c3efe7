//! Hard defaults, used when neither an explicit argument nor a bundled
//! parameter supplies a value

use crate::annotate::ShapeKind;
use crate::half::Half;
use crate::types::PhysicalLength;

pub const PAGE_WIDTH: PhysicalLength = PhysicalLength::inches(8.5);
pub const PAGE_HEIGHT: PhysicalLength = PhysicalLength::inches(11.0);

pub const SHAPE: ShapeKind = ShapeKind::Box;
pub const HALF: Half = Half::Inherit;
/// Matrix cells
pub const SHIFT: f64 = 4.0;
pub const STROKE: &str = "black";
/// Points
pub const LINE_WIDTH: f64 = 2.0;
pub const ALPHA: f64 = 1.0;
pub const DRAW: bool = true;

pub const ARROW_HEAD_LENGTH: PhysicalLength = PhysicalLength::inches(0.1);
pub const ARROW_HEAD_WIDTH: PhysicalLength = PhysicalLength::inches(0.08);

/// Name prefix of annotation viewports
pub const CATEGORY: &str = "loopAnnotation";
pub const ASSEMBLY: &str = "hg38";
