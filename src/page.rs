//! Page session - the one active canvas, its viewport registry and display list

use std::collections::HashMap;

use glam::DVec2;

use crate::annotate::{RenderTarget, SceneGroup};
use crate::defaults;
use crate::errors::AnnotateError;
use crate::types::{NumericError, PhysicalLength, Unit, check_finite};
use crate::viewport::Viewport;

/// Page setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageOptions {
    pub width: PhysicalLength,
    pub height: PhysicalLength,
    /// Unit of the page coordinate system; must be absolute
    pub unit: Unit,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            width: defaults::PAGE_WIDTH,
            height: defaults::PAGE_HEIGHT,
            unit: Unit::Inches,
        }
    }
}

/// Axis selector for frame-relative conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Drawing session state.
///
/// Every layout call borrows the page mutably, so only one call can touch
/// the registry at a time.
#[derive(Debug)]
pub struct Page {
    width: f64,
    height: f64,
    unit: Unit,
    /// Registered viewports by name
    viewports: HashMap<String, Viewport>,
    /// Registration order
    viewport_order: Vec<String>,
    /// Scene groups handed off for drawing, in order
    display_list: Vec<SceneGroup>,
}

impl Page {
    pub fn new(options: PageOptions) -> Result<Self, AnnotateError> {
        if !options.unit.is_absolute() {
            return Err(AnnotateError::NativeUnitOutsideViewport { unit: options.unit });
        }
        let width = options.width.convert_to(options.unit)?.value;
        let height = options.height.convert_to(options.unit)?.value;
        for (what, v) in [("page width", width), ("page height", height)] {
            check_finite(v).map_err(|source| AnnotateError::InvalidNumber { what, source })?;
            if v <= 0.0 {
                return Err(AnnotateError::InvalidNumber {
                    what,
                    source: if v == 0.0 {
                        NumericError::Zero
                    } else {
                        NumericError::Negative
                    },
                });
            }
        }

        crate::log::debug!(width, height, unit = %options.unit, "page created");
        Ok(Self {
            width,
            height,
            unit: options.unit,
            viewports: HashMap::new(),
            viewport_order: Vec::new(),
            display_list: Vec::new(),
        })
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Page width in page units
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Page height in page units
    pub fn height(&self) -> f64 {
        self.height
    }

    fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Convert a length to a plain number in page units.
    /// `npc` is relative to the page along `axis`; `native` has no meaning here.
    pub fn to_page_units(&self, len: PhysicalLength, axis: Axis) -> Result<f64, AnnotateError> {
        match len.unit {
            Unit::Npc => Ok(len.value * self.extent(axis)),
            _ => Ok(len.convert_to(self.unit)?.value),
        }
    }

    /// Convert a bottom-measured y to page space, where y grows downward
    pub fn to_page_y(&self, y: PhysicalLength) -> Result<f64, AnnotateError> {
        Ok(self.height - self.to_page_units(y, Axis::Y)?)
    }

    /// Flip a bottom-origin point into top-origin page space
    pub fn flip(&self, p: DVec2) -> DVec2 {
        DVec2::new(p.x, self.height - p.y)
    }

    pub fn viewport(&self, name: &str) -> Option<&Viewport> {
        self.viewports.get(name)
    }

    /// Viewport names in registration order
    pub fn viewport_names(&self) -> impl Iterator<Item = &str> {
        self.viewport_order.iter().map(String::as_str)
    }

    /// Next free `{category}{n}` name.
    ///
    /// `n` starts one past the number of names already registered in the
    /// category and skips any taken suffix.
    pub fn next_viewport_name(&self, category: &str) -> String {
        let taken = self
            .viewport_order
            .iter()
            .filter(|name| {
                name.strip_prefix(category)
                    .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            })
            .count();
        let mut n = taken + 1;
        loop {
            let candidate = format!("{category}{n}");
            if !self.viewports.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub(crate) fn register(&mut self, viewport: Viewport) {
        crate::log::debug!(name = %viewport.name, "viewport registered");
        self.viewport_order.push(viewport.name.clone());
        self.viewports.insert(viewport.name.clone(), viewport);
    }

    /// Queue a scene for drawing
    pub fn hand_off(&mut self, scene: SceneGroup) {
        crate::log::debug!(viewport = %scene.viewport().name, shapes = scene.len(), "scene handed off");
        self.display_list.push(scene);
    }

    /// Scenes queued for drawing, in hand-off order
    pub fn scenes(&self) -> &[SceneGroup] {
        &self.display_list
    }

    /// Replay the display list into a render target
    pub fn render(&self, target: &mut dyn RenderTarget) -> Result<(), AnnotateError> {
        for scene in &self.display_list {
            scene.render(self, target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataScale;
    use crate::viewport::{Justification, PlotRegion, ViewportRequest, compose_viewport};

    fn letter() -> Page {
        Page::new(PageOptions::default()).unwrap()
    }

    #[test]
    fn page_converts_into_its_own_unit() {
        let page = Page::new(PageOptions {
            width: PhysicalLength::inches(2.0),
            height: PhysicalLength::inches(1.0),
            unit: Unit::Centimeters,
        })
        .unwrap();
        assert!((page.width() - 5.08).abs() < 1e-12);
        assert!((page.height() - 2.54).abs() < 1e-12);
    }

    #[test]
    fn page_rejects_frame_relative_unit() {
        let err = Page::new(PageOptions {
            unit: Unit::Npc,
            ..PageOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, AnnotateError::NativeUnitOutsideViewport { .. }));
    }

    #[test]
    fn page_rejects_zero_height() {
        let err = Page::new(PageOptions {
            height: PhysicalLength::inches(0.0),
            ..PageOptions::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            AnnotateError::InvalidNumber { source: NumericError::Zero, .. }
        ));
    }

    #[test]
    fn page_reports_nan_size_as_nan() {
        let err = Page::new(PageOptions {
            width: PhysicalLength::inches(f64::NAN),
            ..PageOptions::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            AnnotateError::InvalidNumber { what: "page width", source: NumericError::NaN }
        ));
    }

    #[test]
    fn page_y_flips_vertical_axis() {
        let page = letter();
        assert_eq!(page.to_page_y(PhysicalLength::inches(3.0)).unwrap(), 8.0);
        assert_eq!(page.to_page_y(PhysicalLength::new(0.5, Unit::Npc)).unwrap(), 5.5);
    }

    #[test]
    fn native_has_no_page_meaning() {
        let err = letter()
            .to_page_units(PhysicalLength::native(10.0), Axis::X)
            .unwrap_err();
        assert!(matches!(err, AnnotateError::NativeUnitOutsideViewport { .. }));
    }

    #[test]
    fn names_count_up_per_category() {
        let mut page = letter();
        let region = PlotRegion::new(
            PhysicalLength::inches(1.0),
            PhysicalLength::inches(1.0),
            PhysicalLength::inches(2.0),
            PhysicalLength::inches(2.0),
            Justification::default(),
        )
        .unwrap()
        .with_scales(DataScale::UNIT, DataScale::UNIT);

        for _ in 0..2 {
            compose_viewport(&mut page, &ViewportRequest::new("loopAnnotation", &region)).unwrap();
        }
        compose_viewport(&mut page, &ViewportRequest::new("highlight", &region)).unwrap();

        insta::assert_snapshot!(page.next_viewport_name("loopAnnotation"), @"loopAnnotation3");
        let names: Vec<&str> = page.viewport_names().collect();
        assert_eq!(names, ["loopAnnotation1", "loopAnnotation2", "highlight1"]);
    }

    #[test]
    fn names_skip_suffixes_already_taken() {
        let mut scratch = letter();
        let region = PlotRegion::new(
            PhysicalLength::inches(0.0),
            PhysicalLength::inches(0.0),
            PhysicalLength::inches(1.0),
            PhysicalLength::inches(1.0),
            Justification::LEFT_BOTTOM,
        )
        .unwrap();
        let mut vp =
            compose_viewport(&mut scratch, &ViewportRequest::new("loopAnnotation", &region))
                .unwrap();

        // Only "loopAnnotation2" exists: the count suggests 2, which is taken
        let mut page = letter();
        vp.name = "loopAnnotation2".to_string();
        page.register(vp);
        assert_eq!(page.next_viewport_name("loopAnnotation"), "loopAnnotation3");
        // Prefix matches with non-numeric tails do not count
        assert_eq!(page.next_viewport_name("loop"), "loop1");
    }
}
