//! Viewport composition - named, nestable drawing regions with a data scale
//!
//! A [`Viewport`] stores the affine transform from its own frame
//! (page units, origin at its unrotated bottom-left corner) to the page's
//! bottom-origin frame. Nesting composes the parent's transform first.

use std::str::FromStr;

use glam::{DAffine2, DVec2};

use crate::errors::AnnotateError;
use crate::page::{Axis, Page};
use crate::types::{Angle, DataScale, NumericError, PhysicalLength, Unit};

/// Horizontal anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HJust {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VJust {
    Bottom,
    #[default]
    Center,
    Top,
}

impl HJust {
    fn fraction(self) -> f64 {
        match self {
            HJust::Left => 0.0,
            HJust::Center => 0.5,
            HJust::Right => 1.0,
        }
    }
}

impl VJust {
    fn fraction(self) -> f64 {
        match self {
            VJust::Bottom => 0.0,
            VJust::Center => 0.5,
            VJust::Top => 1.0,
        }
    }
}

/// Which point of a region its (x, y) position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Justification {
    pub h: HJust,
    pub v: VJust,
}

impl Justification {
    pub const CENTER: Justification = Justification {
        h: HJust::Center,
        v: VJust::Center,
    };
    pub const LEFT_BOTTOM: Justification = Justification {
        h: HJust::Left,
        v: VJust::Bottom,
    };
    pub const LEFT_TOP: Justification = Justification {
        h: HJust::Left,
        v: VJust::Top,
    };

    /// Parse one or two anchor keywords, in either order.
    ///
    /// A single keyword centers the other axis; `center` may fill either slot.
    pub fn parse(words: &[&str]) -> Result<Self, AnnotateError> {
        let invalid = || AnnotateError::InvalidJustification {
            value: words.join(" "),
        };
        let mut h = None;
        let mut v = None;
        let mut centers = 0;
        for word in words {
            match word.trim().to_ascii_lowercase().as_str() {
                "left" if h.is_none() => h = Some(HJust::Left),
                "right" if h.is_none() => h = Some(HJust::Right),
                "top" if v.is_none() => v = Some(VJust::Top),
                "bottom" if v.is_none() => v = Some(VJust::Bottom),
                "center" | "centre" => centers += 1,
                _ => return Err(invalid()),
            }
        }
        if words.is_empty() || words.len() > 2 {
            return Err(invalid());
        }
        if centers + h.is_some() as usize + v.is_some() as usize != words.len() {
            return Err(invalid());
        }
        Ok(Justification {
            h: h.unwrap_or_default(),
            v: v.unwrap_or_default(),
        })
    }

    /// Offset from the anchor to the bottom-left corner of a `w` x `h` box
    pub fn anchor_offset(self, w: f64, h: f64) -> DVec2 {
        DVec2::new(-self.h.fraction() * w, -self.v.fraction() * h)
    }
}

impl FromStr for Justification {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .collect();
        Justification::parse(&words)
    }
}

/// A rectangular drawable area, as owned by a plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRegion {
    pub x: PhysicalLength,
    pub y: PhysicalLength,
    pub width: PhysicalLength,
    pub height: PhysicalLength,
    pub just: Justification,
    pub xscale: Option<DataScale>,
    pub yscale: Option<DataScale>,
}

impl PlotRegion {
    /// Create a region; zero, negative or non-finite sizes are rejected
    pub fn new(
        x: PhysicalLength,
        y: PhysicalLength,
        width: PhysicalLength,
        height: PhysicalLength,
        just: Justification,
    ) -> Result<Self, AnnotateError> {
        for (axis, len) in [("x", x), ("y", y), ("width", width), ("height", height)] {
            crate::types::check_finite(len.value)
                .map_err(|source| AnnotateError::InvalidNumber { what: axis, source })?;
        }
        for (axis, len) in [("width", width), ("height", height)] {
            if len.is_zero() {
                return Err(AnnotateError::DegenerateRegion { axis });
            }
            if len.value < 0.0 {
                return Err(AnnotateError::InvalidNumber {
                    what: axis,
                    source: NumericError::Negative,
                });
            }
        }
        Ok(Self {
            x,
            y,
            width,
            height,
            just,
            xscale: None,
            yscale: None,
        })
    }

    pub fn with_scales(mut self, xscale: DataScale, yscale: DataScale) -> Self {
        self.xscale = Some(xscale);
        self.yscale = Some(yscale);
        self
    }
}

/// A composed, registered viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub name: String,
    pub parent: Option<String>,
    /// Anchor position in the parent frame, page units
    pub x: f64,
    pub y: f64,
    /// Size in page units
    pub width: f64,
    pub height: f64,
    pub just: Justification,
    pub clip: bool,
    pub xscale: DataScale,
    pub yscale: DataScale,
    /// Rotation relative to the parent
    pub angle: Angle,
    /// Rotation relative to the page
    pub page_angle: Angle,
    transform: DAffine2,
}

impl Viewport {
    /// Map a native data point into this viewport's own frame
    pub fn native_to_local(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            self.xscale.fraction(p.x) * self.width,
            self.yscale.fraction(p.y) * self.height,
        )
    }

    /// Map a native data point to the page's bottom-origin frame
    pub fn native_to_page(&self, p: DVec2) -> DVec2 {
        self.transform.transform_point2(self.native_to_local(p))
    }

    /// Map a point in this viewport's frame to the page's bottom-origin frame
    pub fn local_to_page(&self, p: DVec2) -> DVec2 {
        self.transform.transform_point2(p)
    }

    /// Unrotated bottom-left corner on the page, bottom-origin
    pub fn bottom_left(&self) -> DVec2 {
        self.local_to_page(DVec2::ZERO)
    }

    /// Native extents to page-unit extents (absolute, unrotated)
    pub fn native_size(&self, w: f64, h: f64) -> DVec2 {
        DVec2::new(
            (w / self.xscale.span() * self.width).abs(),
            (h / self.yscale.span() * self.height).abs(),
        )
    }

    /// Corners in top-origin page space, counter-clockwise from the
    /// bottom-left; follows rotation
    pub fn page_corners(&self, page: &Page) -> [DVec2; 4] {
        [
            DVec2::ZERO,
            DVec2::new(self.width, 0.0),
            DVec2::new(self.width, self.height),
            DVec2::new(0.0, self.height),
        ]
        .map(|p| page.flip(self.local_to_page(p)))
    }

    /// Page-space rectangle of an unrotated viewport: top-left corner and size
    pub fn page_rect(&self, page: &Page) -> (DVec2, DVec2) {
        let top_left = page.flip(self.local_to_page(DVec2::new(0.0, self.height)));
        (top_left, DVec2::new(self.width, self.height))
    }
}

/// Everything needed to compose one viewport
#[derive(Debug, Clone)]
pub struct ViewportRequest<'a> {
    /// Name prefix; a numeric suffix is appended
    pub category: &'a str,
    pub region: &'a PlotRegion,
    pub clip: bool,
    /// Overrides the region's own scales
    pub xscale: Option<DataScale>,
    pub yscale: Option<DataScale>,
    pub angle: Angle,
    /// Name of an already registered parent viewport
    pub parent: Option<&'a str>,
}

impl<'a> ViewportRequest<'a> {
    pub fn new(category: &'a str, region: &'a PlotRegion) -> Self {
        Self {
            category,
            region,
            clip: false,
            xscale: None,
            yscale: None,
            angle: Angle::ZERO,
            parent: None,
        }
    }

    pub fn clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    pub fn scales(mut self, xscale: DataScale, yscale: DataScale) -> Self {
        self.xscale = Some(xscale);
        self.yscale = Some(yscale);
        self
    }

    pub fn angle(mut self, angle: Angle) -> Self {
        self.angle = angle;
        self
    }

    pub fn parent(mut self, parent: &'a str) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Frame a region is positioned in: the page or a parent viewport
struct Frame<'a> {
    width: f64,
    height: f64,
    parent: Option<&'a Viewport>,
}

impl Frame<'_> {
    fn position(&self, len: PhysicalLength, axis: Axis, page: &Page) -> Result<f64, AnnotateError> {
        self.convert(len, axis, page, true)
    }

    fn size(&self, len: PhysicalLength, axis: Axis, page: &Page) -> Result<f64, AnnotateError> {
        self.convert(len, axis, page, false)
    }

    fn convert(
        &self,
        len: PhysicalLength,
        axis: Axis,
        page: &Page,
        is_position: bool,
    ) -> Result<f64, AnnotateError> {
        let extent = match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        };
        match len.unit {
            Unit::Npc => Ok(len.value * extent),
            Unit::Native => {
                let parent = self
                    .parent
                    .ok_or(AnnotateError::NativeUnitOutsideViewport { unit: Unit::Native })?;
                let scale = match axis {
                    Axis::X => parent.xscale,
                    Axis::Y => parent.yscale,
                };
                if is_position {
                    Ok(scale.fraction(len.value) * extent)
                } else {
                    Ok((len.value / scale.span()).abs() * extent)
                }
            }
            _ => page.to_page_units(len, axis),
        }
    }
}

/// Compose a viewport from `request` and register it on `page` under the
/// next free name in its category.
pub fn compose_viewport(
    page: &mut Page,
    request: &ViewportRequest<'_>,
) -> Result<Viewport, AnnotateError> {
    let parent = match request.parent {
        Some(name) => Some(page.viewport(name).ok_or_else(|| AnnotateError::UnknownViewport {
            name: name.to_string(),
        })?),
        None => None,
    };
    let frame = match parent {
        Some(p) => Frame {
            width: p.width,
            height: p.height,
            parent: Some(p),
        },
        None => Frame {
            width: page.width(),
            height: page.height(),
            parent: None,
        },
    };

    let region = request.region;
    let x = frame.position(region.x, Axis::X, page)?;
    let y = frame.position(region.y, Axis::Y, page)?;
    let width = frame.size(region.width, Axis::X, page)?;
    let height = frame.size(region.height, Axis::Y, page)?;
    if width == 0.0 {
        return Err(AnnotateError::DegenerateRegion { axis: "width" });
    }
    if height == 0.0 {
        return Err(AnnotateError::DegenerateRegion { axis: "height" });
    }

    let xscale = request.xscale.or(region.xscale).unwrap_or(DataScale::UNIT);
    let yscale = request.yscale.or(region.yscale).unwrap_or(DataScale::UNIT);
    for scale in [xscale, yscale] {
        DataScale::try_new(scale.min, scale.max).map_err(|source| AnnotateError::InvalidNumber {
            what: "data scale",
            source,
        })?;
    }

    let local = DAffine2::from_translation(DVec2::new(x, y))
        * DAffine2::from_angle(request.angle.radians())
        * DAffine2::from_translation(region.just.anchor_offset(width, height));
    let (transform, page_angle) = match parent {
        Some(p) => (p.transform * local, Angle(p.page_angle.0 + request.angle.0)),
        None => (local, request.angle),
    };
    let parent_name = parent.map(|p| p.name.clone());

    let viewport = Viewport {
        name: page.next_viewport_name(request.category),
        parent: parent_name,
        x,
        y,
        width,
        height,
        just: region.just,
        clip: request.clip,
        xscale,
        yscale,
        angle: request.angle,
        page_angle,
        transform,
    };

    crate::log::debug!(
        name = %viewport.name,
        x,
        y,
        width,
        height,
        angle = request.angle.0,
        "viewport composed"
    );
    page.register(viewport.clone());
    Ok(viewport)
}
