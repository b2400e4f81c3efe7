//! Scene assembly and the rendering boundary

use glam::DVec2;

use super::geometry::{Shape, ShapeDescriptor, ShapeStyle};
use crate::errors::AnnotateError;
use crate::page::Page;
use crate::viewport::Viewport;

/// Drawing primitives a backend has to provide.
///
/// Coordinates are page units with the origin at the top-left corner.
pub trait RenderTarget {
    /// Start a group drawn inside `viewport`, clipped to `clip` when given
    fn begin_group(&mut self, _viewport: &Viewport, _clip: Option<&[DVec2; 4]>) {}

    fn end_group(&mut self, _viewport: &Viewport) {}

    /// Closed polygon
    fn polygon(&mut self, points: &[DVec2], style: &ShapeStyle);

    fn circle(&mut self, center: DVec2, radius: f64, style: &ShapeStyle);

    /// Straight line from `from` to `to`
    fn segment(&mut self, from: DVec2, to: DVec2, style: &ShapeStyle);
}

/// Ordered shapes anchored to one viewport
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGroup {
    viewport: Viewport,
    shapes: Vec<ShapeDescriptor>,
}

impl SceneGroup {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: impl Into<ShapeDescriptor>) {
        self.shapes.push(shape.into());
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Shapes in insertion order
    pub fn shapes(&self) -> &[ShapeDescriptor] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes whose bounds miss the viewport's data scales
    pub fn outside_scales(&self) -> usize {
        let (x, y) = (self.viewport.xscale, self.viewport.yscale);
        self.shapes
            .iter()
            .filter(|shape| {
                let (lo, hi) = shape.bounds();
                !(x.overlaps(lo.x, hi.x) && y.overlaps(lo.y, hi.y))
            })
            .count()
    }

    /// Draw every shape, in order, inside one group
    pub fn render(&self, page: &Page, target: &mut dyn RenderTarget) -> Result<(), AnnotateError> {
        let clip = self.viewport.clip.then(|| self.viewport.page_corners(page));
        target.begin_group(&self.viewport, clip.as_ref());
        for shape in &self.shapes {
            shape.emit(&self.viewport, page, target)?;
        }
        target.end_group(&self.viewport);
        Ok(())
    }
}

impl Extend<ShapeDescriptor> for SceneGroup {
    fn extend<I: IntoIterator<Item = ShapeDescriptor>>(&mut self, iter: I) {
        self.shapes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SceneGroup {
    type Item = &'a ShapeDescriptor;
    type IntoIter = std::slice::Iter<'a, ShapeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::geometry::{BoxShape, CircleShape};
    use crate::half::PlotHalf;
    use crate::page::PageOptions;
    use crate::types::{Color, DataScale, PhysicalLength};
    use crate::viewport::{Justification, PlotRegion, ViewportRequest, compose_viewport};
    use glam::dvec2;

    #[derive(Default)]
    struct Recorder {
        ops: Vec<String>,
    }

    impl RenderTarget for Recorder {
        fn begin_group(&mut self, viewport: &Viewport, clip: Option<&[DVec2; 4]>) {
            self.ops.push(format!("begin {} clip={}", viewport.name, clip.is_some()));
        }

        fn end_group(&mut self, viewport: &Viewport) {
            self.ops.push(format!("end {}", viewport.name));
        }

        fn polygon(&mut self, points: &[DVec2], _style: &ShapeStyle) {
            let pts: Vec<String> = points.iter().map(|p| format!("({},{})", p.x, p.y)).collect();
            self.ops.push(format!("polygon {}", pts.join(" ")));
        }

        fn circle(&mut self, center: DVec2, radius: f64, _style: &ShapeStyle) {
            self.ops.push(format!("circle ({},{}) r={radius}", center.x, center.y));
        }

        fn segment(&mut self, from: DVec2, to: DVec2, _style: &ShapeStyle) {
            self.ops.push(format!("segment ({},{})-({},{})", from.x, from.y, to.x, to.y));
        }
    }

    fn style() -> ShapeStyle {
        ShapeStyle {
            stroke: Color::named("black"),
            fill: Color::None,
            line_width: 1.0,
            alpha: 1.0,
        }
    }

    #[test]
    fn renders_in_insertion_order_inside_a_clip_group() {
        let mut page = Page::new(PageOptions::default()).unwrap();
        let region = PlotRegion::new(
            PhysicalLength::inches(1.0),
            PhysicalLength::inches(1.0),
            PhysicalLength::inches(4.0),
            PhysicalLength::inches(4.0),
            Justification::LEFT_BOTTOM,
        )
        .unwrap()
        .with_scales(
            DataScale::try_new(0.0, 400.0).unwrap(),
            DataScale::try_new(0.0, 400.0).unwrap(),
        );
        let vp = compose_viewport(&mut page, &ViewportRequest::new("loopAnnotation", &region).clip(true))
            .unwrap();

        let mut scene = SceneGroup::new(vp);
        scene.push(CircleShape {
            center: dvec2(200.0, 200.0),
            radius: 50.0,
            placement: PlotHalf::Top,
            style: style(),
        });
        scene.push(BoxShape {
            center: dvec2(100.0, 300.0),
            side: 100.0,
            placement: PlotHalf::Top,
            style: style(),
        });

        let mut rec = Recorder::default();
        scene.render(&page, &mut rec).unwrap();
        insta::assert_snapshot!(rec.ops.join("\n"), @r"
        begin loopAnnotation1 clip=true
        circle (3,8) r=0.5
        polygon (1.5,7.5) (2.5,7.5) (2.5,6.5) (1.5,6.5)
        end loopAnnotation1
        ");
    }

    #[test]
    fn counts_shapes_that_miss_the_scales() {
        let mut page = Page::new(PageOptions::default()).unwrap();
        let region = PlotRegion::new(
            PhysicalLength::inches(1.0),
            PhysicalLength::inches(1.0),
            PhysicalLength::inches(4.0),
            PhysicalLength::inches(4.0),
            Justification::LEFT_BOTTOM,
        )
        .unwrap()
        .with_scales(
            DataScale::try_new(0.0, 400.0).unwrap(),
            DataScale::try_new(0.0, 400.0).unwrap(),
        );
        let vp = compose_viewport(&mut page, &ViewportRequest::new("loopAnnotation", &region))
            .unwrap();

        let mut scene = SceneGroup::new(vp);
        for center in [dvec2(200.0, 200.0), dvec2(420.0, 200.0), dvec2(600.0, 200.0)] {
            scene.push(BoxShape {
                center,
                side: 100.0,
                placement: PlotHalf::Top,
                style: style(),
            });
        }
        assert_eq!(scene.outside_scales(), 1);
    }
}
