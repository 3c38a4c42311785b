use std::collections::HashMap;

use crate::coords::{Mat3, Rect, Vec2};

use super::backend::{BrushOf, GraphicsBackend, RealizedOf, RenderTarget, TargetOf};

/// Per-frame drawing surface.
///
/// Borrows the live target together with the brushes and realized geometry
/// created for it. The borrow ends with the frame, so no handle can be kept
/// across a discard. Only drawing calls are exposed; frame begin / end and
/// resizing stay with [`RenderResources`](super::RenderResources).
pub struct Canvas<'a, B: GraphicsBackend> {
    pub(super) target: &'a mut TargetOf<B>,
    pub(super) brushes: &'a HashMap<&'static str, BrushOf<B>>,
    pub(super) geometries: &'a HashMap<&'static str, RealizedOf<B>>,
}

impl<'a, B: GraphicsBackend> Canvas<'a, B> {
    #[inline]
    pub fn brush(&self, name: &str) -> Option<&BrushOf<B>> {
        self.brushes.get(name)
    }

    #[inline]
    pub fn geometry(&self, name: &str) -> Option<&RealizedOf<B>> {
        self.geometries.get(name)
    }

    #[inline]
    pub fn set_transform(&mut self, transform: Mat3) {
        self.target.set_transform(transform);
    }

    /// Fills `rect` with the named brush. Returns `false` if the brush does not exist.
    pub fn fill_rectangle(&mut self, rect: Rect, brush: &str) -> bool {
        let Some(brush) = self.brushes.get(brush) else { return false };
        self.target.fill_rectangle(rect, brush);
        true
    }

    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, brush: &str, width: f32) -> bool {
        let Some(brush) = self.brushes.get(brush) else { return false };
        self.target.draw_line(p0, p1, brush, width);
        true
    }

    /// Fills a named geometry. Geometry that failed to build is skipped.
    pub fn fill_geometry(&mut self, geometry: &str, brush: &str) -> bool {
        let (Some(geometry), Some(brush)) = (self.geometries.get(geometry), self.brushes.get(brush))
        else {
            return false;
        };
        self.target.fill_geometry(geometry, brush);
        true
    }
}
