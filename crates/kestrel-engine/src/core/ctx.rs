use winit::window::Window;

use crate::coords::Vec2;
use crate::device::{Canvas, FrameOutcome, RenderResources, WgpuBackend};
use crate::paint::Color;
use crate::time::FrameTime;

/// Window handle and size queries.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    /// Center of the client area in logical pixels.
    pub fn logical_center(&self) -> Vec2 {
        let (w, h) = self.logical_size();
        Vec2::new(w * 0.5, h * 0.5)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub resources: &'a mut RenderResources<WgpuBackend>,
    pub time: FrameTime,
}

impl<'a> FrameCtx<'a> {
    /// Clears to `clear`, calls `draw` with the frame's [`Canvas`], then presents.
    ///
    /// Scene coordinates are logical pixels.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> FrameOutcome
    where
        F: FnOnce(&mut Canvas<'_, WgpuBackend>),
    {
        let outcome = self.resources.render_frame(clear, draw);
        if outcome == FrameOutcome::DeviceLost {
            // Rebuild on the next redraw rather than waiting for input.
            self.window.window.request_redraw();
        }
        outcome
    }
}
