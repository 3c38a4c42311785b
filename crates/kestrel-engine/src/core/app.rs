use crate::device::ResourcePlan;
use crate::input::InputEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Brushes and figures the runtime creates on the app's behalf.
    ///
    /// Queried once, before the first frame.
    fn resource_plan(&self) -> ResourcePlan;

    /// Called for each translated keyboard event, between frames.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
