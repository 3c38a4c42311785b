use kestrel_engine::coords::{Mat3, Rect, Vec2};
use kestrel_engine::core::{App, AppControl, FrameCtx};
use kestrel_engine::device::ResourcePlan;
use kestrel_engine::geometry::fighter_silhouette;
use kestrel_engine::input::InputEvent;
use kestrel_engine::paint::Color;
use kestrel_engine::scene::{FighterConfig, FighterPose};

/// Fighter silhouette over a cross-hair; any key quits.
pub struct FighterScene {
    pose: FighterPose,
}

impl Default for FighterScene {
    fn default() -> Self {
        Self {
            pose: FighterPose::new(FighterConfig::default()),
        }
    }
}

impl App for FighterScene {
    fn resource_plan(&self) -> ResourcePlan {
        ResourcePlan::new()
            .with_brush("sky", Color::DEEP_SKY_BLUE)
            .with_brush("black", Color::BLACK)
            .with_brush("green", Color::LAWN_GREEN)
            .with_figure("fighter", fighter_silhouette())
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match event.pressed_key() {
            Some(_) => AppControl::Exit,
            None => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.pose.advance(ctx.time.dt);

        let (w, h) = ctx.window.logical_size();
        let center = ctx.window.logical_center();
        let transform = self.pose.transform(center);

        ctx.render(Color::WHITE, |canvas| {
            canvas.set_transform(Mat3::IDENTITY);
            canvas.fill_rectangle(Rect::new(0.0, 0.0, w, h), "sky");
            canvas.draw_line(Vec2::new(center.x, 0.0), Vec2::new(center.x, h), "black", 1.0);
            canvas.draw_line(Vec2::new(0.0, center.y), Vec2::new(w, center.y), "black", 1.0);

            canvas.set_transform(transform);
            if !canvas.fill_geometry("fighter", "green") {
                log::trace!("fighter geometry unavailable");
            }
        });
        AppControl::Continue
    }
}
