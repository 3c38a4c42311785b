use kestrel_engine::core::{App, AppControl, FrameCtx};
use kestrel_engine::device::ResourcePlan;
use kestrel_engine::input::{InputEvent, Key};
use kestrel_engine::paint::Color;
use kestrel_engine::scene::{BouncingRectConfig, MovingBody};

/// Orange rectangle moved left and right with the arrow keys.
pub struct RectScene {
    config: BouncingRectConfig,
    body: MovingBody,
}

impl Default for RectScene {
    fn default() -> Self {
        let config = BouncingRectConfig::default();
        Self {
            body: MovingBody::from_config(&config),
            config,
        }
    }
}

impl App for RectScene {
    fn resource_plan(&self) -> ResourcePlan {
        ResourcePlan::new().with_brush("orange", Color::ORANGE)
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let Some(key) = event.pressed_key() else {
            return AppControl::Continue;
        };

        if key == Key::Escape {
            return AppControl::Exit;
        }

        if let Some(direction) = key.horizontal_direction() {
            self.body
                .try_move(direction * self.config.step, self.config.bounds);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let rect = self.body.bounding_rect();
        ctx.render(Color::WHITE, |canvas| {
            canvas.fill_rectangle(rect, "orange");
        });
        AppControl::Continue
    }
}
