use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{GpuInit, PixelSize, RenderResources, WgpuBackend};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "kestrel".to_string(),
            initial_size: LogicalSize::new(1280.0, 1024.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct WindowEntry {
    // Dropped before `window`: the surface must not outlive its window.
    resources: RenderResources<WgpuBackend>,
    input: InputState,
    clock: FrameClock,
    window: Arc<Window>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let backend = WgpuBackend::new(window.clone(), self.gpu_init.clone());
        let mut resources = RenderResources::new(
            backend,
            self.app.resource_plan(),
            pixel_size(window.inner_size()),
        );
        resources
            .create_device_independent_resources()
            .context("failed to create device-independent resources")?;

        Ok(WindowEntry {
            resources,
            input: InputState::default(),
            clock: FrameClock::default(),
            window,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let time = entry.clock.tick();

        // Minimized: keep the clock running but draw nothing.
        if entry.resources.size().is_empty() {
            return;
        }

        let mut ctx = FrameCtx {
            window: WindowCtx {
                window: &entry.window,
            },
            resources: &mut entry.resources,
            time,
        };

        if self.app.on_frame(&mut ctx) == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.entry.as_mut() {
            entry.clock.reset();
            entry.window.request_redraw();
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.window.request_redraw();
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.fatal = Some(e);
                self.request_exit(event_loop);
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Surfaces are invalid while suspended; rebuilt on the next redraw.
        if let Some(entry) = self.entry.as_mut() {
            entry.resources.discard();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(entry) = self.entry.as_ref() {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&entry.input, &event) {
            entry.input.apply_event(&ev);
            if self.app.on_input(&ev) == AppControl::Exit {
                self.request_exit(event_loop);
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.resources.resize(pixel_size(new_size));
                entry.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                entry.resources.resize(pixel_size(new_size));
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GPU resources while the window is still alive.
        self.entry = None;
    }
}

fn pixel_size(size: PhysicalSize<u32>) -> PixelSize {
    PixelSize::new(size.width, size.height)
}
