use std::collections::HashMap;

use crate::geometry::{create_figure_geometry, PathFigure};
use crate::paint::Color;

use super::backend::{
    BrushOf, DeviceContext, GeometryOf, GraphicsBackend, PixelSize, RealizedOf, RenderTarget,
    TargetOf,
};
use super::canvas::Canvas;
use super::error::{FrameFault, ResourceFault};

/// Where the manager is in its resource lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    Uninitialized,
    DeviceIndependentReady,
    DeviceDependentReady,
}

/// Result of one pass through [`RenderResources::render_frame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// Resources were not ready or presentation failed transiently.
    Skipped,
    /// The target was lost; device-dependent resources were discarded.
    DeviceLost,
}

/// Named brushes and figures a scene needs.
#[derive(Debug, Clone, Default)]
pub struct ResourcePlan {
    brushes: Vec<(&'static str, Color)>,
    figures: Vec<(&'static str, PathFigure)>,
}

impl ResourcePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brush(mut self, name: &'static str, color: Color) -> Self {
        self.brushes.push((name, color));
        self
    }

    pub fn with_figure(mut self, name: &'static str, figure: PathFigure) -> Self {
        self.figures.push((name, figure));
        self
    }

    pub fn brushes(&self) -> &[(&'static str, Color)] {
        &self.brushes
    }

    pub fn figures(&self) -> &[(&'static str, PathFigure)] {
        &self.figures
    }
}

/// Device-dependent tier: target plus everything created from it.
pub struct DeviceResources<B: GraphicsBackend> {
    // Declaration order is drop order: handles go before their target.
    brushes: HashMap<&'static str, BrushOf<B>>,
    geometries: HashMap<&'static str, RealizedOf<B>>,
    target: TargetOf<B>,
}

impl<B: GraphicsBackend> DeviceResources<B> {
    pub fn target(&self) -> &TargetOf<B> {
        &self.target
    }

    pub fn brush(&self, name: &str) -> Option<&BrushOf<B>> {
        self.brushes.get(name)
    }

    pub fn geometry(&self, name: &str) -> Option<&RealizedOf<B>> {
        self.geometries.get(name)
    }

    fn canvas(&mut self) -> Canvas<'_, B> {
        Canvas {
            target: &mut self.target,
            brushes: &self.brushes,
            geometries: &self.geometries,
        }
    }
}

/// Owns the two resource tiers of a window and moves between them.
///
/// - device-independent: the backend context and the path geometries built
///   from the plan's figures; created once, released at drop.
/// - device-dependent: target, brushes, realized geometry; all present or
///   all absent, rebuilt lazily after every [`discard`](Self::discard).
pub struct RenderResources<B: GraphicsBackend> {
    device: Option<DeviceResources<B>>,
    geometries: Vec<(&'static str, GeometryOf<B>)>,
    context: Option<B::Context>,
    backend: B,
    plan: ResourcePlan,
    size: PixelSize,
    failed_attempts: u64,
}

impl<B: GraphicsBackend> RenderResources<B> {
    pub fn new(backend: B, plan: ResourcePlan, size: PixelSize) -> Self {
        Self {
            device: None,
            geometries: Vec::new(),
            context: None,
            backend,
            plan,
            size,
            failed_attempts: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        match (&self.context, &self.device) {
            (None, _) => LifecycleState::Uninitialized,
            (Some(_), None) => LifecycleState::DeviceIndependentReady,
            (Some(_), Some(_)) => LifecycleState::DeviceDependentReady,
        }
    }

    /// Current target size in physical pixels.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Live device-dependent tier, if any.
    pub fn device_resources(&self) -> Option<&DeviceResources<B>> {
        self.device.as_ref()
    }

    /// Names of the figures whose geometry was built successfully.
    pub fn built_geometries(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.geometries.iter().map(|(name, _)| *name)
    }

    /// Acquires the backend context and builds every planned figure.
    ///
    /// A figure whose geometry cannot be built is logged and left out; it is
    /// never drawn. Only a context failure is an error.
    ///
    /// # Panics
    /// Panics (debug only) when called a second time.
    pub fn create_device_independent_resources(&mut self) -> Result<(), ResourceFault> {
        debug_assert!(
            self.context.is_none(),
            "device-independent resources created twice"
        );
        if self.context.is_some() {
            return Ok(());
        }

        let mut context = self
            .backend
            .create_device_independent_context()
            .inspect_err(|e| log::warn!("{e}"))?;

        for (name, figure) in &self.plan.figures {
            match create_figure_geometry(&mut context, figure) {
                Ok(geometry) => self.geometries.push((*name, geometry)),
                Err(e) => log::warn!("geometry '{name}' unavailable: {e}"),
            }
        }

        log::info!(
            "device-independent resources ready ({} of {} geometries built)",
            self.geometries.len(),
            self.plan.figures.len()
        );
        self.context = Some(context);
        Ok(())
    }

    /// Makes sure the device-dependent tier exists and returns it.
    ///
    /// Idempotent while resources are live. Otherwise creates the target,
    /// then every brush, then realizes every built geometry; the first
    /// failure drops whatever was created so far and leaves the manager in
    /// `DeviceIndependentReady`.
    pub fn ensure_device_dependent_resources(
        &mut self,
    ) -> Result<&mut DeviceResources<B>, ResourceFault> {
        let device = match self.device.take() {
            Some(device) => device,
            None => match self.create_device_resources() {
                Ok(device) => {
                    self.failed_attempts = 0;
                    device
                }
                Err(e) => {
                    if self.failed_attempts == 0 {
                        log::warn!("device-dependent resources not ready: {e}");
                    } else {
                        log::debug!("device-dependent resources still not ready: {e}");
                    }
                    self.failed_attempts += 1;
                    return Err(e);
                }
            },
        };
        Ok(self.device.insert(device))
    }

    fn create_device_resources(&mut self) -> Result<DeviceResources<B>, ResourceFault> {
        let context = self.context.as_mut().ok_or(ResourceFault::NotInitialized)?;

        let mut target = context.create_surface_target(self.size)?;

        let mut brushes = HashMap::with_capacity(self.plan.brushes.len());
        for (name, color) in &self.plan.brushes {
            brushes.insert(*name, target.create_solid_color_brush(*color)?);
        }

        let mut geometries = HashMap::with_capacity(self.geometries.len());
        for (name, geometry) in &self.geometries {
            geometries.insert(*name, target.realize_geometry(geometry)?);
        }

        log::info!(
            "device-dependent resources created ({}x{}, {} brushes, {} geometries)",
            self.size.width,
            self.size.height,
            brushes.len(),
            geometries.len()
        );

        Ok(DeviceResources {
            brushes,
            geometries,
            target,
        })
    }

    /// Releases the device-dependent tier. No-op when it is already absent.
    pub fn discard(&mut self) {
        if self.device.take().is_some() {
            log::info!("device-dependent resources discarded");
        }
    }

    /// Records a new target size and applies it to the live target.
    ///
    /// A zero-area size is remembered but not applied.
    pub fn resize(&mut self, size: PixelSize) {
        self.size = size;
        if size.is_empty() {
            return;
        }
        if let Some(device) = self.device.as_mut() {
            device.target.resize(size);
        }
    }

    /// Runs one frame: ensure resources, clear, draw, present.
    ///
    /// A lost target discards the device-dependent tier so the next frame
    /// rebuilds it; any other failure just drops this frame.
    pub fn render_frame<F>(&mut self, clear: Color, draw: F) -> FrameOutcome
    where
        F: FnOnce(&mut Canvas<'_, B>),
    {
        let Ok(device) = self.ensure_device_dependent_resources() else {
            return FrameOutcome::Skipped;
        };

        device.target.begin_frame();
        device.target.clear(clear);
        draw(&mut device.canvas());

        match device.target.end_frame() {
            Ok(()) => FrameOutcome::Presented,
            Err(FrameFault::DeviceLost) => {
                log::warn!("render target lost; rebuilding device-dependent resources next frame");
                self.discard();
                FrameOutcome::DeviceLost
            }
            Err(FrameFault::Other(reason)) => {
                log::debug!("frame dropped: {reason}");
                FrameOutcome::Skipped
            }
        }
    }
}
