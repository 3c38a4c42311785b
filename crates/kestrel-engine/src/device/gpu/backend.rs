use std::sync::Arc;

use winit::window::Window;

use crate::device::backend::{DeviceContext, GraphicsBackend, PixelSize};
use crate::device::error::ResourceFault;

use super::geometry::GpuPathGeometry;
use super::init::GpuInit;
use super::target::GpuTarget;

/// wgpu backend bound to one window.
pub struct WgpuBackend {
    window: Arc<Window>,
    init: GpuInit,
}

impl WgpuBackend {
    pub fn new(window: Arc<Window>, init: GpuInit) -> Self {
        Self { window, init }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl GraphicsBackend for WgpuBackend {
    type Context = GpuContext;

    fn create_device_independent_context(&mut self) -> Result<GpuContext, ResourceFault> {
        // Use all backends to allow wgpu to select the optimal platform backend.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        Ok(GpuContext {
            instance,
            window: self.window.clone(),
            init: self.init.clone(),
        })
    }
}

/// The wgpu instance; survives surface and device loss.
pub struct GpuContext {
    instance: wgpu::Instance,
    window: Arc<Window>,
    init: GpuInit,
}

impl DeviceContext for GpuContext {
    type Geometry = GpuPathGeometry;
    type Target = GpuTarget;

    fn create_surface_target(&mut self, size: PixelSize) -> Result<GpuTarget, ResourceFault> {
        GpuTarget::create(&self.instance, self.window.clone(), size, &self.init)
    }

    fn create_path_geometry(&mut self) -> Result<GpuPathGeometry, ResourceFault> {
        Ok(GpuPathGeometry::default())
    }
}
