use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use winit::window::Window;

use crate::coords::{rad_to_deg, Mat3, Rect, Vec2, Viewport};
use crate::device::backend::{PixelSize, RenderTarget};
use crate::device::error::{FrameFault, ResourceFault, ResourceKind};
use crate::paint::Color;

use super::geometry::{tessellate_fill, GpuPathGeometry};
use super::init::GpuInit;
use super::pipeline::{FillDraw, FillInstance, FillPipeline, Mesh, MeshVertex, QUAD_INDICES, QUAD_VERTICES};
use super::surface;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Solid color brush, valid only on the target that created it.
#[derive(Debug, Clone)]
pub struct GpuBrush {
    color: [f32; 4],
    generation: u64,
}

/// Tessellated path geometry uploaded to one target's device.
#[derive(Debug)]
pub struct GpuMesh {
    /// `None` when the path has no fill area.
    mesh: Option<Mesh>,
    generation: u64,
}

impl GpuMesh {
    pub fn index_count(&self) -> u32 {
        self.mesh.as_ref().map_or(0, |m| m.index_count)
    }
}

/// Window surface plus the device that renders into it.
///
/// Everything here is device-dependent: a lost surface or device means the
/// whole target is dropped and created again. Draw calls are recorded and
/// encoded as one pass in [`end_frame`](RenderTarget::end_frame).
pub struct GpuTarget {
    pipeline: FillPipeline,
    quad: Mesh,
    draws: Vec<FillDraw>,
    transform: Mat3,
    clear: wgpu::Color,

    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    window: Arc<Window>,

    lost: Arc<AtomicBool>,
    linear_colors: bool,
    tolerance: f32,
    generation: u64,
}

impl GpuTarget {
    pub(super) fn create(
        instance: &wgpu::Instance,
        window: Arc<Window>,
        size: PixelSize,
        init: &GpuInit,
    ) -> Result<Self, ResourceFault> {
        let fault = |reason: &dyn std::fmt::Display| ResourceFault::creation(ResourceKind::Target, reason);

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| fault(&e))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| fault(&e))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("kestrel device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| fault(&e))?;

        let lost = Arc::new(AtomicBool::new(false));
        let flag = lost.clone();
        device.set_device_lost_callback(move |reason, message| {
            flag.store(true, Ordering::Release);
            match reason {
                wgpu::DeviceLostReason::Destroyed => log::debug!("device destroyed: {message}"),
                _ => log::warn!("device lost ({reason:?}): {message}"),
            }
        });

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .ok_or_else(|| fault(&"no supported surface formats"))?;
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        let info = adapter.get_info();
        log::info!(
            "render target on {} ({:?}), format {:?}",
            info.name,
            info.backend,
            format
        );

        let pipeline = FillPipeline::new(&device, format);
        let quad = Mesh::upload(&device, "kestrel quad", &QUAD_VERTICES, &QUAD_INDICES);

        Ok(Self {
            pipeline,
            quad,
            draws: Vec::new(),
            transform: Mat3::IDENTITY,
            clear: wgpu::Color::TRANSPARENT,
            surface,
            config,
            device,
            queue,
            window,
            lost,
            linear_colors: format.is_srgb(),
            tolerance: init.tessellation_tolerance,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Scene size in logical pixels.
    fn viewport(&self) -> Viewport {
        Viewport::from_physical(self.config.width, self.config.height, self.window.scale_factor())
    }

    fn surface_color(&self, color: Color) -> Color {
        if self.linear_colors {
            color.to_linear()
        } else {
            color
        }
    }

    fn owns(&self, generation: u64) -> bool {
        if generation != self.generation {
            log::warn!("ignoring a handle created for another render target");
            return false;
        }
        true
    }

    fn push(&mut self, mesh: &Mesh, local: Mat3, brush: &GpuBrush) {
        self.draws.push(FillDraw {
            mesh: mesh.clone(),
            instance: FillInstance::new(&(self.transform * local), brush.color),
        });
    }
}

impl RenderTarget for GpuTarget {
    type Brush = GpuBrush;
    type Geometry = GpuPathGeometry;
    type Realized = GpuMesh;

    fn create_solid_color_brush(&mut self, color: Color) -> Result<GpuBrush, ResourceFault> {
        if !color.is_finite() {
            return Err(ResourceFault::creation(ResourceKind::Brush, "non-finite color"));
        }
        Ok(GpuBrush {
            color: self.surface_color(color).to_array(),
            generation: self.generation,
        })
    }

    fn realize_geometry(&mut self, geometry: &GpuPathGeometry) -> Result<GpuMesh, ResourceFault> {
        let fault = |reason: &dyn std::fmt::Display| {
            ResourceFault::creation(ResourceKind::RealizedGeometry, reason)
        };

        let path = geometry.path().ok_or_else(|| fault(&"geometry was never closed"))?;
        let tess = tessellate_fill(path, self.tolerance).map_err(|e| fault(&e))?;

        let mesh = if tess.indices.is_empty() {
            None
        } else {
            let vertices: Vec<MeshVertex> =
                tess.vertices.iter().map(|&pos| MeshVertex { pos }).collect();
            Some(Mesh::upload(&self.device, "kestrel path", &vertices, &tess.indices))
        };

        Ok(GpuMesh {
            mesh,
            generation: self.generation,
        })
    }

    fn resize(&mut self, size: PixelSize) {
        if size.is_empty() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn begin_frame(&mut self) {
        self.draws.clear();
        self.transform = Mat3::IDENTITY;
        self.clear = wgpu::Color::TRANSPARENT;
    }

    fn clear(&mut self, color: Color) {
        let c = self.surface_color(color);
        self.clear = wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        };
    }

    fn set_transform(&mut self, transform: Mat3) {
        self.transform = transform;
    }

    fn fill_rectangle(&mut self, rect: Rect, brush: &GpuBrush) {
        if !self.owns(brush.generation) {
            return;
        }
        if let Some(local) = rect_transform(rect) {
            let quad = self.quad.clone();
            self.push(&quad, local, brush);
        }
    }

    fn draw_line(&mut self, p0: Vec2, p1: Vec2, brush: &GpuBrush, width: f32) {
        if !self.owns(brush.generation) {
            return;
        }
        if let Some(local) = line_transform(p0, p1, width) {
            let quad = self.quad.clone();
            self.push(&quad, local, brush);
        }
    }

    fn fill_geometry(&mut self, geometry: &GpuMesh, brush: &GpuBrush) {
        if !self.owns(brush.generation) || !self.owns(geometry.generation) {
            return;
        }
        if let Some(mesh) = &geometry.mesh {
            self.push(mesh, Mat3::IDENTITY, brush);
        }
    }

    fn end_frame(&mut self) -> Result<(), FrameFault> {
        let draws = std::mem::take(&mut self.draws);

        if self.lost.load(Ordering::Acquire) {
            return Err(FrameFault::DeviceLost);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                let sized = self.config.width > 0 && self.config.height > 0;
                if surface::needs_reconfigure(&err) && sized {
                    self.surface.configure(&self.device, &self.config);
                }
                return Err(surface::frame_fault(err));
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kestrel frame encoder"),
            });

        let viewport = self.viewport();
        self.pipeline.encode(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            viewport,
            self.clear,
            &draws,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();

        // Keep the allocation for the next frame.
        self.draws = draws;
        self.draws.clear();
        Ok(())
    }
}

/// Maps the unit quad onto `rect`. `None` for an empty rectangle.
fn rect_transform(rect: Rect) -> Option<Mat3> {
    let r = rect.normalized();
    if r.is_empty() {
        return None;
    }
    Some(Mat3::translation_by(r.origin) * Mat3::scale(r.size.x, r.size.y))
}

/// Maps the unit quad onto a band of `width` centered on the segment `p0 -> p1`.
///
/// `None` for a zero-length segment or a non-positive width.
fn line_transform(p0: Vec2, p1: Vec2, width: f32) -> Option<Mat3> {
    let d = p1 - p0;
    let length = d.magnitude();
    if length <= f32::EPSILON || width <= 0.0 {
        return None;
    }
    let angle = rad_to_deg(d.y.atan2(d.x));
    Some(
        Mat3::translation_by(p0)
            * Mat3::rotation(angle)
            * Mat3::scale(length, width)
            * Mat3::translation(0.0, -0.5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < TOL && (a.y - b.y).abs() < TOL
    }

    // ── rectangles ────────────────────────────────────────────────────────

    #[test]
    fn rect_transform_maps_unit_corners() {
        let m = rect_transform(Rect::new(540.0, 412.0, 200.0, 200.0)).unwrap();
        assert!(close(m * Vec2::new(0.0, 0.0), Vec2::new(540.0, 412.0)));
        assert!(close(m * Vec2::new(1.0, 1.0), Vec2::new(740.0, 612.0)));
    }

    #[test]
    fn negative_rect_is_normalized() {
        let m = rect_transform(Rect::new(10.0, 10.0, -10.0, -10.0)).unwrap();
        assert!(close(m * Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)));
        assert!(close(m * Vec2::new(1.0, 1.0), Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn empty_rect_draws_nothing() {
        assert!(rect_transform(Rect::new(0.0, 0.0, 0.0, 5.0)).is_none());
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn horizontal_line_band() {
        let m = line_transform(Vec2::new(0.0, 100.0), Vec2::new(50.0, 100.0), 2.0).unwrap();
        assert!(close(m * Vec2::new(0.0, 0.0), Vec2::new(0.0, 99.0)));
        assert!(close(m * Vec2::new(1.0, 1.0), Vec2::new(50.0, 101.0)));
    }

    #[test]
    fn vertical_line_band() {
        let m = line_transform(Vec2::new(20.0, 0.0), Vec2::new(20.0, 30.0), 4.0).unwrap();
        // Axis midpoint of the band lands on the segment.
        assert!(close(m * Vec2::new(0.0, 0.5), Vec2::new(20.0, 0.0)));
        assert!(close(m * Vec2::new(1.0, 0.5), Vec2::new(20.0, 30.0)));
        let across = (m * Vec2::new(0.5, 1.0)) - (m * Vec2::new(0.5, 0.0));
        assert!((across.magnitude() - 4.0).abs() < TOL);
    }

    #[test]
    fn degenerate_lines_draw_nothing() {
        let p = Vec2::new(3.0, 3.0);
        assert!(line_transform(p, p, 1.0).is_none());
        assert!(line_transform(p, Vec2::new(4.0, 3.0), 0.0).is_none());
    }
}
