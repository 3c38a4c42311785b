use crate::coords::{Mat3, Rect, Vec2};
use crate::paint::Color;

use super::error::{FrameFault, ResourceFault};

/// Target size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// How a figure starts: filled or hollow.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FigureBegin {
    Filled,
    Hollow,
}

/// How a figure ends: closed back to its start point or left open.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FigureEnd {
    Closed,
    Open,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SweepDirection {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArcSize {
    Small,
    Large,
}

/// Elliptical arc from the current point to `end`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcSegment {
    pub end: Vec2,
    /// Ellipse radii `(rx, ry)`.
    pub radii: Vec2,
    /// Ellipse x-axis rotation, in degrees.
    pub rotation_deg: f32,
    pub sweep: SweepDirection,
    pub size: ArcSize,
}

/// Entry point into a graphics backend.
pub trait GraphicsBackend {
    type Context: DeviceContext;

    /// Acquires the device-independent capability (factory / instance).
    fn create_device_independent_context(&mut self) -> Result<Self::Context, ResourceFault>;
}

/// Device-independent capability.
///
/// Outlives device loss; everything it creates through
/// [`create_surface_target`](Self::create_surface_target) does not.
pub trait DeviceContext {
    type Geometry: PathGeometry;
    type Target: RenderTarget<Geometry = Self::Geometry>;

    fn create_surface_target(&mut self, size: PixelSize) -> Result<Self::Target, ResourceFault>;

    /// Creates an empty, device-independent path geometry.
    fn create_path_geometry(&mut self) -> Result<Self::Geometry, ResourceFault>;
}

/// Device-independent path geometry, filled once through a sink.
pub trait PathGeometry {
    type Sink<'g>: GeometrySink
    where
        Self: 'g;

    /// Opens the write-once sink. Fails if the geometry was already filled.
    fn open(&mut self) -> Result<Self::Sink<'_>, ResourceFault>;

    /// `true` once a sink has been closed successfully.
    fn is_closed(&self) -> bool;
}

/// Write-only, append-only primitive stream for one geometry.
///
/// `close` consumes the sink; the geometry becomes immutable afterwards.
pub trait GeometrySink {
    fn begin_figure(&mut self, start: Vec2, begin: FigureBegin);
    fn line_to(&mut self, point: Vec2);
    fn curve_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2);
    fn arc_to(&mut self, arc: &ArcSegment);
    fn end_figure(&mut self, end: FigureEnd);
    fn close(self) -> Result<(), ResourceFault>;
}

/// Surface-bound render target and the device-dependent factory for brushes
/// and realized geometry.
pub trait RenderTarget {
    type Brush;
    type Geometry;
    type Realized;

    fn create_solid_color_brush(&mut self, color: Color) -> Result<Self::Brush, ResourceFault>;

    /// Uploads a closed path geometry for drawing on this target.
    fn realize_geometry(&mut self, geometry: &Self::Geometry) -> Result<Self::Realized, ResourceFault>;

    fn resize(&mut self, size: PixelSize);

    fn begin_frame(&mut self);
    fn clear(&mut self, color: Color);
    fn set_transform(&mut self, transform: Mat3);
    fn fill_rectangle(&mut self, rect: Rect, brush: &Self::Brush);
    fn draw_line(&mut self, p0: Vec2, p1: Vec2, brush: &Self::Brush, width: f32);
    fn fill_geometry(&mut self, geometry: &Self::Realized, brush: &Self::Brush);

    /// Presents the frame.
    fn end_frame(&mut self) -> Result<(), FrameFault>;
}

/// Geometry type produced by a backend's context.
pub type GeometryOf<B> = <<B as GraphicsBackend>::Context as DeviceContext>::Geometry;
/// Render target type produced by a backend's context.
pub type TargetOf<B> = <<B as GraphicsBackend>::Context as DeviceContext>::Target;
/// Brush type produced by a backend's render target.
pub type BrushOf<B> = <TargetOf<B> as RenderTarget>::Brush;
/// Realized geometry type produced by a backend's render target.
pub type RealizedOf<B> = <TargetOf<B> as RenderTarget>::Realized;
