//! Rendering backends and the resources created from them.
//!
//! This module is responsible for:
//! - the backend contract (context, target, path geometry, sink)
//! - the two-tier resource lifecycle built on that contract
//! - the wgpu implementation used by the runtime

mod backend;
mod canvas;
mod error;
mod gpu;
mod resources;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{
    ArcSegment, ArcSize, BrushOf, DeviceContext, FigureBegin, FigureEnd, GeometryOf, GeometrySink,
    GraphicsBackend, PathGeometry, PixelSize, RealizedOf, RenderTarget, SweepDirection, TargetOf,
};
pub use canvas::Canvas;
pub use error::{FrameFault, ResourceFault, ResourceKind};
pub use gpu::{
    GpuBrush, GpuContext, GpuGeometrySink, GpuInit, GpuMesh, GpuPathGeometry, GpuTarget,
    WgpuBackend,
};
pub use resources::{DeviceResources, FrameOutcome, LifecycleState, RenderResources, ResourcePlan};
