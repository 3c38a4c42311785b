//! wgpu implementation of the backend traits.
//!
//! - context: the `wgpu::Instance`
//! - target: surface, adapter/device/queue and the fill pipeline
//! - path geometry: a lyon path, tessellated when realized on a target

mod backend;
mod geometry;
mod init;
mod pipeline;
mod surface;
mod target;

pub use backend::{GpuContext, WgpuBackend};
pub use geometry::{GpuGeometrySink, GpuPathGeometry};
pub use init::GpuInit;
pub use target::{GpuBrush, GpuMesh, GpuTarget};
