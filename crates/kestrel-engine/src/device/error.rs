use std::fmt;

use thiserror::Error;

/// Backend object categories, used to tag creation faults.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    /// Device-independent context (instance / factory).
    Context,
    /// Surface-bound render target.
    Target,
    /// Solid color brush.
    Brush,
    /// Device-independent path geometry.
    PathGeometry,
    /// Write-once sink used to fill a path geometry.
    GeometrySink,
    /// Path geometry realized for the current device.
    RealizedGeometry,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Context => "device-independent context",
            ResourceKind::Target => "render target",
            ResourceKind::Brush => "solid color brush",
            ResourceKind::PathGeometry => "path geometry",
            ResourceKind::GeometrySink => "geometry sink",
            ResourceKind::RealizedGeometry => "realized geometry",
        };
        f.write_str(name)
    }
}

/// A backend refused to create a resource.
///
/// Recoverable: the frame that hit it is skipped and creation is retried on
/// the next frame.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceFault {
    #[error("failed to create {kind}: {reason}")]
    Creation { kind: ResourceKind, reason: String },

    #[error("device-independent resources have not been created")]
    NotInitialized,
}

impl ResourceFault {
    pub fn creation(kind: ResourceKind, reason: impl fmt::Display) -> Self {
        ResourceFault::Creation {
            kind,
            reason: reason.to_string(),
        }
    }

    /// The resource category, when the fault came from a creation call.
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            ResourceFault::Creation { kind, .. } => Some(*kind),
            ResourceFault::NotInitialized => None,
        }
    }
}

/// Failure reported when ending (presenting) a frame.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameFault {
    /// The target is no longer usable; device-dependent resources must be rebuilt.
    #[error("render target lost; device-dependent resources must be recreated")]
    DeviceLost,

    /// Transient presentation failure; the frame is dropped.
    #[error("frame not presented: {0}")]
    Other(String),
}
