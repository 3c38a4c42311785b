//! Path geometry construction.
//!
//! A [`PathFigure`] is a backend-agnostic primitive list. It is streamed into
//! a backend geometry once, at resource creation time, through the
//! backend's write-once sink.

mod build;
mod fighter;
mod figure;

pub use build::{build_path_geometry, create_figure_geometry};
pub use fighter::fighter_silhouette;
pub use figure::{FigureBuilder, PathFigure, PathPrimitive};
