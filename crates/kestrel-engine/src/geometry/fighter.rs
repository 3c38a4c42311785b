use crate::coords::Vec2;
use crate::device::{ArcSegment, ArcSize, SweepDirection};

use super::PathFigure;

/// Fighter jet silhouette in local units, roughly 10 wide and 9 tall, nose
/// toward +Y.
///
/// Segment order: line, bezier, arc, bezier, line, line, bezier, line.
pub fn fighter_silhouette() -> PathFigure {
    PathFigure::builder(Vec2::new(-5.0, 0.0))
        .line_to(Vec2::new(-5.0, 1.0))
        .curve_to(Vec2::new(-4.5, 2.0), Vec2::new(-3.5, 3.5), Vec2::new(-1.0, 5.0))
        .arc_to(ArcSegment {
            end: Vec2::new(1.0, 5.0),
            radii: Vec2::new(1.0, 4.0),
            rotation_deg: 0.0,
            sweep: SweepDirection::CounterClockwise,
            size: ArcSize::Large,
        })
        .curve_to(Vec2::new(2.0, 4.5), Vec2::new(3.5, 3.5), Vec2::new(5.0, 1.0))
        .line_to(Vec2::new(5.0, 0.0))
        .line_to(Vec2::new(0.5, -1.0))
        .curve_to(Vec2::new(0.5, -1.0), Vec2::new(0.0, -4.0), Vec2::new(-0.5, -1.0))
        .line_to(Vec2::new(-5.0, 0.0))
        .close()
}
