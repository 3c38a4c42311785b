use crate::coords::Vec2;
use crate::device::{ArcSegment, FigureBegin, FigureEnd, GeometrySink};

/// A single drawing primitive of a path figure.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathPrimitive {
    BeginAt(Vec2),
    LineTo(Vec2),
    /// Cubic Bezier segment.
    CurveTo {
        control1: Vec2,
        control2: Vec2,
        end: Vec2,
    },
    ArcTo(ArcSegment),
    Close,
}

/// Ordered, immutable sequence of primitives describing one closed, filled
/// figure.
///
/// Always starts with `BeginAt` and ends with a single `Close`. Built with
/// [`FigureBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathFigure {
    primitives: Vec<PathPrimitive>,
}

impl PathFigure {
    pub fn builder(start: Vec2) -> FigureBuilder {
        FigureBuilder {
            primitives: vec![PathPrimitive::BeginAt(start)],
        }
    }

    #[inline]
    pub fn primitives(&self) -> &[PathPrimitive] {
        &self.primitives
    }

    /// Streams the figure into `sink` as one filled, closed figure.
    ///
    /// The sink is not closed; the caller owns that step.
    pub fn replay<S: GeometrySink>(&self, sink: &mut S) {
        for primitive in &self.primitives {
            match *primitive {
                PathPrimitive::BeginAt(p) => sink.begin_figure(p, FigureBegin::Filled),
                PathPrimitive::LineTo(p) => sink.line_to(p),
                PathPrimitive::CurveTo { control1, control2, end } => {
                    sink.curve_to(control1, control2, end)
                }
                PathPrimitive::ArcTo(arc) => sink.arc_to(&arc),
                PathPrimitive::Close => sink.end_figure(FigureEnd::Closed),
            }
        }
    }
}

/// Appends segments to a figure; [`close`](Self::close) seals it.
#[derive(Debug)]
pub struct FigureBuilder {
    primitives: Vec<PathPrimitive>,
}

impl FigureBuilder {
    pub fn line_to(mut self, point: Vec2) -> Self {
        self.primitives.push(PathPrimitive::LineTo(point));
        self
    }

    pub fn curve_to(mut self, control1: Vec2, control2: Vec2, end: Vec2) -> Self {
        self.primitives.push(PathPrimitive::CurveTo { control1, control2, end });
        self
    }

    pub fn arc_to(mut self, arc: ArcSegment) -> Self {
        self.primitives.push(PathPrimitive::ArcTo(arc));
        self
    }

    pub fn close(mut self) -> PathFigure {
        self.primitives.push(PathPrimitive::Close);
        PathFigure {
            primitives: self.primitives,
        }
    }
}
