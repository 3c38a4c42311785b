use lyon_geom::{point, vector, Angle, ArcFlags};
use lyon_path::builder::{SvgPathBuilder, WithSvg};
use lyon_path::path::BuilderImpl;
use lyon_path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, TessellationError, VertexBuffers,
};

use crate::coords::Vec2;
use crate::device::backend::{
    ArcSegment, ArcSize, FigureBegin, FigureEnd, GeometrySink, PathGeometry, SweepDirection,
};
use crate::device::error::{ResourceFault, ResourceKind};

/// Device-independent path geometry backed by a lyon path.
///
/// Empty until a sink is closed; immutable afterwards.
#[derive(Debug, Default)]
pub struct GpuPathGeometry {
    path: Option<Path>,
}

impl GpuPathGeometry {
    pub(super) fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
}

impl PathGeometry for GpuPathGeometry {
    type Sink<'g> = GpuGeometrySink<'g>;

    fn open(&mut self) -> Result<GpuGeometrySink<'_>, ResourceFault> {
        if self.path.is_some() {
            return Err(ResourceFault::creation(
                ResourceKind::GeometrySink,
                "geometry already closed",
            ));
        }
        Ok(GpuGeometrySink {
            geometry: self,
            builder: Path::svg_builder(),
            skipping: false,
        })
    }

    fn is_closed(&self) -> bool {
        self.path.is_some()
    }
}

/// Streams primitives into a lyon SVG-style builder.
///
/// Hollow figures have no fill area and are dropped as they arrive.
pub struct GpuGeometrySink<'g> {
    geometry: &'g mut GpuPathGeometry,
    builder: WithSvg<BuilderImpl>,
    skipping: bool,
}

impl GeometrySink for GpuGeometrySink<'_> {
    fn begin_figure(&mut self, start: Vec2, begin: FigureBegin) {
        self.skipping = begin == FigureBegin::Hollow;
        if !self.skipping {
            self.builder.move_to(point(start.x, start.y));
        }
    }

    fn line_to(&mut self, p: Vec2) {
        if !self.skipping {
            self.builder.line_to(point(p.x, p.y));
        }
    }

    fn curve_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2) {
        if !self.skipping {
            self.builder.cubic_bezier_to(
                point(control1.x, control1.y),
                point(control2.x, control2.y),
                point(end.x, end.y),
            );
        }
    }

    fn arc_to(&mut self, arc: &ArcSegment) {
        if self.skipping {
            return;
        }
        let flags = ArcFlags {
            large_arc: arc.size == ArcSize::Large,
            sweep: arc.sweep == SweepDirection::Clockwise,
        };
        self.builder.arc_to(
            vector(arc.radii.x, arc.radii.y),
            Angle::degrees(arc.rotation_deg),
            flags,
            point(arc.end.x, arc.end.y),
        );
    }

    fn end_figure(&mut self, end: FigureEnd) {
        if !self.skipping && end == FigureEnd::Closed {
            self.builder.close();
        }
        self.skipping = false;
    }

    fn close(self) -> Result<(), ResourceFault> {
        self.geometry.path = Some(self.builder.build());
        Ok(())
    }
}

/// Triangulates the filled area of `path`.
pub(super) fn tessellate_fill(
    path: &Path,
    tolerance: f32,
) -> Result<VertexBuffers<[f32; 2], u32>, TessellationError> {
    let mut geom: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let options = FillOptions::default()
        .with_tolerance(tolerance)
        .with_fill_rule(lyon_tessellation::FillRule::NonZero);

    FillTessellator::new().tessellate_path(
        path.as_slice(),
        &options,
        &mut BuffersBuilder::new(&mut geom, |fv: FillVertex| {
            let p = fv.position();
            [p.x, p.y]
        }),
    )?;

    Ok(geom)
}
