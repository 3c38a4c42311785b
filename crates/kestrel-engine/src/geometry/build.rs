use crate::device::{DeviceContext, GeometrySink, PathGeometry, ResourceFault};

use super::PathFigure;

/// Fills `geometry` with `figure` through a write-once sink.
///
/// The sink is opened first; if that fails nothing is appended and the
/// geometry stays empty. On success the sink is closed and released, leaving
/// the geometry immutable.
pub fn build_path_geometry<G: PathGeometry>(
    geometry: &mut G,
    figure: &PathFigure,
) -> Result<(), ResourceFault> {
    let mut sink = geometry.open()?;
    figure.replay(&mut sink);
    sink.close()
}

/// Creates a new path geometry on `context` and fills it with `figure`.
///
/// Returns the geometry only when it was closed successfully; a partially
/// built geometry is dropped.
pub fn create_figure_geometry<C: DeviceContext>(
    context: &mut C,
    figure: &PathFigure,
) -> Result<C::Geometry, ResourceFault> {
    let mut geometry = context.create_path_geometry()?;
    build_path_geometry(&mut geometry, figure)?;
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::{MockBackend, MockContext, RecordedPrimitive};
    use crate::device::{FigureBegin, FigureEnd, GraphicsBackend, ResourceKind};
    use crate::geometry::fighter_silhouette;

    fn context(backend: &MockBackend) -> MockContext {
        let mut backend = backend.clone();
        backend
            .create_device_independent_context()
            .expect("mock context")
    }

    #[test]
    fn fighter_geometry_has_one_begin_and_one_close() {
        let backend = MockBackend::default();
        let mut ctx = context(&backend);

        let geometry = create_figure_geometry(&mut ctx, &fighter_silhouette()).unwrap();
        assert!(geometry.is_closed());

        let prims = geometry.primitives();
        let begins = prims
            .iter()
            .filter(|p| matches!(p, RecordedPrimitive::Begin(_, FigureBegin::Filled)))
            .count();
        let ends = prims
            .iter()
            .filter(|p| matches!(p, RecordedPrimitive::End(_)))
            .count();
        assert_eq!(begins, 1);
        assert_eq!(ends, 1);
        assert_eq!(prims.last(), Some(&RecordedPrimitive::End(FigureEnd::Closed)));
        assert_eq!(backend.stats().sinks_closed, 1);
    }

    #[test]
    fn fighter_geometry_primitive_sequence() {
        let backend = MockBackend::default();
        let mut ctx = context(&backend);
        let geometry = create_figure_geometry(&mut ctx, &fighter_silhouette()).unwrap();

        let kinds: Vec<&str> = geometry.primitives().iter().map(RecordedPrimitive::kind).collect();
        assert_eq!(
            kinds,
            ["begin", "line", "curve", "arc", "curve", "line", "line", "curve", "line", "end"]
        );
    }

    #[test]
    fn failed_open_leaves_no_geometry() {
        let backend = MockBackend::default();
        backend.fail_next(ResourceKind::GeometrySink);
        let mut ctx = context(&backend);

        let err = create_figure_geometry(&mut ctx, &fighter_silhouette()).unwrap_err();
        assert_eq!(err.kind(), Some(ResourceKind::GeometrySink));
        assert_eq!(backend.stats().sinks_closed, 0);
    }

    #[test]
    fn closed_geometry_cannot_be_reopened() {
        let backend = MockBackend::default();
        let mut ctx = context(&backend);
        let mut geometry = create_figure_geometry(&mut ctx, &fighter_silhouette()).unwrap();

        assert!(build_path_geometry(&mut geometry, &fighter_silhouette()).is_err());
        assert_eq!(geometry.primitives().len(), 10);
    }
}
