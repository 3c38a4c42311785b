//! Scripted in-memory backend for unit tests.
//!
//! Every handle shares one call log and counter set, so tests can assert on
//! creation order and on how many handles were released. Creation failures
//! and device loss are injected through [`MockBackend`].

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::coords::{Mat3, Rect, Vec2};
use crate::paint::Color;

use super::backend::{
    ArcSegment, DeviceContext, FigureBegin, FigureEnd, GeometrySink, GraphicsBackend,
    PathGeometry, PixelSize, RenderTarget,
};
use super::error::{FrameFault, ResourceFault, ResourceKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockStats {
    pub contexts_created: usize,
    pub targets_created: usize,
    pub targets_dropped: usize,
    pub brushes_created: usize,
    pub brushes_dropped: usize,
    pub geometries_created: usize,
    pub sinks_closed: usize,
    pub realized_created: usize,
    pub realized_dropped: usize,
    pub frames_presented: usize,
}

impl MockStats {
    /// Device-dependent handles currently alive.
    pub fn live_device_handles(&self) -> usize {
        (self.targets_created - self.targets_dropped)
            + (self.brushes_created - self.brushes_dropped)
            + (self.realized_created - self.realized_dropped)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    CreateContext,
    CreateTarget(PixelSize),
    CreateBrush(Color),
    CreateGeometry,
    RealizeGeometry,
    Resize(PixelSize),
    BeginFrame,
    Clear(Color),
    SetTransform(Mat3),
    FillRectangle(Rect),
    DrawLine(Vec2, Vec2, f32),
    FillGeometry,
    EndFrame,
}

#[derive(Debug, Default)]
struct Shared {
    stats: MockStats,
    calls: Vec<MockCall>,
    fail_once: HashSet<ResourceKind>,
    fail_always: HashSet<ResourceKind>,
    next_frame_fault: Option<FrameFault>,
    next_target_id: u32,
}

impl Shared {
    fn check(&mut self, kind: ResourceKind) -> Result<(), ResourceFault> {
        if self.fail_once.remove(&kind) || self.fail_always.contains(&kind) {
            return Err(ResourceFault::creation(kind, "injected failure"));
        }
        Ok(())
    }
}

type SharedRef = Rc<RefCell<Shared>>;

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    shared: SharedRef,
}

impl MockBackend {
    pub fn stats(&self) -> MockStats {
        self.shared.borrow().stats.clone()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.shared.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.shared.borrow_mut().calls.clear();
    }

    /// Fails the next creation of `kind`, once.
    pub fn fail_next(&self, kind: ResourceKind) {
        self.shared.borrow_mut().fail_once.insert(kind);
    }

    /// Fails every creation of `kind` until [`clear_failures`](Self::clear_failures).
    pub fn fail_always(&self, kind: ResourceKind) {
        self.shared.borrow_mut().fail_always.insert(kind);
    }

    pub fn clear_failures(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.fail_once.clear();
        shared.fail_always.clear();
    }

    /// The next `end_frame` reports `fault` instead of presenting.
    pub fn fail_next_present(&self, fault: FrameFault) {
        self.shared.borrow_mut().next_frame_fault = Some(fault);
    }
}

impl GraphicsBackend for MockBackend {
    type Context = MockContext;

    fn create_device_independent_context(&mut self) -> Result<MockContext, ResourceFault> {
        let mut shared = self.shared.borrow_mut();
        shared.check(ResourceKind::Context)?;
        shared.calls.push(MockCall::CreateContext);
        shared.stats.contexts_created += 1;
        Ok(MockContext {
            shared: self.shared.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MockContext {
    shared: SharedRef,
}

impl DeviceContext for MockContext {
    type Geometry = MockGeometry;
    type Target = MockTarget;

    fn create_surface_target(&mut self, size: PixelSize) -> Result<MockTarget, ResourceFault> {
        let mut shared = self.shared.borrow_mut();
        shared.check(ResourceKind::Target)?;
        shared.calls.push(MockCall::CreateTarget(size));
        shared.stats.targets_created += 1;
        shared.next_target_id += 1;
        Ok(MockTarget {
            shared: self.shared.clone(),
            id: shared.next_target_id,
            size,
        })
    }

    fn create_path_geometry(&mut self) -> Result<MockGeometry, ResourceFault> {
        let mut shared = self.shared.borrow_mut();
        shared.check(ResourceKind::PathGeometry)?;
        shared.calls.push(MockCall::CreateGeometry);
        shared.stats.geometries_created += 1;
        Ok(MockGeometry {
            shared: self.shared.clone(),
            primitives: Vec::new(),
            closed: false,
        })
    }
}

/// Primitive as received by a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPrimitive {
    Begin(Vec2, FigureBegin),
    Line(Vec2),
    Curve(Vec2, Vec2, Vec2),
    Arc(ArcSegment),
    End(FigureEnd),
}

impl RecordedPrimitive {
    pub fn kind(&self) -> &'static str {
        match self {
            RecordedPrimitive::Begin(..) => "begin",
            RecordedPrimitive::Line(_) => "line",
            RecordedPrimitive::Curve(..) => "curve",
            RecordedPrimitive::Arc(_) => "arc",
            RecordedPrimitive::End(_) => "end",
        }
    }
}

/// Stand-alone sink that only records; closing always succeeds.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub primitives: Vec<RecordedPrimitive>,
}

impl GeometrySink for RecordingSink {
    fn begin_figure(&mut self, start: Vec2, begin: FigureBegin) {
        self.primitives.push(RecordedPrimitive::Begin(start, begin));
    }

    fn line_to(&mut self, point: Vec2) {
        self.primitives.push(RecordedPrimitive::Line(point));
    }

    fn curve_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2) {
        self.primitives.push(RecordedPrimitive::Curve(control1, control2, end));
    }

    fn arc_to(&mut self, arc: &ArcSegment) {
        self.primitives.push(RecordedPrimitive::Arc(*arc));
    }

    fn end_figure(&mut self, end: FigureEnd) {
        self.primitives.push(RecordedPrimitive::End(end));
    }

    fn close(self) -> Result<(), ResourceFault> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockGeometry {
    shared: SharedRef,
    primitives: Vec<RecordedPrimitive>,
    closed: bool,
}

impl MockGeometry {
    pub fn primitives(&self) -> &[RecordedPrimitive] {
        &self.primitives
    }
}

impl PathGeometry for MockGeometry {
    type Sink<'g> = MockSink<'g>;

    fn open(&mut self) -> Result<MockSink<'_>, ResourceFault> {
        if self.closed {
            return Err(ResourceFault::creation(
                ResourceKind::GeometrySink,
                "geometry already closed",
            ));
        }
        self.shared.borrow_mut().check(ResourceKind::GeometrySink)?;
        Ok(MockSink {
            geometry: self,
            recorder: RecordingSink::default(),
        })
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Buffers primitives and commits them to the geometry on `close`.
pub struct MockSink<'g> {
    geometry: &'g mut MockGeometry,
    recorder: RecordingSink,
}

impl GeometrySink for MockSink<'_> {
    fn begin_figure(&mut self, start: Vec2, begin: FigureBegin) {
        self.recorder.begin_figure(start, begin);
    }

    fn line_to(&mut self, point: Vec2) {
        self.recorder.line_to(point);
    }

    fn curve_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2) {
        self.recorder.curve_to(control1, control2, end);
    }

    fn arc_to(&mut self, arc: &ArcSegment) {
        self.recorder.arc_to(arc);
    }

    fn end_figure(&mut self, end: FigureEnd) {
        self.recorder.end_figure(end);
    }

    fn close(self) -> Result<(), ResourceFault> {
        self.geometry.primitives = self.recorder.primitives;
        self.geometry.closed = true;
        self.geometry.shared.borrow_mut().stats.sinks_closed += 1;
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockTarget {
    shared: SharedRef,
    id: u32,
    size: PixelSize,
}

impl MockTarget {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    fn record(&self, call: MockCall) {
        self.shared.borrow_mut().calls.push(call);
    }
}

impl Drop for MockTarget {
    fn drop(&mut self) {
        self.shared.borrow_mut().stats.targets_dropped += 1;
    }
}

#[derive(Debug)]
pub struct MockBrush {
    shared: SharedRef,
    pub color: Color,
    pub target_id: u32,
}

impl Drop for MockBrush {
    fn drop(&mut self) {
        self.shared.borrow_mut().stats.brushes_dropped += 1;
    }
}

#[derive(Debug)]
pub struct MockRealized {
    shared: SharedRef,
    pub target_id: u32,
    pub primitive_count: usize,
}

impl Drop for MockRealized {
    fn drop(&mut self) {
        self.shared.borrow_mut().stats.realized_dropped += 1;
    }
}

impl RenderTarget for MockTarget {
    type Brush = MockBrush;
    type Geometry = MockGeometry;
    type Realized = MockRealized;

    fn create_solid_color_brush(&mut self, color: Color) -> Result<MockBrush, ResourceFault> {
        let mut shared = self.shared.borrow_mut();
        shared.check(ResourceKind::Brush)?;
        shared.calls.push(MockCall::CreateBrush(color));
        shared.stats.brushes_created += 1;
        Ok(MockBrush {
            shared: self.shared.clone(),
            color,
            target_id: self.id,
        })
    }

    fn realize_geometry(&mut self, geometry: &MockGeometry) -> Result<MockRealized, ResourceFault> {
        let mut shared = self.shared.borrow_mut();
        shared.check(ResourceKind::RealizedGeometry)?;
        if !geometry.closed {
            return Err(ResourceFault::creation(
                ResourceKind::RealizedGeometry,
                "geometry was never closed",
            ));
        }
        shared.calls.push(MockCall::RealizeGeometry);
        shared.stats.realized_created += 1;
        Ok(MockRealized {
            shared: self.shared.clone(),
            target_id: self.id,
            primitive_count: geometry.primitives.len(),
        })
    }

    fn resize(&mut self, size: PixelSize) {
        self.size = size;
        self.record(MockCall::Resize(size));
    }

    fn begin_frame(&mut self) {
        self.record(MockCall::BeginFrame);
    }

    fn clear(&mut self, color: Color) {
        self.record(MockCall::Clear(color));
    }

    fn set_transform(&mut self, transform: Mat3) {
        self.record(MockCall::SetTransform(transform));
    }

    fn fill_rectangle(&mut self, rect: Rect, brush: &MockBrush) {
        assert_eq!(brush.target_id, self.id, "brush from a released target");
        self.record(MockCall::FillRectangle(rect));
    }

    fn draw_line(&mut self, p0: Vec2, p1: Vec2, brush: &MockBrush, width: f32) {
        assert_eq!(brush.target_id, self.id, "brush from a released target");
        self.record(MockCall::DrawLine(p0, p1, width));
    }

    fn fill_geometry(&mut self, geometry: &MockRealized, brush: &MockBrush) {
        assert_eq!(brush.target_id, self.id, "brush from a released target");
        assert_eq!(geometry.target_id, self.id, "geometry from a released target");
        self.record(MockCall::FillGeometry);
    }

    fn end_frame(&mut self) -> Result<(), FrameFault> {
        let mut shared = self.shared.borrow_mut();
        shared.calls.push(MockCall::EndFrame);
        if let Some(fault) = shared.next_frame_fault.take() {
            return Err(fault);
        }
        shared.stats.frames_presented += 1;
        Ok(())
    }
}
