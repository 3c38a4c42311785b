use crate::coords::{Rect, Vec2};

/// Settings for the bouncing-rectangle scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BouncingRectConfig {
    /// Area the body's leading edge must stay inside.
    pub bounds: Rect,
    pub start: Vec2,
    pub velocity: Vec2,
    pub extent: Vec2,
    /// Direction magnitude applied per key press.
    pub step: f32,
}

impl Default for BouncingRectConfig {
    fn default() -> Self {
        let bounds = Rect::new(0.0, 0.0, 1280.0, 1024.0);
        Self {
            bounds,
            start: bounds.center(),
            velocity: Vec2::new(10.0, 0.0),
            extent: Vec2::new(200.0, 200.0),
            step: 1.0,
        }
    }
}

/// Result of [`MovingBody::try_move`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MoveOutcome {
    Moved { from: Vec2, to: Vec2 },
    /// The leading-edge probe left the bounds; position is unchanged.
    Rejected { probe: Vec2 },
}

impl MoveOutcome {
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Boundary policy: a probe point is allowed when it lies inside `bounds`,
/// edges included.
#[inline]
pub fn boundary_allows(probe: Vec2, bounds: Rect) -> bool {
    bounds.contains_inclusive(probe)
}

/// Axis-aligned body moved in discrete steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingBody {
    position: Vec2,
    velocity: Vec2,
    extent: Vec2,
}

impl MovingBody {
    pub fn new(position: Vec2, velocity: Vec2, extent: Vec2) -> Self {
        Self {
            position,
            velocity,
            extent,
        }
    }

    pub fn from_config(config: &BouncingRectConfig) -> Self {
        Self::new(config.start, config.velocity, config.extent)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Filled area, centered on the position.
    pub fn bounding_rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.extent)
    }

    /// Point tested against the bounds for a move in `direction`.
    ///
    /// `position + direction * (velocity.x + extent.x / 2, velocity.y)`: the
    /// step is pushed out by half the width so the leading edge, not the
    /// center, is what has to stay inside.
    pub fn probe(&self, direction: f32) -> Vec2 {
        let reach = Vec2::new(self.velocity.x + self.extent.x / 2.0, self.velocity.y);
        self.position + reach * direction
    }

    /// Moves by `velocity * direction` if the probe stays inside `bounds`.
    ///
    /// All or nothing: a rejected move leaves the position untouched; there is
    /// no clamping to the boundary.
    pub fn try_move(&mut self, direction: f32, bounds: Rect) -> MoveOutcome {
        let probe = self.probe(direction);
        if !boundary_allows(probe, bounds) {
            log::debug!(
                "move rejected: probe ({}, {}) outside bounds",
                probe.x,
                probe.y
            );
            return MoveOutcome::Rejected { probe };
        }

        let from = self.position;
        self.position += self.velocity * direction;
        MoveOutcome::Moved {
            from,
            to: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_body() -> (MovingBody, Rect) {
        let config = BouncingRectConfig::default();
        (MovingBody::from_config(&config), config.bounds)
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_config_matches_reference_scene() {
        let config = BouncingRectConfig::default();
        assert_eq!(config.start, Vec2::new(640.0, 512.0));
        assert_eq!(config.velocity, Vec2::new(10.0, 0.0));
        assert_eq!(config.extent, Vec2::new(200.0, 200.0));
        assert_eq!(config.step, 1.0);
    }

    // ── boundary policy ───────────────────────────────────────────────────

    #[test]
    fn boundary_includes_edges() {
        let bounds = Rect::new(0.0, 0.0, 1280.0, 1024.0);
        assert!(boundary_allows(Vec2::new(1280.0, 512.0), bounds));
        assert!(boundary_allows(Vec2::new(0.0, 0.0), bounds));
        assert!(!boundary_allows(Vec2::new(1280.5, 512.0), bounds));
        assert!(!boundary_allows(Vec2::new(-0.5, 512.0), bounds));
    }

    // ── moves ─────────────────────────────────────────────────────────────

    #[test]
    fn single_step_right() {
        let (mut body, bounds) = reference_body();
        let outcome = body.try_move(1.0, bounds);

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: Vec2::new(640.0, 512.0),
                to: Vec2::new(650.0, 512.0)
            }
        );
        assert_eq!(body.position(), Vec2::new(650.0, 512.0));
    }

    #[test]
    fn probe_includes_half_extent() {
        let (body, _) = reference_body();
        assert_eq!(body.probe(1.0), Vec2::new(750.0, 512.0));
        assert_eq!(body.probe(-1.0), Vec2::new(530.0, 512.0));
    }

    #[test]
    fn moving_right_stops_at_last_accepted_position() {
        let (mut body, bounds) = reference_body();
        let mut moves = 0;
        while body.try_move(1.0, bounds).is_moved() {
            moves += 1;
            assert!(moves < 1000, "body never stopped");
        }

        // From 1170 the probe lands exactly on the right edge (accepted);
        // from 1180 it would reach 1290.
        assert_eq!(moves, 54);
        assert_eq!(body.position(), Vec2::new(1180.0, 512.0));

        let before = body.position();
        let outcome = body.try_move(1.0, bounds);
        assert_eq!(outcome, MoveOutcome::Rejected { probe: Vec2::new(1290.0, 512.0) });
        assert_eq!(body.position(), before);
    }

    #[test]
    fn moving_left_stops_symmetrically() {
        let (mut body, bounds) = reference_body();
        while body.try_move(-1.0, bounds).is_moved() {}

        assert_eq!(body.position(), Vec2::new(100.0, 512.0));
        assert!(!body.try_move(-1.0, bounds).is_moved());
    }

    #[test]
    fn rejected_move_can_be_followed_by_opposite_move() {
        let (mut body, bounds) = reference_body();
        body.set_position(Vec2::new(1180.0, 512.0));
        assert!(!body.try_move(1.0, bounds).is_moved());
        assert!(body.try_move(-1.0, bounds).is_moved());
        assert_eq!(body.position(), Vec2::new(1170.0, 512.0));
    }

    #[test]
    fn vertical_velocity_rejects_moves_off_top_and_bottom() {
        let bounds = BouncingRectConfig::default().bounds;
        let extent = Vec2::new(200.0, 200.0);

        let mut near_top = MovingBody::new(Vec2::new(640.0, 20.0), Vec2::new(0.0, -30.0), extent);
        assert_eq!(
            near_top.try_move(1.0, bounds),
            MoveOutcome::Rejected { probe: Vec2::new(740.0, -10.0) }
        );
        assert_eq!(near_top.position(), Vec2::new(640.0, 20.0));
        assert!(near_top.try_move(-1.0, bounds).is_moved());
        assert_eq!(near_top.position(), Vec2::new(640.0, 50.0));

        let mut near_bottom =
            MovingBody::new(Vec2::new(640.0, 1000.0), Vec2::new(0.0, 30.0), extent);
        assert_eq!(
            near_bottom.try_move(1.0, bounds),
            MoveOutcome::Rejected { probe: Vec2::new(740.0, 1030.0) }
        );
        assert_eq!(near_bottom.position(), Vec2::new(640.0, 1000.0));
        assert!(near_bottom.try_move(-1.0, bounds).is_moved());
        assert_eq!(near_bottom.position(), Vec2::new(640.0, 970.0));
    }

    #[test]
    fn bounding_rect_is_centered() {
        let (body, _) = reference_body();
        assert_eq!(body.bounding_rect(), Rect::new(540.0, 412.0, 200.0, 200.0));
    }

    #[test]
    fn fractional_step_scales_displacement() {
        let (mut body, bounds) = reference_body();
        body.try_move(0.5, bounds);
        assert_eq!(body.position(), Vec2::new(645.0, 512.0));
    }
}
