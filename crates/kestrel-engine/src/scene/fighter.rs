use crate::coords::{Mat3, Vec2};

/// Settings for the fighter scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterConfig {
    /// Uniform scale from silhouette units to logical pixels.
    pub scale: f32,
    /// Fixed rotation applied before any spin, in degrees.
    pub base_rotation_deg: f32,
    /// Continuous rotation rate; `0.0` keeps the silhouette still.
    pub spin_deg_per_sec: f32,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            scale: 25.0,
            base_rotation_deg: 180.0,
            spin_deg_per_sec: 0.0,
        }
    }
}

/// Orientation state of the fighter silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterPose {
    config: FighterConfig,
    spin_deg: f32,
}

impl FighterPose {
    pub fn new(config: FighterConfig) -> Self {
        Self {
            config,
            spin_deg: 0.0,
        }
    }

    /// Advances the spin by `dt` seconds, wrapped to `[0, 360)`.
    pub fn advance(&mut self, dt: f32) {
        self.spin_deg = (self.spin_deg + self.config.spin_deg_per_sec * dt).rem_euclid(360.0);
    }

    pub fn rotation_deg(&self) -> f32 {
        self.config.base_rotation_deg + self.spin_deg
    }

    /// Local-to-scene transform placing the silhouette at `center`.
    ///
    /// Rotation first, then scale, then translation.
    pub fn transform(&self, center: Vec2) -> Mat3 {
        Mat3::translation_by(center)
            * Mat3::scale(self.config.scale, self.config.scale)
            * Mat3::rotation(self.rotation_deg())
    }
}
