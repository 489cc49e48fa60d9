//! 2D affine transform component.

use glam::Vec2;

use crate::math::is_near_zero;

/// Translation, rotation, and non-uniform scale for one entity.
///
/// An entity's world position *is* `translation`; there is no separate
/// position field to keep synchronized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }

    pub fn from_position(position: Vec2) -> Self {
        Self {
            translation: position,
            ..Self::identity()
        }
    }

    /// Map a shape-local point into world space: scale, then rotate, then
    /// translate.
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        let scaled = point * self.scale;
        let rotated = if is_near_zero(self.rotation) {
            scaled
        } else {
            Vec2::from_angle(self.rotation).rotate(scaled)
        };
        rotated + self.translation
    }
}
