//! Collision records produced by the narrowphase.

use glam::Vec2;

/// Entity-free result of a single shape-pair test.
#[derive(Debug, Clone, Copy)]
pub struct ContactInfo {
    /// Unit normal pointing from shape A toward shape B.
    pub normal: Vec2,
    /// Contact location in world space.
    pub point: Vec2,
    /// Overlap depth along the normal. A non-overlapping pair produces no
    /// record rather than a non-positive depth.
    pub penetration: f32,
}

/// A detected collision between two entities.
///
/// Holds entity ids rather than references, so records can outlive the
/// borrow of the world they were detected in.
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    pub entity_a: hecs::Entity,
    pub entity_b: hecs::Entity,
    /// Unit normal pointing from `entity_a` toward `entity_b`.
    pub normal: Vec2,
    /// Contact location in world space.
    pub point: Vec2,
    pub penetration: f32,
}
