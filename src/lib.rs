//! Planar 2D Physics
//!
//! A 2D rigid body physics and collision engine operating over entities in
//! a [`hecs::World`]. The scene layer owns the entities; the engine reads
//! and mutates their [`Transform`] and [`Body`] components one fixed step
//! at a time.
//!
//! # Architecture
//!
//! - `math`: shared numeric tolerances
//! - `shape`: circle, polygon, and polyline geometry with cached boundary paths
//! - `ecs`: `Transform` and `Body` components
//! - `physics`: integrator, pairwise narrowphase (SAT), impulse solver
//!
//! # Example
//!
//! ```
//! use planar::{Body, PhysicsConfig, PhysicsWorld, Shape, Transform};
//! use planar::glam::Vec2;
//!
//! let mut world = hecs::World::new();
//! world.spawn((
//!     Body::new(Shape::circle(5.0)),
//!     Transform::from_position(Vec2::new(0.0, -50.0)),
//! ));
//! world.spawn((
//!     Body::new_fixed(Shape::rect(200.0, 10.0)),
//!     Transform::from_position(Vec2::new(0.0, 5.0)),
//! ));
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig {
//!     gravity: Vec2::new(0.0, 981.0),
//!     ..Default::default()
//! });
//! physics.step(&mut world, 1.0 / 240.0);
//! ```

pub mod ecs;
pub mod math;
pub mod physics;
pub mod shape;

// Re-export commonly used types
pub use ecs::components::physics::Body;
pub use ecs::components::transform::Transform;
pub use physics::contact::{Collision, ContactInfo};
pub use physics::{PhysicsConfig, PhysicsWorld};
pub use shape::{Path, PathCommand, Shape, ShapeKind};

// Re-export glam for convenience
pub use glam;
