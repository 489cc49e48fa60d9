//! hecs component definitions for simulated entities.
//!
//! The scene layer owns the [`hecs::World`] and spawns entities; the physics
//! pipeline only borrows it per step.

pub mod components;

pub mod prelude {
    pub use super::components::physics::Body;
    pub use super::components::transform::Transform;
}
