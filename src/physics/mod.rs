//! CPU 2D rigid body physics pipeline.
//!
//! # Architecture
//!
//! Each fixed step runs to completion, single-threaded:
//!
//! 1. Apply inter-body gravitational attraction
//! 2. Integrate forces, velocities, positions (semi-implicit Euler)
//! 3. Exhaustive pairwise narrowphase detection, nudging overlapping
//!    bodies apart as a side effect
//! 4. Resolve accepted collisions with impulses
//!
//! The caller owns the [`hecs::World`] and drives `step` at a small fixed
//! timestep (for example 1/240 s) accumulated against wall-clock time.

pub mod contact;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;

use glam::Vec2;
use tracing::trace;

use crate::ecs::components::physics::Body;

use self::contact::Collision;

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Uniform acceleration applied to every free body. Default: zero.
    pub gravity: Vec2,
    /// Gravitational constant for pairwise inter-body attraction. Zero
    /// disables the pass entirely; 1 is a reasonable starting value.
    pub gravitational_constant: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            gravitational_constant: 0.0,
        }
    }
}

/// The main physics world managing simulation state.
///
/// Entities live in the caller's `hecs::World`; this type only holds the
/// simulation parameters and the contact records of the most recent step.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    contacts: Vec<Collision>,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            contacts: Vec::new(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    /// Collisions detected during the most recent step, whether or not they
    /// were resolved.
    pub fn contacts(&self) -> &[Collision] {
        &self.contacts
    }

    /// Advance the simulation by `dt` seconds, resolving every collision.
    pub fn step(&mut self, world: &mut hecs::World, dt: f32) {
        self.step_filtered(world, dt, |_| true);
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// `accept` decides per collision whether an impulse is applied, which
    /// lets the scene layer make pairs pass through each other (a ball
    /// dropping into a pocket should not bounce off it). Rejected pairs are
    /// still nudged apart by positional correction and still appear in
    /// [`contacts`](Self::contacts).
    pub fn step_filtered(
        &mut self,
        world: &mut hecs::World,
        dt: f32,
        mut accept: impl FnMut(&Collision) -> bool,
    ) {
        rigid_body::apply_interbody_gravity(world, self.config.gravitational_constant);
        rigid_body::integrate(world, self.config.gravity, dt);

        // Entity ids are handed out in spawn order; sorting restores a
        // deterministic pairing independent of archetype layout.
        let mut entities: Vec<hecs::Entity> = world
            .query_mut::<&Body>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect();
        entities.sort_unstable_by_key(|entity| entity.id());

        self.contacts.clear();
        for i in 0..entities.len() {
            for j in (i + 1)..entities.len() {
                if let Some(collision) = narrowphase::check_collision(world, entities[i], entities[j])
                {
                    if accept(&collision) {
                        solver::resolve_collision(world, &collision);
                    }
                    self.contacts.push(collision);
                }
            }
        }

        trace!(contacts = self.contacts.len(), "physics step complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::transform::Transform;
    use crate::shape::Shape;

    #[test]
    fn test_free_fall_velocity_after_one_second() {
        let mut world = hecs::World::new();
        let entity = world.spawn((Body::new(Shape::circle(1.0)), Transform::identity()));

        let mut physics = PhysicsWorld::new(PhysicsConfig {
            gravity: Vec2::new(0.0, 1000.0),
            gravitational_constant: 0.0,
        });

        let dt = 1.0 / 240.0;
        for _ in 0..240 {
            physics.step(&mut world, dt);
        }

        let body = world.get::<&Body>(entity).unwrap();
        assert!(
            (body.velocity.y - 1000.0).abs() < 1e-1,
            "velocity.y = {}",
            body.velocity.y
        );
    }

    #[test]
    fn test_step_reports_contacts() {
        let mut world = hecs::World::new();
        let a = world.spawn((
            Body::new_fixed(Shape::circle(10.0)),
            Transform::from_position(Vec2::ZERO),
        ));
        let b = world.spawn((
            Body::new_fixed(Shape::circle(10.0)),
            Transform::from_position(Vec2::new(15.0, 0.0)),
        ));

        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        physics.step(&mut world, 1.0 / 240.0);

        assert_eq!(physics.contacts().len(), 1);
        let collision = physics.contacts()[0];
        assert_eq!(collision.entity_a, a);
        assert_eq!(collision.entity_b, b);
    }

    #[test]
    fn test_rejected_collision_keeps_velocities() {
        let mut world = hecs::World::new();
        let mut body_a = Body::new(Shape::circle(10.0));
        body_a.velocity = Vec2::new(5.0, 0.0);
        let mut body_b = Body::new(Shape::circle(10.0));
        body_b.velocity = Vec2::new(-5.0, 0.0);
        let a = world.spawn((body_a, Transform::from_position(Vec2::ZERO)));
        let b = world.spawn((body_b, Transform::from_position(Vec2::new(15.0, 0.0))));

        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        physics.step_filtered(&mut world, 0.0, |_| false);

        // Pass-through pairing: record kept, impulse skipped
        assert_eq!(physics.contacts().len(), 1);
        assert_eq!(world.get::<&Body>(a).unwrap().velocity, Vec2::new(5.0, 0.0));
        assert_eq!(
            world.get::<&Body>(b).unwrap().velocity,
            Vec2::new(-5.0, 0.0)
        );
    }

    #[test]
    fn test_accepted_collision_bounces() {
        let mut world = hecs::World::new();
        let mut body_a = Body::new(Shape::circle(10.0));
        body_a.velocity = Vec2::new(5.0, 0.0);
        let mut body_b = Body::new(Shape::circle(10.0));
        body_b.velocity = Vec2::new(-5.0, 0.0);
        let a = world.spawn((body_a, Transform::from_position(Vec2::ZERO)));
        let b = world.spawn((body_b, Transform::from_position(Vec2::new(15.0, 0.0))));

        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        physics.step(&mut world, 0.0);

        assert!(world.get::<&Body>(a).unwrap().velocity.x < 0.0);
        assert!(world.get::<&Body>(b).unwrap().velocity.x > 0.0);
    }

    #[test]
    fn test_entities_without_bodies_are_ignored() {
        let mut world = hecs::World::new();
        world.spawn((Transform::from_position(Vec2::ZERO),));
        world.spawn((Transform::from_position(Vec2::new(1.0, 0.0)),));

        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        physics.step(&mut world, 1.0 / 60.0);

        assert!(physics.contacts().is_empty());
    }

    #[test]
    fn test_pair_order_is_deterministic() {
        let mut world = hecs::World::new();
        let mut spawned = Vec::new();
        for i in 0..4 {
            spawned.push(world.spawn((
                Body::new_fixed(Shape::circle(10.0)),
                Transform::from_position(Vec2::new(i as f32 * 5.0, 0.0)),
            )));
        }

        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        physics.step(&mut world, 1.0 / 240.0);

        // Every record is ordered (a before b in spawn order), and the
        // sequence itself is stable across runs.
        for collision in physics.contacts() {
            assert!(collision.entity_a.id() < collision.entity_b.id());
        }
        let first: Vec<_> = physics
            .contacts()
            .iter()
            .map(|c| (c.entity_a, c.entity_b))
            .collect();
        physics.step(&mut world, 1.0 / 240.0);
        let second: Vec<_> = physics
            .contacts()
            .iter()
            .map(|c| (c.entity_a, c.entity_b))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ball_settles_on_fixed_floor() {
        let mut world = hecs::World::new();
        let mut ball = Body::new(Shape::circle(5.0));
        ball.restitution = 0.0;
        let ball_entity = world.spawn((ball, Transform::from_position(Vec2::new(0.0, -20.0))));
        world.spawn((
            Body::new_fixed(Shape::rect(200.0, 10.0)),
            Transform::from_position(Vec2::new(0.0, 5.0)),
        ));

        // Canvas-style coordinates: +y is down, the floor top edge is y = 0
        let mut physics = PhysicsWorld::new(PhysicsConfig {
            gravity: Vec2::new(0.0, 500.0),
            gravitational_constant: 0.0,
        });
        for _ in 0..480 {
            physics.step(&mut world, 1.0 / 240.0);
        }

        let transform = world.get::<&Transform>(ball_entity).unwrap();
        assert!(
            transform.translation.y < 0.0,
            "ball must rest above the floor: y = {}",
            transform.translation.y
        );
        assert!(
            transform.translation.y > -20.0,
            "ball should have fallen: y = {}",
            transform.translation.y
        );
    }
}
