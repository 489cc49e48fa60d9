//! Force application and semi-implicit Euler integration.

use glam::Vec2;

use crate::ecs::components::physics::Body;
use crate::ecs::components::transform::Transform;
use crate::math::is_near_zero;

/// Accumulate pairwise gravitational attraction between all bodies.
///
/// For every unordered pair, Fg = G·m₁·m₂/d² along the normalized
/// separation, added to one accumulator and subtracted from the other.
/// Fixed bodies attract others but receive no force themselves; bodies with
/// non-finite density are excluded entirely. Skipped when `|G|` is within
/// epsilon of zero.
pub fn apply_interbody_gravity(world: &mut hecs::World, gravitational_constant: f32) {
    if is_near_zero(gravitational_constant) {
        return;
    }

    struct Attractor {
        entity: hecs::Entity,
        position: Vec2,
        mass: f32,
        is_fixed: bool,
        accumulated: Vec2,
    }

    let mut attractors: Vec<Attractor> = world
        .query_mut::<(&Body, &Transform)>()
        .into_iter()
        .filter(|(_, (body, _))| body.density.is_finite())
        .map(|(entity, (body, transform))| Attractor {
            entity,
            position: transform.translation,
            mass: body.mass(),
            is_fixed: body.is_fixed,
            accumulated: Vec2::ZERO,
        })
        .collect();
    attractors.sort_unstable_by_key(|a| a.entity.id());

    for i in 0..attractors.len() {
        for j in (i + 1)..attractors.len() {
            let direction = attractors[i].position - attractors[j].position;
            let dist_sq = direction.length_squared();
            if is_near_zero(dist_sq) {
                // Coincident centers have no defined direction
                continue;
            }
            let magnitude =
                gravitational_constant * attractors[i].mass * attractors[j].mass / dist_sq;
            let fg = direction.normalize_or_zero() * magnitude;
            if !attractors[i].is_fixed {
                attractors[i].accumulated -= fg;
            }
            if !attractors[j].is_fixed {
                attractors[j].accumulated += fg;
            }
        }
    }

    for attractor in &attractors {
        if attractor.accumulated != Vec2::ZERO {
            if let Ok(mut body) = world.get::<&mut Body>(attractor.entity) {
                body.force += attractor.accumulated;
            }
        }
    }
}

/// Advance every body by one semi-implicit Euler step.
///
/// Velocity is updated from the accumulated force plus uniform gravity
/// before the position moves, then rotation advances by the angular
/// velocity and the force accumulator resets to the body's thrust. Fixed
/// bodies only have their accumulator cleared.
pub fn integrate(world: &mut hecs::World, gravity: Vec2, dt: f32) {
    for (_, (body, transform)) in world.query_mut::<(&mut Body, &mut Transform)>() {
        if body.is_fixed {
            body.force = Vec2::ZERO;
            continue;
        }

        let acceleration = body.acceleration() + gravity;
        body.velocity += acceleration * dt;
        transform.translation += body.velocity * dt;
        transform.rotation += body.angular_velocity * dt;
        body.force = body.thrust;
    }
}
