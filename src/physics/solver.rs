//! Impulse-based collision resolution with linear and angular coupling.

use glam::Vec2;

use crate::ecs::components::physics::Body;
use crate::ecs::components::transform::Transform;

use super::contact::Collision;

/// Snapshot of the body state the impulse math needs.
struct BodyState {
    inv_mass: f32,
    inv_inertia: f32,
    velocity: Vec2,
    angular_velocity: f32,
    position: Vec2,
    restitution: f32,
}

fn body_state(world: &hecs::World, entity: hecs::Entity) -> Option<BodyState> {
    let body = world.get::<&Body>(entity).ok()?;
    let transform = world.get::<&Transform>(entity).ok()?;
    let inertia = body.inertia();
    let inv_inertia = if body.is_fixed || inertia == 0.0 {
        0.0
    } else {
        1.0 / inertia
    };
    Some(BodyState {
        inv_mass: body.inv_mass(),
        inv_inertia,
        velocity: body.velocity,
        angular_velocity: body.angular_velocity,
        position: transform.translation,
        restitution: body.restitution,
    })
}

/// Convert a collision into equal-and-opposite impulses on both bodies.
///
/// No-op when either body is missing, both bodies are fixed, or the pair is
/// already separating along the contact normal. Restitution is the minimum
/// of the two bodies'. Bodies whose shape has no defined moment of inertia
/// get no angular response.
pub fn resolve_collision(world: &mut hecs::World, collision: &Collision) {
    let (state_a, state_b) = match (
        body_state(world, collision.entity_a),
        body_state(world, collision.entity_b),
    ) {
        (Some(a), Some(b)) => (a, b),
        _ => return,
    };

    let inv_mass_sum = state_a.inv_mass + state_b.inv_mass;
    if inv_mass_sum == 0.0 {
        return; // both bodies immovable
    }

    let normal = collision.normal;
    let r_a = collision.point - state_a.position;
    let r_b = collision.point - state_b.position;

    // Relative velocity at the contact, including rotation (omega x r)
    let vel_a = state_a.velocity + state_a.angular_velocity * r_a.perp();
    let vel_b = state_b.velocity + state_b.angular_velocity * r_b.perp();
    let vel_along_normal = (vel_b - vel_a).dot(normal);
    if vel_along_normal >= 0.0 {
        return; // already separating
    }

    let restitution = state_a.restitution.min(state_b.restitution);

    let r_a_cross_n = r_a.perp_dot(normal);
    let r_b_cross_n = r_b.perp_dot(normal);
    let denominator = inv_mass_sum
        + r_a_cross_n * r_a_cross_n * state_a.inv_inertia
        + r_b_cross_n * r_b_cross_n * state_b.inv_inertia;
    if denominator == 0.0 {
        return;
    }

    let j = -(1.0 + restitution) * vel_along_normal / denominator;
    let impulse = normal * j;

    if let Ok(mut body) = world.get::<&mut Body>(collision.entity_a) {
        body.velocity -= impulse * state_a.inv_mass;
        body.angular_velocity -= r_a.perp_dot(impulse) * state_a.inv_inertia;
    }
    if let Ok(mut body) = world.get::<&mut Body>(collision.entity_b) {
        body.velocity += impulse * state_b.inv_mass;
        body.angular_velocity += r_b.perp_dot(impulse) * state_b.inv_inertia;
    }
}
