//! Physical state component for simulated entities.

use glam::Vec2;

use crate::shape::{Shape, ShapeKind};

/// Rigid body component: a shape plus the mutable physical state the
/// integrator and solver operate on.
///
/// Mass, inverse mass, inertia, and acceleration are derived on demand so
/// they can never drift out of sync with the shape or density.
#[derive(Debug, Clone)]
pub struct Body {
    pub shape: Shape,
    /// Fixed bodies are never integrated or displaced; other bodies bounce
    /// off them.
    pub is_fixed: bool,
    /// Mass per unit area. A non-finite density excludes the body from
    /// inter-body gravitational attraction.
    pub density: f32,
    /// Linear velocity in units per second.
    pub velocity: Vec2,
    /// Angular velocity in radians per second.
    pub angular_velocity: f32,
    /// Force accumulator, reset to `thrust` once per integration step.
    pub force: Vec2,
    /// Self-powered force (like a rocket) reapplied every step.
    pub thrust: Vec2,
    /// Bounciness: 0 = inelastic, 1 = perfectly elastic.
    pub restitution: f32,
}

impl Body {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            is_fixed: false,
            density: 1.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            thrust: Vec2::ZERO,
            restitution: 1.0,
        }
    }

    /// An immovable body with infinite effective mass.
    pub fn new_fixed(shape: Shape) -> Self {
        Self {
            is_fixed: true,
            ..Self::new(shape)
        }
    }

    pub fn mass(&self) -> f32 {
        self.density * self.shape.area()
    }

    /// Inverse mass; 0 for fixed bodies so the solver needs no special case.
    pub fn inv_mass(&self) -> f32 {
        if self.is_fixed {
            0.0
        } else {
            1.0 / self.mass()
        }
    }

    /// Effective acceleration from the accumulated force.
    pub fn acceleration(&self) -> Vec2 {
        self.force * self.inv_mass()
    }

    /// Moment of inertia about the body's origin.
    ///
    /// Circles use m·r²/2, polygons the density-weighted edge sum divided by
    /// 12. Other shapes have no defined moment and return 0, which disables
    /// angular impulse response for them.
    pub fn inertia(&self) -> f32 {
        match self.shape.kind() {
            ShapeKind::Circle { radius } => self.mass() * radius * radius / 2.0,
            ShapeKind::Polygon { vertices } => {
                let count = vertices.len();
                if count < 3 {
                    return 0.0;
                }
                let mut accum = 0.0;
                for i in 0..count {
                    let p0 = vertices[i];
                    let p1 = vertices[(i + 1) % count];
                    let cross = p0.perp_dot(p1);
                    let term_x = p0.x * p0.x + p0.x * p1.x + p1.x * p1.x;
                    let term_y = p0.y * p0.y + p0.y * p1.y + p1.y * p1.y;
                    accum += cross * (term_x + term_y);
                }
                (self.density * accum).abs() / 12.0
            }
            ShapeKind::Line { .. } => 0.0,
        }
    }
}
