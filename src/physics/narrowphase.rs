//! Narrowphase collision detection: shape-pair tests and SAT.
//!
//! Every test returns `Option` — absence of a record means the pair does not
//! overlap (or cannot collide at all), never an error. A detected hit also
//! applies a small positional correction to both transforms before the
//! record is returned, so interpenetrating bodies are nudged apart even when
//! the caller declines to resolve velocities.

use glam::Vec2;
use tracing::trace;

use crate::ecs::components::physics::Body;
use crate::ecs::components::transform::Transform;
use crate::math::EPSILON;
use crate::shape::{Shape, ShapeKind};

use super::contact::{Collision, ContactInfo};

/// Fraction of the corrected penetration applied as a positional nudge.
const CORRECTION_PERCENT: f32 = 0.2;
/// Penetration allowed before positional correction kicks in.
const PENETRATION_SLOP: f32 = 0.01;

/// A shape instanced into world space for pair testing.
enum WorldShape {
    Circle { center: Vec2, radius: f32 },
    Polygon { vertices: Vec<Vec2> },
}

fn world_shape(shape: &Shape, transform: &Transform) -> Option<WorldShape> {
    match shape.kind() {
        ShapeKind::Circle { radius } => Some(WorldShape::Circle {
            center: transform.translation,
            radius: *radius,
        }),
        ShapeKind::Polygon { vertices } => Some(WorldShape::Polygon {
            vertices: vertices
                .iter()
                .map(|v| transform.transform_point(*v))
                .collect(),
        }),
        // Open polylines never collide
        ShapeKind::Line { .. } => None,
    }
}

/// Test one entity pair for overlap.
///
/// Returns `None` when either entity lacks a body or transform, when a shape
/// cannot collide, or when the pair is separated. On a hit, positional
/// correction displaces both transforms in proportion to their inverse
/// masses before the [`Collision`] is returned.
pub fn check_collision(
    world: &mut hecs::World,
    entity_a: hecs::Entity,
    entity_b: hecs::Entity,
) -> Option<Collision> {
    let (info, inv_mass_a, inv_mass_b) = {
        let body_a = world.get::<&Body>(entity_a).ok()?;
        let body_b = world.get::<&Body>(entity_b).ok()?;
        let transform_a = *world.get::<&Transform>(entity_a).ok()?;
        let transform_b = *world.get::<&Transform>(entity_b).ok()?;

        let shape_a = world_shape(&body_a.shape, &transform_a)?;
        let shape_b = world_shape(&body_b.shape, &transform_b)?;

        let info = match (&shape_a, &shape_b) {
            (
                WorldShape::Circle {
                    center: center_a,
                    radius: radius_a,
                },
                WorldShape::Circle {
                    center: center_b,
                    radius: radius_b,
                },
            ) => circle_circle(*center_a, *center_b, *radius_a, *radius_b),
            (WorldShape::Circle { center, radius }, WorldShape::Polygon { vertices }) => {
                // The polygon-relative result points polygon -> circle;
                // invert so the normal points A -> B and rebuild the contact
                // on A's circle surface.
                polygon_circle(vertices, *center, *radius).map(|hit| {
                    let normal = -hit.normal;
                    ContactInfo {
                        normal,
                        point: *center + normal * *radius,
                        penetration: hit.penetration,
                    }
                })
            }
            (WorldShape::Polygon { vertices }, WorldShape::Circle { center, radius }) => {
                polygon_circle(vertices, *center, *radius)
            }
            (
                WorldShape::Polygon {
                    vertices: vertices_a,
                },
                WorldShape::Polygon {
                    vertices: vertices_b,
                },
            ) => polygon_polygon(vertices_a, vertices_b),
        }?;

        (info, body_a.inv_mass(), body_b.inv_mass())
    };

    let collision = Collision {
        entity_a,
        entity_b,
        normal: info.normal,
        point: info.point,
        penetration: info.penetration,
    };

    apply_positional_correction(world, &collision, inv_mass_a, inv_mass_b);

    Some(collision)
}

/// Baumgarte-style separation: displace each body along the normal by its
/// inverse-mass share of the slop-corrected penetration.
fn apply_positional_correction(
    world: &mut hecs::World,
    collision: &Collision,
    inv_mass_a: f32,
    inv_mass_b: f32,
) {
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= 0.0 {
        return;
    }
    let magnitude =
        CORRECTION_PERCENT * (collision.penetration - PENETRATION_SLOP).max(0.0) / inv_mass_sum;
    if magnitude <= 0.0 {
        return;
    }
    let correction = collision.normal * magnitude;

    if inv_mass_a > 0.0 {
        if let Ok(mut transform) = world.get::<&mut Transform>(collision.entity_a) {
            transform.translation -= correction * inv_mass_a;
        }
    }
    if inv_mass_b > 0.0 {
        if let Ok(mut transform) = world.get::<&mut Transform>(collision.entity_b) {
            transform.translation += correction * inv_mass_b;
        }
    }
}

/// Circle-circle overlap test.
pub(crate) fn circle_circle(
    center_a: Vec2,
    center_b: Vec2,
    radius_a: f32,
    radius_b: f32,
) -> Option<ContactInfo> {
    let delta = center_b - center_a;
    let distance_squared = delta.length_squared();
    let radius_sum = radius_a + radius_b;
    if distance_squared > radius_sum * radius_sum {
        return None;
    }

    if distance_squared == 0.0 {
        // Coincident centers: any normal is as good as another
        trace!("coincident circle centers, using arbitrary normal");
        return Some(ContactInfo {
            normal: Vec2::X,
            point: center_a,
            penetration: radius_sum,
        });
    }

    let distance = distance_squared.sqrt();
    let normal = delta / distance;
    Some(ContactInfo {
        normal,
        point: center_a + normal * radius_a,
        penetration: radius_sum - distance,
    })
}

/// Polygon-circle overlap test over world-space polygon vertices.
///
/// Tests every edge's outward normal as a separating axis, plus the axis
/// from the polygon vertex nearest the circle center toward the center to
/// catch corner contacts the edge axes alone would miss. The returned
/// normal points from the polygon toward the circle.
pub(crate) fn polygon_circle(
    vertices: &[Vec2],
    center: Vec2,
    radius: f32,
) -> Option<ContactInfo> {
    let count = vertices.len();
    if count == 0 {
        return None;
    }

    let mut min_overlap = f32::INFINITY;
    let mut best_axis = Vec2::ZERO;

    for i in 0..count {
        let v0 = vertices[i];
        let v1 = vertices[(i + 1) % count];
        let edge = v1 - v0;
        if edge.length_squared() == 0.0 {
            continue; // degenerate edge
        }
        let axis = edge.perp().normalize();

        let (min_a, max_a) = project(vertices, axis);
        let center_proj = center.dot(axis);
        let overlap = max_a.min(center_proj + radius) - min_a.max(center_proj - radius);
        if overlap <= 0.0 {
            return None;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
    }

    // Corner case: axis through the closest vertex
    let mut closest = None;
    let mut closest_dist_sq = f32::INFINITY;
    for v in vertices {
        let dist_sq = (center - *v).length_squared();
        if dist_sq < closest_dist_sq {
            closest_dist_sq = dist_sq;
            closest = Some(*v);
        }
    }
    if let Some(vertex) = closest {
        if closest_dist_sq > 0.0 {
            let axis = (center - vertex) / closest_dist_sq.sqrt();
            let (min_a, max_a) = project(vertices, axis);
            let center_proj = center.dot(axis);
            let overlap = max_a.min(center_proj + radius) - min_a.max(center_proj - radius);
            if overlap <= 0.0 {
                return None;
            }
            if overlap < min_overlap {
                min_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    if !min_overlap.is_finite() {
        // Every edge was degenerate
        return None;
    }

    // Orient the axis out of the polygon so the normal pushes toward the circle
    let mut normal = best_axis;
    if normal.dot(center - centroid(vertices)) < 0.0 {
        normal = -normal;
    }

    Some(ContactInfo {
        normal,
        point: center - normal * radius,
        penetration: min_overlap,
    })
}

/// Polygon-polygon SAT test over world-space vertices.
pub(crate) fn polygon_polygon(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> Option<ContactInfo> {
    if vertices_a.is_empty() || vertices_b.is_empty() {
        return None;
    }

    let mut axes = Vec::with_capacity(vertices_a.len() + vertices_b.len());
    collect_edge_axes(vertices_a, &mut axes);
    collect_edge_axes(vertices_b, &mut axes);
    if axes.is_empty() {
        return None;
    }

    // Minimum-overlap axis doubles as exit criterion and contact normal
    let mut min_overlap = f32::INFINITY;
    let mut best_axis = Vec2::ZERO;
    for axis in axes {
        let (min_a, max_a) = project(vertices_a, axis);
        let (min_b, max_b) = project(vertices_b, axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap <= 0.0 {
            return None; // separating axis found
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
    }

    let mut normal = best_axis;
    if normal.dot(centroid(vertices_b) - centroid(vertices_a)) < 0.0 {
        normal = -normal;
    }
    let tangent = normal.perp();

    // Extreme features along the normal: A's furthest, B's nearest
    let (plane_distance, support_a) = collect_support(vertices_a, normal, true);
    let (_, support_b) = collect_support(vertices_b, normal, false);

    let support_center_a = average(&support_a);
    let support_center_b = average(&support_b);

    // Slide a point back onto A's support plane along the normal
    let onto_plane = |p: Vec2| p + normal * (plane_distance - p.dot(normal));

    let point = if support_a.len() <= 1 && support_b.len() <= 1 {
        // Vertex-vertex grazing: midpoint projected onto the plane
        onto_plane((support_center_a + support_center_b) * 0.5)
    } else if support_a.len() <= 1 {
        // A's single vertex already lies on its own support plane
        support_a.first().copied().unwrap_or(support_center_b)
    } else if support_b.len() <= 1 {
        onto_plane(support_b.first().copied().unwrap_or(support_center_a))
    } else {
        // Face-face: clip the tangential spans, take the midpoint
        let (min_a, max_a) = project(&support_a, tangent);
        let (min_b, max_b) = project(&support_b, tangent);
        let overlap_min = min_a.max(min_b);
        let overlap_max = max_a.min(max_b);

        if overlap_max >= overlap_min - EPSILON {
            let target = (overlap_min + overlap_max) * 0.5;
            let base = support_a.first().copied().unwrap_or(support_center_a);
            let slid = base + tangent * (target - base.dot(tangent));
            onto_plane(slid)
        } else {
            // Near-parallel faces whose spans never overlap
            trace!("face-face contact with disjoint tangential spans");
            onto_plane((support_center_a + support_center_b) * 0.5)
        }
    };

    Some(ContactInfo {
        normal,
        point,
        penetration: min_overlap,
    })
}

/// Push the unit outward normal of each non-degenerate edge.
fn collect_edge_axes(vertices: &[Vec2], axes: &mut Vec<Vec2>) {
    let count = vertices.len();
    for i in 0..count {
        let edge = vertices[(i + 1) % count] - vertices[i];
        if edge.length_squared() == 0.0 {
            continue;
        }
        axes.push(edge.perp().normalize());
    }
}

/// Scalar extent of a point set along an axis.
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for p in points {
        let proj = p.dot(axis);
        min = min.min(proj);
        max = max.max(proj);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 0.0);
    }
    (min, max)
}

fn centroid(points: &[Vec2]) -> Vec2 {
    let sum: Vec2 = points.iter().copied().sum();
    sum / points.len() as f32
}

fn average(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    centroid(points)
}

/// The extreme projection along `axis` and every vertex within [`EPSILON`]
/// of it — a single vertex or a whole face.
fn collect_support(points: &[Vec2], axis: Vec2, find_max: bool) -> (f32, Vec<Vec2>) {
    let mut extreme = if find_max {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    };
    let mut support = Vec::new();
    for p in points {
        let proj = p.dot(axis);
        let better = if find_max {
            proj > extreme + EPSILON
        } else {
            proj < extreme - EPSILON
        };
        if better {
            extreme = proj;
            support.clear();
            support.push(*p);
        } else if (proj - extreme).abs() <= EPSILON {
            support.push(*p);
        }
    }
    (extreme, support)
}
