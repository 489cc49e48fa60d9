//! Geometric shapes with lazily cached boundary paths.

use glam::Vec2;

/// A single boundary command in shape-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Full circle around `center`.
    Arc { center: Vec2, radius: f32 },
    Close,
}

/// A shape's boundary in local space, replayable by a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

/// The closed set of shape variants the narrowphase dispatches over.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Circle {
        radius: f32,
    },
    /// Closed polygon. Vertices are wound consistently; edge order determines
    /// edge direction, outward normals are derived rather than assumed.
    Polygon {
        vertices: Vec<Vec2>,
    },
    /// Open polyline. Encloses no area and never collides.
    Line {
        vertices: Vec<Vec2>,
    },
}

/// A geometric shape plus its memoized boundary path.
///
/// The path is rebuilt on demand and cleared by every geometry mutator, so a
/// stale cache cannot outlive a radius or vertex change.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    path: Option<Path>,
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Self {
            kind: ShapeKind::Circle { radius },
            path: None,
        }
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Self {
            kind: ShapeKind::Polygon { vertices },
            path: None,
        }
    }

    /// Axis-aligned rectangle built as a 4-vertex polygon centered at the
    /// local origin.
    pub fn rect(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::polygon(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    pub fn line(vertices: Vec<Vec2>) -> Self {
        Self {
            kind: ShapeKind::Line { vertices },
            path: None,
        }
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Change a circle's radius. No-op for other variants.
    pub fn set_radius(&mut self, new_radius: f32) {
        if let ShapeKind::Circle { radius } = &mut self.kind {
            *radius = new_radius;
            self.path = None;
        }
    }

    /// Replace a polygon's or line's vertices. No-op for circles.
    pub fn set_vertices(&mut self, new_vertices: Vec<Vec2>) {
        match &mut self.kind {
            ShapeKind::Polygon { vertices } | ShapeKind::Line { vertices } => {
                *vertices = new_vertices;
                self.path = None;
            }
            ShapeKind::Circle { .. } => {}
        }
    }

    /// Enclosed area. Open lines enclose nothing.
    pub fn area(&self) -> f32 {
        match &self.kind {
            ShapeKind::Circle { radius } => std::f32::consts::PI * radius * radius,
            ShapeKind::Polygon { vertices } => {
                let n = vertices.len();
                let mut area = 0.0;
                for i in 0..n {
                    let j = (i + 1) % n;
                    area += vertices[i].perp_dot(vertices[j]);
                }
                area.abs() / 2.0
            }
            ShapeKind::Line { .. } => 0.0,
        }
    }

    /// The cached local-space boundary path, built on first use.
    pub fn path(&mut self) -> &Path {
        if self.path.is_none() {
            self.path = Some(self.make_path());
        }
        self.path.as_ref().unwrap()
    }

    fn make_path(&self) -> Path {
        let mut commands = Vec::new();
        match &self.kind {
            ShapeKind::Circle { radius } => {
                commands.push(PathCommand::Arc {
                    center: Vec2::ZERO,
                    radius: *radius,
                });
            }
            ShapeKind::Polygon { vertices } | ShapeKind::Line { vertices } => {
                if let Some((first, rest)) = vertices.split_first() {
                    commands.push(PathCommand::MoveTo(*first));
                    for v in rest {
                        commands.push(PathCommand::LineTo(*v));
                    }
                }
                if matches!(self.kind, ShapeKind::Polygon { .. }) {
                    commands.push(PathCommand::Close);
                }
            }
        }
        Path { commands }
    }
}
