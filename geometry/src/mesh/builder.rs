//! Mesh builder trait
//!
//! Every generator appends through this trait: vertex assembly, flat normal
//! derivation and cap fans.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use crate::vertex::Vertex;

/// Squared cross-product length below which a triangle counts as degenerate
pub(crate) const DEGENERATE_EPSILON: f32 = 1e-12;

/// Flat normal of triangle `(a, b, c)`
///
/// Uses the right-hand rule on `(b - a) × (c - a)`, so a counter-clockwise
/// triangle yields the normal it is viewed along. Zero-area triangles get
/// `fallback` instead.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3, fallback: Vec3) -> Vec3 {
    let cross = (b - a).cross(c - a);
    if cross.length_squared() > DEGENERATE_EPSILON {
        cross.normalize()
    } else {
        fallback.try_normalize().unwrap_or(Vec3::Y)
    }
}

/// Which way a flat disc cap faces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapFacing {
    Down,
    Up,
}

impl CapFacing {
    pub fn normal(self) -> Vec3 {
        match self {
            CapFacing::Down => Vec3::NEG_Y,
            CapFacing::Up => Vec3::Y,
        }
    }
}

/// Horizontal disc triangulated as a fan around its center
#[derive(Clone, Copy, Debug)]
pub struct FanCap {
    pub center: Vec3,
    pub radius: f32,
    pub sides: u32,
    pub facing: CapFacing,
}

impl FanCap {
    /// Point on the rim at step `i` (wraps past `sides`)
    fn rim(&self, i: u32) -> (Vec3, Vec2) {
        let theta = (2.0 * PI * i as f32) / self.sides as f32;
        let (sin, cos) = theta.sin_cos();
        let position = self.center + Vec3::new(self.radius * cos, 0.0, self.radius * sin);
        // Polar mapping, spans [-1, 1]
        (position, Vec2::new(cos, sin))
    }
}

/// Append-only mesh construction
///
/// Implementors only provide vertex storage; the triangle, quad and fan helpers
/// are shared by every generator.
pub trait MeshBuilder: Default {
    /// Append a single vertex
    fn push_vertex(&mut self, vertex: Vertex);

    /// Number of vertices appended so far
    fn vertex_len(&self) -> usize;

    /// Append a triangle whose vertices are already complete
    fn push_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) {
        self.push_vertex(a);
        self.push_vertex(b);
        self.push_vertex(c);
    }

    /// Append a triangle with a normal derived from its winding
    ///
    /// `fallback` is used when the triangle has no area (poles, zero extents).
    fn push_flat_triangle(&mut self, corners: [(Vec3, Vec2); 3], fallback: Vec3) {
        let [(a, uv_a), (b, uv_b), (c, uv_c)] = corners;
        let normal = face_normal(a, b, c, fallback);
        self.push_triangle(
            Vertex::new(a, normal, uv_a),
            Vertex::new(b, normal, uv_b),
            Vertex::new(c, normal, uv_c),
        );
    }

    /// Append a quad as triangles `(0, 1, 2)` and `(2, 3, 0)`
    ///
    /// Corners must run counter-clockwise around `normal`; they receive UVs
    /// `(0,0) (1,0) (1,1) (0,1)` in order.
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        const QUAD_UVS: [Vec2; 4] = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let v = |i: usize| Vertex::new(corners[i], normal, QUAD_UVS[i]);

        self.push_triangle(v(0), v(1), v(2));
        self.push_triangle(v(2), v(3), v(0));
    }

    /// Append a disc cap of `sides + 1` fan triangles
    ///
    /// The extra step closes the fan past `2π`, overlapping the first
    /// triangle.
    fn push_fan_cap(&mut self, cap: FanCap) {
        let normal = cap.facing.normal();
        let center = Vertex::new(cap.center, normal, Vec2::ZERO);

        for i in 0..=cap.sides {
            let (cur, cur_uv) = cap.rim(i);
            let (next, next_uv) = cap.rim(i + 1);
            let cur = Vertex::new(cur, normal, cur_uv);
            let next = Vertex::new(next, normal, next_uv);

            match cap.facing {
                CapFacing::Down => self.push_triangle(center, cur, next),
                CapFacing::Up => self.push_triangle(center, next, cur),
            }
        }
    }
}
