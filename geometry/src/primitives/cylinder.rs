//! Upright cylinder with optional fan caps

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use super::Primitive;
use crate::mesh::{CapFacing, FanCap, MeshBuffer, MeshBuilder};
use crate::params::CylinderParams;

/// Generate a flat-shaded cylinder
///
/// # Layout
/// - Side wall: `sides × subdivisions` panels, two triangles each, bottom band
///   first within each angular step
/// - Bottom cap (if drawn): `sides + 1` fan triangles at `position.y`
/// - Top cap (if drawn): `sides + 1` fan triangles at `position.y + height`
///
/// # UV Mapping
/// - Side wall: `u = 1 - i/sides` (decreasing with angle), `v = j/subdivisions`
/// - Caps: polar `(cos θ, sin θ)`, range `[-1, 1]`
pub fn generate_cylinder<M: MeshBuilder>(params: &CylinderParams) -> M {
    let params = params.sanitized();
    let mut mesh = M::default();

    let p = params.position;
    let sides = params.sides;
    let bands = params.subdivisions;
    let band_height = params.height / bands as f32;

    let u_step = 1.0 / sides as f32;
    let v_step = 1.0 / bands as f32;

    for i in 0..sides {
        let theta1 = (2.0 * PI * i as f32) / sides as f32;
        let theta2 = (2.0 * PI * (i + 1) as f32) / sides as f32;
        let (sin1, cos1) = theta1.sin_cos();
        let (sin2, cos2) = theta2.sin_cos();

        let (x1, z1) = (p.x + params.radius * cos1, p.z + params.radius * sin1);
        let (x2, z2) = (p.x + params.radius * cos2, p.z + params.radius * sin2);

        // Panel facing, used when the panel has no area
        let mid = 0.5 * (theta1 + theta2);
        let outward = Vec3::new(mid.cos(), 0.0, mid.sin());

        let u1 = 1.0 - u_step * i as f32;
        let u2 = 1.0 - u_step * (i + 1) as f32;

        for j in 0..bands {
            let btm_y = p.y + band_height * j as f32;
            let top_y = p.y + band_height * (j + 1) as f32;
            let v1 = v_step * j as f32;
            let v2 = v_step * (j + 1) as f32;

            let a = (Vec3::new(x1, btm_y, z1), Vec2::new(u1, v1));
            let b = (Vec3::new(x1, top_y, z1), Vec2::new(u1, v2));
            let c = (Vec3::new(x2, top_y, z2), Vec2::new(u2, v2));
            let d = (Vec3::new(x2, btm_y, z2), Vec2::new(u2, v1));

            mesh.push_flat_triangle([a, b, c], outward);
            mesh.push_flat_triangle([c, d, a], outward);
        }
    }

    if params.draw_bottom {
        mesh.push_fan_cap(FanCap {
            center: p,
            radius: params.radius,
            sides,
            facing: CapFacing::Down,
        });
    }

    if params.draw_top {
        mesh.push_fan_cap(FanCap {
            center: Vec3::new(p.x, p.y + params.height, p.z),
            radius: params.radius,
            sides,
            facing: CapFacing::Up,
        });
    }

    mesh
}

/// Cylinder generator with its computed mesh
#[derive(Clone, Debug)]
pub struct Cylinder {
    params: CylinderParams,
    mesh: MeshBuffer,
}

impl Cylinder {
    pub fn new(params: CylinderParams) -> Self {
        let params = params.sanitized();
        let mesh = generate_cylinder(&params);
        Self { params, mesh }
    }

    pub fn with(
        position: Vec3,
        radius: f32,
        height: f32,
        sides: u32,
        subdivisions: u32,
        draw_top: bool,
        draw_bottom: bool,
    ) -> Self {
        Self::new(CylinderParams {
            position,
            radius,
            height,
            sides,
            subdivisions,
            draw_top,
            draw_bottom,
        })
    }

    pub fn params(&self) -> &CylinderParams {
        &self.params
    }

    /// Point at the center of the top cap
    pub fn top_center(&self) -> Vec3 {
        self.params.position + Vec3::Y * self.params.height
    }
}

impl Primitive for Cylinder {
    fn kind(&self) -> &'static str {
        "cylinder"
    }

    fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }
}
