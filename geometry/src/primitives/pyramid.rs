//! Four-sided pyramid

use glam::{Vec2, Vec3};

use super::Primitive;
use crate::mesh::{MeshBuffer, MeshBuilder};
use crate::params::PyramidParams;

/// Generate a pyramid over a rectangular base
///
/// The base quad comes first (normal -Y), then the +X, -Z, -X and +Z sides.
/// Each side is one triangle from two adjacent base corners to the apex.
pub fn generate_pyramid<M: MeshBuilder>(params: &PyramidParams) -> M {
    let params = params.sanitized();
    let mut mesh = M::default();

    let p = params.position;
    let half_w = params.width / 2.0;
    let half_l = params.length / 2.0;

    let (x0, x1) = (p.x - half_w, p.x + half_w);
    let (z0, z1) = (p.z - half_l, p.z + half_l);
    let apex = Vec3::new(p.x, p.y + params.height, p.z);

    mesh.push_quad(
        [
            Vec3::new(x0, p.y, z0),
            Vec3::new(x1, p.y, z0),
            Vec3::new(x1, p.y, z1),
            Vec3::new(x0, p.y, z1),
        ],
        Vec3::NEG_Y,
    );

    // (first base corner, second base corner, facing axis)
    let sides = [
        (Vec3::new(x1, p.y, z1), Vec3::new(x1, p.y, z0), Vec3::X),
        (Vec3::new(x1, p.y, z0), Vec3::new(x0, p.y, z0), Vec3::NEG_Z),
        (Vec3::new(x0, p.y, z0), Vec3::new(x0, p.y, z1), Vec3::NEG_X),
        (Vec3::new(x0, p.y, z1), Vec3::new(x1, p.y, z1), Vec3::Z),
    ];

    for (b0, b1, axis) in sides {
        mesh.push_flat_triangle(
            [
                (b0, Vec2::new(0.0, 0.0)),
                (b1, Vec2::new(1.0, 0.0)),
                (apex, Vec2::new(0.5, 0.5)),
            ],
            axis,
        );
    }

    mesh
}

/// Pyramid generator with its computed mesh
#[derive(Clone, Debug)]
pub struct Pyramid {
    params: PyramidParams,
    mesh: MeshBuffer,
}

impl Pyramid {
    pub fn new(params: PyramidParams) -> Self {
        let params = params.sanitized();
        let mesh = generate_pyramid(&params);
        Self { params, mesh }
    }

    pub fn with(position: Vec3, length: f32, width: f32, height: f32) -> Self {
        Self::new(PyramidParams {
            position,
            length,
            width,
            height,
        })
    }

    pub fn params(&self) -> &PyramidParams {
        &self.params
    }

    pub fn apex(&self) -> Vec3 {
        self.params.position + Vec3::Y * self.params.height
    }
}

impl Primitive for Pyramid {
    fn kind(&self) -> &'static str {
        "pyramid"
    }

    fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }
}
