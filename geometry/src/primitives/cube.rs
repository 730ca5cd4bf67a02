//! Axis-aligned box

use glam::Vec3;

use super::Primitive;
use crate::mesh::{MeshBuffer, MeshBuilder};
use crate::params::CubeParams;

/// Generate a box standing on `position` (bottom-center)
///
/// Six faces, emitted bottom, back (+Z), right (-X), front (-Z), left (+X),
/// top. Every face gets its own full `[0,1]²` UV square and a constant axis
/// normal.
pub fn generate_cube<M: MeshBuilder>(params: &CubeParams) -> M {
    let params = params.sanitized();
    let mut mesh = M::default();

    let p = params.position;
    let half_w = params.width / 2.0;
    let half_l = params.length / 2.0;

    let (x0, x1) = (p.x - half_w, p.x + half_w);
    let (y0, y1) = (p.y, p.y + params.height);
    let (z0, z1) = (p.z - half_l, p.z + half_l);

    // Corners run counter-clockwise seen from outside, starting bottom-left
    let faces: [([Vec3; 4], Vec3); 6] = [
        (
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y0, z1),
                Vec3::new(x0, y0, z1),
            ],
            Vec3::NEG_Y,
        ),
        (
            [
                Vec3::new(x0, y0, z1),
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y1, z1),
                Vec3::new(x0, y1, z1),
            ],
            Vec3::Z,
        ),
        (
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x0, y0, z1),
                Vec3::new(x0, y1, z1),
                Vec3::new(x0, y1, z0),
            ],
            Vec3::NEG_X,
        ),
        (
            [
                Vec3::new(x1, y0, z0),
                Vec3::new(x0, y0, z0),
                Vec3::new(x0, y1, z0),
                Vec3::new(x1, y1, z0),
            ],
            Vec3::NEG_Z,
        ),
        (
            [
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y1, z0),
                Vec3::new(x1, y1, z1),
            ],
            Vec3::X,
        ),
        (
            [
                Vec3::new(x0, y1, z1),
                Vec3::new(x1, y1, z1),
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y1, z0),
            ],
            Vec3::Y,
        ),
    ];

    for (corners, normal) in faces {
        mesh.push_quad(corners, normal);
    }

    mesh
}

/// Cube generator with its computed mesh
#[derive(Clone, Debug)]
pub struct Cube {
    params: CubeParams,
    mesh: MeshBuffer,
}

impl Cube {
    pub fn new(params: CubeParams) -> Self {
        let params = params.sanitized();
        let mesh = generate_cube(&params);
        Self { params, mesh }
    }

    pub fn with(position: Vec3, length: f32, width: f32, height: f32) -> Self {
        Self::new(CubeParams {
            position,
            length,
            width,
            height,
        })
    }

    pub fn params(&self) -> &CubeParams {
        &self.params
    }
}

impl Primitive for Cube {
    fn kind(&self) -> &'static str {
        "cube"
    }

    fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }
}
