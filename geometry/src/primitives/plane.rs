//! Flat ground plane

use glam::Vec3;

use super::Primitive;
use crate::mesh::{MeshBuffer, MeshBuilder};
use crate::params::PlaneParams;

/// Generate a single upward-facing quad
///
/// Spans `position.x ± width/2` by `position.z ± length/2` at `position.y`.
/// U runs along +X, V along -Z.
pub fn generate_plane<M: MeshBuilder>(params: &PlaneParams) -> M {
    let params = params.sanitized();
    let mut mesh = M::default();

    let p = params.position;
    let half_w = params.width / 2.0;
    let half_l = params.length / 2.0;

    mesh.push_quad(
        [
            Vec3::new(p.x - half_w, p.y, p.z + half_l),
            Vec3::new(p.x + half_w, p.y, p.z + half_l),
            Vec3::new(p.x + half_w, p.y, p.z - half_l),
            Vec3::new(p.x - half_w, p.y, p.z - half_l),
        ],
        Vec3::Y,
    );

    mesh
}

/// Plane generator with its computed mesh
#[derive(Clone, Debug)]
pub struct Plane {
    params: PlaneParams,
    mesh: MeshBuffer,
}

impl Plane {
    pub fn new(params: PlaneParams) -> Self {
        let params = params.sanitized();
        let mesh = generate_plane(&params);
        Self { params, mesh }
    }

    pub fn with(position: Vec3, length: f32, width: f32) -> Self {
        Self::new(PlaneParams {
            position,
            length,
            width,
        })
    }

    pub fn params(&self) -> &PlaneParams {
        &self.params
    }
}

impl Primitive for Plane {
    fn kind(&self) -> &'static str {
        "plane"
    }

    fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }
}
