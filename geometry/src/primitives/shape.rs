//! Shape descriptor for data-driven generation

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Primitive, generate_cube, generate_cylinder, generate_plane, generate_pyramid,
    generate_sphere,
};
use crate::mesh::MeshBuffer;
use crate::params::{CubeParams, CylinderParams, PlaneParams, PyramidParams, SphereParams};

/// One of the five shapes together with its parameters
///
/// Serialized with an inline `kind` tag, so a TOML table reads:
///
/// ```toml
/// kind = "cylinder"
/// radius = 0.6
/// sides = 40
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Plane(PlaneParams),
    Cube(CubeParams),
    Cylinder(CylinderParams),
    Pyramid(PyramidParams),
    Sphere(SphereParams),
}

impl Shape {
    /// Names accepted in the `kind` tag
    pub const KINDS: [&'static str; 5] = ["plane", "cube", "cylinder", "pyramid", "sphere"];

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Plane(_) => "plane",
            Shape::Cube(_) => "cube",
            Shape::Cylinder(_) => "cylinder",
            Shape::Pyramid(_) => "pyramid",
            Shape::Sphere(_) => "sphere",
        }
    }

    /// Same shape with its parameters clamped into range
    pub fn sanitized(self) -> Self {
        match self {
            Shape::Plane(p) => Shape::Plane(p.sanitized()),
            Shape::Cube(p) => Shape::Cube(p.sanitized()),
            Shape::Cylinder(p) => Shape::Cylinder(p.sanitized()),
            Shape::Pyramid(p) => Shape::Pyramid(p.sanitized()),
            Shape::Sphere(p) => Shape::Sphere(p.sanitized()),
        }
    }

    /// Run the matching generator
    pub fn build(&self) -> Generated {
        let mesh: MeshBuffer = match self {
            Shape::Plane(p) => generate_plane(p),
            Shape::Cube(p) => generate_cube(p),
            Shape::Cylinder(p) => generate_cylinder(p),
            Shape::Pyramid(p) => generate_pyramid(p),
            Shape::Sphere(p) => generate_sphere(p),
        };

        debug!(
            "Generated {}: {} triangles, {} vertices",
            self.kind(),
            mesh.triangle_count(),
            mesh.vertex_count()
        );

        Generated {
            kind: self.kind(),
            mesh,
        }
    }
}

impl From<PlaneParams> for Shape {
    fn from(params: PlaneParams) -> Self {
        Shape::Plane(params)
    }
}

impl From<CubeParams> for Shape {
    fn from(params: CubeParams) -> Self {
        Shape::Cube(params)
    }
}

impl From<CylinderParams> for Shape {
    fn from(params: CylinderParams) -> Self {
        Shape::Cylinder(params)
    }
}

impl From<PyramidParams> for Shape {
    fn from(params: PyramidParams) -> Self {
        Shape::Pyramid(params)
    }
}

impl From<SphereParams> for Shape {
    fn from(params: SphereParams) -> Self {
        Shape::Sphere(params)
    }
}

/// Mesh produced from a [`Shape`]
#[derive(Clone, Debug, PartialEq)]
pub struct Generated {
    kind: &'static str,
    mesh: MeshBuffer,
}

impl Generated {
    pub fn into_mesh(self) -> MeshBuffer {
        self.mesh
    }

    /// Mutable access for post-processing such as [`MeshBuffer::tint`]
    pub fn mesh_mut(&mut self) -> &mut MeshBuffer {
        &mut self.mesh
    }
}

impl Primitive for Generated {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }
}
