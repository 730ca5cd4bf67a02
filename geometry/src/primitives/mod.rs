//! Procedural shape generators
//!
//! Each shape exists in two forms:
//! - a generic `generate_*` function writing into any
//!   [`MeshBuilder`](crate::mesh::MeshBuilder)
//! - a generator struct that sanitizes its parameters once, builds its
//!   [`MeshBuffer`] once and exposes it read-only through [`Primitive`]

mod cube;
mod cylinder;
mod plane;
mod pyramid;
mod shape;
mod sphere;


use crate::mesh::MeshBuffer;

pub use cube::{Cube, generate_cube};
pub use cylinder::{Cylinder, generate_cylinder};
pub use plane::{Plane, generate_plane};
pub use pyramid::{Pyramid, generate_pyramid};
pub use shape::{Generated, Shape};
pub use sphere::{Sphere, generate_sphere, latitude_bands};

/// Common read-only view of a generated shape
pub trait Primitive {
    /// Lowercase shape name ("plane", "cube", ...)
    fn kind(&self) -> &'static str;

    /// The finished triangle list
    fn mesh(&self) -> &MeshBuffer;

    fn vertex_count(&self) -> usize {
        self.mesh().vertex_count()
    }

    fn triangle_count(&self) -> usize {
        self.mesh().triangle_count()
    }
}
