//! Procedural shape generation
//!
//! Generates flat-shaded, non-indexed triangle lists for five primitive
//! shapes: plane, cube, cylinder, pyramid and sphere (optionally a capped
//! hemisphere).
//!
//! Every vertex is 11 `f32` (position, color, normal, texcoord), every three
//! consecutive vertices form one counter-clockwise triangle, and every normal
//! is a unit-length outward face normal.
//!
//! ```
//! use glam::Vec3;
//! use primkit_geometry::{Cylinder, Primitive};
//!
//! let cylinder = Cylinder::with(Vec3::ZERO, 0.6, 1.5, 40, 3, false, true);
//! assert_eq!(cylinder.triangle_count(), 281);
//! ```

pub mod export;
pub mod mesh;
pub mod params;
pub mod primitives;
pub mod vertex;

pub use export::{write_obj, write_obj_to};
pub use mesh::{Aabb, MeshBuffer, MeshBuilder, MeshIssue};
pub use params::{CubeParams, CylinderParams, PlaneParams, PyramidParams, SphereParams};
pub use primitives::{Cube, Cylinder, Generated, Plane, Primitive, Pyramid, Shape, Sphere};
pub use vertex::{FLOATS_PER_VERTEX, VERTEX_STRIDE, Vertex};
