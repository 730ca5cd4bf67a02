//! Mesh buffer and the shared builder capability
//!
//! A [`MeshBuffer`] is a non-indexed triangle list: vertices `[3k, 3k+1, 3k+2]`
//! form triangle `k`, wound counter-clockwise when seen from the side the
//! normal points to.

mod builder;
mod validate;


use glam::Vec3;

use crate::vertex::{FLOATS_PER_VERTEX, Vertex};

pub use builder::{CapFacing, FanCap, MeshBuilder, face_normal};
pub use validate::MeshIssue;

/// Axis-aligned bounds of a mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Generated triangle list (flat float layout, 11 floats per vertex)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    vertices: Vec<Vertex>,
}

impl MeshBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of `f32` values in the interleaved buffer
    pub fn float_count(&self) -> usize {
        self.vertices.len() * FLOATS_PER_VERTEX
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Interleaved float view, ready for upload
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw byte view, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Iterate over whole triangles
    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> + '_ {
        self.vertices.chunks_exact(3)
    }

    /// Axis-aligned bounds, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        let first = self.vertices.first()?.position();
        let (min, max) = self
            .vertices
            .iter()
            .map(Vertex::position)
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Aabb { min, max })
    }

    /// Mean vertex position, `None` for an empty mesh
    pub fn centroid(&self) -> Option<Vec3> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: Vec3 = self.vertices.iter().map(Vertex::position).sum();
        Some(sum / self.vertices.len() as f32)
    }

    /// Overwrite the color slot of every vertex
    pub fn tint(&mut self, color: [f32; 3]) {
        for vertex in &mut self.vertices {
            vertex.color = color;
        }
    }

    /// Check the buffer invariants, returning every violation found
    pub fn validate(&self) -> Vec<MeshIssue> {
        validate::check(&self.vertices)
    }
}

impl MeshBuilder for MeshBuffer {
    fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    fn vertex_len(&self) -> usize {
        self.vertices.len()
    }
}

impl MeshBuilder for Vec<Vertex> {
    fn push_vertex(&mut self, vertex: Vertex) {
        self.push(vertex);
    }

    fn vertex_len(&self) -> usize {
        self.len()
    }
}

impl From<Vec<Vertex>> for MeshBuffer {
    fn from(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }
}
