//! Vertex record shared by every generator
//!
//! The in-memory layout is the renderer contract: 11 `f32` per vertex,
//! interleaved as position, color, normal, texcoord.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Number of `f32` values per vertex
pub const FLOATS_PER_VERTEX: usize = 11;

/// Size of one vertex in bytes (44)
pub const VERTEX_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// Byte offset of the position attribute
pub const POSITION_OFFSET: usize = 0;
/// Byte offset of the color attribute
pub const COLOR_OFFSET: usize = 12;
/// Byte offset of the normal attribute
pub const NORMAL_OFFSET: usize = 24;
/// Byte offset of the texcoord attribute
pub const UV_OFFSET: usize = 36;

/// Default vertex color
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// One corner of one triangle
///
/// Vertices are never shared between triangles, so each carries the flat
/// normal of the triangle it belongs to.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a white vertex
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            color: WHITE,
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    #[inline]
    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn test_vertex_layout_matches_contract() {
        assert_eq!(std::mem::size_of::<Vertex>(), VERTEX_STRIDE);
        assert_eq!(VERTEX_STRIDE, 44);
        assert_eq!(offset_of!(Vertex, position), POSITION_OFFSET);
        assert_eq!(offset_of!(Vertex, color), COLOR_OFFSET);
        assert_eq!(offset_of!(Vertex, normal), NORMAL_OFFSET);
        assert_eq!(offset_of!(Vertex, uv), UV_OFFSET);
    }

    #[test]
    fn test_vertex_float_order() {
        let v = Vertex::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec2::new(0.25, 0.75),
        );
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(
            floats,
            &[1.0, 2.0, 3.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.25, 0.75]
        );
    }
}
