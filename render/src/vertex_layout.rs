//! wgpu vertex layout for [`MeshBuffer`](primkit_geometry::MeshBuffer) data
//!
//! Mirrors the interleaved record: position, color, normal, texcoord.

use primkit_geometry::vertex::{COLOR_OFFSET, NORMAL_OFFSET, POSITION_OFFSET, UV_OFFSET};
use primkit_geometry::VERTEX_STRIDE;

/// Shader locations for each attribute
pub const LOC_POSITION: u32 = 0;
pub const LOC_COLOR: u32 = 1;
pub const LOC_NORMAL: u32 = 2;
pub const LOC_UV: u32 = 3;

/// Attributes in buffer order
pub const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: POSITION_OFFSET as u64,
        shader_location: LOC_POSITION,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: COLOR_OFFSET as u64,
        shader_location: LOC_COLOR,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: NORMAL_OFFSET as u64,
        shader_location: LOC_NORMAL,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: UV_OFFSET as u64,
        shader_location: LOC_UV,
    },
];

/// Per-vertex buffer layout with a 44-byte stride
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_offsets() {
        let offsets: Vec<u64> = VERTEX_ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24, 36]);

        let locations: Vec<u32> = VERTEX_ATTRIBUTES
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_layout_stride_covers_attributes() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 44);

        let end = VERTEX_ATTRIBUTES
            .iter()
            .map(|a| a.offset + a.format.size())
            .max()
            .unwrap();
        assert_eq!(end, layout.array_stride);
    }
}
