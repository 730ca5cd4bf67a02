//! Device-side copy of one mesh
//!
//! The geometry stays on the CPU in its [`MeshBuffer`]; a [`GpuMesh`] only
//! borrows it for the duration of [`GpuMesh::upload`].

use primkit_geometry::{FLOATS_PER_VERTEX, MeshBuffer};
use tracing::debug;
use wgpu::util::DeviceExt;

use crate::error::RenderError;

/// Something that can be drawn into a render pass
pub trait Drawable {
    /// Vertices submitted per draw
    fn vertex_count(&self) -> u32;

    /// Bind the vertex buffer and issue the draw
    ///
    /// The pipeline and bind groups must already be set on `pass`.
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>);

    /// Free the device memory; later draws are no-ops
    fn release(&mut self);
}

/// Vertex buffer holding one uploaded mesh
#[derive(Debug)]
pub struct GpuMesh {
    buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    label: String,
}

impl GpuMesh {
    /// Upload `mesh` into a new vertex buffer
    pub fn upload(device: &wgpu::Device, mesh: &MeshBuffer, label: &str) -> Result<Self, RenderError> {
        if mesh.is_empty() {
            return Err(RenderError::EmptyMesh);
        }

        let vertices = mesh.float_count() / FLOATS_PER_VERTEX;
        let vertex_count = u32::try_from(vertices).map_err(|_| RenderError::MeshTooLarge { vertices })?;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: mesh.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        debug!(
            "Uploaded mesh '{}': {} vertices, {} bytes",
            label,
            vertex_count,
            mesh.as_bytes().len()
        );

        Ok(Self {
            buffer: Some(buffer),
            vertex_count,
            label: label.to_string(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_released(&self) -> bool {
        self.buffer.is_none()
    }

    /// Size of the device buffer in bytes (0 once released)
    pub fn byte_size(&self) -> u64 {
        self.buffer.as_ref().map_or(0, |b| b.size())
    }
}

impl Drawable for GpuMesh {
    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if let Some(buffer) = &self.buffer {
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..self.vertex_count, 0..1);
        }
    }

    fn release(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            buffer.destroy();
            debug!("Released mesh '{}'", self.label);
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        self.release();
    }
}
