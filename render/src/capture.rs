//! Offscreen rendering and pixel readback
//!
//! Creates its own device without a surface, draws a list of meshes into an
//! sRGB color target and copies the result back to the CPU.

use glam::Mat4;
use image::RgbaImage;
use tracing::{debug, info};
use wgpu::util::DeviceExt;

use primkit_geometry::MeshBuffer;

use crate::context::{Material, ObjectUniforms, RenderContext};
use crate::error::RenderError;
use crate::gpu_mesh::{Drawable, GpuMesh};
use crate::pipeline::{DEPTH_FORMAT, MeshPipeline, MeshPipelineConfig};
use crate::texture::Texture;

/// Color format of the offscreen target
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// One mesh placed in the scene
pub struct DrawItem<'a> {
    pub mesh: &'a dyn Drawable,
    pub model: Mat4,
    pub material: Material,
    /// `None` uses the white fallback
    pub texture: Option<&'a Texture>,
}

impl<'a> DrawItem<'a> {
    pub fn new(mesh: &'a dyn Drawable) -> Self {
        Self {
            mesh,
            model: Mat4::IDENTITY,
            material: Material::default(),
            texture: None,
        }
    }
}

/// Surface-less renderer with a fixed-size color and depth target
pub struct HeadlessRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: MeshPipeline,
    white: Texture,
    color_target: wgpu::Texture,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl HeadlessRenderer {
    /// Request an adapter and device and allocate the targets
    pub fn new(width: u32, height: u32, cull_mode: Option<wgpu::Face>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidTargetSize { width, height });
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Headless Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::Performance,
            experimental_features: Default::default(),
            trace: wgpu::Trace::Off,
        }))?;

        let limit = device.limits().max_texture_dimension_2d;
        if width > limit || height > limit {
            return Err(RenderError::TextureTooLarge { width, height, limit });
        }

        let pipeline = MeshPipeline::new(
            &device,
            MeshPipelineConfig {
                color_format: TARGET_FORMAT,
                cull_mode,
            },
        );
        let white = Texture::white(&device, &queue);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let color_target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Offscreen Color Target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let depth_target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Offscreen Depth Target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_target.create_view(&wgpu::TextureViewDescriptor::default());

        info!(
            "Headless renderer initialized: {}x{} on {}",
            width,
            height,
            adapter.get_info().name
        );

        Ok(Self {
            device,
            queue,
            pipeline,
            white,
            color_target,
            depth_view,
            width,
            height,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Upload a mesh to this renderer's device
    pub fn upload(&self, mesh: &MeshBuffer, label: &str) -> Result<GpuMesh, RenderError> {
        GpuMesh::upload(&self.device, mesh, label)
    }

    /// Draw `items` with `context` and read the frame back
    pub fn render(
        &self,
        context: &RenderContext,
        items: &[DrawItem<'_>],
        clear_color: [f32; 4],
    ) -> Result<RgbaImage, RenderError> {
        let frame_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniforms"),
            contents: bytemuck::cast_slice(&[context.frame_uniforms()]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let frame_group = self.pipeline.frame_bind_group(&self.device, &frame_buffer);

        // Bind groups must outlive the pass that references them
        let bindings: Vec<(wgpu::BindGroup, wgpu::BindGroup)> = items
            .iter()
            .map(|item| {
                let object = ObjectUniforms::new(item.model, &item.material);
                let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Object Uniforms"),
                    contents: bytemuck::cast_slice(&[object]),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                let object_group = self.pipeline.object_bind_group(&self.device, &buffer);
                let texture_group = self
                    .pipeline
                    .texture_bind_group(&self.device, item.texture.unwrap_or(&self.white));
                (object_group, texture_group)
            })
            .collect();

        let color_view = self
            .color_target
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Offscreen Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Offscreen Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color[0] as f64,
                            g: clear_color[1] as f64,
                            b: clear_color[2] as f64,
                            a: clear_color[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(self.pipeline.pipeline());
            render_pass.set_bind_group(0, &frame_group, &[]);
            for (item, (object_group, texture_group)) in items.iter().zip(&bindings) {
                render_pass.set_bind_group(1, object_group, &[]);
                render_pass.set_bind_group(2, texture_group, &[]);
                item.mesh.draw(&mut render_pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        debug!("Rendered {} draw items", items.len());

        let pixels = read_render_target_pixels(
            &self.device,
            &self.queue,
            &self.color_target,
            self.width,
            self.height,
        )?;

        RgbaImage::from_raw(self.width, self.height, pixels)
            .ok_or_else(|| RenderError::Readback("pixel buffer size mismatch".to_string()))
    }
}

/// Copy an RGBA8 texture into tightly packed rows
pub fn read_render_target_pixels(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, RenderError> {
    // Rows must be aligned to COPY_BYTES_PER_ROW_ALIGNMENT (256 bytes)
    let bytes_per_pixel = 4u32;
    let unpadded_bytes_per_row = width * bytes_per_pixel;
    let padded_bytes_per_row = padded_row_bytes(unpadded_bytes_per_row);
    let buffer_size = (padded_bytes_per_row * height) as u64;

    let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Staging Buffer"),
        size: buffer_size,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Readback Copy Encoder"),
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| RenderError::Readback(format!("device poll failed: {}", e)))?;

    rx.recv()
        .map_err(|e| RenderError::Readback(format!("map callback dropped: {}", e)))?
        .map_err(|e| RenderError::Readback(format!("buffer map failed: {}", e)))?;

    // Strip row padding
    let mapped = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
    for row in 0..height {
        let start = (row * padded_bytes_per_row) as usize;
        let end = start + unpadded_bytes_per_row as usize;
        pixels.extend_from_slice(&mapped[start..end]);
    }

    drop(mapped);
    staging_buffer.unmap();

    Ok(pixels)
}

/// Round a row size up to the copy alignment
pub fn padded_row_bytes(unpadded: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_row_bytes() {
        assert_eq!(padded_row_bytes(4), 256);
        assert_eq!(padded_row_bytes(256), 256);
        assert_eq!(padded_row_bytes(257), 512);
        assert_eq!(padded_row_bytes(800 * 4), 3328);
    }
}
