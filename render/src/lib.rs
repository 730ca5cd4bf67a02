//! GPU boundary for primkit meshes
//!
//! Uploads [`MeshBuffer`](primkit_geometry::MeshBuffer)s into wgpu vertex
//! buffers, packs the per-frame [`RenderContext`] into uniforms, loads
//! textures with a white fallback and renders offscreen for snapshots.

pub mod capture;
pub mod context;
pub mod error;
pub mod gpu_mesh;
pub mod pipeline;
pub mod texture;
pub mod vertex_layout;

pub use capture::{DrawItem, HeadlessRenderer, read_render_target_pixels};
pub use context::{
    Attenuation, DirectionalLight, FrameUniforms, LightColors, MAX_POINT_LIGHTS, Material,
    ObjectUniforms, PointLight, Projection, RenderContext, SpotLight,
};
pub use error::{RenderError, TextureError};
pub use gpu_mesh::{Drawable, GpuMesh};
pub use pipeline::{MESH_SHADER, MeshPipeline, MeshPipelineConfig};
pub use texture::{DecodedImage, Texture, TextureOptions, decode_image, decode_image_bytes};
pub use vertex_layout::{VERTEX_ATTRIBUTES, vertex_buffer_layout};
