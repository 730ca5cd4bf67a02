//! Render and texture errors

use std::path::PathBuf;

use thiserror::Error;

/// Failure to decode an image file
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {path} has no pixels")]
    Empty { path: PathBuf },
}

/// Failure to create or use a GPU resource
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot upload an empty mesh")]
    EmptyMesh,

    #[error("mesh has {vertices} vertices, more than a single draw can address")]
    MeshTooLarge { vertices: usize },

    #[error("texture {width}x{height} exceeds the device limit of {limit}")]
    TextureTooLarge { width: u32, height: u32, limit: u32 },

    #[error("invalid render target size {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to read back render target: {0}")]
    Readback(String),

    #[error(transparent)]
    Texture(#[from] TextureError),
}
