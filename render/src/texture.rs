//! Texture decoding, upload and fallback
//!
//! Decoding goes through the `image` crate. A texture that fails to load is
//! replaced by a 1×1 white texture so textured draws still render.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use tracing::{debug, warn};
use wgpu::util::DeviceExt;

use crate::error::{RenderError, TextureError};

/// Format every uploaded color texture uses
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Sampling and load options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureOptions {
    /// Repeat along U (otherwise clamp to edge)
    pub repeat_u: bool,
    /// Repeat along V (otherwise clamp to edge)
    pub repeat_v: bool,
    pub generate_mipmaps: bool,
    /// Flip rows on load so row 0 is the bottom of the image
    pub flip_vertical: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            repeat_u: true,
            repeat_v: true,
            generate_mipmaps: true,
            flip_vertical: true,
        }
    }
}

impl TextureOptions {
    fn address_mode(repeat: bool) -> wgpu::AddressMode {
        if repeat {
            wgpu::AddressMode::Repeat
        } else {
            wgpu::AddressMode::ClampToEdge
        }
    }

    pub fn sampler_descriptor(&self) -> wgpu::SamplerDescriptor<'static> {
        let mipmap_filter = if self.generate_mipmaps {
            wgpu::FilterMode::Linear
        } else {
            wgpu::FilterMode::Nearest
        };

        wgpu::SamplerDescriptor {
            label: Some("Texture Sampler"),
            address_mode_u: Self::address_mode(self.repeat_u),
            address_mode_v: Self::address_mode(self.repeat_v),
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter,
            ..Default::default()
        }
    }
}

/// CPU-side decoded image
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file (3 for RGB, 4 for RGBA, ...)
    pub channels: u8,
    /// Pixels expanded to RGBA8, row-major
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    fn from_dynamic(image: DynamicImage, options: &TextureOptions) -> Self {
        let channels = image.color().channel_count();
        let image = if options.flip_vertical {
            image.flipv()
        } else {
            image
        };
        let rgba = image.to_rgba8();

        Self {
            width: rgba.width(),
            height: rgba.height(),
            channels,
            pixels: rgba.into_raw(),
        }
    }

    /// Full mip chain, level 0 first, halving down to 1×1
    pub fn mip_chain(&self) -> Vec<RgbaImage> {
        let Some(base) = RgbaImage::from_raw(self.width, self.height, self.pixels.clone()) else {
            return Vec::new();
        };

        let mut levels = vec![base];
        loop {
            let Some(last) = levels.last() else { break };
            let (w, h) = last.dimensions();
            if w == 1 && h == 1 {
                break;
            }
            let next = image::imageops::resize(last, (w / 2).max(1), (h / 2).max(1), FilterType::Triangle);
            levels.push(next);
        }
        levels
    }
}

/// Number of mip levels for a `width × height` image
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Decode an image file
pub fn decode_image(path: impl AsRef<Path>, options: &TextureOptions) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|err| match err {
        image::ImageError::IoError(source) => TextureError::Io {
            path: path.to_path_buf(),
            source,
        },
        source => TextureError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let decoded = DecodedImage::from_dynamic(image, options);
    if decoded.width == 0 || decoded.height == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "Decoded {}: {}x{}, {} channels",
        path.display(),
        decoded.width,
        decoded.height,
        decoded.channels
    );
    Ok(decoded)
}

/// Decode an in-memory encoded image (PNG, JPEG)
pub fn decode_image_bytes(bytes: &[u8], options: &TextureOptions) -> Result<DecodedImage, TextureError> {
    let image = image::load_from_memory(bytes).map_err(|source| TextureError::Decode {
        path: PathBuf::from("<memory>"),
        source,
    })?;
    Ok(DecodedImage::from_dynamic(image, options))
}

/// Uploaded texture with its view and sampler
#[derive(Debug)]
pub struct Texture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl Texture {
    /// Upload a decoded image, building mips if requested
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        options: &TextureOptions,
        label: &str,
    ) -> Result<Self, RenderError> {
        let limit = device.limits().max_texture_dimension_2d;
        if image.width > limit || image.height > limit {
            return Err(RenderError::TextureTooLarge {
                width: image.width,
                height: image.height,
                limit,
            });
        }

        let (mip_level_count, data) = if options.generate_mipmaps {
            let levels = image.mip_chain();
            let count = levels.len() as u32;
            let data: Vec<u8> = levels.into_iter().flat_map(RgbaImage::into_raw).collect();
            (count, data)
        } else {
            (1, image.pixels.clone())
        };

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: TEXTURE_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&options.sampler_descriptor());

        debug!(
            "Uploaded texture '{}': {}x{}, {} mip levels",
            label, image.width, image.height, mip_level_count
        );

        Ok(Self {
            texture,
            view,
            sampler,
            width: image.width,
            height: image.height,
        })
    }

    /// Decode and upload an image file
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        options: &TextureOptions,
    ) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let image = decode_image(path, options)?;
        Self::from_image(device, queue, &image, options, &path.display().to_string())
    }

    /// Like [`Texture::load`], but a failure yields the white fallback
    pub fn load_or_fallback(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        options: &TextureOptions,
    ) -> Self {
        let path = path.as_ref();
        match Self::load(device, queue, path, options) {
            Ok(texture) => texture,
            Err(err) => {
                warn!("Texture {} unavailable, using white fallback: {}", path.display(), err);
                Self::white(device, queue)
            }
        }
    }

    /// 1×1 opaque white texture
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Fallback White Texture"),
                size: wgpu::Extent3d {
                    width: 1,
                    height: 1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: TEXTURE_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &[255u8, 255, 255, 255],
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let options = TextureOptions {
            generate_mipmaps: false,
            ..Default::default()
        };
        let sampler = device.create_sampler(&options.sampler_descriptor());

        Self {
            texture,
            view,
            sampler,
            width: 1,
            height: 1,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mip_level_count(&self) -> u32 {
        self.texture.mip_level_count()
    }
}
