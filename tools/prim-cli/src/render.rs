//! Render command - draw a manifest offscreen and save a PNG

use anyhow::{Context, Result};
use clap::Args;
use glam::Vec3;
use primkit_geometry::Primitive;
use primkit_render::context::DEFAULT_ORTHO_HALF_HEIGHT;
use primkit_render::{
    DrawItem, GpuMesh, HeadlessRenderer, PointLight, Projection, RenderContext, SpotLight,
    Texture, TextureOptions,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::manifest::Manifest;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the shapes manifest
    #[arg(default_value = "shapes.toml")]
    pub manifest: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Flip the manifest's projection mode
    #[arg(long)]
    pub toggle_projection: bool,

    /// Draw back faces too (open cylinders, single planes seen from below)
    #[arg(long)]
    pub no_cull: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    if manifest.shapes.is_empty() {
        warn!("{} declares no shapes", args.manifest.display());
    }

    let cull_mode = if args.no_cull {
        None
    } else {
        Some(wgpu::Face::Back)
    };
    let renderer = HeadlessRenderer::new(args.width, args.height, cull_mode)
        .context("Failed to create offscreen renderer")?;

    let meshes = manifest
        .shapes
        .iter()
        .map(|entry| {
            let generated = entry.build();
            renderer
                .upload(generated.mesh(), &entry.name)
                .with_context(|| format!("Failed to upload shape '{}'", entry.name))
        })
        .collect::<Result<Vec<GpuMesh>>>()?;

    // Missing or broken textures fall back to white
    let base_dir = args.manifest.parent().unwrap_or(Path::new("."));
    let textures: Vec<Option<Texture>> = manifest
        .shapes
        .iter()
        .map(|entry| {
            entry.texture.as_ref().map(|path| {
                Texture::load_or_fallback(
                    renderer.device(),
                    renderer.queue(),
                    base_dir.join(path),
                    &TextureOptions::default(),
                )
            })
        })
        .collect();

    let context = scene_context(&manifest, args.width, args.height, args.toggle_projection);
    let items: Vec<DrawItem<'_>> = meshes
        .iter()
        .zip(&textures)
        .map(|(mesh, texture)| DrawItem {
            texture: texture.as_ref(),
            ..DrawItem::new(mesh)
        })
        .collect();
    let [r, g, b] = manifest.camera.background;

    let image = renderer
        .render(&context, &items, [r, g, b, 1.0])
        .context("Failed to render scene")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write image: {}", args.output.display()))?;

    info!("Rendered {} shapes", meshes.len());
    println!(
        "Rendered {} shapes to {} ({}x{})",
        meshes.len(),
        args.output.display(),
        args.width,
        args.height
    );
    Ok(())
}

/// Camera, projection and lights described by the manifest
pub fn scene_context(manifest: &Manifest, width: u32, height: u32, toggle: bool) -> RenderContext {
    let camera = &manifest.camera;
    let aspect = width as f32 / height.max(1) as f32;

    let mut projection = if camera.orthographic {
        Projection::orthographic(DEFAULT_ORTHO_HALF_HEIGHT, aspect)
    } else {
        Projection::perspective(camera.fov, aspect)
    };
    if toggle {
        projection = projection.toggle();
    }

    let mut context = RenderContext::look_at(camera.eye(), camera.target(), projection);
    context.point_lights = manifest
        .lights
        .points
        .iter()
        .map(|p| PointLight::new(Vec3::from_array(p.position), Vec3::from_array(p.color)))
        .collect();
    if manifest.lights.flashlight {
        context.spot_light = SpotLight {
            enabled: true,
            position: camera.eye(),
            direction: (camera.target() - camera.eye()).normalize_or(Vec3::NEG_Z),
            ..SpotLight::default()
        };
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_context_defaults() {
        let manifest = Manifest::parse("").unwrap();
        let context = scene_context(&manifest, 800, 600, false);

        assert!(context.projection.is_perspective());
        assert!((context.projection.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(context.camera_position, Vec3::new(0.0, 1.0, 3.0));
        assert!(context.point_lights.is_empty());
        assert!(!context.spot_light.enabled);
    }

    #[test]
    fn test_scene_context_toggle_and_lights() {
        let manifest = Manifest::parse(
            r#"
[camera]
eye = [0.0, 0.0, 4.0]
orthographic = true

[lights]
flashlight = true

[[lights.points]]
position = [0.0, 3.0, 0.0]
color = [1.0, 0.5, 0.0]
"#,
        )
        .unwrap();

        let ortho = scene_context(&manifest, 400, 400, false);
        assert!(!ortho.projection.is_perspective());
        assert_eq!(ortho.point_lights.len(), 1);
        assert!(ortho.spot_light.enabled);
        assert!((ortho.spot_light.direction - Vec3::NEG_Z).length() < 1e-6);

        let toggled = scene_context(&manifest, 400, 400, true);
        assert!(toggled.projection.is_perspective());
        assert!((toggled.projection.aspect() - 1.0).abs() < 1e-6);
    }
}
