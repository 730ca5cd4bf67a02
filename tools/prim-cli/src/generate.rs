//! Generate command - build one shape and export it

use anyhow::{Context, Result};
use clap::Args;
use primkit_geometry::{MeshBuffer, Primitive, write_obj};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::args::{ShapeArgs, parse_color};

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Write a Wavefront OBJ file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the raw interleaved vertex floats (little-endian f32, 11 per vertex)
    #[arg(long)]
    pub raw: Option<PathBuf>,

    /// Vertex color as r,g,b
    #[arg(long, value_parser = parse_color)]
    pub tint: Option<[f32; 3]>,

    /// Object name written to the OBJ file (defaults to the shape kind)
    #[arg(long)]
    pub name: Option<String>,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let mut generated = args.shape.to_shape().build();
    if let Some(color) = args.tint {
        generated.mesh_mut().tint(color);
    }

    let kind = generated.kind();
    println!(
        "Generated {}: {} triangles, {} vertices",
        kind,
        generated.triangle_count(),
        generated.vertex_count()
    );

    if args.output.is_none() && args.raw.is_none() {
        println!("  (no --output or --raw given, nothing written)");
        return Ok(());
    }

    let name = args.name.as_deref().unwrap_or(kind);
    if let Some(path) = &args.output {
        write_obj(generated.mesh(), path, name)
            .with_context(|| format!("Failed to write OBJ: {}", path.display()))?;
        info!("Wrote {}", path.display());
        println!("  OBJ: {}", path.display());
    }
    if let Some(path) = &args.raw {
        write_raw(generated.mesh(), path)?;
        println!("  Raw: {} ({} bytes)", path.display(), generated.mesh().as_bytes().len());
    }

    Ok(())
}

/// Dump the vertex floats exactly as they would be uploaded
pub fn write_raw(mesh: &MeshBuffer, path: &Path) -> Result<()> {
    let bytes: Vec<u8> = mesh
        .as_floats()
        .iter()
        .flat_map(|f| f.to_le_bytes())
        .collect();
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write raw vertices: {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
