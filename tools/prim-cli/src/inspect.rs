//! Inspect command - report statistics and invariant checks for one shape

use anyhow::{Result, bail};
use clap::Args;
use primkit_geometry::{MeshBuffer, Primitive};

use crate::args::ShapeArgs;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Print every triangle's vertices
    #[arg(long)]
    pub triangles: bool,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let shape = args.shape.to_shape();
    let generated = shape.build();
    let mesh = generated.mesh();

    println!("=== {} ===", generated.kind());
    println!("  Params: {:?}", shape.sanitized());
    print_summary(mesh);

    if args.triangles {
        for (k, tri) in mesh.triangles().enumerate() {
            println!("  [{}]", k);
            for v in tri {
                println!(
                    "    pos {:?} normal {:?} uv {:?}",
                    v.position, v.normal, v.uv
                );
            }
        }
    }

    let issues = mesh.validate();
    if issues.is_empty() {
        println!("  Invariants: ok");
        return Ok(());
    }

    println!("  Invariants: {} issue(s)", issues.len());
    for issue in &issues {
        println!("    - {}", issue);
    }
    bail!("{} has {} invariant violation(s)", generated.kind(), issues.len());
}

pub fn print_summary(mesh: &MeshBuffer) {
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Floats: {} ({} bytes)", mesh.float_count(), mesh.as_bytes().len());

    match mesh.bounds() {
        Some(bounds) => {
            println!("  Bounds: {} .. {}", bounds.min, bounds.max);
            println!("  Size: {}", bounds.size());
        }
        None => println!("  Bounds: (empty)"),
    }
    if let Some(centroid) = mesh.centroid() {
        println!("  Centroid: {}", centroid);
    }
}
