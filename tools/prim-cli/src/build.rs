//! Build command - generate every manifest shape and export it to OBJ

use anyhow::{Context, Result, bail};
use clap::Args;
use primkit_geometry::{Primitive, write_obj};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::generate::write_raw;
use crate::manifest::Manifest;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the shapes manifest
    #[arg(default_value = "shapes.toml")]
    pub manifest: PathBuf,

    /// Directory the meshes are written to
    #[arg(long, default_value = "build")]
    pub out_dir: PathBuf,

    /// Also write each mesh as raw vertex floats (<name>.bin)
    #[arg(long)]
    pub raw: bool,

    /// Fail if any mesh violates the triangle list invariants
    #[arg(long)]
    pub strict: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let written = build_manifest(&manifest, &args.out_dir, args.raw, args.strict)?;

    println!(
        "Built {} shape(s) into {}",
        written.len(),
        args.out_dir.display()
    );
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}

/// Generate and export every entry, returning the OBJ paths in manifest order
pub fn build_manifest(
    manifest: &Manifest,
    out_dir: &Path,
    raw: bool,
    strict: bool,
) -> Result<Vec<PathBuf>> {
    if manifest.shapes.is_empty() {
        warn!("Manifest declares no shapes");
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(manifest.shapes.len());
    for entry in &manifest.shapes {
        let generated = entry.build();
        let mesh = generated.mesh();

        let issues = mesh.validate();
        if !issues.is_empty() {
            for issue in &issues {
                warn!("{}: {}", entry.name, issue);
            }
            if strict {
                bail!("Shape '{}' has {} invariant violation(s)", entry.name, issues.len());
            }
        }

        let obj_path = out_dir.join(format!("{}.obj", entry.name));
        write_obj(mesh, &obj_path, &entry.name)
            .with_context(|| format!("Failed to write OBJ: {}", obj_path.display()))?;
        debug!(
            "{} ({}): {} triangles -> {}",
            entry.name,
            generated.kind(),
            generated.triangle_count(),
            obj_path.display()
        );

        if raw {
            write_raw(mesh, &out_dir.join(format!("{}.bin", entry.name)))?;
        }
        written.push(obj_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[[shapes]]
name = "floor"
kind = "plane"
length = 10.0
width = 10.0

[[shapes]]
name = "can"
kind = "cylinder"
radius = 0.6
height = 1.5
sides = 40
subdivisions = 3
draw_top = false

[[shapes]]
name = "dome"
kind = "sphere"
sides = 30
semi_circle = true
"#;

    #[test]
    fn test_build_manifest_writes_objs() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let manifest = Manifest::parse(MANIFEST).unwrap();

        let written = build_manifest(&manifest, &out_dir, true, true).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(written[1], out_dir.join("can.obj"));

        let can = std::fs::read_to_string(&written[1]).unwrap();
        assert!(can.starts_with("# 281 triangles\no can\n"));
        assert_eq!(can.lines().filter(|l| l.starts_with("f ")).count(), 281);

        let dome = std::fs::read_to_string(&written[2]).unwrap();
        assert_eq!(dome.lines().filter(|l| l.starts_with("f ")).count(), 931);

        let raw = std::fs::metadata(out_dir.join("floor.bin")).unwrap();
        assert_eq!(raw.len(), 6 * 44);
    }

    #[test]
    fn test_build_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::parse("").unwrap();
        let written = build_manifest(&manifest, dir.path(), false, false).unwrap();
        assert!(written.is_empty());
    }
}
