//! Wavefront OBJ export
//!
//! Writes one `v`/`vt`/`vn` line per vertex and one `f` line per triangle.
//! The mesh is non-indexed, so face `k` always references vertices
//! `3k+1..=3k+3` (OBJ indices are 1-based).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::mesh::MeshBuffer;

/// Write `mesh` as an OBJ object called `name` to `path`
pub fn write_obj(mesh: &MeshBuffer, path: impl AsRef<Path>, name: &str) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_obj_to(&mut writer, mesh, name)?;
    writer.flush()
}

/// Write `mesh` as an OBJ object called `name` to any writer
pub fn write_obj_to<W: Write>(writer: &mut W, mesh: &MeshBuffer, name: &str) -> io::Result<()> {
    writeln!(writer, "# {} triangles", mesh.triangle_count())?;
    writeln!(writer, "o {}", name)?;

    for v in mesh.vertices() {
        let [x, y, z] = v.position;
        let [r, g, b] = v.color;
        writeln!(writer, "v {} {} {} {} {} {}", x, y, z, r, g, b)?;
    }
    for v in mesh.vertices() {
        writeln!(writer, "vt {} {}", v.uv[0], v.uv[1])?;
    }
    for v in mesh.vertices() {
        let [x, y, z] = v.normal;
        writeln!(writer, "vn {} {} {}", x, y, z)?;
    }

    for k in 0..mesh.triangle_count() {
        let base = 3 * k + 1;
        writeln!(
            writer,
            "f {0}/{0}/{0} {1}/{1}/{1} {2}/{2}/{2}",
            base,
            base + 1,
            base + 2
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Plane, Primitive};
    use glam::Vec3;

    #[test]
    fn test_obj_line_counts() {
        let plane = Plane::with(Vec3::ZERO, 2.0, 2.0);
        let mut out = Vec::new();
        write_obj_to(&mut out, plane.mesh(), "ground").unwrap();
        let text = String::from_utf8(out).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 6);
        assert_eq!(count("vt "), 6);
        assert_eq!(count("vn "), 6);
        assert_eq!(count("f "), 2);
        assert!(text.contains("o ground"));
        assert!(text.contains("f 4/4/4 5/5/5 6/6/6"));
    }

    #[test]
    fn test_obj_writes_vertex_color() {
        let mut mesh = Plane::with(Vec3::ZERO, 1.0, 1.0).mesh().clone();
        mesh.tint([0.5, 0.25, 1.0]);
        let mut out = Vec::new();
        write_obj_to(&mut out, &mesh, "tinted").unwrap();
        let text = String::from_utf8(out).unwrap();

        let first = text.lines().find(|l| l.starts_with("v ")).unwrap();
        assert!(first.ends_with("0.5 0.25 1"), "{}", first);
    }
}
