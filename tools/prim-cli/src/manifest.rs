//! shapes.toml manifest parsing
//!
//! Shared manifest structures used by the build and render commands.

use anyhow::{Context, Result, bail};
use glam::Vec3;
use primkit_geometry::{Generated, Shape};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// shapes.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub camera: CameraSection,
    #[serde(default)]
    pub lights: LightsSection,
    #[serde(default)]
    pub shapes: Vec<ShapeEntry>,
}

/// Camera used by `prim render`
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Start in orthographic projection
    pub orthographic: bool,
    /// Clear color as r,g,b
    pub background: [f32; 3],
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            eye: [0.0, 1.0, 3.0],
            target: [0.0, 0.0, 0.0],
            fov: primkit_render::context::DEFAULT_FOV_DEGREES,
            orthographic: false,
            background: [0.1, 0.1, 0.1],
        }
    }
}

impl CameraSection {
    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.eye)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }
}

/// Extra lights for `prim render`; the directional light is always on
#[derive(Debug, Default, Deserialize)]
pub struct LightsSection {
    #[serde(default)]
    pub points: Vec<PointLightEntry>,
    /// Spot light at the camera, pointing at the target
    #[serde(default)]
    pub flashlight: bool,
}

#[derive(Debug, Deserialize)]
pub struct PointLightEntry {
    pub position: [f32; 3],
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
}

fn default_light_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Single shape entry
///
/// `kind` and the shape's parameters sit directly in the entry table.
#[derive(Debug, Deserialize)]
pub struct ShapeEntry {
    pub name: String,
    #[serde(flatten)]
    pub shape: Shape,
    /// Vertex color; white when omitted
    #[serde(default)]
    pub tint: Option<[f32; 3]>,
    /// Diffuse texture for `prim render`, relative to the manifest
    #[serde(default)]
    pub texture: Option<PathBuf>,
}

impl ShapeEntry {
    /// Generate the mesh with the tint applied
    pub fn build(&self) -> Generated {
        let mut generated = self.shape.build();
        if let Some(color) = self.tint {
            generated.mesh_mut().tint(color);
        }
        generated
    }
}

impl Manifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content).context("Failed to parse shapes.toml")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Names must be non-empty, unique and usable as file names
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.shapes {
            let name = entry.name.trim();
            if name.is_empty() {
                bail!("Shape entry with empty name ({})", entry.shape.kind());
            }
            if name.contains(['/', '\\']) {
                bail!("Shape name '{}' must not contain path separators", name);
            }
            if !seen.insert(name) {
                bail!("Duplicate shape name '{}'", name);
            }
        }
        Ok(())
    }
}
