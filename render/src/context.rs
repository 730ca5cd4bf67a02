//! Per-frame render context and uniform packing
//!
//! Everything a draw needs besides the mesh itself is passed in explicitly:
//! camera matrices, projection mode and the light set. Nothing is global.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use tracing::warn;

/// Point lights the shader evaluates per fragment
pub const MAX_POINT_LIGHTS: usize = 4;

/// Default vertical field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 100.0;
/// Default viewport aspect ratio (800×600)
pub const DEFAULT_ASPECT: f32 = 800.0 / 600.0;
/// Default orthographic half-height in world units
pub const DEFAULT_ORTHO_HALF_HEIGHT: f32 = 4.0;

// ============================================================================
// Projection
// ============================================================================

/// Camera projection
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective {
        fov_y_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        half_width: f32,
        half_height: f32,
        near: f32,
        far: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(DEFAULT_FOV_DEGREES, DEFAULT_ASPECT)
    }
}

impl Projection {
    pub fn perspective(fov_y_degrees: f32, aspect: f32) -> Self {
        Projection::Perspective {
            fov_y_degrees,
            aspect,
            near: 0.01,
            far: 100.0,
        }
    }

    /// Orthographic box `half_height` tall (each way), widened by `aspect`
    pub fn orthographic(half_height: f32, aspect: f32) -> Self {
        Projection::Orthographic {
            half_width: half_height * aspect,
            half_height,
            near: -0.1,
            far: 100.0,
        }
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self, Projection::Perspective { .. })
    }

    pub fn aspect(&self) -> f32 {
        match *self {
            Projection::Perspective { aspect, .. } => aspect,
            Projection::Orthographic {
                half_width,
                half_height,
                ..
            } => {
                if half_height > 0.0 {
                    half_width / half_height
                } else {
                    DEFAULT_ASPECT
                }
            }
        }
    }

    /// Switch between perspective and orthographic, keeping the aspect ratio
    pub fn toggle(&self) -> Self {
        let aspect = self.aspect();
        match self {
            Projection::Perspective { .. } => Self::orthographic(DEFAULT_ORTHO_HALF_HEIGHT, aspect),
            Projection::Orthographic { .. } => Self::perspective(DEFAULT_FOV_DEGREES, aspect),
        }
    }

    /// Right-handed projection matrix with a `[0, 1]` depth range
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov_y_degrees,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, near, far),
            Projection::Orthographic {
                half_width,
                half_height,
                near,
                far,
            } => Mat4::orthographic_rh(-half_width, half_width, -half_height, half_height, near, far),
        }
    }
}

// ============================================================================
// Lights
// ============================================================================

/// Ambient, diffuse and specular contribution of one light
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightColors {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl LightColors {
    /// Same color for all three terms
    pub fn uniform(color: Vec3) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: color,
        }
    }
}

/// Distance falloff `1 / (constant + linear·d + quadratic·d²)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

impl Attenuation {
    fn to_array(self, w: f32) -> [f32; 4] {
        [self.constant, self.linear, self.quadratic, w]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub enabled: bool,
    /// Direction the light travels in
    pub direction: Vec3,
    pub colors: LightColors,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: Vec3::new(-0.2, -1.0, -0.3),
            colors: LightColors {
                ambient: Vec3::splat(0.2),
                diffuse: Vec3::splat(0.4),
                specular: Vec3::splat(0.5),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub colors: LightColors,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            colors: LightColors::uniform(color),
            attenuation: Attenuation::default(),
        }
    }
}

/// Cone light with a soft edge between `cut_off` and `outer_cut_off`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub enabled: bool,
    pub position: Vec3,
    pub direction: Vec3,
    pub colors: LightColors,
    pub attenuation: Attenuation,
    pub cut_off_degrees: f32,
    pub outer_cut_off_degrees: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            enabled: false,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            colors: LightColors {
                ambient: Vec3::ZERO,
                diffuse: Vec3::ONE,
                specular: Vec3::ONE,
            },
            attenuation: Attenuation::default(),
            cut_off_degrees: 15.5,
            outer_cut_off_degrees: 20.0,
        }
    }
}

// ============================================================================
// Render context
// ============================================================================

/// Everything a frame's draws share
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    pub view: Mat4,
    pub projection: Projection,
    pub camera_position: Vec3,
    pub directional_light: DirectionalLight,
    pub point_lights: Vec<PointLight>,
    pub spot_light: SpotLight,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Projection::default())
    }
}

impl RenderContext {
    /// Context for a camera at `eye` looking at `target`, default lights
    pub fn look_at(eye: Vec3, target: Vec3, projection: Projection) -> Self {
        Self {
            view: Mat4::look_at_rh(eye, target, Vec3::Y),
            projection,
            camera_position: eye,
            directional_light: DirectionalLight::default(),
            point_lights: Vec::new(),
            spot_light: SpotLight::default(),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view
    }

    /// Pack into the layout the mesh shader reads
    ///
    /// Lights beyond [`MAX_POINT_LIGHTS`] are dropped with a warning.
    pub fn frame_uniforms(&self) -> FrameUniforms {
        if self.point_lights.len() > MAX_POINT_LIGHTS {
            warn!(
                "RenderContext: {} point lights given, only the first {} are used",
                self.point_lights.len(),
                MAX_POINT_LIGHTS
            );
        }

        let mut point_lights = [GpuPointLight::default(); MAX_POINT_LIGHTS];
        let active = self.point_lights.len().min(MAX_POINT_LIGHTS);
        for (slot, light) in point_lights.iter_mut().zip(&self.point_lights) {
            *slot = GpuPointLight::from(light);
        }

        let dir = &self.directional_light;
        let spot = &self.spot_light;

        FrameUniforms {
            view: self.view.to_cols_array_2d(),
            projection: self.projection.matrix().to_cols_array_2d(),
            camera_position: self.camera_position.extend(1.0).to_array(),
            directional: GpuDirectionalLight {
                direction: dir.direction.extend(flag(dir.enabled)).to_array(),
                ambient: dir.colors.ambient.extend(0.0).to_array(),
                diffuse: dir.colors.diffuse.extend(0.0).to_array(),
                specular: dir.colors.specular.extend(0.0).to_array(),
            },
            point_lights,
            spot: GpuSpotLight {
                position: spot.position.extend(flag(spot.enabled)).to_array(),
                direction: spot
                    .direction
                    .extend(spot.cut_off_degrees.to_radians().cos())
                    .to_array(),
                ambient: spot.colors.ambient.extend(0.0).to_array(),
                diffuse: spot.colors.diffuse.extend(0.0).to_array(),
                specular: spot.colors.specular.extend(0.0).to_array(),
                attenuation: spot
                    .attenuation
                    .to_array(spot.outer_cut_off_degrees.to_radians().cos()),
            },
            counts: [active as u32, 0, 0, 0],
        }
    }
}

fn flag(enabled: bool) -> f32 {
    if enabled { 1.0 } else { 0.0 }
}

// ============================================================================
// GPU layouts
// ============================================================================

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuDirectionalLight {
    /// xyz = direction, w = enabled
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuPointLight {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic
    pub attenuation: [f32; 4],
}

impl From<&PointLight> for GpuPointLight {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.extend(1.0).to_array(),
            ambient: light.colors.ambient.extend(0.0).to_array(),
            diffuse: light.colors.diffuse.extend(0.0).to_array(),
            specular: light.colors.specular.extend(0.0).to_array(),
            attenuation: light.attenuation.to_array(0.0),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuSpotLight {
    /// xyz = position, w = enabled
    pub position: [f32; 4],
    /// xyz = direction, w = cos(inner cut-off)
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, cos(outer cut-off)
    pub attenuation: [f32; 4],
}

/// Group 0 uniform block, written once per frame
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub directional: GpuDirectionalLight,
    pub point_lights: [GpuPointLight; MAX_POINT_LIGHTS],
    pub spot: GpuSpotLight,
    /// x = active point lights
    pub counts: [u32; 4],
}

/// Surface response of one object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Multiplied with vertex color and texture
    pub tint: [f32; 3],
    pub shininess: f32,
    pub specular_strength: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            tint: [1.0, 1.0, 1.0],
            shininess: 32.0,
            specular_strength: 1.0,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuMaterial {
    /// rgb = tint, a = opacity
    pub tint: [f32; 4],
    /// x = shininess, y = specular strength
    pub params: [f32; 4],
}

impl From<&Material> for GpuMaterial {
    fn from(material: &Material) -> Self {
        let [r, g, b] = material.tint;
        Self {
            tint: [r, g, b, 1.0],
            params: [material.shininess, material.specular_strength, 0.0, 0.0],
        }
    }
}

/// Group 1 uniform block, one per draw
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, applied with w = 0
    pub normal_matrix: [[f32; 4]; 4],
    pub material: GpuMaterial,
}

impl ObjectUniforms {
    pub fn new(model: Mat4, material: &Material) -> Self {
        // A singular model matrix would poison every normal with NaN
        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };

        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            material: GpuMaterial::from(material),
        }
    }
}

#[cfg(test)]
mod tests;
