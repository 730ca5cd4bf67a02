//! Shape parameters and their validation
//!
//! Every generator runs its parameters through `sanitized()` before any
//! geometry is computed. Out-of-range values are clamped to the nearest safe
//! value and logged; generation itself never fails.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fewest sides a round shape may have
pub const MIN_SIDES: u32 = 3;

/// Most sides a round shape may have
pub const MAX_SIDES: u32 = 256;

/// Fewest height bands a cylinder may have
pub const MIN_SUBDIVISIONS: u32 = 1;

/// Most height bands a cylinder may have
pub const MAX_SUBDIVISIONS: u32 = 256;

/// Clamp a linear extent to a finite, non-negative value
pub(crate) fn sanitize_extent(shape: &str, name: &str, value: f32) -> f32 {
    if !value.is_finite() {
        warn!("{}: {} must be finite, got {}, using 0.0", shape, name, value);
        0.0
    } else if value < 0.0 {
        warn!("{}: {} must be >= 0.0, got {}, clamping to 0.0", shape, name, value);
        0.0
    } else {
        value
    }
}

/// Replace a non-finite anchor component with zero
pub(crate) fn sanitize_position(shape: &str, position: Vec3) -> Vec3 {
    if position.is_finite() {
        position
    } else {
        warn!("{}: position {} is not finite, using origin", shape, position);
        Vec3::ZERO
    }
}

pub(crate) fn sanitize_sides(shape: &str, sides: u32) -> u32 {
    if sides < MIN_SIDES {
        warn!(
            "{}: sides must be >= {}, got {}, clamping to {}",
            shape, MIN_SIDES, sides, MIN_SIDES
        );
        MIN_SIDES
    } else if sides > MAX_SIDES {
        warn!(
            "{}: sides must be <= {}, got {}, clamping to {}",
            shape, MAX_SIDES, sides, MAX_SIDES
        );
        MAX_SIDES
    } else {
        sides
    }
}

pub(crate) fn sanitize_subdivisions(shape: &str, subdivisions: u32) -> u32 {
    if subdivisions < MIN_SUBDIVISIONS {
        // Zero bands is a normal "no subdivision" request, not a mistake
        tracing::debug!("{}: subdivisions {} coerced to {}", shape, subdivisions, MIN_SUBDIVISIONS);
        MIN_SUBDIVISIONS
    } else if subdivisions > MAX_SUBDIVISIONS {
        warn!(
            "{}: subdivisions must be <= {}, got {}, clamping to {}",
            shape, MAX_SUBDIVISIONS, subdivisions, MAX_SUBDIVISIONS
        );
        MAX_SUBDIVISIONS
    } else {
        subdivisions
    }
}

/// Flat ground rectangle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneParams {
    /// Center of the rectangle
    pub position: Vec3,
    /// Extent along Z
    pub length: f32,
    /// Extent along X
    pub width: f32,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            length: 2.0,
            width: 2.0,
        }
    }
}

impl PlaneParams {
    pub fn sanitized(self) -> Self {
        Self {
            position: sanitize_position("plane", self.position),
            length: sanitize_extent("plane", "length", self.length),
            width: sanitize_extent("plane", "width", self.width),
        }
    }
}

/// Axis-aligned box standing on its anchor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeParams {
    /// Bottom-center of the box
    pub position: Vec3,
    /// Extent along Z
    pub length: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            length: 2.0,
            width: 2.0,
            height: 2.0,
        }
    }
}

impl CubeParams {
    pub fn sanitized(self) -> Self {
        Self {
            position: sanitize_position("cube", self.position),
            length: sanitize_extent("cube", "length", self.length),
            width: sanitize_extent("cube", "width", self.width),
            height: sanitize_extent("cube", "height", self.height),
        }
    }
}

/// Upright cylinder with optional caps
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderParams {
    /// Center of the bottom cap
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
    /// Angular segments around the circumference (min 3)
    pub sides: u32,
    /// Height bands from bottom to top (min 1)
    pub subdivisions: u32,
    pub draw_top: bool,
    pub draw_bottom: bool,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius: 2.0,
            height: 2.0,
            sides: 8,
            subdivisions: 1,
            draw_top: true,
            draw_bottom: true,
        }
    }
}

impl CylinderParams {
    pub fn sanitized(self) -> Self {
        Self {
            position: sanitize_position("cylinder", self.position),
            radius: sanitize_extent("cylinder", "radius", self.radius),
            height: sanitize_extent("cylinder", "height", self.height),
            sides: sanitize_sides("cylinder", self.sides),
            subdivisions: sanitize_subdivisions("cylinder", self.subdivisions),
            ..self
        }
    }
}

/// Four-sided pyramid on a rectangular base
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidParams {
    /// Center of the base
    pub position: Vec3,
    /// Base extent along Z
    pub length: f32,
    /// Base extent along X
    pub width: f32,
    /// Apex height above the base
    pub height: f32,
}

impl Default for PyramidParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            length: 2.0,
            width: 2.0,
            height: 0.5,
        }
    }
}

impl PyramidParams {
    pub fn sanitized(self) -> Self {
        Self {
            position: sanitize_position("pyramid", self.position),
            length: sanitize_extent("pyramid", "length", self.length),
            width: sanitize_extent("pyramid", "width", self.width),
            height: sanitize_extent("pyramid", "height", self.height),
        }
    }
}

/// Sphere or spheroid, optionally cut to its upper half
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    /// Center of the sphere (and of the hemisphere cap)
    pub position: Vec3,
    /// Horizontal (XZ) radius
    pub radius_long: f32,
    /// Vertical (Y) radius
    pub radius_lat: f32,
    /// Longitude segments; also sets the latitude band count (min 3)
    pub sides: u32,
    /// Keep only the upper hemisphere and close it with a flat cap
    pub semi_circle: bool,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius_long: 1.0,
            radius_lat: 1.0,
            sides: 8,
            semi_circle: false,
        }
    }
}

impl SphereParams {
    /// Parameters for a sphere with equal radii
    pub fn uniform(position: Vec3, radius: f32, sides: u32, semi_circle: bool) -> Self {
        Self {
            position,
            radius_long: radius,
            radius_lat: radius,
            sides,
            semi_circle,
        }
    }

    pub fn sanitized(self) -> Self {
        Self {
            position: sanitize_position("sphere", self.position),
            radius_long: sanitize_extent("sphere", "radius_long", self.radius_long),
            radius_lat: sanitize_extent("sphere", "radius_lat", self.radius_lat),
            sides: sanitize_sides("sphere", self.sides),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_zero_counts_clamped() {
        let params = CylinderParams {
            sides: 0,
            subdivisions: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(params.sides, MIN_SIDES);
        assert_eq!(params.subdivisions, MIN_SUBDIVISIONS);
        assert!(params.draw_top && params.draw_bottom);
    }

    #[test]
    fn test_oversized_counts_clamped() {
        let cylinder = CylinderParams {
            sides: u32::MAX,
            subdivisions: 100_000,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cylinder.sides, MAX_SIDES);
        assert_eq!(cylinder.subdivisions, MAX_SUBDIVISIONS);

        let sphere = SphereParams::uniform(Vec3::ZERO, 1.0, 100_000, false).sanitized();
        assert_eq!(sphere.sides, MAX_SIDES);

        let at_limit = SphereParams::uniform(Vec3::ZERO, 1.0, MAX_SIDES, true);
        assert_eq!(at_limit.sanitized(), at_limit);
    }

    #[test]
    fn test_sphere_low_sides_clamped() {
        for sides in [0, 1, 2] {
            let params = SphereParams::uniform(Vec3::ZERO, 1.0, sides, true).sanitized();
            assert_eq!(params.sides, 3);
            assert!(params.semi_circle);
        }
    }

    #[test]
    fn test_negative_and_nan_extents_clamped() {
        let cube = CubeParams {
            position: Vec3::new(f32::NAN, 1.0, 1.0),
            length: -1.0,
            width: f32::INFINITY,
            height: 3.0,
        }
        .sanitized();
        assert_eq!(cube.position, Vec3::ZERO);
        assert_eq!(cube.length, 0.0);
        assert_eq!(cube.width, 0.0);
        assert_eq!(cube.height, 3.0);
    }

    #[test]
    fn test_valid_params_untouched() {
        let params = CylinderParams {
            position: Vec3::new(1.5, 0.37, 0.5),
            radius: 0.6,
            height: 1.5,
            sides: 40,
            subdivisions: 3,
            draw_top: false,
            draw_bottom: true,
        };
        assert_eq!(params.sanitized(), params);

        let pyramid = PyramidParams::default();
        assert_eq!(pyramid.sanitized(), pyramid);
    }

    #[test]
    fn test_defaults_match_reference_constructors() {
        assert_eq!(CubeParams::default().height, 2.0);
        assert_eq!(PyramidParams::default().height, 0.5);
        let cylinder = CylinderParams::default();
        assert_eq!((cylinder.radius, cylinder.sides, cylinder.subdivisions), (2.0, 8, 1));
        let sphere = SphereParams::default();
        assert_eq!((sphere.radius_long, sphere.sides, sphere.semi_circle), (1.0, 8, false));
    }
}
