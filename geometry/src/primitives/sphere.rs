//! Latitude/longitude sphere with independent horizontal and vertical radii

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

use super::Primitive;
use crate::mesh::{CapFacing, FanCap, MeshBuffer, MeshBuilder};
use crate::params::SphereParams;

/// Number of latitude bands for a (sanitized) sphere
///
/// A full sphere uses `sides - 1` bands from pole to pole; a hemisphere uses
/// `sides / 2` bands from the north pole down to the equator.
pub fn latitude_bands(sides: u32, semi_circle: bool) -> u32 {
    if semi_circle { sides / 2 } else { sides - 1 }
}

/// `(sin φ, cos φ)` for every ring, with the poles and equator pinned exactly
fn ring_angles(bands: u32, semi_circle: bool) -> Vec<(f32, f32)> {
    let span = if semi_circle { FRAC_PI_2 } else { PI };
    let step = span / bands as f32;

    (0..=bands)
        .map(|i| {
            if i == 0 {
                (0.0, 1.0)
            } else if i == bands && semi_circle {
                (1.0, 0.0)
            } else if i == bands {
                (0.0, -1.0)
            } else {
                (step * i as f32).sin_cos()
            }
        })
        .collect()
}

/// `(cos θ, sin θ)` for every meridian, the last one closing the seam exactly
fn meridian_angles(sides: u32) -> Vec<(f32, f32)> {
    (0..=sides)
        .map(|j| {
            if j == sides {
                (1.0, 0.0)
            } else {
                let (sin, cos) = ((2.0 * PI * j as f32) / sides as f32).sin_cos();
                (cos, sin)
            }
        })
        .collect()
}

/// Generate a flat-shaded sphere or upper hemisphere
///
/// # Layout
/// - Grid: `bands × sides` cells from the north pole downwards, each emitted
///   as triangles `(v1, v2, v3)` and `(v2, v4, v3)` where `v1, v2` sit on the
///   upper ring and `v3, v4` on the lower one
/// - Hemisphere cap (if `semi_circle`): `sides + 1` fan triangles at
///   `position.y`, facing -Y, radius `radius_long`
///
/// # UV Mapping
/// - Grid: `u = 1 - j/sides`, `v = i/sides`
/// - Cap: polar `(cos θ, sin θ)`
///
/// Pole triangles have no area; they take the outward direction through
/// their centroid as normal.
pub fn generate_sphere<M: MeshBuilder>(params: &SphereParams) -> M {
    let params = params.sanitized();
    let mut mesh = M::default();

    let p = params.position;
    let sides = params.sides;
    let bands = latitude_bands(sides, params.semi_circle);

    let rings = ring_angles(bands, params.semi_circle);
    let meridians = meridian_angles(sides);
    let step = 1.0 / sides as f32;

    let point = |i: u32, j: u32| -> (Vec3, Vec2) {
        let (sin_phi, cos_phi) = rings[i as usize];
        let (cos_theta, sin_theta) = meridians[j as usize];
        let position = Vec3::new(
            p.x + params.radius_long * sin_phi * cos_theta,
            p.y + params.radius_lat * cos_phi,
            p.z + params.radius_long * sin_phi * sin_theta,
        );
        (position, Vec2::new(1.0 - step * j as f32, step * i as f32))
    };

    let outward = |corners: &[(Vec3, Vec2); 3]| -> Vec3 {
        let centroid = (corners[0].0 + corners[1].0 + corners[2].0) / 3.0;
        centroid - p
    };

    for i in 0..bands {
        for j in 0..sides {
            let v1 = point(i, j);
            let v2 = point(i, j + 1);
            let v3 = point(i + 1, j);
            let v4 = point(i + 1, j + 1);

            let upper = [v1, v2, v3];
            let lower = [v2, v4, v3];
            mesh.push_flat_triangle(upper, outward(&upper));
            mesh.push_flat_triangle(lower, outward(&lower));
        }
    }

    if params.semi_circle {
        mesh.push_fan_cap(FanCap {
            center: p,
            radius: params.radius_long,
            sides,
            facing: CapFacing::Down,
        });
    }

    mesh
}

/// Sphere generator with its computed mesh
#[derive(Clone, Debug)]
pub struct Sphere {
    params: SphereParams,
    mesh: MeshBuffer,
}

impl Sphere {
    pub fn new(params: SphereParams) -> Self {
        let params = params.sanitized();
        let mesh = generate_sphere(&params);
        Self { params, mesh }
    }

    pub fn with(
        position: Vec3,
        radius_long: f32,
        radius_lat: f32,
        sides: u32,
        semi_circle: bool,
    ) -> Self {
        Self::new(SphereParams {
            position,
            radius_long,
            radius_lat,
            sides,
            semi_circle,
        })
    }

    /// Sphere with the same radius on every axis
    pub fn uniform(position: Vec3, radius: f32, sides: u32, semi_circle: bool) -> Self {
        Self::new(SphereParams::uniform(position, radius, sides, semi_circle))
    }

    pub fn params(&self) -> &SphereParams {
        &self.params
    }

    pub fn is_hemisphere(&self) -> bool {
        self.params.semi_circle
    }
}

impl Primitive for Sphere {
    fn kind(&self) -> &'static str {
        "sphere"
    }

    fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }
}
