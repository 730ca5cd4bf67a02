//! Shape selection shared by the single-shape commands

use clap::{Args, ValueEnum};
use glam::Vec3;
use primkit_geometry::{CubeParams, CylinderParams, PlaneParams, PyramidParams, Shape, SphereParams};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeKind {
    Plane,
    Cube,
    Cylinder,
    Pyramid,
    Sphere,
}

/// Shape kind plus its parameters; omitted values use the shape's defaults
#[derive(Args, Debug)]
pub struct ShapeArgs {
    /// Shape to generate
    #[arg(value_enum)]
    pub kind: ShapeKind,

    /// Anchor point as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub position: Option<Vec3>,

    /// Extent along Z (plane, cube, pyramid)
    #[arg(long)]
    pub length: Option<f32>,

    /// Extent along X (plane, cube, pyramid)
    #[arg(long)]
    pub width: Option<f32>,

    /// Extent along Y (cube, cylinder, pyramid)
    #[arg(long)]
    pub height: Option<f32>,

    /// Radius (cylinder); horizontal radius (sphere)
    #[arg(long)]
    pub radius: Option<f32>,

    /// Vertical radius (sphere, defaults to --radius)
    #[arg(long)]
    pub radius_lat: Option<f32>,

    /// Segments around the circumference (cylinder, sphere)
    #[arg(long)]
    pub sides: Option<u32>,

    /// Height bands (cylinder)
    #[arg(long)]
    pub subdivisions: Option<u32>,

    /// Leave the top cap open (cylinder)
    #[arg(long)]
    pub no_top: bool,

    /// Leave the bottom cap open (cylinder)
    #[arg(long)]
    pub no_bottom: bool,

    /// Upper hemisphere with a flat cap (sphere)
    #[arg(long)]
    pub semi: bool,
}

impl ShapeArgs {
    /// Build the shape descriptor
    pub fn to_shape(&self) -> Shape {
        self.warn_unused();

        match self.kind {
            ShapeKind::Plane => {
                let d = PlaneParams::default();
                Shape::Plane(PlaneParams {
                    position: self.position.unwrap_or(d.position),
                    length: self.length.unwrap_or(d.length),
                    width: self.width.unwrap_or(d.width),
                })
            }
            ShapeKind::Cube => {
                let d = CubeParams::default();
                Shape::Cube(CubeParams {
                    position: self.position.unwrap_or(d.position),
                    length: self.length.unwrap_or(d.length),
                    width: self.width.unwrap_or(d.width),
                    height: self.height.unwrap_or(d.height),
                })
            }
            ShapeKind::Cylinder => {
                let d = CylinderParams::default();
                Shape::Cylinder(CylinderParams {
                    position: self.position.unwrap_or(d.position),
                    radius: self.radius.unwrap_or(d.radius),
                    height: self.height.unwrap_or(d.height),
                    sides: self.sides.unwrap_or(d.sides),
                    subdivisions: self.subdivisions.unwrap_or(d.subdivisions),
                    draw_top: !self.no_top,
                    draw_bottom: !self.no_bottom,
                })
            }
            ShapeKind::Pyramid => {
                let d = PyramidParams::default();
                Shape::Pyramid(PyramidParams {
                    position: self.position.unwrap_or(d.position),
                    length: self.length.unwrap_or(d.length),
                    width: self.width.unwrap_or(d.width),
                    height: self.height.unwrap_or(d.height),
                })
            }
            ShapeKind::Sphere => {
                let d = SphereParams::default();
                let radius_long = self.radius.unwrap_or(d.radius_long);
                Shape::Sphere(SphereParams {
                    position: self.position.unwrap_or(d.position),
                    radius_long,
                    radius_lat: self.radius_lat.or(self.radius).unwrap_or(d.radius_lat),
                    sides: self.sides.unwrap_or(d.sides),
                    semi_circle: self.semi,
                })
            }
        }
    }

    fn warn_unused(&self) {
        let given = [
            ("--length", self.length.is_some()),
            ("--width", self.width.is_some()),
            ("--height", self.height.is_some()),
            ("--radius", self.radius.is_some()),
            ("--radius-lat", self.radius_lat.is_some()),
            ("--sides", self.sides.is_some()),
            ("--subdivisions", self.subdivisions.is_some()),
            ("--no-top", self.no_top),
            ("--no-bottom", self.no_bottom),
            ("--semi", self.semi),
        ];
        let accepted: &[&str] = match self.kind {
            ShapeKind::Plane => &["--length", "--width"],
            ShapeKind::Cube | ShapeKind::Pyramid => &["--length", "--width", "--height"],
            ShapeKind::Cylinder => &[
                "--radius",
                "--height",
                "--sides",
                "--subdivisions",
                "--no-top",
                "--no-bottom",
            ],
            ShapeKind::Sphere => &["--radius", "--radius-lat", "--sides", "--semi"],
        };

        for (flag, _) in given.iter().filter(|(flag, set)| *set && !accepted.contains(flag)) {
            warn!("{} does not apply to {:?}, ignoring", flag, self.kind);
        }
    }
}

/// Parse `x,y,z`
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let [x, y, z] = parse_floats::<3>(s)?;
    Ok(Vec3::new(x, y, z))
}

/// Parse `r,g,b` with components in [0, 1]
pub fn parse_color(s: &str) -> Result<[f32; 3], String> {
    let rgb = parse_floats::<3>(s)?;
    if rgb.iter().any(|c| !(0.0..=1.0).contains(c)) {
        return Err(format!("color components must be in 0..=1, got '{}'", s));
    }
    Ok(rgb)
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated numbers, got '{}'", N, s));
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|e| format!("invalid number '{}': {}", part, e))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: ShapeKind) -> ShapeArgs {
        ShapeArgs {
            kind,
            position: None,
            length: None,
            width: None,
            height: None,
            radius: None,
            radius_lat: None,
            sides: None,
            subdivisions: None,
            no_top: false,
            no_bottom: false,
            semi: false,
        }
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").is_err());
    }

    #[test]
    fn test_parse_color_range() {
        assert_eq!(parse_color("1,0.5,0").unwrap(), [1.0, 0.5, 0.0]);
        assert!(parse_color("1.5,0,0").is_err());
    }

    #[test]
    fn test_omitted_values_use_defaults() {
        assert_eq!(args(ShapeKind::Cube).to_shape(), Shape::Cube(CubeParams::default()));
        assert_eq!(
            args(ShapeKind::Cylinder).to_shape(),
            Shape::Cylinder(CylinderParams::default())
        );
    }

    #[test]
    fn test_cylinder_flags() {
        let mut a = args(ShapeKind::Cylinder);
        a.sides = Some(40);
        a.subdivisions = Some(3);
        a.no_top = true;
        let Shape::Cylinder(p) = a.to_shape() else {
            panic!("expected cylinder");
        };
        assert_eq!((p.sides, p.subdivisions), (40, 3));
        assert!(!p.draw_top && p.draw_bottom);
    }

    #[test]
    fn test_sphere_radius_lat_follows_radius() {
        let mut a = args(ShapeKind::Sphere);
        a.radius = Some(2.0);
        a.semi = true;
        let Shape::Sphere(p) = a.to_shape() else {
            panic!("expected sphere");
        };
        assert_eq!((p.radius_long, p.radius_lat), (2.0, 2.0));
        assert!(p.semi_circle);

        a.radius_lat = Some(0.5);
        let Shape::Sphere(p) = a.to_shape() else {
            panic!("expected sphere");
        };
        assert_eq!(p.radius_lat, 0.5);
    }
}
