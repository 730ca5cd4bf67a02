//! Shape descriptors loaded from TOML and exported to disk

use glam::Vec3;
use primkit_geometry::{CylinderParams, Primitive, Shape, Sphere, SphereParams, write_obj};
use serde::Deserialize;

#[derive(Deserialize)]
struct Scene {
    shapes: Vec<Shape>,
}

const SCENE: &str = r#"
[[shapes]]
kind = "plane"
length = 10.0
width = 10.0

[[shapes]]
kind = "cube"
position = [0.0, 0.5, 0.0]

[[shapes]]
kind = "cylinder"
position = [1.5, 0.37, 0.5]
radius = 0.6
height = 1.5
sides = 40
subdivisions = 3
draw_top = false

[[shapes]]
kind = "pyramid"
height = 1.0

[[shapes]]
kind = "sphere"
radius_long = 0.5
radius_lat = 0.5
sides = 30
semi_circle = true
"#;

#[test]
fn every_kind_deserializes_with_defaults() {
    let scene: Scene = toml::from_str(SCENE).unwrap();
    let kinds: Vec<&str> = scene.shapes.iter().map(Shape::kind).collect();
    assert_eq!(kinds, Shape::KINDS);

    match scene.shapes[2] {
        Shape::Cylinder(params) => {
            assert_eq!(
                params,
                CylinderParams {
                    position: Vec3::new(1.5, 0.37, 0.5),
                    radius: 0.6,
                    height: 1.5,
                    sides: 40,
                    subdivisions: 3,
                    draw_top: false,
                    draw_bottom: true,
                }
            );
        }
        other => panic!("expected cylinder, got {:?}", other),
    }

    match scene.shapes[1] {
        Shape::Cube(params) => {
            assert_eq!(params.position, Vec3::new(0.0, 0.5, 0.0));
            assert_eq!((params.length, params.width, params.height), (2.0, 2.0, 2.0));
        }
        other => panic!("expected cube, got {:?}", other),
    }
}

#[test]
fn scene_builds_expected_counts() {
    let scene: Scene = toml::from_str(SCENE).unwrap();
    let counts: Vec<usize> = scene
        .shapes
        .iter()
        .map(|shape| shape.build().triangle_count())
        .collect();
    assert_eq!(counts, vec![2, 12, 281, 6, 931]);
}

#[test]
fn unknown_kind_is_rejected() {
    let result: Result<Scene, _> = toml::from_str("[[shapes]]\nkind = \"torus\"\n");
    assert!(result.is_err());
}

#[test]
fn shape_serializes_back_to_toml() {
    let shape = Shape::from(SphereParams::uniform(Vec3::ONE, 2.0, 12, false));
    let text = toml::to_string(&shape).unwrap();
    assert!(text.contains("kind = \"sphere\""));

    let parsed: Shape = toml::from_str(&text).unwrap();
    assert_eq!(parsed, shape);
}

#[test]
fn obj_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dome.obj");

    let dome = Sphere::uniform(Vec3::ZERO, 1.0, 8, true);
    write_obj(dome.mesh(), &path, "dome").unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let faces = text.lines().filter(|l| l.starts_with("f ")).count();
    assert_eq!(faces, dome.triangle_count());
    assert!(text.lines().any(|l| l == "o dome"));
}
