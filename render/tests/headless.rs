//! Offscreen rendering against a real adapter
//!
//! Machines without any GPU or software adapter skip these tests.

use glam::{Mat4, Vec3};
use primkit_geometry::{Cube, MeshBuffer, Plane, Primitive};
use primkit_render::{
    DrawItem, Drawable, GpuMesh, HeadlessRenderer, Projection, RenderContext, RenderError,
};

fn renderer(width: u32, height: u32) -> Option<HeadlessRenderer> {
    match HeadlessRenderer::new(width, height, Some(wgpu::Face::Back)) {
        Ok(renderer) => Some(renderer),
        Err(RenderError::Adapter(err)) => {
            eprintln!("skipping: no adapter ({})", err);
            None
        }
        Err(RenderError::Device(err)) => {
            eprintln!("skipping: no device ({})", err);
            None
        }
        Err(err) => panic!("unexpected renderer error: {}", err),
    }
}

#[test]
fn zero_size_target_is_rejected() {
    let result = HeadlessRenderer::new(0, 16, None);
    assert!(matches!(
        result,
        Err(RenderError::InvalidTargetSize { width: 0, height: 16 })
    ));
}

#[test]
fn empty_mesh_upload_fails() {
    let Some(renderer) = renderer(4, 4) else {
        return;
    };
    let result = GpuMesh::upload(renderer.device(), &MeshBuffer::new(), "empty");
    assert!(matches!(result, Err(RenderError::EmptyMesh)));
}

#[test]
fn upload_and_release() {
    let Some(renderer) = renderer(4, 4) else {
        return;
    };
    let cube = Cube::with(Vec3::ZERO, 1.0, 1.0, 1.0);
    let mut gpu = renderer.upload(cube.mesh(), "cube").unwrap();

    assert_eq!(gpu.vertex_count(), 36);
    assert_eq!(gpu.byte_size(), 36 * 44);
    assert_eq!(gpu.label(), "cube");

    gpu.release();
    assert!(gpu.is_released());
    assert_eq!(gpu.byte_size(), 0);
    // Releasing twice is harmless
    gpu.release();
}

#[test]
fn cube_covers_center_pixel() {
    let Some(renderer) = renderer(64, 64) else {
        return;
    };
    let cube = Cube::with(Vec3::new(0.0, -0.5, 0.0), 1.0, 1.0, 1.0);
    let floor = Plane::with(Vec3::new(0.0, -0.5, 0.0), 0.5, 0.5);
    let cube_gpu = renderer.upload(cube.mesh(), "cube").unwrap();
    let floor_gpu = renderer.upload(floor.mesh(), "floor").unwrap();

    let context = RenderContext::look_at(
        Vec3::new(0.0, 0.0, 3.0),
        Vec3::ZERO,
        Projection::perspective(45.0, 1.0),
    );
    let items = [
        DrawItem::new(&cube_gpu),
        DrawItem {
            model: Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)),
            ..DrawItem::new(&floor_gpu)
        },
    ];

    let image = renderer
        .render(&context, &items, [0.0, 0.0, 0.0, 1.0])
        .unwrap();
    assert_eq!(image.dimensions(), (64, 64));

    let center = image.get_pixel(32, 32);
    let corner = image.get_pixel(0, 0);
    assert_eq!(corner.0, [0, 0, 0, 255]);
    assert!(center.0[..3].iter().any(|&c| c > 0), "cube not visible: {:?}", center);
}
