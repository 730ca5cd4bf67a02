//! Tests for render context packing

use glam::{Mat4, Vec3, Vec4};

use super::*;

#[test]
fn test_uniform_sizes_are_16_byte_multiples() {
    for size in [
        std::mem::size_of::<FrameUniforms>(),
        std::mem::size_of::<ObjectUniforms>(),
        std::mem::size_of::<GpuPointLight>(),
        std::mem::size_of::<GpuSpotLight>(),
        std::mem::size_of::<GpuDirectionalLight>(),
        std::mem::size_of::<GpuMaterial>(),
    ] {
        assert_eq!(size % 16, 0, "size {} is not 16-byte aligned", size);
    }

    assert_eq!(std::mem::size_of::<FrameUniforms>(), 640);
    assert_eq!(std::mem::size_of::<ObjectUniforms>(), 160);
}

#[test]
fn test_projection_toggle_round_trip() {
    let perspective = Projection::perspective(60.0, 2.0);
    let ortho = perspective.toggle();

    assert!(!ortho.is_perspective());
    assert!((ortho.aspect() - 2.0).abs() < 1e-6);
    match ortho {
        Projection::Orthographic {
            half_width,
            half_height,
            ..
        } => {
            assert_eq!(half_height, DEFAULT_ORTHO_HALF_HEIGHT);
            assert_eq!(half_width, DEFAULT_ORTHO_HALF_HEIGHT * 2.0);
        }
        other => panic!("expected orthographic, got {:?}", other),
    }

    let back = ortho.toggle();
    assert!(back.is_perspective());
    assert!((back.aspect() - 2.0).abs() < 1e-6);
}

#[test]
fn test_perspective_maps_near_and_far_to_depth_range() {
    let projection = Projection::perspective(90.0, 1.0);
    let m = projection.matrix();

    let near = m * Vec4::new(0.0, 0.0, -0.01, 1.0);
    let far = m * Vec4::new(0.0, 0.0, -100.0, 1.0);
    assert!((near.z / near.w).abs() < 1e-4);
    assert!((far.z / far.w - 1.0).abs() < 1e-4);
}

#[test]
fn test_orthographic_bounds() {
    let m = Projection::orthographic(4.0, 1.25).matrix();
    let corner = m * Vec4::new(5.0, 4.0, -1.0, 1.0);
    assert!((corner.x - 1.0).abs() < 1e-5);
    assert!((corner.y - 1.0).abs() < 1e-5);
}

#[test]
fn test_frame_uniforms_pack_lights() {
    let mut context = RenderContext::look_at(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Projection::default());
    context.point_lights.push(PointLight::new(Vec3::new(0.2, 0.4, 0.15), Vec3::X));
    context.spot_light.enabled = true;

    let frame = context.frame_uniforms();
    assert_eq!(frame.counts[0], 1);
    assert_eq!(frame.camera_position, [0.0, 1.0, 3.0, 1.0]);
    assert_eq!(frame.point_lights[0].position, [0.2, 0.4, 0.15, 1.0]);
    assert_eq!(frame.point_lights[0].diffuse, [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(frame.point_lights[1], GpuPointLight::default());

    // Enable flags ride in the w components
    assert_eq!(frame.directional.direction[3], 1.0);
    assert_eq!(frame.spot.position[3], 1.0);
    let inner = frame.spot.direction[3];
    let outer = frame.spot.attenuation[3];
    assert!(inner > outer, "inner cone must be tighter than outer");
}

#[test]
fn test_extra_point_lights_dropped() {
    let mut context = RenderContext::default();
    for i in 0..6 {
        context
            .point_lights
            .push(PointLight::new(Vec3::splat(i as f32), Vec3::ONE));
    }

    let frame = context.frame_uniforms();
    assert_eq!(frame.counts[0], MAX_POINT_LIGHTS as u32);
    assert_eq!(frame.point_lights[3].position, [3.0, 3.0, 3.0, 1.0]);
}

#[test]
fn test_object_uniforms_normal_matrix() {
    let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
    let object = ObjectUniforms::new(model, &Material::default());

    let normal = Mat4::from_cols_array_2d(&object.normal_matrix);
    let n = (normal * Vec4::new(1.0, 0.0, 0.0, 0.0)).truncate();
    assert!((n - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);

    // Singular matrices fall back to identity
    let flat = ObjectUniforms::new(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)), &Material::default());
    assert_eq!(flat.normal_matrix, Mat4::IDENTITY.to_cols_array_2d());
    assert_eq!(flat.material.params[0], 32.0);
}

#[test]
fn test_view_projection_order() {
    let context = RenderContext::default();
    assert_eq!(
        context.view_projection(),
        context.projection.matrix() * context.view
    );
}
