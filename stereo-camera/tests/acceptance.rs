use approx::assert_relative_eq;
use float_eq::assert_float_eq;
use stereo_camera::{
    stereo_core::{
        nalgebra::{Point3, Vector3},
        Eye, GraphicsApi, StereoMode, Transform, ViewMatrix,
    },
    StereoCamera,
};

fn canonical(api: GraphicsApi) -> StereoCamera {
    let mut camera = StereoCamera::new(api);
    camera.set_position(Point3::origin());
    camera.set_forward_vector(-Vector3::z());
    camera.set_up_vector(Vector3::y());
    camera.set_interocular_distance(10.0);
    camera.set_convergence_plane_distance(30.0);
    camera.set_aspect_ratio(1.0);
    camera.set_near_plane(1.0);
    camera.set_far_plane(1000.0);
    camera.set_fov(45.0);
    camera.set_shear(false);
    camera
}

#[test]
fn left_eye_sees_point_shifted_by_half_interocular() {
    for api in [GraphicsApi::OpenGl, GraphicsApi::Vulkan] {
        let camera = canonical(api);
        let p = camera
            .view_left()
            .transform_point(Point3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(p, Point3::new(5.0, 0.0, -100.0), epsilon = 1e-9);
        let p = camera
            .view_right()
            .transform_point(Point3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(p, Point3::new(-5.0, 0.0, -100.0), epsilon = 1e-9);
    }
}

#[test]
fn flipped_swaps_eyes() {
    let mut camera = canonical(GraphicsApi::OpenGl);
    let (left, right) = (camera.view_left(), camera.view_right());
    camera.set_flipped(true);
    assert_eq!(camera.view_left(), right);
    assert_eq!(camera.view_right(), left);
}

#[test]
fn vulkan_depth_is_zero_to_one() {
    let camera = canonical(GraphicsApi::Vulkan);
    let near = camera
        .projection()
        .transform_point(Point3::new(0.0, 0.0, -1.0));
    let far = camera
        .projection()
        .transform_point(Point3::new(0.0, 0.0, -1000.0));
    assert_float_eq!(near.z, 0.0, abs <= 1e-9);
    assert_float_eq!(far.z, 1.0, abs <= 1e-9);
}

#[test]
fn opengl_depth_is_minus_one_to_one() {
    let camera = canonical(GraphicsApi::OpenGl);
    let near = camera
        .projection()
        .transform_point(Point3::new(0.0, 0.0, -1.0));
    let far = camera
        .projection()
        .transform_point(Point3::new(0.0, 0.0, -1000.0));
    assert_float_eq!(near.z, -1.0, abs <= 1e-9);
    assert_float_eq!(far.z, 1.0, abs <= 1e-9);
}

#[test]
fn center_view_ignores_stereo_settings() {
    let mut camera = canonical(GraphicsApi::OpenGl);
    camera.set_position(Point3::new(1.0, -2.0, 3.0));
    camera.set_forward_vector(Vector3::new(1.0, 0.5, -1.0));
    let expected = ViewMatrix::look_at(
        &camera.position(),
        &(camera.position() + camera.forward_vector()),
        &camera.up_vector(),
    );
    for mode in [StereoMode::ToeIn, StereoMode::AsymmetricFrustum] {
        for shear in [false, true] {
            camera.set_mode(mode);
            camera.set_shear(shear);
            camera.set_converge_on_near(shear);
            assert_relative_eq!(*camera.view_center(), *expected, epsilon = 1e-12);
        }
    }
}

#[test]
fn toe_in_eyes_look_at_convergence_point() {
    let mut camera = canonical(GraphicsApi::OpenGl);
    camera.set_mode(StereoMode::ToeIn);
    let convergence = camera.convergence_point();
    assert_relative_eq!(convergence, Point3::new(0.0, 0.0, -30.0), epsilon = 1e-12);
    for eye in Eye::BOTH {
        let p = camera.view(eye).transform_point(convergence);
        assert_float_eq!(p.x, 0.0, abs <= 1e-9);
        assert_float_eq!(p.y, 0.0, abs <= 1e-9);
        assert!(p.z < 0.0);
    }
}

#[test]
fn shear_aligns_eyes_on_convergence_plane() {
    let mut camera = canonical(GraphicsApi::OpenGl);
    camera.set_shear(true);
    camera.set_converge_on_near(true);
    assert_float_eq!(camera.shear_coefficient(), 1.0 / 6.0, abs <= 1e-12);

    let on_plane = Point3::new(2.0, 1.0, -30.0);
    let left = camera.view_left().transform_point(on_plane);
    let right = camera.view_right().transform_point(on_plane);
    assert_float_eq!(left.x, right.x, abs <= 1e-9);

    let beyond = Point3::new(0.0, 0.0, -100.0);
    let left = camera.view_left().transform_point(beyond);
    let right = camera.view_right().transform_point(beyond);
    assert!(left.x < right.x);
}
