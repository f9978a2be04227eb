use crate::notify::{ChangeNotifier, Derived, Property};
use crate::settings::StereoSettings;
use log::*;
use stereo_core::nalgebra::{Point3, Vector3};
use stereo_core::{
    CameraPose, Eye, GraphicsApi, Lens, ProjectionMatrix, StereoMode, StereoRig, Transform,
    ViewMatrix,
};

/// A stereoscopic camera rig derived from a single logical camera.
///
/// The camera holds a pose, a [`StereoRig`] and a [`Lens`], and keeps the left, right and
/// center view matrices and the projection matrix up to date. Every setter recomputes the
/// matrices that depend on the changed input before it returns, and then reports the change
/// to the notifier `N` (see [`crate::notify`] for the available strategies).
///
/// The camera is meant to be owned by a single thread. A renderer on another thread must
/// synchronize access externally.
///
/// ```
/// use stereo_camera::StereoCamera;
/// use stereo_core::{GraphicsApi, Transform};
/// use stereo_core::nalgebra::Point3;
///
/// let mut camera = StereoCamera::new(GraphicsApi::Vulkan);
/// camera.set_interocular_distance(10.0);
/// camera.set_convergence_plane_distance(30.0);
///
/// let p = camera.view_left().transform_point(Point3::new(0.0, 0.0, -100.0));
/// assert!((p - Point3::new(5.0, 0.0, -100.0)).norm() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct StereoCamera<N = ()> {
    pose: CameraPose,
    rig: StereoRig,
    lens: Lens,
    api: GraphicsApi,
    view_left: ViewMatrix,
    view_right: ViewMatrix,
    view_center: ViewMatrix,
    projection: ProjectionMatrix,
    notifier: N,
}

impl StereoCamera<()> {
    /// Creates a camera with default pose, rig and lens, without change propagation.
    pub fn new(api: GraphicsApi) -> Self {
        Self::with_notifier(api, ())
    }
}

impl<N: ChangeNotifier> StereoCamera<N> {
    /// Creates a camera with default pose, rig and lens.
    pub fn with_notifier(api: GraphicsApi, notifier: N) -> Self {
        Self::from_parts(
            CameraPose::default(),
            StereoRig::default(),
            Lens::default(),
            api,
            notifier,
        )
    }

    /// Creates a camera from all of its inputs. No notification is emitted.
    pub fn from_parts(
        pose: CameraPose,
        rig: StereoRig,
        lens: Lens,
        api: GraphicsApi,
        notifier: N,
    ) -> Self {
        let mut camera = Self {
            pose,
            rig,
            lens,
            api,
            view_left: ViewMatrix::identity(),
            view_right: ViewMatrix::identity(),
            view_center: ViewMatrix::identity(),
            projection: ProjectionMatrix::identity(),
            notifier,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    /// Creates a camera from [`StereoSettings`]. The settings are not validated.
    pub fn from_settings(settings: &StereoSettings, notifier: N) -> Self {
        Self::from_parts(
            settings.pose(),
            settings.rig(),
            settings.lens(),
            settings.graphics_api,
            notifier,
        )
    }

    pub fn position(&self) -> Point3<f64> {
        self.pose.position
    }

    pub fn forward_vector(&self) -> Vector3<f64> {
        self.pose.forward.into_inner()
    }

    pub fn up_vector(&self) -> Vector3<f64> {
        self.pose.up.into_inner()
    }

    /// The unit vector pointing from the camera position towards the right eye of an
    /// unflipped rig. Zero if forward and up are parallel.
    pub fn right_vector(&self) -> Vector3<f64> {
        self.pose.right()
    }

    pub fn interocular_distance(&self) -> f64 {
        self.rig.interocular_distance
    }

    pub fn convergence_plane_distance(&self) -> f64 {
        self.rig.convergence_plane_distance
    }

    pub fn flipped(&self) -> bool {
        self.rig.flipped
    }

    pub fn shear(&self) -> bool {
        self.rig.shear
    }

    pub fn mode(&self) -> StereoMode {
        self.rig.mode
    }

    pub fn converge_on_near(&self) -> bool {
        self.rig.converge_on_near
    }

    pub fn near_plane(&self) -> f64 {
        self.lens.near_plane
    }

    pub fn far_plane(&self) -> f64 {
        self.lens.far_plane
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.lens.aspect_ratio
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f64 {
        self.lens.fov
    }

    pub fn graphics_api(&self) -> GraphicsApi {
        self.api
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn rig(&self) -> &StereoRig {
        &self.rig
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notifier, e.g. to take [`crate::DirtyFlags`] or subscribe a listener.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// See [`StereoRig::shear_coefficient`].
    pub fn shear_coefficient(&self) -> f64 {
        self.rig.shear_coefficient()
    }

    pub fn eye_position(&self, eye: Eye) -> Point3<f64> {
        self.rig.eye_position(&self.pose, eye)
    }

    pub fn convergence_point(&self) -> Point3<f64> {
        self.rig.convergence_point(&self.pose)
    }

    pub fn view_left(&self) -> ViewMatrix {
        self.view_left
    }

    pub fn view_right(&self) -> ViewMatrix {
        self.view_right
    }

    pub fn view_center(&self) -> ViewMatrix {
        self.view_center
    }

    pub fn view(&self, eye: Eye) -> ViewMatrix {
        match eye {
            Eye::Left => self.view_left,
            Eye::Right => self.view_right,
        }
    }

    pub fn projection(&self) -> ProjectionMatrix {
        self.projection
    }

    pub fn set_position(&mut self, position: Point3<f64>) {
        self.pose.position = position;
        self.changed(Property::Position);
    }

    /// Sets the forward vector to `forward` normalized. A zero vector is ignored.
    pub fn set_forward_vector(&mut self, forward: Vector3<f64>) {
        if self.pose.set_forward(forward) {
            self.changed(Property::ForwardVector);
        } else {
            debug!("ignoring zero forward vector");
        }
    }

    /// Sets the up vector to `up` normalized. A zero vector is ignored.
    pub fn set_up_vector(&mut self, up: Vector3<f64>) {
        if self.pose.set_up(up) {
            self.changed(Property::UpVector);
        } else {
            debug!("ignoring zero up vector");
        }
    }

    pub fn set_interocular_distance(&mut self, distance: f64) {
        self.rig.interocular_distance = distance;
        self.changed(Property::InterocularDistance);
    }

    pub fn set_convergence_plane_distance(&mut self, distance: f64) {
        self.rig.convergence_plane_distance = distance;
        self.changed(Property::ConvergencePlaneDistance);
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.rig.flipped = flipped;
        self.changed(Property::Flipped);
    }

    pub fn set_shear(&mut self, shear: bool) {
        self.rig.shear = shear;
        self.changed(Property::Shear);
    }

    pub fn set_mode(&mut self, mode: StereoMode) {
        self.rig.mode = mode;
        self.changed(Property::Mode);
    }

    pub fn set_converge_on_near(&mut self, converge_on_near: bool) {
        self.rig.converge_on_near = converge_on_near;
        self.changed(Property::ConvergeOnNear);
    }

    pub fn set_near_plane(&mut self, near_plane: f64) {
        self.lens.near_plane = near_plane;
        self.changed(Property::NearPlane);
    }

    pub fn set_far_plane(&mut self, far_plane: f64) {
        self.lens.far_plane = far_plane;
        self.changed(Property::FarPlane);
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.lens.aspect_ratio = aspect_ratio;
        self.changed(Property::AspectRatio);
    }

    /// Sets the vertical field of view in degrees.
    pub fn set_fov(&mut self, fov: f64) {
        self.lens.fov = fov;
        self.changed(Property::Fov);
    }

    pub fn set_graphics_api(&mut self, api: GraphicsApi) {
        self.api = api;
        self.changed(Property::GraphicsApi);
    }

    /// Reports a change of state held outside the camera (e.g. orbit parameters).
    pub(crate) fn notify(&mut self, property: Property) {
        self.notifier.notify(property);
    }

    fn changed(&mut self, property: Property) {
        match property.derived() {
            Derived::View => self.update_view_matrix(),
            Derived::Projection => self.update_projection_matrix(),
        }
        self.notifier.notify(property);
    }

    fn update_view_matrix(&mut self) {
        trace!(
            "recomputing view matrices at {:?} in {:?} mode",
            self.pose.position,
            self.rig.mode
        );
        self.view_left = self.rig.view(&self.pose, Eye::Left);
        self.view_right = self.rig.view(&self.pose, Eye::Right);
        self.view_center = self.pose.view();
    }

    fn update_projection_matrix(&mut self) {
        trace!("recomputing {:?} projection for {:?}", self.api, self.lens);
        self.projection = self.lens.projection(self.api);
    }
}
