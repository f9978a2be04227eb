use crate::notify::{ChangeNotifier, Property};
use crate::settings::StereoSettings;
use crate::StereoCamera;
use core::f64::consts::{FRAC_PI_2, PI};
use core::ops::{Deref, DerefMut};
use log::*;
use stereo_core::nalgebra::{Point3, Rotation3, Translation3, Unit, Vector3};
use stereo_core::{CameraPose, GraphicsApi, Lens, StereoRig};

/// The smallest orbit radius.
pub const MIN_RADIUS: f64 = 1e-3;

/// How close the polar angle may get to either pole, in radians.
pub const POLE_EPSILON: f64 = 1e-3;

const RADIUS_TOLERANCE: f64 = 1e-9;

/// A [`StereoCamera`] which orbits a target point, for drag-to-rotate navigation.
///
/// The pose is parameterized by spherical coordinates around `target`:
///
/// ```text
/// position = target + radius * (sin(theta) cos(phi), cos(theta), sin(theta) sin(phi))
/// forward  = target - position
/// ```
///
/// `theta` is the polar angle from world up (positive y) and `phi` the azimuth in the xz
/// plane. Changing any of them moves the camera and recomputes the views.
///
/// The wrapped [`StereoCamera`] is reachable through `Deref`/`DerefMut`, so every stereo and
/// lens setter is available. Moving the camera directly with [`StereoCamera::set_position`],
/// [`OrbitalStereoCamera::translate`] or [`OrbitalStereoCamera::zoom`] does not update the
/// spherical state; [`OrbitalStereoCamera::look_at_target`] snaps the camera back onto its
/// orbit.
#[derive(Debug, Clone)]
pub struct OrbitalStereoCamera<N = ()> {
    camera: StereoCamera<N>,
    radius: f64,
    phi: f64,
    theta: f64,
    target: Point3<f64>,
}

impl OrbitalStereoCamera<()> {
    /// Creates a camera 10 units in front of the origin on the positive z axis.
    pub fn new(api: GraphicsApi) -> Self {
        Self::with_notifier(api, ())
    }
}

impl<N: ChangeNotifier> OrbitalStereoCamera<N> {
    pub fn with_notifier(api: GraphicsApi, notifier: N) -> Self {
        Self::from_parts(
            Point3::origin(),
            10.0,
            FRAC_PI_2,
            FRAC_PI_2,
            StereoRig::default(),
            Lens::default(),
            api,
            notifier,
        )
    }

    /// Creates an orbiting camera with world up as its up vector.
    /// The radius and polar angle are clamped.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        target: Point3<f64>,
        radius: f64,
        phi: f64,
        theta: f64,
        rig: StereoRig,
        lens: Lens,
        api: GraphicsApi,
        notifier: N,
    ) -> Self {
        Self::build(
            target,
            radius,
            phi,
            theta,
            Vector3::y(),
            rig,
            lens,
            api,
            notifier,
        )
    }

    /// Creates an orbiting camera from the orbit, up vector, rig and lens of the settings.
    ///
    /// The position and forward vector of the settings are ignored.
    pub fn from_settings(settings: &StereoSettings, notifier: N) -> Self {
        Self::build(
            settings.target,
            settings.radius,
            settings.phi,
            settings.theta,
            settings.up,
            settings.rig(),
            settings.lens(),
            settings.graphics_api,
            notifier,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        target: Point3<f64>,
        radius: f64,
        phi: f64,
        theta: f64,
        up: Vector3<f64>,
        rig: StereoRig,
        lens: Lens,
        api: GraphicsApi,
        notifier: N,
    ) -> Self {
        let radius = clamp_radius(radius);
        let theta = clamp_theta(theta);
        let position = orbit_position(&target, radius, phi, theta);
        let mut pose = CameraPose {
            position,
            ..CameraPose::default()
        };
        pose.set_forward(target - position);
        pose.set_up(up);
        Self {
            camera: StereoCamera::from_parts(pose, rig, lens, api, notifier),
            radius,
            phi,
            theta,
            target,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn target(&self) -> Point3<f64> {
        self.target
    }

    /// Sets the orbit radius, clamped to at least [`MIN_RADIUS`].
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = clamp_radius(radius);
        self.update_position();
        self.camera.notify(Property::Radius);
    }

    pub fn set_phi(&mut self, phi: f64) {
        self.phi = phi;
        self.update_position();
        self.camera.notify(Property::Phi);
    }

    /// Sets the polar angle, clamped into `(POLE_EPSILON, PI - POLE_EPSILON)`.
    pub fn set_theta(&mut self, theta: f64) {
        self.theta = clamp_theta(theta);
        self.update_position();
        self.camera.notify(Property::Theta);
    }

    pub fn set_target(&mut self, target: Point3<f64>) {
        self.target = target;
        self.update_position();
        self.camera.notify(Property::Target);
    }

    /// Moves the camera back onto the orbit described by the spherical state.
    pub fn look_at_target(&mut self) {
        self.update_position();
    }

    /// Orbits the camera around the target.
    ///
    /// `dx` turns the camera by `-dx` radians about world up and `dy` tilts it by `dy` radians
    /// about `cross(up, forward)`, both pivoting on the target. The up vector is then rebuilt
    /// from world up so the horizon stays level. A rotation ending closer to a pole than
    /// [`POLE_EPSILON`] is pulled back onto the clamped orbit.
    ///
    /// Returns `true` if the up vector reversed, meaning the camera went over a pole. Callers
    /// typically invert the vertical drag direction from then on so dragging keeps moving
    /// the scene the same way on screen.
    pub fn rotate(&mut self, dx: f64, dy: f64) -> bool {
        let previous_up = self.camera.up_vector();
        let forward = self.camera.forward_vector();

        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), -dx);
        let pitch = match Unit::try_new(previous_up.cross(&forward), 0.0) {
            Some(axis) => Rotation3::from_axis_angle(&axis, dy),
            None => Rotation3::identity(),
        };
        let rotation = yaw * pitch;
        let to_target = Translation3::from(self.target.coords);
        let transform = to_target.to_homogeneous()
            * rotation.to_homogeneous()
            * to_target.inverse().to_homogeneous();

        let position = transform.transform_point(&self.camera.position());
        self.camera.set_position(position);
        self.camera.set_forward_vector(self.target - position);
        self.sync_spherical();

        let forward = self.camera.forward_vector();
        let up = forward
            .cross(&Vector3::y())
            .cross(&forward)
            .try_normalize(0.0)
            .unwrap_or_else(|| rotation * previous_up);
        self.camera.set_up_vector(up);

        let flipped = self.camera.up_vector().dot(&previous_up) < 0.0;
        if flipped {
            debug!("orbit crossed a pole, up vector reversed");
        }
        flipped
    }

    /// Pans the camera along its right and up vectors. The target does not move.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let offset = self.camera.right_vector() * dx - self.camera.up_vector() * dy;
        let position = self.camera.position() + offset;
        self.camera.set_position(position);
    }

    /// Moves the camera `distance` along its forward vector. The radius does not change.
    pub fn zoom(&mut self, distance: f64) {
        let position = self.camera.position() + self.camera.forward_vector() * distance;
        self.camera.set_position(position);
    }

    pub fn into_inner(self) -> StereoCamera<N> {
        self.camera
    }

    fn update_position(&mut self) {
        let position = orbit_position(&self.target, self.radius, self.phi, self.theta);
        self.camera.set_position(position);
        self.camera.set_forward_vector(self.target - position);
    }

    /// Derives the spherical state from the camera position after a free rotation.
    ///
    /// A position outside the clamps is moved back onto the clamped orbit. Directly above or
    /// below the target the azimuth is undefined, so the previous `phi` is kept.
    fn sync_spherical(&mut self) {
        let offset = self.camera.position() - self.target;
        let radius = offset.norm();
        if radius == 0.0 {
            return;
        }
        let horizontal = offset.x.hypot(offset.z);
        let theta = horizontal.atan2(offset.y);
        if horizontal > radius * f64::EPSILON {
            self.phi = offset.z.atan2(offset.x);
        }
        self.theta = clamp_theta(theta);

        // Rotations preserve the distance up to rounding, which is not a radius change.
        let radius_changed = (radius - self.radius).abs() > RADIUS_TOLERANCE * self.radius;
        if radius_changed {
            self.radius = clamp_radius(radius);
        }
        if self.theta != theta || (radius_changed && self.radius != radius) {
            debug!(
                "rotation left the orbit, clamping to radius {} theta {}",
                self.radius, self.theta
            );
            self.update_position();
        }

        if radius_changed {
            self.camera.notify(Property::Radius);
        }
        self.camera.notify(Property::Phi);
        self.camera.notify(Property::Theta);
    }
}

impl<N> Deref for OrbitalStereoCamera<N> {
    type Target = StereoCamera<N>;

    fn deref(&self) -> &Self::Target {
        &self.camera
    }
}

impl<N> DerefMut for OrbitalStereoCamera<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.camera
    }
}

fn clamp_radius(radius: f64) -> f64 {
    radius.max(MIN_RADIUS)
}

fn clamp_theta(theta: f64) -> f64 {
    theta.clamp(POLE_EPSILON, PI - POLE_EPSILON)
}

fn orbit_position(target: &Point3<f64>, radius: f64, phi: f64, theta: f64) -> Point3<f64> {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    target + Vector3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi) * radius
}
