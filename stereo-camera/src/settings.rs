use core::f64::consts::FRAC_PI_2;
use stereo_core::nalgebra::{Point3, Vector3};
use stereo_core::{CameraPose, GraphicsApi, Lens, StereoMode, StereoRig};
use thiserror::Error;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`crate::StereoCamera`] or [`crate::OrbitalStereoCamera`].
///
/// Missing fields fall back to their defaults when deserializing, so a settings file only has
/// to name what it changes.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StereoSettings {
    /// The position of the logical camera
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_position"))]
    pub position: Point3<f64>,
    /// The direction the camera looks in (normalized on use)
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_forward"))]
    pub forward: Vector3<f64>,
    /// The up direction of the camera (normalized on use)
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_up"))]
    pub up: Vector3<f64>,
    /// The distance between the eyes in meters
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_interocular_distance")
    )]
    pub interocular_distance: f64,
    /// The distance of the zero parallax plane in meters
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_convergence_plane_distance")
    )]
    pub convergence_plane_distance: f64,
    /// Swap the eyes
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub flipped: bool,
    /// Shear the eye views onto the convergence plane
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub shear: bool,
    /// Toe-in or asymmetric frustum
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub mode: StereoMode,
    /// Enables the shear coefficient
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub converge_on_near: bool,
    /// The vertical field of view in degrees
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_fov"))]
    pub fov: f64,
    /// Viewport width over height
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_aspect_ratio"))]
    pub aspect_ratio: f64,
    /// The near clipping plane in meters
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_near_plane"))]
    pub near_plane: f64,
    /// The far clipping plane in meters
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_far_plane"))]
    pub far_plane: f64,
    /// The depth convention of the projection
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub graphics_api: GraphicsApi,
    /// The point an orbiting camera circles
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_target"))]
    pub target: Point3<f64>,
    /// The distance of an orbiting camera from its target
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_radius"))]
    pub radius: f64,
    /// The azimuth of an orbiting camera in radians
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_phi"))]
    pub phi: f64,
    /// The polar angle of an orbiting camera in radians, measured from world up
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_theta"))]
    pub theta: f64,
}

impl Default for StereoSettings {
    fn default() -> Self {
        Self {
            position: default_position(),
            forward: default_forward(),
            up: default_up(),
            interocular_distance: default_interocular_distance(),
            convergence_plane_distance: default_convergence_plane_distance(),
            flipped: false,
            shear: false,
            mode: StereoMode::default(),
            converge_on_near: false,
            fov: default_fov(),
            aspect_ratio: default_aspect_ratio(),
            near_plane: default_near_plane(),
            far_plane: default_far_plane(),
            graphics_api: GraphicsApi::default(),
            target: default_target(),
            radius: default_radius(),
            phi: default_phi(),
            theta: default_theta(),
        }
    }
}

fn default_position() -> Point3<f64> {
    CameraPose::default().position
}

fn default_forward() -> Vector3<f64> {
    CameraPose::default().forward.into_inner()
}

fn default_up() -> Vector3<f64> {
    CameraPose::default().up.into_inner()
}

fn default_interocular_distance() -> f64 {
    StereoRig::default().interocular_distance
}

fn default_convergence_plane_distance() -> f64 {
    StereoRig::default().convergence_plane_distance
}

fn default_fov() -> f64 {
    Lens::default().fov
}

fn default_aspect_ratio() -> f64 {
    Lens::default().aspect_ratio
}

fn default_near_plane() -> f64 {
    Lens::default().near_plane
}

fn default_far_plane() -> f64 {
    Lens::default().far_plane
}

fn default_target() -> Point3<f64> {
    Point3::origin()
}

fn default_radius() -> f64 {
    10.0
}

fn default_phi() -> f64 {
    FRAC_PI_2
}

fn default_theta() -> f64 {
    FRAC_PI_2
}

/// A reason settings cannot describe a usable camera.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be the zero vector")]
    ZeroVector { field: &'static str },
    #[error("forward and up must not be parallel")]
    ParallelDirections,
    #[error("far plane ({far}) must lie beyond the near plane ({near})")]
    InvertedPlanes { near: f64, far: f64 },
    #[error("field of view must lie strictly between 0 and 180 degrees, got {0}")]
    FieldOfView(f64),
}

impl StereoSettings {
    /// Checks that the settings describe a usable camera.
    ///
    /// The cameras themselves accept anything; this is meant for input coming from files or
    /// users, where rejecting a bad value beats rendering garbage.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let scalars = [
            ("interocular_distance", self.interocular_distance),
            ("convergence_plane_distance", self.convergence_plane_distance),
            ("fov", self.fov),
            ("aspect_ratio", self.aspect_ratio),
            ("near_plane", self.near_plane),
            ("far_plane", self.far_plane),
            ("radius", self.radius),
            ("phi", self.phi),
            ("theta", self.theta),
        ];
        let vectors = [
            ("position", self.position.coords),
            ("forward", self.forward),
            ("up", self.up),
            ("target", self.target.coords),
        ];
        for (field, value) in scalars
            .into_iter()
            .chain(vectors.iter().flat_map(|(field, v)| v.iter().map(move |&x| (*field, x))))
        {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("convergence_plane_distance", self.convergence_plane_distance),
            ("aspect_ratio", self.aspect_ratio),
            ("near_plane", self.near_plane),
            ("radius", self.radius),
        ] {
            if value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }
        if self.far_plane <= self.near_plane {
            return Err(SettingsError::InvertedPlanes {
                near: self.near_plane,
                far: self.far_plane,
            });
        }
        if self.fov <= 0.0 || self.fov >= 180.0 {
            return Err(SettingsError::FieldOfView(self.fov));
        }

        for (field, v) in [("forward", self.forward), ("up", self.up)] {
            if v == Vector3::zeros() {
                return Err(SettingsError::ZeroVector { field });
            }
        }
        let sine = self.forward.normalize().cross(&self.up.normalize()).norm();
        if sine < 1e-9 {
            return Err(SettingsError::ParallelDirections);
        }
        Ok(())
    }

    /// The camera pose. Zero direction vectors keep the default direction.
    pub fn pose(&self) -> CameraPose {
        let mut pose = CameraPose {
            position: self.position,
            ..CameraPose::default()
        };
        pose.set_forward(self.forward);
        pose.set_up(self.up);
        pose
    }

    pub fn rig(&self) -> StereoRig {
        StereoRig {
            interocular_distance: self.interocular_distance,
            convergence_plane_distance: self.convergence_plane_distance,
            flipped: self.flipped,
            shear: self.shear,
            mode: self.mode,
            converge_on_near: self.converge_on_near,
        }
    }

    pub fn lens(&self) -> Lens {
        Lens {
            fov: self.fov,
            aspect_ratio: self.aspect_ratio,
            near_plane: self.near_plane,
            far_plane: self.far_plane,
        }
    }
}
