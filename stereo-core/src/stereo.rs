use crate::{CameraPose, ViewMatrix};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// How the two eye cameras converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum StereoMode {
    /// Both eyes rotate inwards to look at the convergence point.
    ///
    /// Simple, but introduces vertical parallax towards the edges of the frame.
    ToeIn,
    /// The eyes stay parallel and the images are aligned on the convergence plane by a shear.
    #[default]
    AsymmetricFrustum,
}

/// One eye of the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// The other eye.
    pub fn opposite(self) -> Self {
        match self {
            Eye::Left => Eye::Right,
            Eye::Right => Eye::Left,
        }
    }
}

/// The stereo parameters of a rig, independent of where the rig is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct StereoRig {
    /// Distance between the two eyes, in meters.
    pub interocular_distance: f64,
    /// Distance of the zero parallax plane in front of the camera, in meters.
    pub convergence_plane_distance: f64,
    /// Swaps which side of the camera each eye is placed on.
    pub flipped: bool,
    /// Applies [`crate::stereo_shear`] to the eye views in [`StereoMode::AsymmetricFrustum`].
    pub shear: bool,
    pub mode: StereoMode,
    pub converge_on_near: bool,
}

impl Default for StereoRig {
    fn default() -> Self {
        Self {
            interocular_distance: 0.06,
            convergence_plane_distance: 1.0,
            flipped: false,
            shear: false,
            mode: StereoMode::default(),
            converge_on_near: false,
        }
    }
}

impl StereoRig {
    /// The horizontal skew that lines the eyes up on the convergence plane.
    ///
    /// This is `0` unless `converge_on_near` is set, in which case it is
    /// `interocular_distance / 2 / convergence_plane_distance`, negated when `flipped`.
    /// The left eye is sheared by the coefficient and the right eye by its negation.
    ///
    /// ```
    /// use stereo_core::StereoRig;
    /// let rig = StereoRig {
    ///     interocular_distance: 10.0,
    ///     convergence_plane_distance: 30.0,
    ///     converge_on_near: true,
    ///     ..StereoRig::default()
    /// };
    /// assert!((rig.shear_coefficient() - 1.0 / 6.0).abs() < 1e-12);
    /// ```
    pub fn shear_coefficient(&self) -> f64 {
        if !self.converge_on_near {
            return 0.0;
        }
        let sign = if self.flipped { -1.0 } else { 1.0 };
        sign * self.interocular_distance * 0.5 / self.convergence_plane_distance
    }

    /// The offset of `eye` from the camera position.
    ///
    /// The left eye sits on the negative right vector unless the rig is flipped.
    pub fn eye_offset(&self, pose: &CameraPose, eye: Eye) -> Vector3<f64> {
        let half = pose.right() * (self.interocular_distance * 0.5);
        match (eye, self.flipped) {
            (Eye::Left, false) | (Eye::Right, true) => -half,
            (Eye::Right, false) | (Eye::Left, true) => half,
        }
    }

    pub fn eye_position(&self, pose: &CameraPose, eye: Eye) -> Point3<f64> {
        pose.position + self.eye_offset(pose, eye)
    }

    /// The point on the convergence plane straight ahead of the camera.
    pub fn convergence_point(&self, pose: &CameraPose) -> Point3<f64> {
        pose.point_ahead(self.convergence_plane_distance)
    }

    /// The view matrix of one eye.
    pub fn view(&self, pose: &CameraPose, eye: Eye) -> ViewMatrix {
        let position = self.eye_position(pose, eye);
        match self.mode {
            StereoMode::ToeIn => {
                ViewMatrix::look_at(&position, &self.convergence_point(pose), &pose.up)
            }
            StereoMode::AsymmetricFrustum => {
                let view = ViewMatrix::look_at(
                    &position,
                    &(position + pose.forward.into_inner()),
                    &pose.up,
                );
                if self.shear {
                    let coefficient = self.shear_coefficient();
                    view.sheared(match eye {
                        Eye::Left => coefficient,
                        Eye::Right => -coefficient,
                    })
                } else {
                    view
                }
            }
        }
    }
}
