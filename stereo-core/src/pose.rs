use crate::ViewMatrix;
use nalgebra::{Point3, UnitVector3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The pose of the logical camera of a stereo rig.
///
/// `forward` and `up` are always unit length. They are expected not to be parallel, but this
/// is not enforced: a parallel pair produces a zero [`CameraPose::right`] and both eyes
/// collapse onto the camera position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraPose {
    pub position: Point3<f64>,
    pub forward: UnitVector3<f64>,
    pub up: UnitVector3<f64>,
}

impl Default for CameraPose {
    /// At the origin, looking down negative z with positive y up.
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            forward: -Vector3::z_axis(),
            up: Vector3::y_axis(),
        }
    }
}

impl CameraPose {
    /// Creates a pose, normalizing the direction vectors.
    ///
    /// Returns `None` if either direction is the zero vector.
    pub fn new(position: Point3<f64>, forward: Vector3<f64>, up: Vector3<f64>) -> Option<Self> {
        Some(Self {
            position,
            forward: UnitVector3::try_new(forward, 0.0)?,
            up: UnitVector3::try_new(up, 0.0)?,
        })
    }

    /// Replaces the forward vector with `forward` normalized.
    ///
    /// A zero vector is ignored and `false` is returned.
    pub fn set_forward(&mut self, forward: Vector3<f64>) -> bool {
        match UnitVector3::try_new(forward, 0.0) {
            Some(forward) => {
                self.forward = forward;
                true
            }
            None => false,
        }
    }

    /// Replaces the up vector with `up` normalized.
    ///
    /// A zero vector is ignored and `false` is returned.
    pub fn set_up(&mut self, up: Vector3<f64>) -> bool {
        match UnitVector3::try_new(up, 0.0) {
            Some(up) => {
                self.up = up;
                true
            }
            None => false,
        }
    }

    /// The unit right vector, `normalize(cross(forward, up))`.
    ///
    /// This is zero when `forward` and `up` are parallel.
    pub fn right(&self) -> Vector3<f64> {
        self.forward
            .cross(&*self.up)
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros)
    }

    /// The point `distance` in front of the camera.
    pub fn point_ahead(&self, distance: f64) -> Point3<f64> {
        self.position + self.forward.into_inner() * distance
    }

    /// The view matrix of the logical camera, `lookAt(position, position + forward, up)`.
    pub fn view(&self) -> ViewMatrix {
        ViewMatrix::look_at(&self.position, &self.point_ahead(1.0), &self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transform;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;

    #[test]
    fn zero_directions_are_ignored() {
        let mut pose = CameraPose::default();
        assert!(!pose.set_forward(Vector3::zeros()));
        assert!(!pose.set_up(Vector3::zeros()));
        assert_eq!(pose, CameraPose::default());
        assert!(CameraPose::new(Point3::origin(), Vector3::zeros(), Vector3::y()).is_none());
    }

    #[test]
    fn directions_are_normalized() {
        let mut pose = CameraPose::default();
        assert!(pose.set_forward(Vector3::new(3.0, 0.0, -4.0)));
        assert_relative_eq!(pose.forward.into_inner(), Vector3::new(0.6, 0.0, -0.8));
    }

    #[test]
    fn right_of_default_pose() {
        assert_relative_eq!(CameraPose::default().right(), Vector3::x());
    }

    #[test]
    fn parallel_directions_have_no_right() {
        let pose = CameraPose::new(Point3::origin(), Vector3::y(), Vector3::y() * 2.0).unwrap();
        assert_eq!(pose.right(), Vector3::zeros());
    }

    #[test]
    fn default_view_is_identity() {
        assert_relative_eq!(
            CameraPose::default().view().homogeneous(),
            Matrix4::identity(),
            epsilon = 1e-12
        );
    }
}
