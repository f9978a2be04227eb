use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Matrix4, Point3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// This trait is implemented by the homogeneous matrices handed to a renderer:
///
/// * [`ViewMatrix`] - Transforms world points into eye space
/// * [`ProjectionMatrix`] - Transforms eye space points into clip space
pub trait Transform: From<Matrix4<f64>> + Clone + Copy {
    /// Retrieve the homogeneous matrix.
    fn homogeneous(self) -> Matrix4<f64>;

    /// Creates a transform which leaves every point where it is.
    fn identity() -> Self {
        Matrix4::identity().into()
    }

    /// Transforms a euclidean point, dividing by the resulting `w`.
    ///
    /// For a [`ProjectionMatrix`] this produces normalized device coordinates.
    fn transform_point(self, point: Point3<f64>) -> Point3<f64> {
        self.homogeneous().transform_point(&point)
    }

    /// Converts the matrix to single precision for upload into a uniform buffer.
    fn to_f32(self) -> Matrix4<f32> {
        self.homogeneous().cast()
    }
}

/// A view (world to eye) matrix for one camera of the rig.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ViewMatrix(pub Matrix4<f64>);

impl Transform for ViewMatrix {
    #[inline(always)]
    fn homogeneous(self) -> Matrix4<f64> {
        self.into()
    }
}

impl ViewMatrix {
    /// Creates the right-handed view matrix of an eye at `eye` looking at `target`.
    ///
    /// ```
    /// use stereo_core::{Transform, ViewMatrix};
    /// use stereo_core::nalgebra::{Point3, Vector3};
    /// let view = ViewMatrix::look_at(
    ///     &Point3::new(0.0, 0.0, 10.0),
    ///     &Point3::origin(),
    ///     &Vector3::y(),
    /// );
    /// let p = view.transform_point(Point3::origin());
    /// assert!((p - Point3::new(0.0, 0.0, -10.0)).norm() < 1e-12);
    /// ```
    pub fn look_at(eye: &Point3<f64>, target: &Point3<f64>, up: &Vector3<f64>) -> Self {
        Self(Matrix4::look_at_rh(eye, target, up))
    }

    /// Pre-multiplies the view by [`stereo_shear`] with the given coefficient.
    #[must_use]
    pub fn sheared(self, coefficient: f64) -> Self {
        Self(stereo_shear(coefficient) * self.0)
    }

    /// Recovers the world position of the eye, if the matrix is invertible.
    ///
    /// Shearing a view does not move its eye, since the shear keeps the origin fixed.
    pub fn eye_position(self) -> Option<Point3<f64>> {
        self.0
            .try_inverse()
            .map(|inverse| inverse.transform_point(&Point3::origin()))
    }
}

/// A perspective projection (eye to clip space) matrix.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ProjectionMatrix(pub Matrix4<f64>);

impl Transform for ProjectionMatrix {
    #[inline(always)]
    fn homogeneous(self) -> Matrix4<f64> {
        self.into()
    }
}

/// Creates the XZ shear used for parallel-axis stereo.
///
/// This is the identity with `x` written to row 0, column 2 (`[2][0]` in column-major
/// indexing), so a point maps as `x' = x + coefficient * z`. Applied to an eye view it slides
/// the image horizontally in proportion to depth, which lines the two eyes up on the
/// convergence plane without an off-axis projection per eye.
///
/// ```
/// use stereo_core::stereo_shear;
/// use stereo_core::nalgebra::Point3;
/// let p = stereo_shear(0.5).transform_point(&Point3::new(1.0, 2.0, -4.0));
/// assert_eq!(p, Point3::new(-1.0, 2.0, -4.0));
/// ```
pub fn stereo_shear(coefficient: f64) -> Matrix4<f64> {
    let mut shear = Matrix4::identity();
    shear[(0, 2)] = coefficient;
    shear
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use float_eq::assert_float_eq;
    use proptest::prelude::*;

    #[test]
    fn look_down_negative_z_from_origin_is_identity() {
        let view = ViewMatrix::look_at(
            &Point3::origin(),
            &Point3::new(0.0, 0.0, -1.0),
            &Vector3::y(),
        );
        assert_relative_eq!(view.0, Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn shear_is_identity_at_zero() {
        assert_eq!(stereo_shear(0.0), Matrix4::identity());
    }

    #[test]
    fn shear_only_touches_x() {
        proptest!(|(s in -2.0..2.0f64, x in -10.0..10.0f64, y in -10.0..10.0f64, z in -10.0..10.0f64)| {
            let p = stereo_shear(s).transform_point(&Point3::new(x, y, z));
            assert_float_eq!(p.x, x + s * z, abs <= 1e-9);
            assert_float_eq!(p.y, y, abs <= 0.0);
            assert_float_eq!(p.z, z, abs <= 0.0);
        });
    }

    #[test]
    fn eye_position_survives_shear() {
        let eye = Point3::new(3.0, -1.0, 7.5);
        let view = ViewMatrix::look_at(&eye, &Point3::new(0.0, 2.0, 0.0), &Vector3::y());
        let recovered = view.sheared(0.25).eye_position().unwrap();
        assert_relative_eq!(recovered, eye, epsilon = 1e-9);
    }

    #[test]
    fn f32_conversion_keeps_values() {
        let view = ViewMatrix(stereo_shear(0.125));
        assert_float_eq!(view.to_f32()[(0, 2)], 0.125f32, abs <= 0.0);
    }
}
