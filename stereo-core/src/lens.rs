use crate::ProjectionMatrix;
use core::str::FromStr;
use nalgebra::Matrix4;
use thiserror::Error;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The graphics API the projection is built for.
///
/// The two differ only in the depth range of normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum GraphicsApi {
    /// Depth in `[-1, 1]`.
    #[default]
    OpenGl,
    /// Depth in `[0, 1]`.
    Vulkan,
}

impl GraphicsApi {
    /// The normalized device depth of the near and far planes, in that order.
    pub fn depth_range(self) -> (f64, f64) {
        match self {
            GraphicsApi::OpenGl => (-1.0, 1.0),
            GraphicsApi::Vulkan => (0.0, 1.0),
        }
    }
}

/// Returned when parsing a [`GraphicsApi`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown graphics api `{0}`, expected `opengl` or `vulkan`")]
pub struct ParseGraphicsApiError(pub String);

impl FromStr for GraphicsApi {
    type Err = ParseGraphicsApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "opengl" | "gl" => Ok(GraphicsApi::OpenGl),
            "vulkan" | "vk" => Ok(GraphicsApi::Vulkan),
            _ => Err(ParseGraphicsApiError(s.to_owned())),
        }
    }
}

/// The projection parameters shared by both eyes.
///
/// All distances should be in meters to match the interocular distance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Lens {
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near_plane: f64,
    pub far_plane: f64,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov: 45.0,
            aspect_ratio: 16.0 / 9.0,
            near_plane: 0.01,
            far_plane: 1000.0,
        }
    }
}

impl Lens {
    pub fn fov(self, fov: f64) -> Self {
        Self { fov, ..self }
    }

    pub fn aspect_ratio(self, aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            ..self
        }
    }

    pub fn near_plane(self, near_plane: f64) -> Self {
        Self { near_plane, ..self }
    }

    pub fn far_plane(self, far_plane: f64) -> Self {
        Self { far_plane, ..self }
    }

    /// Builds the right-handed perspective projection for the given API.
    ///
    /// The camera looks down negative z. No argument is validated: degenerate lenses
    /// (zero aspect, `near == far`) produce non-finite entries rather than a panic.
    ///
    /// ```
    /// use stereo_core::{GraphicsApi, Lens, Transform};
    /// use stereo_core::nalgebra::Point3;
    /// let lens = Lens::default().near_plane(1.0).far_plane(100.0);
    /// let projection = lens.projection(GraphicsApi::Vulkan);
    /// let near = projection.transform_point(Point3::new(0.0, 0.0, -1.0));
    /// assert!(near.z.abs() < 1e-12);
    /// ```
    #[rustfmt::skip]
    pub fn projection(&self, api: GraphicsApi) -> ProjectionMatrix {
        let f = 1.0 / (0.5 * self.fov.to_radians()).tan();
        let (near, far) = (self.near_plane, self.far_plane);
        let nf = 1.0 / (near - far);
        let (m22, m23) = match api {
            GraphicsApi::OpenGl => ((far + near) * nf, 2.0 * far * near * nf),
            GraphicsApi::Vulkan => (far * nf, far * near * nf),
        };
        ProjectionMatrix(Matrix4::new(
            f / self.aspect_ratio, 0.0, 0.0,  0.0,
            0.0,                   f,   0.0,  0.0,
            0.0,                   0.0, m22,  m23,
            0.0,                   0.0, -1.0, 0.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transform;
    use float_eq::assert_float_eq;
    use nalgebra::Point3;
    use proptest::prelude::*;

    fn lens() -> Lens {
        Lens::default()
            .fov(45.0)
            .aspect_ratio(1.0)
            .near_plane(1.0)
            .far_plane(1000.0)
    }

    #[test]
    fn depth_range_per_api() {
        for api in [GraphicsApi::OpenGl, GraphicsApi::Vulkan] {
            let projection = lens().projection(api);
            let (near, far) = api.depth_range();
            let n = projection.transform_point(Point3::new(0.0, 0.0, -1.0));
            let f = projection.transform_point(Point3::new(0.0, 0.0, -1000.0));
            assert_float_eq!(n.z, near, abs <= 1e-9);
            assert_float_eq!(f.z, far, abs <= 1e-9);
        }
    }

    #[test]
    fn apis_share_x_and_y() {
        let gl = lens().projection(GraphicsApi::OpenGl);
        let vk = lens().projection(GraphicsApi::Vulkan);
        assert_eq!(gl.0.fixed_rows::<2>(0), vk.0.fixed_rows::<2>(0));
        assert_eq!(gl.0.row(3), vk.0.row(3));
    }

    #[test]
    fn edge_of_fov_maps_to_edge_of_ndc() {
        proptest!(|(fov in 10.0..170.0f64, depth in 1.0..1000.0f64)| {
            let projection = lens().fov(fov).projection(GraphicsApi::Vulkan);
            let y = depth * (0.5 * fov.to_radians()).tan();
            let p = projection.transform_point(Point3::new(0.0, y, -depth));
            assert_float_eq!(p.y, 1.0, abs <= 1e-9);
        });
    }

    #[test]
    fn aspect_ratio_scales_x() {
        let projection = lens().aspect_ratio(2.0).projection(GraphicsApi::OpenGl);
        let square = lens().projection(GraphicsApi::OpenGl);
        assert_float_eq!(projection.0[(0, 0)] * 2.0, square.0[(0, 0)], abs <= 1e-12);
    }

    #[test]
    fn parse_api_names() {
        assert_eq!("Vulkan".parse::<GraphicsApi>(), Ok(GraphicsApi::Vulkan));
        assert_eq!("gl".parse::<GraphicsApi>(), Ok(GraphicsApi::OpenGl));
        assert!("metal".parse::<GraphicsApi>().is_err());
    }

    #[test]
    fn degenerate_lens_does_not_panic() {
        let projection = lens().near_plane(5.0).far_plane(5.0).projection(GraphicsApi::OpenGl);
        assert!(!projection.0[(2, 2)].is_finite());
    }
}
