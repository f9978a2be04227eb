use log::*;
use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::Path,
};
use stereo_camera::{
    stereo_core::{nalgebra::Point3, Eye, Transform, ViewMatrix},
    ChangeNotifier, OrbitalStereoCamera, SettingsError, StereoCamera, StereoSettings,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("expected a single point of 3 coordinates, got {0} values")]
    Point(usize),
}

/// Reads an optional `x y z` point. Anything but zero or three values is an error.
pub fn parse_point(values: &[f64]) -> Result<Option<Point3<f64>>, InspectError> {
    match *values {
        [] => Ok(None),
        [x, y, z] => Ok(Some(Point3::new(x, y, z))),
        _ => Err(InspectError::Point(values.len())),
    }
}

/// Loads and validates settings, falling back to the defaults if `path` does not exist.
pub fn load_settings(path: &Path) -> Result<StereoSettings, InspectError> {
    let settings = match File::open(path) {
        Ok(file) => {
            let settings = serde_json::from_reader(BufReader::new(file))?;
            info!("loaded settings from {}", path.display());
            settings
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("used default settings");
            StereoSettings::default()
        }
        Err(e) => return Err(e.into()),
    };
    settings.validate()?;
    Ok(settings)
}

/// Mouse-style navigation applied to an orbiting camera: rotations, then pans, then a zoom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Navigation {
    pub rotations: Vec<(f64, f64)>,
    pub pans: Vec<(f64, f64)>,
    pub zoom: Option<f64>,
}

impl Navigation {
    pub fn apply<N: ChangeNotifier>(&self, camera: &mut OrbitalStereoCamera<N>) {
        for &(dx, dy) in &self.rotations {
            if camera.rotate(dx, dy) {
                info!("rotation by ({}, {}) crossed a pole", dx, dy);
            }
        }
        for &(dx, dy) in &self.pans {
            camera.translate(dx, dy);
        }
        if let Some(distance) = self.zoom {
            camera.zoom(distance);
        }
        debug!(
            "navigated to {:?}, radius {} phi {} theta {}",
            camera.position(),
            camera.radius(),
            camera.phi(),
            camera.theta()
        );
    }
}

/// Writes the rig state and every matrix of `camera` to `out`.
///
/// When a `point` is given, it is also shown in eye space and normalized device coordinates
/// for each eye.
pub fn write_report<N: ChangeNotifier>(
    out: &mut impl Write,
    camera: &StereoCamera<N>,
    point: Option<Point3<f64>>,
) -> io::Result<()> {
    writeln!(out, "graphics api: {:?}", camera.graphics_api())?;
    writeln!(out, "mode: {:?}", camera.mode())?;
    writeln!(out, "shear coefficient: {}", camera.shear_coefficient())?;
    for eye in Eye::BOTH {
        let p = camera.eye_position(eye);
        writeln!(out, "{:?} eye: ({}, {}, {})", eye, p.x, p.y, p.z)?;
    }

    let views: [(&str, ViewMatrix); 3] = [
        ("left", camera.view_left()),
        ("center", camera.view_center()),
        ("right", camera.view_right()),
    ];
    for (name, view) in views {
        writeln!(out, "{} view:{}", name, view.homogeneous())?;
    }
    writeln!(out, "projection:{}", camera.projection().homogeneous())?;

    if let Some(point) = point {
        for (name, view) in views {
            let eye = view.transform_point(point);
            let ndc = camera.projection().transform_point(eye);
            writeln!(
                out,
                "{} eye space: ({:.6}, {:.6}, {:.6}) ndc: ({:.6}, {:.6}, {:.6})",
                name, eye.x, eye.y, eye.z, ndc.x, ndc.y, ndc.z
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereo_camera::stereo_core::GraphicsApi;
    use tempfile::NamedTempFile;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_settings_use_defaults() {
        let settings = load_settings(Path::new("/nonexistent/stereo-settings.json")).unwrap();
        assert_eq!(settings, StereoSettings::default());
    }

    #[test]
    fn partial_settings_file() {
        let file = settings_file(r#"{ "graphics_api": "Vulkan", "radius": 3.0 }"#);
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.graphics_api, GraphicsApi::Vulkan);
        assert_eq!(settings.radius, 3.0);
        assert_eq!(settings.fov, StereoSettings::default().fov);
    }

    #[test]
    fn malformed_settings_are_rejected() {
        let file = settings_file("{ \"fov\": ");
        let result = load_settings(file.path());
        assert!(matches!(result, Err(InspectError::Json(_))));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let file = settings_file(r#"{ "near_plane": 5.0, "far_plane": 1.0 }"#);
        let result = load_settings(file.path());
        assert!(matches!(
            result,
            Err(InspectError::Settings(SettingsError::InvertedPlanes { .. }))
        ));
    }

    #[test]
    fn point_needs_exactly_three_values() {
        assert!(matches!(parse_point(&[]), Ok(None)));
        assert_eq!(
            parse_point(&[1.0, 2.0, 3.0]).unwrap(),
            Some(Point3::new(1.0, 2.0, 3.0))
        );
        assert!(matches!(
            parse_point(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            Err(InspectError::Point(6))
        ));
    }

    #[test]
    fn navigation_order() {
        let mut camera = OrbitalStereoCamera::new(GraphicsApi::OpenGl);
        Navigation {
            rotations: vec![(0.0, 0.0)],
            pans: vec![(1.0, 0.0)],
            zoom: Some(2.0),
        }
        .apply(&mut camera);
        let p = camera.position();
        assert!((p - Point3::new(1.0, 0.0, 8.0)).norm() < 1e-9);
    }

    #[test]
    fn report_lists_every_matrix() {
        let mut camera = StereoCamera::new(GraphicsApi::Vulkan);
        camera.set_interocular_distance(10.0);
        let mut out = Vec::new();
        write_report(&mut out, &camera, Some(Point3::new(0.0, 0.0, -100.0))).unwrap();
        let report = String::from_utf8(out).unwrap();
        for needle in [
            "graphics api: Vulkan",
            "left view:",
            "center view:",
            "right view:",
            "projection:",
            "left eye space: (5.000000,",
        ] {
            assert!(report.contains(needle), "missing `{}` in\n{}", needle, report);
        }
    }
}
