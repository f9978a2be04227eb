use std::path::PathBuf;
use stereo_camera::{
    stereo_core::GraphicsApi,
    OrbitalStereoCamera, StereoCamera, StereoSettings,
};
use stereo_inspect::{load_settings, parse_point, write_report, InspectError, Navigation};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "stereo-inspect",
    about = "A tool to print the matrices of a stereo camera rig"
)]
struct Opt {
    /// The file where settings are specified.
    ///
    /// This is in the format of `stereo_camera::StereoSettings`. If this file doesn't exist,
    /// the default settings are used.
    #[structopt(short, long, default_value = "stereo-settings.json", parse(from_os_str))]
    settings: PathBuf,
    /// Overrides the graphics api of the settings (`opengl` or `vulkan`).
    #[structopt(short, long)]
    api: Option<GraphicsApi>,
    /// Orbit the target of the settings instead of using their position and forward vector.
    #[structopt(short, long)]
    orbit: bool,
    /// Orbit by `dx dy` radians. May be repeated.
    #[structopt(
        long,
        number_of_values = 2,
        allow_hyphen_values = true,
        requires = "orbit"
    )]
    rotate: Vec<f64>,
    /// Pan by `dx dy` along the camera right and up vectors. May be repeated.
    #[structopt(
        long,
        number_of_values = 2,
        allow_hyphen_values = true,
        requires = "orbit"
    )]
    pan: Vec<f64>,
    /// Move the camera along its forward vector.
    #[structopt(long, allow_hyphen_values = true, requires = "orbit")]
    zoom: Option<f64>,
    /// A world point `x y z` to show in every eye. May be given once.
    #[structopt(short, long, number_of_values = 3, allow_hyphen_values = true)]
    transform: Vec<f64>,
    /// Print the default settings as JSON and exit.
    #[structopt(long)]
    print_default_settings: bool,
}

fn pairs(values: &[f64]) -> Vec<(f64, f64)> {
    values.chunks_exact(2).map(|c| (c[0], c[1])).collect()
}

fn main() -> Result<(), InspectError> {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    if opt.print_default_settings {
        println!("{}", serde_json::to_string_pretty(&StereoSettings::default())?);
        return Ok(());
    }

    let mut settings = load_settings(&opt.settings)?;
    if let Some(api) = opt.api {
        settings.graphics_api = api;
    }
    let point = parse_point(&opt.transform)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if opt.orbit {
        let mut camera = OrbitalStereoCamera::from_settings(&settings, ());
        Navigation {
            rotations: pairs(&opt.rotate),
            pans: pairs(&opt.pan),
            zoom: opt.zoom,
        }
        .apply(&mut camera);
        write_report(&mut out, &*camera, point)?;
    } else {
        let camera = StereoCamera::from_settings(&settings, ());
        write_report(&mut out, &camera, point)?;
    }
    Ok(())
}
