//! # Stereo Core
//!
//! This library provides the engine-independent types and matrix helpers used to build a
//! stereoscopic camera rig. A stereo rig is described by a single logical camera (a
//! [`CameraPose`] and a [`Lens`]) from which two eye cameras are derived. Every other crate in
//! the workspace speaks in terms of these types, and `nalgebra` is re-exported so downstream
//! crates agree on the version.
//!
//! ## Conventions
//!
//! All matrices are right-handed and column-major, as produced by [`nalgebra::Matrix4`].
//! Camera space follows the usual graphics convention rather than the computer vision one:
//!
//! * Origin is the eye position
//! * Negative z axis is forwards
//! * Positive y axis is up
//! * Positive x axis is right
//!
//! The only platform specific branch is the depth range of clip space, which is selected
//! explicitly with [`GraphicsApi`] and never inferred.
//!
//! ## The rig
//!
//! The two eyes sit on the right vector of the logical camera, half the interocular distance
//! away from its position. The convergence plane is the plane at which the left and right images
//! line up (zero parallax).
//!
//! - `L` the left eye
//! - `R` the right eye
//! - `C` the logical (center) camera
//! - `@` the convergence plane
//! - `c` the convergence point
//!
//! ```text
//!   @@@@@@@@@@@@@c@@@@@@@@@@@@@
//!               /|\
//!              / | \
//!             /  |  \
//!            /   |   \
//!           L----C----R
//!           |<-->|
//!      interocular / 2
//! ```
//!
//! With [`StereoMode::ToeIn`] both eyes rotate to look at `c`. With
//! [`StereoMode::AsymmetricFrustum`] the eyes stay parallel to `C` and the images are aligned on
//! the convergence plane with a shear ([`stereo_shear`]) instead.

mod lens;
mod matrix;
mod pose;
mod stereo;

pub use lens::*;
pub use matrix::*;
pub use nalgebra;
pub use pose::*;
pub use stereo::*;
