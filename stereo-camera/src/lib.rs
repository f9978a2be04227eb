//! # Stereo Camera
//!
//! A stereoscopic camera built on top of [`stereo_core`]. [`StereoCamera`] keeps one logical
//! camera and derives the left, right and center view matrices plus a projection matrix from it.
//! Every setter recomputes the matrices it affects straight away and then reports the change
//! through a [`ChangeNotifier`], so reads never see stale state.
//!
//! [`OrbitalStereoCamera`] adds spherical navigation around a target point for model viewers.
//!
//! ```
//! use stereo_camera::{DirtyFlags, StereoCamera};
//! use stereo_camera::stereo_core::GraphicsApi;
//!
//! let mut camera = StereoCamera::with_notifier(GraphicsApi::Vulkan, DirtyFlags::default());
//! camera.set_interocular_distance(0.065);
//! let dirty = camera.notifier_mut().take();
//! assert!(dirty.view && !dirty.projection);
//! ```

mod camera;
pub mod notify;
mod orbital;
mod settings;

pub use camera::*;
pub use notify::{ChangeNotifier, Derived, DirtyFlags, Listeners, Property};
pub use orbital::*;
pub use settings::*;
pub use stereo_core;
