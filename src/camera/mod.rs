//! Camera system for the third-person rig.
//!
//! Provides the camera type and its GPU uniform, the follow-camera state
//! and integrator, and the device-orientation pipeline with screen-rotation
//! compensation.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Exponential-smoothing follow integrator.
pub mod follow;
/// Device orientation → camera quaternion.
pub mod orientation;
/// Screen-rotation compensation.
pub mod screen;
/// Follow-camera state.
pub mod state;

pub use self::core::{Camera, CameraUniform};
pub use follow::{FollowIntegrator, FollowPose};
pub use orientation::OrientationPipeline;
pub use screen::ScreenCompensator;
pub use state::{spherical_offset, CameraState};
