use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Follow Camera", inline)]
#[serde(default)]
/// Third-person follow camera parameters.
pub struct FollowOptions {
    /// Distance from the tracked point to the camera.
    #[schemars(title = "Distance", range(min = 1.0, max = 20.0), extend("step" = 0.1))]
    pub distance: f32,
    /// Height of the tracked point above the entity origin.
    #[schemars(title = "Eye Height", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub eye_height: f32,
    /// Inverse time constant of the yaw/pitch smoothing (1/s).
    #[schemars(title = "Look Smoothing", range(min = 1.0, max = 40.0), extend("step" = 0.5))]
    pub look_lerp: f32,
    /// Inverse time constant of the position smoothing (1/s).
    #[schemars(title = "Position Smoothing", range(min = 1.0, max = 40.0), extend("step" = 0.5))]
    pub position_lerp: f32,
    /// Pitch the camera starts a session with (radians).
    #[schemars(skip)]
    pub initial_pitch: f32,
}

impl Default for FollowOptions {
    fn default() -> Self {
        Self {
            distance: 5.5,
            eye_height: 1.0,
            look_lerp: 18.0,
            position_lerp: 10.0,
            initial_pitch: -0.12,
        }
    }
}
