use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Look", inline)]
#[serde(default)]
/// Pointer-look sensitivity and pitch limits.
pub struct LookOptions {
    /// Radians of yaw/pitch per pixel of pointer drag.
    #[schemars(title = "Sensitivity", range(min = 0.0005, max = 0.01), extend("step" = 0.0001))]
    pub sensitivity: f32,
    /// Lowest pitch the camera may reach (radians, negative = below the
    /// horizon).
    #[schemars(skip)]
    pub pitch_min: f32,
    /// Highest pitch the camera may reach (radians).
    #[schemars(title = "Max Pitch", range(min = 0.0, max = 1.5), extend("step" = 0.05))]
    pub pitch_max: f32,
}

impl Default for LookOptions {
    fn default() -> Self {
        Self {
            sensitivity: 0.0032,
            pitch_min: -std::f32::consts::FRAC_PI_2 + 0.05,
            pitch_max: 0.6,
        }
    }
}
