use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Locomotion", inline)]
#[serde(default)]
/// Entity acceleration, speed cap and turning.
pub struct LocomotionOptions {
    /// Acceleration while input is held (units/s²).
    #[schemars(title = "Acceleration", range(min = 1.0, max = 60.0), extend("step" = 0.5))]
    pub accel: f32,
    /// Deceleration once input is released (units/s²).
    #[schemars(title = "Deceleration", range(min = 1.0, max = 60.0), extend("step" = 0.5))]
    pub deaccel: f32,
    /// Speed cap (units/s).
    #[schemars(title = "Max Speed", range(min = 0.5, max = 20.0), extend("step" = 0.1))]
    pub max_speed: f32,
    /// Facing ease rate toward the velocity heading (1/s).
    #[schemars(title = "Turn Rate", range(min = 1.0, max = 30.0), extend("step" = 0.5))]
    pub turn_rate: f32,
    /// Speed below which the facing is left alone.
    #[schemars(skip)]
    pub facing_speed_threshold: f32,
}

impl Default for LocomotionOptions {
    fn default() -> Self {
        Self {
            accel: 18.0,
            deaccel: 14.0,
            max_speed: 5.5,
            turn_rate: 10.0,
            facing_speed_threshold: 0.1,
        }
    }
}
