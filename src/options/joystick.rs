use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Joystick", inline)]
#[serde(default)]
/// On-screen joystick geometry, in CSS/physical pixels.
pub struct JoystickOptions {
    /// Maximum knob travel from the drag origin.
    #[schemars(title = "Radius", range(min = 20.0, max = 200.0), extend("step" = 1.0))]
    pub radius: f32,
    /// Displacement below which the output collapses to zero.
    #[schemars(title = "Dead Zone", range(min = 0.0, max = 30.0), extend("step" = 1.0))]
    pub deadzone: f32,
}

impl Default for JoystickOptions {
    fn default() -> Self {
        Self {
            radius: 70.0,
            deadzone: 6.0,
        }
    }
}
