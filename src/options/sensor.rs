use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Sensor", inline)]
#[serde(default)]
/// Orientation-sensor diagnostics.
pub struct SensorOptions {
    /// How long after enabling the gyro to wait before reporting whether
    /// sensor events are arriving.
    #[schemars(title = "Diagnostic Window (ms)", range(min = 250, max = 10000), extend("step" = 250))]
    pub diagnostic_window_ms: u64,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            diagnostic_window_ms: 2000,
        }
    }
}

impl SensorOptions {
    /// The diagnostic window as a [`Duration`](std::time::Duration).
    #[must_use]
    pub fn diagnostic_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.diagnostic_window_ms)
    }
}
