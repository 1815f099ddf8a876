//! Centralized controller options with TOML preset support.
//!
//! All tweakable settings (look sensitivity, joystick geometry, follow
//! camera smoothing, locomotion, projection, sensor diagnostics,
//! keybindings) are consolidated here. Options serialize to/from TOML so
//! a host can ship or persist tuning presets; the desktop binary loads
//! them through [`Options::list_presets`].
//!
//! [`Options::json_schema`] and [`Options::set_field`] are library API
//! for hosts that draw their own settings panel: the schema describes
//! each tunable (title, range, step) and `set_field` applies one edit.

mod follow;
mod joystick;
mod keybindings;
mod locomotion;
mod look;
mod projection;
mod sensor;

use std::path::Path;

pub use follow::FollowOptions;
pub use joystick::JoystickOptions;
pub use keybindings::KeybindingOptions;
pub use locomotion::LocomotionOptions;
pub use look::LookOptions;
pub use projection::ProjectionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sensor::SensorOptions;

use crate::error::RigError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[look]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pointer-look sensitivity and pitch limits.
    pub look: LookOptions,
    /// On-screen joystick geometry.
    pub joystick: JoystickOptions,
    /// Follow camera distance and smoothing.
    pub follow: FollowOptions,
    /// Entity acceleration and speed cap.
    pub locomotion: LocomotionOptions,
    /// Camera projection parameters.
    pub projection: ProjectionOptions,
    /// Orientation-sensor diagnostics.
    pub sensor: SensorOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`RigError::OptionsParse`] on malformed TOML or a key bound to two
    /// actions.
    pub fn from_toml(content: &str) -> Result<Self, RigError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| RigError::OptionsParse(e.to_string()))?;
        opts.keybindings.reindex()?;
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`RigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, RigError> {
        let content = std::fs::read_to_string(path).map_err(RigError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`RigError::Io`] if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), RigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RigError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RigError::Io)?;
        }
        std::fs::write(path, content).map_err(RigError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Set one field from a UI panel: `section` is the top-level table
    /// (`"look"`, `"follow"`, ...) and `field` the key inside it.
    ///
    /// # Errors
    ///
    /// [`RigError::OptionsParse`] if the section or field does not exist,
    /// or the value has the wrong type. `self` is unchanged on error.
    pub fn set_field(
        &mut self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), RigError> {
        let mut root = serde_json::to_value(&*self)
            .map_err(|e| RigError::OptionsParse(e.to_string()))?;
        let slot = root
            .get_mut(section)
            .and_then(|s| s.get_mut(field))
            .ok_or_else(|| {
                RigError::OptionsParse(format!(
                    "unknown option {section}.{field}"
                ))
            })?;
        *slot = value;
        let mut updated: Self = serde_json::from_value(root)
            .map_err(|e| RigError::OptionsParse(e.to_string()))?;
        updated.keybindings.reindex()?;
        *self = updated;
        Ok(())
    }
}
