use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Controller actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// move_forward = "KeyW"
/// toggle_gyro = "KeyG"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Held: move away from the camera.
    MoveForward,
    /// Held: move toward the camera.
    MoveBackward,
    /// Held: strafe left.
    MoveLeft,
    /// Held: strafe right.
    MoveRight,
    /// Press: make the current gyro heading the new zero yaw.
    Recenter,
    /// Press: switch between pointer-look and gyro camera modes.
    ToggleGyro,
}

impl KeyAction {
    /// Whether this action is held (movement) rather than fired once.
    #[must_use]
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Self::MoveForward
                | Self::MoveBackward
                | Self::MoveLeft
                | Self::MoveRight
        )
    }
}

/// Which movement keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct HeldKeys {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

impl HeldKeys {
    /// Record a movement key going down or up. Non-movement actions are
    /// ignored.
    pub fn set(&mut self, action: KeyAction, held: bool) {
        match action {
            KeyAction::MoveForward => self.forward = held,
            KeyAction::MoveBackward => self.backward = held,
            KeyAction::MoveLeft => self.left = held,
            KeyAction::MoveRight => self.right = held,
            KeyAction::Recenter | KeyAction::ToggleGyro => {}
        }
    }

    /// Release every key.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Unit contribution per held direction (x = right, y = forward).
    /// Opposing keys cancel.
    #[must_use]
    pub fn vector(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| {
            f32::from(u8::from(pos)) - f32::from(u8::from(neg))
        };
        Vec2::new(
            axis(self.right, self.left),
            axis(self.forward, self.backward),
        )
    }
}
