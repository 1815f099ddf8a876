//! The controller's complete interactive vocabulary.
//!
//! Every state change a host can trigger, whether it comes from a pointer
//! drag, a key press, a sensor reading or a programmatic call, is a
//! `RigCommand`. The [`InputProcessor`](crate::input::InputProcessor)
//! builds them from raw events and
//! [`Controller::execute`](super::Controller::execute) applies them.

use glam::Vec2;

use crate::input::{KeyAction, OrientationSample};

/// A single controller operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigCommand {
    // ── Pointer look ────────────────────────────────────────────────
    /// Rotate the look targets by a pointer delta in pixels.
    Look {
        /// Pointer movement since the previous event.
        delta: Vec2,
    },

    // ── Joystick ────────────────────────────────────────────────────
    /// A joystick drag started at `origin`.
    JoystickBegin {
        /// Down point in surface pixels.
        origin: Vec2,
    },

    /// The joystick pointer moved.
    JoystickDrag {
        /// Current pointer position in surface pixels.
        position: Vec2,
    },

    /// The joystick pointer was released or cancelled.
    JoystickRelease,

    // ── Keyboard ────────────────────────────────────────────────────
    /// A movement key changed state.
    Move {
        /// Which direction.
        action: KeyAction,
        /// `true` on press, `false` on release.
        held: bool,
    },

    // ── Gyro ────────────────────────────────────────────────────────
    /// Make the current gyro heading the new zero yaw.
    Recenter,

    /// Switch between pointer look and device orientation.
    ToggleGyro,

    /// One device-orientation reading.
    Orientation(OrientationSample),

    /// The screen rotated relative to the device.
    ScreenRotation {
        /// New screen angle in degrees.
        degrees: f32,
    },
}
