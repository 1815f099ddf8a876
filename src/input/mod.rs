//! Input handling: event types, pointer arbitration, the joystick and
//! look controllers, keyboard state, and the input processor that converts
//! raw surface events into controller commands.

/// Exclusive pointer-to-role binding.
pub mod arbiter;
/// Platform-agnostic input events.
pub mod event;
/// Virtual thumb-stick.
pub mod joystick;
/// Key actions and held-key state.
pub mod keyboard;
/// Pointer-drag look controller.
pub mod look;
/// Converts raw events into controller commands.
pub mod processor;

pub use arbiter::{PointerArbiter, PointerBinding, PointerMotion};
pub use event::{
    InputEvent, OrientationSample, PointerId, PointerRole, SurfaceRegion,
};
pub use joystick::Joystick;
pub use keyboard::{HeldKeys, KeyAction};
pub use look::LookController;
pub use processor::{Dispatch, InputProcessor, InputResponse};
