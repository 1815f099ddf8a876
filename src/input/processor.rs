//! Converts raw platform events into controller commands.
//!
//! The `InputProcessor` owns the pointer arbiter and the key-binding map.
//! It is the only thing that sits between raw surface events and the
//! controller's [`execute`](crate::controller::Controller::execute) method.

use super::arbiter::PointerArbiter;
use super::event::{InputEvent, PointerRole};
use super::keyboard::KeyAction;
use crate::controller::RigCommand;
use crate::options::KeybindingOptions;

/// What the host should do with the platform event it just forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// Not for us (stale pointer, HUD region, role already held).
    Ignored,
    /// Consumed; suppress default handling.
    Handled,
    /// A pointer was just bound to `role`: suppress default handling and
    /// capture the pointer on its origin element so its moves and release
    /// keep arriving even outside the element.
    Captured(PointerRole),
    /// The user asked for gyro control: run the platform permission flow
    /// and report the outcome via
    /// [`Controller::enable_gyro`](crate::controller::Controller::enable_gyro).
    RequestSensorPermission,
}

/// Routing result of one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    /// Host-facing response.
    pub response: InputResponse,
    /// Command for the controller, if the event produced one.
    pub command: Option<RigCommand>,
}

impl Dispatch {
    const IGNORED: Self = Self {
        response: InputResponse::Ignored,
        command: None,
    };

    fn handled(command: Option<RigCommand>) -> Self {
        Self {
            response: InputResponse::Handled,
            command,
        }
    }
}

/// Converts raw surface events into [`RigCommand`]s.
///
/// # Usage
///
/// ```ignore
/// let dispatch = processor.handle_event(event);
/// if let Some(cmd) = dispatch.command {
///     controller.execute(cmd);
/// }
/// ```
#[derive(Debug)]
pub struct InputProcessor {
    /// Pointer → role binding table.
    arbiter: PointerArbiter,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            arbiter: PointerArbiter::new(),
            key_bindings,
        }
    }

    /// Read-only access to the pointer bindings.
    #[must_use]
    pub fn arbiter(&self) -> &PointerArbiter {
        &self.arbiter
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Forget every pointer binding.
    pub fn release_pointers(&mut self) {
        self.arbiter.clear();
    }

    /// Route one surface event.
    pub fn handle_event(&mut self, event: InputEvent) -> Dispatch {
        match event {
            InputEvent::PointerDown {
                pointer,
                position,
                region,
            } => {
                let Some(role) = region.role() else {
                    return Dispatch::IGNORED;
                };
                if !self.arbiter.press(pointer, position, role) {
                    return Dispatch::IGNORED;
                }
                let command = match role {
                    PointerRole::Look => None,
                    PointerRole::Joystick => {
                        Some(RigCommand::JoystickBegin { origin: position })
                    }
                };
                Dispatch {
                    response: InputResponse::Captured(role),
                    command,
                }
            }
            InputEvent::PointerMove { pointer, position } => {
                match self.arbiter.motion(pointer, position) {
                    Some(m) => Dispatch::handled(Some(match m.role {
                        PointerRole::Look => {
                            RigCommand::Look { delta: m.delta }
                        }
                        PointerRole::Joystick => {
                            RigCommand::JoystickDrag { position }
                        }
                    })),
                    None => Dispatch::IGNORED,
                }
            }
            InputEvent::PointerUp { pointer }
            | InputEvent::PointerCancel { pointer } => {
                match self.arbiter.release(pointer) {
                    Some(PointerRole::Joystick) => {
                        Dispatch::handled(Some(RigCommand::JoystickRelease))
                    }
                    Some(PointerRole::Look) => Dispatch::handled(None),
                    None => Dispatch::IGNORED,
                }
            }
            InputEvent::Orientation(sample) => {
                Dispatch::handled(Some(RigCommand::Orientation(sample)))
            }
            InputEvent::ScreenRotation { degrees } => {
                Dispatch::handled(Some(RigCommand::ScreenRotation { degrees }))
            }
        }
    }

    /// Look up a key transition and return the corresponding command, if
    /// bound. Movement keys report both edges; other actions fire once per
    /// physical press (auto-repeat is ignored).
    #[must_use]
    pub fn handle_key(
        &self,
        key: &str,
        pressed: bool,
        repeat: bool,
    ) -> Option<RigCommand> {
        let action = self.key_bindings.lookup(key)?;
        if action.is_movement() {
            return Some(RigCommand::Move {
                action,
                held: pressed,
            });
        }
        if !pressed || repeat {
            return None;
        }
        match action {
            KeyAction::Recenter => Some(RigCommand::Recenter),
            KeyAction::ToggleGyro => Some(RigCommand::ToggleGyro),
            _ => None,
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::input::{PointerId, SurfaceRegion};

    fn down(id: i64, x: f32, y: f32, region: SurfaceRegion) -> InputEvent {
        InputEvent::PointerDown {
            pointer: PointerId(id),
            position: Vec2::new(x, y),
            region,
        }
    }

    fn mv(id: i64, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove {
            pointer: PointerId(id),
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn hud_pointer_is_never_bound() {
        let mut p = InputProcessor::new();
        let d = p.handle_event(down(1, 10.0, 10.0, SurfaceRegion::Hud));
        assert_eq!(d.response, InputResponse::Ignored);
        assert_eq!(p.handle_event(mv(1, 30.0, 10.0)).command, None);
    }

    #[test]
    fn look_drag_produces_deltas() {
        let mut p = InputProcessor::new();
        let d = p.handle_event(down(1, 300.0, 200.0, SurfaceRegion::Viewport));
        assert_eq!(d.response, InputResponse::Captured(PointerRole::Look));
        assert_eq!(d.command, None);

        let d = p.handle_event(mv(1, 320.0, 195.0));
        assert_eq!(
            d.command,
            Some(RigCommand::Look {
                delta: Vec2::new(20.0, -5.0)
            })
        );
    }

    #[test]
    fn second_look_pointer_changes_nothing() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(down(1, 300.0, 200.0, SurfaceRegion::Viewport));
        let d = p.handle_event(down(2, 400.0, 200.0, SurfaceRegion::Viewport));
        assert_eq!(d, Dispatch::IGNORED);
        assert_eq!(p.handle_event(mv(2, 450.0, 200.0)), Dispatch::IGNORED);
        assert_eq!(
            p.handle_event(InputEvent::PointerUp {
                pointer: PointerId(2)
            }),
            Dispatch::IGNORED
        );
        assert_eq!(
            p.arbiter().binding(PointerRole::Look).unwrap().pointer,
            PointerId(1)
        );
    }

    #[test]
    fn joystick_lifecycle_commands() {
        let mut p = InputProcessor::new();
        let d = p.handle_event(down(7, 60.0, 700.0, SurfaceRegion::Joystick));
        assert_eq!(
            d.command,
            Some(RigCommand::JoystickBegin {
                origin: Vec2::new(60.0, 700.0)
            })
        );
        let d = p.handle_event(mv(7, 60.0, 650.0));
        assert_eq!(
            d.command,
            Some(RigCommand::JoystickDrag {
                position: Vec2::new(60.0, 650.0)
            })
        );
        let d = p.handle_event(InputEvent::PointerCancel {
            pointer: PointerId(7),
        });
        assert_eq!(d.command, Some(RigCommand::JoystickRelease));
    }

    #[test]
    fn movement_keys_report_both_edges() {
        let p = InputProcessor::new();
        assert_eq!(
            p.handle_key("KeyW", true, false),
            Some(RigCommand::Move {
                action: KeyAction::MoveForward,
                held: true
            })
        );
        assert_eq!(
            p.handle_key("KeyW", false, false),
            Some(RigCommand::Move {
                action: KeyAction::MoveForward,
                held: false
            })
        );
    }

    #[test]
    fn discrete_keys_fire_once_per_press() {
        let p = InputProcessor::new();
        assert_eq!(
            p.handle_key("KeyQ", true, false),
            Some(RigCommand::Recenter)
        );
        assert_eq!(p.handle_key("KeyQ", true, true), None);
        assert_eq!(p.handle_key("KeyQ", false, false), None);
        assert_eq!(p.handle_key("KeyZ", true, false), None);
    }
}
