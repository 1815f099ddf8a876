use glam::Vec2;

/// Identity of one pointer contact (mouse, pen, or a single finger).
///
/// Web hosts forward `PointerEvent.pointerId`; native hosts forward the
/// touch id and use [`PointerId::MOUSE`] for the mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i64);

impl PointerId {
    /// Identity reserved for the mouse cursor on native hosts.
    pub const MOUSE: Self = Self(-1);
}

/// Logical control a pointer can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerRole {
    /// Drag to rotate the camera.
    Look,
    /// Drag to move via the on-screen joystick.
    Joystick,
}

impl PointerRole {
    /// Region whose element takes pointer capture for this role, i.e. the
    /// element the pointer went down on. Capturing there keeps moves and
    /// the release flowing after the contact slides off the element.
    #[must_use]
    pub const fn capture_region(self) -> SurfaceRegion {
        match self {
            Self::Look => SurfaceRegion::Viewport,
            Self::Joystick => SurfaceRegion::Joystick,
        }
    }

    /// Whether the pointer leaving the joystick element ends this binding.
    /// Only an uncaptured joystick pointer is released on leave.
    #[must_use]
    pub const fn ends_on_joystick_leave(self, captured: bool) -> bool {
        matches!(self, Self::Joystick) && !captured
    }
}

/// Part of the input surface a pointer went down on.
///
/// The host performs the hit test; the arbiter trusts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRegion {
    /// Open viewport: pointers landing here drive the camera.
    Viewport,
    /// The joystick widget.
    Joystick,
    /// HUD buttons and other widgets that must never start a drag.
    Hud,
}

impl SurfaceRegion {
    /// The role a pointer landing in this region competes for.
    #[must_use]
    pub fn role(self) -> Option<PointerRole> {
        match self {
            Self::Viewport => Some(PointerRole::Look),
            Self::Joystick => Some(PointerRole::Joystick),
            Self::Hud => None,
        }
    }
}

/// One device-orientation reading, in degrees.
///
/// Any angle may be missing when the platform reports `null`; missing
/// angles contribute nothing (treated as 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    /// Rotation about the device z axis (compass heading).
    pub alpha: Option<f32>,
    /// Rotation about the device x axis (front-back tilt).
    pub beta: Option<f32>,
    /// Rotation about the device y axis (left-right tilt).
    pub gamma: Option<f32>,
}

impl OrientationSample {
    /// A sample with all three angles present.
    #[must_use]
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// `(alpha, beta, gamma)` in degrees with missing or non-finite
    /// angles replaced by 0.
    #[must_use]
    pub fn degrees(&self) -> (f32, f32, f32) {
        let or_zero =
            |a: Option<f32>| a.filter(|v| v.is_finite()).unwrap_or(0.0);
        (or_zero(self.alpha), or_zero(self.beta), or_zero(self.gamma))
    }

    /// `(alpha, beta, gamma)` in radians, see [`degrees`](Self::degrees).
    #[must_use]
    pub fn radians(&self) -> (f32, f32, f32) {
        let (a, b, g) = self.degrees();
        (a.to_radians(), b.to_radians(), g.to_radians())
    }
}

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`RigCommand`](crate::controller::RigCommand)
/// values. Pointer positions are client (surface) coordinates in pixels.
///
/// # Example
///
/// ```
/// use touchrig::input::{InputEvent, PointerId, SurfaceRegion};
///
/// let down = InputEvent::PointerDown {
///     pointer: PointerId(1),
///     position: glam::Vec2::new(40.0, 600.0),
///     region: SurfaceRegion::Joystick,
/// };
/// assert!(matches!(down, InputEvent::PointerDown { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer made contact.
    PointerDown {
        /// Which pointer.
        pointer: PointerId,
        /// Client position in pixels.
        position: Vec2,
        /// Region the host's hit test placed the contact in.
        region: SurfaceRegion,
    },
    /// A pointer moved (with or without contact).
    PointerMove {
        /// Which pointer.
        pointer: PointerId,
        /// Client position in pixels.
        position: Vec2,
    },
    /// A pointer lifted.
    PointerUp {
        /// Which pointer.
        pointer: PointerId,
    },
    /// The platform cancelled a pointer (gesture takeover, capture loss).
    PointerCancel {
        /// Which pointer.
        pointer: PointerId,
    },
    /// A device-orientation sensor reading.
    Orientation(OrientationSample),
    /// The screen was rotated relative to the device's natural
    /// orientation.
    ScreenRotation {
        /// Screen angle in degrees (usually 0, 90, 180 or 270).
        degrees: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_never_competes_for_a_role() {
        assert_eq!(SurfaceRegion::Hud.role(), None);
        assert_eq!(SurfaceRegion::Viewport.role(), Some(PointerRole::Look));
        assert_eq!(
            SurfaceRegion::Joystick.role(),
            Some(PointerRole::Joystick)
        );
    }

    #[test]
    fn capture_stays_on_the_origin_element() {
        assert_eq!(
            PointerRole::Joystick.capture_region(),
            SurfaceRegion::Joystick
        );
        assert_eq!(PointerRole::Look.capture_region(), SurfaceRegion::Viewport);
        for role in [PointerRole::Look, PointerRole::Joystick] {
            assert_eq!(role.capture_region().role(), Some(role));
        }
    }

    #[test]
    fn captured_joystick_survives_leaving_the_widget() {
        assert!(!PointerRole::Joystick.ends_on_joystick_leave(true));
        assert!(PointerRole::Joystick.ends_on_joystick_leave(false));
        assert!(!PointerRole::Look.ends_on_joystick_leave(false));
        assert!(!PointerRole::Look.ends_on_joystick_leave(true));
    }

    #[test]
    fn missing_angles_read_as_zero() {
        let sample = OrientationSample {
            alpha: None,
            beta: Some(45.0),
            gamma: Some(f32::NAN),
        };
        assert_eq!(sample.degrees(), (0.0, 45.0, 0.0));
    }
}
