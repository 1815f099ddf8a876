//! Virtual thumb-stick driven by a single pointer drag.

use glam::Vec2;

use crate::options::JoystickOptions;

/// Converts a pointer's displacement from its drag origin into a clamped,
/// dead-zoned direction in the unit disk.
///
/// Screen y grows downward, so dragging up yields a positive output y
/// ("forward").
#[derive(Debug, Clone)]
pub struct Joystick {
    radius: f32,
    deadzone: f32,
    origin: Option<Vec2>,
    displacement: Vec2,
    vector: Vec2,
}

impl Joystick {
    /// Create an idle joystick with the given geometry.
    #[must_use]
    pub fn new(options: &JoystickOptions) -> Self {
        let mut joystick = Self {
            radius: 1.0,
            deadzone: 0.0,
            origin: None,
            displacement: Vec2::ZERO,
            vector: Vec2::ZERO,
        };
        joystick.configure(options);
        joystick
    }

    /// Apply new geometry. An active drag keeps its origin.
    pub fn configure(&mut self, options: &JoystickOptions) {
        self.radius = options.radius.max(1.0);
        self.deadzone = options.deadzone.clamp(0.0, self.radius);
    }

    /// Start a drag at `origin`.
    pub fn begin(&mut self, origin: Vec2) {
        self.origin = Some(origin);
        self.displacement = Vec2::ZERO;
        self.vector = Vec2::ZERO;
    }

    /// Update the drag with the pointer's current position.
    pub fn drag(&mut self, position: Vec2) {
        let Some(origin) = self.origin else {
            return;
        };
        let delta = position - origin;
        if !delta.is_finite() {
            return;
        }

        let clamped = delta.clamp_length_max(self.radius);
        self.displacement = clamped;

        self.vector = if clamped.length() < self.deadzone {
            Vec2::ZERO
        } else {
            Vec2::new(clamped.x, -clamped.y) / self.radius
        }
        .clamp_length_max(1.0);
    }

    /// End the drag; output drops to zero immediately.
    pub fn release(&mut self) {
        self.origin = None;
        self.displacement = Vec2::ZERO;
        self.vector = Vec2::ZERO;
    }

    /// Current output in the closed unit disk.
    #[must_use]
    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    /// Knob offset from the drag origin, never longer than the radius.
    #[must_use]
    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    /// Drag origin, while a drag is in progress.
    #[must_use]
    pub fn origin(&self) -> Option<Vec2> {
        self.origin
    }

    /// Where to draw the knob, while a drag is in progress.
    #[must_use]
    pub fn knob(&self) -> Option<Vec2> {
        self.origin.map(|o| o + self.displacement)
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joystick() -> Joystick {
        Joystick::new(&JoystickOptions::default())
    }

    #[test]
    fn drag_up_by_radius_is_full_forward() {
        let mut joy = joystick();
        joy.begin(Vec2::new(80.0, 80.0));
        joy.drag(Vec2::new(80.0, 10.0));
        let v = joy.vector();
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inside_deadzone_is_exactly_zero() {
        let mut joy = joystick();
        joy.begin(Vec2::ZERO);
        for angle in 0..36 {
            let dir = Vec2::from_angle((angle as f32 * 10.0).to_radians());
            for r in [0.0, 1.0, 3.0, 5.0, 5.99] {
                joy.drag(dir * r);
                assert_eq!(joy.vector(), Vec2::ZERO);
            }
        }
    }

    #[test]
    fn displacement_never_exceeds_radius() {
        let mut joy = joystick();
        joy.begin(Vec2::new(100.0, 100.0));
        for p in [
            Vec2::new(500.0, 100.0),
            Vec2::new(-300.0, 900.0),
            Vec2::new(100.0, 169.0),
            Vec2::new(1e6, -1e6),
        ] {
            joy.drag(p);
            assert!(joy.displacement().length() <= 70.0 + 1e-3);
            assert!(joy.vector().length() <= 1.0 + 1e-6);
        }
        let knob = joy.knob().unwrap();
        assert!((knob - Vec2::new(100.0, 100.0)).length() <= 70.0 + 1e-3);
    }

    #[test]
    fn direction_is_preserved_when_clamped() {
        let mut joy = joystick();
        joy.begin(Vec2::ZERO);
        joy.drag(Vec2::new(300.0, 400.0));
        let v = joy.vector();
        assert!((v.x - 0.6).abs() < 1e-5);
        assert!((v.y + 0.8).abs() < 1e-5);
    }

    #[test]
    fn release_zeroes_output() {
        let mut joy = joystick();
        joy.begin(Vec2::ZERO);
        joy.drag(Vec2::new(50.0, 0.0));
        assert!(joy.vector().x > 0.0);
        joy.release();
        assert_eq!(joy.vector(), Vec2::ZERO);
        assert!(!joy.is_active());
        assert_eq!(joy.knob(), None);

        // Moves after release are ignored until the next begin.
        joy.drag(Vec2::new(50.0, 0.0));
        assert_eq!(joy.vector(), Vec2::ZERO);
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let mut joy = joystick();
        joy.begin(Vec2::ZERO);
        joy.drag(Vec2::new(0.0, -35.0));
        joy.drag(Vec2::new(f32::NAN, 0.0));
        assert!(joy.vector().is_finite());
        assert!((joy.vector().y - 0.5).abs() < 1e-6);
    }
}
