use glam::Quat;

/// Counter-rotation for the screen's angle relative to the device's
/// natural orientation.
///
/// Screen rotation arrives as discrete platform transitions, so the
/// correction is replaced outright with no smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCompensator {
    degrees: f32,
    correction: Quat,
}

impl ScreenCompensator {
    /// Compensator for a screen at `degrees`.
    #[must_use]
    pub fn new(degrees: f32) -> Self {
        let mut comp = Self {
            degrees: 0.0,
            correction: Quat::IDENTITY,
        };
        comp.set_angle(degrees);
        comp
    }

    /// Recompute for a new screen angle. Non-finite angles read as 0.
    pub fn set_angle(&mut self, degrees: f32) {
        let degrees = if degrees.is_finite() { degrees } else { 0.0 };
        self.degrees = degrees;
        self.correction = Quat::from_rotation_z(-degrees.to_radians());
    }

    /// Current screen angle in degrees.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.degrees
    }

    /// Rotation of `-angle` about the viewing axis.
    #[must_use]
    pub fn correction(&self) -> Quat {
        self.correction
    }
}

impl Default for ScreenCompensator {
    fn default() -> Self {
        Self::new(0.0)
    }
}
