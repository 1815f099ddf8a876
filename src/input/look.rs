use glam::Vec2;

use crate::camera::CameraState;
use crate::options::LookOptions;

/// Turns look-pointer drags into yaw/pitch targets.
///
/// Only the `desired_*` fields are written; the follow integrator eases
/// the live angles toward them.
#[derive(Debug, Clone)]
pub struct LookController {
    sensitivity: f32,
    pitch_min: f32,
    pitch_max: f32,
}

impl LookController {
    /// Create a controller from look options.
    #[must_use]
    pub fn new(options: &LookOptions) -> Self {
        let (pitch_min, pitch_max) = if options.pitch_min <= options.pitch_max
        {
            (options.pitch_min, options.pitch_max)
        } else {
            (options.pitch_max, options.pitch_min)
        };
        Self {
            sensitivity: options.sensitivity,
            pitch_min,
            pitch_max,
        }
    }

    /// Pitch bounds as `(min, max)`.
    #[must_use]
    pub fn pitch_bounds(&self) -> (f32, f32) {
        (self.pitch_min, self.pitch_max)
    }

    /// Apply one pointer delta in pixels.
    pub fn apply(&self, delta: Vec2, state: &mut CameraState) {
        if !delta.is_finite() {
            return;
        }
        state.desired_yaw -= delta.x * self.sensitivity;
        state.desired_pitch = (state.desired_pitch
            - delta.y * self.sensitivity)
            .clamp(self.pitch_min, self.pitch_max);
    }

    /// Pull both live and desired pitch back inside the bounds.
    pub fn clamp_state(&self, state: &mut CameraState) {
        state.pitch = state.pitch.clamp(self.pitch_min, self.pitch_max);
        state.desired_pitch =
            state.desired_pitch.clamp(self.pitch_min, self.pitch_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CameraState {
        CameraState::new(5.5, -0.12)
    }

    #[test]
    fn horizontal_drag_turns_yaw_target() {
        let look = LookController::new(&LookOptions::default());
        let mut cam = state();
        look.apply(Vec2::new(100.0, 0.0), &mut cam);
        assert!((cam.desired_yaw + 0.32).abs() < 1e-6);
        // Live yaw is untouched until the integrator runs.
        assert_eq!(cam.yaw, 0.0);
    }

    #[test]
    fn pitch_target_stays_in_bounds() {
        let opts = LookOptions::default();
        let look = LookController::new(&opts);
        let mut cam = state();
        for dy in [-5000.0, 300.0, 9000.0, -12.0, -100_000.0] {
            look.apply(Vec2::new(0.0, dy), &mut cam);
            assert!(cam.desired_pitch >= opts.pitch_min);
            assert!(cam.desired_pitch <= opts.pitch_max);
        }
        assert_eq!(cam.desired_pitch, opts.pitch_max);
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let look = LookController::new(&LookOptions::default());
        let mut cam = state();
        for _ in 0..10 {
            look.apply(Vec2::new(-1000.0, 0.0), &mut cam);
        }
        assert!((cam.desired_yaw - 32.0).abs() < 1e-3);
    }
}
