//! Frame-rate independent smoothing helpers.
//!
//! All smoothing in the controller is a first-order low-pass of the form
//! `x += (target - x) * (1 - exp(-rate * dt))`, so the result after a given
//! amount of simulated time does not depend on how it was sliced into
//! frames.

use std::f32::consts::PI;

/// Blend factor for one step of exponential smoothing.
///
/// `rate` is the inverse time constant (1/s). Non-positive `dt` yields 0.
#[inline]
#[must_use]
pub fn exp_factor(rate: f32, dt: f32) -> f32 {
    if dt <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Move `value` toward `target` by one exponential smoothing step.
#[inline]
#[must_use]
pub fn smooth_toward(value: f32, target: f32, rate: f32, dt: f32) -> f32 {
    value + (target - value) * exp_factor(rate, dt)
}

/// Signed shortest rotation from `from` to `to`, in `[-π, π]`.
#[inline]
#[must_use]
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    let d = to - from;
    d.sin().atan2(d.cos())
}

/// Wrap an angle into `(-π, π]`.
#[inline]
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.sin().atan2(angle.cos());
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_is_zero_without_time() {
        assert_eq!(exp_factor(18.0, 0.0), 0.0);
        assert_eq!(exp_factor(18.0, -0.5), 0.0);
    }

    #[test]
    fn factor_is_frame_rate_independent() {
        // One 1/30 s step must equal two 1/60 s steps.
        let one = smooth_toward(0.0, 1.0, 18.0, 1.0 / 30.0);
        let half = smooth_toward(0.0, 1.0, 18.0, 1.0 / 60.0);
        let two = smooth_toward(half, 1.0, 18.0, 1.0 / 60.0);
        assert!((one - two).abs() < 1e-5);
    }

    #[test]
    fn shortest_angle_crosses_the_seam() {
        let from = 170.0_f32.to_radians();
        let to = -170.0_f32.to_radians();
        let d = shortest_angle(from, to);
        assert!((d - 20.0_f32.to_radians()).abs() < 1e-5);
        let back = shortest_angle(to, from);
        assert!((back + 20.0_f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn wrap_keeps_angles_in_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }
}
