//! Device orientation → camera quaternion.
//!
//! Sensor angles are composed as yaw (alpha, about Y) then pitch (beta,
//! about X) then roll (-gamma, about Z), intrinsic. The device frame is
//! Z-up while the camera frame is Y-up, so a fixed -90° turn about X
//! follows, then the screen-rotation correction. A recenter offset (pure
//! yaw) is kept and premultiplied onto every subsequent reading, so a
//! recenter survives the next sensor event instead of being overwritten by
//! it.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec3};

use super::screen::ScreenCompensator;
use crate::input::OrientationSample;
use crate::util::smoothing::wrap_angle;

/// Horizontal forward shorter than this cannot define a heading.
const MIN_HEADING_LENGTH: f32 = 1e-4;

/// Converts orientation samples into camera orientations.
#[derive(Debug, Clone, Default)]
pub struct OrientationPipeline {
    recenter_yaw: f32,
    output: Option<Quat>,
}

/// Device-to-camera basis correction: -90° about X.
#[must_use]
pub fn basis_correction() -> Quat {
    Quat::from_rotation_x(-FRAC_PI_2)
}

/// Sensor orientation before the recenter offset.
#[must_use]
pub fn device_orientation(
    sample: &OrientationSample,
    screen: &ScreenCompensator,
) -> Quat {
    let (alpha, beta, gamma) = sample.radians();
    let device = Quat::from_euler(EulerRot::YXZ, alpha, beta, -gamma);
    (device * basis_correction() * screen.correction()).normalize()
}

/// Heading of a direction about +Y, measured from +Z toward +X. `None`
/// when the direction is (nearly) vertical.
#[must_use]
pub fn heading(direction: Vec3) -> Option<f32> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length() < MIN_HEADING_LENGTH {
        return None;
    }
    Some(flat.x.atan2(flat.z))
}

impl OrientationPipeline {
    /// Pipeline with no recenter offset and no reading yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one sensor reading and return the camera orientation.
    pub fn apply(
        &mut self,
        sample: &OrientationSample,
        screen: &ScreenCompensator,
    ) -> Quat {
        let q = (Quat::from_rotation_y(-self.recenter_yaw)
            * device_orientation(sample, screen))
        .normalize();
        self.output = Some(q);
        q
    }

    /// Most recent camera orientation, if a reading has arrived.
    #[must_use]
    pub fn output(&self) -> Option<Quat> {
        self.output
    }

    /// Accumulated recenter yaw in radians.
    #[must_use]
    pub fn recenter_yaw(&self) -> f32 {
        self.recenter_yaw
    }

    /// Make the current horizontal heading the new zero yaw. Returns
    /// `false` (and changes nothing) before the first reading or while the
    /// camera looks straight up or down.
    pub fn recenter(&mut self) -> bool {
        let Some(current) = self.output else {
            return false;
        };
        let Some(yaw) = heading(current * Vec3::NEG_Z) else {
            return false;
        };
        self.recenter_yaw = wrap_angle(self.recenter_yaw + yaw);
        self.output =
            Some((Quat::from_rotation_y(-yaw) * current).normalize());
        true
    }

    /// Drop the recenter offset.
    pub fn reset_recenter(&mut self) {
        self.recenter_yaw = 0.0;
    }
}
