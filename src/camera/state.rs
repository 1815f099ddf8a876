use glam::Vec3;

/// Follow-camera state for one session.
///
/// `desired_yaw` / `desired_pitch` are written by the look controller;
/// everything else is advanced once per tick by the follow integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Current (smoothed) yaw in radians. Unbounded.
    pub yaw: f32,
    /// Current (smoothed) pitch in radians.
    pub pitch: f32,
    /// Yaw the camera is easing toward.
    pub desired_yaw: f32,
    /// Pitch the camera is easing toward.
    pub desired_pitch: f32,
    /// Distance from the tracked point.
    pub distance: f32,
    /// Tracked point (entity position plus eye height), derived each tick.
    pub target: Vec3,
    /// Smoothed camera position. Starts at the origin and eases out to its
    /// first desired position over the opening frames.
    pub current_position: Vec3,
}

impl CameraState {
    /// Fresh session state looking along +Z at the given pitch.
    #[must_use]
    pub fn new(distance: f32, pitch: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch,
            desired_yaw: 0.0,
            desired_pitch: pitch,
            distance,
            target: Vec3::ZERO,
            current_position: Vec3::ZERO,
        }
    }

    /// Camera offset from the tracked point for the current yaw/pitch.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        spherical_offset(self.yaw, self.pitch, self.distance)
    }
}

/// Offset from the tracked point to the camera for a yaw/pitch/distance
/// triple: the negated spherical direction scaled by `distance`.
#[inline]
#[must_use]
pub fn spherical_offset(yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    -distance * Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
}
