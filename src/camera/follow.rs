//! Third-person follow integrator.
//!
//! Each tick the live yaw/pitch ease toward the look targets, the tracked
//! point is placed at the entity's eye height, and the camera position
//! eases toward the spherical offset around it. The camera is then aimed
//! at the tracked point from wherever the smoothed position has got to, so
//! it always frames the entity regardless of smoothing lag.

use glam::Vec3;

use super::core::Camera;
use super::state::CameraState;
use crate::options::FollowOptions;
use crate::util::smoothing::{exp_factor, smooth_toward};

/// Where the camera should be this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowPose {
    /// Smoothed camera position.
    pub position: Vec3,
    /// Point the camera aims at.
    pub target: Vec3,
}

impl FollowPose {
    /// Place `camera` at this pose and aim it at the target.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position;
        camera.look_at(self.target);
    }
}

/// Exponential-smoothing follow camera.
#[derive(Debug, Clone)]
pub struct FollowIntegrator {
    look_lerp: f32,
    position_lerp: f32,
    eye_height: f32,
}

impl FollowIntegrator {
    /// Create an integrator from follow options.
    #[must_use]
    pub fn new(options: &FollowOptions) -> Self {
        Self {
            look_lerp: options.look_lerp,
            position_lerp: options.position_lerp,
            eye_height: options.eye_height,
        }
    }

    /// Ease yaw/pitch toward their targets and return the camera offset
    /// for the new angles.
    pub fn smooth_orientation(&self, state: &mut CameraState, dt: f32) -> Vec3 {
        state.yaw =
            smooth_toward(state.yaw, state.desired_yaw, self.look_lerp, dt);
        state.pitch =
            smooth_toward(state.pitch, state.desired_pitch, self.look_lerp, dt);
        state.offset()
    }

    /// Track the entity: derive the target point and ease the camera
    /// position toward `target + offset`.
    pub fn track(
        &self,
        state: &mut CameraState,
        offset: Vec3,
        entity_position: Vec3,
        dt: f32,
    ) -> FollowPose {
        state.target = entity_position + Vec3::Y * self.eye_height;
        let desired = state.target + offset;
        state.current_position = state
            .current_position
            .lerp(desired, exp_factor(self.position_lerp, dt));
        FollowPose {
            position: state.current_position,
            target: state.target,
        }
    }

    /// Both steps back to back.
    pub fn step(
        &self,
        state: &mut CameraState,
        entity_position: Vec3,
        dt: f32,
    ) -> FollowPose {
        let offset = self.smooth_orientation(state, dt);
        self.track(state, offset, entity_position, dt)
    }
}
