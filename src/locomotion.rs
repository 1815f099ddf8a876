//! Camera-relative locomotion for the followed entity.
//!
//! Joystick and keyboard input are summed into a 2D intent (x = right,
//! y = forward), mapped onto the camera's horizontal basis, and integrated
//! into a velocity with acceleration, deceleration and a hard speed cap.
//! The entity's facing eases toward its heading along the shortest arc.

use glam::{Vec2, Vec3};

use crate::options::LocomotionOptions;
use crate::util::smoothing::{shortest_angle, wrap_angle};

/// Motion state of the followed entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntityMotionState {
    /// World position.
    pub position: Vec3,
    /// World velocity (horizontal).
    pub velocity: Vec3,
    /// Heading in radians about +Y, 0 facing +Z, kept in `(-π, π]`.
    pub facing_yaw: f32,
}

impl EntityMotionState {
    /// Entity at rest at `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Current speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Sum joystick and keyboard intent, normalizing anything longer than 1 so
/// diagonals and joystick+key combinations are no faster than a single
/// full input.
#[must_use]
pub fn combine_input(joystick: Vec2, keys: Vec2) -> Vec2 {
    let input = joystick + keys;
    if input.length() > 1.0 {
        input.normalize()
    } else {
        input
    }
}

/// Horizontal `(forward, right)` unit vectors for a camera offset. Both are
/// zero when the offset has no horizontal component.
#[must_use]
pub fn camera_basis(offset: Vec3) -> (Vec3, Vec3) {
    let forward = Vec3::new(-offset.x, 0.0, -offset.z).normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    (forward, right)
}

/// Integrates input into velocity, position and facing.
#[derive(Debug, Clone)]
pub struct LocomotionIntegrator {
    accel: f32,
    deaccel: f32,
    max_speed: f32,
    turn_rate: f32,
    facing_speed_threshold: f32,
}

impl LocomotionIntegrator {
    /// Create an integrator from locomotion options.
    #[must_use]
    pub fn new(options: &LocomotionOptions) -> Self {
        Self {
            accel: options.accel.max(0.0),
            deaccel: options.deaccel.max(0.0),
            max_speed: options.max_speed.max(0.0),
            turn_rate: options.turn_rate.max(0.0),
            facing_speed_threshold: options.facing_speed_threshold,
        }
    }

    /// Speed cap.
    #[must_use]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Advance `state` by `dt` seconds.
    ///
    /// `offset` is the camera's current offset from its tracked point and
    /// `input` the combined intent (see [`combine_input`]).
    pub fn step(
        &self,
        state: &mut EntityMotionState,
        offset: Vec3,
        input: Vec2,
        dt: f32,
    ) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let input = if input.is_finite() { input } else { Vec2::ZERO };

        let (forward, right) = camera_basis(offset);
        let move_dir = forward * input.y + right * input.x;

        if move_dir.length_squared() > 0.0 {
            state.velocity += move_dir.normalize() * self.accel * dt;
        } else {
            let speed = state.velocity.length();
            let new_speed = (speed - self.deaccel * dt).max(0.0);
            state.velocity = state.velocity.normalize_or_zero() * new_speed;
        }
        state.velocity = state.velocity.clamp_length_max(self.max_speed);

        state.position += state.velocity * dt;

        if state.velocity.length() > self.facing_speed_threshold {
            let target = state.velocity.x.atan2(state.velocity.z);
            let d = shortest_angle(state.facing_yaw, target);
            state.facing_yaw = wrap_angle(
                state.facing_yaw + d * (dt * self.turn_rate).min(1.0),
            );
        }
    }
}
