//! The per-surface controller.
//!
//! A `Controller` owns every piece of mutable input and motion state for
//! one rendering surface: pointer bindings, joystick, held keys, camera
//! state, entity motion, the orientation pipeline and its diagnostics.
//! Hosts feed it events between frames and call [`Controller::tick`] once
//! per frame; nothing is global, so independent instances can coexist and
//! teardown is just dropping the value.
//!
//! # Frame flow
//!
//! ```text
//! InputEvent ─► InputProcessor ─► RigCommand ─► Controller::execute
//!                                                    │ (state only)
//! display refresh ─► Controller::tick ─► SceneProvider (camera, entity)
//! ```

/// Commands produced by the input processor.
pub mod command;
/// Gyro permission outcome and event diagnostics.
pub mod gyro;

use glam::Vec2;
use web_time::Instant;

pub use command::RigCommand;
pub use gyro::{SensorDiagnostics, SensorPermission, SensorStatus};

use crate::camera::{
    CameraState, FollowIntegrator, OrientationPipeline, ScreenCompensator,
};
use crate::error::RigError;
use crate::input::{
    HeldKeys, InputEvent, InputProcessor, InputResponse, Joystick,
    LookController,
};
use crate::locomotion::{
    combine_input, EntityMotionState, LocomotionIntegrator,
};
use crate::options::Options;
use crate::scene::SceneProvider;
use crate::util::frame_timing::MAX_FRAME_STEP;

/// Which pipeline writes the camera orientation.
///
/// Exactly one is active per tick; the other's output is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Pointer look plus joystick/keyboard locomotion through the follow
    /// integrator.
    #[default]
    PointerLook,
    /// Device orientation drives the camera directly. Look deltas and
    /// locomotion input are dropped; the entity coasts to rest and the
    /// camera holds its position.
    DeviceOrientation,
}

/// Camera and locomotion controller for one rendering surface.
#[derive(Debug)]
pub struct Controller {
    options: Options,
    mode: CameraMode,
    input: InputProcessor,
    look: LookController,
    joystick: Joystick,
    keys: HeldKeys,
    camera_state: CameraState,
    follow: FollowIntegrator,
    motion: EntityMotionState,
    locomotion: LocomotionIntegrator,
    orientation: OrientationPipeline,
    screen: ScreenCompensator,
    diagnostics: SensorDiagnostics,
    viewport: (u32, u32),
}

impl Controller {
    /// Fresh controller: entity at the origin, camera behind it along -Z,
    /// pointer-look mode.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let look = LookController::new(&options.look);
        let mut camera_state = CameraState::new(
            options.follow.distance,
            options.follow.initial_pitch,
        );
        look.clamp_state(&mut camera_state);
        Self {
            mode: CameraMode::PointerLook,
            input: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            look,
            joystick: Joystick::new(&options.joystick),
            keys: HeldKeys::default(),
            camera_state,
            follow: FollowIntegrator::new(&options.follow),
            motion: EntityMotionState::default(),
            locomotion: LocomotionIntegrator::new(&options.locomotion),
            orientation: OrientationPipeline::new(),
            screen: ScreenCompensator::default(),
            diagnostics: SensorDiagnostics::new(
                options.sensor.diagnostic_window(),
            ),
            viewport: (0, 0),
            options,
        }
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Route one surface event and apply whatever command it produces.
    pub fn handle_event(&mut self, event: InputEvent) -> InputResponse {
        let dispatch = self.input.handle_event(event);
        match dispatch.command {
            Some(cmd) => match self.execute(cmd) {
                InputResponse::RequestSensorPermission => {
                    InputResponse::RequestSensorPermission
                }
                _ => dispatch.response,
            },
            None => dispatch.response,
        }
    }

    /// Route a key transition. `code` is the platform's physical key
    /// identifier (`"KeyW"`, `"ArrowUp"`, ...).
    pub fn handle_key(
        &mut self,
        code: &str,
        pressed: bool,
        repeat: bool,
    ) -> InputResponse {
        match self.input.handle_key(code, pressed, repeat) {
            Some(cmd) => self.execute(cmd),
            None => InputResponse::Ignored,
        }
    }

    /// Apply one command. State changes only; nothing is rendered here.
    pub fn execute(&mut self, cmd: RigCommand) -> InputResponse {
        match cmd {
            RigCommand::Look { delta } => {
                if self.mode != CameraMode::PointerLook {
                    log::trace!("look delta dropped in gyro mode");
                    return InputResponse::Ignored;
                }
                self.look.apply(delta, &mut self.camera_state);
            }
            RigCommand::JoystickBegin { origin } => self.joystick.begin(origin),
            RigCommand::JoystickDrag { position } => {
                self.joystick.drag(position);
            }
            RigCommand::JoystickRelease => self.joystick.release(),
            RigCommand::Move { action, held } => self.keys.set(action, held),
            RigCommand::Recenter => {
                let _ = self.recenter();
            }
            RigCommand::ToggleGyro => match self.mode {
                CameraMode::DeviceOrientation => self.disable_gyro(),
                CameraMode::PointerLook => {
                    return InputResponse::RequestSensorPermission;
                }
            },
            RigCommand::Orientation(sample) => {
                self.diagnostics.record(sample);
                if self.mode == CameraMode::DeviceOrientation {
                    let _ = self.orientation.apply(&sample, &self.screen);
                }
            }
            RigCommand::ScreenRotation { degrees } => {
                self.screen.set_angle(degrees);
                log::debug!("screen angle now {}°", self.screen.angle());
            }
        }
        InputResponse::Handled
    }

    /// Drop every pointer binding, held key and joystick drag. Hosts call
    /// this on detach and when the surface loses focus, since the matching
    /// release events will never arrive.
    pub fn release_input(&mut self) {
        self.input.release_pointers();
        self.keys.clear();
        self.joystick.release();
    }

    // ── Per-frame update ────────────────────────────────────────────

    /// Advance one frame of `dt` seconds and push the result into `scene`.
    ///
    /// `dt` is clamped to `[0, 0.1]`; a non-finite `dt` counts as 0.
    pub fn tick<S: SceneProvider + ?Sized>(&mut self, dt: f32, scene: &mut S) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_STEP.as_secs_f32())
        } else {
            0.0
        };
        self.poll_sensor(Instant::now());

        match self.mode {
            CameraMode::PointerLook => {
                let offset = self
                    .follow
                    .smooth_orientation(&mut self.camera_state, dt);
                let input =
                    combine_input(self.joystick.vector(), self.keys.vector());
                self.locomotion.step(&mut self.motion, offset, input, dt);
                let pose = self.follow.track(
                    &mut self.camera_state,
                    offset,
                    self.motion.position,
                    dt,
                );
                pose.apply(scene.camera_mut());
            }
            CameraMode::DeviceOrientation => {
                let offset = self.camera_state.offset();
                self.locomotion
                    .step(&mut self.motion, offset, Vec2::ZERO, dt);
                if let Some(q) = self.orientation.output() {
                    scene.camera_mut().orientation = q;
                }
            }
        }

        scene.place_entity(self.motion.position, self.motion.facing_yaw);
        scene.render();
    }

    /// Settle the sensor diagnostic if its window has elapsed by `now`.
    pub fn poll_sensor(&mut self, now: Instant) {
        if let Some(status) = self.diagnostics.poll(now) {
            log::info!("sensor diagnostic: {status}");
        }
    }

    // ── Gyro ────────────────────────────────────────────────────────

    /// Report the outcome of the platform permission flow.
    ///
    /// On success the event counter is reset, the diagnostic window opens
    /// at `now` and the camera switches to [`CameraMode::DeviceOrientation`].
    /// On failure the mode is left alone and the status text explains why.
    ///
    /// # Errors
    ///
    /// [`RigError::PermissionDenied`] for [`SensorPermission::Denied`] and
    /// [`RigError::SensorUnavailable`] for [`SensorPermission::Unavailable`].
    pub fn enable_gyro(
        &mut self,
        permission: SensorPermission,
        now: Instant,
    ) -> Result<(), RigError> {
        match permission {
            SensorPermission::Denied => {
                log::warn!("orientation permission denied");
                self.diagnostics.fail(SensorStatus::PermissionDenied);
                Err(RigError::PermissionDenied(
                    "orientation access was refused".into(),
                ))
            }
            SensorPermission::Unavailable => {
                log::warn!("orientation sensor unavailable");
                self.diagnostics.fail(SensorStatus::Unavailable);
                Err(RigError::SensorUnavailable(
                    "no device orientation support".into(),
                ))
            }
            SensorPermission::Granted | SensorPermission::NotRequired => {
                self.diagnostics.start(now);
                if self.mode != CameraMode::DeviceOrientation {
                    self.mode = CameraMode::DeviceOrientation;
                    log::info!("gyro enabled ({permission:?})");
                }
                Ok(())
            }
        }
    }

    /// Return to pointer look. The follow integrator resumes from its
    /// retained state.
    pub fn disable_gyro(&mut self) {
        if self.mode == CameraMode::DeviceOrientation {
            self.mode = CameraMode::PointerLook;
            log::info!("gyro disabled");
        }
        self.diagnostics.stop();
    }

    /// Make the current gyro heading the new zero yaw. Returns whether a
    /// recenter happened; pointer-look mode, no reading yet, or a camera
    /// looking straight up or down all leave things unchanged.
    pub fn recenter(&mut self) -> bool {
        if self.mode != CameraMode::DeviceOrientation {
            log::debug!("recenter ignored in pointer-look mode");
            return false;
        }
        let done = self.orientation.recenter();
        if done {
            log::debug!(
                "recentered, yaw offset {:.3} rad",
                self.orientation.recenter_yaw()
            );
        }
        done
    }

    // ── Configuration ───────────────────────────────────────────────

    /// Forward a surface resize to the scene camera.
    pub fn resize<S: SceneProvider + ?Sized>(
        &mut self,
        scene: &mut S,
        width: u32,
        height: u32,
    ) {
        self.viewport = (width, height);
        scene.camera_mut().resize(width, height);
    }

    /// Swap in new options. Motion and camera state are kept; pitch is
    /// pulled back inside the new bounds.
    pub fn set_options(&mut self, options: Options) {
        self.look = LookController::new(&options.look);
        self.look.clamp_state(&mut self.camera_state);
        self.joystick.configure(&options.joystick);
        self.camera_state.distance = options.follow.distance;
        self.follow = FollowIntegrator::new(&options.follow);
        self.locomotion = LocomotionIntegrator::new(&options.locomotion);
        self.diagnostics
            .set_window(options.sensor.diagnostic_window());
        self.input.set_key_bindings(options.keybindings.clone());
        self.options = options;
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Active camera mode.
    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Follow-camera state.
    #[must_use]
    pub fn camera_state(&self) -> &CameraState {
        &self.camera_state
    }

    /// Followed entity's motion.
    #[must_use]
    pub fn motion(&self) -> &EntityMotionState {
        &self.motion
    }

    /// Virtual joystick, for drawing the knob.
    #[must_use]
    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    /// Held movement keys.
    #[must_use]
    pub fn held_keys(&self) -> &HeldKeys {
        &self.keys
    }

    /// Input processor (pointer bindings, key bindings).
    #[must_use]
    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// Orientation pipeline.
    #[must_use]
    pub fn orientation(&self) -> &OrientationPipeline {
        &self.orientation
    }

    /// Screen-rotation compensator.
    #[must_use]
    pub fn screen(&self) -> &ScreenCompensator {
        &self.screen
    }

    /// Sensor diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &SensorDiagnostics {
        &self.diagnostics
    }

    /// Last size passed to [`resize`](Self::resize).
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// One-line HUD status.
    #[must_use]
    pub fn status_text(&self) -> String {
        match (self.mode, self.diagnostics.status()) {
            (CameraMode::PointerLook, SensorStatus::Idle) => {
                "pointer look".to_owned()
            }
            (CameraMode::PointerLook, _) => {
                format!("pointer look | {}", self.diagnostics.status_text())
            }
            (CameraMode::DeviceOrientation, _) => {
                self.diagnostics.status_text()
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
