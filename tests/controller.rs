//! End-to-end controller behaviour through the public API.
#![allow(missing_docs, clippy::unwrap_used)]

use glam::{Quat, Vec2, Vec3};
use touchrig::camera::Camera;
use touchrig::controller::{
    CameraMode, Controller, SensorPermission, SensorStatus,
};
use touchrig::input::{
    InputEvent, InputResponse, OrientationSample, PointerId, PointerRole,
    SurfaceRegion,
};
use touchrig::options::{Options, ProjectionOptions};
use touchrig::scene::SceneProvider;
use touchrig::RigError;
use web_time::{Duration, Instant};

const DT: f32 = 1.0 / 60.0;

/// Scene that remembers everything the controller pushed into it.
struct RecordingScene {
    camera: Camera,
    placements: Vec<(Vec3, f32)>,
    orientations: Vec<Quat>,
}

impl RecordingScene {
    fn new() -> Self {
        Self {
            camera: Camera::new(&ProjectionOptions::default(), 1.0),
            placements: Vec::new(),
            orientations: Vec::new(),
        }
    }
}

impl SceneProvider for RecordingScene {
    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn place_entity(&mut self, position: Vec3, facing_yaw: f32) {
        self.placements.push((position, facing_yaw));
    }

    fn render(&mut self) {
        self.orientations.push(self.camera.orientation);
    }
}

fn down(id: i64, x: f32, y: f32, region: SurfaceRegion) -> InputEvent {
    InputEvent::PointerDown {
        pointer: PointerId(id),
        position: Vec2::new(x, y),
        region,
    }
}

fn mv(id: i64, x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        pointer: PointerId(id),
        position: Vec2::new(x, y),
    }
}

fn run(controller: &mut Controller, scene: &mut RecordingScene, ticks: usize) {
    for _ in 0..ticks {
        controller.tick(DT, scene);
    }
}

#[test]
fn look_drag_converges_within_a_second() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();

    let _ = c.handle_event(down(1, 400.0, 300.0, SurfaceRegion::Viewport));
    let _ = c.handle_event(mv(1, 500.0, 300.0));
    assert!((c.camera_state().desired_yaw + 0.32).abs() < 1e-6);

    run(&mut c, &mut scene, 60);
    assert_eq!(scene.orientations.len(), 60);
    assert!((c.camera_state().yaw + 0.32).abs() < 1e-3);
    assert!((c.camera_state().pitch + 0.12).abs() < 1e-3);

    // The camera always aims at the tracked point.
    let to_target =
        (c.camera_state().target - scene.camera.position).normalize();
    assert!((scene.camera.forward() - to_target).length() < 1e-4);
}

#[test]
fn second_look_pointer_is_ignored_until_release() {
    let mut c = Controller::default();

    let r = c.handle_event(down(1, 400.0, 300.0, SurfaceRegion::Viewport));
    assert_eq!(r, InputResponse::Captured(PointerRole::Look));
    let r = c.handle_event(down(2, 600.0, 300.0, SurfaceRegion::Viewport));
    assert_eq!(r, InputResponse::Ignored);

    let _ = c.handle_event(mv(2, 700.0, 300.0));
    assert_eq!(c.camera_state().desired_yaw, 0.0);
    let r = c.handle_event(InputEvent::PointerUp {
        pointer: PointerId(2),
    });
    assert_eq!(r, InputResponse::Ignored);

    let _ = c.handle_event(InputEvent::PointerUp {
        pointer: PointerId(1),
    });
    let r = c.handle_event(down(2, 600.0, 300.0, SurfaceRegion::Viewport));
    assert_eq!(r, InputResponse::Captured(PointerRole::Look));
}

#[test]
fn joystick_and_look_bind_independently() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();

    let r = c.handle_event(down(10, 90.0, 600.0, SurfaceRegion::Joystick));
    assert_eq!(r, InputResponse::Captured(PointerRole::Joystick));
    let r = c.handle_event(down(11, 700.0, 300.0, SurfaceRegion::Viewport));
    assert_eq!(r, InputResponse::Captured(PointerRole::Look));

    let _ = c.handle_event(mv(10, 90.0, 530.0));
    let _ = c.handle_event(mv(11, 650.0, 300.0));

    assert!((c.joystick().vector() - Vec2::new(0.0, 1.0)).length() < 1e-6);
    assert!((c.camera_state().desired_yaw - 0.16).abs() < 1e-6);

    // A move from the joystick pointer never rotates the camera.
    let _ = c.handle_event(mv(10, 20.0, 530.0));
    assert!((c.camera_state().desired_yaw - 0.16).abs() < 1e-6);

    run(&mut c, &mut scene, 10);
    assert!(c.motion().speed() > 0.0);
}

#[test]
fn joystick_forward_for_one_second() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();

    let _ = c.handle_event(down(5, 100.0, 600.0, SurfaceRegion::Joystick));
    let _ = c.handle_event(mv(5, 100.0, 530.0));
    run(&mut c, &mut scene, 60);

    let travelled = c.motion().position.z;
    assert!((travelled - 4.66).abs() < 4.66 * 0.05, "{travelled}");
    assert!(c.motion().position.x.abs() < 1e-3);
    assert_eq!(scene.placements.len(), 60);
    assert_eq!(scene.placements[59].0, c.motion().position);

    // Release: no decay on the stick, the entity coasts down.
    let _ = c.handle_event(InputEvent::PointerCancel {
        pointer: PointerId(5),
    });
    assert_eq!(c.joystick().vector(), Vec2::ZERO);
    run(&mut c, &mut scene, 30);
    assert_eq!(c.motion().speed(), 0.0);
}

#[test]
fn speed_never_exceeds_cap_with_mixed_input() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();
    let max = c.options().locomotion.max_speed;

    let _ = c.handle_key("KeyW", true, false);
    let _ = c.handle_key("KeyD", true, false);
    let _ = c.handle_event(down(3, 100.0, 600.0, SurfaceRegion::Joystick));
    let _ = c.handle_event(mv(3, 170.0, 600.0));
    let _ = c.handle_event(down(4, 500.0, 300.0, SurfaceRegion::Viewport));

    let steps = [DT, 0.001, 0.1, 0.05].iter().cycle().take(240);
    for (i, dt) in steps.enumerate() {
        let _ = c.handle_event(mv(4, 500.0 + i as f32 * 3.0, 300.0));
        c.tick(*dt, &mut scene);
        assert!(c.motion().speed() <= max + 1e-4);
    }
}

#[test]
fn pitch_stays_bounded_every_tick() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();
    let (min, max) = (
        c.options().look.pitch_min,
        c.options().look.pitch_max,
    );

    let _ = c.handle_event(down(1, 400.0, 300.0, SurfaceRegion::Viewport));
    let mut y = 300.0;
    for step in 0..200 {
        y += if (step / 50) % 2 == 0 { 40.0 } else { -40.0 };
        let _ = c.handle_event(mv(1, 400.0, y));
        c.tick(DT, &mut scene);
        let s = c.camera_state();
        assert!(s.pitch >= min && s.pitch <= max, "pitch {}", s.pitch);
        assert!(s.desired_pitch >= min && s.desired_pitch <= max);
    }
}

#[test]
fn keyboard_moves_relative_to_camera_heading() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();

    // Turn the camera a quarter turn: yaw -π/2 looks along -X.
    let sens = c.options().look.sensitivity;
    let _ = c.handle_event(down(1, 0.0, 0.0, SurfaceRegion::Viewport));
    let _ = c.handle_event(mv(1, std::f32::consts::FRAC_PI_2 / sens, 0.0));
    run(&mut c, &mut scene, 120);

    let _ = c.handle_key("KeyW", true, false);
    run(&mut c, &mut scene, 30);
    let p = c.motion().position;
    assert!(p.x < -0.5, "{p}");
    assert!(p.z.abs() < 0.05 * p.x.abs(), "{p}");

    // Entity turned to face its heading (-X is yaw -π/2).
    let facing = c.motion().facing_yaw;
    assert!((facing + std::f32::consts::FRAC_PI_2).abs() < 0.05, "{facing}");
}

#[test]
fn gyro_mode_excludes_pointer_look() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();
    run(&mut c, &mut scene, 30);
    let held_position = scene.camera.position;

    c.enable_gyro(SensorPermission::Granted, Instant::now())
        .unwrap();
    assert_eq!(c.mode(), CameraMode::DeviceOrientation);

    let _ = c.handle_event(down(1, 400.0, 300.0, SurfaceRegion::Viewport));
    let _ = c.handle_event(mv(1, 600.0, 200.0));
    let _ = c.handle_event(InputEvent::Orientation(OrientationSample::new(
        0.0, 90.0, 0.0,
    )));
    run(&mut c, &mut scene, 5);

    assert_eq!(c.camera_state().desired_yaw, 0.0);
    assert_eq!(scene.camera.position, held_position);
    // Upright device, portrait: the camera looks at the horizon along -Z.
    let fwd = scene.camera.forward();
    assert!((fwd - Vec3::NEG_Z).length() < 1e-4, "{fwd}");

    c.disable_gyro();
    let _ = c.handle_event(mv(1, 700.0, 200.0));
    assert!(c.camera_state().desired_yaw < 0.0);
}

#[test]
fn landscape_screen_rotates_camera_about_view_axis() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();
    c.enable_gyro(SensorPermission::NotRequired, Instant::now())
        .unwrap();

    let _ = c.handle_event(InputEvent::ScreenRotation { degrees: 90.0 });
    let _ = c.handle_event(InputEvent::Orientation(OrientationSample::new(
        0.0, 90.0, 0.0,
    )));
    c.tick(DT, &mut scene);

    let q = scene.camera.orientation;
    // Viewing direction is unchanged by the roll; camera up is rotated.
    assert!((q * Vec3::NEG_Z - Vec3::NEG_Z).length() < 1e-4);
    assert!((q * Vec3::Y).dot(Vec3::Y).abs() < 1e-4);
}

#[test]
fn recenter_persists_across_sensor_events() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();
    c.enable_gyro(SensorPermission::Granted, Instant::now())
        .unwrap();

    let upright = |alpha| {
        InputEvent::Orientation(OrientationSample::new(alpha, 90.0, 0.0))
    };
    let _ = c.handle_event(upright(60.0));
    assert_eq!(c.handle_key("KeyQ", true, false), InputResponse::Handled);

    // Same heading again: still the zero reference after recentering.
    let _ = c.handle_event(upright(60.0));
    c.tick(DT, &mut scene);
    let fwd = scene.camera.forward();
    let heading = fwd.x.atan2(fwd.z);
    assert!(
        heading.abs() < 1e-3
            || (heading.abs() - std::f32::consts::PI).abs() < 1e-3,
        "{heading}"
    );
    let first = fwd;

    // Turning the device 30° turns the camera 30° from that reference.
    let _ = c.handle_event(upright(90.0));
    c.tick(DT, &mut scene);
    let turned = scene.camera.forward();
    let angle = first.angle_between(turned);
    assert!((angle - 30.0_f32.to_radians()).abs() < 1e-3, "{angle}");
}

#[test]
fn null_angles_read_as_zero() {
    let mut c = Controller::default();
    let mut scene = RecordingScene::new();
    c.enable_gyro(SensorPermission::Granted, Instant::now())
        .unwrap();

    let _ = c.handle_event(InputEvent::Orientation(OrientationSample {
        alpha: None,
        beta: Some(90.0),
        gamma: None,
    }));
    c.tick(DT, &mut scene);
    let with_nulls = scene.camera.orientation;

    let _ = c.handle_event(InputEvent::Orientation(OrientationSample::new(
        0.0, 90.0, 0.0,
    )));
    c.tick(DT, &mut scene);
    assert!(with_nulls.abs_diff_eq(scene.camera.orientation, 1e-6));
}

#[test]
fn denied_permission_keeps_pointer_controls() {
    let mut c = Controller::default();
    assert_eq!(
        c.handle_key("KeyG", true, false),
        InputResponse::RequestSensorPermission
    );
    let err = c
        .enable_gyro(SensorPermission::Denied, Instant::now())
        .unwrap_err();
    assert!(matches!(err, RigError::PermissionDenied(_)));
    assert_eq!(c.mode(), CameraMode::PointerLook);
    assert_eq!(c.diagnostics().status(), SensorStatus::PermissionDenied);

    let _ = c.handle_event(down(1, 400.0, 300.0, SurfaceRegion::Viewport));
    let _ = c.handle_event(mv(1, 450.0, 300.0));
    assert!(c.camera_state().desired_yaw < 0.0);
}

#[test]
fn diagnostic_counts_events_that_arrive_during_window() {
    let mut c = Controller::default();
    let t0 = Instant::now();
    c.enable_gyro(SensorPermission::Granted, t0).unwrap();
    assert_eq!(c.diagnostics().status(), SensorStatus::Waiting);

    c.poll_sensor(t0 + Duration::from_millis(500));
    assert_eq!(c.diagnostics().status(), SensorStatus::Waiting);

    let _ = c.handle_event(InputEvent::Orientation(OrientationSample::new(
        5.0, 80.0, 1.0,
    )));
    c.poll_sensor(t0 + Duration::from_millis(2100));
    assert_eq!(c.diagnostics().status(), SensorStatus::Receiving);
    assert!(c.status_text().contains("α 5°"), "{}", c.status_text());
}

#[test]
fn diagnostic_reports_silence() {
    let mut c = Controller::default();
    let t0 = Instant::now();
    c.enable_gyro(SensorPermission::NotRequired, t0).unwrap();
    c.poll_sensor(t0 + Duration::from_millis(2000));
    assert_eq!(c.diagnostics().status(), SensorStatus::NoEvents);
    // Advisory only: still in gyro mode.
    assert_eq!(c.mode(), CameraMode::DeviceOrientation);
}

#[test]
fn custom_options_flow_through() {
    let options = Options::from_toml(
        r#"
[joystick]
radius = 100.0

[locomotion]
max_speed = 2.0

[keybindings.bindings]
move_forward = "ArrowUp"
"#,
    )
    .unwrap();
    let mut c = Controller::new(options);
    let mut scene = RecordingScene::new();

    assert_eq!(c.handle_key("KeyW", true, false), InputResponse::Ignored);
    assert_eq!(c.handle_key("ArrowUp", true, false), InputResponse::Handled);
    run(&mut c, &mut scene, 60);
    assert!((c.motion().speed() - 2.0).abs() < 1e-4);

    let _ = c.handle_key("ArrowUp", false, false);
    let _ = c.handle_event(down(9, 0.0, 0.0, SurfaceRegion::Joystick));
    let _ = c.handle_event(mv(9, 0.0, -50.0));
    assert!((c.joystick().vector().y - 0.5).abs() < 1e-6);
}

#[test]
fn hud_region_never_binds() {
    let mut c = Controller::default();
    let r = c.handle_event(down(1, 10.0, 10.0, SurfaceRegion::Hud));
    assert_eq!(r, InputResponse::Ignored);
    let r = c.handle_event(down(2, 400.0, 300.0, SurfaceRegion::Viewport));
    assert_eq!(r, InputResponse::Captured(PointerRole::Look));
}
