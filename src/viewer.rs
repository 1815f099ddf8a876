//! Standalone desktop host backed by winit.
//!
//! Mouse and touch are mapped to pointer events (the mouse is
//! [`PointerId::MOUSE`]), the bottom-left square of the window acts as
//! the joystick region, and the title bar doubles as the HUD. The scene is
//! headless: each frame updates a [`CameraUniform`] that a renderer would
//! upload.
//!
//! ```no_run
//! # use touchrig::viewer::Viewer;
//! Viewer::builder()
//!     .with_title("touchrig")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use glam::{Vec2, Vec3};
use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    camera::{Camera, CameraUniform},
    controller::{Controller, SensorPermission},
    error::RigError,
    input::{InputEvent, InputResponse, PointerId, SurfaceRegion},
    options::Options,
    scene::SceneProvider,
    util::frame_timing::FrameClock,
};

/// Side of the joystick square in physical pixels.
pub const JOYSTICK_SIZE: f32 = 160.0;
/// Gap between the joystick square and the window's bottom-left corner.
pub const JOYSTICK_INSET: f32 = 16.0;

/// How often the title-bar HUD is rewritten.
const HUD_INTERVAL: Duration = Duration::from_millis(250);

/// Region under `position` in a window `height` pixels tall.
#[must_use]
pub fn region_at(position: Vec2, height: f32) -> SurfaceRegion {
    let left = JOYSTICK_INSET;
    let bottom = height - JOYSTICK_INSET;
    let in_x = position.x >= left && position.x <= left + JOYSTICK_SIZE;
    let in_y = position.y <= bottom && position.y >= bottom - JOYSTICK_SIZE;
    if in_x && in_y {
        SurfaceRegion::Joystick
    } else {
        SurfaceRegion::Viewport
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with default title and options.
    fn new() -> Self {
        Self {
            options: None,
            title: "touchrig".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A desktop window driving one [`Controller`].
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`RigError::Platform`] if the event loop cannot be created or fails.
    pub fn run(self) -> Result<(), RigError> {
        let event_loop =
            EventLoop::new().map_err(|e| RigError::Platform(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            scene: HeadlessScene::new(Camera::new(
                &self.options.projection,
                1.0,
            )),
            controller: Controller::new(self.options),
            clock: FrameClock::new(),
            cursor: Vec2::ZERO,
            title: self.title,
            last_hud: Instant::now(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| RigError::Platform(e.to_string()))
    }
}

// ── Scene ────────────────────────────────────────────────────────────────

/// Camera plus entity placement, no geometry.
struct HeadlessScene {
    camera: Camera,
    uniform: CameraUniform,
    entity: Vec3,
    facing_yaw: f32,
}

impl HeadlessScene {
    fn new(camera: Camera) -> Self {
        Self {
            camera,
            uniform: CameraUniform::new(),
            entity: Vec3::ZERO,
            facing_yaw: 0.0,
        }
    }
}

impl SceneProvider for HeadlessScene {
    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn place_entity(&mut self, position: Vec3, facing_yaw: f32) {
        self.entity = position;
        self.facing_yaw = facing_yaw;
    }

    fn render(&mut self) {
        self.uniform.update_view_proj(&self.camera);
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    scene: HeadlessScene,
    controller: Controller,
    clock: FrameClock,
    cursor: Vec2,
    title: String,
    last_hud: Instant,
}

impl ViewerApp {
    fn window_height(&self) -> f32 {
        self.controller.viewport().1 as f32
    }

    fn dispatch(&mut self, event: InputEvent) {
        let response = self.controller.handle_event(event);
        self.respond(response);
    }

    fn respond(&mut self, response: InputResponse) {
        if response == InputResponse::RequestSensorPermission {
            // Desktop windows have no orientation sensor.
            if let Err(e) = self
                .controller
                .enable_gyro(SensorPermission::Unavailable, Instant::now())
            {
                log::warn!("{e}");
            }
        }
    }

    fn handle_touch(&mut self, touch: Touch) {
        let pointer = PointerId(touch.id as i64);
        let position =
            Vec2::new(touch.location.x as f32, touch.location.y as f32);
        let event = match touch.phase {
            TouchPhase::Started => InputEvent::PointerDown {
                pointer,
                position,
                region: region_at(position, self.window_height()),
            },
            TouchPhase::Moved => InputEvent::PointerMove { pointer, position },
            TouchPhase::Ended => InputEvent::PointerUp { pointer },
            TouchPhase::Cancelled => InputEvent::PointerCancel { pointer },
        };
        self.dispatch(event);
    }

    fn update_hud(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_hud) < HUD_INTERVAL {
            return;
        }
        self.last_hud = now;
        let Some(window) = &self.window else {
            return;
        };
        let motion = self.controller.motion();
        let knob = self
            .controller
            .joystick()
            .knob()
            .map_or_else(String::new, |k| {
                format!(" | stick ({:.0}, {:.0})", k.x, k.y)
            });
        window.set_title(&format!(
            "{} | {} | pos ({:.1}, {:.1}) speed {:.1} heading {:.0}°{} | {:.0} fps",
            self.title,
            self.controller.status_text(),
            motion.position.x,
            motion.position.z,
            motion.speed(),
            self.scene.facing_yaw.to_degrees(),
            knob,
            self.clock.fps(),
        ));
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(960, 640));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        self.controller
            .resize(&mut self.scene, inner.width, inner.height);
        self.clock = FrameClock::new();
        log::info!("viewer attached ({}x{})", inner.width, inner.height);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.controller.release_input();
                log::info!("viewer detached");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.controller
                    .resize(&mut self.scene, size.width, size.height);
            }

            WindowEvent::Focused(false) => self.controller.release_input(),

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self.clock.tick_at(now);
                self.controller.tick(dt, &mut self.scene);
                self.update_hud(now);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.dispatch(InputEvent::PointerMove {
                    pointer: PointerId::MOUSE,
                    position: self.cursor,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                self.dispatch(InputEvent::PointerCancel {
                    pointer: PointerId::MOUSE,
                });
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let event = match state {
                    ElementState::Pressed => InputEvent::PointerDown {
                        pointer: PointerId::MOUSE,
                        position: self.cursor,
                        region: region_at(self.cursor, self.window_height()),
                    },
                    ElementState::Released => InputEvent::PointerUp {
                        pointer: PointerId::MOUSE,
                    },
                };
                self.dispatch(event);
            }

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key_str = format!("{code:?}");
                    let response = self.controller.handle_key(
                        &key_str,
                        event.state == ElementState::Pressed,
                        event.repeat,
                    );
                    self.respond(response);
                }
            }

            _ => (),
        }
    }
}
