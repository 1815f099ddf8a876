//! Browser host: binds a [`Controller`] to a DOM element.
//!
//! [`WebRig::attach`] installs the pointer listeners on the surface
//! element, keyboard / orientation / blur listeners on the window, a
//! screen-orientation change listener, and a `requestAnimationFrame` loop.
//! [`WebRig::detach`] (or dropping the rig) removes all of them.
//!
//! Pointers pressed on the joystick element bind the joystick role;
//! pointers pressed on anything carrying a `data-hud` attribute never
//! bind. Everything else on the surface is the look area. A bound pointer
//! is captured by the element it went down on. While the joystick is held
//! the document stops scrolling and rubber-banding.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, CssStyleDeclaration, DeviceOrientationEvent,
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, Node,
    OrientationLockType, PointerEvent, ScreenOrientation, Window,
};
use web_time::Instant;

use crate::controller::{Controller, SensorPermission};
use crate::error::RigError;
use crate::input::{
    InputEvent, InputResponse, OrientationSample, PointerId, SurfaceRegion,
};
use crate::options::Options;
use crate::scene::SceneProvider;
use crate::util::frame_timing::FrameClock;

/// Route `log` to the browser console and panics to `console.error`.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// State shared by every listener and the frame loop.
struct Shared<S> {
    controller: Controller,
    scene: S,
    clock: FrameClock,
}

type SharedRef<S> = Rc<RefCell<Shared<S>>>;
type ScrollLockRef = Rc<RefCell<ScrollLock>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// One installed DOM listener, kept so it can be removed again.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn remove(&self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

fn listen(
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, RigError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(
            kind,
            closure.as_ref().unchecked_ref(),
        )
        .map_err(|e| RigError::Platform(format!("{kind} listener: {e:?}")))?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}

/// Like [`listen`], but the handler may call `preventDefault`.
fn listen_active(
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, RigError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| RigError::Platform(format!("{kind} listener: {e:?}")))?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}

/// Document-wide scroll suppression, held while the joystick is dragged.
///
/// `touch-action` on the widgets alone does not stop iOS from scrolling
/// or rubber-banding the page, so the lock also turns off body overscroll
/// and swallows document `touchmove`.
struct ScrollLock {
    document: Option<Document>,
    /// Body `overscroll-behavior` and root `touch-action` to restore.
    saved: Option<(String, String)>,
    listener: Option<Listener>,
}

impl ScrollLock {
    fn new(document: Option<Document>) -> Self {
        Self {
            document,
            saved: None,
            listener: None,
        }
    }

    fn set(&mut self, active: bool) {
        if active == self.saved.is_some() {
            return;
        }
        if active {
            self.engage();
        } else {
            self.release();
        }
    }

    fn root_style(document: &Document) -> Option<CssStyleDeclaration> {
        let root = document.document_element()?;
        Some(root.dyn_into::<HtmlElement>().ok()?.style())
    }

    fn engage(&mut self) {
        let Some(document) = &self.document else {
            return;
        };
        let body = document.body().map(|b| b.style());
        let root = Self::root_style(document);
        let read = |style: Option<&CssStyleDeclaration>, name: &str| {
            style
                .and_then(|s| s.get_property_value(name).ok())
                .unwrap_or_default()
        };
        self.saved = Some((
            read(body.as_ref(), "overscroll-behavior"),
            read(root.as_ref(), "touch-action"),
        ));
        if let Some(style) = &body {
            let _ = style.set_property("overscroll-behavior", "none");
        }
        if let Some(style) = &root {
            let _ = style.set_property("touch-action", "none");
        }
        match listen_active(document, "touchmove", |event| {
            event.prevent_default();
        }) {
            Ok(listener) => self.listener = Some(listener),
            Err(e) => log::warn!("scroll lock: {e}"),
        }
        log::trace!("scroll lock engaged");
    }

    fn release(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.remove();
        }
        let (Some(document), Some((overscroll, touch_action))) =
            (&self.document, self.saved.take())
        else {
            return;
        };
        if let Some(body) = document.body() {
            let _ = body
                .style()
                .set_property("overscroll-behavior", &overscroll);
        }
        if let Some(style) = Self::root_style(document) {
            let _ = style.set_property("touch-action", &touch_action);
        }
        log::trace!("scroll lock released");
    }
}

/// Hold the scroll lock exactly while the joystick is active.
fn sync_scroll_lock<S>(lock: &ScrollLockRef, shared: &SharedRef<S>) {
    let active = shared.borrow().controller.joystick().is_active();
    lock.borrow_mut().set(active);
}

fn global_window() -> Result<Window, RigError> {
    web_sys::window()
        .ok_or_else(|| RigError::Platform("no global window".into()))
}

/// Raw pointer id and client position of a pointer event.
fn pointer_data(event: &Event) -> Option<(i32, Vec2)> {
    let p = event.dyn_ref::<PointerEvent>()?;
    Some((
        p.pointer_id(),
        Vec2::new(p.client_x() as f32, p.client_y() as f32),
    ))
}

/// Which region of the surface the event's target belongs to.
fn region_of(event: &Event, joystick: &Element) -> SurfaceRegion {
    let Some(target) =
        event.target().and_then(|t| t.dyn_into::<Element>().ok())
    else {
        return SurfaceRegion::Viewport;
    };
    let node: &Node = &target;
    if joystick.contains(Some(node)) {
        SurfaceRegion::Joystick
    } else if matches!(target.closest("[data-hud]"), Ok(Some(_))) {
        SurfaceRegion::Hud
    } else {
        SurfaceRegion::Viewport
    }
}

/// Run the platform permission flow for orientation events.
///
/// Platforms that gate the sensor expose
/// `DeviceOrientationEvent.requestPermission()`; everywhere else events
/// flow without asking. Once orientation is granted, motion access is
/// requested too; its answer does not affect the result.
pub async fn request_sensor_permission() -> SensorPermission {
    let Some(window) = web_sys::window() else {
        return SensorPermission::Unavailable;
    };
    let permission =
        request_permission_of(&window, "DeviceOrientationEvent").await;
    if permission == SensorPermission::Granted {
        let motion = request_permission_of(&window, "DeviceMotionEvent").await;
        log::debug!("motion permission: {motion:?}");
    }
    permission
}

/// Call `<interface>.requestPermission()` if the platform has it.
async fn request_permission_of(
    window: &Window,
    interface: &str,
) -> SensorPermission {
    let ctor = match js_sys::Reflect::get(window, &JsValue::from_str(interface))
    {
        Ok(v) if !v.is_undefined() => v,
        _ => return SensorPermission::Unavailable,
    };
    let Ok(request) =
        js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission"))
    else {
        return SensorPermission::NotRequired;
    };
    let Some(request) = request.dyn_ref::<js_sys::Function>() else {
        return SensorPermission::NotRequired;
    };
    let promise = match request.call0(&ctor) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("{interface}.requestPermission threw: {e:?}");
            return SensorPermission::Denied;
        }
    };
    let Ok(promise) = promise.dyn_into::<js_sys::Promise>() else {
        return SensorPermission::Denied;
    };
    match JsFuture::from(promise).await {
        Ok(state) if state.as_string().as_deref() == Some("granted") => {
            SensorPermission::Granted
        }
        Ok(_) => SensorPermission::Denied,
        Err(e) => {
            log::warn!("{interface}.requestPermission rejected: {e:?}");
            SensorPermission::Denied
        }
    }
}

/// Try to pin the screen to landscape. Most browsers refuse outside
/// fullscreen; refusal is logged and otherwise ignored.
async fn lock_landscape() {
    let Some(screen) = web_sys::window().and_then(|w| w.screen().ok()) else {
        return;
    };
    match screen.orientation().lock(OrientationLockType::Landscape) {
        Ok(promise) => {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("landscape lock refused: {e:?}");
            }
        }
        Err(e) => log::debug!("landscape lock unsupported: {e:?}"),
    }
}

/// Ask for sensor access off the event handler and report the outcome to
/// the controller.
fn spawn_gyro_request<S: SceneProvider + 'static>(shared: SharedRef<S>) {
    wasm_bindgen_futures::spawn_local(async move {
        let permission = request_sensor_permission().await;
        let result = shared
            .borrow_mut()
            .controller
            .enable_gyro(permission, Instant::now());
        match result {
            Ok(()) => lock_landscape().await,
            Err(e) => log::warn!("{e}"),
        }
    });
}

/// Apply the controller's verdict to the DOM event.
fn finish<S: SceneProvider + 'static>(
    shared: &SharedRef<S>,
    event: &Event,
    response: InputResponse,
) {
    match response {
        InputResponse::Ignored => {}
        InputResponse::Handled | InputResponse::Captured(_) => {
            event.prevent_default();
        }
        InputResponse::RequestSensorPermission => {
            event.prevent_default();
            spawn_gyro_request(Rc::clone(shared));
        }
    }
}

fn screen_angle(orientation: &ScreenOrientation) -> f32 {
    orientation.angle().map_or(0.0, f32::from)
}

/// A controller attached to a DOM surface.
pub struct WebRig<S: SceneProvider + 'static> {
    shared: SharedRef<S>,
    scroll_lock: ScrollLockRef,
    listeners: Vec<Listener>,
    frame: FrameCallback,
    frame_handle: Rc<Cell<Option<i32>>>,
}

impl<S: SceneProvider + 'static> WebRig<S> {
    /// Install every listener and start the frame loop.
    ///
    /// `joystick` is the joystick widget; it should sit inside `surface`.
    ///
    /// # Errors
    ///
    /// [`RigError::Platform`] if there is no window or a listener cannot be
    /// installed. Listeners installed before the failure are removed.
    pub fn attach(
        surface: &HtmlElement,
        joystick: &HtmlElement,
        scene: S,
        options: Options,
    ) -> Result<Self, RigError> {
        let window = global_window()?;
        let _ = surface.style().set_property("touch-action", "none");
        let _ = joystick.style().set_property("touch-action", "none");

        let mut rig = Self {
            shared: Rc::new(RefCell::new(Shared {
                controller: Controller::new(options),
                scene,
                clock: FrameClock::new(),
            })),
            scroll_lock: Rc::new(RefCell::new(ScrollLock::new(
                window.document(),
            ))),
            listeners: Vec::new(),
            frame: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(Cell::new(None)),
        };

        {
            let mut guard = rig.shared.borrow_mut();
            let Shared {
                controller, scene, ..
            } = &mut *guard;
            let width = surface.client_width().max(0) as u32;
            let height = surface.client_height().max(0) as u32;
            controller.resize(scene, width, height);
        }

        if let Err(e) = rig.install(&window, surface, joystick) {
            rig.detach();
            return Err(e);
        }
        rig.start_frames(&window)?;
        log::info!("touchrig attached");
        Ok(rig)
    }

    fn install(
        &mut self,
        window: &Window,
        surface: &HtmlElement,
        joystick: &HtmlElement,
    ) -> Result<(), RigError> {
        self.install_pointer_listeners(surface, joystick)?;
        self.install_window_listeners(window)?;
        self.install_screen_listener(window)
    }

    fn install_pointer_listeners(
        &mut self,
        surface: &HtmlElement,
        joystick: &HtmlElement,
    ) -> Result<(), RigError> {
        {
            let shared = Rc::clone(&self.shared);
            let lock = Rc::clone(&self.scroll_lock);
            let surface_el: Element = surface.clone().into();
            let joystick_el: Element = joystick.clone().into();
            self.listeners.push(listen(surface, "pointerdown", move |event| {
                let Some((raw, position)) = pointer_data(&event) else {
                    return;
                };
                let region = region_of(&event, &joystick_el);
                let response = shared.borrow_mut().controller.handle_event(
                    InputEvent::PointerDown {
                        pointer: PointerId(i64::from(raw)),
                        position,
                        region,
                    },
                );
                if let InputResponse::Captured(role) = response {
                    let origin = match role.capture_region() {
                        SurfaceRegion::Joystick => &joystick_el,
                        SurfaceRegion::Viewport | SurfaceRegion::Hud => {
                            &surface_el
                        }
                    };
                    let _ = origin.set_pointer_capture(raw);
                }
                sync_scroll_lock(&lock, &shared);
                finish(&shared, &event, response);
            })?);
        }
        {
            let shared = Rc::clone(&self.shared);
            self.listeners.push(listen(surface, "pointermove", move |event| {
                let Some((raw, position)) = pointer_data(&event) else {
                    return;
                };
                let response = shared.borrow_mut().controller.handle_event(
                    InputEvent::PointerMove {
                        pointer: PointerId(i64::from(raw)),
                        position,
                    },
                );
                finish(&shared, &event, response);
            })?);
        }
        for (kind, cancel) in [("pointerup", false), ("pointercancel", true)] {
            let shared = Rc::clone(&self.shared);
            let lock = Rc::clone(&self.scroll_lock);
            self.listeners.push(listen(surface, kind, move |event| {
                let Some((raw, _)) = pointer_data(&event) else {
                    return;
                };
                let pointer = PointerId(i64::from(raw));
                let input = if cancel {
                    InputEvent::PointerCancel { pointer }
                } else {
                    InputEvent::PointerUp { pointer }
                };
                let response =
                    shared.borrow_mut().controller.handle_event(input);
                sync_scroll_lock(&lock, &shared);
                finish(&shared, &event, response);
            })?);
        }
        {
            // An uncaptured joystick pointer leaving the widget ends the drag.
            let shared = Rc::clone(&self.shared);
            let lock = Rc::clone(&self.scroll_lock);
            let widget: Element = joystick.clone().into();
            self.listeners.push(listen(joystick, "pointerleave", move |event| {
                let Some((raw, _)) = pointer_data(&event) else {
                    return;
                };
                let pointer = PointerId(i64::from(raw));
                let captured = widget.has_pointer_capture(raw);
                {
                    let mut guard = shared.borrow_mut();
                    let role =
                        guard.controller.input().arbiter().role_of(pointer);
                    if role.is_some_and(|r| r.ends_on_joystick_leave(captured))
                    {
                        let cancel = InputEvent::PointerCancel { pointer };
                        let _ = guard.controller.handle_event(cancel);
                    }
                }
                sync_scroll_lock(&lock, &shared);
            })?);
        }
        Ok(())
    }

    fn install_window_listeners(
        &mut self,
        window: &Window,
    ) -> Result<(), RigError> {
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let shared = Rc::clone(&self.shared);
            self.listeners.push(listen(window, kind, move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let response = shared.borrow_mut().controller.handle_key(
                    &key.code(),
                    pressed,
                    key.repeat(),
                );
                finish(&shared, &event, response);
            })?);
        }
        // Android Chrome reports compass-referenced readings on the
        // absolute variant.
        for kind in ["deviceorientation", "deviceorientationabsolute"] {
            let shared = Rc::clone(&self.shared);
            self.listeners.push(listen(
                window,
                kind,
                move |event| {
                    let Some(o) = event.dyn_ref::<DeviceOrientationEvent>()
                    else {
                        return;
                    };
                    let sample = OrientationSample {
                        alpha: o.alpha().map(|v| v as f32),
                        beta: o.beta().map(|v| v as f32),
                        gamma: o.gamma().map(|v| v as f32),
                    };
                    let _ = shared
                        .borrow_mut()
                        .controller
                        .handle_event(InputEvent::Orientation(sample));
                },
            )?);
        }
        {
            let shared = Rc::clone(&self.shared);
            let lock = Rc::clone(&self.scroll_lock);
            self.listeners.push(listen(window, "blur", move |_| {
                shared.borrow_mut().controller.release_input();
                sync_scroll_lock(&lock, &shared);
            })?);
        }
        Ok(())
    }

    fn install_screen_listener(
        &mut self,
        window: &Window,
    ) -> Result<(), RigError> {
        let Ok(screen) = window.screen() else {
            log::debug!("no screen object; rotation compensation stays at 0°");
            return Ok(());
        };
        let orientation = screen.orientation();
        let _ = self.shared.borrow_mut().controller.handle_event(
            InputEvent::ScreenRotation {
                degrees: screen_angle(&orientation),
            },
        );

        let shared = Rc::clone(&self.shared);
        let source = orientation.clone();
        self.listeners.push(listen(&orientation, "change", move |_| {
            let _ = shared.borrow_mut().controller.handle_event(
                InputEvent::ScreenRotation {
                    degrees: screen_angle(&source),
                },
            );
        })?);
        Ok(())
    }

    fn start_frames(&mut self, window: &Window) -> Result<(), RigError> {
        let shared = Rc::clone(&self.shared);
        let next = Rc::clone(&self.frame);
        let handle = Rc::clone(&self.frame_handle);
        let win = window.clone();
        *self.frame.borrow_mut() =
            Some(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
                {
                    let mut guard = shared.borrow_mut();
                    let Shared {
                        controller,
                        scene,
                        clock,
                    } = &mut *guard;
                    let dt = clock.tick();
                    controller.tick(dt, scene);
                }
                if let Some(cb) = next.borrow().as_ref() {
                    handle.set(
                        win.request_animation_frame(cb.as_ref().unchecked_ref())
                            .ok(),
                    );
                }
            }));

        let first = self
            .frame
            .borrow()
            .as_ref()
            .map(|cb| {
                window.request_animation_frame(cb.as_ref().unchecked_ref())
            });
        match first {
            Some(Ok(id)) => {
                self.frame_handle.set(Some(id));
                Ok(())
            }
            Some(Err(e)) => {
                self.detach();
                Err(RigError::Platform(format!(
                    "requestAnimationFrame: {e:?}"
                )))
            }
            None => Ok(()),
        }
    }

    /// Stop the frame loop and remove every listener. Safe to call twice.
    pub fn detach(&mut self) {
        if let Some(id) = self.frame_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        let _ = self.frame.borrow_mut().take();
        let had_listeners = !self.listeners.is_empty();
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.controller.release_input();
        }
        if let Ok(mut lock) = self.scroll_lock.try_borrow_mut() {
            lock.release();
        }
        if had_listeners {
            log::info!("touchrig detached");
        }
    }

    /// Run the permission flow and switch to gyro control on success, then
    /// try to lock the screen to landscape.
    ///
    /// Call from a user-gesture handler (tap, click): platforms that gate
    /// the sensor only show their prompt inside one.
    ///
    /// # Errors
    ///
    /// See [`Controller::enable_gyro`].
    pub async fn enable_gyro(&self) -> Result<(), RigError> {
        let permission = request_sensor_permission().await;
        self.shared
            .borrow_mut()
            .controller
            .enable_gyro(permission, Instant::now())?;
        lock_landscape().await;
        Ok(())
    }

    /// Run `f` against the controller (HUD text, recenter, options).
    pub fn with_controller<R>(
        &self,
        f: impl FnOnce(&mut Controller) -> R,
    ) -> R {
        f(&mut self.shared.borrow_mut().controller)
    }

    /// Run `f` against the scene.
    pub fn with_scene<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.shared.borrow_mut().scene)
    }
}

impl<S: SceneProvider + 'static> Drop for WebRig<S> {
    fn drop(&mut self) {
        self.detach();
    }
}
