// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Touch, keyboard and gyro driven third-person camera and locomotion
//! controller.
//!
//! Touchrig turns ambiguous multi-pointer input, held keys and
//! device-orientation readings into a stable follow-camera pose and an
//! entity velocity, once per frame. Scene construction and rendering stay
//! with the host behind the [`scene::SceneProvider`] trait.
//!
//! # Key entry points
//!
//! - [`controller::Controller`] - per-surface state, command execution and
//!   the per-frame [`tick`](controller::Controller::tick)
//! - [`input::InputEvent`] - platform-agnostic pointer/orientation events
//! - [`options::Options`] - runtime configuration (look, joystick, follow,
//!   locomotion, projection, sensor, key bindings)
//! - [`camera::Camera`] - the camera the controller drives
//!
//! # Architecture
//!
//! Events arrive between frames and only mutate state: the
//! [`input::InputProcessor`] arbitrates pointer ownership (one look
//! pointer, one joystick pointer) and emits [`controller::RigCommand`]s.
//! Each frame the controller runs exactly one camera pipeline, selected by
//! [`controller::CameraMode`]: either the exponential-smoothing follow
//! integrator with camera-relative locomotion, or the device-orientation
//! pipeline with screen-rotation compensation and a persistent recenter
//! offset.
//!
//! Hosts: a winit desktop viewer (feature `viewer`) and a browser host
//! that attaches to a DOM element (feature `web`).

pub mod camera;
pub mod controller;
pub mod error;
pub mod input;
pub mod locomotion;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use controller::{CameraMode, Controller, RigCommand};
pub use error::RigError;
pub use options::Options;
