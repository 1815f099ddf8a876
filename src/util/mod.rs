//! Shared utilities for the controller.
//!
//! Frame timing and the exponential smoothing / angle helpers used by the
//! integrators.

/// Per-frame delta-time clock.
pub mod frame_timing;
pub mod smoothing;
