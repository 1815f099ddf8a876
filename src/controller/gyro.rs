//! Gyro permission outcome and the "are events arriving" diagnostic.

use std::fmt;

use web_time::{Duration, Instant};

use crate::input::OrientationSample;

/// Outcome of the host's platform permission flow for orientation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorPermission {
    /// The user granted access.
    Granted,
    /// The platform has no permission gate; events flow once listened for.
    NotRequired,
    /// The user or platform refused.
    Denied,
    /// No sensor, or no permission API where one is needed.
    Unavailable,
}

/// Advisory sensor state shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorStatus {
    /// Gyro control is off.
    #[default]
    Idle,
    /// Listening; the diagnostic window has not elapsed yet.
    Waiting,
    /// Events are arriving.
    Receiving,
    /// The window elapsed without a single event.
    NoEvents,
    /// The permission request was refused.
    PermissionDenied,
    /// The platform cannot provide orientation events.
    Unavailable,
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "gyro off",
            Self::Waiting => "gyro: waiting for events",
            Self::Receiving => "gyro: receiving",
            Self::NoEvents => {
                "gyro: no events (needs HTTPS and motion access)"
            }
            Self::PermissionDenied => "gyro: permission denied",
            Self::Unavailable => "gyro: sensor unavailable",
        };
        f.write_str(s)
    }
}

/// Counts orientation events and decides, once the diagnostic window has
/// elapsed, whether the sensor is delivering.
///
/// The verdict reads the counter as it is when [`poll`](Self::poll) first
/// sees the window elapsed, never a copy taken when the window started.
/// It is advisory only: nothing is torn down when events fail to arrive,
/// and a late first event still flips the status to `Receiving`.
#[derive(Debug, Clone)]
pub struct SensorDiagnostics {
    window: Duration,
    started: Option<Instant>,
    events: u64,
    status: SensorStatus,
    last_sample: Option<OrientationSample>,
}

impl SensorDiagnostics {
    /// Idle diagnostics with the given window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            started: None,
            events: 0,
            status: SensorStatus::Idle,
            last_sample: None,
        }
    }

    /// Change the window; takes effect from the next [`start`](Self::start).
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Reset the counter and open a new window at `now`.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.events = 0;
        self.last_sample = None;
        self.status = SensorStatus::Waiting;
    }

    /// Stop listening.
    pub fn stop(&mut self) {
        self.started = None;
        self.status = SensorStatus::Idle;
    }

    /// Record a failed permission flow.
    pub fn fail(&mut self, status: SensorStatus) {
        self.started = None;
        self.status = status;
    }

    /// Count one orientation event.
    pub fn record(&mut self, sample: OrientationSample) {
        self.events = self.events.saturating_add(1);
        self.last_sample = Some(sample);
        if self.status == SensorStatus::NoEvents {
            log::info!("orientation events started arriving late");
            self.status = SensorStatus::Receiving;
        }
    }

    /// Settle the verdict if the window has elapsed by `now`. Returns the
    /// new status when it changed.
    pub fn poll(&mut self, now: Instant) -> Option<SensorStatus> {
        if self.status != SensorStatus::Waiting {
            return None;
        }
        let started = self.started?;
        if now.saturating_duration_since(started) < self.window {
            return None;
        }
        self.status = if self.events > 0 {
            SensorStatus::Receiving
        } else {
            log::warn!(
                "no orientation events within {} ms",
                self.window.as_millis()
            );
            SensorStatus::NoEvents
        };
        Some(self.status)
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SensorStatus {
        self.status
    }

    /// Events counted since the last [`start`](Self::start).
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.events
    }

    /// Most recent sample.
    #[must_use]
    pub fn last_sample(&self) -> Option<OrientationSample> {
        self.last_sample
    }

    /// One-line HUD text: the status plus the latest angles while events
    /// are flowing.
    #[must_use]
    pub fn status_text(&self) -> String {
        match (self.status, self.last_sample) {
            (SensorStatus::Waiting | SensorStatus::Receiving, Some(s)) => {
                let (a, b, g) = s.degrees();
                format!(
                    "{} | α {a:.0}° β {b:.0}° γ {g:.0}° ({} events)",
                    self.status, self.events
                )
            }
            (status, _) => status.to_string(),
        }
    }
}
