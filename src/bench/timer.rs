//! Operation timer
//!
//! A per-instance stopwatch with an explicit three-state lifecycle.
//! Invalid transitions are logged and ignored.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::warn;

/// Diagnostic for `start` while already running
pub const CANNOT_START: &str = "The timer cannot be started";

/// Diagnostic for `stop` while not running
pub const CANNOT_STOP: &str = "The timer cannot be stopped";

/// Diagnostic for `report` before a full start/stop cycle
pub const NOT_MEASURED: &str = "The timer was not started and stopped properly";

/// Timer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    NotStarted,
    Started,
    Stopped,
}

/// Reporting unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => f.write_str("seconds"),
            TimeUnit::Milliseconds => f.write_str("milliseconds"),
        }
    }
}

/// Stopwatch for one measured operation at a time
#[derive(Debug, Clone, Default)]
pub struct Timer {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
    state: TimerState,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing. Allowed from NotStarted and Stopped.
    ///
    /// Returns `false` if the timer was already running.
    pub fn start(&mut self) -> bool {
        if self.state == TimerState::Started {
            warn!("{}", CANNOT_START);
            return false;
        }
        self.started_at = Some(Instant::now());
        self.state = TimerState::Started;
        true
    }

    /// Stop timing. Only allowed from Started.
    ///
    /// Returns `false` if the timer was not running.
    pub fn stop(&mut self) -> bool {
        if self.state != TimerState::Started {
            warn!("{}", CANNOT_STOP);
            return false;
        }
        self.stopped_at = Some(Instant::now());
        self.state = TimerState::Stopped;
        true
    }

    /// Back to NotStarted
    pub fn reset(&mut self) {
        self.state = TimerState::NotStarted;
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Measured duration, available only after a completed cycle
    pub fn elapsed(&self) -> Option<Duration> {
        if self.state != TimerState::Stopped {
            return None;
        }
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(stop)) => Some(stop.saturating_duration_since(start)),
            _ => None,
        }
    }

    /// Human-readable result line for `operation`, or the diagnostic if
    /// nothing has been measured
    pub fn report(&self, operation: &str, unit: TimeUnit) -> String {
        let Some(elapsed) = self.elapsed() else {
            return NOT_MEASURED.to_string();
        };

        match unit {
            TimeUnit::Seconds => format!(
                "The operation {} was executed in {} {}",
                operation,
                elapsed.as_secs_f64(),
                unit
            ),
            TimeUnit::Milliseconds => format!(
                "The operation {} was executed in {} {}",
                operation,
                elapsed.as_millis(),
                unit
            ),
        }
    }
}
