//! Timer engine for the site's timing widgets
//!
//! Every widget owns exactly one [`TimerSlot`]. The slot holds at most one
//! scheduled callback and always cancels the previous one before arming a
//! new one, so a widget can never have two ticks in flight. Ticks are
//! delivered back to the widget by whoever drives the [`Scheduler`], as a
//! [`TimerId`] the widget checks against its slot.

mod chime;
mod countdown;
pub mod driver;
mod metronome;
mod queue;
mod reader;
mod slot;

pub use chime::{Bell, Chime, Silent, Tone};
pub use countdown::{format_clock, Countdown, DEFAULT_MINUTES, DEFAULT_SECONDS};
pub use metronome::{Metronome, BPM_FALLBACK, DEFAULT_BPM};
pub use queue::TimerQueue;
pub use reader::{
    chunk_words, ReaderConfig, SpeedReader, CHUNK_FALLBACK, DEFAULT_CHUNK_SIZE, DEFAULT_WPM,
    WPM_FALLBACK,
};
pub use slot::TimerSlot;

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Shortest delay ever handed to a scheduler
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Handle of one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub(crate) u64);

/// What to schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    /// Fire once after the delay
    Once(Duration),
    /// Fire every period until disarmed
    Every(Duration),
}

/// Source of delayed callbacks.
///
/// Methods take `&self` because a scheduler is shared by every widget on a
/// page; implementations use interior mutability. Disarming an id that is
/// unknown or already fired is a no-op.
pub trait Scheduler {
    fn arm(&self, arm: Arm) -> TimerId;
    fn disarm(&self, id: TimerId);
}

/// Lifecycle of a widget session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Done,
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of delivering a tick to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not this widget's timer, or the widget is not running
    Ignored,
    Advanced,
    /// The session reached `Done` on this tick
    Finished,
}

/// Refused widget operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("cannot {action} while {status}")]
    InvalidTransition {
        action: &'static str,
        status: TimerStatus,
    },

    #[error("there is nothing to read")]
    EmptyPassage,

    #[error("duration must be greater than zero")]
    ZeroDuration,
}

impl TimerError {
    pub(crate) fn transition(action: &'static str, status: TimerStatus) -> Self {
        TimerError::InvalidTransition { action, status }
    }
}

/// A widget driven by timer ticks
pub trait Widget {
    fn status(&self) -> TimerStatus;

    /// Handle a fired timer
    fn on_tick(&mut self, id: TimerId) -> Tick;

    /// Release the timer; called when the widget goes away
    fn teardown(&mut self);
}

/// Raise a delay to [`MIN_INTERVAL`]
pub fn clamp_interval(delay: Duration) -> Duration {
    delay.max(MIN_INTERVAL)
}

/// Parse a numeric form field.
///
/// Empty, unparsable and zero input fall back to `fallback`. Negative
/// values become zero and are clamped later, when a timer is armed.
pub fn parse_number(input: &str, fallback: u32) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => {
            if v < 0.0 {
                0
            } else {
                v.round().min(u32::MAX as f64) as u32
            }
        }
        _ => fallback,
    }
}

/// Read an optional numeric field.
///
/// An absent field takes `default`; a present one goes through
/// [`parse_number`] with `fallback`.
pub fn parse_field(input: Option<&str>, default: u32, fallback: u32) -> u32 {
    input.map_or(default, |v| parse_number(v, fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("120", 60), 120);
        assert_eq!(parse_number(" 90 ", 60), 90);
        assert_eq!(parse_number("", 60), 60);
        assert_eq!(parse_number("abc", 60), 60);
        assert_eq!(parse_number("0", 60), 60);
        assert_eq!(parse_number("-5", 60), 0);
        assert_eq!(parse_number("2.6", 1), 3);
    }

    #[test]
    fn test_parse_field_fallbacks() {
        assert_eq!(parse_field(None, DEFAULT_BPM, BPM_FALLBACK), 200);
        assert_eq!(parse_field(Some("0"), DEFAULT_BPM, BPM_FALLBACK), 60);
        assert_eq!(parse_field(Some("abc"), DEFAULT_BPM, BPM_FALLBACK), 60);
        assert_eq!(parse_field(Some("90"), DEFAULT_BPM, BPM_FALLBACK), 90);

        assert_eq!(parse_field(None, DEFAULT_CHUNK_SIZE, CHUNK_FALLBACK), 3);
        assert_eq!(parse_field(Some("0"), DEFAULT_CHUNK_SIZE, CHUNK_FALLBACK), 1);
        assert_eq!(parse_field(Some("abc"), DEFAULT_CHUNK_SIZE, CHUNK_FALLBACK), 1);

        assert_eq!(parse_field(Some(""), DEFAULT_WPM, WPM_FALLBACK), 600);
    }

    #[test]
    fn test_clamp_interval() {
        assert_eq!(clamp_interval(Duration::ZERO), MIN_INTERVAL);
        assert_eq!(
            clamp_interval(Duration::from_secs(1)),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_error_display() {
        let err = TimerError::transition("configure", TimerStatus::Running);
        assert_eq!(err.to_string(), "cannot configure while running");
    }
}
