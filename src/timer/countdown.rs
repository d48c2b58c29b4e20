//! Countdown timer

use std::rc::Rc;
use std::time::Duration;

use super::{Chime, Scheduler, Tick, TimerError, TimerId, TimerSlot, TimerStatus, Tone, Widget};
use crate::layout::SidebarHandle;

pub const DEFAULT_MINUTES: u32 = 5;
pub const DEFAULT_SECONDS: u32 = 0;

const TICK: Duration = Duration::from_secs(1);

/// Format seconds as `mm:ss`
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub struct Countdown {
    slot: TimerSlot,
    sidebar: SidebarHandle,
    chime: Box<dyn Chime>,
    minutes: u32,
    seconds: u32,
    /// Seconds left in the current session; `None` before the first start
    remaining: Option<u32>,
    sound: bool,
    status: TimerStatus,
}

impl Countdown {
    pub fn new(scheduler: Rc<dyn Scheduler>, sidebar: SidebarHandle, chime: Box<dyn Chime>) -> Self {
        Self {
            slot: TimerSlot::new(scheduler),
            sidebar,
            chime,
            minutes: DEFAULT_MINUTES,
            seconds: DEFAULT_SECONDS,
            remaining: None,
            sound: false,
            status: TimerStatus::Idle,
        }
    }

    pub fn configure(&mut self, minutes: u32, seconds: u32) -> Result<(), TimerError> {
        if self.status != TimerStatus::Idle {
            return Err(TimerError::transition("configure", self.status));
        }
        self.minutes = minutes;
        self.seconds = seconds;
        Ok(())
    }

    pub fn set_sound(&mut self, enabled: bool) {
        self.sound = enabled;
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Configured duration in seconds
    pub fn total_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// What the clock shows: the remaining time once started, otherwise
    /// the configured duration
    pub fn display_seconds(&self) -> u32 {
        self.remaining.unwrap_or_else(|| self.total_seconds())
    }

    pub fn display(&self) -> String {
        format_clock(self.display_seconds())
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        if !matches!(self.status, TimerStatus::Idle | TimerStatus::Done) {
            return Err(TimerError::transition("start", self.status));
        }
        let total = self.total_seconds();
        if total == 0 {
            return Err(TimerError::ZeroDuration);
        }
        self.remaining = Some(total);
        self.status = TimerStatus::Running;
        self.slot.arm_every(TICK);
        tracing::debug!("Countdown started from {}", format_clock(total));
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.status != TimerStatus::Running {
            return Err(TimerError::transition("pause", self.status));
        }
        self.slot.disarm();
        self.status = TimerStatus::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), TimerError> {
        if self.status != TimerStatus::Paused {
            return Err(TimerError::transition("resume", self.status));
        }
        self.status = TimerStatus::Running;
        self.slot.arm_every(TICK);
        Ok(())
    }

    /// Stop and forget the current session
    pub fn reset(&mut self) {
        self.slot.disarm();
        self.remaining = None;
        self.status = TimerStatus::Idle;
    }

    /// Copy the time on the clock back into the configuration
    pub fn promote_remaining(&mut self) -> Result<(), TimerError> {
        let stopped = matches!(self.status, TimerStatus::Paused | TimerStatus::Done);
        let Some(remaining) = self.remaining.filter(|_| stopped) else {
            return Err(TimerError::transition("keep the remaining time", self.status));
        };
        self.minutes = remaining / 60;
        self.seconds = remaining % 60;
        Ok(())
    }

    pub fn sidebar(&self) -> &SidebarHandle {
        &self.sidebar
    }
}

impl Widget for Countdown {
    fn status(&self) -> TimerStatus {
        self.status
    }

    fn on_tick(&mut self, id: TimerId) -> Tick {
        if self.status != TimerStatus::Running || !self.slot.owns(id) {
            return Tick::Ignored;
        }

        let left = self.remaining.unwrap_or(0);
        if left > 1 {
            self.remaining = Some(left - 1);
            return Tick::Advanced;
        }

        self.remaining = Some(0);
        self.slot.disarm();
        self.status = TimerStatus::Done;
        if self.sound {
            self.chime.play(Tone::ALARM);
        }
        tracing::debug!("Countdown finished");
        Tick::Finished
    }

    fn teardown(&mut self) {
        self.slot.disarm();
    }
}
