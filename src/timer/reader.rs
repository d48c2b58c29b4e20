//! Speed reader: reveals a passage a few words at a time

use std::rc::Rc;
use std::time::Duration;

use super::{Scheduler, Tick, TimerError, TimerId, TimerSlot, TimerStatus, Widget};
use crate::layout::SidebarHandle;

pub const DEFAULT_WPM: u32 = 600;
pub const DEFAULT_CHUNK_SIZE: u32 = 3;
/// Used when a field is given but zero or not a number
pub const WPM_FALLBACK: u32 = 600;
pub const CHUNK_FALLBACK: u32 = 1;

/// Reading pace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Words per minute
    pub wpm: u32,
    /// Words shown together
    pub chunk_size: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ReaderConfig {
    /// How long each chunk stays on screen: `chunk_size / wpm` minutes
    pub fn chunk_duration(&self) -> Duration {
        let wpm = self.wpm.max(1) as f64;
        let size = self.chunk_size.max(1) as f64;
        Duration::from_millis((size * 60_000.0 / wpm).round() as u64)
    }
}

/// Group the words of `text` into chunks of `size` words.
/// The last chunk may be shorter.
pub fn chunk_words(text: &str, size: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    let size = size.clamp(1, words.len());
    words.chunks(size).map(|c| c.join(" ")).collect()
}

/// Paced reveal of a passage, one chunk per timer tick
pub struct SpeedReader {
    slot: TimerSlot,
    sidebar: SidebarHandle,
    config: ReaderConfig,
    passage: String,
    chunks: Vec<String>,
    index: usize,
    status: TimerStatus,
}

impl SpeedReader {
    pub fn new(scheduler: Rc<dyn Scheduler>, sidebar: SidebarHandle) -> Self {
        Self {
            slot: TimerSlot::new(scheduler),
            sidebar,
            config: ReaderConfig::default(),
            passage: String::new(),
            chunks: Vec::new(),
            index: 0,
            status: TimerStatus::Idle,
        }
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn passage(&self) -> &str {
        &self.passage
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Index of the chunk on screen; equals the chunk count once done
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn configure(&mut self, config: ReaderConfig) -> Result<(), TimerError> {
        self.ensure_idle("configure")?;
        self.config = config;
        Ok(())
    }

    pub fn set_passage(&mut self, text: &str) -> Result<(), TimerError> {
        self.ensure_idle("edit the passage")?;
        self.passage = text.to_string();
        Ok(())
    }

    fn ensure_idle(&self, action: &'static str) -> Result<(), TimerError> {
        if self.status != TimerStatus::Idle {
            return Err(TimerError::transition(action, self.status));
        }
        Ok(())
    }

    /// Split the passage into chunks and start revealing them
    pub fn start(&mut self) -> Result<(), TimerError> {
        if !matches!(self.status, TimerStatus::Idle | TimerStatus::Done) {
            return Err(TimerError::transition("start", self.status));
        }
        let chunks = chunk_words(&self.passage, self.config.chunk_size as usize);
        if chunks.is_empty() {
            return Err(TimerError::EmptyPassage);
        }

        tracing::debug!(
            "Reading {} chunks at {} wpm",
            chunks.len(),
            self.config.wpm
        );
        self.chunks = chunks;
        self.index = 0;
        self.status = TimerStatus::Running;
        self.slot.arm_once(self.config.chunk_duration());
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

    /// Continue from the current chunk, which gets a full display period
    pub fn resume(&mut self) -> Result<(), TimerError> {
        if self.status != TimerStatus::Paused {
            return Err(TimerError::transition("resume", self.status));
        }
        self.status = TimerStatus::Running;
        self.slot.arm_once(self.config.chunk_duration());
        Ok(())
    }

    /// Stop reading and discard progress
    pub fn stop(&mut self) {
        self.slot.disarm();
        self.chunks.clear();
        self.index = 0;
        self.status = TimerStatus::Idle;
    }

    /// The chunk on screen; the last chunk stays visible once done
    pub fn current_chunk(&self) -> Option<&str> {
        let last = self.chunks.len().checked_sub(1)?;
        self.chunks.get(self.index.min(last)).map(String::as_str)
    }

    /// `(position, total)` with a 1-based position
    pub fn progress(&self) -> Option<(usize, usize)> {
        if self.chunks.is_empty() {
            return None;
        }
        let total = self.chunks.len();
        Some(((self.index + 1).min(total), total))
    }

    pub fn progress_label(&self) -> Option<String> {
        let (position, total) = self.progress()?;
        let done = if self.status == TimerStatus::Done {
            " (done)"
        } else {
            ""
        };
        Some(format!("Chunk {} of {}{}", position, total, done))
    }

    pub fn sidebar(&self) -> &SidebarHandle {
        &self.sidebar
    }
}

impl Widget for SpeedReader {
    fn status(&self) -> TimerStatus {
        self.status
    }

    fn on_tick(&mut self, id: TimerId) -> Tick {
        if self.status != TimerStatus::Running || !self.slot.owns(id) {
            return Tick::Ignored;
        }

        self.index += 1;
        if self.index >= self.chunks.len() {
            self.slot.disarm();
            self.status = TimerStatus::Done;
            return Tick::Finished;
        }

        self.slot.arm_once(self.config.chunk_duration());
        Tick::Advanced
    }

    fn teardown(&mut self) {
        self.slot.disarm();
    }
}
