//! Audible cues

use std::io::Write;
use std::time::Duration;

/// A short sine beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub gain: f32,
}

impl Tone {
    /// Metronome beat
    pub const TICK: Tone = Tone {
        frequency_hz: 800.0,
        duration: Duration::from_millis(50),
        gain: 0.15,
    };

    /// Countdown finished
    pub const ALARM: Tone = Tone {
        frequency_hz: 880.0,
        duration: Duration::from_millis(300),
        gain: 0.2,
    };
}

/// Plays tones. Sound output is best effort and never fails the caller.
pub trait Chime {
    fn play(&mut self, tone: Tone);
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Chime for Silent {
    fn play(&mut self, _tone: Tone) {}
}

/// Rings the terminal bell
#[derive(Debug, Default, Clone, Copy)]
pub struct Bell;

impl Chime for Bell {
    fn play(&mut self, tone: Tone) {
        let mut out = std::io::stderr();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            tracing::debug!("Bell failed for {:?}: {}", tone, e);
        }
    }
}
