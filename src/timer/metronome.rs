//! Metronome: a steady beat at a fixed tempo

use std::rc::Rc;
use std::time::Duration;

use super::{Chime, Scheduler, Tick, TimerError, TimerId, TimerSlot, TimerStatus, Tone, Widget};
use crate::layout::SidebarHandle;

pub const DEFAULT_BPM: u32 = 200;
/// Used when the bpm field is given but zero or not a number
pub const BPM_FALLBACK: u32 = 60;

pub struct Metronome {
    slot: TimerSlot,
    sidebar: SidebarHandle,
    chime: Box<dyn Chime>,
    bpm: u32,
    sound: bool,
    beat: u64,
    status: TimerStatus,
}

impl Metronome {
    pub fn new(scheduler: Rc<dyn Scheduler>, sidebar: SidebarHandle, chime: Box<dyn Chime>) -> Self {
        Self {
            slot: TimerSlot::new(scheduler),
            sidebar,
            chime,
            bpm: DEFAULT_BPM,
            sound: false,
            beat: 0,
            status: TimerStatus::Idle,
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Beats since the last start
    pub fn beat(&self) -> u64 {
        self.beat
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound
    }

    /// Tempo can only change while stopped
    pub fn set_bpm(&mut self, bpm: u32) -> Result<(), TimerError> {
        if self.status != TimerStatus::Idle {
            return Err(TimerError::transition("change tempo", self.status));
        }
        self.bpm = bpm;
        Ok(())
    }

    /// Sound can be toggled at any time; it applies from the next beat
    pub fn set_sound(&mut self, enabled: bool) {
        self.sound = enabled;
    }

    /// Time between beats, `60000 / bpm` ms rounded
    pub fn interval(&self) -> Duration {
        let bpm = self.bpm.max(1) as f64;
        Duration::from_millis((60_000.0 / bpm).round() as u64)
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.status != TimerStatus::Idle {
            return Err(TimerError::transition("start", self.status));
        }
        self.beat = 0;
        self.status = TimerStatus::Running;
        self.slot.arm_every(self.interval());
        tracing::debug!("Metronome started at {} bpm", self.bpm);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.slot.disarm();
        self.beat = 0;
        self.status = TimerStatus::Idle;
    }

    /// Start when stopped, stop when running
    pub fn toggle(&mut self) -> Result<(), TimerError> {
        match self.status {
            TimerStatus::Idle => self.start(),
            _ => {
                self.stop();
                Ok(())
            }
        }
    }

    pub fn sidebar(&self) -> &SidebarHandle {
        &self.sidebar
    }
}

impl Widget for Metronome {
    fn status(&self) -> TimerStatus {
        self.status
    }

    fn on_tick(&mut self, id: TimerId) -> Tick {
        if self.status != TimerStatus::Running || !self.slot.owns(id) {
            return Tick::Ignored;
        }
        self.beat += 1;
        if self.sound {
            self.chime.play(Tone::TICK);
        }
        Tick::Advanced
    }

    fn teardown(&mut self) {
        self.slot.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::slot::tests::SpyScheduler;
    use crate::timer::{Silent, TimerQueue};
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Tone>>>);

    impl Chime for Recorder {
        fn play(&mut self, tone: Tone) {
            self.0.borrow_mut().push(tone);
        }
    }

    #[test]
    fn test_interval_from_bpm() {
        let queue = Rc::new(TimerQueue::new());
        let mut metronome = Metronome::new(queue, SidebarHandle::default(), Box::new(Silent));
        assert_eq!(metronome.interval(), Duration::from_millis(300));

        metronome.set_bpm(90).unwrap();
        assert_eq!(metronome.interval(), Duration::from_millis(667));

        metronome.set_bpm(0).unwrap();
        assert_eq!(metronome.interval(), Duration::from_millis(60_000));
    }

    #[test]
    fn test_beats_and_sound() {
        let queue = Rc::new(TimerQueue::new());
        let recorder = Recorder::default();
        let mut metronome = Metronome::new(
            queue.clone(),
            SidebarHandle::default(),
            Box::new(recorder.clone()),
        );
        metronome.set_bpm(120).unwrap();
        metronome.start().unwrap();

        queue.advance(Duration::from_millis(1000), &mut metronome);
        assert_eq!(metronome.beat(), 2);
        assert!(recorder.0.borrow().is_empty());

        metronome.set_sound(true);
        queue.advance(Duration::from_millis(1500), &mut metronome);
        assert_eq!(metronome.beat(), 5);
        assert_eq!(*recorder.0.borrow(), vec![Tone::TICK; 3]);
    }

    #[test]
    fn test_tempo_locked_while_running() {
        let queue = Rc::new(TimerQueue::new());
        let mut metronome = Metronome::new(queue, SidebarHandle::default(), Box::new(Silent));
        metronome.start().unwrap();
        assert!(metronome.set_bpm(60).is_err());
        assert_eq!(metronome.bpm(), DEFAULT_BPM);
    }

    #[test]
    fn test_toggle_stops_and_resets() {
        let queue = Rc::new(TimerQueue::new());
        let mut metronome = Metronome::new(
            queue.clone(),
            SidebarHandle::default(),
            Box::new(Silent),
        );
        metronome.toggle().unwrap();
        queue.advance(Duration::from_millis(900), &mut metronome);
        assert_eq!(metronome.beat(), 3);

        metronome.toggle().unwrap();
        assert_eq!(metronome.status(), TimerStatus::Idle);
        assert_eq!(metronome.beat(), 0);
        assert_eq!(queue.live(), 0);
    }

    #[test]
    fn test_double_start_keeps_one_timer() {
        let spy = Rc::new(SpyScheduler::default());
        let mut metronome =
            Metronome::new(spy.clone(), SidebarHandle::default(), Box::new(Silent));
        metronome.start().unwrap();
        assert!(metronome.start().is_err());
        assert_eq!(spy.live(), 1);
        assert!(spy.arm_count() <= spy.disarm_count() + 1);

        metronome.stop();
        metronome.start().unwrap();
        assert_eq!(spy.live(), 1);
        assert!(spy.arm_count() <= spy.disarm_count() + 1);
    }
}
