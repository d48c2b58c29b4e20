//! Virtual-clock timer queue

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use super::{Arm, Scheduler, Tick, TimerId, Widget};

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    repeat: Option<Duration>,
}

#[derive(Debug, Default)]
struct QueueState {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerId, Pending>,
}

/// A cooperative scheduler keyed on a virtual clock.
///
/// Nothing fires on its own: the owner advances the clock, either in
/// tests or from a real-time loop (see [`super::driver`]), and hands each
/// fired id to the widget. Timers due at the same instant fire in the
/// order they were armed.
#[derive(Debug, Default)]
pub struct TimerQueue {
    state: RefCell<QueueState>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of armed timers
    pub fn live(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// When the next timer is due, if any
    pub fn next_due(&self) -> Option<Duration> {
        self.state.borrow().pending.values().map(|p| p.due).min()
    }

    /// Fire the earliest timer due at or before `until`.
    ///
    /// Moves the clock to its due time. Repeating timers are rescheduled,
    /// one-shot timers are removed.
    pub fn fire_next(&self, until: Duration) -> Option<TimerId> {
        let mut state = self.state.borrow_mut();
        let (id, pending) = state
            .pending
            .iter()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(id, p)| (p.due, **id))
            .map(|(id, p)| (*id, *p))?;

        state.now = state.now.max(pending.due);
        match pending.repeat {
            Some(period) => {
                if let Some(entry) = state.pending.get_mut(&id) {
                    entry.due = pending.due + period;
                }
            }
            None => {
                state.pending.remove(&id);
            }
        }
        Some(id)
    }

    /// Advance the clock by `by`, delivering every timer that falls due to
    /// `widget` in order. Returns the outcome of each delivery.
    pub fn advance<W: Widget + ?Sized>(&self, by: Duration, widget: &mut W) -> Vec<Tick> {
        let until = self.now() + by;
        let mut ticks = Vec::new();
        while let Some(id) = self.fire_next(until) {
            ticks.push(widget.on_tick(id));
        }
        self.state.borrow_mut().now = until;
        ticks
    }
}

impl Scheduler for TimerQueue {
    fn arm(&self, arm: Arm) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let pending = match arm {
            Arm::Once(delay) => Pending {
                due: state.now + delay,
                repeat: None,
            },
            Arm::Every(period) => Pending {
                due: state.now + period,
                repeat: Some(period),
            },
        };
        state.pending.insert(id, pending);
        tracing::trace!("Armed {:?} due at {:?}", id, pending.due);
        id
    }

    fn disarm(&self, id: TimerId) {
        if self.state.borrow_mut().pending.remove(&id).is_some() {
            tracing::trace!("Disarmed {:?}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_fires_once() {
        let queue = TimerQueue::new();
        let id = queue.arm(Arm::Once(Duration::from_millis(500)));

        assert_eq!(queue.fire_next(Duration::from_millis(499)), None);
        assert_eq!(queue.fire_next(Duration::from_millis(500)), Some(id));
        assert_eq!(queue.now(), Duration::from_millis(500));
        assert_eq!(queue.fire_next(Duration::from_secs(10)), None);
        assert_eq!(queue.live(), 0);
    }

    #[test]
    fn test_every_reschedules() {
        let queue = TimerQueue::new();
        let id = queue.arm(Arm::Every(Duration::from_millis(300)));

        let until = Duration::from_millis(1000);
        let mut fired = Vec::new();
        while let Some(f) = queue.fire_next(until) {
            fired.push((f, queue.now().as_millis()));
        }
        assert_eq!(fired, vec![(id, 300), (id, 600), (id, 900)]);
        assert_eq!(queue.next_due(), Some(Duration::from_millis(1200)));
    }

    #[test]
    fn test_ties_fire_in_arm_order() {
        let queue = TimerQueue::new();
        let a = queue.arm(Arm::Once(Duration::from_millis(100)));
        let b = queue.arm(Arm::Once(Duration::from_millis(100)));
        let until = Duration::from_millis(100);
        assert_eq!(queue.fire_next(until), Some(a));
        assert_eq!(queue.fire_next(until), Some(b));
    }

    #[test]
    fn test_disarm_unknown_is_noop() {
        let queue = TimerQueue::new();
        let id = queue.arm(Arm::Once(Duration::from_millis(1)));
        queue.disarm(id);
        queue.disarm(id);
        assert_eq!(queue.live(), 0);
        assert_eq!(queue.next_due(), None);
    }
}
