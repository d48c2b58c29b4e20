//! Single-handle timer ownership

use std::rc::Rc;
use std::time::Duration;

use super::{clamp_interval, Arm, Scheduler, TimerId};

/// Owns at most one scheduled callback.
///
/// Arming always cancels the current handle first, and dropping the slot
/// cancels whatever is still pending.
pub struct TimerSlot {
    scheduler: Rc<dyn Scheduler>,
    handle: Option<TimerId>,
}

impl TimerSlot {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            handle: None,
        }
    }

    /// Schedule a single callback after `delay`
    pub fn arm_once(&mut self, delay: Duration) -> TimerId {
        self.arm(Arm::Once(clamp_interval(delay)))
    }

    /// Schedule a callback every `period`
    pub fn arm_every(&mut self, period: Duration) -> TimerId {
        self.arm(Arm::Every(clamp_interval(period)))
    }

    fn arm(&mut self, arm: Arm) -> TimerId {
        self.disarm();
        let id = self.scheduler.arm(arm);
        self.handle = Some(id);
        id
    }

    /// Cancel the current handle. Safe to call any number of times.
    pub fn disarm(&mut self) {
        if let Some(id) = self.handle.take() {
            self.scheduler.disarm(id);
        }
    }

    /// Whether `id` is the handle this slot holds
    pub fn owns(&self, id: TimerId) -> bool {
        self.handle == Some(id)
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Scheduler that records every arm and disarm
    #[derive(Default)]
    pub(crate) struct SpyScheduler {
        next: RefCell<u64>,
        pub(crate) arms: RefCell<Vec<Arm>>,
        pub(crate) disarms: RefCell<Vec<TimerId>>,
        live: RefCell<HashSet<TimerId>>,
    }

    impl SpyScheduler {
        pub(crate) fn arm_count(&self) -> usize {
            self.arms.borrow().len()
        }

        pub(crate) fn disarm_count(&self) -> usize {
            self.disarms.borrow().len()
        }

        pub(crate) fn live(&self) -> usize {
            self.live.borrow().len()
        }
    }

    impl Scheduler for SpyScheduler {
        fn arm(&self, arm: Arm) -> TimerId {
            let mut next = self.next.borrow_mut();
            *next += 1;
            let id = TimerId(*next);
            self.arms.borrow_mut().push(arm);
            self.live.borrow_mut().insert(id);
            id
        }

        fn disarm(&self, id: TimerId) {
            self.disarms.borrow_mut().push(id);
            self.live.borrow_mut().remove(&id);
        }
    }

    #[test]
    fn test_rearm_cancels_previous() {
        let spy = Rc::new(SpyScheduler::default());
        let mut slot = TimerSlot::new(spy.clone());

        let first = slot.arm_once(Duration::from_millis(100));
        let second = slot.arm_every(Duration::from_millis(100));

        assert_ne!(first, second);
        assert!(slot.owns(second));
        assert!(!slot.owns(first));
        assert_eq!(spy.live(), 1);
        assert!(spy.arm_count() <= spy.disarm_count() + 1);
    }

    #[test]
    fn test_disarm_is_idempotent() {
        let spy = Rc::new(SpyScheduler::default());
        let mut slot = TimerSlot::new(spy.clone());

        slot.arm_once(Duration::from_secs(1));
        slot.disarm();
        slot.disarm();

        assert_eq!(spy.disarm_count(), 1);
        assert_eq!(spy.live(), 0);
        assert!(!slot.is_armed());
    }

    #[test]
    fn test_drop_releases_handle() {
        let spy = Rc::new(SpyScheduler::default());
        {
            let mut slot = TimerSlot::new(spy.clone());
            slot.arm_every(Duration::from_secs(1));
            assert_eq!(spy.live(), 1);
        }
        assert_eq!(spy.live(), 0);
    }

    #[test]
    fn test_zero_delay_is_clamped() {
        let spy = Rc::new(SpyScheduler::default());
        let mut slot = TimerSlot::new(spy.clone());
        slot.arm_once(Duration::ZERO);
        assert_eq!(spy.arms.borrow()[0], Arm::Once(crate::timer::MIN_INTERVAL));
    }
}
