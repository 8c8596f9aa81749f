//! Deadline queue for the view's delayed side effects.
//!
//! DESIGN
//! ======
//! Timers are plain data held by the view; the runtime sleeps until
//! [`Scheduler::next_deadline`] and then drains due entries. Scheduling
//! returns a [`TimerKey`] so the owner can cancel an entry when the state it
//! belongs to is replaced, instead of letting a stale timer fire.

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::feedback::ToastId;

/// Every delayed effect the view can schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    ToastFade(ToastId),
    ToastRemove(ToastId),
    /// Start fading the overlay alert of region `generation`.
    OverlayFade { generation: u64 },
    /// Remove the overlay alert of region `generation`.
    OverlayRemove { generation: u64 },
    /// Issue the chained computer move for region `generation`.
    ComputerMove { generation: u64 },
}

/// Cancellation handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerKey(u64);

#[derive(Debug, Default)]
pub struct Scheduler {
    entries: BTreeMap<TimerKey, (Instant, Timer)>,
    next_key: u64,
}

impl Scheduler {
    pub fn schedule_at(&mut self, timer: Timer, deadline: Instant) -> TimerKey {
        self.next_key += 1;
        let key = TimerKey(self.next_key);
        self.entries.insert(key, (deadline, timer));
        key
    }

    pub fn schedule_in(&mut self, timer: Timer, now: Instant, delay: Duration) -> TimerKey {
        self.schedule_at(timer, now + delay)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.entries.remove(&key).is_some()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return the earliest timer due at `now`; ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<Timer> {
        let key = self
            .entries
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .min_by_key(|(key, (deadline, _))| (*deadline, **key))
            .map(|(key, _)| *key)?;
        self.entries.remove(&key).map(|(_, timer)| timer)
    }

    #[must_use]
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Pending timers in scheduling order.
    #[must_use]
    pub fn pending(&self) -> Vec<Timer> {
        self.entries.values().map(|(_, timer)| *timer).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
