//! Cooperative timer queue.
//!
//! Timers live on a monotonic timeline measured from zero. Nothing fires on
//! its own: the owner moves time forward and pops due timers one by one, so a
//! handler can cancel or arm other timers before the next one is considered.

use std::time::Duration;

/// Handle to an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cadence {
    Once,
    Every(Duration),
}

#[derive(Debug, Clone)]
struct Entry<K> {
    id: TimerId,
    due: Duration,
    cadence: Cadence,
    task: K,
}

/// A set of one-shot and repeating timers carrying a task value `K`.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<K>>,
}

impl<K: Copy> Scheduler<K> {
    /// An empty scheduler at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Number of armed timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether `id` is still armed.
    #[must_use]
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Arm a timer that fires once, `delay` from now.
    pub fn once(&mut self, delay: Duration, task: K) -> TimerId {
        self.arm(delay, Cadence::Once, task)
    }

    /// Arm a timer that fires every `period`, first one period from now.
    ///
    /// A zero period is bumped to one millisecond so the queue always drains.
    pub fn every(&mut self, period: Duration, task: K) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.arm(period, Cadence::Every(period), task)
    }

    /// Disarm a timer. Returns false if it was not armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Disarm everything.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// Time moves to that timer's due point. Repeating timers are re-armed one
    /// period later; one-shot timers are removed.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, K)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let Entry { id, due, cadence, task } = self.entries[index].clone();
        self.now = self.now.max(due);

        match cadence {
            Cadence::Every(period) => self.entries[index].due = due + period,
            Cadence::Once => {
                self.entries.remove(index);
            }
        }

        Some((id, task))
    }

    /// Move time to `until` once every due timer has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn arm(&mut self, delay: Duration, cadence: Cadence, task: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            cadence,
            task,
        });
        id
    }
}

impl<K: Copy> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
