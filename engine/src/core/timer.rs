//! Cancellable one-shot timers polled from the owner's tick.
//!
//! A [`TimerQueue`] never spawns threads or sleeps. Entries are due at an
//! absolute clock reading and are handed back by [`TimerQueue::drain_due`]
//! when the owner polls it, so callbacks always run on the owner's execution
//! context.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use flyby_engine::core::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let id = timers.schedule_once(Duration::from_secs(5), "done");
//! assert!(timers.drain_due(Duration::from_secs(4)).is_empty());
//! assert_eq!(timers.drain_due(Duration::from_secs(5)), vec!["done"]);
//! assert!(!timers.cancel(id));
//! ```

use std::time::Duration;

/// Handle to a scheduled timer.
///
/// Ids are never reused, so a stale handle cannot cancel a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// Queue of pending one-shot timers carrying an event payload.
#[derive(Debug)]
pub struct TimerQueue<E> {
    entries: Vec<Entry<E>>,
    next_id: u64,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `event` to become due at the absolute clock reading `due`.
    pub fn schedule_once(&mut self, due: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due, event });
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest due time among pending timers.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Remove and return every event due at or before `now`, earliest first.
    /// Timers due at the same instant fire in scheduling order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<E> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].due <= now {
                due.push(self.entries.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|entry| (entry.due, entry.id));
        due.into_iter().map(|entry| entry.event).collect()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
