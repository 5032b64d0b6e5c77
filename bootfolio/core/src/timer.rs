//! Virtual-Time Timer Queue
//!
//! Delays in the core are never slept. They are entries in this queue,
//! keyed by deadline on a virtual clock that only moves when the owner calls
//! [`TimerQueue::pop_due`] or [`TimerQueue::advance_to`].
//!
//! Timers fire in deadline order; equal deadlines fire in scheduling order.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for cancelling a scheduled timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deadline-ordered queue of pending payloads
#[derive(Debug)]
pub struct TimerQueue<T> {
    /// Current virtual time
    now: Duration,
    /// Sequence for ids and tie-breaking
    next_seq: u64,
    /// (deadline, seq) → payload
    pending: BTreeMap<(Duration, u64), T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `after` from now
    pub fn schedule(&mut self, after: Duration, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((self.now + after, seq), payload);
        TimerId(seq)
    }

    /// Cancel a pending timer, returning its payload if it had not fired
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let key = self.pending.keys().find(|(_, seq)| *seq == id.0).copied()?;
        self.pending.remove(&key)
    }

    /// Remove and return the earliest timer due at or before `horizon`
    ///
    /// The clock moves to that timer's deadline, so timers scheduled while
    /// handling it are relative to when it fired.
    pub fn pop_due(&mut self, horizon: Duration) -> Option<T> {
        let (&(deadline, _), _) = self.pending.first_key_value()?;
        if deadline > horizon {
            return None;
        }
        let ((deadline, _), payload) = self.pending.pop_first()?;
        self.now = self.now.max(deadline);
        Some(payload)
    }

    /// Move the clock forward to `time` (never backwards)
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Fire everything due within `delta` and move the clock past it
    ///
    /// Suitable when handlers never schedule follow-up timers; otherwise
    /// drive [`TimerQueue::pop_due`] directly.
    pub fn advance(&mut self, delta: Duration) -> Vec<T> {
        let horizon = self.now + delta;
        let mut fired = Vec::new();
        while let Some(payload) = self.pop_due(horizon) {
            fired.push(payload);
        }
        self.advance_to(horizon);
        fired
    }

    /// Time until the next timer fires
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .keys()
            .next()
            .map(|(deadline, _)| deadline.saturating_sub(self.now))
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending timers
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
