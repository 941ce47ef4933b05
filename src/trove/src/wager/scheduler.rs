//! Deferred flip resolution

use super::PendingFlip;
use std::collections::VecDeque;
use std::time::Duration;

/// Receives a pending flip and arranges for it to be resolved after `delay`.
///
/// Whoever holds the [`PendingFlip`] is the only party able to settle it, so
/// the scheduler's completion callback is the single resolution path.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, flip: PendingFlip);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay: Duration, flip: PendingFlip) {
        (**self).schedule(delay, flip)
    }
}

/// FIFO scheduler that fires only when asked. Used by tests and the CLI in
/// place of real timers.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: VecDeque<(Duration, PendingFlip)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Delay requested for the oldest queued flip
    pub fn next_delay(&self) -> Option<Duration> {
        self.queue.front().map(|(delay, _)| *delay)
    }

    /// Pop the oldest flip as if its timer had elapsed
    pub fn fire(&mut self) -> Option<PendingFlip> {
        self.queue.pop_front().map(|(_, flip)| flip)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, flip: PendingFlip) {
        self.queue.push_back((delay, flip));
    }
}
