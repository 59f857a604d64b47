//! Deferred-work and timer queue management.
//!
//! This module provides the two queues the scheduler runs on. Continuations
//! go on the FIFO work queue; time-delayed work goes on the timer queue,
//! keyed by virtual deadline.

use std::collections::BTreeMap;
use std::collections::VecDeque;

/// A unit of deferred work.
///
/// Work items are continuations and timer bodies: they run later, exactly
/// once, on the scheduler's single logical thread.
pub struct Work {
    callback: Box<dyn FnOnce()>,
}

impl Work {
    /// Creates a new Work item from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Executes the work item, consuming it.
    pub fn run(self) {
        (self.callback)()
    }
}

impl std::fmt::Debug for Work {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Work {{ ... }}")
    }
}

/// A FIFO queue of deferred work.
///
/// The scheduler drains this queue completely after each timer firing, so
/// continuations run before virtual time advances again.
#[derive(Debug, Default)]
pub struct WorkQueue {
    queue: VecDeque<Work>,
}

impl WorkQueue {
    /// Creates a new empty WorkQueue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds a work item to the end of the queue.
    pub fn enqueue(&mut self, work: Work) {
        self.queue.push_back(work);
    }

    /// Removes and returns the next work item from the queue.
    pub fn dequeue(&mut self) -> Option<Work> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued work items.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Work scheduled for a future virtual instant.
///
/// Entries are ordered by `(deadline, sequence)`: the sequence number is a
/// monotonic counter, so two items due at the same instant fire in the
/// order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<TimerKey, Work>,
    sequence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimerKey {
    deadline: u64,
    sequence: u64,
}

impl TimerQueue {
    /// Creates a new empty TimerQueue.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            sequence: 0,
        }
    }

    /// Schedules a work item for the given virtual deadline.
    pub fn schedule(&mut self, deadline: u64, work: Work) {
        let key = TimerKey {
            deadline,
            sequence: self.sequence,
        };
        self.sequence += 1;
        self.entries.insert(key, work);
    }

    /// The earliest deadline with scheduled work, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|key| key.deadline)
    }

    /// Removes and returns the next due work item and its deadline.
    pub fn pop_next(&mut self) -> Option<(u64, Work)> {
        self.entries
            .pop_first()
            .map(|(key, work)| (key.deadline, work))
    }

    /// Returns true if no work is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of scheduled work items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
