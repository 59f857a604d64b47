//! Task identity and settlement state.

use std::fmt;

/// Unique identity of a task.
///
/// Ids are allocated monotonically by the scheduler that created the task
/// and are never reused within one scheduler.
///
/// # Examples
///
/// ```
/// use core_types::TaskId;
///
/// let id = TaskId::new(7);
/// assert_eq!(id.raw(), 7);
/// assert_eq!(id.to_string(), "task-7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a TaskId from its raw counter value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// The settlement state of a task.
///
/// A task transitions state at most once: `Pending -> Fulfilled` or
/// `Pending -> Rejected`. Once settled, a task cannot change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleState {
    /// The initial state; the task is neither fulfilled nor rejected.
    Pending,
    /// The task completed with a value.
    Fulfilled,
    /// The task failed with a reason.
    Rejected,
}

impl SettleState {
    /// Returns true once the task has left the Pending state.
    pub fn is_settled(self) -> bool {
        !matches!(self, SettleState::Pending)
    }

    /// The lowercase name of the state, as used in settlement reports.
    pub fn as_str(self) -> &'static str {
        match self {
            SettleState::Pending => "pending",
            SettleState::Fulfilled => "fulfilled",
            SettleState::Rejected => "rejected",
        }
    }
}
