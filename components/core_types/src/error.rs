//! Rejection reasons.
//!
//! The engine introduces exactly two error kinds. A task rejected by its
//! owner carries the caller-supplied reason, which the engine never
//! inspects. When every input of `any` rejects, the reasons are collected
//! into an aggregate, in input order.

use serde::Serialize;
use thiserror::Error;

/// A rejection delivered on a task's failure channel.
///
/// Reasons are opaque to the engine: `R` is whatever type the caller
/// rejects with. The engine only ever wraps reasons, it never constructs
/// or interprets them.
///
/// # Examples
///
/// ```
/// use core_types::TaskError;
///
/// let single: TaskError<&str> = TaskError::Rejected("timed out");
/// assert_eq!(single.to_string(), "task rejected: timed out");
///
/// let none_fulfilled: TaskError<&str> = TaskError::Aggregate(vec![
///     TaskError::Rejected("x"),
///     TaskError::Rejected("y"),
/// ]);
/// assert!(none_fulfilled.is_aggregate());
/// assert_eq!(none_fulfilled.to_string(), "all 2 tasks rejected");
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(untagged)]
pub enum TaskError<R> {
    /// The caller-supplied reason a single task rejected with.
    #[error("task rejected: {0}")]
    Rejected(R),
    /// Every task in an `any` invocation rejected; the reasons are kept in
    /// input order. A rejected combinator output nests unflattened.
    #[error("all {} tasks rejected", .0.len())]
    Aggregate(Vec<TaskError<R>>),
}

impl<R> TaskError<R> {
    /// Returns true for the all-rejected aggregate kind.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, TaskError::Aggregate(_))
    }

    /// The caller-supplied reason, if this is a single rejection.
    pub fn reason(&self) -> Option<&R> {
        match self {
            TaskError::Rejected(reason) => Some(reason),
            TaskError::Aggregate(_) => None,
        }
    }
}
