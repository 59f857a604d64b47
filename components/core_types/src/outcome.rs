//! Per-task settlement records.

use crate::TaskError;
use serde::Serialize;

/// How one task settled.
///
/// `all_settled` fulfills with one record per input task, in input order.
/// Records serialize with a `status` tag, so a report reads
/// `{"status":"fulfilled","value":...}` or
/// `{"status":"rejected","reason":...}`.
///
/// # Examples
///
/// ```
/// use core_types::{Outcome, TaskError};
///
/// let ok: Outcome<&str, &str> = Outcome::Fulfilled { value: "data" };
/// assert!(ok.is_fulfilled());
/// assert_eq!(ok.value(), Some(&"data"));
///
/// let failed: Outcome<&str, &str> = Outcome::Rejected {
///     reason: TaskError::Rejected("no route"),
/// };
/// assert_eq!(failed.status(), "rejected");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T, R> {
    /// The task fulfilled with a value.
    Fulfilled {
        /// The resolved value.
        value: T,
    },
    /// The task rejected with a reason.
    Rejected {
        /// The rejection delivered on the failure channel.
        reason: TaskError<R>,
    },
}

impl<T, R> Outcome<T, R> {
    /// The lowercase status tag, `"fulfilled"` or `"rejected"`.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Fulfilled { .. } => "fulfilled",
            Outcome::Rejected { .. } => "rejected",
        }
    }

    /// Returns true if the task fulfilled.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled { .. })
    }

    /// The resolved value, if fulfilled.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Fulfilled { value } => Some(value),
            Outcome::Rejected { .. } => None,
        }
    }

    /// The rejection, if rejected.
    pub fn reason(&self) -> Option<&TaskError<R>> {
        match self {
            Outcome::Fulfilled { .. } => None,
            Outcome::Rejected { reason } => Some(reason),
        }
    }
}
