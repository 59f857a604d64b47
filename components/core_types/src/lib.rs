//! Shared vocabulary types for the Conflux task engine.
//!
//! This crate defines the types every other component speaks in:
//! - [`TaskId`] - unique identity of a task
//! - [`SettleState`] - the write-once `Pending -> Fulfilled | Rejected` state
//! - [`TaskError`] - the rejection channel (a single reason or an aggregate)
//! - [`Outcome`] - the per-task settlement record produced by `all_settled`
//!
//! # Examples
//!
//! ```
//! use core_types::{Outcome, SettleState, TaskError};
//!
//! let outcome: Outcome<i32, String> = Outcome::Fulfilled { value: 42 };
//! assert_eq!(outcome.status(), "fulfilled");
//!
//! let reason: TaskError<String> = TaskError::Rejected("boom".to_string());
//! assert!(!reason.is_aggregate());
//!
//! assert!(!SettleState::Pending.is_settled());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod outcome;
pub mod state;

// Re-export main types at crate root
pub use error::TaskError;
pub use outcome::Outcome;
pub use state::{SettleState, TaskId};
