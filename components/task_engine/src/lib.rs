//! Deterministic single-threaded task engine.
//!
//! This crate provides the engine underneath Conflux:
//! - [`Scheduler`] - cooperative scheduler with a ready queue and a
//!   virtual-clock timer queue
//! - [`TaskHandle`] / [`Completer`] - write-once deferred tasks with
//!   scheduled (never synchronous) continuation delivery
//! - Combinators - [`Scheduler::all`], [`Scheduler::all_settled`],
//!   [`Scheduler::race`], [`Scheduler::any`]
//!
//! # Overview
//!
//! Everything runs on one logical thread. A task body may schedule timer
//! work to model waiting on an external event; the scheduler advances its
//! virtual clock between deadlines, so runs are deterministic and
//! immediate regardless of the delays involved. Continuations for one
//! task fire in registration order; work scheduled for the same instant
//! fires in scheduling order.
//!
//! # Examples
//!
//! ```
//! use task_engine::Scheduler;
//!
//! let scheduler = Scheduler::new();
//! let tasks = vec![
//!     scheduler.settle_after::<&str, &str>(2000, Ok("a")),
//!     scheduler.settle_after::<&str, &str>(1000, Ok("b")),
//!     scheduler.settle_after::<&str, &str>(3000, Ok("c")),
//! ];
//!
//! let winner = scheduler.race(&tasks);
//! let joined = scheduler.all(&tasks);
//! scheduler.run_until_idle();
//!
//! assert_eq!(winner.value(), Some("b"));
//! assert_eq!(joined.value(), Some(vec!["a", "b", "c"]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod combinators;
pub mod scheduler;
pub mod task;
pub mod work_queue;

// Re-export main types at crate root
pub use scheduler::Scheduler;
pub use task::{Completer, Step, TaskHandle};
pub use work_queue::{TimerQueue, Work, WorkQueue};
