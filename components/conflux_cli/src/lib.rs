//! Conflux CLI Library
//!
//! Provides the Runtime command interpreter and supporting modules for the
//! `conflux` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod repl;
pub mod runtime;
pub mod scenario;

pub use cli::{Cli, Scenario};
pub use error::{CliError, CliResult};
pub use runtime::{ReportEntry, Runtime};
