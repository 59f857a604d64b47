//! Command-line argument definitions

use clap::{Parser, ValueEnum};

/// Conflux task engine CLI
#[derive(Debug, Parser)]
#[command(
    name = "conflux",
    version,
    about = "Run task combinator demonstrations, scripts and an interactive shell"
)]
pub struct Cli {
    /// Execute a task script file
    #[arg(long)]
    pub file: Option<String>,

    /// Evaluate a single command, then run the scheduler
    #[arg(long)]
    pub eval: Option<String>,

    /// Start the interactive shell
    #[arg(long)]
    pub repl: bool,

    /// Run a built-in demonstration
    #[arg(long, value_enum)]
    pub scenario: Option<Scenario>,

    /// Emit the settlement report as JSON after the run
    #[arg(long)]
    pub json: bool,
}

/// The built-in demonstrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Join delayed tasks in input order; a rejection short-circuits
    All,
    /// Record every outcome, success or failure, and never reject
    AllSettled,
    /// The chronologically first settlement wins
    Race,
    /// The first fulfillment wins; all-rejected produces an aggregate
    Any,
    /// Sequential chaining with recovery at the end of the chain
    Chain,
    /// Await-style sequencing over concurrently running tasks
    Sequence,
}
