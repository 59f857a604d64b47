//! The command interpreter behind scripts, `--eval` and the shell.
//!
//! A `Runtime` owns one scheduler and a registry of named tasks with
//! string payloads. Combinator outputs are bound under a name like any
//! other task; `all` and `settled` outputs carry their sequence results as
//! a JSON rendering so every registry entry stays a string task.

use crate::error::{CliError, CliResult};
use core_types::Outcome;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Debug;
use task_engine::{Scheduler, Step, TaskHandle};

/// A named task in the registry. Payloads and reasons are plain strings.
pub type NamedTask = TaskHandle<String, String>;

/// One row of the settlement report.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    /// The task's registry name.
    pub name: String,
    /// `pending`, `fulfilled` or `rejected`.
    pub status: String,
    /// The resolved value, when fulfilled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// The rejection, rendered, when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Command interpreter over a scheduler and a named-task registry.
pub struct Runtime {
    scheduler: Scheduler,
    tasks: HashMap<String, NamedTask>,
    order: Vec<String>,
}

impl Runtime {
    /// Creates a runtime with a fresh scheduler and an empty registry.
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
            tasks: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// The scheduler this runtime drives.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Executes one command line.
    ///
    /// Blank lines and `#` comments are ignored. Returns optional feedback
    /// text for the caller to print.
    pub fn execute_line(&mut self, line: &str) -> CliResult<Option<String>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens[0] {
            "task" => self.cmd_task(&tokens),
            "all" | "settled" | "race" | "any" => self.cmd_combine(&tokens),
            "watch" => self.cmd_watch(&tokens),
            "state" => {
                let name = Self::arg(&tokens, 1, "state needs a task name")?;
                self.lookup(name)?;
                Ok(Some(self.describe(name)))
            }
            "list" => {
                let described: Vec<String> =
                    self.order.iter().map(|name| self.describe(name)).collect();
                Ok(Some(described.join("\n")))
            }
            "run" => {
                self.scheduler.run_until_idle();
                Ok(Some(format!("idle at t={}", self.scheduler.now())))
            }
            other => Err(CliError::Parse(format!("unknown command '{other}'"))),
        }
    }

    /// Executes a whole script, printing feedback lines as it goes.
    pub fn execute_script(&mut self, source: &str) -> CliResult<()> {
        for (number, line) in source.lines().enumerate() {
            match self.execute_line(line) {
                Ok(Some(feedback)) => println!("{feedback}"),
                Ok(None) => {}
                Err(err) => {
                    return Err(CliError::Script {
                        line: number + 1,
                        message: err.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Reads and executes a script file.
    pub fn execute_file(&mut self, path: &str) -> CliResult<()> {
        let source = std::fs::read_to_string(path)?;
        self.execute_script(&source)
    }

    /// Runs the scheduler until both of its queues are empty.
    pub fn run(&self) {
        self.scheduler.run_until_idle();
    }

    /// The settlement report: one entry per named task, in definition
    /// order.
    pub fn report(&self) -> Vec<ReportEntry> {
        self.order
            .iter()
            .filter_map(|name| {
                self.tasks.get(name).map(|task| match task.outcome() {
                    None => ReportEntry {
                        name: name.clone(),
                        status: "pending".to_string(),
                        value: None,
                        reason: None,
                    },
                    Some(Outcome::Fulfilled { value }) => ReportEntry {
                        name: name.clone(),
                        status: "fulfilled".to_string(),
                        value: Some(value),
                        reason: None,
                    },
                    Some(Outcome::Rejected { reason }) => ReportEntry {
                        name: name.clone(),
                        status: "rejected".to_string(),
                        value: None,
                        reason: Some(reason.to_string()),
                    },
                })
            })
            .collect()
    }

    /// The settlement report rendered as pretty JSON.
    pub fn report_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }

    /// One human-readable line per named task, in definition order.
    pub fn describe_all(&self) -> Vec<String> {
        self.order.iter().map(|name| self.describe(name)).collect()
    }

    fn cmd_task(&mut self, tokens: &[&str]) -> CliResult<Option<String>> {
        let name = Self::arg(tokens, 1, "task needs a name")?;
        if self.tasks.contains_key(name) {
            return Err(CliError::DuplicateTask(name.to_string()));
        }
        let task = match tokens.get(2).copied() {
            Some("resolve") => self.scheduler.fulfilled(Self::rest(tokens, 3)),
            Some("reject") => self.scheduler.rejected(Self::rest(tokens, 3)),
            Some("after") => {
                let raw_delay = Self::arg(tokens, 3, "after needs a delay")?;
                let delay: u64 = raw_delay
                    .parse()
                    .map_err(|_| CliError::Parse(format!("bad delay '{raw_delay}'")))?;
                match tokens.get(4).copied() {
                    Some("resolve") => self
                        .scheduler
                        .settle_after(delay, Ok(Self::rest(tokens, 5))),
                    Some("reject") => self
                        .scheduler
                        .settle_after(delay, Err(Self::rest(tokens, 5))),
                    _ => {
                        return Err(CliError::Parse(
                            "expected 'resolve' or 'reject' after the delay".to_string(),
                        ))
                    }
                }
            }
            _ => {
                return Err(CliError::Parse(
                    "expected 'resolve', 'reject' or 'after'".to_string(),
                ))
            }
        };
        self.insert(name, task);
        Ok(Some(self.describe(name)))
    }

    fn cmd_combine(&mut self, tokens: &[&str]) -> CliResult<Option<String>> {
        let kind = tokens[0];
        let out = Self::arg(tokens, 1, "combinator needs an output name")?;
        if self.tasks.contains_key(out) {
            return Err(CliError::DuplicateTask(out.to_string()));
        }
        let inputs: Vec<NamedTask> = tokens[2..]
            .iter()
            .map(|name| self.lookup(name).cloned())
            .collect::<CliResult<_>>()?;

        let task = match kind {
            "all" => self
                .scheduler
                .all(&inputs)
                .then(|values| Step::Done(render_json(&values))),
            "settled" => self
                .scheduler
                .all_settled(&inputs)
                .then(|records| Step::Done(render_json(&records))),
            "race" => self.scheduler.race(&inputs),
            "any" => self.scheduler.any(&inputs),
            other => return Err(CliError::Parse(format!("unknown combinator '{other}'"))),
        };
        self.insert(out, task);
        Ok(Some(format!("{out}: {} over {} tasks", kind, inputs.len())))
    }

    fn cmd_watch(&mut self, tokens: &[&str]) -> CliResult<Option<String>> {
        let name = Self::arg(tokens, 1, "watch needs a task name")?;
        let task = self.lookup(name)?;
        let on_value = name.to_string();
        let on_reason = name.to_string();
        task.on_settle(
            move |value| println!("{on_value} fulfilled: {value}"),
            move |reason| println!("{on_reason} rejected: {reason}"),
        );
        Ok(None)
    }

    fn describe(&self, name: &str) -> String {
        match self.tasks.get(name).and_then(|task| task.outcome()) {
            None => format!("{name}: pending"),
            Some(Outcome::Fulfilled { value }) => format!("{name}: fulfilled {value:?}"),
            Some(Outcome::Rejected { reason }) => format!("{name}: rejected ({reason})"),
        }
    }

    fn lookup(&self, name: &str) -> CliResult<&NamedTask> {
        self.tasks
            .get(name)
            .ok_or_else(|| CliError::UnknownTask(name.to_string()))
    }

    fn insert(&mut self, name: &str, task: NamedTask) {
        self.tasks.insert(name.to_string(), task);
        self.order.push(name.to_string());
    }

    fn arg<'a>(tokens: &[&'a str], index: usize, message: &str) -> CliResult<&'a str> {
        tokens
            .get(index)
            .copied()
            .ok_or_else(|| CliError::Parse(message.to_string()))
    }

    fn rest(tokens: &[&str], from: usize) -> String {
        tokens.get(from..).unwrap_or_default().join(" ")
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

fn render_json<S: Serialize + Debug>(value: &S) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}
