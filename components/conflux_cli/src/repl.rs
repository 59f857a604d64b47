//! Interactive shell

use crate::error::{CliError, CliResult};
use crate::runtime::Runtime;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive shell over a runtime.
///
/// Commands are the same ones scripts use; `run` drives the scheduler,
/// `report` prints the settlement report, `exit` quits.
pub fn run_repl(runtime: &mut Runtime) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|err| CliError::Shell(format!("failed to initialize editor: {err}")))?;

    println!("Conflux task engine v0.1.0");
    println!("Type commands ('help' lists them) or 'exit' to quit.");
    println!();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit" || trimmed == "quit" {
                    println!("Goodbye!");
                    break;
                }
                if trimmed == "help" {
                    print_help();
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);
                if trimmed == "report" {
                    match runtime.report_json() {
                        Ok(report) => println!("{report}"),
                        Err(err) => eprintln!("error: {err}"),
                    }
                    continue;
                }
                match runtime.execute_line(trimmed) {
                    Ok(Some(feedback)) => println!("{feedback}"),
                    Ok(None) => {}
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => return Err(CliError::Shell(err.to_string())),
        }
    }

    Ok(())
}

fn print_help() {
    println!("  task NAME resolve VALUE        define an immediately fulfilled task");
    println!("  task NAME reject REASON        define an immediately rejected task");
    println!("  task NAME after DELAY resolve VALUE");
    println!("  task NAME after DELAY reject REASON");
    println!("  all OUT NAMES...               fulfill with every value, input order");
    println!("  settled OUT NAMES...           record every outcome, never reject");
    println!("  race OUT NAMES...              first settlement wins");
    println!("  any OUT NAMES...               first fulfillment wins");
    println!("  watch NAME                     print NAME's outcome when it settles");
    println!("  state NAME                     show NAME's current state");
    println!("  list                           show every task");
    println!("  run                            run the scheduler until idle");
    println!("  report                         print the settlement report as JSON");
}
