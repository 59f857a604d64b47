//! Conflux task engine CLI
//!
//! Entry point for the `conflux` binary. Parses CLI arguments and
//! delegates to the Runtime, the scenario runner or the shell.

use clap::Parser;
use conflux_cli::{repl, scenario, Cli, CliError, Runtime};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(file) = cli.file {
        let mut runtime = Runtime::new();
        match runtime.execute_file(&file) {
            Ok(()) => finish(&runtime, cli.json)?,
            Err(CliError::Io(err)) => {
                eprintln!("Error: could not read script '{}': {}", file, err);
                std::process::exit(1);
            }
            Err(err) => {
                eprintln!("Script error: {err}");
                std::process::exit(1);
            }
        }
    } else if let Some(command) = cli.eval {
        let mut runtime = Runtime::new();
        match runtime.execute_line(&command) {
            Ok(feedback) => {
                if let Some(feedback) = feedback {
                    println!("{feedback}");
                }
                runtime.run();
                finish(&runtime, cli.json)?;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
    } else if let Some(scenario) = cli.scenario {
        if let Err(err) = scenario::run_scenario(scenario, cli.json) {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    } else if cli.repl {
        let mut runtime = Runtime::new();
        repl::run_repl(&mut runtime)?;
    } else {
        // Default: show usage
        println!("Conflux task engine v0.1.0");
        println!();
        println!("Usage:");
        println!("  conflux --file <SCRIPT>       Execute a task script");
        println!("  conflux --eval <COMMAND>      Evaluate one command and run");
        println!("  conflux --scenario <NAME>     Run a built-in demonstration");
        println!("  conflux --repl                Start the interactive shell");
        println!();
        println!("Run 'conflux --help' for more options.");
    }

    Ok(())
}

/// Prints the settlement report after a successful run.
fn finish(runtime: &Runtime, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", runtime.report_json()?);
    } else {
        for line in runtime.describe_all() {
            println!("{line}");
        }
    }
    Ok(())
}
