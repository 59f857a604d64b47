//! Built-in demonstrations.
//!
//! The four combinator demonstrations are expressed as command scripts and
//! run through the [`Runtime`]; the chaining and sequencing ones need
//! handler logic, so they drive the engine directly.

use crate::cli::Scenario;
use crate::error::CliResult;
use crate::runtime::Runtime;
use task_engine::{Scheduler, Step, TaskHandle};

const ALL_DEMO: &str = "\
# Three delayed fetches joined in input order.
task first after 2000 resolve promise 1 resolved
task second after 2000 resolve promise 2 resolved
task third after 2000 resolve promise 3 resolved
all joined first second third
watch joined
# One rejection makes the join reject with that reason.
task ok after 2000 resolve resolved
task bad after 2000 reject rejected
all mixed ok bad
watch mixed
run
";

const ALL_SETTLED_DEMO: &str = "\
# Every outcome is recorded; the late rejection does not short-circuit.
task first after 2000 resolve promise 1 resolved
task second after 2000 resolve promise 2 resolved
task third after 2000 resolve promise 3 resolved
task bad after 8000 reject rejected
settled outcomes first second third bad
watch outcomes
run
";

const RACE_DEMO: &str = "\
# The rejection lands just after the fulfillments, so a value wins.
task first after 2000 resolve promise 1 resolved
task second after 2000 resolve promise 2 resolved
task third after 2000 resolve promise 3 resolved
task bad after 2001 reject rejected
race winner first second third bad
watch winner
run
";

const ANY_DEMO: &str = "\
# The early rejection is ignored; the first fulfillment wins.
task bad after 1000 reject rejected
task first after 2000 resolve promise 1 resolved
task second after 2000 resolve promise 2 resolved
any fastest bad first second
watch fastest
# When everything rejects, the reasons aggregate in input order.
task bad1 after 1000 reject rejected
task bad2 after 1000 reject rejected
any none bad1 bad2
watch none
run
";

/// Runs a built-in demonstration, printing its progress.
pub fn run_scenario(scenario: Scenario, json: bool) -> CliResult<()> {
    match scenario {
        Scenario::All => run_script(ALL_DEMO, json),
        Scenario::AllSettled => run_script(ALL_SETTLED_DEMO, json),
        Scenario::Race => run_script(RACE_DEMO, json),
        Scenario::Any => run_script(ANY_DEMO, json),
        Scenario::Chain => chain_demo(),
        Scenario::Sequence => sequence_demo(),
    }
}

fn run_script(source: &str, json: bool) -> CliResult<()> {
    let mut runtime = Runtime::new();
    runtime.execute_script(source)?;
    if json {
        println!("{}", runtime.report_json()?);
    }
    Ok(())
}

/// A task that checks a number for evenness after a delay.
fn get_even(scheduler: &Scheduler, n: i64, delay: u64) -> TaskHandle<i64, String> {
    let outcome = if n % 2 == 0 {
        Ok(n)
    } else {
        Err(format!("{n} is not even"))
    };
    scheduler.settle_after(delay, outcome)
}

/// Sequential chaining: each link starts the next check, the final
/// recovery observes the first failure.
fn chain_demo() -> CliResult<()> {
    let scheduler = Scheduler::new();

    let s1 = scheduler.clone();
    let s2 = scheduler.clone();
    get_even(&scheduler, 6, 2000)
        .then(move |n| {
            println!("{n} is even");
            Step::Chain(get_even(&s1, 8, 1000))
        })
        .then(move |n| {
            println!("{n} is even");
            Step::Chain(get_even(&s2, 9, 2000))
        })
        .or_else(|reason| {
            println!("error = {reason}");
            Step::Done(0)
        });

    scheduler.run_until_idle();
    println!("chain finished at t={}", scheduler.now());
    Ok(())
}

/// Await-style sequencing: three concurrent tasks awaited in input order.
fn sequence_demo() -> CliResult<()> {
    let scheduler = Scheduler::new();
    let first = scheduler.settle_after::<String, String>(10000, Ok("promise 1".to_string()));
    let second = scheduler.settle_after::<String, String>(5000, Ok("promise 2".to_string()));
    let third = scheduler.settle_after::<String, String>(3000, Ok("promise 3".to_string()));

    println!("in test..");
    first
        .then(move |data| {
            println!("1..........");
            println!("{data}");
            Step::Chain(second)
        })
        .then(move |data| {
            println!("2.........");
            println!("{data}");
            Step::Chain(third)
        })
        .then(move |data| {
            println!("3.........");
            println!("{data}");
            Step::Done(())
        });
    println!("in main thread");

    scheduler.run_until_idle();
    println!("sequence finished at t={}", scheduler.now());
    Ok(())
}
