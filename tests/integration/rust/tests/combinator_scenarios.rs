//! Combinator Scenario Integration Tests
//!
//! Runs the canonical timed scenarios across all four policies against one
//! shared scheduler, the way the demonstrations compose them.

use core_types::{SettleState, TaskError};
use task_engine::{Scheduler, TaskHandle};

/// Helper: the A/B/C tasks settling at 2000/1000/3000.
fn abc(scheduler: &Scheduler) -> Vec<TaskHandle<&'static str, &'static str>> {
    vec![
        scheduler.settle_after(2000, Ok("A")),
        scheduler.settle_after(1000, Ok("B")),
        scheduler.settle_after(3000, Ok("C")),
    ]
}

#[test]
fn test_one_input_set_feeds_all_four_policies() {
    let scheduler = Scheduler::new();
    let tasks = abc(&scheduler);

    let joined = scheduler.all(&tasks);
    let settled = scheduler.all_settled(&tasks);
    let winner = scheduler.race(&tasks);
    let first = scheduler.any(&tasks);

    scheduler.run_until_idle();

    assert_eq!(joined.value(), Some(vec!["A", "B", "C"]));
    assert_eq!(winner.value(), Some("B"));
    assert_eq!(first.value(), Some("B"));

    let records = settled.value().expect("all_settled fulfills");
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|record| record.is_fulfilled()));

    // Virtual time ran to the last settlement even though the race was
    // decided at t=1000.
    assert_eq!(scheduler.now(), 3000);
}

#[test]
fn test_mixed_outcomes_diverge_by_policy() {
    let scheduler = Scheduler::new();
    let tasks = vec![
        scheduler.settle_after::<&str, &str>(2000, Ok("A")),
        scheduler.settle_after::<&str, &str>(1000, Err("down")),
        scheduler.settle_after::<&str, &str>(3000, Ok("C")),
    ];

    let joined = scheduler.all(&tasks);
    let settled = scheduler.all_settled(&tasks);
    let winner = scheduler.race(&tasks);
    let first = scheduler.any(&tasks);

    scheduler.run_until_idle();

    // all: the t=1000 rejection decides it.
    assert_eq!(joined.reason(), Some(TaskError::Rejected("down")));
    // race: the same rejection is simply the first settlement.
    assert_eq!(winner.reason(), Some(TaskError::Rejected("down")));
    // any: skips the rejection and takes the t=2000 fulfillment.
    assert_eq!(first.value(), Some("A"));
    // all_settled: records everything in input order.
    let records = settled.value().expect("all_settled fulfills");
    assert_eq!(records[0].value(), Some(&"A"));
    assert_eq!(records[1].reason(), Some(&TaskError::Rejected("down")));
    assert_eq!(records[2].value(), Some(&"C"));
}

#[test]
fn test_two_rejections_scenario() {
    let scheduler = Scheduler::new();
    let tasks = vec![
        scheduler.rejected::<&str, &str>("x"),
        scheduler.rejected::<&str, &str>("y"),
    ];

    let first = scheduler.any(&tasks);
    let joined = scheduler.all(&tasks);
    scheduler.run_until_idle();

    assert_eq!(
        first.reason(),
        Some(TaskError::Aggregate(vec![
            TaskError::Rejected("x"),
            TaskError::Rejected("y"),
        ]))
    );
    // Registration order breaks the tie: "x" is the first rejection.
    assert_eq!(joined.reason(), Some(TaskError::Rejected("x")));
}

#[test]
fn test_deadline_composed_as_a_competing_task() {
    // No built-in timeouts: a deadline is just another task in the race.
    let scheduler = Scheduler::new();
    let slow_fetch = scheduler.settle_after::<&str, &str>(5000, Ok("payload"));
    let deadline = scheduler.settle_after::<&str, &str>(2000, Err("timed out"));

    let guarded = scheduler.race(&[slow_fetch.clone(), deadline]);
    scheduler.run_until_idle();

    assert_eq!(guarded.reason(), Some(TaskError::Rejected("timed out")));
    // The slow fetch still completed; the race result is unaffected.
    assert_eq!(slow_fetch.value(), Some("payload"));
}

#[test]
fn test_outputs_compose_into_further_combinators() {
    let scheduler = Scheduler::new();
    let fast_pair = vec![
        scheduler.settle_after::<&str, &str>(100, Ok("fast-1")),
        scheduler.settle_after::<&str, &str>(200, Ok("fast-2")),
    ];
    let slow_pair = vec![
        scheduler.settle_after::<&str, &str>(1000, Ok("slow-1")),
        scheduler.settle_after::<&str, &str>(2000, Ok("slow-2")),
    ];

    let fast_join = scheduler.all(&fast_pair);
    let slow_join = scheduler.all(&slow_pair);
    let first_batch = scheduler.race(&[fast_join, slow_join]);

    scheduler.run_until_idle();
    assert_eq!(first_batch.value(), Some(vec!["fast-1", "fast-2"]));
}

#[test]
fn test_pending_race_leaves_scheduler_idle() {
    let scheduler = Scheduler::new();
    let never: Vec<TaskHandle<&str, &str>> = Vec::new();
    let winner = scheduler.race(&never);

    scheduler.run_until_idle();
    assert_eq!(winner.state(), SettleState::Pending);
    assert!(scheduler.is_idle());
    assert_eq!(scheduler.now(), 0);
}
