//! Unit tests for the scheduler's ordering guarantees

use std::cell::RefCell;
use std::rc::Rc;
use task_engine::Scheduler;

#[test]
fn virtual_time_starts_at_zero() {
    let scheduler = Scheduler::new();
    assert_eq!(scheduler.now(), 0);
}

#[test]
fn deferred_work_never_runs_inline() {
    let scheduler = Scheduler::new();
    let ran = Rc::new(RefCell::new(false));
    let flag = ran.clone();
    scheduler.defer(move || *flag.borrow_mut() = true);
    assert!(!*ran.borrow());
    scheduler.run_until_idle();
    assert!(*ran.borrow());
}

#[test]
fn same_instant_timers_fire_in_registration_order() {
    let scheduler = Scheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for label in [1, 2, 3] {
        let o = order.clone();
        scheduler.schedule_after(2000, move || o.borrow_mut().push(label));
    }

    scheduler.run_until_idle();
    assert_eq!(*order.borrow(), vec![1, 2, 3]);
    assert_eq!(scheduler.now(), 2000);
}

#[test]
fn continuations_run_between_timer_instants() {
    let scheduler = Scheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    // A task settling at t=10 defers its continuation; the continuation
    // must run before the t=20 timer fires.
    let task = scheduler.settle_after::<&str, String>(10, Ok("first"));
    let o = order.clone();
    task.on_settle(move |value| o.borrow_mut().push(value), |_| {});

    let o = order.clone();
    scheduler.schedule_after(20, move || o.borrow_mut().push("second"));

    scheduler.run_until_idle();
    assert_eq!(*order.borrow(), vec!["first", "second"]);
}

#[test]
fn clock_jumps_rather_than_ticks() {
    let scheduler = Scheduler::new();
    let observed = Rc::new(RefCell::new(Vec::new()));

    for delay in [3000, 7, 100_000] {
        let o = observed.clone();
        let s = scheduler.clone();
        scheduler.schedule_after(delay, move || o.borrow_mut().push(s.now()));
    }

    scheduler.run_until_idle();
    assert_eq!(*observed.borrow(), vec![7, 3000, 100_000]);
}

#[test]
fn pending_timer_count_tracks_unfired_work() {
    let scheduler = Scheduler::new();
    scheduler.schedule_after(5, || {});
    scheduler.schedule_after(10, || {});
    assert_eq!(scheduler.pending_timers(), 2);
    assert!(scheduler.turn());
    assert_eq!(scheduler.pending_timers(), 1);
    scheduler.run_until_idle();
    assert_eq!(scheduler.pending_timers(), 0);
}

#[test]
fn losing_timer_work_still_runs_to_completion() {
    // A race winner does not stop the slower work from running.
    let scheduler = Scheduler::new();
    let completions = Rc::new(RefCell::new(0));

    let tasks = vec![
        scheduler.settle_after::<&str, String>(1000, Ok("fast")),
        scheduler.settle_after::<&str, String>(2000, Ok("slow")),
    ];
    for task in &tasks {
        let c = completions.clone();
        task.on_settle(move |_| *c.borrow_mut() += 1, |_| {});
    }
    let winner = scheduler.race(&tasks);

    scheduler.run_until_idle();
    assert_eq!(winner.value(), Some("fast"));
    assert_eq!(*completions.borrow(), 2);
    assert_eq!(scheduler.now(), 2000);
}
