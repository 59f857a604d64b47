//! Single-threaded cooperative scheduler.
//!
//! The scheduler owns a ready queue of continuations and a timer queue
//! driven by a virtual clock. One turn of the loop:
//! 1. Advance the clock to the next timer deadline and run that work item
//! 2. Drain the ready queue completely
//! 3. Repeat
//!
//! Time is simulated: `run_until_idle` jumps the clock between deadlines
//! rather than sleeping, so a run over tasks delayed by thousands of time
//! units completes immediately and deterministically.

use crate::work_queue::{TimerQueue, Work, WorkQueue};
use core_types::TaskId;
use std::cell::RefCell;
use std::rc::Rc;

/// The cooperative scheduler all tasks run on.
///
/// `Scheduler` is a cheap handle: clones share the same queues and clock,
/// so task handles and completers can carry one around freely. Everything
/// runs on the single thread that calls [`Scheduler::run_until_idle`];
/// work never runs synchronously inside the call that created it.
///
/// # Examples
///
/// ```
/// use task_engine::Scheduler;
///
/// let scheduler = Scheduler::new();
/// let task = scheduler.settle_after::<i32, String>(10, Ok(42));
/// scheduler.run_until_idle();
/// assert_eq!(task.value(), Some(42));
/// assert_eq!(scheduler.now(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    core: Rc<RefCell<SchedulerCore>>,
}

#[derive(Debug, Default)]
struct SchedulerCore {
    ready: WorkQueue,
    timers: TimerQueue,
    now: u64,
    next_task: u64,
}

impl Scheduler {
    /// Creates a new scheduler with empty queues and the clock at zero.
    pub fn new() -> Self {
        Self {
            core: Rc::new(RefCell::new(SchedulerCore::default())),
        }
    }

    /// The current virtual time.
    pub fn now(&self) -> u64 {
        self.core.borrow().now
    }

    /// Enqueues a continuation on the ready queue.
    ///
    /// The work runs during the next drain of the ready queue, after the
    /// currently executing work item returns.
    pub fn defer<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.core.borrow_mut().ready.enqueue(Work::new(f));
    }

    /// Schedules work to run `delay` time units from now.
    ///
    /// Work scheduled for the same instant runs in scheduling order.
    pub fn schedule_after<F>(&self, delay: u64, f: F)
    where
        F: FnOnce() + 'static,
    {
        let mut core = self.core.borrow_mut();
        let deadline = core.now + delay;
        core.timers.schedule(deadline, Work::new(f));
    }

    /// Returns true if both queues are empty.
    pub fn is_idle(&self) -> bool {
        let core = self.core.borrow();
        core.ready.is_empty() && core.timers.is_empty()
    }

    /// The number of timer work items not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.core.borrow().timers.len()
    }

    /// Runs ready work until the ready queue is empty.
    ///
    /// Work enqueued while draining is also run before this returns.
    pub fn drain_ready(&self) {
        loop {
            let work = self.core.borrow_mut().ready.dequeue();
            match work {
                Some(work) => work.run(),
                None => break,
            }
        }
    }

    /// Processes one turn: fire the next timer, then drain the ready queue.
    ///
    /// Advances the virtual clock to the timer's deadline if it lies in the
    /// future. Returns false when no timer work remains.
    pub fn turn(&self) -> bool {
        let due = {
            let mut core = self.core.borrow_mut();
            match core.timers.pop_next() {
                Some((deadline, work)) => {
                    if deadline > core.now {
                        core.now = deadline;
                    }
                    Some(work)
                }
                None => None,
            }
        };

        match due {
            Some(work) => {
                work.run();
                self.drain_ready();
                true
            }
            None => false,
        }
    }

    /// Runs the scheduler until both queues are empty.
    pub fn run_until_idle(&self) {
        self.drain_ready();
        while self.turn() {}
    }

    /// Allocates the next task id.
    pub(crate) fn allocate_id(&self) -> TaskId {
        let mut core = self.core.borrow_mut();
        let id = TaskId::new(core.next_task);
        core.next_task += 1;
        id
    }
}
