//! Deferred tasks and their settlement machinery.
//!
//! A task is a unit of deferred work with a write-once outcome. Its state
//! triple (state, value, reason) is written exactly once, by whichever
//! completer settles it first; every later resolve or reject is a silent
//! no-op. Observers register continuations with [`TaskHandle::on_settle`];
//! continuations are always delivered through the scheduler's ready queue,
//! never invoked synchronously, and fire in registration order.

use crate::scheduler::Scheduler;
use core_types::{Outcome, SettleState, TaskError, TaskId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A pair of handlers waiting for one task to settle.
struct Reaction<T, R> {
    on_fulfilled: Option<Box<dyn FnOnce(T)>>,
    on_rejected: Option<Box<dyn FnOnce(TaskError<R>)>>,
}

/// The shared, write-once state of a task.
struct TaskCell<T, R> {
    id: TaskId,
    state: SettleState,
    value: Option<T>,
    reason: Option<TaskError<R>>,
    reactions: Vec<Reaction<T, R>>,
}

/// What a chaining handler produces.
///
/// Returned from the handlers given to [`TaskHandle::then`] and
/// [`TaskHandle::or_else`] to decide how the derived task settles.
pub enum Step<T, R> {
    /// Fulfill the derived task with this value.
    Done(T),
    /// Reject the derived task with this reason.
    Fail(R),
    /// Adopt another task: the derived task settles with whatever outcome
    /// that task eventually produces. This is how sequential, await-style
    /// flows are expressed.
    Chain(TaskHandle<T, R>),
}

/// An observer handle to a task.
///
/// Handles are cheap to clone and share one underlying task. The task's
/// outcome is observed with [`TaskHandle::on_settle`] or derived into new
/// tasks with [`TaskHandle::then`], [`TaskHandle::or_else`] and
/// [`TaskHandle::finally`].
///
/// # Examples
///
/// ```
/// use task_engine::Scheduler;
///
/// let scheduler = Scheduler::new();
/// let task = scheduler.fulfilled::<&str, String>("ready");
/// task.on_settle(
///     |value| assert_eq!(value, "ready"),
///     |_reason| panic!("not rejected"),
/// );
/// scheduler.run_until_idle();
/// ```
pub struct TaskHandle<T, R> {
    scheduler: Scheduler,
    cell: Rc<RefCell<TaskCell<T, R>>>,
}

impl<T, R> Clone for TaskHandle<T, R> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T, R> fmt::Debug for TaskHandle<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("TaskHandle")
            .field("id", &cell.id)
            .field("state", &cell.state)
            .finish()
    }
}

/// The settle capability of one task.
///
/// A completer is handed to the body passed to [`Scheduler::spawn`]. Only
/// the first `resolve`/`reject` call has any effect; a task is never
/// observed to change state twice.
pub struct Completer<T, R> {
    handle: TaskHandle<T, R>,
}

impl<T, R> Clone for Completer<T, R> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

impl<T, R> fmt::Debug for Completer<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Completer({})", self.handle.id())
    }
}

impl<T, R> Completer<T, R>
where
    T: Clone + 'static,
    R: Clone + 'static,
{
    /// Fulfills the task with a value. No-op if already settled.
    pub fn resolve(&self, value: T) {
        self.handle.settle_value(value);
    }

    /// Rejects the task with a caller-supplied reason. No-op if already
    /// settled.
    pub fn reject(&self, reason: R) {
        self.handle.settle_error(TaskError::Rejected(reason));
    }
}

impl<T, R> TaskHandle<T, R> {
    /// The task's unique identity.
    pub fn id(&self) -> TaskId {
        self.cell.borrow().id
    }

    /// The task's current settlement state.
    pub fn state(&self) -> SettleState {
        self.cell.borrow().state
    }

    /// Returns true once the task has settled.
    pub fn is_settled(&self) -> bool {
        self.state().is_settled()
    }
}

impl<T, R> TaskHandle<T, R>
where
    T: Clone + 'static,
    R: Clone + 'static,
{
    /// The resolved value, if the task has fulfilled.
    pub fn value(&self) -> Option<T> {
        self.cell.borrow().value.clone()
    }

    /// The rejection, if the task has rejected.
    pub fn reason(&self) -> Option<TaskError<R>> {
        self.cell.borrow().reason.clone()
    }

    /// The settlement record, if the task has settled.
    pub fn outcome(&self) -> Option<Outcome<T, R>> {
        let cell = self.cell.borrow();
        match cell.state {
            SettleState::Pending => None,
            SettleState::Fulfilled => cell.value.clone().map(|value| Outcome::Fulfilled { value }),
            SettleState::Rejected => cell
                .reason
                .clone()
                .map(|reason| Outcome::Rejected { reason }),
        }
    }

    /// Registers interest in the task's settlement.
    ///
    /// Exactly one of the two handlers fires, once, with a clone of the
    /// stored value or reason. If the task is already settled the handler
    /// is scheduled on the ready queue, not invoked synchronously.
    /// Handlers for one task fire in registration order.
    pub fn on_settle<F, G>(&self, on_fulfilled: F, on_rejected: G)
    where
        F: FnOnce(T) + 'static,
        G: FnOnce(TaskError<R>) + 'static,
    {
        let reaction = Reaction {
            on_fulfilled: Some(Box::new(on_fulfilled)),
            on_rejected: Some(Box::new(on_rejected)),
        };

        {
            let mut cell = self.cell.borrow_mut();
            if cell.state == SettleState::Pending {
                cell.reactions.push(reaction);
                return;
            }
        }
        self.dispatch(reaction);
    }

    /// Derives a task from this one's fulfillment.
    ///
    /// On fulfillment, `on_fulfilled` decides the derived task's outcome
    /// via [`Step`]. A rejection passes through to the derived task
    /// unchanged, so one `or_else` at the end of a chain observes a
    /// failure from any link.
    pub fn then<U, F>(&self, on_fulfilled: F) -> TaskHandle<U, R>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Step<U, R> + 'static,
    {
        let chained = self.scheduler.pending::<U, R>();
        let fulfill_out = chained.clone();
        let reject_out = chained.clone();
        self.on_settle(
            move |value| fulfill_out.apply(on_fulfilled(value)),
            move |reason| reject_out.settle_error(reason),
        );
        chained
    }

    /// Derives a task that can recover from this one's rejection.
    ///
    /// On rejection, `recover` decides the derived task's outcome via
    /// [`Step`]. A fulfillment passes through unchanged.
    pub fn or_else<F>(&self, recover: F) -> TaskHandle<T, R>
    where
        F: FnOnce(TaskError<R>) -> Step<T, R> + 'static,
    {
        let chained = self.scheduler.pending::<T, R>();
        let fulfill_out = chained.clone();
        let reject_out = chained.clone();
        self.on_settle(
            move |value| fulfill_out.settle_value(value),
            move |reason| reject_out.apply(recover(reason)),
        );
        chained
    }

    /// Runs `cleanup` when the task settles, passing the outcome through
    /// unchanged.
    pub fn finally<F>(&self, cleanup: F) -> TaskHandle<T, R>
    where
        F: FnOnce() + 'static,
    {
        let chained = self.scheduler.pending::<T, R>();
        let fulfill_out = chained.clone();
        let reject_out = chained.clone();
        // One FnOnce shared by two branches; only the firing branch takes it.
        let cleanup = Rc::new(RefCell::new(Some(cleanup)));
        let on_fulfilled_cleanup = Rc::clone(&cleanup);
        self.on_settle(
            move |value| {
                if let Some(f) = on_fulfilled_cleanup.borrow_mut().take() {
                    f();
                }
                fulfill_out.settle_value(value);
            },
            move |reason| {
                if let Some(f) = cleanup.borrow_mut().take() {
                    f();
                }
                reject_out.settle_error(reason);
            },
        );
        chained
    }

    /// Applies a handler's [`Step`] to this (derived) task.
    fn apply(&self, step: Step<T, R>) {
        match step {
            Step::Done(value) => self.settle_value(value),
            Step::Fail(reason) => self.settle_error(TaskError::Rejected(reason)),
            Step::Chain(inner) => {
                let fulfill_out = self.clone();
                let reject_out = self.clone();
                inner.on_settle(
                    move |value| fulfill_out.settle_value(value),
                    move |reason| reject_out.settle_error(reason),
                );
            }
        }
    }

    /// Fulfills the task. First transition wins; later calls are no-ops.
    pub(crate) fn settle_value(&self, value: T) {
        self.settle(Ok(value));
    }

    /// Rejects the task. First transition wins; later calls are no-ops.
    pub(crate) fn settle_error(&self, reason: TaskError<R>) {
        self.settle(Err(reason));
    }

    fn settle(&self, outcome: Result<T, TaskError<R>>) {
        let reactions = {
            let mut cell = self.cell.borrow_mut();
            if cell.state != SettleState::Pending {
                return;
            }
            match outcome {
                Ok(value) => {
                    cell.state = SettleState::Fulfilled;
                    cell.value = Some(value);
                }
                Err(reason) => {
                    cell.state = SettleState::Rejected;
                    cell.reason = Some(reason);
                }
            }
            std::mem::take(&mut cell.reactions)
        };
        for reaction in reactions {
            self.dispatch(reaction);
        }
    }

    /// Schedules the appropriate handler of a reaction for a settled task.
    fn dispatch(&self, reaction: Reaction<T, R>) {
        let (state, value, reason) = {
            let cell = self.cell.borrow();
            (cell.state, cell.value.clone(), cell.reason.clone())
        };
        match state {
            SettleState::Fulfilled => {
                if let (Some(handler), Some(value)) = (reaction.on_fulfilled, value) {
                    self.scheduler.defer(move || handler(value));
                }
            }
            SettleState::Rejected => {
                if let (Some(handler), Some(reason)) = (reaction.on_rejected, reason) {
                    self.scheduler.defer(move || handler(reason));
                }
            }
            SettleState::Pending => {}
        }
    }
}

impl Scheduler {
    /// Creates a task that stays pending until settled internally.
    ///
    /// Without a completer the task can never settle; `race` over an empty
    /// input returns such a task.
    pub fn pending<T, R>(&self) -> TaskHandle<T, R>
    where
        T: Clone + 'static,
        R: Clone + 'static,
    {
        TaskHandle {
            scheduler: self.clone(),
            cell: Rc::new(RefCell::new(TaskCell {
                id: self.allocate_id(),
                state: SettleState::Pending,
                value: None,
                reason: None,
                reactions: Vec::new(),
            })),
        }
    }

    /// Registers a unit of work and returns its task.
    ///
    /// The body runs synchronously and receives the task's [`Completer`];
    /// it settles the task now or from work it schedules. Settling is
    /// idempotent: only the first resolve or reject call has effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_engine::Scheduler;
    ///
    /// let scheduler = Scheduler::new();
    /// let inner = scheduler.clone();
    /// let task = scheduler.spawn::<i32, String, _>(move |completer| {
    ///     inner.schedule_after(100, move || completer.resolve(7));
    /// });
    /// scheduler.run_until_idle();
    /// assert_eq!(task.value(), Some(7));
    /// ```
    pub fn spawn<T, R, F>(&self, body: F) -> TaskHandle<T, R>
    where
        T: Clone + 'static,
        R: Clone + 'static,
        F: FnOnce(Completer<T, R>),
    {
        let handle = self.pending();
        body(Completer {
            handle: handle.clone(),
        });
        handle
    }

    /// Creates an already-fulfilled task.
    pub fn fulfilled<T, R>(&self, value: T) -> TaskHandle<T, R>
    where
        T: Clone + 'static,
        R: Clone + 'static,
    {
        let handle = self.pending();
        handle.settle_value(value);
        handle
    }

    /// Creates an already-rejected task.
    pub fn rejected<T, R>(&self, reason: R) -> TaskHandle<T, R>
    where
        T: Clone + 'static,
        R: Clone + 'static,
    {
        let handle = self.pending();
        handle.settle_error(TaskError::Rejected(reason));
        handle
    }

    /// Creates a task that settles with the given outcome after a delay.
    ///
    /// This is the timer-backed task the demonstrations are built from.
    pub fn settle_after<T, R>(&self, delay: u64, outcome: Result<T, R>) -> TaskHandle<T, R>
    where
        T: Clone + 'static,
        R: Clone + 'static,
    {
        self.spawn(|completer| {
            self.schedule_after(delay, move || match outcome {
                Ok(value) => completer.resolve(value),
                Err(reason) => completer.reject(reason),
            });
        })
    }
}
