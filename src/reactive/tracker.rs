//! Computations and the flush loop that reruns them.

use crate::host::{FlushScheduler, Task};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

thread_local! {
    static CURRENT: RefCell<Option<Computation>> = const { RefCell::new(None) };
}

/// The computation whose body is running right now, if any.
pub fn current() -> Option<Computation> {
    CURRENT.with(|current| current.borrow().clone())
}

/// True while a computation body is running.
pub fn is_tracking() -> bool {
    CURRENT.with(|current| current.borrow().is_some())
}

/// Run `f` with no current computation, so reads inside it register nothing.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    let _guard = CurrentGuard::enter(None);
    f()
}

/// Restores the previous current computation when dropped.
struct CurrentGuard {
    previous: Option<Computation>,
}

impl CurrentGuard {
    fn enter(computation: Option<Computation>) -> Self {
        let previous = CURRENT.with(|current| current.replace(computation));
        Self { previous }
    }
}

impl Drop for CurrentGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

type Body = Box<dyn FnMut(&Computation)>;

struct ComputationInner {
    id: u64,
    invalidated: Cell<bool>,
    stopped: Cell<bool>,
    first_run: Cell<bool>,
    on_invalidate: RefCell<Vec<Task>>,
    body: RefCell<Option<Body>>,
    tracker: Weak<TrackerInner>,
}

/// A body that reruns whenever something it read is invalidated.
///
/// Handles are cheap to clone; all clones refer to the same computation.
#[derive(Clone)]
pub struct Computation {
    inner: Rc<ComputationInner>,
}

impl std::fmt::Debug for Computation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computation")
            .field("id", &self.inner.id)
            .field("invalidated", &self.inner.invalidated.get())
            .field("stopped", &self.inner.stopped.get())
            .finish()
    }
}

impl Computation {
    /// Identifier unique within the owning tracker.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// True from invalidation until the next rerun starts.
    pub fn is_invalidated(&self) -> bool {
        self.inner.invalidated.get()
    }

    /// True once [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.get()
    }

    /// True during the body's first run only.
    pub fn first_run(&self) -> bool {
        self.inner.first_run.get()
    }

    /// Mark the computation stale and queue it for the next flush.
    ///
    /// Invalidating an already invalidated computation does nothing.
    pub fn invalidate(&self) {
        if self.inner.invalidated.replace(true) {
            return;
        }
        if !self.inner.stopped.get() {
            if let Some(tracker) = self.inner.tracker.upgrade() {
                tracker.pending.borrow_mut().push_back(self.clone());
            }
        }
        let callbacks = std::mem::take(&mut *self.inner.on_invalidate.borrow_mut());
        for callback in callbacks {
            callback();
        }
    }

    /// Stop rerunning. The body is dropped once it is no longer running.
    pub fn stop(&self) {
        if self.inner.stopped.replace(true) {
            return;
        }
        self.invalidate();
        if let Ok(mut body) = self.inner.body.try_borrow_mut() {
            body.take();
        }
    }

    /// Run `callback` when this computation is next invalidated, or right
    /// away if it already is.
    pub fn on_invalidate(&self, callback: impl FnOnce() + 'static) {
        if self.inner.invalidated.get() {
            callback();
        } else {
            self.inner.on_invalidate.borrow_mut().push(Box::new(callback));
        }
    }

    fn recompute(&self) {
        if self.inner.stopped.get() || !self.inner.invalidated.get() {
            return;
        }
        self.inner.invalidated.set(false);
        self.run();
    }

    fn run(&self) {
        let Some(mut body) = self.inner.body.borrow_mut().take() else {
            return;
        };
        {
            let _guard = CurrentGuard::enter(Some(self.clone()));
            body(self);
        }
        self.inner.first_run.set(false);
        if !self.inner.stopped.get() {
            *self.inner.body.borrow_mut() = Some(body);
        }
    }
}

#[derive(Default)]
struct TrackerInner {
    pending: RefCell<VecDeque<Computation>>,
    after_flush: RefCell<VecDeque<Task>>,
    flushing: Cell<bool>,
    next_id: Cell<u64>,
}

/// Owns the queue of invalidated computations and the after-flush tasks.
///
/// The host calls [`Tracker::flush`] at the point of its update cycle where
/// stale computations should rerun (typically a microtask or the end of an
/// event handler). Flushing reruns every invalidated computation, then runs
/// queued after-flush tasks one at a time, going back to computations as soon
/// as a task invalidates any, until both queues are empty.
///
/// # Example
///
/// ```rust
/// use transitioner::reactive::{ReactiveSlot, Tracker};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let tracker = Tracker::new();
/// let count = Rc::new(ReactiveSlot::new(0));
/// let seen = Rc::new(Cell::new(0));
///
/// let (c, s) = (Rc::clone(&count), Rc::clone(&seen));
/// tracker.autorun(move |_| s.set(c.get()));
///
/// count.set(5, true);
/// assert_eq!(seen.get(), 0);
/// tracker.flush();
/// assert_eq!(seen.get(), 5);
/// ```
#[derive(Clone, Default)]
pub struct Tracker {
    inner: Rc<TrackerInner>,
}

impl Tracker {
    /// Create a tracker with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `body` now, tracking what it reads, and rerun it on every flush
    /// after one of those reads is invalidated.
    pub fn autorun<F>(&self, body: F) -> Computation
    where
        F: FnMut(&Computation) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let computation = Computation {
            inner: Rc::new(ComputationInner {
                id,
                invalidated: Cell::new(false),
                stopped: Cell::new(false),
                first_run: Cell::new(true),
                on_invalidate: RefCell::new(Vec::new()),
                body: RefCell::new(Some(Box::new(body))),
                tracker: Rc::downgrade(&self.inner),
            }),
        };
        computation.run();
        computation
    }

    /// Queue `task` to run once, after the pending computations have rerun.
    pub fn after_flush(&self, task: impl FnOnce() + 'static) {
        self.inner.after_flush.borrow_mut().push_back(Box::new(task));
    }

    /// True if a computation or after-flush task is waiting for a flush.
    pub fn has_pending_work(&self) -> bool {
        !self.inner.pending.borrow().is_empty() || !self.inner.after_flush.borrow().is_empty()
    }

    /// Drain both queues. Re-entrant calls from inside a flush return
    /// immediately; the outer flush picks up whatever they would have run.
    pub fn flush(&self) {
        let Some(_guard) = FlushGuard::enter(&self.inner) else {
            tracing::trace!("flush requested while flushing");
            return;
        };
        loop {
            let computation = self.inner.pending.borrow_mut().pop_front();
            if let Some(computation) = computation {
                computation.recompute();
                continue;
            }
            let task = self.inner.after_flush.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

/// Clears the flushing flag when dropped, including on unwind.
struct FlushGuard<'a> {
    tracker: &'a TrackerInner,
}

impl<'a> FlushGuard<'a> {
    fn enter(tracker: &'a TrackerInner) -> Option<Self> {
        if tracker.flushing.replace(true) {
            None
        } else {
            Some(Self { tracker })
        }
    }
}

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.tracker.flushing.set(false);
    }
}

impl FlushScheduler for Tracker {
    fn schedule_after_flush(&self, task: Task) {
        self.inner.after_flush.borrow_mut().push_back(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autorun_runs_immediately() {
        let tracker = Tracker::new();
        let runs = Rc::new(Cell::new(0));

        let r = Rc::clone(&runs);
        let computation = tracker.autorun(move |c| {
            assert!(c.first_run());
            r.set(r.get() + 1);
        });

        assert_eq!(runs.get(), 1);
        assert!(!computation.first_run());
    }

    #[test]
    fn invalidated_computation_reruns_on_flush() {
        let tracker = Tracker::new();
        let runs = Rc::new(Cell::new(0));

        let r = Rc::clone(&runs);
        let computation = tracker.autorun(move |_| r.set(r.get() + 1));

        computation.invalidate();
        computation.invalidate();
        assert_eq!(runs.get(), 1);
        assert!(tracker.has_pending_work());

        tracker.flush();
        assert_eq!(runs.get(), 2);
        assert!(!computation.is_invalidated());
        assert!(!tracker.has_pending_work());
    }

    #[test]
    fn stopped_computation_never_reruns() {
        let tracker = Tracker::new();
        let runs = Rc::new(Cell::new(0));

        let r = Rc::clone(&runs);
        let computation = tracker.autorun(move |_| r.set(r.get() + 1));

        computation.stop();
        computation.invalidate();
        tracker.flush();

        assert!(computation.is_stopped());
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn after_flush_runs_after_recomputation() {
        let tracker = Tracker::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        let computation = tracker.autorun(move |c| {
            if !c.first_run() {
                o.borrow_mut().push("recompute");
            }
        });

        let o = Rc::clone(&order);
        tracker.after_flush(move || o.borrow_mut().push("task"));
        computation.invalidate();
        tracker.flush();

        assert_eq!(*order.borrow(), vec!["recompute", "task"]);
    }

    #[test]
    fn tasks_scheduled_during_flush_run_in_same_flush() {
        let tracker = Tracker::new();
        let ran = Rc::new(Cell::new(false));

        let (t, r) = (tracker.clone(), Rc::clone(&ran));
        tracker.after_flush(move || {
            let r = Rc::clone(&r);
            t.after_flush(move || r.set(true));
        });
        tracker.flush();

        assert!(ran.get());
    }

    #[test]
    fn on_invalidate_fires_once() {
        let tracker = Tracker::new();
        let fired = Rc::new(Cell::new(0));
        let computation = tracker.autorun(|_| {});

        let f = Rc::clone(&fired);
        computation.on_invalidate(move || f.set(f.get() + 1));
        computation.invalidate();
        computation.invalidate();

        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn current_is_set_only_inside_body() {
        let tracker = Tracker::new();
        let inside = Rc::new(Cell::new(false));

        let i = Rc::clone(&inside);
        tracker.autorun(move |_| {
            i.set(is_tracking());
            assert!(!untracked(is_tracking));
        });

        assert!(inside.get());
        assert!(!is_tracking());
    }

    #[test]
    fn flush_recovers_after_panicking_task() {
        let tracker = Tracker::new();
        tracker.after_flush(|| panic!("hook failed"));

        let t = tracker.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| t.flush()));
        assert!(result.is_err());

        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        tracker.after_flush(move || r.set(true));
        tracker.flush();

        assert!(ran.get());
    }
}
