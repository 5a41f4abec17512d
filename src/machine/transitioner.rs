//! The page-transition state machine.

use crate::core::{
    slots_consistent, Page, TransitionClasses, TransitionHistory, TransitionPhase,
    TransitionRecord,
};
use crate::host::{BodyBinder, FlushScheduler, PageSource};
use crate::machine::error::TransitionerError;
use crate::machine::options::{Options, OptionsPatch};
use crate::reactive::{Computation, ReactiveSlot, Tracker};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Namespace the machine registers its transition-end handlers under.
pub const NAMESPACE: &str = "transitioner";

/// Completed transitions kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// The transition currently in flight. Present exactly when the next-page
/// slot holds a page.
struct InFlight<P: Page> {
    from: P,
    to: P,
    classes: TransitionClasses,
    started_at: DateTime<Utc>,
}

struct Inner<P: Page> {
    current: ReactiveSlot<Option<P>>,
    next: ReactiveSlot<Option<P>>,
    options: RefCell<Options>,
    in_flight: RefCell<Option<InFlight<P>>>,
    history: RefCell<TransitionHistory<P>>,
    listening: Cell<bool>,
    scheduler: Rc<dyn FlushScheduler>,
    body: Rc<dyn BodyBinder>,
}

/// Tracks the current and next page and drives body classes between them.
///
/// Cloning yields another handle to the same machine; hand clones to
/// whatever needs [`current_page`](Self::current_page) or
/// [`next_page`](Self::next_page).
///
/// # Example
///
/// ```rust
/// use transitioner::host::MemoryBody;
/// use transitioner::machine::Transitioner;
/// use transitioner::reactive::Tracker;
/// use std::rc::Rc;
///
/// let tracker = Tracker::new();
/// let body = Rc::new(MemoryBody::new());
/// let transitioner = Transitioner::new(Rc::new(tracker.clone()), body.clone());
///
/// transitioner.transition("home".to_string());
/// transitioner.transition("about".to_string());
/// tracker.flush();
/// assert!(body.has_class("from_home"));
///
/// body.fire_transition_end(true);
/// tracker.flush();
/// assert_eq!(transitioner.current_page(), Some("about".to_string()));
/// assert!(body.classes().is_empty());
/// ```
pub struct Transitioner<P: Page> {
    inner: Rc<Inner<P>>,
}

impl<P: Page> Clone for Transitioner<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: Page> Transitioner<P> {
    /// Create a transitioner with no page yet and default options.
    pub fn new(scheduler: Rc<dyn FlushScheduler>, body: Rc<dyn BodyBinder>) -> Self {
        Self::with_history(scheduler, body, TransitionHistory::bounded(DEFAULT_HISTORY_LIMIT))
    }

    pub(crate) fn with_history(
        scheduler: Rc<dyn FlushScheduler>,
        body: Rc<dyn BodyBinder>,
        history: TransitionHistory<P>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                current: ReactiveSlot::new(None),
                next: ReactiveSlot::new(None),
                options: RefCell::new(Options::default()),
                in_flight: RefCell::new(None),
                history: RefCell::new(history),
                listening: Cell::new(false),
                scheduler,
                body,
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner<P>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Shallow-merge `patch` into the live options.
    pub fn set_options(&self, patch: OptionsPatch) {
        self.inner.options.borrow_mut().merge(patch);
    }

    /// Merge options given as JSON. Only data keys can be set this way.
    pub fn set_options_json(&self, json: &str) -> Result<(), TransitionerError> {
        let patch: OptionsPatch = serde_json::from_str(json)?;
        self.set_options(patch);
        Ok(())
    }

    /// Copy of the live options.
    pub fn options(&self) -> Options {
        self.inner.options.borrow().clone()
    }

    /// The page on screen. Registers the running computation, if any.
    pub fn current_page(&self) -> Option<P> {
        self.inner.current.get()
    }

    /// The page being transitioned to. Registers the running computation, if
    /// any.
    pub fn next_page(&self) -> Option<P> {
        self.inner.next.get()
    }

    /// Snapshot of both pages. Registers nothing.
    pub fn phase(&self) -> TransitionPhase<P> {
        TransitionPhase::from_slots(self.inner.current.peek(), self.inner.next.peek())
            .unwrap_or(TransitionPhase::Uninitialized)
    }

    /// True while a transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.inner.in_flight.borrow().is_some()
    }

    /// Get completed transitions (pure).
    pub fn history(&self) -> TransitionHistory<P> {
        self.inner.history.borrow().clone()
    }

    /// How long the transition in flight has been running.
    pub fn in_flight_for(&self) -> Option<Duration> {
        self.inner.in_flight.borrow().as_ref().map(|flight| {
            Utc::now()
                .signed_duration_since(flight.started_at)
                .to_std()
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Follow `source`: run [`transition`](Self::transition) with its page
    /// now and again whenever a page it read from changes.
    pub fn listen<S>(&self, tracker: &Tracker, source: S) -> Result<Computation, TransitionerError>
    where
        S: PageSource<P> + 'static,
    {
        if self.inner.listening.replace(true) {
            return Err(TransitionerError::AlreadyListening);
        }
        let transitioner = self.clone();
        Ok(tracker.autorun(move |_| {
            let page = source.page();
            transitioner.transition(page);
        }))
    }

    /// Move towards `new_page`.
    ///
    /// Called from inside the listening computation, so it only ever peeks
    /// at its own slots.
    pub fn transition(&self, new_page: P) {
        let Some(mut current) = self.inner.current.peek() else {
            debug!(page = new_page.name(), "showing first page");
            self.inner.current.set(Some(new_page), true);
            return;
        };

        if let Some(pending) = self.inner.next.peek() {
            warn!(
                from = current.name(),
                to = pending.name(),
                requested = new_page.name(),
                "navigation outran transition, completing it early"
            );
            self.complete(true);
            current = pending;
        }

        if current == new_page {
            trace!(page = new_page.name(), "already on requested page");
            return;
        }

        let classes = TransitionClasses::new(&current, &new_page);
        debug!(from = current.name(), to = new_page.name(), "starting transition");
        *self.inner.in_flight.borrow_mut() = Some(InFlight {
            from: current,
            to: new_page.clone(),
            classes: classes.clone(),
            started_at: Utc::now(),
        });
        self.inner.next.set(Some(new_page), true);
        self.check_slots();

        let weak = Rc::downgrade(&self.inner);
        self.inner
            .scheduler
            .schedule_after_flush(Box::new(move || {
                if let Some(transitioner) = Self::from_weak(&weak) {
                    transitioner.begin(&classes);
                }
            }));
    }

    /// Complete the transition in flight. Does nothing when idle, so
    /// duplicate completion events are harmless.
    pub fn end_transition(&self) {
        self.complete(false);
    }

    /// Force completion if the transition in flight has run for at least
    /// `max`. Returns whether it did.
    ///
    /// The machine starts no timers; a host that wants a bound on how long a
    /// transition without a transition-end event can hold the page calls this
    /// from its own timer.
    pub fn complete_if_stalled(&self, max: Duration) -> bool {
        match self.in_flight_for() {
            Some(elapsed) if elapsed >= max => {
                warn!(?elapsed, ?max, "transition stalled, forcing completion");
                self.complete(true);
                true
            }
            _ => false,
        }
    }

    fn begin(&self, classes: &TransitionClasses) {
        let before = Rc::clone(&self.inner.options.borrow().before);
        before();

        self.inner.body.add_body_classes(&classes.to_string());

        let weak = Rc::downgrade(&self.inner);
        self.inner.body.on_body_transition_end(
            NAMESPACE,
            Rc::new(move |target_is_body| {
                if !target_is_body {
                    trace!("ignoring transition end from a descendant");
                    return;
                }
                if let Some(transitioner) = Self::from_weak(&weak) {
                    transitioner.end_transition();
                }
            }),
        );
    }

    fn complete(&self, forced: bool) {
        if self.inner.next.peek().is_none() {
            trace!("no transition in flight");
            return;
        }
        let Some(flight) = self.inner.in_flight.borrow_mut().take() else {
            return;
        };

        let redraw = self.inner.options.borrow().redraw_after_transition;
        self.inner.current.set(Some(flight.to.clone()), redraw);
        self.inner.next.set(None, redraw);
        self.check_slots();

        debug!(
            from = flight.from.name(),
            to = flight.to.name(),
            forced,
            "transition complete"
        );
        let classes = flight.classes;
        let record = TransitionRecord {
            from: flight.from,
            to: flight.to,
            started_at: flight.started_at,
            completed_at: Utc::now(),
            forced,
        };
        let history = self.inner.history.borrow().record(record);
        *self.inner.history.borrow_mut() = history;

        let body = Rc::clone(&self.inner.body);
        let weak = Rc::downgrade(&self.inner);
        self.inner
            .scheduler
            .schedule_after_flush(Box::new(move || {
                body.remove_body_classes(&classes.to_string());
                body.off_all_in_namespace(NAMESPACE);
                trace!(%classes, "transition cleaned up");
                if let Some(inner) = weak.upgrade() {
                    let after = Rc::clone(&inner.options.borrow().after);
                    after();
                }
            }));
    }

    fn check_slots(&self) {
        debug_assert!(slots_consistent(
            self.inner.current.peek().as_ref(),
            self.inner.next.peek().as_ref()
        ));
    }
}
