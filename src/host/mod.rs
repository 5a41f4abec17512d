//! Contracts the transition machine needs from its host.
//!
//! The machine never talks to a router, a scheduler or the DOM directly:
//! - [`PageSource`] yields the page the router wants shown
//! - [`FlushScheduler`] defers work until the current reactive batch settles
//! - [`BodyBinder`] edits the body class list and reports transition ends
//!
//! [`MemoryBody`] is an in-memory binder for headless hosts and tests. With
//! the `web` feature, `web::WebBody` binds to the real document body.

mod memory;
#[cfg(feature = "web")]
pub mod web;

pub use memory::{BodyMutation, MemoryBody};

use std::rc::Rc;

/// Vendor names of the DOM "transition ended" event. A binder subscribes to
/// all of them and reports each as one logical notification.
pub const TRANSITION_END_EVENTS: [&str; 5] = [
    "webkitTransitionEnd",
    "oTransitionEnd",
    "transitionEnd",
    "msTransitionEnd",
    "transitionend",
];

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Transition-end callback. The argument is true when the event originated
/// on the body itself rather than bubbling up from a descendant.
pub type TransitionEndHandler = Rc<dyn Fn(bool)>;

/// Upstream signal naming the page that should be displayed.
///
/// Read from inside a computation, so an implementation backed by reactive
/// state makes the machine follow navigation automatically.
pub trait PageSource<P> {
    fn page(&self) -> P;
}

impl<P, F> PageSource<P> for F
where
    F: Fn() -> P,
{
    fn page(&self) -> P {
        self()
    }
}

/// Runs tasks once the current batch of reactive recomputations settles.
pub trait FlushScheduler {
    /// Queue `task` to run exactly once, after the pending recomputations
    /// and before the next external event is handled.
    fn schedule_after_flush(&self, task: Task);
}

/// Access to the document body's class list and transition-end events.
pub trait BodyBinder {
    /// Add every whitespace-separated class in `classes`.
    fn add_body_classes(&self, classes: &str);

    /// Remove every whitespace-separated class in `classes`.
    fn remove_body_classes(&self, classes: &str);

    /// Call `handler` once per transition-end event on the body, under
    /// `namespace`. Events bubbling from descendants are reported too, with
    /// `false`.
    fn on_body_transition_end(&self, namespace: &str, handler: TransitionEndHandler);

    /// Drop every handler registered under `namespace`.
    fn off_all_in_namespace(&self, namespace: &str);
}
