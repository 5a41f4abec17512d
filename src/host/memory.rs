//! In-memory body binder.

use super::{BodyBinder, TransitionEndHandler};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// One change made to a [`MemoryBody`], in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyMutation {
    /// Classes added, as passed to `add_body_classes`
    Added(String),
    /// Classes removed, as passed to `remove_body_classes`
    Removed(String),
    /// Handler registered under a namespace
    Subscribed(String),
    /// All handlers under a namespace dropped
    Unsubscribed(String),
}

/// Body stand-in that keeps a class set and namespaced handlers in memory.
///
/// Transition-end events are simulated with [`fire_transition_end`].
///
/// [`fire_transition_end`]: MemoryBody::fire_transition_end
#[derive(Default)]
pub struct MemoryBody {
    classes: RefCell<BTreeSet<String>>,
    handlers: RefCell<Vec<(String, TransitionEndHandler)>>,
    mutations: RefCell<Vec<BodyMutation>>,
}

impl MemoryBody {
    /// Create a body with no classes or handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current classes, sorted.
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    /// True if `class` is currently on the body.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    /// Number of registered transition-end handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Every class and handler change so far, oldest first.
    pub fn mutations(&self) -> Vec<BodyMutation> {
        self.mutations.borrow().clone()
    }

    /// Forget the recorded changes.
    pub fn clear_mutations(&self) {
        self.mutations.borrow_mut().clear();
    }

    /// Deliver one transition-end event to every registered handler.
    ///
    /// Returns how many handlers were called. Handlers may register or drop
    /// handlers while being called; those changes apply to the next event.
    pub fn fire_transition_end(&self, target_is_body: bool) -> usize {
        let handlers: Vec<TransitionEndHandler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in &handlers {
            handler(target_is_body);
        }
        handlers.len()
    }
}

impl BodyBinder for MemoryBody {
    fn add_body_classes(&self, classes: &str) {
        self.classes
            .borrow_mut()
            .extend(classes.split_whitespace().map(str::to_string));
        self.mutations
            .borrow_mut()
            .push(BodyMutation::Added(classes.to_string()));
    }

    fn remove_body_classes(&self, classes: &str) {
        let mut current = self.classes.borrow_mut();
        for class in classes.split_whitespace() {
            current.remove(class);
        }
        self.mutations
            .borrow_mut()
            .push(BodyMutation::Removed(classes.to_string()));
    }

    fn on_body_transition_end(&self, namespace: &str, handler: TransitionEndHandler) {
        self.handlers
            .borrow_mut()
            .push((namespace.to_string(), handler));
        self.mutations
            .borrow_mut()
            .push(BodyMutation::Subscribed(namespace.to_string()));
    }

    fn off_all_in_namespace(&self, namespace: &str) {
        self.handlers.borrow_mut().retain(|(ns, _)| ns != namespace);
        self.mutations
            .borrow_mut()
            .push(BodyMutation::Unsubscribed(namespace.to_string()));
    }
}
