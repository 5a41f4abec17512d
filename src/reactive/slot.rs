//! Dependency sets and the reactive value slot built on them.

use super::tracker::{current, Computation};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Dependents = RefCell<Vec<Computation>>;

/// Set of computations interested in some piece of state.
///
/// A registration lasts for one run of the computation: whatever
/// invalidates it also removes it here, so a rerun that stops reading this
/// state stops being notified by it.
#[derive(Default)]
pub struct Dependency {
    dependents: Rc<Dependents>,
}

impl Dependency {
    /// Create a dependency with no registered computations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the running computation, if any.
    ///
    /// Returns true if a computation was newly registered.
    pub fn depend(&self) -> bool {
        let Some(computation) = current() else {
            return false;
        };
        let id = computation.id();
        {
            let mut dependents = self.dependents.borrow_mut();
            if dependents.iter().any(|c| c.id() == id) {
                return false;
            }
            dependents.push(computation.clone());
        }
        let dependents: Weak<Dependents> = Rc::downgrade(&self.dependents);
        computation.on_invalidate(move || {
            if let Some(dependents) = dependents.upgrade() {
                dependents.borrow_mut().retain(|c| c.id() != id);
            }
        });
        true
    }

    /// Invalidate and forget every registered computation.
    pub fn invalidate_all(&self) {
        let dependents = std::mem::take(&mut *self.dependents.borrow_mut());
        for computation in dependents {
            computation.invalidate();
        }
    }

    /// True if a live computation is registered.
    pub fn has_dependents(&self) -> bool {
        self.dependents
            .borrow()
            .iter()
            .any(|c| !c.is_invalidated() && !c.is_stopped())
    }
}

/// A value paired with the computations that read it.
///
/// Reading with [`get`](Self::get) from inside a computation registers it;
/// [`peek`](Self::peek) never does. Writing only invalidates readers when
/// asked to, so the owner decides which writes are worth a recompute.
///
/// # Example
///
/// ```rust
/// use transitioner::reactive::{ReactiveSlot, Tracker};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let tracker = Tracker::new();
/// let slot = Rc::new(ReactiveSlot::new("home".to_string()));
/// let runs = Rc::new(Cell::new(0));
///
/// let (s, r) = (Rc::clone(&slot), Rc::clone(&runs));
/// tracker.autorun(move |_| {
///     s.get();
///     r.set(r.get() + 1);
/// });
///
/// slot.set("about".to_string(), false);
/// tracker.flush();
/// assert_eq!(runs.get(), 1); // silent write
/// assert_eq!(slot.peek(), "about");
///
/// slot.set("contact".to_string(), true);
/// tracker.flush();
/// assert_eq!(runs.get(), 2);
/// ```
#[derive(Default)]
pub struct ReactiveSlot<T> {
    value: RefCell<T>,
    dependency: Dependency,
}

impl<T: Clone> ReactiveSlot<T> {
    /// Create a slot holding `value`, with no readers.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            dependency: Dependency::new(),
        }
    }

    /// Register the running computation and return the value.
    pub fn get(&self) -> T {
        self.dependency.depend();
        self.peek()
    }

    /// Return the value without registering anything.
    pub fn peek(&self) -> T {
        self.value.borrow().clone()
    }

    /// Replace the value, invalidating readers only if `notify` is set.
    pub fn set(&self, value: T, notify: bool) {
        *self.value.borrow_mut() = value;
        if notify {
            self.dependency.invalidate_all();
        }
    }

    /// True if a live computation has read the slot since its last rerun.
    pub fn has_dependents(&self) -> bool {
        self.dependency.has_dependents()
    }
}
