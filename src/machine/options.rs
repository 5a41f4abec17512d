//! Transition hooks and redraw configuration.

use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// Synchronous callback run around a transition.
pub type Hook = Rc<dyn Fn()>;

/// Live configuration of a [`Transitioner`](crate::machine::Transitioner).
#[derive(Clone)]
pub struct Options {
    /// Called right before the transition classes are added to the body
    pub before: Hook,
    /// Called right after the transition classes are removed from the body
    pub after: Hook,
    /// Notify current/next page readers when a transition completes
    pub redraw_after_transition: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            before: Rc::new(|| {}),
            after: Rc::new(|| {}),
            redraw_after_transition: true,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("redraw_after_transition", &self.redraw_after_transition)
            .finish_non_exhaustive()
    }
}

impl Options {
    /// Apply every key present in `patch`; absent keys keep their value.
    pub fn merge(&mut self, patch: OptionsPatch) {
        if let Some(before) = patch.before {
            self.before = before;
        }
        if let Some(after) = patch.after {
            self.after = after;
        }
        if let Some(redraw) = patch.redraw_after_transition {
            self.redraw_after_transition = redraw;
        }
    }
}

/// Partial [`Options`] for shallow merging.
///
/// The data-only keys deserialize from JSON, accepting both
/// `redrawAfterTransition` and `redraw_after_transition`. Unknown keys are
/// ignored.
///
/// # Example
///
/// ```rust
/// use transitioner::machine::{Options, OptionsPatch};
///
/// let mut options = Options::default();
/// options.merge(OptionsPatch::new().redraw_after_transition(false));
/// assert!(!options.redraw_after_transition);
///
/// let patch: OptionsPatch = serde_json::from_str(r#"{"redrawAfterTransition": true}"#).unwrap();
/// options.merge(patch);
/// assert!(options.redraw_after_transition);
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    #[serde(skip)]
    before: Option<Hook>,
    #[serde(skip)]
    after: Option<Hook>,
    #[serde(default, alias = "redraw_after_transition")]
    redraw_after_transition: Option<bool>,
}

impl fmt::Debug for OptionsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("redraw_after_transition", &self.redraw_after_transition)
            .finish()
    }
}

impl OptionsPatch {
    /// Create an empty patch that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hook run right before classes are added.
    pub fn before(mut self, hook: impl Fn() + 'static) -> Self {
        self.before = Some(Rc::new(hook));
        self
    }

    /// Set the hook run after classes are removed.
    pub fn after(mut self, hook: impl Fn() + 'static) -> Self {
        self.after = Some(Rc::new(hook));
        self
    }

    /// Set whether completion notifies page readers.
    pub fn redraw_after_transition(mut self, redraw: bool) -> Self {
        self.redraw_after_transition = Some(redraw);
        self
    }

    /// Fold `other` into this patch; keys set in `other` win.
    pub fn and(mut self, other: OptionsPatch) -> Self {
        if other.before.is_some() {
            self.before = other.before;
        }
        if other.after.is_some() {
            self.after = other.after;
        }
        if other.redraw_after_transition.is_some() {
            self.redraw_after_transition = other.redraw_after_transition;
        }
        self
    }
}
