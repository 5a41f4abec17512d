//! Body class names identifying a transition.

use super::page::Page;
use std::fmt;

/// Marker class present on the body for the whole transition window.
pub const TRANSITIONING_CLASS: &str = "transitioning";

/// The class set a stylesheet keys transition animations on:
/// `transitioning from_<from> to_<to>`.
///
/// Computed once per transition and kept, so that removal undoes exactly
/// what was added even if the pages have moved on since.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionClasses {
    from: String,
    to: String,
}

impl TransitionClasses {
    /// Classes for a transition from `from` to `to`.
    ///
    /// Whitespace in a page name becomes `_`, so each page always maps to a
    /// single class.
    pub fn new<P: Page>(from: &P, to: &P) -> Self {
        Self {
            from: format!("from_{}", class_safe(from.name())),
            to: format!("to_{}", class_safe(to.name())),
        }
    }

    /// Individual class names, in the order they appear in the string form.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [TRANSITIONING_CLASS, self.from.as_str(), self.to.as_str()].into_iter()
    }
}

fn class_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

impl fmt::Display for TransitionClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", TRANSITIONING_CLASS, self.from, self.to)
    }
}
