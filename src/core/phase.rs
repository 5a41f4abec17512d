//! Lifecycle phases of the transition machine.

use super::page::Page;
use serde::{Deserialize, Serialize};

/// Where the machine currently is.
///
/// `Uninitialized` only exists before the first page is ever set. After that
/// the machine alternates between `Idle` and `Transitioning` for the rest of
/// the application's life; there is no terminal phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TransitionPhase<P: Page> {
    /// No page has been shown yet
    Uninitialized,

    /// Showing `current`, nothing in flight
    Idle { current: P },

    /// Animating from `from` to `to`
    Transitioning { from: P, to: P },
}

impl<P: Page> TransitionPhase<P> {
    /// Build the phase from the two slot values.
    ///
    /// Returns `None` for combinations the machine never produces: a pending
    /// page without a current one, or a pending page equal to the current.
    pub fn from_slots(current: Option<P>, next: Option<P>) -> Option<Self> {
        if !slots_consistent(current.as_ref(), next.as_ref()) {
            return None;
        }
        Some(match (current, next) {
            (Some(from), Some(to)) => Self::Transitioning { from, to },
            (Some(current), None) => Self::Idle { current },
            _ => Self::Uninitialized,
        })
    }

    /// Name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Idle { .. } => "Idle",
            Self::Transitioning { .. } => "Transitioning",
        }
    }

    /// True if a next page is pending.
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    /// The page shown on screen, if any.
    pub fn current(&self) -> Option<&P> {
        match self {
            Self::Uninitialized => None,
            Self::Idle { current } => Some(current),
            Self::Transitioning { from, .. } => Some(from),
        }
    }
}

/// A pending page requires a current page, and the two must differ.
pub fn slots_consistent<P: PartialEq>(current: Option<&P>, next: Option<&P>) -> bool {
    match (current, next) {
        (_, None) => true,
        (Some(current), Some(next)) => current != next,
        (None, Some(_)) => false,
    }
}
