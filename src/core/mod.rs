//! Core page-transition types.
//!
//! This module contains the plain data of the transition machine:
//! - Page identifiers via the `Page` trait
//! - Lifecycle phases
//! - Body class names for a transition
//! - Immutable history of completed transitions
//!
//! Nothing in this module touches the reactive runtime or the DOM.

mod classes;
mod history;
mod page;
mod phase;

pub use classes::{TransitionClasses, TRANSITIONING_CLASS};
pub use history::{TransitionHistory, TransitionRecord};
pub use page::Page;
pub use phase::{slots_consistent, TransitionPhase};
