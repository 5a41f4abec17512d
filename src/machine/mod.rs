//! The transition machine and its configuration.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --first page--> Idle(current)
//! Idle(current) --different page--> Transitioning(current, next)
//! Transitioning --body transition end / newer request--> Idle(next)
//! ```
//!
//! Starting a transition writes the next page first, so readers can render
//! the incoming page, and adds the body classes only after the flush that
//! follows. Completing writes the new current page and clears the next one;
//! class removal and the `after` hook again wait for the flush.

mod error;
mod options;
mod transitioner;

pub use error::TransitionerError;
pub use options::{Hook, Options, OptionsPatch};
pub use transitioner::{Transitioner, DEFAULT_HISTORY_LIMIT, NAMESPACE};
