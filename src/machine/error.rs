//! Transitioner error types.

use thiserror::Error;

/// Errors returned by [`Transitioner`](crate::machine::Transitioner)
/// operations.
///
/// Redundant requests (completing with nothing in flight, navigating to the
/// page already shown, completion events bubbling from descendants) are not
/// errors; they are ignored.
#[derive(Debug, Error)]
pub enum TransitionerError {
    /// `listen` may only subscribe to one page source
    #[error("Transitioner is already listening to a page source")]
    AlreadyListening,

    /// Options JSON could not be parsed
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
