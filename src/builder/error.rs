//! Build errors for the transitioner builder.

use thiserror::Error;

/// Errors that can occur when building a transitioner.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Flush scheduler not specified. Call .scheduler(s) or .tracker(t) before .build()")]
    MissingScheduler,

    #[error("Body binder not specified. Call .body(b) before .build()")]
    MissingBody,
}
