//! Minimal single-threaded reactive runtime.
//!
//! Computations are bodies that record which values they read; writing a
//! value with notification invalidates its readers, and the [`Tracker`]
//! reruns them on the next flush. After-flush tasks give the transition
//! machine a point where the DOM reflects every recomputation triggered so
//! far.
//!
//! Any other reactive engine can stand in for this one as long as it offers
//! the same read/invalidate contract and an after-flush hook via
//! [`FlushScheduler`](crate::host::FlushScheduler).

mod slot;
mod tracker;

pub use slot::{Dependency, ReactiveSlot};
pub use tracker::{current, is_tracking, untracked, Computation, Tracker};
