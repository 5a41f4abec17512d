//! Transitioner: reactive page-transition coordination for single-page apps.
//!
//! The transitioner sits in front of the router. It exposes the page on
//! screen and the page being transitioned to as reactive values, and marks
//! the document body with classes a stylesheet animates:
//!
//! ```text
//! body.transitioning.from_X.to_Y
//! ```
//!
//! A transition ends when the body reports its CSS transition finished, or
//! early when a newer navigation arrives.
//!
//! # Core Concepts
//!
//! - **Page**: identifier of a logical view via the `Page` trait
//! - **Reactive slots**: values whose readers rerun when they change
//! - **Host contracts**: router signal, after-flush scheduler and body binder
//! - **History**: immutable record of completed transitions
//!
//! # Example
//!
//! ```rust
//! use transitioner::host::MemoryBody;
//! use transitioner::machine::Transitioner;
//! use transitioner::reactive::{ReactiveSlot, Tracker};
//! use std::rc::Rc;
//!
//! let tracker = Tracker::new();
//! let body = Rc::new(MemoryBody::new());
//! let route = Rc::new(ReactiveSlot::new("home".to_string()));
//!
//! let transitioner = Transitioner::new(Rc::new(tracker.clone()), body.clone());
//! let r = Rc::clone(&route);
//! transitioner.listen(&tracker, move || r.get()).unwrap();
//!
//! route.set("about".to_string(), true);
//! tracker.flush();
//! assert_eq!(transitioner.next_page(), Some("about".to_string()));
//! assert!(body.has_class("transitioning"));
//!
//! body.fire_transition_end(true);
//! tracker.flush();
//! assert_eq!(transitioner.current_page(), Some("about".to_string()));
//! assert!(!body.has_class("transitioning"));
//! ```

pub mod builder;
pub mod core;
pub mod host;
pub mod machine;
pub mod reactive;

// Re-export commonly used types
pub use builder::{start, TransitionerBuilder};
pub use crate::core::{Page, TransitionHistory, TransitionPhase, TransitionRecord};
pub use machine::{Options, OptionsPatch, Transitioner, TransitionerError};
