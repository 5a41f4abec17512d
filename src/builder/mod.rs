//! Builder API for wiring a transitioner into an application.
//!
//! This module provides a fluent builder, a startup helper and the
//! `page_enum!` macro for declaring pages with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::TransitionerBuilder;

use crate::core::Page;
use crate::host::{BodyBinder, PageSource};
use crate::machine::{Transitioner, TransitionerError};
use crate::reactive::{Computation, Tracker};
use std::rc::Rc;

/// Create a transitioner on `tracker` and `body` and start it following
/// `source`. Call once, at application startup, once the router is ready.
///
/// The returned computation can be stopped to detach from the source.
///
/// # Example
///
/// ```
/// use transitioner::builder::start;
/// use transitioner::host::MemoryBody;
/// use transitioner::reactive::{ReactiveSlot, Tracker};
/// use std::rc::Rc;
///
/// let tracker = Tracker::new();
/// let route = Rc::new(ReactiveSlot::new("home".to_string()));
///
/// let r = Rc::clone(&route);
/// let (transitioner, _computation) =
///     start(&tracker, Rc::new(MemoryBody::new()), move || r.get()).unwrap();
///
/// assert_eq!(transitioner.current_page(), Some("home".to_string()));
/// ```
pub fn start<P, B, S>(
    tracker: &Tracker,
    body: Rc<B>,
    source: S,
) -> Result<(Transitioner<P>, Computation), TransitionerError>
where
    P: Page,
    B: BodyBinder + 'static,
    S: PageSource<P> + 'static,
{
    let transitioner = Transitioner::new(Rc::new(tracker.clone()), body);
    let computation = transitioner.listen(tracker, source)?;
    Ok((transitioner, computation))
}
