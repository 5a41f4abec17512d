//! Builder for constructing transitioners.

use crate::builder::error::BuildError;
use crate::core::{Page, TransitionHistory};
use crate::host::{BodyBinder, FlushScheduler};
use crate::machine::{OptionsPatch, Transitioner, DEFAULT_HISTORY_LIMIT};
use crate::reactive::Tracker;
use std::marker::PhantomData;
use std::rc::Rc;

/// Builder for constructing a [`Transitioner`] with a fluent API.
///
/// # Example
///
/// ```
/// use transitioner::builder::TransitionerBuilder;
/// use transitioner::host::MemoryBody;
/// use transitioner::machine::OptionsPatch;
/// use transitioner::reactive::Tracker;
/// use std::rc::Rc;
///
/// let tracker = Tracker::new();
/// let transitioner = TransitionerBuilder::<String>::new()
///     .tracker(&tracker)
///     .body(Rc::new(MemoryBody::new()))
///     .options(OptionsPatch::new().redraw_after_transition(false))
///     .build()
///     .unwrap();
///
/// assert!(!transitioner.options().redraw_after_transition);
/// ```
pub struct TransitionerBuilder<P: Page> {
    scheduler: Option<Rc<dyn FlushScheduler>>,
    body: Option<Rc<dyn BodyBinder>>,
    options: OptionsPatch,
    history_limit: Option<usize>,
    _phantom: PhantomData<P>,
}

impl<P: Page> TransitionerBuilder<P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            scheduler: None,
            body: None,
            options: OptionsPatch::new(),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            _phantom: PhantomData,
        }
    }

    /// Set the after-flush scheduler (required).
    pub fn scheduler<S: FlushScheduler + 'static>(mut self, scheduler: S) -> Self {
        self.scheduler = Some(Rc::new(scheduler) as Rc<dyn FlushScheduler>);
        self
    }

    /// Use `tracker` as the after-flush scheduler.
    pub fn tracker(self, tracker: &Tracker) -> Self {
        self.scheduler(tracker.clone())
    }

    /// Set the body binder (required).
    pub fn body<B: BodyBinder + 'static>(mut self, body: Rc<B>) -> Self {
        self.body = Some(body as Rc<dyn BodyBinder>);
        self
    }

    /// Options applied before the transitioner is returned. Repeated calls
    /// merge, later keys winning.
    pub fn options(mut self, patch: OptionsPatch) -> Self {
        self.options = self.options.and(patch);
        self
    }

    /// Keep at most `limit` completed transitions.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Keep every completed transition.
    pub fn unbounded_history(mut self) -> Self {
        self.history_limit = None;
        self
    }

    /// Build the transitioner.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Transitioner<P>, BuildError> {
        let scheduler = self.scheduler.ok_or(BuildError::MissingScheduler)?;
        let body = self.body.ok_or(BuildError::MissingBody)?;

        let history = match self.history_limit {
            Some(limit) => TransitionHistory::bounded(limit),
            None => TransitionHistory::new(),
        };

        let transitioner = Transitioner::with_history(scheduler, body, history);
        transitioner.set_options(self.options);
        Ok(transitioner)
    }
}

impl<P: Page> Default for TransitionerBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}
