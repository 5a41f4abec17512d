//! Completed-transition history tracking.
//!
//! Provides immutable tracking of page transitions over time. Records are
//! appended when a transition completes, whether by its completion event or
//! by being forced. A history may be bounded, keeping only the newest
//! records, since the machine runs for the application's whole life.

use super::page::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use transitioner::core::TransitionRecord;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let record = TransitionRecord {
///     from: "home".to_string(),
///     to: "about".to_string(),
///     started_at: now,
///     completed_at: now,
///     forced: false,
/// };
/// assert_eq!(record.elapsed(), std::time::Duration::ZERO);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<P: Page> {
    /// The page being transitioned from
    pub from: P,
    /// The page being transitioned to
    pub to: P,
    /// When the next page was set
    pub started_at: DateTime<Utc>,
    /// When the next page became current
    pub completed_at: DateTime<Utc>,
    /// Completed without its transition-end event, either pre-empted by a
    /// newer request or forced after stalling
    pub forced: bool,
}

impl<P: Page> TransitionRecord<P> {
    /// Wall time between start and completion.
    pub fn elapsed(&self) -> Duration {
        self.completed_at
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Ordered history of completed transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
///
/// # Example
///
/// ```rust
/// use transitioner::core::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let history = TransitionHistory::new()
///     .record(TransitionRecord {
///         from: "home".to_string(),
///         to: "about".to_string(),
///         started_at: now,
///         completed_at: now,
///         forced: false,
///     })
///     .record(TransitionRecord {
///         from: "about".to_string(),
///         to: "contact".to_string(),
///         started_at: now,
///         completed_at: now,
///         forced: true,
///     });
///
/// assert_eq!(history.get_path().len(), 3); // home -> about -> contact
/// assert_eq!(history.forced_count(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<P: Page> {
    transitions: Vec<TransitionRecord<P>>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<P: Page> Default for TransitionHistory<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Page> TransitionHistory<P> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched. A bounded history drops its
    /// oldest records to stay within the limit.
    pub fn record(&self, transition: TransitionRecord<P>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = transitions.len().saturating_sub(limit);
            transitions.drain(..excess);
        }
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// Get the path of pages traversed.
    ///
    /// Returns the first `from` page, then the `to` page of each transition.
    pub fn get_path(&self) -> Vec<&P> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration from the first start to the last completion.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.completed_at.signed_duration_since(first.started_at);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of transitions completed without their transition-end event.
    pub fn forced_count(&self) -> usize {
        self.transitions.iter().filter(|t| t.forced).count()
    }

    /// Get all transitions, oldest first.
    pub fn transitions(&self) -> &[TransitionRecord<P>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str, started_at: DateTime<Utc>) -> TransitionRecord<String> {
        TransitionRecord {
            from: from.to_string(),
            to: to.to_string(),
            started_at,
            completed_at: Utc::now(),
            forced: false,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: TransitionHistory<String> = TransitionHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = TransitionHistory::new();
        let new_history = history.record(record("home", "about", Utc::now()));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_page_sequence() {
        let history = TransitionHistory::new()
            .record(record("home", "about", Utc::now()))
            .record(record("about", "contact", Utc::now()));

        let path = history.get_path();
        assert_eq!(path, vec!["home", "about", "contact"]);
    }

    #[test]
    fn duration_spans_first_start_to_last_completion() {
        let start = Utc::now();
        let history = TransitionHistory::new().record(record("home", "about", start));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(record("about", "contact", Utc::now()));

        let duration = history.duration();
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn bounded_history_keeps_newest_records() {
        let history = TransitionHistory::bounded(2)
            .record(record("a", "b", Utc::now()))
            .record(record("b", "c", Utc::now()))
            .record(record("c", "d", Utc::now()));

        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.get_path(), vec!["b", "c", "d"]);
    }

    #[test]
    fn forced_transitions_are_counted() {
        let mut cut_short = record("a", "b", Utc::now());
        cut_short.forced = true;

        let history = TransitionHistory::new()
            .record(cut_short)
            .record(record("b", "c", Utc::now()));

        assert_eq!(history.forced_count(), 1);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = TransitionHistory::new().record(record("home", "about", Utc::now()));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TransitionHistory<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
