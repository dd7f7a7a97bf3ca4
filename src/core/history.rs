//! Funnel history: the ordered, never-empty sequence of visited states.
//!
//! History is immutable. `pushed` and `replaced` return a new history,
//! leaving the receiver untouched, so a snapshot handed to the UI layer
//! never changes underneath it.

use super::state::{Context, FunnelState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when building a history from an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("funnel history cannot be empty")]
pub struct EmptyHistory;

/// Ordered history of funnel states, oldest first.
///
/// Always holds at least one state, and the current state is always the
/// last one: `current_index() == len() - 1`. Moving backward in a funnel
/// means deriving a shorter history, not moving a pointer.
///
/// # Example
///
/// ```rust
/// use funnel::core::{FunnelHistory, FunnelState};
/// use serde_json::json;
///
/// let history = FunnelHistory::new(FunnelState::new("A", json!({})));
/// let history = history.pushed(FunnelState::new("B", json!({ "x": 1 })));
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.current_index(), 1);
///
/// let history = history.replaced(FunnelState::new("C", json!({ "x": 2 })));
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.current().step, "C");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", try_from = "Vec<FunnelState<C>>", into = "Vec<FunnelState<C>>")]
pub struct FunnelHistory<C: Context> {
    states: Vec<FunnelState<C>>,
}

impl<C: Context> FunnelHistory<C> {
    /// Start a history at `initial`.
    pub fn new(initial: FunnelState<C>) -> Self {
        Self {
            states: vec![initial],
        }
    }

    /// Build a history from recorded states, or `None` if there are none.
    pub fn from_states(states: Vec<FunnelState<C>>) -> Option<Self> {
        if states.is_empty() {
            None
        } else {
            Some(Self { states })
        }
    }

    /// Append `state` as the new current state, returning a new history.
    pub fn pushed(&self, state: FunnelState<C>) -> Self {
        let mut states = self.states.clone();
        states.push(state);
        Self { states }
    }

    /// Overwrite the current state with `state`, returning a new history.
    ///
    /// The history is cut at the current index and `state` takes its
    /// place, so the length is unchanged.
    pub fn replaced(&self, state: FunnelState<C>) -> Self {
        let mut states = self.states[..self.current_index()].to_vec();
        states.push(state);
        Self { states }
    }

    /// Position of the current state. Always `len() - 1`.
    pub fn current_index(&self) -> usize {
        self.states.len() - 1
    }

    /// The current (last) state.
    pub fn current(&self) -> &FunnelState<C> {
        &self.states[self.current_index()]
    }

    /// The first state of the funnel session.
    pub fn first(&self) -> &FunnelState<C> {
        &self.states[0]
    }

    pub fn get(&self, index: usize) -> Option<&FunnelState<C>> {
        self.states.get(index)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn states(&self) -> &[FunnelState<C>] {
        &self.states
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FunnelState<C>> {
        self.states.iter()
    }

    /// Step names in order, oldest first.
    pub fn steps(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.step.as_str()).collect()
    }
}

impl<C: Context> TryFrom<Vec<FunnelState<C>>> for FunnelHistory<C> {
    type Error = EmptyHistory;

    fn try_from(states: Vec<FunnelState<C>>) -> Result<Self, Self::Error> {
        Self::from_states(states).ok_or(EmptyHistory)
    }
}

impl<C: Context> From<FunnelHistory<C>> for Vec<FunnelState<C>> {
    fn from(history: FunnelHistory<C>) -> Self {
        history.states
    }
}

impl<'a, C: Context> IntoIterator for &'a FunnelHistory<C> {
    type Item = &'a FunnelState<C>;
    type IntoIter = std::slice::Iter<'a, FunnelState<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
