//! Funnel states: a step name paired with its context payload.
//!
//! States are immutable values. Every transition produces a new
//! `FunnelState`; nothing in this crate edits one in place.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Bound for context payloads carried by funnel states.
///
/// Contexts travel through the host's per-entry payload, so they must
/// round-trip through serde. Any type meeting the bounds is a context;
/// `serde_json::Value` is the catch-all for funnels whose steps carry
/// differently shaped data.
pub trait Context:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}

impl<T> Context for T where
    T: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}

/// One position in a funnel: which step, and the data that step holds.
///
/// Serialized as `{"step": ..., "context": ...}`, the shape stored in the
/// navigation entry's history array.
///
/// # Example
///
/// ```rust
/// use funnel::core::FunnelState;
/// use serde_json::json;
///
/// let state = FunnelState::new("email", json!({ "email": "a@b.c" }));
/// assert_eq!(state.step, "email");
/// assert_eq!(state.context["email"], "a@b.c");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FunnelState<C: Context = Value> {
    /// Name of the step this state represents
    pub step: String,
    /// Payload associated with the step
    pub context: C,
}

impl<C: Context> FunnelState<C> {
    /// Create a state for `step` carrying `context`.
    pub fn new(step: impl Into<String>, context: C) -> Self {
        Self {
            step: step.into(),
            context,
        }
    }

    /// Same step, different context.
    pub fn with_context(&self, context: C) -> Self {
        Self {
            step: self.step.clone(),
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Signup {
        email: Option<String>,
        password: Option<String>,
    }

    #[test]
    fn new_sets_step_and_context() {
        let state = FunnelState::new("email", json!({}));

        assert_eq!(state.step, "email");
        assert_eq!(state.context, json!({}));
    }

    #[test]
    fn with_context_keeps_step() {
        let state = FunnelState::new(
            "password",
            Signup {
                email: Some("a@b.c".to_string()),
                password: None,
            },
        );
        let next = state.with_context(Signup {
            email: Some("a@b.c".to_string()),
            password: Some("hunter2".to_string()),
        });

        assert_eq!(next.step, "password");
        assert_eq!(next.context.password.as_deref(), Some("hunter2"));
        assert_eq!(state.context.password, None);
    }

    #[test]
    fn serializes_as_step_and_context_object() {
        let state = FunnelState::new("B", json!({ "x": 1 }));

        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value, json!({ "step": "B", "context": { "x": 1 } }));
    }

    #[test]
    fn typed_context_round_trips() {
        let state = FunnelState::new(
            "email",
            Signup {
                email: None,
                password: None,
            },
        );

        let json = serde_json::to_string(&state).unwrap();
        let decoded: FunnelState<Signup> = serde_json::from_str(&json).unwrap();

        assert_eq!(state, decoded);
    }

    #[test]
    fn states_compare_by_step_and_context() {
        let a = FunnelState::new("A", json!({}));
        let b = FunnelState::new("A", json!({}));
        let c = FunnelState::new("A", json!({ "x": 1 }));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
