//! Pure projection between a navigation entry and a funnel.
//!
//! Reading derives a funnel history from an entry; writing derives the
//! entry that should replace or follow it. Both directions only touch the
//! funnel's own keys and carry every other query parameter and payload key
//! through untouched.

use super::keys::FunnelKeys;
use crate::core::{Context, FunnelError, FunnelHistory, FunnelState};
use crate::navigation::{EntryState, NavigateMode, NavigationEntry, SearchParams};
use serde_json::Value;

/// The state the entry says is current, or `initial` when the entry does
/// not carry a complete one.
///
/// Step and context must both be present and decodable. Anything less,
/// such as a hand-edited URL whose payload was lost, yields `initial`
/// unchanged rather than a mix of the two.
pub fn current_state<C: Context>(
    keys: &FunnelKeys,
    entry: &NavigationEntry,
    initial: &FunnelState<C>,
) -> FunnelState<C> {
    let step = entry.search.get(keys.step());
    let context = entry.state.get(keys.context()).filter(|context| !context.is_null());

    match (step, context) {
        (Some(step), Some(context)) => match serde_json::from_value::<C>(context.clone()) {
            Ok(context) => FunnelState::new(step, context),
            Err(err) => {
                tracing::trace!(funnel = %keys.id(), error = %err, "Undecodable context, using initial state");
                initial.clone()
            }
        },
        (None, None) => initial.clone(),
        _ => {
            tracing::trace!(
                funnel = %keys.id(),
                has_step = step.is_some(),
                has_context = context.is_some(),
                "Partial funnel state, using initial state"
            );
            initial.clone()
        }
    }
}

/// Derive the full funnel history from an entry.
///
/// A recorded, non-empty, decodable history array is used verbatim.
/// Otherwise the history is the current state alone.
pub fn reconstruct<C: Context>(
    keys: &FunnelKeys,
    entry: &NavigationEntry,
    initial: &FunnelState<C>,
) -> FunnelHistory<C> {
    if let Some(recorded) = entry.state.get(keys.histories()).and_then(decode_history::<C>) {
        return recorded;
    }
    FunnelHistory::new(current_state(keys, entry, initial))
}

fn decode_history<C: Context>(value: &Value) -> Option<FunnelHistory<C>> {
    let states: Vec<FunnelState<C>> = serde_json::from_value(value.clone()).ok()?;
    FunnelHistory::from_states(states)
}

/// Compute the query and payload that advance (`Push`) or rewrite
/// (`Replace`) the funnel to `state`.
///
/// The history written is derived from `entry` itself: extended by `state`
/// on push, cut at the current index and then extended on replace.
pub fn transition<C: Context>(
    keys: &FunnelKeys,
    entry: &NavigationEntry,
    initial: &FunnelState<C>,
    state: &FunnelState<C>,
    mode: NavigateMode,
) -> Result<(SearchParams, EntryState), FunnelError> {
    let history = reconstruct(keys, entry, initial);
    let next = match mode {
        NavigateMode::Push => history.pushed(state.clone()),
        NavigateMode::Replace => history.replaced(state.clone()),
    };

    let context = serde_json::to_value(&state.context).map_err(|source| FunnelError::Encode {
        key: keys.context().to_string(),
        source,
    })?;
    let histories = serde_json::to_value(&next).map_err(|source| FunnelError::Encode {
        key: keys.histories().to_string(),
        source,
    })?;

    let mut search = entry.search.clone();
    search.set(keys.step(), state.step.as_str());

    let mut payload = entry.state.clone();
    payload.insert(keys.context(), context);
    payload.insert(keys.histories(), histories);

    Ok((search, payload))
}

/// Compute the entry with every trace of the funnel removed, or `None` if
/// the entry does not carry the funnel's complete state.
pub fn strip(keys: &FunnelKeys, entry: &NavigationEntry) -> Option<(SearchParams, EntryState)> {
    let present = entry.search.has(keys.step())
        && entry.state.contains(keys.context())
        && entry.state.contains(keys.histories());
    if !present {
        return None;
    }

    let mut search = entry.search.clone();
    search.delete(keys.step());

    let mut payload = entry.state.clone();
    payload.remove(keys.context());
    payload.remove(keys.histories());

    Some((search, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    fn keys() -> FunnelKeys {
        FunnelKeys::new("f")
    }

    fn initial() -> FunnelState {
        FunnelState::new("A", json!({}))
    }

    fn entry(query: &str, payload: Value) -> NavigationEntry {
        let state = match payload {
            Value::Object(map) => EntryState::from(map),
            _ => EntryState::new(),
        };
        NavigationEntry::new(SearchParams::parse(query).unwrap(), state)
    }

    #[test]
    fn blank_entry_yields_initial_state() {
        let history = reconstruct(&keys(), &NavigationEntry::blank(), &initial());

        assert_eq!(history, FunnelHistory::new(initial()));
    }

    #[test]
    fn step_and_context_yield_current_state() {
        let entry = entry("f.step=B", json!({ "f.context": { "x": 1 } }));

        let state = current_state(&keys(), &entry, &initial());

        assert_eq!(state, FunnelState::new("B", json!({ "x": 1 })));
    }

    #[test]
    fn step_without_context_falls_back_entirely() {
        let entry = entry("f.step=B", json!({}));

        assert_eq!(current_state(&keys(), &entry, &initial()), initial());
    }

    #[test]
    fn context_without_step_falls_back_entirely() {
        let entry = entry("", json!({ "f.context": { "x": 1 } }));

        assert_eq!(current_state(&keys(), &entry, &initial()), initial());
    }

    #[test]
    fn null_context_falls_back_entirely() {
        let entry = entry("f.step=B", json!({ "f.context": null }));

        assert_eq!(current_state(&keys(), &entry, &initial()), initial());
    }

    #[test]
    fn undecodable_context_falls_back() {
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        struct Typed {
            count: u32,
        }

        let entry = entry("f.step=B", json!({ "f.context": "not an object" }));
        let initial = FunnelState::new("A", Typed { count: 0 });

        assert_eq!(current_state(&keys(), &entry, &initial), initial);
    }

    #[test]
    fn recorded_history_is_used_verbatim() {
        let entry = entry(
            "f.step=B",
            json!({
                "f.context": { "x": 1 },
                "f.histories": [
                    { "step": "A", "context": {} },
                    { "step": "B", "context": { "x": 1 } }
                ]
            }),
        );

        let history = reconstruct(&keys(), &entry, &initial());

        assert_eq!(history.steps(), vec!["A", "B"]);
        assert_eq!(history.current_index(), 1);
    }

    #[test]
    fn empty_or_malformed_history_is_ignored() {
        for histories in [json!([]), json!("nope"), json!([{ "step": 1 }])] {
            let entry = entry(
                "f.step=B",
                json!({ "f.context": { "x": 1 }, "f.histories": histories }),
            );

            let history = reconstruct(&keys(), &entry, &initial());

            assert_eq!(history.len(), 1);
            assert_eq!(history.current(), &FunnelState::new("B", json!({ "x": 1 })));
        }
    }

    #[test]
    fn push_transition_extends_history_and_keeps_foreign_keys() {
        let entry = entry("tab=2", json!({ "scroll": 40 }));
        let next = FunnelState::new("B", json!({ "x": 1 }));

        let (search, payload) =
            transition(&keys(), &entry, &initial(), &next, NavigateMode::Push).unwrap();

        assert_eq!(search.get("tab"), Some("2"));
        assert_eq!(search.get("f.step"), Some("B"));
        assert_eq!(payload.get("scroll"), Some(&json!(40)));
        assert_eq!(payload.get("f.context"), Some(&json!({ "x": 1 })));
        assert_eq!(
            payload.get("f.histories"),
            Some(&json!([
                { "step": "A", "context": {} },
                { "step": "B", "context": { "x": 1 } }
            ]))
        );
    }

    #[test]
    fn replace_transition_swaps_current_state() {
        let entry = entry(
            "f.step=B",
            json!({
                "f.context": { "x": 1 },
                "f.histories": [
                    { "step": "A", "context": {} },
                    { "step": "B", "context": { "x": 1 } }
                ]
            }),
        );
        let next = FunnelState::new("C", json!({ "x": 2 }));

        let (search, payload) =
            transition(&keys(), &entry, &initial(), &next, NavigateMode::Replace).unwrap();

        assert_eq!(search.get("f.step"), Some("C"));
        assert_eq!(
            payload.get("f.histories"),
            Some(&json!([
                { "step": "A", "context": {} },
                { "step": "C", "context": { "x": 2 } }
            ]))
        );
    }

    #[test]
    fn strip_removes_only_funnel_keys() {
        let entry = entry(
            "tab=2&f.step=B",
            json!({
                "scroll": 40,
                "f.context": { "x": 1 },
                "f.histories": [{ "step": "B", "context": { "x": 1 } }]
            }),
        );

        let (search, payload) = strip(&keys(), &entry).unwrap();

        assert_eq!(search.encode().unwrap(), "tab=2");
        assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["scroll"]);
    }

    #[test]
    fn strip_requires_complete_state() {
        let partial = entry("f.step=B", json!({ "f.context": { "x": 1 } }));

        assert!(strip(&keys(), &partial).is_none());
        assert!(strip(&keys(), &NavigationEntry::blank()).is_none());
    }
}
