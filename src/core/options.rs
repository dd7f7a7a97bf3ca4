//! Funnel and transition options.

use super::state::{Context, FunnelState};
use crate::builder::FunnelOptionsBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Declared step shapes, keyed by step name.
///
/// Metadata only: no operation checks transitions against it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepShapes(BTreeMap<String, Value>);

impl StepShapes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `step` with a free-form description of its context shape.
    pub fn declare(mut self, step: impl Into<String>, shape: Value) -> Self {
        self.0.insert(step.into(), shape);
        self
    }

    pub fn declares(&self, step: &str) -> bool {
        self.0.contains_key(step)
    }

    pub fn shape(&self, step: &str) -> Option<&Value> {
        self.0.get(step)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Options a funnel is created with.
///
/// `id` namespaces every key the funnel writes onto a navigation entry, so
/// several funnels can share one entry. Build with [`FunnelOptions::builder`]
/// to get validation, or [`FunnelOptions::new`] when the values are known
/// to be sound.
#[derive(Clone, Debug, PartialEq)]
pub struct FunnelOptions<C: Context> {
    pub id: String,
    pub initial_state: FunnelState<C>,
    pub steps: Option<StepShapes>,
}

impl<C: Context> FunnelOptions<C> {
    pub fn new(id: impl Into<String>, initial_state: FunnelState<C>) -> Self {
        Self {
            id: id.into(),
            initial_state,
            steps: None,
        }
    }

    pub fn builder() -> FunnelOptionsBuilder<C> {
        FunnelOptionsBuilder::new()
    }
}

/// How the UI layer should render the step reached by a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderComponent {
    /// Render the new step on top of the previous one instead of in its place
    pub overlay: bool,
}

/// Options for `push` and `replace`.
///
/// The base fields are shared by every host; `route` carries whatever the
/// specific navigation host accepts (scroll behaviour, view transitions and
/// so on). Hosts without extra options use `()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionOption<R = ()> {
    pub render_component: Option<RenderComponent>,
    pub route: R,
}

impl<R: Default> TransitionOption<R> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R> TransitionOption<R> {
    /// Request overlay rendering for the target step.
    pub fn overlay(mut self, overlay: bool) -> Self {
        self.render_component = Some(RenderComponent { overlay });
        self
    }

    /// Attach host-specific route options.
    pub fn route(mut self, route: R) -> Self {
        self.route = route;
        self
    }

    pub fn is_overlay(&self) -> bool {
        self.render_component.is_some_and(|r| r.overlay)
    }
}
