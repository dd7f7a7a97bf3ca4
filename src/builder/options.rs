//! Builder for constructing funnel options.

use crate::builder::error::{BuildError, OptionViolation};
use crate::core::{Context, FunnelOptions, FunnelState, StepShapes};
use serde_json::Value;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<OptionViolation>>;

/// Builder for funnel options with a fluent API.
///
/// `build` reports every problem at once rather than stopping at the
/// first.
pub struct FunnelOptionsBuilder<C: Context> {
    id: Option<String>,
    initial: Option<FunnelState<C>>,
    steps: Option<StepShapes>,
}

impl<C: Context> FunnelOptionsBuilder<C> {
    pub fn new() -> Self {
        Self {
            id: None,
            initial: None,
            steps: None,
        }
    }

    /// Set the funnel id (required).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the initial step and context (required).
    pub fn initial(mut self, step: impl Into<String>, context: C) -> Self {
        self.initial = Some(FunnelState::new(step, context));
        self
    }

    /// Set the initial state (required).
    pub fn initial_state(mut self, state: FunnelState<C>) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a step and its shape (optional, metadata only).
    pub fn step(mut self, name: impl Into<String>, shape: Value) -> Self {
        self.steps = Some(self.steps.take().unwrap_or_default().declare(name, shape));
        self
    }

    /// Replace all declared steps.
    pub fn steps(mut self, steps: StepShapes) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Build the options.
    pub fn build(self) -> Result<FunnelOptions<C>, BuildError> {
        let id = self.id.ok_or(BuildError::MissingId)?;
        let initial_state = self.initial.ok_or(BuildError::MissingInitialState)?;

        let checks = vec![
            check_id(&id),
            check_initial_step(&initial_state),
            check_steps(self.steps.as_ref()),
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(FunnelOptions {
                id,
                initial_state,
                steps: self.steps,
            }),
            Validation::Failure(errors) => {
                Err(BuildError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}

impl<C: Context> Default for FunnelOptionsBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_id(id: &str) -> Check {
    if id.is_empty() {
        Validation::fail(OptionViolation::EmptyId)
    } else if id.chars().any(char::is_whitespace) {
        Validation::fail(OptionViolation::WhitespaceInId { id: id.to_string() })
    } else {
        Validation::success(())
    }
}

fn check_initial_step<C: Context>(initial: &FunnelState<C>) -> Check {
    if initial.step.is_empty() {
        Validation::fail(OptionViolation::EmptyInitialStep)
    } else {
        Validation::success(())
    }
}

fn check_steps(steps: Option<&StepShapes>) -> Check {
    match steps {
        Some(steps) if steps.names().any(str::is_empty) => {
            Validation::fail(OptionViolation::EmptyStepName)
        }
        _ => Validation::success(()),
    }
}
