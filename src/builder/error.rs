//! Build errors for funnel options.

use std::fmt;
use thiserror::Error;

/// A single problem found while validating funnel options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionViolation {
    #[error("Funnel id is empty")]
    EmptyId,

    #[error("Funnel id '{id}' contains whitespace")]
    WhitespaceInId { id: String },

    #[error("Initial state has an empty step name")]
    EmptyInitialStep,

    #[error("A declared step has an empty name")]
    EmptyStepName,
}

/// Errors that can occur when building funnel options.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Funnel id not specified. Call .id(id) before .build()")]
    MissingId,

    #[error("Initial state not specified. Call .initial(step, context) before .build()")]
    MissingInitialState,

    #[error("Invalid funnel options: {}", Violations(.0))]
    Invalid(Vec<OptionViolation>),
}

struct Violations<'a>(&'a [OptionViolation]);

impl fmt::Display for Violations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}
