//! Core funnel types and the router contract.
//!
//! This module contains the host-independent part of a funnel:
//! - States and the `Context` bound via `FunnelState`
//! - Immutable, never-empty history via `FunnelHistory`
//! - Funnel and transition options
//! - The `FunnelRouter` trait that navigation adapters implement
//!
//! Nothing here performs I/O. Navigation commands are described as
//! effects and only touch a host when run.

mod error;
mod history;
mod options;
mod router;
mod state;

pub use error::FunnelError;
pub use history::{EmptyHistory, FunnelHistory};
pub use options::{FunnelOptions, RenderComponent, StepShapes, TransitionOption};
pub use router::{FunnelRouter, FunnelRouterResult, Navigation};
pub use state::{Context, FunnelState};
