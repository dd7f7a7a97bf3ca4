//! Funnel: multi-step flows kept in sync with navigation history
//!
//! A funnel is an ordered sequence of named steps, each carrying a typed
//! context. This crate keeps that sequence in a host navigation system
//! (URL query plus per-entry payload) so back/forward, deep links and
//! reloads all land on the right step with the right data.
//!
//! The host is the single source of truth. Routers hold no funnel state;
//! they derive it from the host's present entry on every read, and express
//! every mutation as a deferred effect run against the host.
//!
//! # Core Concepts
//!
//! - **FunnelState**: a step name plus its context payload
//! - **FunnelHistory**: the never-empty list of visited states, current last
//! - **FunnelRouter**: the contract (`push`, `replace`, `go`, `cleanup`)
//! - **HistoryRouter**: the binding onto any `NavigationHost`
//!
//! # Example
//!
//! ```rust
//! use funnel::{FunnelOptions, FunnelRouter, FunnelState, HistoryRouter, TransitionOption};
//! use funnel::navigation::MemoryHistory;
//! use serde_json::json;
//! use stillwater::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let host = MemoryHistory::new();
//! let router: HistoryRouter<_, MemoryHistory> =
//!     HistoryRouter::new(FunnelOptions::new("f", FunnelState::new("A", json!({}))));
//!
//! router
//!     .push(FunnelState::new("B", json!({ "x": 1 })), TransitionOption::new())
//!     .run(&host)
//!     .await
//!     .unwrap();
//! router
//!     .replace(FunnelState::new("C", json!({ "x": 2 })), TransitionOption::new())
//!     .run(&host)
//!     .await
//!     .unwrap();
//! assert_eq!(router.observe(&host).history().steps(), vec!["A", "C"]);
//!
//! router.go(0).run(&host).await.unwrap();
//! let funnel = router.observe(&host);
//! assert_eq!(funnel.history().steps(), vec!["A"]);
//! assert_eq!(funnel.current_index(), 0);
//! # }
//! ```

pub mod adapter;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod navigation;

// Re-export commonly used types
pub use adapter::HistoryRouter;
pub use core::{
    FunnelError, FunnelHistory, FunnelOptions, FunnelRouter, FunnelRouterResult, FunnelState,
    TransitionOption,
};
