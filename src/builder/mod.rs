//! Builder API for funnel configuration.
//!
//! This module provides a fluent builder for [`FunnelOptions`] that
//! validates the configuration before a router is created from it.
//! Validation uses Stillwater's `Validation` to collect every violation in
//! a single pass.
//!
//! # Example
//!
//! ```
//! use funnel::builder::FunnelOptionsBuilder;
//! use serde_json::json;
//!
//! let options = FunnelOptionsBuilder::new()
//!     .id("signup")
//!     .initial("email", json!({}))
//!     .step("password", json!({ "email": "string" }))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.id, "signup");
//! ```
//!
//! [`FunnelOptions`]: crate::core::FunnelOptions

pub mod error;
pub mod options;

pub use error::{BuildError, OptionViolation};
pub use options::FunnelOptionsBuilder;
