//! Binding of the funnel router contract onto a navigation host.
//!
//! The funnel is spread across two channels of the host's present entry:
//! the step name in the URL query (`{id}.step`), and the context plus the
//! full history in the entry payload (`{id}.context`, `{id}.histories`).
//!
//! - `keys` names those locations
//! - `projection` converts between entries and funnels without side effects
//! - `router` runs the conversions against a live host

mod keys;
pub mod projection;
mod router;

pub use keys::FunnelKeys;
pub use router::HistoryRouter;
