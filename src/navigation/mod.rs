//! Host navigation systems.
//!
//! A navigation host owns an append-only stack of entries, each carrying a
//! URL query and an opaque payload. The host is the source of truth: it can
//! move through its stack on its own (back/forward gestures), so anything
//! built on top must re-read the present entry rather than cache it.
//!
//! [`MemoryHistory`] is an in-memory host with browser-style semantics.

mod entry;
mod error;
mod memory;
mod search;

pub use entry::{EntryState, NavigationEntry};
pub use error::HostError;
pub use memory::{CommitMode, MemoryHistory, MemoryRouteOption};
pub use search::SearchParams;

use std::fmt::Debug;
use std::sync::Arc;

/// Whether a navigation creates a new entry or rewrites the present one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigateMode {
    /// Truncate forward entries and append a new one
    Push,
    /// Overwrite the present entry in place
    Replace,
}

/// A request to move the host to a new URL query and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigateRequest<R> {
    pub search: SearchParams,
    pub state: EntryState,
    pub mode: NavigateMode,
    pub option: R,
}

/// Callback invoked with the newly active entry after each committed change.
pub type Listener = Arc<dyn Fn(&NavigationEntry) + Send + Sync>;

/// Handle for removing a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A navigation system a funnel can be synchronized with.
///
/// Handles are cheap to clone and refer to the same underlying stack.
pub trait NavigationHost: Clone + Send + Sync + 'static {
    /// Host-specific options accepted by `navigate`
    type RouteOption: Clone + Default + Debug + Send + Sync + 'static;

    /// The present entry.
    fn current(&self) -> NavigationEntry;

    /// Move to a new entry, or rewrite the present one.
    ///
    /// The host may commit the change after this returns.
    fn navigate(&self, request: NavigateRequest<Self::RouteOption>) -> Result<(), HostError>;

    /// Move `delta` entries through the stack. Moves that would leave the
    /// stack are ignored.
    fn go(&self, delta: isize) -> Result<(), HostError>;

    fn subscribe(&self, listener: Listener) -> ListenerId;

    /// Returns `false` if no listener had this id.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}
