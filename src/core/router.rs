//! The contract every navigation adapter satisfies.
//!
//! A router projects a funnel's history out of some host's navigation state
//! and turns the four funnel operations into host navigation commands.
//! Commands are returned as effects: nothing happens until the caller runs
//! one against the host, and even then the host may commit it later, so a
//! caller must observe the host again to see the result.

use super::error::FunnelError;
use super::history::FunnelHistory;
use super::options::{FunnelOptions, TransitionOption};
use super::state::{Context, FunnelState};
use stillwater::effect::BoxedEffect;

/// A deferred navigation command, run against the host `H`.
pub type Navigation<H> = BoxedEffect<(), FunnelError, H>;

/// Funnel state machine over a host navigation system.
///
/// Implementations hold no funnel state of their own. `history` derives
/// everything from the host's present entry, every time.
pub trait FunnelRouter<C: Context>: Clone + Send + Sync + 'static {
    /// The navigation system commands run against
    type Host: Clone + Send + Sync + 'static;

    /// Host-specific transition options
    type RouteOption: Clone + Default + Send + Sync + 'static;

    fn options(&self) -> &FunnelOptions<C>;

    /// Derive the funnel's history from the host's present entry.
    fn history(&self, host: &Self::Host) -> FunnelHistory<C>;

    /// Advance to `state`, creating a new host entry.
    fn push(
        &self,
        state: FunnelState<C>,
        option: TransitionOption<Self::RouteOption>,
    ) -> Navigation<Self::Host>;

    /// Overwrite the current step with `state` without growing history.
    fn replace(
        &self,
        state: FunnelState<C>,
        option: TransitionOption<Self::RouteOption>,
    ) -> Navigation<Self::Host>;

    /// Move to position `index` of the recorded history.
    ///
    /// The host decides where navigation lands; observe it again afterwards.
    fn go(&self, index: usize) -> Navigation<Self::Host>;

    /// Remove this funnel's state from the present entry without navigating.
    fn cleanup(&self) -> Navigation<Self::Host>;

    /// Derive a result snapshot from the host.
    fn observe(&self, host: &Self::Host) -> FunnelRouterResult<C, Self> {
        FunnelRouterResult::new(self.history(host), self.clone())
    }
}

/// What a router hands to the UI layer: a derived history plus the
/// operations that move it.
#[derive(Clone, Debug)]
pub struct FunnelRouterResult<C: Context, R: FunnelRouter<C>> {
    history: FunnelHistory<C>,
    router: R,
}

impl<C: Context, R: FunnelRouter<C>> FunnelRouterResult<C, R> {
    pub fn new(history: FunnelHistory<C>, router: R) -> Self {
        Self { history, router }
    }

    pub fn history(&self) -> &FunnelHistory<C> {
        &self.history
    }

    pub fn current_index(&self) -> usize {
        self.history.current_index()
    }

    pub fn current(&self) -> &FunnelState<C> {
        self.history.current()
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn push(
        &self,
        state: FunnelState<C>,
        option: TransitionOption<R::RouteOption>,
    ) -> Navigation<R::Host> {
        self.router.push(state, option)
    }

    pub fn replace(
        &self,
        state: FunnelState<C>,
        option: TransitionOption<R::RouteOption>,
    ) -> Navigation<R::Host> {
        self.router.replace(state, option)
    }

    pub fn go(&self, index: usize) -> Navigation<R::Host> {
        self.router.go(index)
    }

    pub fn cleanup(&self) -> Navigation<R::Host> {
        self.router.cleanup()
    }
}
