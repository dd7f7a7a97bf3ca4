//! Funnel router over a [`NavigationHost`].

use super::keys::FunnelKeys;
use super::projection;
use crate::core::{
    Context, FunnelError, FunnelHistory, FunnelOptions, FunnelRouter, FunnelRouterResult,
    FunnelState, Navigation, TransitionOption,
};
use crate::navigation::{ListenerId, NavigateMode, NavigateRequest, NavigationEntry, NavigationHost};
use parking_lot::Mutex;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use stillwater::prelude::*;

/// Keeps a funnel in the host's URL query and entry payload.
///
/// The step name goes in the query so links can be shared; the context and
/// the full history go in the entry payload. The router caches nothing:
/// every read and every command starts from the host's present entry.
///
/// # Example
///
/// ```rust
/// use funnel::adapter::HistoryRouter;
/// use funnel::core::{FunnelOptions, FunnelRouter, FunnelState, TransitionOption};
/// use funnel::navigation::MemoryHistory;
/// use serde_json::json;
/// use stillwater::prelude::*;
///
/// # #[tokio::main]
/// # async fn main() {
/// let host = MemoryHistory::new();
/// let router = HistoryRouter::<_, MemoryHistory>::new(FunnelOptions::new(
///     "signup",
///     FunnelState::new("email", json!({})),
/// ));
///
/// router
///     .push(FunnelState::new("password", json!({ "email": "a@b.c" })), TransitionOption::new())
///     .run(&host)
///     .await
///     .unwrap();
///
/// let funnel = router.observe(&host);
/// assert_eq!(funnel.current_index(), 1);
/// assert_eq!(funnel.current().step, "password");
/// # }
/// ```
pub struct HistoryRouter<C: Context, H: NavigationHost> {
    options: Arc<FunnelOptions<C>>,
    keys: FunnelKeys,
    _host: PhantomData<fn() -> H>,
}

impl<C: Context, H: NavigationHost> HistoryRouter<C, H> {
    pub fn new(options: FunnelOptions<C>) -> Self {
        Self {
            keys: FunnelKeys::new(options.id.as_str()),
            options: Arc::new(options),
            _host: PhantomData,
        }
    }

    pub fn keys(&self) -> &FunnelKeys {
        &self.keys
    }

    /// Derive the history from a specific entry rather than the host's
    /// present one.
    pub fn history_at(&self, entry: &NavigationEntry) -> FunnelHistory<C> {
        projection::reconstruct(&self.keys, entry, &self.options.initial_state)
    }

    /// Call `on_change` with a freshly derived result whenever a host change
    /// alters this funnel's history. Changes to other keys on the entry are
    /// not reported.
    pub fn watch<F>(&self, host: &H, on_change: F) -> ListenerId
    where
        F: Fn(FunnelRouterResult<C, Self>) + Send + Sync + 'static,
    {
        let router = self.clone();
        let last = Mutex::new(self.history(host));
        host.subscribe(Arc::new(move |entry: &NavigationEntry| {
            let history = router.history_at(entry);
            {
                let mut last = last.lock();
                if *last == history {
                    return;
                }
                *last = history.clone();
            }
            on_change(FunnelRouterResult::new(history, router.clone()));
        }))
    }

    /// Stop a subscription made with [`HistoryRouter::watch`].
    pub fn unwatch(&self, host: &H, id: ListenerId) -> bool {
        host.unsubscribe(id)
    }

    fn commit(
        &self,
        host: &H,
        state: &FunnelState<C>,
        option: &TransitionOption<H::RouteOption>,
        mode: NavigateMode,
    ) -> Result<(), FunnelError> {
        let entry = host.current();
        let (search, payload) = projection::transition(
            &self.keys,
            &entry,
            &self.options.initial_state,
            state,
            mode,
        )?;

        tracing::debug!(
            funnel = %self.keys.id(),
            step = %state.step,
            mode = ?mode,
            overlay = option.is_overlay(),
            "Navigating funnel"
        );

        host.navigate(NavigateRequest {
            search,
            state: payload,
            mode,
            option: option.route.clone(),
        })?;
        Ok(())
    }

    fn jump(&self, host: &H, index: usize) -> Result<(), FunnelError> {
        let current = self.history(host).current_index();
        let delta = isize::try_from(index)
            .ok()
            .and_then(|index| index.checked_sub(isize::try_from(current).ok()?));
        let Some(delta) = delta else {
            tracing::debug!(
                funnel = %self.keys.id(),
                index,
                current,
                "Target index out of reach, not moving"
            );
            return Ok(());
        };

        tracing::debug!(funnel = %self.keys.id(), index, delta, "Moving through funnel history");

        host.go(delta)?;
        Ok(())
    }

    fn scrub(&self, host: &H) -> Result<(), FunnelError> {
        let entry = host.current();
        let Some((search, payload)) = projection::strip(&self.keys, &entry) else {
            tracing::debug!(funnel = %self.keys.id(), "Nothing to clean up");
            return Ok(());
        };

        tracing::debug!(funnel = %self.keys.id(), "Cleaning up funnel state");

        host.navigate(NavigateRequest {
            search,
            state: payload,
            mode: NavigateMode::Replace,
            option: H::RouteOption::default(),
        })?;
        Ok(())
    }
}

impl<C: Context, H: NavigationHost> Clone for HistoryRouter<C, H> {
    fn clone(&self) -> Self {
        Self {
            options: Arc::clone(&self.options),
            keys: self.keys.clone(),
            _host: PhantomData,
        }
    }
}

impl<C: Context, H: NavigationHost> fmt::Debug for HistoryRouter<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryRouter")
            .field("id", &self.keys.id())
            .field("initial_step", &self.options.initial_state.step)
            .finish()
    }
}

impl<C: Context, H: NavigationHost> FunnelRouter<C> for HistoryRouter<C, H> {
    type Host = H;
    type RouteOption = H::RouteOption;

    fn options(&self) -> &FunnelOptions<C> {
        &self.options
    }

    fn history(&self, host: &H) -> FunnelHistory<C> {
        self.history_at(&host.current())
    }

    fn push(
        &self,
        state: FunnelState<C>,
        option: TransitionOption<H::RouteOption>,
    ) -> Navigation<H> {
        let router = self.clone();
        from_fn(move |host: &H| router.commit(host, &state, &option, NavigateMode::Push)).boxed()
    }

    fn replace(
        &self,
        state: FunnelState<C>,
        option: TransitionOption<H::RouteOption>,
    ) -> Navigation<H> {
        let router = self.clone();
        from_fn(move |host: &H| router.commit(host, &state, &option, NavigateMode::Replace)).boxed()
    }

    fn go(&self, index: usize) -> Navigation<H> {
        let router = self.clone();
        from_fn(move |host: &H| router.jump(host, index)).boxed()
    }

    fn cleanup(&self) -> Navigation<H> {
        let router = self.clone();
        from_fn(move |host: &H| router.scrub(host)).boxed()
    }
}
