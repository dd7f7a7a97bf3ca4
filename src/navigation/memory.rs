//! In-memory navigation host with browser-style semantics.

use super::entry::{EntryState, NavigationEntry};
use super::error::HostError;
use super::search::SearchParams;
use super::{Listener, ListenerId, NavigateMode, NavigateRequest, NavigationHost};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// When a `MemoryHistory` applies the navigations it receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommitMode {
    /// Apply on the calling turn
    #[default]
    Immediate,
    /// Queue until [`MemoryHistory::settle`]
    Deferred,
}

/// Transition flags accepted by `MemoryHistory`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRouteOption {
    pub prevent_scroll_reset: bool,
    /// Commit immediately (along with anything already queued), even in
    /// deferred mode
    pub flush_sync: bool,
    pub view_transition: bool,
}

enum Command {
    Navigate(NavigateRequest<MemoryRouteOption>),
    Go(isize),
}

impl Command {
    fn flushes(&self) -> bool {
        matches!(self, Command::Navigate(request) if request.option.flush_sync)
    }
}

struct Inner {
    entries: Vec<NavigationEntry>,
    index: usize,
    commit: CommitMode,
    pending: VecDeque<Command>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    last_option: Option<MemoryRouteOption>,
}

impl Inner {
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Navigate(request) => {
                self.last_option = Some(request.option);
                match request.mode {
                    NavigateMode::Push => {
                        self.entries.truncate(self.index + 1);
                        self.entries
                            .push(NavigationEntry::new(request.search, request.state));
                        self.index = self.entries.len() - 1;
                    }
                    NavigateMode::Replace => {
                        let entry = &mut self.entries[self.index];
                        entry.search = request.search;
                        entry.state = request.state;
                    }
                }
                true
            }
            Command::Go(0) => false,
            Command::Go(delta) => {
                let target = isize::try_from(self.index)
                    .ok()
                    .and_then(|index| index.checked_add(delta))
                    .and_then(|target| usize::try_from(target).ok())
                    .filter(|&target| target < self.entries.len());
                let Some(target) = target else {
                    tracing::debug!(
                        delta,
                        index = self.index,
                        len = self.entries.len(),
                        "Ignoring history move outside the stack"
                    );
                    return false;
                };
                self.index = target;
                true
            }
        }
    }

    /// Apply every queued command in order, returning the entry that was
    /// active after each committed change.
    fn drain(&mut self) -> Vec<NavigationEntry> {
        let mut committed = Vec::new();
        while let Some(command) = self.pending.pop_front() {
            if self.apply(command) {
                committed.push(self.entries[self.index].clone());
            }
        }
        committed
    }
}

/// A navigation stack held in memory.
///
/// Cloning yields another handle to the same stack. Listeners are invoked
/// outside the internal lock, so they may read the host again.
///
/// # Example
///
/// ```rust
/// use funnel::navigation::{MemoryHistory, NavigationHost};
///
/// let host = MemoryHistory::with_query("?tab=2").unwrap();
/// assert_eq!(host.current().search.get("tab"), Some("2"));
/// assert_eq!(host.len(), 1);
/// ```
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryHistory {
    /// A stack holding a single blank entry.
    pub fn new() -> Self {
        Self::from_entries(vec![NavigationEntry::blank()], 0)
    }

    /// A stack whose single entry has the given URL query, as when a page
    /// is opened from a shared link.
    pub fn with_query(query: &str) -> Result<Self, HostError> {
        let search = SearchParams::parse(query)?;
        Ok(Self::from_entries(
            vec![NavigationEntry::new(search, EntryState::new())],
            0,
        ))
    }

    /// Callers guarantee `entries` is non-empty and `index` addresses one.
    pub(crate) fn from_entries(entries: Vec<NavigationEntry>, index: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries,
                index,
                commit: CommitMode::Immediate,
                pending: VecDeque::new(),
                listeners: Vec::new(),
                next_listener: 0,
                last_option: None,
            })),
        }
    }

    pub fn with_commit_mode(self, mode: CommitMode) -> Self {
        self.inner.lock().commit = mode;
        self
    }

    /// Shorthand for `with_commit_mode(CommitMode::Deferred)`.
    pub fn deferred(self) -> Self {
        self.with_commit_mode(CommitMode::Deferred)
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.inner.lock().commit
    }

    /// Apply every queued navigation. Returns how many changed the stack.
    pub fn settle(&self) -> usize {
        let committed = self.inner.lock().drain();
        let count = committed.len();
        self.notify(committed);
        count
    }

    /// Number of navigations waiting for `settle`.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Simulate the user's back gesture.
    pub fn back(&self) {
        self.dispatch(Command::Go(-1));
    }

    /// Simulate the user's forward gesture.
    pub fn forward(&self) {
        self.dispatch(Command::Go(1));
    }

    pub fn entries(&self) -> Vec<NavigationEntry> {
        self.inner.lock().entries.clone()
    }

    /// Position of the present entry in the stack.
    pub fn index(&self) -> usize {
        self.inner.lock().index
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Always `false`: a stack holds at least one entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Route option of the last applied navigation.
    pub fn last_route_option(&self) -> Option<MemoryRouteOption> {
        self.inner.lock().last_option.clone()
    }

    fn dispatch(&self, command: Command) {
        let committed = {
            let mut inner = self.inner.lock();
            let flush = command.flushes();
            inner.pending.push_back(command);
            if inner.commit == CommitMode::Deferred && !flush {
                return;
            }
            inner.drain()
        };
        self.notify(committed);
    }

    fn notify(&self, committed: Vec<NavigationEntry>) {
        if committed.is_empty() {
            return;
        }
        let listeners: Vec<Listener> = self
            .inner
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for entry in &committed {
            for listener in &listeners {
                listener(entry);
            }
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MemoryHistory")
            .field("index", &inner.index)
            .field("len", &inner.entries.len())
            .field("commit", &inner.commit)
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl NavigationHost for MemoryHistory {
    type RouteOption = MemoryRouteOption;

    fn current(&self) -> NavigationEntry {
        let inner = self.inner.lock();
        inner.entries[inner.index].clone()
    }

    fn navigate(&self, request: NavigateRequest<MemoryRouteOption>) -> Result<(), HostError> {
        self.dispatch(Command::Navigate(request));
        Ok(())
    }

    fn go(&self, delta: isize) -> Result<(), HostError> {
        self.dispatch(Command::Go(delta));
        Ok(())
    }

    fn subscribe(&self, listener: Listener) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(query: &str, mode: NavigateMode) -> NavigateRequest<MemoryRouteOption> {
        NavigateRequest {
            search: SearchParams::parse(query).unwrap(),
            state: EntryState::new(),
            mode,
            option: MemoryRouteOption::default(),
        }
    }

    #[test]
    fn new_history_has_one_blank_entry() {
        let host = MemoryHistory::new();

        assert_eq!(host.len(), 1);
        assert_eq!(host.index(), 0);
        assert!(host.current().search.is_empty());
    }

    #[test]
    fn push_appends_entry_with_new_key() {
        let host = MemoryHistory::new();
        let first = host.current().key;

        host.navigate(request("a=1", NavigateMode::Push)).unwrap();

        assert_eq!(host.len(), 2);
        assert_eq!(host.index(), 1);
        assert_eq!(host.current().search.get("a"), Some("1"));
        assert_ne!(host.current().key, first);
    }

    #[test]
    fn push_truncates_forward_entries() {
        let host = MemoryHistory::new();
        host.navigate(request("a=1", NavigateMode::Push)).unwrap();
        host.navigate(request("a=2", NavigateMode::Push)).unwrap();
        host.back();
        host.back();

        host.navigate(request("b=1", NavigateMode::Push)).unwrap();

        assert_eq!(host.len(), 2);
        assert_eq!(host.current().search.get("b"), Some("1"));
    }

    #[test]
    fn replace_rewrites_in_place_keeping_key() {
        let host = MemoryHistory::new();
        let key = host.current().key;
        let mut replacement = request("a=9", NavigateMode::Replace);
        replacement.state.insert("k", json!(true));

        host.navigate(replacement).unwrap();

        assert_eq!(host.len(), 1);
        assert_eq!(host.current().key, key);
        assert_eq!(host.current().state.get("k"), Some(&json!(true)));
    }

    #[test]
    fn go_outside_stack_is_ignored() {
        let host = MemoryHistory::new();
        host.navigate(request("a=1", NavigateMode::Push)).unwrap();

        host.go(-5).unwrap();
        assert_eq!(host.index(), 1);

        host.go(1).unwrap();
        assert_eq!(host.index(), 1);

        host.go(isize::MAX).unwrap();
        assert_eq!(host.index(), 1);

        host.go(isize::MIN).unwrap();
        assert_eq!(host.index(), 1);

        host.go(-1).unwrap();
        assert_eq!(host.index(), 0);
    }

    #[test]
    fn back_and_forward_move_through_stack() {
        let host = MemoryHistory::new();
        host.navigate(request("a=1", NavigateMode::Push)).unwrap();

        host.back();
        assert!(host.current().search.is_empty());

        host.forward();
        assert_eq!(host.current().search.get("a"), Some("1"));
    }

    #[test]
    fn deferred_mode_queues_until_settle() {
        let host = MemoryHistory::new().deferred();

        host.navigate(request("a=1", NavigateMode::Push)).unwrap();
        host.navigate(request("a=2", NavigateMode::Push)).unwrap();

        assert_eq!(host.pending(), 2);
        assert_eq!(host.len(), 1);

        assert_eq!(host.settle(), 2);
        assert_eq!(host.pending(), 0);
        assert_eq!(host.current().search.get("a"), Some("2"));
    }

    #[test]
    fn flush_sync_commits_queue_in_deferred_mode() {
        let host = MemoryHistory::new().deferred();
        host.navigate(request("a=1", NavigateMode::Push)).unwrap();

        let mut urgent = request("a=2", NavigateMode::Push);
        urgent.option.flush_sync = true;
        host.navigate(urgent).unwrap();

        assert_eq!(host.pending(), 0);
        assert_eq!(host.len(), 3);
        assert_eq!(host.last_route_option().map(|o| o.flush_sync), Some(true));
    }

    #[test]
    fn listeners_see_each_committed_entry() {
        let host = MemoryHistory::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = host.subscribe(Arc::new(move |_entry: &NavigationEntry| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        host.navigate(request("a=1", NavigateMode::Push)).unwrap();
        host.go(7).unwrap();
        host.back();

        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(host.unsubscribe(id));
        assert!(!host.unsubscribe(id));
        host.forward();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listeners_can_read_host() {
        let host = MemoryHistory::new();
        let observed = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&observed);
        let reader = host.clone();
        host.subscribe(Arc::new(move |_entry: &NavigationEntry| {
            *slot.lock() = Some(reader.index());
        }));

        host.navigate(request("a=1", NavigateMode::Push)).unwrap();

        assert_eq!(*observed.lock(), Some(1));
    }

    #[test]
    fn with_query_parses_initial_entry() {
        let host = MemoryHistory::with_query("?signup.step=password").unwrap();

        assert_eq!(host.current().search.get("signup.step"), Some("password"));
    }
}
