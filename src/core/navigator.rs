//! Navigation state owner.
//!
//! The [`Navigator`] is the single owner of the current location. Views never
//! write the location directly: they issue navigation intents
//! ([`Navigator::navigate`], [`Navigator::replace`]) and observe changes
//! through [`Navigator::subscribe`].
//!
//! Intents are applied synchronously and delivered to subscribers strictly in
//! issue order, including intents issued by a subscriber while a delivery is
//! in progress (those are queued behind the current one).

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::models::{AppRoute, normalize_path};
use crate::utils::dom;

// ============================================================================
// History Backends
// ============================================================================

/// Where locations are persisted: the browser history or memory.
pub trait HistoryBackend {
    /// Current pathname.
    fn location(&self) -> String;
    /// Add a history entry.
    fn push(&self, path: &str);
    /// Overwrite the current history entry.
    fn replace(&self, path: &str);
}

/// Browser history API (`pushState` / `replaceState`).
pub struct BrowserHistory;

impl HistoryBackend for BrowserHistory {
    fn location(&self) -> String {
        dom::get_pathname()
    }

    fn push(&self, path: &str) {
        dom::push_path(path);
    }

    fn replace(&self, path: &str) {
        dom::replace_path(path);
    }
}

/// In-memory history stack.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: RefCell::new(vec![initial.to_string()]),
        }
    }

    /// Move back one entry, as the browser back button would.
    pub fn back(&self) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() > 1 {
            entries.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl HistoryBackend for MemoryHistory {
    fn location(&self) -> String {
        self.entries.borrow().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, path: &str) {
        self.entries.borrow_mut().push(path.to_string());
    }

    fn replace(&self, path: &str) {
        let mut entries = self.entries.borrow_mut();
        entries.pop();
        entries.push(path.to_string());
    }
}

impl<H: HistoryBackend> HistoryBackend for Rc<H> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn push(&self, path: &str) {
        (**self).push(path)
    }

    fn replace(&self, path: &str) {
        (**self).replace(path)
    }
}

// ============================================================================
// Location
// ============================================================================

/// The current location: normalized pathname plus its resolved route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub route: AppRoute,
}

impl Location {
    pub fn new(path: &str) -> Self {
        let path = normalize_path(path);
        let route = AppRoute::resolve(&path);
        Self { path, route }
    }
}

// ============================================================================
// Navigator
// ============================================================================

type Listener = Rc<dyn Fn(&Location)>;

struct NavigatorInner {
    history: Box<dyn HistoryBackend>,
    current: RefCell<Location>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
    pending: RefCell<VecDeque<Location>>,
    dispatching: Cell<bool>,
}

/// Owner of the current location.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct Navigator {
    inner: Rc<NavigatorInner>,
}

impl Navigator {
    /// Create a navigator starting at the backend's current location.
    pub fn new(history: impl HistoryBackend + 'static) -> Self {
        let current = Location::new(&history.location());
        Self {
            inner: Rc::new(NavigatorInner {
                history: Box::new(history),
                current: RefCell::new(current),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Navigator backed by the browser history.
    pub fn browser() -> Self {
        Self::new(BrowserHistory)
    }

    pub fn location(&self) -> Location {
        self.inner.current.borrow().clone()
    }

    pub fn path(&self) -> String {
        self.inner.current.borrow().path.clone()
    }

    pub fn route(&self) -> AppRoute {
        self.inner.current.borrow().route.clone()
    }

    /// Navigate to `path`, adding a history entry.
    ///
    /// Returns `false` when `path` is already the current location.
    pub fn navigate(&self, path: &str) -> bool {
        self.apply(path, |history, path| history.push(path))
    }

    /// Redirect to `path` without adding a history entry.
    pub fn replace(&self, path: &str) -> bool {
        self.apply(path, |history, path| history.replace(path))
    }

    /// Re-read the location after the browser moved through its history.
    pub fn sync_from_browser(&self) -> bool {
        let path = self.inner.history.location();
        self.apply(&path, |_, _| {})
    }

    fn apply(&self, path: &str, record: impl FnOnce(&dyn HistoryBackend, &str)) -> bool {
        let next = Location::new(path);
        if *self.inner.current.borrow() == next {
            return false;
        }

        log::debug!("navigate: {} -> {}", self.inner.current.borrow().path, next.path);
        record(self.inner.history.as_ref(), &next.path);
        *self.inner.current.borrow_mut() = next.clone();
        self.inner.pending.borrow_mut().push_back(next);
        self.dispatch();
        true
    }

    /// Deliver queued locations to listeners, oldest first.
    fn dispatch(&self) {
        if self.inner.dispatching.replace(true) {
            return;
        }

        loop {
            let Some(location) = self.inner.pending.borrow_mut().pop_front() else {
                break;
            };
            let listeners: Vec<Listener> = self
                .inner
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect();
            for listener in listeners {
                listener(&location);
            }
        }

        self.inner.dispatching.set(false);
    }

    /// Observe location changes until the returned handle is dropped.
    pub fn subscribe(&self, listener: impl Fn(&Location) + 'static) -> NavSubscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        NavSubscription {
            navigator: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

/// Registration handle returned by [`Navigator::subscribe`].
pub struct NavSubscription {
    navigator: Weak<NavigatorInner>,
    id: u64,
}

impl Drop for NavSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.navigator.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NAV_ENTRIES;

    fn recorder(navigator: &Navigator) -> (Rc<RefCell<Vec<String>>>, NavSubscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = navigator.subscribe(move |loc| sink.borrow_mut().push(loc.path.clone()));
        (seen, sub)
    }

    #[test]
    fn test_initial_location_from_history() {
        let navigator = Navigator::new(MemoryHistory::new("/employees/edit/7/"));
        assert_eq!(navigator.path(), "/employees/edit/7");
        assert_eq!(navigator.route(), AppRoute::EditEmployee { id: 7 });
    }

    #[test]
    fn test_last_navigation_wins() {
        for a in NAV_ENTRIES {
            for b in NAV_ENTRIES {
                if a.path == b.path {
                    continue;
                }
                let navigator = Navigator::new(MemoryHistory::new("/statistics/x"));
                let (seen, _sub) = recorder(&navigator);
                navigator.navigate(a.path);
                navigator.navigate(b.path);
                assert_eq!(navigator.path(), b.path);
                assert_eq!(*seen.borrow(), vec![a.path.to_string(), b.path.to_string()]);
            }
        }
    }

    #[test]
    fn test_same_location_is_noop() {
        let history = Rc::new(MemoryHistory::new("/"));
        let navigator = Navigator::new(history.clone());
        let (seen, _sub) = recorder(&navigator);
        assert!(!navigator.navigate("/"));
        assert!(navigator.navigate("/employees"));
        assert!(!navigator.navigate("/employees/"));
        assert_eq!(history.len(), 2);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let history = Rc::new(MemoryHistory::new("/employees/add"));
        let navigator = Navigator::new(history.clone());
        navigator.replace("/employees/12");
        assert_eq!(history.len(), 1);
        assert_eq!(history.location(), "/employees/12");
        assert_eq!(navigator.route(), AppRoute::EmployeeDetails { id: 12 });
    }

    #[test]
    fn test_sync_from_browser_after_back() {
        let history = Rc::new(MemoryHistory::new("/"));
        let navigator = Navigator::new(history.clone());
        navigator.navigate("/statistics");
        history.back();
        assert!(navigator.sync_from_browser());
        assert_eq!(navigator.route(), AppRoute::Dashboard);
        assert!(!navigator.sync_from_browser());
    }

    #[test]
    fn test_nested_intent_is_delivered_in_order() {
        let navigator = Navigator::new(MemoryHistory::new("/"));
        let redirecting = navigator.clone();
        let _redirect = navigator.subscribe(move |loc| {
            if loc.route.is_not_found() {
                redirecting.replace("/");
            }
        });
        let (seen, _sub) = recorder(&navigator);

        navigator.navigate("/missing");

        assert_eq!(navigator.route(), AppRoute::Dashboard);
        assert_eq!(*seen.borrow(), vec!["/missing".to_string(), "/".to_string()]);
    }

    #[test]
    fn test_dropped_subscription_stops_delivery() {
        let navigator = Navigator::new(MemoryHistory::new("/"));
        let (seen, sub) = recorder(&navigator);
        navigator.navigate("/employees");
        drop(sub);
        assert_eq!(navigator.listener_count(), 0);
        navigator.navigate("/statistics");
        assert_eq!(*seen.borrow(), vec!["/employees".to_string()]);
    }
}
