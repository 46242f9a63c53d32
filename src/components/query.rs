//! Reactive bridge between the query client and components.
//!
//! [`use_query`] subscribes the calling component to one cache key and
//! mirrors its events into signals. The subscription is dropped when the
//! component is cleaned up, so results arriving after navigation are never
//! delivered to it.

use std::future::Future;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::feedback::{ErrorPanel, Loading};
use crate::core::error::FetchError;
use crate::core::{QueryClient, QueryEvent, QueryKey, Subscription, keys};

/// What a component knows about one query.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(FetchError),
}

/// Reactive view of one cache key.
pub struct QueryHandle<T: Send + Sync + 'static> {
    pub state: RwSignal<QueryState<T>>,
    /// A request for the key is outstanding (including background revalidation).
    pub fetching: RwSignal<bool>,
    key: StoredValue<QueryKey>,
    client: StoredValue<QueryClient, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryHandle<T> {}

impl<T: Clone + Send + Sync + 'static> QueryHandle<T> {
    /// Mark this key (not its nested keys) outdated; every component
    /// observing it fetches again.
    pub fn refetch(&self) {
        let key = self.key.get_value();
        self.client.with_value(|client| client.invalidate_query(&key));
    }

    /// Current data, if any.
    pub fn data(&self) -> Option<T> {
        match self.state.get() {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Render the data with `ready`, or the shared loading/error views.
    pub fn render<V>(&self, ready: impl FnOnce(T) -> V) -> AnyView
    where
        V: IntoView + 'static,
    {
        let handle = *self;
        match self.state.get() {
            QueryState::Loading => view! { <Loading /> }.into_any(),
            QueryState::Ready(value) => ready(value).into_any(),
            QueryState::Failed(error) => view! {
                <ErrorPanel
                    message=error.to_string()
                    on_retry=Callback::new(move |_: ()| handle.refetch())
                />
            }
            .into_any(),
        }
    }
}

/// Observe `key`, fetching it with `fetcher` now and whenever it is invalidated.
///
/// Cached data (even stale) is shown immediately while the revalidation runs.
/// The state signal only changes when the data actually differs, so forms
/// rendered from it are not reset by a background refetch.
pub fn use_query<T, F, Fut>(key: QueryKey, fetcher: F) -> QueryHandle<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn() -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let client = ctx.client();

    let initial = match client.get_query_data::<T>(&key) {
        Some(value) => QueryState::Ready(value),
        None => QueryState::Loading,
    };
    let state = RwSignal::new(initial);
    // Joining a request another page started sends no Fetching event.
    let fetching = RwSignal::new(client.is_fetching(&key));

    let start = {
        let key = key.clone();
        move |client: &QueryClient| {
            spawn_local(revalidate(client.clone(), key.clone(), fetcher.clone(), fetching));
        }
    };

    let observer = {
        let key = key.clone();
        let start = start.clone();
        move |client: &QueryClient, event: &QueryEvent| match event {
            QueryEvent::Fetching => fetching.set(true),
            QueryEvent::Updated => {
                fetching.set(false);
                if let Some(value) = client.get_query_data::<T>(&key) {
                    replace_if_changed(state, QueryState::Ready(value));
                }
            }
            QueryEvent::Failed(error) => {
                fetching.set(false);
                replace_if_changed(state, QueryState::Failed(error.clone()));
            }
            QueryEvent::Invalidated => start(client),
        }
    };

    observe_while_mounted(&client, &key, observer);
    start(&client);

    QueryHandle {
        state,
        fetching,
        key: StoredValue::new(key),
        client: ctx.query,
    }
}

/// Subscribe `observer` to `key` until the current reactive owner is
/// cleaned up.
fn observe_while_mounted(
    client: &QueryClient,
    key: &QueryKey,
    observer: impl Fn(&QueryClient, &QueryEvent) + 'static,
) {
    let subscription: Subscription = client.subscribe(key, observer);
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        subscription.try_update_value(|sub| {
            if let Some(sub) = sub.take() {
                log::debug!("query {}: observer released", sub.key());
            }
        });
    });
}

/// Fetch `key` once. Results reach the component through its subscription;
/// only `fetching` is settled here, for answers served from fresh cache
/// without a request.
async fn revalidate<T, F, Fut>(
    client: QueryClient,
    key: QueryKey,
    fetcher: F,
    fetching: RwSignal<bool>,
) where
    T: Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    if let Err(FetchError::TypeMismatch(k)) = client.fetch_query(&key, fetcher).await {
        log::error!("query {}: cached value has the wrong type", k);
    }
    if !client.is_fetching(&key) {
        fetching.try_set(false);
    }
}

fn replace_if_changed<T>(state: RwSignal<QueryState<T>>, next: QueryState<T>)
where
    T: PartialEq + Send + Sync + 'static,
{
    if state.with_untracked(|current| *current != next) {
        state.set(next);
    }
}

// ============================================================================
// Mutations
// ============================================================================

/// State of a write issued from a component.
#[derive(Clone, Copy)]
pub struct Mutation {
    pub pending: RwSignal<bool>,
    pub error: RwSignal<Option<FetchError>>,
    client: StoredValue<QueryClient, LocalStorage>,
}

impl Mutation {
    /// Run `op` once; employee and statistics queries are invalidated on
    /// success before `on_success` runs. Ignored while another run is pending.
    ///
    /// If the component that owns the mutation is gone by the time `op`
    /// settles, the outcome is dropped and `on_success` never runs.
    pub fn run<T, Fut>(&self, op: Fut, on_success: impl FnOnce(T) + 'static)
    where
        T: 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        self.execute(op, None, on_success);
    }

    /// [`run`](Self::run) for a delete: on success the cached entries under
    /// `removed` are dropped as well, whether or not the page is still shown.
    pub fn run_removing<T, Fut>(
        &self,
        op: Fut,
        removed: QueryKey,
        on_success: impl FnOnce(T) + 'static,
    ) where
        T: 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        self.execute(op, Some(removed), on_success);
    }

    fn execute<T, Fut>(
        &self,
        op: Fut,
        removed: Option<QueryKey>,
        on_success: impl FnOnce(T) + 'static,
    ) where
        T: 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        if self.pending.get_untracked() {
            return;
        }
        self.pending.set(true);
        self.error.set(None);

        let client = self.client.get_value();
        let pending = self.pending;
        let error = self.error;
        spawn_local(async move {
            let result = client.mutate(&keys::after_write(), op).await;
            if let (Ok(_), Some(key)) = (&result, &removed) {
                client.remove_queries(key);
            }
            if let Some(value) = settle_mutation(pending, error, result) {
                on_success(value);
            }
        });
    }
}

/// Record a finished write in its owner's signals.
///
/// Returns the value to hand to `on_success`, or `None` when the write
/// failed or the owner has been disposed since it started.
fn settle_mutation<T>(
    pending: RwSignal<bool>,
    error: RwSignal<Option<FetchError>>,
    result: Result<T, FetchError>,
) -> Option<T> {
    if pending.try_set(false).is_some() {
        log::debug!("mutation settled after its page was left; outcome dropped");
        return None;
    }
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error.try_set(Some(e));
            None
        }
    }
}

/// Create a [`Mutation`] bound to the application's query client.
pub fn use_mutation() -> Mutation {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    Mutation {
        pending: RwSignal::new(false),
        error: RwSignal::new(None),
        client: ctx.query,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use futures::channel::oneshot;
    use futures::future;
    use leptos::reactive::owner::Owner;

    use super::*;
    use crate::core::QueryClientConfig;
    use crate::core::query::ManualClock;

    fn client_with(config: QueryClientConfig) -> QueryClient {
        QueryClient::new(
            QueryClientConfig {
                fetch_timeout: None,
                ..config
            },
            Rc::new(ManualClock::default()),
        )
    }

    fn updates_counter(owner: &Owner, client: &QueryClient, key: &QueryKey) -> Rc<Cell<usize>> {
        let updates = Rc::new(Cell::new(0));
        let counter = updates.clone();
        owner.with(|| {
            observe_while_mounted(client, key, move |_, event| {
                if *event == QueryEvent::Updated {
                    counter.set(counter.get() + 1);
                }
            })
        });
        updates
    }

    #[test]
    fn test_observer_released_with_owner() {
        let client = client_with(QueryClientConfig::default());
        let key = keys::employee(5);
        let owner = Owner::new();
        let updates = updates_counter(&owner, &client, &key);

        client.set_query_data(&key, 1u32);
        assert_eq!(updates.get(), 1);

        owner.cleanup();
        assert_eq!(client.observer_count(&key), 0);
        client.set_query_data(&key, 2u32);
        assert_eq!(updates.get(), 1);
    }

    #[tokio::test]
    async fn test_response_after_unmount_is_not_delivered() {
        let client = client_with(QueryClientConfig::default());
        let key = keys::employee(8);
        let owner = Owner::new();
        let updates = updates_counter(&owner, &client, &key);

        let (tx, rx) = oneshot::channel::<u32>();
        let rx = RefCell::new(Some(rx));
        let fetcher = move || {
            let rx = rx.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx.await.map_err(|_| FetchError::Network("closed".to_string())),
                    None => Err(FetchError::Network("called twice".to_string())),
                }
            }
        };

        let (result, _) = futures::join!(client.fetch_query(&key, fetcher), async {
            // Navigating away disposes the page's owner.
            owner.cleanup();
            let _ = tx.send(8);
        });

        assert_eq!(result, Ok(8));
        assert_eq!(updates.get(), 0);
        assert_eq!(client.get_query_data::<u32>(&key), Some(8));
    }

    #[tokio::test]
    async fn test_fresh_cache_hit_clears_fetching() {
        let client = client_with(QueryClientConfig {
            stale_time: Duration::from_secs(60),
            ..QueryClientConfig::default()
        });
        let key = keys::statistics();
        client.set_query_data(&key, 3u32);

        let owner = Owner::new();
        let fetching = owner.with(|| RwSignal::new(true));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let fetcher = move || {
            counter.set(counter.get() + 1);
            future::ready(Ok::<u32, FetchError>(4))
        };

        revalidate(client.clone(), key, fetcher, fetching).await;

        assert_eq!(calls.get(), 0);
        assert!(!fetching.get_untracked());
    }

    #[test]
    fn test_mutation_outcome_applied_while_mounted() {
        let owner = Owner::new();
        owner.with(|| {
            let pending = RwSignal::new(true);
            let error = RwSignal::new(None);

            assert_eq!(settle_mutation(pending, error, Ok(7u32)), Some(7));
            assert!(!pending.get_untracked());

            pending.set(true);
            let failed: Result<u32, _> = Err(FetchError::Http(500));
            assert_eq!(settle_mutation(pending, error, failed), None);
            assert!(!pending.get_untracked());
            assert_eq!(error.get_untracked(), Some(FetchError::Http(500)));
        });
    }

    #[test]
    fn test_mutation_outcome_dropped_after_unmount() {
        let owner = Owner::new();
        let (pending, error) = owner.with(|| (RwSignal::new(true), RwSignal::new(None)));

        owner.cleanup();

        assert_eq!(settle_mutation(pending, error, Ok(7u32)), None);
        let failed: Result<u32, _> = Err(FetchError::Timeout);
        assert_eq!(settle_mutation(pending, error, failed), None);
    }
}
