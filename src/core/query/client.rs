//! The query client.
//!
//! One instance per application, shared by reference with every page.
//!
//! # Guarantees
//!
//! - **Coalescing**: at most one in-flight request per [`QueryKey`]. Callers
//!   arriving while a request is outstanding join it and observe the same
//!   value or the same terminal error.
//! - **Retry**: a failed attempt is retried `retry` times with exponential
//!   backoff. The last error is terminal; it is recorded as the entry's error
//!   and never stored as data.
//! - **Timeout**: every attempt races `fetch_timeout`; losing counts as a
//!   failed attempt.
//! - **Delivery**: results reach only live [`Subscription`]s. A page that was
//!   unmounted while its request was outstanding has dropped its
//!   subscription and never sees the result.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::pin;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::{self, Either, FutureExt, LocalBoxFuture, Shared};

use super::clock::Clock;
use super::key::QueryKey;
use crate::config;
use crate::core::error::FetchError;

type AnyValue = Rc<dyn Any>;
type FetchOutcome = Result<AnyValue, FetchError>;
type SharedFetch = Shared<LocalBoxFuture<'static, FetchOutcome>>;
type Observer = Rc<dyn Fn(&QueryClient, &QueryEvent)>;

// ============================================================================
// Configuration
// ============================================================================

/// Behaviour of the query client, fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryClientConfig {
    /// Revalidate observed queries when the tab regains focus.
    pub refetch_on_window_focus: bool,
    /// Retries after the first failed attempt.
    pub retry: u32,
    /// Delay before the first retry; doubles for each further retry.
    pub retry_delay: Duration,
    /// Upper bound for the retry delay.
    pub max_retry_delay: Duration,
    /// Per-attempt timeout, `None` to wait indefinitely.
    pub fetch_timeout: Option<Duration>,
    /// How long fetched data is served without revalidation.
    pub stale_time: Duration,
}

impl Default for QueryClientConfig {
    fn default() -> Self {
        Self {
            refetch_on_window_focus: config::query::REFETCH_ON_WINDOW_FOCUS,
            retry: config::query::RETRY,
            retry_delay: Duration::from_millis(config::query::RETRY_DELAY_MS),
            max_retry_delay: Duration::from_millis(config::query::MAX_RETRY_DELAY_MS),
            fetch_timeout: Some(Duration::from_millis(config::FETCH_TIMEOUT_MS)),
            stale_time: Duration::from_millis(config::query::STALE_TIME_MS),
        }
    }
}

impl QueryClientConfig {
    /// Backoff before the retry that follows the `failures`-th failure.
    pub fn retry_delay_for(&self, failures: u32) -> Duration {
        let factor = 2u32.saturating_pow(failures.saturating_sub(1));
        self.retry_delay
            .saturating_mul(factor)
            .min(self.max_retry_delay)
    }
}

// ============================================================================
// Events and Subscriptions
// ============================================================================

/// Notification delivered to the observers of one key.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryEvent {
    /// A request for the key started.
    Fetching,
    /// New data is in the cache.
    Updated,
    /// The request failed after exhausting its retries.
    Failed(FetchError),
    /// Cached data is outdated; observers should fetch again.
    Invalidated,
}

/// Interest in one key. Dropping it de-registers the observer.
pub struct Subscription {
    client: Weak<Inner>,
    key: QueryKey,
    id: u64,
}

impl Subscription {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.client.upgrade() else {
            return;
        };
        let mut observers = inner.observers.borrow_mut();
        if let Some(list) = observers.get_mut(&self.key) {
            list.retain(|(id, _)| *id != self.id);
            if list.is_empty() {
                observers.remove(&self.key);
            }
        }
    }
}

// ============================================================================
// Cache State
// ============================================================================

#[derive(Default)]
struct CacheEntry {
    data: Option<AnyValue>,
    updated_at: Option<Duration>,
    error: Option<FetchError>,
    invalidated: bool,
}

struct InFlight {
    generation: u64,
    task: SharedFetch,
}

struct Inner {
    config: QueryClientConfig,
    clock: Rc<dyn Clock>,
    entries: RefCell<HashMap<QueryKey, CacheEntry>>,
    in_flight: RefCell<HashMap<QueryKey, InFlight>>,
    observers: RefCell<HashMap<QueryKey, Vec<(u64, Observer)>>>,
    next_id: Cell<u64>,
}

impl Inner {
    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

// ============================================================================
// QueryClient
// ============================================================================

/// Shared, single-threaded request cache.
///
/// Cheap to clone; all clones share one cache.
#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<Inner>,
}

impl QueryClient {
    pub fn new(config: QueryClientConfig, clock: Rc<dyn Clock>) -> Self {
        log::debug!("query client created: {:?}", config);
        Self {
            inner: Rc::new(Inner {
                config,
                clock,
                entries: RefCell::new(HashMap::new()),
                in_flight: RefCell::new(HashMap::new()),
                observers: RefCell::new(HashMap::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> &QueryClientConfig {
        &self.inner.config
    }

    /// Return fresh cached data for `key`, join its in-flight request, or
    /// start a new one with `fetcher`.
    pub async fn fetch_query<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, FetchError>
    where
        T: Clone + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        if let Some(fresh) = self.fresh_data::<T>(key) {
            log::debug!("query {}: served from cache", key);
            return fresh;
        }

        let task = self.join_or_start(key, fetcher);
        let value = task.await?;
        downcast(key, &value)
    }

    fn join_or_start<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> SharedFetch
    where
        T: Clone + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        if let Some(existing) = self.inner.in_flight.borrow().get(key) {
            log::debug!("query {}: joining in-flight request", key);
            return existing.task.clone();
        }

        let generation = self.inner.next_id();
        let weak = Rc::downgrade(&self.inner);
        let task_key = key.clone();
        let config = self.inner.config.clone();
        let clock = self.inner.clock.clone();

        let task = async move {
            let attempt = || {
                let pending = fetcher();
                async move { pending.await.map(|value| Rc::new(value) as AnyValue) }
            };
            let outcome = run_with_retry(&config, clock.as_ref(), &task_key, attempt).await;
            if let Some(inner) = weak.upgrade() {
                QueryClient { inner }.settle(&task_key, generation, &outcome);
            }
            outcome
        }
        .boxed_local()
        .shared();

        log::debug!("query {}: fetching", key);
        self.inner.in_flight.borrow_mut().insert(
            key.clone(),
            InFlight {
                generation,
                task: task.clone(),
            },
        );
        self.notify(key, &QueryEvent::Fetching);
        task
    }

    /// Record the outcome of a finished request and notify observers.
    ///
    /// Requests superseded by an invalidation leave the cache untouched.
    fn settle(&self, key: &QueryKey, generation: u64, outcome: &FetchOutcome) {
        {
            let mut in_flight = self.inner.in_flight.borrow_mut();
            match in_flight.get(key) {
                Some(current) if current.generation == generation => {
                    in_flight.remove(key);
                }
                _ => {
                    log::debug!("query {}: superseded result discarded", key);
                    return;
                }
            }
        }

        let now = self.inner.clock.now();
        let event = {
            let mut entries = self.inner.entries.borrow_mut();
            let entry = entries.entry(key.clone()).or_default();
            match outcome {
                Ok(value) => {
                    entry.data = Some(value.clone());
                    entry.updated_at = Some(now);
                    entry.error = None;
                    entry.invalidated = false;
                    QueryEvent::Updated
                }
                Err(e) => {
                    entry.error = Some(e.clone());
                    QueryEvent::Failed(e.clone())
                }
            }
        };

        if self.observer_count(key) == 0 {
            log::debug!("query {}: no observers left, result not delivered", key);
        }
        self.notify(key, &event);
    }

    fn fresh_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<Result<T, FetchError>> {
        let stale_time = self.inner.config.stale_time;
        if stale_time.is_zero() {
            return None;
        }

        let entries = self.inner.entries.borrow();
        let entry = entries.get(key)?;
        let data = entry.data.as_ref()?;
        let updated_at = entry.updated_at?;
        if entry.invalidated {
            return None;
        }

        let age = self.inner.clock.now().saturating_sub(updated_at);
        (age < stale_time).then(|| downcast(key, data))
    }

    /// Cached data for `key`, fresh or stale.
    pub fn get_query_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.inner.entries.borrow();
        let data = entries.get(key)?.data.as_ref()?;
        (**data).downcast_ref::<T>().cloned()
    }

    /// Terminal error of the last request for `key`, if it failed.
    pub fn get_query_error(&self, key: &QueryKey) -> Option<FetchError> {
        self.inner.entries.borrow().get(key)?.error.clone()
    }

    /// Store data directly, e.g. the record returned by an update.
    pub fn set_query_data<T: 'static>(&self, key: &QueryKey, value: T) {
        let now = self.inner.clock.now();
        {
            let mut entries = self.inner.entries.borrow_mut();
            let entry = entries.entry(key.clone()).or_default();
            entry.data = Some(Rc::new(value));
            entry.updated_at = Some(now);
            entry.error = None;
            entry.invalidated = false;
        }
        self.notify(key, &QueryEvent::Updated);
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner.in_flight.borrow().contains_key(key)
    }

    /// Mark every key under `prefix` as outdated and ask its observers to
    /// fetch again. Outstanding requests under `prefix` are superseded.
    pub fn invalidate_queries(&self, prefix: &QueryKey) {
        self.invalidate_where(prefix, |key| key.starts_with(prefix));
    }

    /// Like [`invalidate_queries`](Self::invalidate_queries), but for `key`
    /// alone; keys nested under it keep their data.
    pub fn invalidate_query(&self, key: &QueryKey) {
        self.invalidate_where(key, |candidate| candidate == key);
    }

    fn invalidate_where(&self, target: &QueryKey, matches: impl Fn(&QueryKey) -> bool) {
        for entry in self
            .inner
            .entries
            .borrow_mut()
            .iter_mut()
            .filter(|(key, _)| matches(key))
            .map(|(_, entry)| entry)
        {
            entry.invalidated = true;
        }
        self.inner.in_flight.borrow_mut().retain(|key, _| !matches(key));

        let observed: Vec<QueryKey> = self
            .inner
            .observers
            .borrow()
            .keys()
            .filter(|key| matches(key))
            .cloned()
            .collect();
        log::debug!("invalidate {}: {} observed keys", target, observed.len());
        for key in observed {
            self.notify(&key, &QueryEvent::Invalidated);
        }
    }

    /// Drop cached data under `prefix` without notifying anyone.
    pub fn remove_queries(&self, prefix: &QueryKey) {
        self.inner
            .entries
            .borrow_mut()
            .retain(|key, _| !key.starts_with(prefix));
    }

    /// Browser tab regained focus.
    ///
    /// Returns the number of keys asked to revalidate (always zero unless
    /// `refetch_on_window_focus` is enabled).
    pub fn on_window_focus(&self) -> usize {
        if !self.inner.config.refetch_on_window_focus {
            return 0;
        }
        let observed: Vec<QueryKey> = self.inner.observers.borrow().keys().cloned().collect();
        for key in &observed {
            self.notify(key, &QueryEvent::Invalidated);
        }
        observed.len()
    }

    /// Run a write once (no retry) under the fetch timeout, then invalidate
    /// `invalidates` on success.
    pub async fn mutate<T, Fut>(&self, invalidates: &[QueryKey], op: Fut) -> Result<T, FetchError>
    where
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let result = with_timeout(
            self.inner.clock.as_ref(),
            self.inner.config.fetch_timeout,
            op,
        )
        .await;

        match &result {
            Ok(_) => {
                for prefix in invalidates {
                    self.invalidate_queries(prefix);
                }
            }
            Err(e) => log::warn!("mutation failed: {}", e),
        }
        result
    }

    /// Observe `key` until the returned [`Subscription`] is dropped.
    pub fn subscribe(
        &self,
        key: &QueryKey,
        observer: impl Fn(&QueryClient, &QueryEvent) + 'static,
    ) -> Subscription {
        let id = self.inner.next_id();
        self.inner
            .observers
            .borrow_mut()
            .entry(key.clone())
            .or_default()
            .push((id, Rc::new(observer)));
        Subscription {
            client: Rc::downgrade(&self.inner),
            key: key.clone(),
            id,
        }
    }

    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.inner
            .observers
            .borrow()
            .get(key)
            .map_or(0, |list| list.len())
    }

    fn notify(&self, key: &QueryKey, event: &QueryEvent) {
        let observers: Vec<Observer> = self
            .inner
            .observers
            .borrow()
            .get(key)
            .map(|list| list.iter().map(|(_, o)| o.clone()).collect())
            .unwrap_or_default();
        for observer in observers {
            observer(self, event);
        }
    }
}

// ============================================================================
// Request Execution
// ============================================================================

fn downcast<T: Clone + 'static>(key: &QueryKey, value: &AnyValue) -> Result<T, FetchError> {
    (**value)
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| FetchError::TypeMismatch(key.to_string()))
}

async fn run_with_retry<A, Fut>(
    config: &QueryClientConfig,
    clock: &dyn Clock,
    key: &QueryKey,
    mut attempt: A,
) -> FetchOutcome
where
    A: FnMut() -> Fut,
    Fut: Future<Output = FetchOutcome>,
{
    let mut failures = 0;
    loop {
        match with_timeout(clock, config.fetch_timeout, attempt()).await {
            Ok(value) => return Ok(value),
            Err(e) if failures < config.retry => {
                failures += 1;
                let delay = config.retry_delay_for(failures);
                log::warn!(
                    "query {}: attempt {} failed ({}), retrying in {:?}",
                    key,
                    failures,
                    e,
                    delay
                );
                if !delay.is_zero() {
                    clock.sleep(delay).await;
                }
            }
            Err(e) => {
                log::warn!("query {}: failed after {} attempts: {}", key, failures + 1, e);
                return Err(e);
            }
        }
    }
}

async fn with_timeout<T, Fut>(
    clock: &dyn Clock,
    timeout: Option<Duration>,
    fut: Fut,
) -> Result<T, FetchError>
where
    Fut: Future<Output = Result<T, FetchError>>,
{
    let Some(limit) = timeout else {
        return fut.await;
    };

    let fut = pin!(fut);
    match future::select(fut, clock.sleep(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(FetchError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use futures::channel::oneshot;

    use super::*;
    use crate::core::query::ManualClock;

    fn test_config() -> QueryClientConfig {
        QueryClientConfig {
            fetch_timeout: None,
            ..QueryClientConfig::default()
        }
    }

    fn client_with(config: QueryClientConfig) -> (QueryClient, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::default());
        (QueryClient::new(config, clock.clone()), clock)
    }

    /// Fetcher answering from a script, one outcome per call.
    fn scripted(
        outcomes: Vec<Result<u32, FetchError>>,
    ) -> (
        impl Fn() -> future::Ready<Result<u32, FetchError>> + Clone + 'static,
        Rc<Cell<usize>>,
    ) {
        let calls = Rc::new(Cell::new(0));
        let script = Rc::new(outcomes);
        let counter = calls.clone();
        let fetcher = move || {
            let n = counter.get();
            counter.set(n + 1);
            future::ready(
                script
                    .get(n)
                    .cloned()
                    .unwrap_or(Err(FetchError::Network("script exhausted".to_string()))),
            )
        };
        (fetcher, calls)
    }

    /// Fetcher that stays pending until the returned sender fires.
    fn gated() -> (
        impl Fn() -> LocalBoxFuture<'static, Result<u32, FetchError>> + Clone + 'static,
        oneshot::Sender<u32>,
        Rc<Cell<usize>>,
    ) {
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let fetcher = move || {
            counter.set(counter.get() + 1);
            let rx = rx.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx
                        .await
                        .map_err(|_| FetchError::Network("gate dropped".to_string())),
                    None => Err(FetchError::Network("gate already used".to_string())),
                }
            }
            .boxed_local()
        };
        (fetcher, tx, calls)
    }

    fn recorder(
        client: &QueryClient,
        key: &QueryKey,
    ) -> (Rc<RefCell<Vec<QueryEvent>>>, Subscription) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let sub = client.subscribe(key, move |_, event| sink.borrow_mut().push(event.clone()));
        (events, sub)
    }

    #[test]
    fn test_default_config() {
        let config = QueryClientConfig::default();
        assert!(!config.refetch_on_window_focus);
        assert_eq!(config.retry, 1);
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_retry_backoff() {
        let config = QueryClientConfig::default();
        assert_eq!(config.retry_delay_for(1), Duration::from_secs(1));
        assert_eq!(config.retry_delay_for(2), Duration::from_secs(2));
        assert_eq!(config.retry_delay_for(3), Duration::from_secs(4));
        assert_eq!(config.retry_delay_for(40), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let (client, _) = client_with(test_config());
        let (fetcher, tx, calls) = gated();
        let key = QueryKey::new(["employees"]).with(5);

        let (first, second, _) = futures::join!(
            client.fetch_query(&key, fetcher.clone()),
            client.fetch_query(&key, fetcher),
            async {
                tx.send(42).unwrap();
            }
        );

        assert_eq!(calls.get(), 1);
        assert_eq!(first, Ok(42));
        assert_eq!(second, Ok(42));
        assert!(!client.is_fetching(&key));
        assert_eq!(client.get_query_data::<u32>(&key), Some(42));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_terminal_error() {
        let (client, _) = client_with(QueryClientConfig {
            retry: 0,
            ..test_config()
        });
        let (fetcher, tx, calls) = gated();
        let key = QueryKey::new(["statistics"]);

        let (first, second, _) = futures::join!(
            client.fetch_query(&key, fetcher.clone()),
            client.fetch_query(&key, fetcher),
            async move {
                drop(tx);
            }
        );

        assert_eq!(calls.get(), 1);
        assert!(first.is_err());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_two_failures_are_terminal() {
        let (client, clock) = client_with(test_config());
        let (fetcher, calls) = scripted(vec![Err(FetchError::Http(500)), Err(FetchError::Http(502))]);
        let key = QueryKey::new(["employees"]);

        let result = client.fetch_query(&key, fetcher).await;

        assert_eq!(result, Err(FetchError::Http(502)));
        assert_eq!(calls.get(), 2);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(1)]);
        assert_eq!(client.get_query_data::<u32>(&key), None);
        assert_eq!(client.get_query_error(&key), Some(FetchError::Http(502)));
    }

    #[tokio::test]
    async fn test_failure_then_success() {
        let (client, _) = client_with(test_config());
        let (fetcher, calls) = scripted(vec![Err(FetchError::Timeout), Ok(7)]);
        let key = QueryKey::new(["employees"]).with(7);

        assert_eq!(client.fetch_query(&key, fetcher).await, Ok(7));
        assert_eq!(calls.get(), 2);
        assert_eq!(client.get_query_error(&key), None);
    }

    #[tokio::test]
    async fn test_zero_retry_makes_one_attempt() {
        let (client, clock) = client_with(QueryClientConfig {
            retry: 0,
            ..test_config()
        });
        let (fetcher, calls) = scripted(vec![Err(FetchError::Http(503)), Ok(1)]);

        let result = client.fetch_query(&QueryKey::new(["employees"]), fetcher).await;

        assert_eq!(result, Err(FetchError::Http(503)));
        assert_eq!(calls.get(), 1);
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_attempt_times_out() {
        let (client, clock) = client_with(QueryClientConfig {
            retry: 0,
            fetch_timeout: Some(Duration::from_secs(10)),
            ..test_config()
        });
        let (fetcher, _tx, _) = gated();

        let result = client.fetch_query(&QueryKey::new(["employees"]), fetcher).await;

        assert_eq!(result, Err(FetchError::Timeout));
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(10)]);
    }

    #[tokio::test]
    async fn test_stale_time_serves_cache() {
        let (client, clock) = client_with(QueryClientConfig {
            stale_time: Duration::from_secs(60),
            ..test_config()
        });
        let (fetcher, calls) = scripted(vec![Ok(1), Ok(2)]);
        let key = QueryKey::new(["employees"]);

        assert_eq!(client.fetch_query(&key, fetcher.clone()).await, Ok(1));
        clock.advance(Duration::from_secs(30));
        assert_eq!(client.fetch_query(&key, fetcher.clone()).await, Ok(1));
        assert_eq!(calls.get(), 1);

        clock.advance(Duration::from_secs(31));
        assert_eq!(client.fetch_query(&key, fetcher).await, Ok(2));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_zero_stale_time_always_revalidates() {
        let (client, _) = client_with(test_config());
        let (fetcher, calls) = scripted(vec![Ok(1), Ok(2)]);
        let key = QueryKey::new(["employees"]);

        assert_eq!(client.fetch_query(&key, fetcher.clone()).await, Ok(1));
        assert_eq!(client.get_query_data::<u32>(&key), Some(1));
        assert_eq!(client.fetch_query(&key, fetcher).await, Ok(2));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_observers_receive_lifecycle_events() {
        let (client, _) = client_with(test_config());
        let key = QueryKey::new(["employees"]).with(3);
        let (events, _sub) = recorder(&client, &key);
        let (fetcher, _) = scripted(vec![Ok(3)]);

        client.fetch_query(&key, fetcher).await.unwrap();

        assert_eq!(*events.borrow(), vec![QueryEvent::Fetching, QueryEvent::Updated]);
    }

    #[tokio::test]
    async fn test_result_not_delivered_after_unsubscribe() {
        let (client, _) = client_with(test_config());
        let details = QueryKey::new(["employees"]).with(5);
        let stats = QueryKey::new(["statistics"]);
        let (fetcher, tx, _) = gated();

        let (details_events, details_sub) = recorder(&client, &details);
        let (stats_events, _stats_sub) = recorder(&client, &stats);

        let (result, _) = futures::join!(client.fetch_query(&details, fetcher), async move {
            // Page navigated away before the response arrived.
            drop(details_sub);
            tx.send(5).unwrap();
        });

        assert_eq!(result, Ok(5));
        assert_eq!(*details_events.borrow(), vec![QueryEvent::Fetching]);
        assert!(stats_events.borrow().is_empty());
        assert_eq!(client.observer_count(&details), 0);
    }

    #[tokio::test]
    async fn test_window_focus_respects_config() {
        let (client, _) = client_with(test_config());
        let key = QueryKey::new(["employees"]);
        let (events, _sub) = recorder(&client, &key);
        assert_eq!(client.on_window_focus(), 0);
        assert!(events.borrow().is_empty());

        let (client, _) = client_with(QueryClientConfig {
            refetch_on_window_focus: true,
            ..test_config()
        });
        let (events, _sub) = recorder(&client, &key);
        assert_eq!(client.on_window_focus(), 1);
        assert_eq!(*events.borrow(), vec![QueryEvent::Invalidated]);
    }

    #[tokio::test]
    async fn test_mutation_invalidates_prefix() {
        let (client, _) = client_with(test_config());
        let list = QueryKey::new(["employees"]);
        let one = QueryKey::new(["employees"]).with(1);
        let stats = QueryKey::new(["statistics"]);
        client.set_query_data(&one, 10u32);

        let (list_events, _a) = recorder(&client, &list);
        let (one_events, _b) = recorder(&client, &one);
        let (stats_events, _c) = recorder(&client, &stats);

        let result = client
            .mutate(&[list.clone()], async { Ok::<_, FetchError>(()) })
            .await;

        assert!(result.is_ok());
        assert_eq!(*list_events.borrow(), vec![QueryEvent::Invalidated]);
        assert_eq!(*one_events.borrow(), vec![QueryEvent::Invalidated]);
        assert!(stats_events.borrow().is_empty());
        // Stale data stays readable until the refetch lands.
        assert_eq!(client.get_query_data::<u32>(&one), Some(10));
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache_valid() {
        let (client, _) = client_with(test_config());
        let list = QueryKey::new(["employees"]);
        let (events, _sub) = recorder(&client, &list);

        let result: Result<(), _> = client
            .mutate(&[list.clone()], async {
                Err(FetchError::Api {
                    status: 409,
                    message: "duplicate".to_string(),
                })
            })
            .await;

        assert!(result.is_err());
        assert!(events.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_invalidation_supersedes_in_flight_request() {
        let (client, _) = client_with(test_config());
        let key = QueryKey::new(["employees"]);
        let (old_fetcher, tx, _) = gated();
        let (new_fetcher, _) = scripted(vec![Ok(2)]);

        let (old, new) = futures::join!(client.fetch_query(&key, old_fetcher), async {
            client.invalidate_queries(&key);
            let fresh = client.fetch_query(&key, new_fetcher).await;
            tx.send(1).unwrap();
            fresh
        });

        assert_eq!(old, Ok(1));
        assert_eq!(new, Ok(2));
        assert_eq!(client.get_query_data::<u32>(&key), Some(2));
    }

    #[test]
    fn test_exact_invalidation_leaves_nested_keys() {
        let (client, _) = client_with(test_config());
        let list = QueryKey::new(["employees"]);
        let one = QueryKey::new(["employees"]).with(1);
        client.set_query_data(&list, 3u32);
        client.set_query_data(&one, 10u32);

        let (list_events, _a) = recorder(&client, &list);
        let (one_events, _b) = recorder(&client, &one);

        client.invalidate_query(&list);

        assert_eq!(*list_events.borrow(), vec![QueryEvent::Invalidated]);
        assert!(one_events.borrow().is_empty());
    }

    #[test]
    fn test_remove_queries_drops_subtree_silently() {
        let (client, _) = client_with(test_config());
        let one = QueryKey::new(["employees"]).with(1);
        let stats = QueryKey::new(["statistics"]);
        client.set_query_data(&one, 10u32);
        client.set_query_data(&stats, 4u32);
        let (events, _sub) = recorder(&client, &one);

        client.remove_queries(&one);

        assert_eq!(client.get_query_data::<u32>(&one), None);
        assert_eq!(client.get_query_data::<u32>(&stats), Some(4));
        assert!(events.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_type_mismatch_is_reported() {
        let (client, _) = client_with(QueryClientConfig {
            stale_time: Duration::from_secs(60),
            ..test_config()
        });
        let key = QueryKey::new(["employees"]);
        client.set_query_data(&key, "not a number".to_string());
        let (fetcher, _) = scripted(vec![Ok(1)]);

        let result = client.fetch_query(&key, fetcher).await;

        assert_eq!(result, Err(FetchError::TypeMismatch(key.to_string())));
    }
}
