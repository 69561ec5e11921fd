use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::client::{CachedValue, QueryClient};
use super::state::{QueryError, QueryState, QueryStatus};

pub(crate) type FetchFn<T> =
    Arc<dyn Fn() -> BoxFuture<'static, Result<T, QueryError>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub enabled: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl QueryOptions {
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}

/// One consumer's view of a cached fetch.
///
/// State transitions are `idle`, or `loading → success | error`; `refetch`
/// re-enters `loading` from any state. Every change is published on a watch
/// channel so subscribers can re-render. Dropping the query drops any fetch it
/// is awaiting, so no response outlives its consumer.
pub struct Query<T> {
    key: String,
    client: QueryClient,
    fetch: FetchFn<T>,
    options: QueryOptions,
    /// Generation of this observer's most recent fetch; zero before the first one.
    latest: AtomicU64,
    state: watch::Sender<QueryState<T>>,
}

impl<T> Query<T>
where
    T: Send + Sync + 'static,
{
    pub(crate) fn new(
        key: String,
        client: QueryClient,
        fetch: FetchFn<T>,
        options: QueryOptions,
        initial: QueryState<T>,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            key,
            client,
            fetch,
            options,
            latest: AtomicU64::new(0),
            state,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> QueryStatus {
        self.state.borrow().status
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<QueryError> {
        self.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Perform the initial fetch if the query is enabled and missed the cache.
    /// Calling it again after the first fetch has started does nothing.
    pub async fn load(&self) {
        if !self.options.enabled || self.status() != QueryStatus::Loading {
            return;
        }
        if self.latest.load(Ordering::Acquire) != 0 {
            return;
        }
        self.run().await;
    }

    /// Drop the cached entry and fetch again, whatever the current state.
    pub async fn refetch(&self) {
        self.client.invalidate(&self.key);
        self.run().await;
    }

    async fn run(&self) {
        let pending = self.client.begin(&self.key);
        let generation = pending.generation();
        self.latest.store(generation, Ordering::Release);
        self.state.send_modify(|state| {
            state.status = QueryStatus::Loading;
            state.error = None;
        });

        let outcome = (self.fetch)().await;

        if self.latest.load(Ordering::Acquire) != generation {
            warn!(key = %self.key, generation, "dropping response superseded by a newer fetch");
            return;
        }

        match outcome {
            Ok(value) => {
                let value = Arc::new(value);
                let shared: CachedValue = value.clone();
                if !pending.commit(shared) {
                    debug!(key = %self.key, generation, "cache entry superseded; value kept locally");
                }
                self.state.send_replace(QueryState::success(value));
            }
            Err(error) => {
                debug!(key = %self.key, %error, "query fetch failed");
                self.state.send_replace(QueryState::failed(error));
            }
        }
    }
}
