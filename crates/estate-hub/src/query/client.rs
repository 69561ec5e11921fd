use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::debug;

use super::observer::{FetchFn, Query, QueryOptions};
use super::state::{QueryError, QueryState};

pub(crate) type CachedValue = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, CachedValue>,
    /// Client-wide counter; generations are never reused.
    next_generation: u64,
    /// Generation of the fetch currently allowed to write each key. Removed on
    /// commit, invalidation, or when the fetch is dropped.
    pending: HashMap<String, u64>,
}

/// Write permission for one fetch of one key.
///
/// Dropping it without committing (error, stale response, cancelled future)
/// releases the key's bookkeeping.
pub(crate) struct PendingFetch {
    client: QueryClient,
    key: String,
    generation: u64,
}

impl PendingFetch {
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Store a fetched value unless a newer fetch or an invalidation happened since `begin`.
    pub(crate) fn commit(&self, value: CachedValue) -> bool {
        let mut inner = self.client.lock();
        if inner.pending.get(&self.key).copied() != Some(self.generation) {
            return false;
        }
        inner.pending.remove(&self.key);
        inner.entries.insert(self.key.clone(), value);
        true
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        let mut inner = self.client.lock();
        if inner.pending.get(&self.key).copied() == Some(self.generation) {
            inner.pending.remove(&self.key);
        }
    }
}

/// Key → value cache shared by every [`Query`] created from it.
#[derive(Clone, Default)]
pub struct QueryClient {
    inner: Arc<Mutex<CacheInner>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance used by the HTTP service.
    pub fn global() -> &'static QueryClient {
        static GLOBAL: OnceLock<QueryClient> = OnceLock::new();
        GLOBAL.get_or_init(QueryClient::new)
    }

    // A poisoned lock only means a panic happened mid-insert; the map is still usable.
    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value for `key`, if present and of type `T`.
    pub fn cached<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let value = self.lock().entries.get(key).cloned()?;
        match value.downcast::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                debug!(key, "cached value has a different type; treating as a miss");
                None
            }
        }
    }

    /// Prime the cache directly, outside any fetch.
    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        let key = key.into();
        let mut inner = self.lock();
        inner.pending.remove(&key);
        inner.entries.insert(key, Arc::new(value));
    }

    /// Drop the entry for `key`. In-flight fetches for it will no longer write the cache.
    pub fn invalidate(&self, key: &str) -> bool {
        let mut inner = self.lock();
        inner.pending.remove(key);
        inner.entries.remove(key).is_some()
    }

    /// Drop every entry whose key starts with `prefix`; returns how many were removed.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut inner = self.lock();
        inner.pending.retain(|key, _| !key.starts_with(prefix));
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - inner.entries.len();
        if removed > 0 {
            debug!(prefix, removed, "query cache entries invalidated");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.pending.clear();
        inner.entries.clear();
    }

    /// Start a fetch for `key`, superseding any fetch still in flight.
    pub(crate) fn begin(&self, key: &str) -> PendingFetch {
        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;
        inner.pending.insert(key.to_string(), generation);
        PendingFetch {
            client: self.clone(),
            key: key.to_string(),
            generation,
        }
    }

    /// Create an observer for `key`.
    ///
    /// A cached value is returned immediately without calling `fetch`. Otherwise the
    /// observer starts in the loading state and [`Query::load`] performs the fetch.
    pub fn query<T, F, Fut, E>(
        &self,
        key: impl Into<String>,
        fetch: F,
        options: QueryOptions,
    ) -> Query<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let key = key.into();
        let fetch: FetchFn<T> = Arc::new(move || {
            let pending = fetch();
            Box::pin(async move { pending.await.map_err(QueryError::new) })
        });

        let cached = self.cached::<T>(&key);
        let initial = match (options.enabled, cached) {
            (false, cached) => QueryState::idle(cached),
            (true, Some(hit)) => {
                debug!(key = %key, "query cache hit");
                QueryState::success(hit)
            }
            (true, None) => {
                debug!(key = %key, "query cache miss");
                QueryState::loading()
            }
        };

        Query::new(key, self.clone(), fetch, options, initial)
    }

    /// One-shot read through the cache: the cached value, or the result of `fetch`.
    pub async fn fetch_query<T, F, Fut, E>(
        &self,
        key: impl Into<String>,
        fetch: F,
    ) -> Result<Arc<T>, QueryError>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let query = self.query(key, fetch, QueryOptions::default());
        query.load().await;
        let state = query.state();
        match (state.data, state.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(QueryError::unresolved(query.key())),
        }
    }
}
