use std::fmt;
use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// Disabled; nothing requested.
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot handed to consumers: `{data, is_loading, error}`.
#[derive(Debug)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<QueryError>,
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }
}

impl<T> QueryState<T> {
    pub(crate) fn idle(data: Option<Arc<T>>) -> Self {
        Self {
            status: QueryStatus::Idle,
            data,
            error: None,
        }
    }

    pub(crate) fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            error: None,
        }
    }

    pub(crate) fn success(data: Arc<T>) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    pub(crate) fn failed(error: QueryError) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(error),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }
}

/// Error raised by a fetch function, kept as-is and shareable between snapshots.
#[derive(Clone)]
pub struct QueryError(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl QueryError {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    pub(crate) fn unresolved(key: &str) -> Self {
        Self::new(Unresolved(key.to_string()))
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Debug for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QueryError").field(&self.0).finish()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("query '{0}' finished without data")]
struct Unresolved(String);
