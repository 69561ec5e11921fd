//! Keyed query cache with per-consumer observers.
//!
//! A [`QueryClient`] holds fetched values by string key. Each [`Query`]
//! observes one key: it is served from the cache when possible, fetches once
//! otherwise, and exposes `{data, is_loading, error}` snapshots. Mutations call
//! [`QueryClient::invalidate`] or [`QueryClient::invalidate_prefix`] so the
//! next read fetches again; responses from fetches started before an
//! invalidation never repopulate the cache.

mod client;
mod observer;
mod state;

pub use client::QueryClient;
pub use observer::{Query, QueryOptions};
pub use state::{QueryError, QueryState, QueryStatus};
