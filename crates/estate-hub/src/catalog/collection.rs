use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;

use super::store::{InMemoryStore, Placement, Record, RecordStore};
use super::CatalogError;
use crate::config::MockLatency;

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Timestamp-derived identifier, unique within the process.
pub(crate) fn next_record_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let sequence = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{millis}-{sequence}")
}

/// A record store wrapped in the simulated network latency of the mock API.
pub struct MockCollection<T: Record> {
    name: &'static str,
    store: Arc<dyn RecordStore<T>>,
    latency: MockLatency,
}

impl<T: Record> Clone for MockCollection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            store: Arc::clone(&self.store),
            latency: self.latency,
        }
    }
}

impl<T: Record> MockCollection<T> {
    pub fn new(name: &'static str, store: Arc<dyn RecordStore<T>>, latency: MockLatency) -> Self {
        Self {
            name,
            store,
            latency,
        }
    }

    pub fn in_memory(name: &'static str, records: Vec<T>, latency: MockLatency) -> Self {
        Self::new(name, Arc::new(InMemoryStore::seeded(records)), latency)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn all(&self) -> Result<Vec<T>, CatalogError> {
        pause(self.latency.read).await;
        Ok(self.store.list()?)
    }

    pub async fn filter<P>(&self, predicate: P) -> Result<Vec<T>, CatalogError>
    where
        P: Fn(&T) -> bool,
    {
        pause(self.latency.read).await;
        let records = self.store.list()?;
        Ok(records.into_iter().filter(|record| predicate(record)).collect())
    }

    pub async fn find(&self, id: &str) -> Result<Option<T>, CatalogError> {
        pause(self.latency.read).await;
        Ok(self.store.fetch(id)?)
    }

    pub async fn create(&self, record: T, placement: Placement) -> Result<T, CatalogError> {
        pause(self.latency.write).await;
        let stored = self.store.insert(record, placement)?;
        info!(collection = self.name, id = stored.id(), "record created");
        Ok(stored)
    }

    pub async fn modify<F>(&self, id: &str, mut apply: F) -> Result<Option<T>, CatalogError>
    where
        F: FnMut(&mut T),
    {
        pause(self.latency.write).await;
        let updated = self.store.modify(id, &mut apply)?;
        if updated.is_some() {
            info!(collection = self.name, id, "record updated");
        }
        Ok(updated)
    }

    pub async fn remove(&self, id: &str) -> Result<bool, CatalogError> {
        pause(self.latency.write).await;
        let removed = self.store.remove(id)?.is_some();
        if removed {
            info!(collection = self.name, id, "record deleted");
        }
        Ok(removed)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Tag(String);

    impl Record for Tag {
        fn id(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let first = next_record_id("lead");
        let second = next_record_id("lead");
        assert_ne!(first, second);
        assert!(first.starts_with("lead-"));
    }

    #[tokio::test]
    async fn reads_wait_for_the_configured_delay() {
        let latency = MockLatency {
            read: Duration::from_millis(20),
            write: Duration::ZERO,
        };
        let collection = MockCollection::in_memory("tags", vec![Tag("a".into())], latency);

        let started = std::time::Instant::now();
        let records = collection.all().await.expect("list succeeds");
        assert_eq!(records.len(), 1);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn removing_missing_record_is_not_an_error() {
        let collection = MockCollection::in_memory("tags", Vec::<Tag>::new(), MockLatency::none());
        assert!(!collection.remove("ghost").await.expect("remove resolves"));
    }
}
