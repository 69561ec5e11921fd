use std::sync::{Mutex, MutexGuard};

/// Anything kept in a catalog collection.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Where a newly created record lands in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Newest-first collections (leads, properties, portfolio).
    Front,
    Back,
}

/// Storage abstraction behind every catalog API.
///
/// `modify` applies the change while the store holds its own lock, so a
/// read-modify-write never interleaves with another writer.
pub trait RecordStore<T: Record>: Send + Sync {
    fn list(&self) -> Result<Vec<T>, StoreError>;
    fn fetch(&self, id: &str) -> Result<Option<T>, StoreError>;
    fn insert(&self, record: T, placement: Placement) -> Result<T, StoreError>;
    fn modify(&self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Result<Option<T>, StoreError>;
    fn remove(&self, id: &str) -> Result<Option<T>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record '{0}' already exists")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store backed by a vector, preserving insertion order.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Record> InMemoryStore<T> {
    pub fn seeded(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<T>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("collection lock poisoned".to_string()))
    }
}

impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.guard()?.clone())
    }

    fn fetch(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.guard()?.iter().find(|record| record.id() == id).cloned())
    }

    fn insert(&self, record: T, placement: Placement) -> Result<T, StoreError> {
        let mut records = self.guard()?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(StoreError::Conflict(record.id().to_string()));
        }
        match placement {
            Placement::Front => records.insert(0, record.clone()),
            Placement::Back => records.push(record.clone()),
        }
        Ok(record)
    }

    fn modify(&self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Result<Option<T>, StoreError> {
        let mut records = self.guard()?;
        let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
            return Ok(None);
        };
        apply(record);
        Ok(Some(record.clone()))
    }

    fn remove(&self, id: &str) -> Result<Option<T>, StoreError> {
        let mut records = self.guard()?;
        let position = records.iter().position(|record| record.id() == id);
        Ok(position.map(|index| records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        body: String,
    }

    impl Record for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            body: format!("body of {id}"),
        }
    }

    #[test]
    fn placement_controls_order() {
        let store = InMemoryStore::seeded(vec![note("b")]);
        store.insert(note("a"), Placement::Front).expect("insert front");
        store.insert(note("c"), Placement::Back).expect("insert back");

        let ids: Vec<String> = store
            .list()
            .expect("list")
            .into_iter()
            .map(|note| note.id)
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn duplicate_ids_conflict() {
        let store = InMemoryStore::seeded(vec![note("a")]);
        let err = store
            .insert(note("a"), Placement::Back)
            .expect_err("duplicate rejected");
        assert!(matches!(err, StoreError::Conflict(id) if id == "a"));
    }

    #[test]
    fn modify_and_remove_report_missing_records() {
        let store = InMemoryStore::seeded(vec![note("a")]);

        let updated = store
            .modify("a", &mut |note| note.body = "edited".to_string())
            .expect("modify")
            .expect("record present");
        assert_eq!(updated.body, "edited");
        assert!(store
            .modify("missing", &mut |_| {})
            .expect("modify")
            .is_none());

        assert!(store.remove("missing").expect("remove").is_none());
        assert_eq!(store.remove("a").expect("remove").map(|n| n.id), Some("a".to_string()));
        assert!(store.list().expect("list").is_empty());
    }
}
