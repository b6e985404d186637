//! [`ActorState`] implementation for [`Draft`]: hydrate on start, persist on commit.

use super::{Draft, DraftCommand, DraftError, DraftEvent};
use crate::storage::{KeyValueStore, CART_KEY};
use async_trait::async_trait;
use console_framework::ActorState;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where the draft is persisted. Injected into the actor at `run()` time.
#[derive(Clone)]
pub struct DraftStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl DraftStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, CART_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Reads the persisted draft. Absent, unreadable or corrupt values yield an empty draft.
    pub fn load(&self) -> Draft {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Draft::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read persisted draft");
                return Draft::default();
            }
        };
        serde_json::from_str::<Vec<crate::model::LineItem>>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|items| Draft::new(items).map_err(|e| e.to_string()))
            .unwrap_or_else(|error| {
                warn!(key = %self.key, %error, "Discarding corrupt persisted draft");
                Draft::default()
            })
    }

    /// Writes the full draft, or removes the key when `remove` is set.
    /// Failures are logged and otherwise ignored.
    fn persist(&self, draft: &Draft, remove: bool) {
        let result = if remove {
            self.store.remove(&self.key)
        } else {
            match serde_json::to_string(draft) {
                Ok(json) => self.store.set(&self.key, &json),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Could not serialize draft");
                    return;
                }
            }
        };
        match result {
            Ok(()) => debug!(key = %self.key, items = draft.len(), removed = remove, "Draft persisted"),
            Err(e) => warn!(key = %self.key, error = %e, "Could not persist draft"),
        }
    }
}

#[async_trait]
impl ActorState for Draft {
    type Command = DraftCommand;
    type Outcome = DraftEvent;
    type Context = DraftStorage;
    type Error = DraftError;

    async fn on_start(&mut self, storage: &DraftStorage) -> Result<(), DraftError> {
        *self = storage.load();
        debug!(items = self.len(), "Draft hydrated");
        Ok(())
    }

    fn apply(&mut self, command: DraftCommand) -> Result<DraftEvent, DraftError> {
        Draft::apply(self, command)
    }

    async fn on_commit(&self, event: &DraftEvent, storage: &DraftStorage) -> Result<(), DraftError> {
        match event {
            DraftEvent::Removed { existed: false, .. } => {}
            DraftEvent::Cleared => storage.persist(self, true),
            _ => storage.persist(self, false),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, ProductId, Quantity};
    use crate::storage::{MemoryStore, StorageError};

    fn item(id: i64, n: u32) -> LineItem {
        LineItem::new(ProductId(id), "X", 2.0, Quantity::try_from(n).unwrap())
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    #[test]
    fn test_load_corrupt_value_yields_empty_draft() {
        let store = Arc::new(MemoryStore::new());
        store.set(CART_KEY, "{not json").unwrap();
        assert!(DraftStorage::new(store.clone()).load().is_empty());

        store.set(CART_KEY, r#"[{"id":1,"name":"A","unit_price":1.0,"quantity":-2}]"#).unwrap();
        assert!(DraftStorage::new(store).load().is_empty());
    }

    #[test]
    fn test_load_merges_duplicate_persisted_lines() {
        let store = Arc::new(MemoryStore::new());
        let raw = serde_json::to_string(&vec![item(1, 2), item(1, 3)]).unwrap();
        store.set(CART_KEY, &raw).unwrap();

        let draft = DraftStorage::new(store).load();
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.items()[0].quantity.get(), 5);
    }

    #[tokio::test]
    async fn test_commit_writes_full_draft_and_clear_removes_key() {
        let store = Arc::new(MemoryStore::new());
        let storage = DraftStorage::new(store.clone());
        let mut draft = Draft::default();

        let event = draft.apply(DraftCommand::Add(item(1, 2))).unwrap();
        draft.on_commit(&event, &storage).await.unwrap();
        let persisted: Draft = serde_json::from_str(&store.get(CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, draft);

        let event = draft.apply(DraftCommand::Clear).unwrap();
        draft.on_commit(&event, &storage).await.unwrap();
        assert_eq!(store.get(CART_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_storage_failures_are_swallowed() {
        let storage = DraftStorage::new(Arc::new(BrokenStore));
        let mut draft = Draft::default();
        draft.on_start(&storage).await.unwrap();
        assert!(draft.is_empty());

        let event = draft.apply(DraftCommand::Add(item(1, 1))).unwrap();
        assert!(draft.on_commit(&event, &storage).await.is_ok());
    }
}
