//! Process-local item store.
//!
//! Items live in a `BTreeMap` behind a tokio `RwLock`, so the highest id is
//! always the last key. Contents are lost when the process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::item::{Item, ItemUpdate};
use crate::services::item_store::{ItemStore, StoreError, next_id};

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<i64, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Option<Item>, StoreError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn contains(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.items.read().await.contains_key(&id))
    }

    async fn create(&self, item: Item) -> Result<i64, StoreError> {
        // Allocation and insert happen under one write guard
        let mut items = self.items.write().await;
        let id = next_id(items.last_key_value().map(|(id, _)| *id))?;
        items.insert(id, item);
        Ok(id)
    }

    async fn put(&self, id: i64, item: Item) -> Result<(), StoreError> {
        self.items.write().await.insert(id, item);
        Ok(())
    }

    async fn update(&self, id: i64, update: ItemUpdate) -> Result<Option<Item>, StoreError> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&id).map(|item| {
            update.apply_to(item);
            item.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.items.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn item(name: &str, price: f64) -> Item {
        Item {
            name: name.to_string(),
            description: None,
            price,
            tax: None,
        }
    }

    #[tokio::test]
    async fn create_allocates_sequential_ids() {
        let store = MemoryStore::new();

        assert_eq!(store.create(item("a", 1.0)).await.unwrap(), 1);
        assert_eq!(store.create(item("b", 2.0)).await.unwrap(), 2);
        assert_eq!(store.get(2).await.unwrap(), Some(item("b", 2.0)));
    }

    #[tokio::test]
    async fn create_continues_after_highest_put() {
        let store = MemoryStore::new();
        store.put(10, item("ten", 10.0)).await.unwrap();

        assert_eq!(store.create(item("next", 1.0)).await.unwrap(), 11);
    }

    #[tokio::test]
    async fn create_reuses_id_after_deleting_the_highest() {
        let store = MemoryStore::new();
        store.create(item("a", 1.0)).await.unwrap();
        store.create(item("b", 1.0)).await.unwrap();
        assert!(store.delete(2).await.unwrap());

        assert_eq!(store.create(item("c", 1.0)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn create_fails_when_ids_are_exhausted() {
        let store = MemoryStore::new();
        store.put(i64::MAX, item("last", 1.0)).await.unwrap();

        assert!(matches!(
            store.create(item("overflow", 1.0)).await,
            Err(StoreError::IdSpaceExhausted)
        ));
    }

    #[tokio::test]
    async fn update_missing_item_returns_none() {
        let store = MemoryStore::new();
        let updated = store.update(3, ItemUpdate::default()).await.unwrap();
        assert_eq!(updated, None);
        assert!(!store.contains(3).await.unwrap());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        let id = store.create(item("a", 1.0)).await.unwrap();

        let update = ItemUpdate {
            tax: Some(Some(0.2)),
            ..ItemUpdate::default()
        };
        let updated = store.update(id, update).await.unwrap().unwrap();

        assert_eq!(updated.name, "a");
        assert_eq!(updated.tax, Some(0.2));
        assert_eq!(store.get(id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn delete_reports_whether_item_existed() {
        let store = MemoryStore::new();
        let id = store.create(item("a", 1.0)).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(item("x", i as f64)).await.unwrap() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=32).collect::<Vec<i64>>());
    }
}
