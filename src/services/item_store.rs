//! Item storage abstraction.
//!
//! Handlers only talk to `dyn ItemStore`; the backend is picked at startup
//! (`MemoryStore` by default, `PgStore` when `DATABASE_URL` is set).

use async_trait::async_trait;

use crate::models::item::{Item, ItemUpdate};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("No item id left to allocate")]
    IdSpaceExhausted,
}

/// Repository of items keyed by a signed 64-bit id.
///
/// Every method is atomic with respect to concurrent calls on the same store.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Item>, StoreError>;

    async fn contains(&self, id: i64) -> Result<bool, StoreError>;

    /// Store `item` under the next free id (`max(existing ids, default 0) + 1`)
    /// and return that id.
    ///
    /// # Errors
    ///
    /// `IdSpaceExhausted` when the highest stored id is `i64::MAX`.
    async fn create(&self, item: Item) -> Result<i64, StoreError>;

    /// Insert or replace the item at `id`.
    async fn put(&self, id: i64, item: Item) -> Result<(), StoreError>;

    /// Merge `update` into the item at `id` and return the result, or `None`
    /// when no such item exists.
    async fn update(&self, id: i64, update: ItemUpdate) -> Result<Option<Item>, StoreError>;

    /// Remove the item at `id`. Returns whether an item was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Id following `max_id`, starting at 1 for an empty store.
pub(crate) fn next_id(max_id: Option<i64>) -> Result<i64, StoreError> {
    max_id
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(StoreError::IdSpaceExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(None).unwrap(), 1);
    }

    #[test]
    fn next_id_follows_the_maximum() {
        assert_eq!(next_id(Some(41)).unwrap(), 42);
        assert_eq!(next_id(Some(-5)).unwrap(), -4);
    }

    #[test]
    fn next_id_overflow_is_an_error() {
        assert!(matches!(
            next_id(Some(i64::MAX)),
            Err(StoreError::IdSpaceExhausted)
        ));
    }
}
