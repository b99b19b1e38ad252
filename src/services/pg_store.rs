//! PostgreSQL-backed item store.
//!
//! Items are rows of the `items` table (see `migrations/`).
//!
//! # Atomicity Guarantees
//!
//! - `create` takes an EXCLUSIVE lock on `items` for the duration of its
//!   transaction, so concurrent creates serialize on id allocation.
//! - `update` locks the target row with `FOR UPDATE` before merging.

use async_trait::async_trait;

use crate::db::DbPool;
use crate::models::item::{Item, ItemUpdate};
use crate::services::item_store::{ItemStore, StoreError, next_id};

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Option<Item>, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT name, description, price, tax FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn contains(&self, id: i64) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn create(&self, item: Item) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Blocks other creates and writes until commit; reads still proceed
        sqlx::query("LOCK TABLE items IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let max_id: Option<i64> = sqlx::query_scalar("SELECT MAX(id) FROM items")
            .fetch_one(&mut *tx)
            .await?;
        let id = next_id(max_id)?;

        sqlx::query(
            r#"
            INSERT INTO items (id, name, description, price, tax)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.tax)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(item_id = id, "item inserted");
        Ok(id)
    }

    async fn put(&self, id: i64, item: Item) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO items (id, name, description, price, tax)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                tax = EXCLUDED.tax
            "#,
        )
        .bind(id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.tax)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, id: i64, update: ItemUpdate) -> Result<Option<Item>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut item) = sqlx::query_as::<_, Item>(
            "SELECT name, description, price, tax FROM items WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        update.apply_to(&mut item);

        sqlx::query(
            r#"
            UPDATE items
            SET name = $1, description = $2, price = $3, tax = $4
            WHERE id = $5
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.tax)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(item))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let deleted = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// These need a live PostgreSQL server: `DATABASE_URL=... cargo test -- --ignored`.
// Each test gets its own freshly migrated database.
#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64) -> Item {
        Item {
            name: name.to_string(),
            description: None,
            price,
            tax: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn create_allocates_sequential_ids(pool: DbPool) {
        let store = PgStore::new(pool);

        assert_eq!(store.create(item("a", 1.0)).await.unwrap(), 1);
        assert_eq!(store.create(item("b", 2.0)).await.unwrap(), 2);
        assert_eq!(store.get(2).await.unwrap(), Some(item("b", 2.0)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn create_continues_after_highest_put(pool: DbPool) {
        let store = PgStore::new(pool);
        store.put(10, item("ten", 10.0)).await.unwrap();

        assert_eq!(store.create(item("next", 1.0)).await.unwrap(), 11);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn create_reuses_id_after_deleting_the_highest(pool: DbPool) {
        let store = PgStore::new(pool);
        store.create(item("a", 1.0)).await.unwrap();
        store.create(item("b", 1.0)).await.unwrap();
        assert!(store.delete(2).await.unwrap());

        assert_eq!(store.create(item("c", 1.0)).await.unwrap(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn create_fails_when_ids_are_exhausted(pool: DbPool) {
        let store = PgStore::new(pool);
        store.put(i64::MAX, item("last", 1.0)).await.unwrap();

        assert!(matches!(
            store.create(item("overflow", 1.0)).await,
            Err(StoreError::IdSpaceExhausted)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn put_replaces_every_field(pool: DbPool) {
        let store = PgStore::new(pool);
        let original = Item {
            name: "full".to_string(),
            description: Some("described".to_string()),
            price: 5.0,
            tax: Some(0.5),
        };
        store.put(3, original).await.unwrap();
        store.put(3, item("bare", 6.0)).await.unwrap();

        assert_eq!(store.get(3).await.unwrap(), Some(item("bare", 6.0)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn update_missing_item_returns_none(pool: DbPool) {
        let store = PgStore::new(pool);

        let updated = store.update(3, ItemUpdate::default()).await.unwrap();
        assert_eq!(updated, None);
        assert!(!store.contains(3).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn update_merges_fields(pool: DbPool) {
        let store = PgStore::new(pool);
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

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn delete_reports_whether_item_existed(pool: DbPool) {
        let store = PgStore::new(pool);
        let id = store.create(item("a", 1.0)).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn ping_succeeds(pool: DbPool) {
        let store = PgStore::new(pool);
        store.ping().await.unwrap();
        assert_eq!(store.backend(), "postgres");
    }
}
