//! # Line-Item Repository
//!
//! Database operations for recording priced items on a tab and keeping the
//! tab's running total in step with them.
//!
//! ## Commit Boundary
//! ```text
//! add(item)
//!   ├── validate input (negative price rejected before any write)
//!   └── BEGIN
//!        ├── load tab, require status = Open
//!        ├── INSERT line_items ...
//!        ├── UPDATE tabs SET total = total + qty × price
//!        │        WHERE id = ? AND status = 'OPEN'   ← atomic increment
//!        └── COMMIT          (both effects durable together, or neither)
//!
//! remove(item_id)
//!   └── BEGIN
//!        ├── load item, load owning tab, require status = Open
//!        ├── DELETE line_items ...
//!        ├── UPDATE tabs SET total = (SUM over remaining items)
//!        └── COMMIT
//! ```
//!
//! ## Total Policy
//! Additions increment the stored total atomically in SQL; removals
//! recompute it as the derived sum over the remaining items. Either way the
//! invariant holds after commit: total == Σ quantity × unit_price.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use comanda_core::validation::validate_new_item;
use comanda_core::{line_total, DomainError, LineItem, NewLineItem, Tab};

/// Repository for line-item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Records a new line item on an open tab.
    ///
    /// The item insert and the total increment share one transaction: no
    /// state is possible where the item exists but the total was not
    /// updated, or vice versa.
    ///
    /// ## Errors
    /// - `DomainError::Validation` for a negative unit price or empty name
    ///   (checked before any read or write)
    /// - `DomainError::TabNotFound` when the tab does not resolve
    /// - `DomainError::TabNotOpen` when the tab has already been paid
    pub async fn add(&self, new_item: NewLineItem) -> DbResult<LineItem> {
        validate_new_item(&new_item).map_err(DomainError::from)?;

        debug!(tab_id = %new_item.tab_id, product = %new_item.product_name, "Adding line item");

        let mut tx = self.pool.begin().await?;

        let tab: Option<Tab> = sqlx::query_as(
            r#"
            SELECT id, client_id, status, total, created_at
            FROM tabs
            WHERE id = ?1
            "#,
        )
        .bind(new_item.tab_id)
        .fetch_optional(&mut *tx)
        .await?;

        let tab = match tab {
            Some(t) => t,
            None => return Err(DomainError::TabNotFound(new_item.tab_id).into()),
        };

        tab.ensure_open()?;

        let result = sqlx::query(
            r#"
            INSERT INTO line_items (tab_id, product_name, quantity, unit_price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(new_item.tab_id)
        .bind(&new_item.product_name)
        .bind(new_item.quantity)
        .bind(new_item.unit_price)
        .execute(&mut *tx)
        .await?;

        let delta = line_total(new_item.quantity, new_item.unit_price);

        // Atomic increment, guarded by the Open status the check above saw.
        sqlx::query("UPDATE tabs SET total = total + ?1 WHERE id = ?2 AND status = ?3")
            .bind(delta)
            .bind(new_item.tab_id)
            .bind(comanda_core::TabStatus::Open)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let item = LineItem {
            id: result.last_insert_rowid(),
            tab_id: new_item.tab_id,
            product_name: new_item.product_name,
            quantity: new_item.quantity,
            unit_price: new_item.unit_price,
        };

        info!(tab_id = %item.tab_id, item_id = %item.id, delta = %delta, "Line item recorded");

        Ok(item)
    }

    /// Gets a line item by id.
    pub async fn get(&self, item_id: i64) -> DbResult<LineItem> {
        let item: Option<LineItem> = sqlx::query_as(
            r#"
            SELECT id, tab_id, product_name, quantity, unit_price
            FROM line_items
            WHERE id = ?1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or_else(|| DomainError::ItemNotFound(item_id).into())
    }

    /// Removes a line item from its (still open) tab.
    ///
    /// The tab total is recomputed as the sum over the remaining items in
    /// the same transaction as the delete.
    ///
    /// ## Errors
    /// - `DomainError::ItemNotFound` when the item does not exist
    /// - `DomainError::TabNotOpen` when the owning tab has been paid
    ///   (a paid tab is immutable, items included)
    pub async fn remove(&self, item_id: i64) -> DbResult<()> {
        debug!(item_id = %item_id, "Removing line item");

        let mut tx = self.pool.begin().await?;

        let item: Option<LineItem> = sqlx::query_as(
            r#"
            SELECT id, tab_id, product_name, quantity, unit_price
            FROM line_items
            WHERE id = ?1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?;

        let item = match item {
            Some(i) => i,
            None => return Err(DomainError::ItemNotFound(item_id).into()),
        };

        let tab: Option<Tab> = sqlx::query_as(
            r#"
            SELECT id, client_id, status, total, created_at
            FROM tabs
            WHERE id = ?1
            "#,
        )
        .bind(item.tab_id)
        .fetch_optional(&mut *tx)
        .await?;

        let tab = match tab {
            Some(t) => t,
            None => return Err(DomainError::TabNotFound(item.tab_id).into()),
        };

        tab.ensure_open()?;

        sqlx::query("DELETE FROM line_items WHERE id = ?1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        // Derived-sum recompute over whatever items remain.
        sqlx::query(
            r#"
            UPDATE tabs
            SET total = (
                SELECT COALESCE(SUM(quantity * unit_price), 0.0)
                FROM line_items
                WHERE tab_id = ?1
            )
            WHERE id = ?1
            "#,
        )
        .bind(item.tab_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(item_id = %item_id, tab_id = %item.tab_id, "Line item removed");

        Ok(())
    }

    /// Lists all items attached to a tab, in insertion order.
    pub async fn list_for_tab(&self, tab_id: i64) -> DbResult<Vec<LineItem>> {
        let items: Vec<LineItem> = sqlx::query_as(
            r#"
            SELECT id, tab_id, product_name, quantity, unit_price
            FROM line_items
            WHERE tab_id = ?1
            ORDER BY id
            "#,
        )
        .bind(tab_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use comanda_core::{NewClient, TabStatus, ValidationError};

    async fn db_with_open_tab() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let client = db
            .clients()
            .register(NewClient {
                name: "Tester".to_string(),
                national_id: "99988877700".to_string(),
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        let tab = db.tabs().open(client.id).await.unwrap();
        (db, tab.id)
    }

    fn beer(tab_id: i64, quantity: i64, unit_price: f64) -> NewLineItem {
        NewLineItem {
            tab_id,
            product_name: "Beer".to_string(),
            quantity,
            unit_price,
        }
    }

    #[tokio::test]
    async fn test_add_item_updates_total() {
        let (db, tab_id) = db_with_open_tab().await;

        let item = db.items().add(beer(tab_id, 2, 10.0)).await.unwrap();
        assert_eq!(item.line_total(), 20.0);

        let tab = db.tabs().get(tab_id).await.unwrap();
        assert_eq!(tab.total, 20.0);
    }

    #[tokio::test]
    async fn test_total_is_exact_sum_over_items() {
        let (db, tab_id) = db_with_open_tab().await;

        db.items().add(beer(tab_id, 2, 10.0)).await.unwrap();
        db.items().add(beer(tab_id, 1, 3.5)).await.unwrap();
        db.items().add(beer(tab_id, 3, 0.4)).await.unwrap();

        let (tab, items) = db.tabs().get_with_items(tab_id).await.unwrap();
        let expected: f64 = items.iter().map(|i| i.line_total()).sum();
        assert_eq!(tab.total, expected);
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_add_item_to_missing_tab() {
        let (db, _) = db_with_open_tab().await;

        let err = db.items().add(beer(9999, 1, 5.0)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(DomainError::TabNotFound(9999))
        ));
    }

    #[tokio::test]
    async fn test_add_item_to_paid_tab_rejected() {
        let (db, tab_id) = db_with_open_tab().await;

        db.items().add(beer(tab_id, 1, 12.0)).await.unwrap();
        db.tabs().checkout(tab_id).await.unwrap();

        let err = db.items().add(beer(tab_id, 1, 5.0)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(DomainError::TabNotOpen {
                status: TabStatus::Paid,
                ..
            })
        ));

        // Rejected add left the total untouched
        let tab = db.tabs().get(tab_id).await.unwrap();
        assert_eq!(tab.total, 12.0);
    }

    #[tokio::test]
    async fn test_negative_price_writes_nothing() {
        let (db, tab_id) = db_with_open_tab().await;

        let err = db.items().add(beer(tab_id, 1, -5.0)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(DomainError::Validation(ValidationError::NegativeAmount {
                ..
            }))
        ));

        let (tab, items) = db.tabs().get_with_items(tab_id).await.unwrap();
        assert_eq!(tab.total, 0.0);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_zero_price_item_allowed() {
        let (db, tab_id) = db_with_open_tab().await;

        db.items().add(beer(tab_id, 1, 0.0)).await.unwrap();
        let tab = db.tabs().get(tab_id).await.unwrap();
        assert_eq!(tab.total, 0.0);
    }

    #[tokio::test]
    async fn test_remove_item_recomputes_total() {
        let (db, tab_id) = db_with_open_tab().await;

        let keep = db.items().add(beer(tab_id, 2, 10.0)).await.unwrap();
        let removed = db.items().add(beer(tab_id, 1, 7.5)).await.unwrap();
        assert_eq!(db.tabs().get(tab_id).await.unwrap().total, 27.5);

        db.items().remove(removed.id).await.unwrap();

        let (tab, items) = db.tabs().get_with_items(tab_id).await.unwrap();
        assert_eq!(tab.total, 20.0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_remove_last_item_zeroes_total() {
        let (db, tab_id) = db_with_open_tab().await;

        let item = db.items().add(beer(tab_id, 4, 2.25)).await.unwrap();
        db.items().remove(item.id).await.unwrap();

        assert_eq!(db.tabs().get(tab_id).await.unwrap().total, 0.0);
    }

    #[tokio::test]
    async fn test_remove_from_paid_tab_rejected() {
        let (db, tab_id) = db_with_open_tab().await;

        let item = db.items().add(beer(tab_id, 1, 9.0)).await.unwrap();
        db.tabs().checkout(tab_id).await.unwrap();

        let err = db.items().remove(item.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(DomainError::TabNotOpen { .. })
        ));

        // Paid tab keeps its history
        let items = db.items().list_for_tab(tab_id).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_item() {
        let (db, _) = db_with_open_tab().await;

        let err = db.items().remove(12345).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(DomainError::ItemNotFound(12345))
        ));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let (db, tab_id) = db_with_open_tab().await;
        db.items().add(beer(tab_id, 2, 10.0)).await.unwrap();

        db.reset().await.unwrap();

        assert!(db.clients().list().await.unwrap().is_empty());
        assert!(db.tabs().get(tab_id).await.is_err());
        assert!(db.items().list_for_tab(tab_id).await.unwrap().is_empty());
    }
}
