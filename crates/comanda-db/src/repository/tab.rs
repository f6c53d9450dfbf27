//! # Tab Repository
//!
//! Database operations for the tab ledger - the core of the system.
//!
//! ## Tab Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tab Lifecycle                                     │
//! │                                                                         │
//! │  1. OPEN                                                                │
//! │     └── open(client_id) → Tab { status: Open, total: 0.0 }              │
//! │         (client must exist; several open tabs per client are fine)      │
//! │                                                                         │
//! │  2. ACCRUE                                                              │
//! │     └── ItemRepository::add() → item insert + total increment           │
//! │         in ONE transaction                                              │
//! │                                                                         │
//! │  3. CHECKOUT                                                            │
//! │     └── checkout(tab_id) → Tab { status: Paid }                         │
//! │         One-way: a second checkout is a reported error, not a no-op     │
//! │                                                                         │
//! │  4. (OPTIONAL) DELETE                                                   │
//! │     └── delete(tab_id) → removes the tab and its items                  │
//! │         Allowed for any Paid tab, or an Open tab with zero total        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation performs its state-machine check and its writes inside a
//! single transaction, so a failing precondition never leaves a partial
//! commit behind.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use comanda_core::{DomainError, LineItem, Tab, TabStatus};

/// Repository for tab database operations.
#[derive(Debug, Clone)]
pub struct TabRepository {
    pool: SqlitePool,
}

impl TabRepository {
    /// Creates a new TabRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TabRepository { pool }
    }

    /// Opens a new tab for a client.
    ///
    /// The tab starts Open with a zero total and a creation timestamp
    /// assigned here. There is no restriction on how many open tabs a
    /// client may hold at once.
    ///
    /// ## Errors
    /// `DomainError::ClientNotFound` when the client id does not resolve.
    pub async fn open(&self, client_id: i64) -> DbResult<Tab> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM clients WHERE id = ?1")
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;
        if found.is_none() {
            return Err(DomainError::ClientNotFound(client_id).into());
        }

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO tabs (client_id, status, total, created_at)
            VALUES (?1, ?2, 0.0, ?3)
            "#,
        )
        .bind(client_id)
        .bind(TabStatus::Open)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let tab = Tab {
            id: result.last_insert_rowid(),
            client_id,
            status: TabStatus::Open,
            total: 0.0,
            created_at: now,
        };

        info!(tab_id = %tab.id, client_id = %client_id, "Tab opened");

        Ok(tab)
    }

    /// Gets a tab by id.
    ///
    /// ## Errors
    /// `DomainError::TabNotFound` when no tab has that id.
    pub async fn get(&self, tab_id: i64) -> DbResult<Tab> {
        let tab: Option<Tab> = sqlx::query_as(
            r#"
            SELECT id, client_id, status, total, created_at
            FROM tabs
            WHERE id = ?1
            "#,
        )
        .bind(tab_id)
        .fetch_optional(&self.pool)
        .await?;

        tab.ok_or_else(|| DomainError::TabNotFound(tab_id).into())
    }

    /// Gets a tab together with its attached line items.
    pub async fn get_with_items(&self, tab_id: i64) -> DbResult<(Tab, Vec<LineItem>)> {
        let tab = self.get(tab_id).await?;

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

        Ok((tab, items))
    }

    /// Checks out a tab: the one-way Open → Paid transition.
    ///
    /// ## Errors
    /// - `DomainError::TabNotFound` when the tab does not exist
    /// - `DomainError::TabNotOpen` ("already PAID") on a second checkout
    pub async fn checkout(&self, tab_id: i64) -> DbResult<Tab> {
        debug!(tab_id = %tab_id, "Checking out tab");

        let mut tx = self.pool.begin().await?;

        let tab: Option<Tab> = sqlx::query_as(
            r#"
            SELECT id, client_id, status, total, created_at
            FROM tabs
            WHERE id = ?1
            "#,
        )
        .bind(tab_id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut tab = match tab {
            Some(t) => t,
            None => return Err(DomainError::TabNotFound(tab_id).into()),
        };

        // Dropping the transaction on this error path rolls back (nothing
        // was written yet); the rejection reaches the caller unretried.
        tab.ensure_open()?;

        sqlx::query("UPDATE tabs SET status = ?1 WHERE id = ?2 AND status = ?3")
            .bind(TabStatus::Paid)
            .bind(tab_id)
            .bind(TabStatus::Open)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tab.status = TabStatus::Paid;

        info!(tab_id = %tab_id, total = %tab.total, "Tab checked out");

        Ok(tab)
    }

    /// Deletes a tab and cascades to its line items.
    ///
    /// ## Rules
    /// - A Paid tab may always be deleted
    /// - An Open tab may be deleted only when its total is zero
    /// - An Open tab with accrued value is blocked until settled
    ///
    /// The item cascade is explicit here; the schema-level
    /// `ON DELETE CASCADE` is a backstop only.
    pub async fn delete(&self, tab_id: i64) -> DbResult<()> {
        debug!(tab_id = %tab_id, "Deleting tab");

        let mut tx = self.pool.begin().await?;

        let tab: Option<Tab> = sqlx::query_as(
            r#"
            SELECT id, client_id, status, total, created_at
            FROM tabs
            WHERE id = ?1
            "#,
        )
        .bind(tab_id)
        .fetch_optional(&mut *tx)
        .await?;

        let tab = match tab {
            Some(t) => t,
            None => return Err(DomainError::TabNotFound(tab_id).into()),
        };

        tab.ensure_deletable()?;

        sqlx::query("DELETE FROM line_items WHERE tab_id = ?1")
            .bind(tab_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tabs WHERE id = ?1")
            .bind(tab_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(tab_id = %tab_id, "Tab deleted");

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
