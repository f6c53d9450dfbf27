//! # Client Repository
//!
//! Database operations for the client registry.
//!
//! Clients are append-only in the core flows: registered once, looked up by
//! id, listed in insertion order. The national id ("CPF") is the unique
//! business key; a second registration with the same national id is a
//! conflict and leaves the first registration untouched.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use comanda_core::validation::validate_new_client;
use comanda_core::{Client, DomainError, NewClient};

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Registers a new client.
    ///
    /// ## Errors
    /// - `DomainError::Validation` when name or national id is empty/too long
    /// - `DomainError::DuplicateNationalId` when the national id is taken
    pub async fn register(&self, new_client: NewClient) -> DbResult<Client> {
        validate_new_client(&new_client).map_err(DomainError::from)?;

        debug!(national_id = %new_client.national_id, "Registering client");

        let result = sqlx::query(
            r#"
            INSERT INTO clients (name, national_id, phone, email)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new_client.name)
        .bind(&new_client.national_id)
        .bind(&new_client.phone)
        .bind(&new_client.email)
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(e) => {
                let db_err = DbError::from(e);
                // The only UNIQUE index on clients is national_id
                if db_err.is_unique_violation() {
                    return Err(DomainError::DuplicateNationalId(new_client.national_id).into());
                }
                return Err(db_err);
            }
        };

        Ok(Client {
            id: result.last_insert_rowid(),
            name: new_client.name,
            national_id: new_client.national_id,
            phone: new_client.phone,
            email: new_client.email,
        })
    }

    /// Gets a client by id.
    ///
    /// ## Errors
    /// `DomainError::ClientNotFound` when no client has that id.
    pub async fn get(&self, id: i64) -> DbResult<Client> {
        let client: Option<Client> = sqlx::query_as(
            r#"
            SELECT id, name, national_id, phone, email
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        client.ok_or_else(|| DomainError::ClientNotFound(id).into())
    }

    /// Lists all registered clients in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let clients: Vec<Client> = sqlx::query_as(
            r#"
            SELECT id, name, national_id, phone, email
            FROM clients
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Checks whether a client with the given id exists.
    ///
    /// Used by the tab ledger before opening a tab.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM clients WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
