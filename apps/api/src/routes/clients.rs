//! Client registry endpoints.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::ApiError;
use comanda_core::{Client, NewClient};
use comanda_db::Database;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/clients", post(register).get(list))
        .route("/clients/{id}", get(get_by_id))
}

/// POST /clients - register a new client.
///
/// 409 when the national id is already registered; the first registration
/// stays untouched.
async fn register(
    State(db): State<Database>,
    Json(payload): Json<NewClient>,
) -> Result<Json<Client>, ApiError> {
    let client = db.clients().register(payload).await?;
    Ok(Json(client))
}

/// GET /clients - list all registered clients.
async fn list(State(db): State<Database>) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = db.clients().list().await?;
    Ok(Json(clients))
}

/// GET /clients/{id} - get a single client. 404 when absent.
async fn get_by_id(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, ApiError> {
    let client = db.clients().get(id).await?;
    Ok(Json(client))
}
