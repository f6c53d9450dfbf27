//! Tab ledger endpoints.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::Confirmation;
use comanda_core::{LineItem, NewTab, Tab};
use comanda_db::Database;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/tabs", post(open))
        .route("/tabs/{id}", get(get_by_id).delete(delete))
        .route("/tabs/{id}/checkout", put(checkout))
}

/// A tab together with its attached line items.
#[derive(Debug, Serialize)]
pub struct TabWithItems {
    #[serde(flatten)]
    pub tab: Tab,
    pub items: Vec<LineItem>,
}

/// POST /tabs - open a new tab for a client.
///
/// 404 when the client id does not resolve. The new tab is OPEN with a
/// zero total and a creation timestamp.
async fn open(
    State(db): State<Database>,
    Json(payload): Json<NewTab>,
) -> Result<Json<Tab>, ApiError> {
    let tab = db.tabs().open(payload.client_id).await?;
    Ok(Json(tab))
}

/// GET /tabs/{id} - get a tab with its line items. 404 when absent.
async fn get_by_id(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<TabWithItems>, ApiError> {
    let (tab, items) = db.tabs().get_with_items(id).await?;
    Ok(Json(TabWithItems { tab, items }))
}

/// PUT /tabs/{id}/checkout - the one-way Open → Paid transition.
///
/// 404 when absent; 400 ("already PAID") on a repeat checkout.
async fn checkout(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Tab>, ApiError> {
    let tab = db.tabs().checkout(id).await?;
    Ok(Json(tab))
}

/// DELETE /tabs/{id} - delete a tab and its items.
///
/// 400 when the tab is OPEN with accrued value; settle it first.
async fn delete(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Confirmation>, ApiError> {
    db.tabs().delete(id).await?;
    Ok(Json(Confirmation {
        message: format!("Tab {} deleted", id),
    }))
}
