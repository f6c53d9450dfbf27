//! Line-item endpoints.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::routes::Confirmation;
use comanda_core::{LineItem, NewLineItem};
use comanda_db::Database;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/items", post(add))
        .route("/items/{id}", axum::routing::delete(remove))
}

/// POST /items - record a priced item on an open tab.
///
/// 404 when the tab does not resolve; 400 when the tab is not OPEN or the
/// unit price is negative. On a rejection nothing is written: no item row,
/// no total change.
async fn add(
    State(db): State<Database>,
    Json(payload): Json<NewLineItem>,
) -> Result<Json<LineItem>, ApiError> {
    let item = db.items().add(payload).await?;
    Ok(Json(item))
}

/// DELETE /items/{id} - remove an item from its (still open) tab.
///
/// The tab total is recomputed from the remaining items in the same
/// transaction as the delete.
async fn remove(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Confirmation>, ApiError> {
    db.items().remove(id).await?;
    Ok(Json(Confirmation {
        message: format!("Line item {} removed", id),
    }))
}
