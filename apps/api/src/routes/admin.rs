//! Administrative endpoints (operational tooling, not business logic).

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::warn;

use crate::error::ApiError;
use crate::routes::Confirmation;
use comanda_db::Database;

pub fn router() -> Router<Database> {
    Router::new().route("/admin/reset", post(reset))
}

/// POST /admin/reset - destructively clears all persisted state.
///
/// Every client, tab, and line item is removed and id sequences restart.
/// Intended for development and test provisioning only.
async fn reset(State(db): State<Database>) -> Result<Json<Confirmation>, ApiError> {
    warn!("Admin reset requested - clearing all persisted state");

    db.reset().await?;

    Ok(Json(Confirmation {
        message: "All persisted state cleared".to_string(),
    }))
}
