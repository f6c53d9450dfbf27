//! # Route Modules
//!
//! One module per resource, each contributing its own sub-router, composed
//! here together with the service banner and health endpoints.

pub mod admin;
pub mod clients;
pub mod items;
pub mod tabs;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use comanda_db::Database;

/// Confirmation body for destructive operations.
#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub message: String,
}

/// Service banner returned from `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Composes every resource router.
pub fn router() -> Router<Database> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(clients::router())
        .merge(tabs::router())
        .merge(items::router())
        .merge(admin::router())
}

/// GET / - service banner.
async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "online",
        service: "comanda",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health - storage reachability probe.
async fn health(State(db): State<Database>) -> (StatusCode, Json<serde_json::Value>) {
    if db.health_check().await {
        (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "unavailable" })),
        )
    }
}
