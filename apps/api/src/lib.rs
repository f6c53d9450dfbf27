//! # comanda-api: HTTP Request Surface
//!
//! Thin axum layer exposing the core operations as endpoints:
//!
//! | Method & path              | Operation                         |
//! |----------------------------|-----------------------------------|
//! | `GET /`                    | service banner                    |
//! | `GET /health`              | storage health check              |
//! | `POST /clients`            | register client                   |
//! | `GET /clients`             | list clients                      |
//! | `GET /clients/{id}`        | get client                        |
//! | `POST /tabs`               | open tab                          |
//! | `GET /tabs/{id}`           | get tab incl. line items          |
//! | `PUT /tabs/{id}/checkout`  | checkout tab (Open → Paid)        |
//! | `DELETE /tabs/{id}`        | delete tab (cascades to items)    |
//! | `POST /items`              | add line item to a tab            |
//! | `DELETE /items/{id}`       | remove line item (total recompute)|
//! | `POST /admin/reset`        | clear all persisted state         |
//!
//! The router is built separately from the listener so integration tests can
//! drive it in-process with `tower::ServiceExt::oneshot`.

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use comanda_db::Database;

/// Builds the full application router over a database handle.
///
/// CORS is wide open (any origin/method/header), matching the deployment
/// behind a venue-local network.
pub fn app(db: Database) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
