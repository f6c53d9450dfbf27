//! End-to-end tests for the HTTP surface.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` against
//! an in-memory SQLite database, so each test gets an isolated store and no
//! TCP socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use comanda_api::app;
use comanda_db::{Database, DbConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    app(db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register_client(app: &Router, national_id: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/clients",
        Some(json!({ "name": "Tester", "national_id": national_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

async fn open_tab(app: &Router, client_id: i64) -> i64 {
    let (status, body) = send(app, "POST", "/tabs", Some(json!({ "client_id": client_id }))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_root_banner_and_health() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["service"], "comanda");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Scenario 1: register, open, add item, read back total
// =============================================================================

#[tokio::test]
async fn test_register_open_add_and_total() {
    let app = test_app().await;

    let client_id = register_client(&app, "99988877700").await;

    let (status, tab) = send(&app, "POST", "/tabs", Some(json!({ "client_id": client_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tab["status"], "OPEN");
    assert_eq!(tab["total"].as_f64(), Some(0.0));
    assert!(tab["created_at"].is_string());
    let tab_id = tab["id"].as_i64().unwrap();

    let (status, item) = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "tab_id": tab_id,
            "product_name": "Beer",
            "quantity": 2,
            "unit_price": 10.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["tab_id"].as_i64(), Some(tab_id));
    assert_eq!(item["product_name"], "Beer");

    let (status, tab) = send(&app, "GET", &format!("/tabs/{}", tab_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tab["total"].as_f64(), Some(20.0));
    assert_eq!(tab["items"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Scenario 2: checkout is one-way
// =============================================================================

#[tokio::test]
async fn test_checkout_twice_reports_already_paid() {
    let app = test_app().await;
    let client_id = register_client(&app, "99988877700").await;
    let tab_id = open_tab(&app, client_id).await;

    let (status, tab) = send(&app, "PUT", &format!("/tabs/{}/checkout", tab_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tab["status"], "PAID");

    let (status, body) = send(&app, "PUT", &format!("/tabs/{}/checkout", tab_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE");
    assert!(body["message"].as_str().unwrap().contains("already"));

    // A paid tab also rejects new items
    let (status, body) = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "tab_id": tab_id,
            "product_name": "Beer",
            "quantity": 1,
            "unit_price": 5.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE");
}

// =============================================================================
// Scenario 3: unknown references are 404
// =============================================================================

#[tokio::test]
async fn test_unknown_references_are_not_found() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "tab_id": 9999,
            "product_name": "Beer",
            "quantity": 1,
            "unit_price": 5.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, "GET", "/tabs/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/clients/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/tabs", Some(json!({ "client_id": 9999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Scenario 4: negative price rejected without side effects
// =============================================================================

#[tokio::test]
async fn test_negative_price_leaves_total_unchanged() {
    let app = test_app().await;
    let client_id = register_client(&app, "99988877700").await;
    let tab_id = open_tab(&app, client_id).await;

    let (status, body) = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "tab_id": tab_id,
            "product_name": "Beer",
            "quantity": 1,
            "unit_price": -5.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, tab) = send(&app, "GET", &format!("/tabs/{}", tab_id), None).await;
    assert_eq!(tab["total"].as_f64(), Some(0.0));
    assert!(tab["items"].as_array().unwrap().is_empty());
}

// =============================================================================
// Scenario 5: duplicate national id is a conflict
// =============================================================================

#[tokio::test]
async fn test_duplicate_national_id_conflict() {
    let app = test_app().await;

    register_client(&app, "12345678901").await;

    let (status, body) = send(
        &app,
        "POST",
        "/clients",
        Some(json!({ "name": "Impostor", "national_id": "12345678901" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    // No second client persisted, first unaffected
    let (_, clients) = send(&app, "GET", "/clients", None).await;
    let clients = clients.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], "Tester");
}

// =============================================================================
// Scenario 6: delete rules
// =============================================================================

#[tokio::test]
async fn test_delete_rules() {
    let app = test_app().await;
    let client_id = register_client(&app, "99988877700").await;

    // Open tab with zero total deletes fine
    let empty_tab = open_tab(&app, client_id).await;
    let (status, body) = send(&app, "DELETE", &format!("/tabs/{}", empty_tab), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("deleted"));

    // Open tab with accrued value is blocked
    let busy_tab = open_tab(&app, client_id).await;
    send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "tab_id": busy_tab,
            "product_name": "Tilapia KG",
            "quantity": 1,
            "unit_price": 45.0
        })),
    )
    .await;
    let (status, body) = send(&app, "DELETE", &format!("/tabs/{}", busy_tab), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE");

    // After checkout the same tab deletes, items included
    send(&app, "PUT", &format!("/tabs/{}/checkout", busy_tab), None).await;
    let (status, _) = send(&app, "DELETE", &format!("/tabs/{}", busy_tab), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/tabs/{}", busy_tab), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Running total accumulation
// =============================================================================

#[tokio::test]
async fn test_total_accumulates_over_item_sequence() {
    let app = test_app().await;
    let client_id = register_client(&app, "99988877700").await;
    let tab_id = open_tab(&app, client_id).await;

    let prices = [(2_i64, 10.0_f64), (1, 3.5), (4, 0.25)];
    let mut expected = 0.0;
    for (quantity, unit_price) in prices {
        let (status, _) = send(
            &app,
            "POST",
            "/items",
            Some(json!({
                "tab_id": tab_id,
                "product_name": "Item",
                "quantity": quantity,
                "unit_price": unit_price
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        expected += quantity as f64 * unit_price;
    }

    let (_, tab) = send(&app, "GET", &format!("/tabs/{}", tab_id), None).await;
    assert_eq!(tab["total"].as_f64(), Some(expected));
    assert_eq!(tab["items"].as_array().unwrap().len(), prices.len());
}

// =============================================================================
// Item removal recomputes the total
// =============================================================================

#[tokio::test]
async fn test_remove_item_updates_total() {
    let app = test_app().await;
    let client_id = register_client(&app, "99988877700").await;
    let tab_id = open_tab(&app, client_id).await;

    send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "tab_id": tab_id,
            "product_name": "Beer",
            "quantity": 2,
            "unit_price": 10.0
        })),
    )
    .await;
    let (_, item) = send(
        &app,
        "POST",
        "/items",
        Some(json!({
            "tab_id": tab_id,
            "product_name": "Snack",
            "quantity": 1,
            "unit_price": 7.5
        })),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap();

    let (status, _) = send(&app, "DELETE", &format!("/items/{}", item_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, tab) = send(&app, "GET", &format!("/tabs/{}", tab_id), None).await;
    assert_eq!(tab["total"].as_f64(), Some(20.0));

    // Removing an unknown item is 404
    let (status, _) = send(&app, "DELETE", "/items/424242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Admin reset
// =============================================================================

#[tokio::test]
async fn test_admin_reset_clears_state() {
    let app = test_app().await;
    let client_id = register_client(&app, "99988877700").await;
    let tab_id = open_tab(&app, client_id).await;

    let (status, _) = send(&app, "POST", "/admin/reset", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, clients) = send(&app, "GET", "/clients", None).await;
    assert!(clients.as_array().unwrap().is_empty());
    let (status, _) = send(&app, "GET", &format!("/tabs/{}", tab_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
