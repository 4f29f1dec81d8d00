//! # Kanban Board Flow — End-to-End Integration Tests
//!
//! Exercises the production-log transition rules through the HTTP API:
//! queuing, starting, the timestamp side effects of each move, the
//! planned-order cascade and its guard, and the finish shortcut.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use atelier_api::state::{AppConfig, AppState};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn test_app() -> axum::Router {
    let pool = atelier_api::db::init_pool("sqlite::memory:").await.unwrap();
    atelier_api::app(AppState::new(pool, AppConfig::default()))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn json_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Create a product, an operator, an operation, and a planned order.
/// Returns (order_id, operator_id, operation_id).
async fn seed_order(app: &axum::Router) -> (i64, i64, i64) {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/products",
            serde_json::json!({"name": "Linen shirt", "code": "P-001", "unit_cost": 12.5}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/team",
            serde_json::json!({"name": "Ana", "role": "Seamstress"}),
        ))
        .await
        .unwrap();
    let operator_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/operations",
            serde_json::json!({"code": "OP-10", "description": "Sew collar"}),
        ))
        .await
        .unwrap();
    let operation_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/orders",
            serde_json::json!({
                "code": "ORD-001",
                "product_id": product_id,
                "quantity": 50,
                "entry_date": "2026-03-01",
                "delivery_date": "2026-03-20",
                "priority": "high"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order = body_json(resp).await;
    assert_eq!(order["status"], "planned");

    (order["id"].as_i64().unwrap(), operator_id, operation_id)
}

async fn order_status(app: &axum::Router, order_id: i64) -> String {
    let resp = app.clone().oneshot(json_get("/v1/orders")).await.unwrap();
    let orders = body_json(resp).await;
    orders
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"].as_i64() == Some(order_id))
        .unwrap()["status"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Queue → start → finish → reopen → reset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn queued_log_starts_waiting_without_timestamps() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let log = body_json(resp).await;
    assert_eq!(log["status"], "waiting");
    assert!(log["start_time"].is_null());
    assert!(log["end_time"].is_null());

    // Queuing alone never cascades.
    assert_eq!(order_status(&app, order_id).await, "planned");
}

#[tokio::test]
async fn starting_work_stamps_start_and_cascades_to_planned_order() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    let log_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "in_production"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let log = body_json(resp).await;
    assert_eq!(log["status"], "in_production");
    assert!(log["start_time"].is_string());
    assert!(log["end_time"].is_null());

    assert_eq!(order_status(&app, order_id).await, "in_production");
}

#[tokio::test]
async fn restarting_preserves_start_time_and_finishing_stamps_end() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    let log_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "in_production"}),
        ))
        .await
        .unwrap();
    let started = body_json(resp).await;
    let original_start = started["start_time"].as_str().unwrap().to_string();

    // A second in_production transition keeps the original start time.
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "in_production"}),
        ))
        .await
        .unwrap();
    let restarted = body_json(resp).await;
    assert_eq!(restarted["start_time"].as_str().unwrap(), original_start);

    // Finishing stamps end_time and keeps start_time.
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "finished"}),
        ))
        .await
        .unwrap();
    let finished = body_json(resp).await;
    assert_eq!(finished["status"], "finished");
    assert_eq!(finished["start_time"].as_str().unwrap(), original_start);
    assert!(finished["end_time"].is_string());

    // Reopening clears end_time but keeps the original start.
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "in_production"}),
        ))
        .await
        .unwrap();
    let reopened = body_json(resp).await;
    assert_eq!(reopened["start_time"].as_str().unwrap(), original_start);
    assert!(reopened["end_time"].is_null());
}

#[tokio::test]
async fn reverting_to_waiting_clears_both_timestamps() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs/start",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    let log_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "finished"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "waiting"}),
        ))
        .await
        .unwrap();
    let log = body_json(resp).await;
    assert_eq!(log["status"], "waiting");
    assert!(log["start_time"].is_null());
    assert!(log["end_time"].is_null());
}

// ---------------------------------------------------------------------------
// Direct start
// ---------------------------------------------------------------------------

#[tokio::test]
async fn direct_start_creates_running_log_and_cascades() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs/start",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let log = body_json(resp).await;
    assert_eq!(log["status"], "in_production");
    assert!(log["start_time"].is_string());
    assert!(log["end_time"].is_null());

    assert_eq!(order_status(&app, order_id).await, "in_production");
}

// ---------------------------------------------------------------------------
// Cascade guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cascade_never_touches_manually_advanced_order() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    // Advance the order past planned by hand.
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/orders/{order_id}/status"),
            serde_json::json!({"status": "finished"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    let log_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "in_production"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // The finished order is left untouched by the cascade.
    assert_eq!(order_status(&app, order_id).await, "finished");
}

#[tokio::test]
async fn finishing_a_log_does_not_cascade() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    let log_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "finished"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Finishing work never advances the order on its own.
    assert_eq!(order_status(&app, order_id).await, "planned");
}

// ---------------------------------------------------------------------------
// Finish shortcut
// ---------------------------------------------------------------------------

#[tokio::test]
async fn finish_shortcut_matches_finished_transition() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs/start",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    let log = body_json(resp).await;
    let log_id = log["id"].as_i64().unwrap();
    let start = log["start_time"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/production-logs/{log_id}/finish"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let finished = body_json(resp).await;
    assert_eq!(finished["status"], "finished");
    assert_eq!(finished["start_time"].as_str().unwrap(), start);
    assert!(finished["end_time"].is_string());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transitioning_missing_log_is_404() {
    let app = test_app().await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/v1/production-logs/9999/status",
            serde_json::json!({"status": "in_production"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unrecognized_status_is_rejected_not_written() {
    let app = test_app().await;
    let (order_id, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs",
            serde_json::json!({
                "order_id": order_id,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    let log_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/production-logs/{log_id}/status"),
            serde_json::json!({"status": "paused"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The log still reports its original status.
    let resp = app
        .clone()
        .oneshot(json_get("/v1/production-logs"))
        .await
        .unwrap();
    let logs = body_json(resp).await;
    let log = logs
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"].as_i64() == Some(log_id))
        .unwrap();
    assert_eq!(log["status"], "waiting");
}

#[tokio::test]
async fn queuing_against_missing_order_is_rejected() {
    let app = test_app().await;
    let (_, operator_id, operation_id) = seed_order(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/production-logs",
            serde_json::json!({
                "order_id": 9999,
                "operator_id": operator_id,
                "operation_id": operation_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
