//! HTTP tests driving the router in-process.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use till_api::{app, AppState};
use till_core::StockPolicy;
use till_db::{Database, DbConfig};

async fn test_app(policy: StockPolicy) -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    app(AppState::new(db, policy))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
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

async fn create_product(app: &Router, name: &str, price: i64, stock: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/products",
        Some(json!({ "name": name, "price": price, "stock": stock })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_database_up() {
    let app = test_app(StockPolicy::Enforce).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "up" }));
}

#[tokio::test]
async fn checkout_worked_example() {
    let app = test_app(StockPolicy::Enforce).await;
    let a = create_product(&app, "A", 1000, 10).await;
    let b = create_product(&app, "B", 500, 5).await;

    let (status, tx) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [
            { "product_id": a, "quantity": 2 },
            { "product_id": b, "quantity": 1 }
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tx["total_amount"], 2500);
    assert_eq!(tx["details"][0]["subtotal"], 2000);
    assert_eq!(tx["details"][0]["product_name"], "A");
    assert_eq!(tx["details"][1]["subtotal"], 500);

    let (_, product_a) = send(&app, Method::GET, &format!("/api/products/{a}"), None).await;
    let (_, product_b) = send(&app, Method::GET, &format!("/api/products/{b}"), None).await;
    assert_eq!(product_a["stock"], 8);
    assert_eq!(product_b["stock"], 4);

    let id = tx["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/transactions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["details"], tx["details"]);

    let (status, listed) = send(&app, Method::GET, "/api/transactions?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["id"], id);
    assert_eq!(listed[0]["item_count"], 2);
}

#[tokio::test]
async fn checkout_error_statuses() {
    let app = test_app(StockPolicy::Enforce).await;
    let a = create_product(&app, "A", 1000, 1).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": 999, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": a, "quantity": 2 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");

    let (status, body) = send(&app, Method::POST, "/api/checkout", Some(json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::POST, "/api/checkout", Some(json!({ "items": "nope" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Nothing was sold
    let (_, product) = send(&app, Method::GET, &format!("/api/products/{a}"), None).await;
    assert_eq!(product["stock"], 1);
    let (_, report) = send(&app, Method::GET, "/api/reports", None).await;
    assert_eq!(report["total_transaction_count"], 0);
}

#[tokio::test]
async fn allow_negative_stock_policy() {
    let app = test_app(StockPolicy::AllowNegative).await;
    let a = create_product(&app, "A", 100, 1).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": a, "quantity": 3 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, product) = send(&app, Method::GET, &format!("/api/products/{a}"), None).await;
    assert_eq!(product["stock"], -2);
}

#[tokio::test]
async fn product_crud() {
    let app = test_app(StockPolicy::Enforce).await;
    let id = create_product(&app, "Tea", 300, 4).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/products/{id}"),
        Some(json!({ "price": 350 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "id": id, "name": "Tea", "price": 350, "stock": 4 }));

    let (status, list) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({ "name": "", "price": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_path_id_is_json_validation_error() {
    let app = test_app(StockPolicy::Enforce).await;

    for (method, uri) in [
        (Method::GET, "/api/products/abc"),
        (Method::DELETE, "/api/products/abc"),
        (Method::GET, "/api/transactions/abc"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "VALIDATION_ERROR", "{uri}");
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/abc",
        Some(json!({ "price": 350 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn reports() {
    let app = test_app(StockPolicy::Enforce).await;

    let (status, empty) = send(&app, Method::GET, "/api/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        empty,
        json!({ "total_revenue": 0, "total_transaction_count": 0, "top_product": null })
    );

    let a = create_product(&app, "A", 1000, 10).await;
    send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": a, "quantity": 3 }] })),
    )
    .await;

    let (_, today) = send(&app, Method::GET, "/api/reports", None).await;
    assert_eq!(today["total_revenue"], 3000);
    assert_eq!(today["top_product"]["name"], "A");
    assert_eq!(today["top_product"]["quantity_sold"], 3);

    let date = chrono::Utc::now().date_naive();
    let (status, ranged) = send(
        &app,
        Method::GET,
        &format!("/api/reports?start_date={date}&end_date={date}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ranged, today);

    let (status, _) = send(&app, Method::GET, "/api/reports?start_date=2026-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/reports?start_date=2026-02-01&end_date=2026-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/reports?start_date=yesterday&end_date=2026-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
