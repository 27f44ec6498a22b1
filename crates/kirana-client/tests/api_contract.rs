//! Contract tests against an in-process stub backend.
//!
//! The stub speaks just enough of the backend's dialect to pin the parts of
//! the wire contract the client is responsible for: bearer auth headers,
//! idempotency keys on mutating verbs, signed ledger amounts, float-rupee
//! money codecs, and `{"detail": ...}` error extraction.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use kirana_client::{ApiClient, ApiError, TokenStore};
use kirana_core::ledger::LedgerAction;
use kirana_core::money::Money;

// =============================================================================
// Stub Backend
// =============================================================================

/// What the stub saw on the last interesting request.
#[derive(Debug, Default, Clone)]
struct Captured {
    bearer: Option<String>,
    idempotency_key: Option<String>,
    query: HashMap<String, String>,
}

type Capture = Arc<Mutex<Captured>>;

fn record(capture: &Capture, headers: &HeaderMap, query: HashMap<String, String>) {
    let mut slot = capture.lock().unwrap();
    slot.bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from);
    slot.idempotency_key = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    slot.query = query;
}

async fn stub_login() -> impl IntoResponse {
    Json(json!({
        "access_token": "tok-123",
        "username": "asha",
        "role": "admin"
    }))
}

async fn stub_inventory(
    State(capture): State<Capture>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&capture, &headers, query);
    Json(json!([{
        "id": 1,
        "name": "Steel Tiffin",
        "sku": "ST-1",
        "category": null,
        "material": "Steel",
        "quantity": 4,
        "cost_price": 80.50,
        "selling_price": 120.99,
        "min_stock_level": 5
    }]))
}

async fn stub_customer_payment(
    State(capture): State<Capture>,
    Path(_id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&capture, &headers, query);
    // The backend acknowledges with a message, not the full record
    Json(json!({
        "message": "Payment of Rs. 50.00 recorded",
        "new_balance": -150.0,
        "customer_name": "Asha"
    }))
}

async fn stub_purchase_payment(
    State(capture): State<Capture>,
    Path(_id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&capture, &headers, query);
    Json(json!({
        "message": "Payment recorded",
        "status": "Partially Paid",
        "paid_amount": 300.0,
        "total_amount": 500.0,
        "vendor_name": "Sharma Traders"
    }))
}

async fn stub_top_sellers() -> impl IntoResponse {
    Json(json!([{
        "id": 1,
        "name": "Steel Tiffin",
        "sku": "ST-1",
        "selling_price": 120.99,
        "stock": 4,
        "total_sold": 37
    }]))
}

async fn stub_rejected_sale() -> impl IntoResponse {
    (
        axum::http::StatusCode::BAD_REQUEST,
        Json(json!({"detail": "Insufficient stock for Steel Tiffin"})),
    )
}

async fn stub_unauthorized() -> impl IntoResponse {
    (
        axum::http::StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
}

/// Starts the stub on an ephemeral port and returns its address plus the
/// capture slot.
async fn spawn_stub() -> (SocketAddr, Capture) {
    let capture: Capture = Arc::new(Mutex::new(Captured::default()));

    let app = Router::new()
        .route("/auth/login", post(stub_login))
        .route("/inventory/", get(stub_inventory))
        .route("/customers/{id}/payments", post(stub_customer_payment))
        .route("/purchases/{id}/pay", post(stub_purchase_payment))
        .route("/inventory/top-sellers/", get(stub_top_sellers))
        .route("/sales/", post(stub_rejected_sale))
        .route("/vendors/", get(stub_unauthorized))
        .with_state(capture.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, capture)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(&format!("http://{}", addr), TokenStore::in_memory()).unwrap()
}

// =============================================================================
// Contract Tests
// =============================================================================

#[tokio::test]
async fn test_login_stores_token_and_requests_carry_bearer() {
    let (addr, capture) = spawn_stub().await;
    let client = client_for(addr);

    let response = client.auth().login("asha", "secret").await.unwrap();
    assert_eq!(response.username, "asha");
    assert!(client.tokens().is_present());

    client.inventory().list(None).await.unwrap();
    let seen = capture.lock().unwrap().clone();
    assert_eq!(seen.bearer.as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn test_get_has_no_idempotency_key_but_post_does() {
    let (addr, capture) = spawn_stub().await;
    let client = client_for(addr);

    client.inventory().list(None).await.unwrap();
    assert!(capture.lock().unwrap().idempotency_key.is_none());

    client
        .customers()
        .apply_ledger(7, LedgerAction::RecordPayment(Money::from_rupees(100)))
        .await
        .unwrap();
    let key = capture.lock().unwrap().idempotency_key.clone();
    assert!(key.is_some(), "mutating request must carry an idempotency key");
}

#[tokio::test]
async fn test_search_term_passed_as_query() {
    let (addr, capture) = spawn_stub().await;
    let client = client_for(addr);

    client.inventory().list(Some("tiffin")).await.unwrap();
    let seen = capture.lock().unwrap().clone();
    assert_eq!(seen.query.get("search").map(String::as_str), Some("tiffin"));
}

#[tokio::test]
async fn test_ledger_payment_decodes_message_ack() {
    let (addr, _capture) = spawn_stub().await;
    let client = client_for(addr);

    let receipt = client
        .customers()
        .apply_ledger(7, LedgerAction::RecordPayment(Money::from_rupees(50)))
        .await
        .unwrap();
    assert_eq!(receipt.message, "Payment of Rs. 50.00 recorded");
    assert_eq!(receipt.new_balance, Money::from_paise(-15000));
}

#[tokio::test]
async fn test_purchase_pay_decodes_status_ack() {
    let (addr, _capture) = spawn_stub().await;
    let client = client_for(addr);

    let receipt = client
        .purchases()
        .pay(3, Money::from_rupees(300))
        .await
        .unwrap();
    assert_eq!(
        receipt.status,
        kirana_core::types::PaymentStatus::PartiallyPaid
    );
    assert_eq!(receipt.paid_amount, Money::from_paise(30000));
    assert_eq!(receipt.total_amount, Money::from_paise(50000));
}

#[tokio::test]
async fn test_top_sellers_decode_with_stock_and_total_sold() {
    let (addr, _capture) = spawn_stub().await;
    let client = client_for(addr);

    let top = client.inventory().top_sellers(8).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].total_sold, 37);
    assert_eq!(top[0].stock, 4);
}

#[tokio::test]
async fn test_money_decodes_from_float_rupees() {
    let (addr, _capture) = spawn_stub().await;
    let client = client_for(addr);

    let items = client.inventory().list(None).await.unwrap();
    assert_eq!(items[0].cost_price, Money::from_paise(8050));
    assert_eq!(items[0].selling_price, Money::from_paise(12099));
    assert!(items[0].is_low_stock());
}

#[tokio::test]
async fn test_ledger_debt_posts_negative_amount() {
    let (addr, capture) = spawn_stub().await;
    let client = client_for(addr);

    let receipt = client
        .customers()
        .apply_ledger(7, LedgerAction::RecordDebt(Money::from_rupees(50)))
        .await
        .unwrap();
    assert_eq!(receipt.new_balance, Money::from_paise(-15000));

    let seen = capture.lock().unwrap().clone();
    let amount: f64 = seen.query.get("amount").unwrap().parse().unwrap();
    assert_eq!(amount, -50.0);
}

#[tokio::test]
async fn test_ledger_payment_posts_positive_amount() {
    let (addr, capture) = spawn_stub().await;
    let client = client_for(addr);

    client
        .customers()
        .apply_ledger(7, LedgerAction::RecordPayment(Money::from_paise(12550)))
        .await
        .unwrap();

    let seen = capture.lock().unwrap().clone();
    let amount: f64 = seen.query.get("amount").unwrap().parse().unwrap();
    assert_eq!(amount, 125.5);
}

#[tokio::test]
async fn test_backend_detail_surfaces_in_error() {
    let (addr, _capture) = spawn_stub().await;
    let client = client_for(addr);

    let draft = kirana_core::types::SaleDraft {
        customer_name: None,
        customer_id: None,
        payment_status: kirana_core::types::PaymentStatus::Paid,
        items: vec![kirana_core::types::SaleDraftLine {
            item_id: 1,
            quantity: 99,
        }],
    };
    let err = client.sales().create(&draft).await.unwrap_err();

    match err {
        ApiError::Backend { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Insufficient stock for Steel Tiffin");
        }
        other => panic!("expected Backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_401_maps_to_unauthorized() {
    let (addr, _capture) = spawn_stub().await;
    let client = client_for(addr);

    let err = client.vendors().list(None).await.unwrap_err();
    assert!(err.is_unauthorized());
}
