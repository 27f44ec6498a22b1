//! End-to-end page flows against an in-process stub backend.
//!
//! The scenarios under test are the ones that span several requests:
//! checkout with a brand-new customer (and the retry that must not mint a
//! duplicate), partial payment against a recorded sale, and the session
//! dropping when the backend rejects the token.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use kirana_admin::pages::pos::CustomerChoice;
use kirana_admin::pages::{CheckoutStage, PosPage, SalesHistoryPage};
use kirana_admin::session::Session;
use kirana_client::{ApiClient, TokenStore};
use kirana_core::daterange::RangePreset;
use kirana_core::ledger::PaymentMode;
use kirana_core::money::Money;
use kirana_core::types::{PartyForm, PaymentStatus};

// =============================================================================
// Stub Backend
// =============================================================================

#[derive(Debug, Default)]
struct StubState {
    customers_created: u32,
    sale_attempts: u32,
    /// Sale attempts that fail before one succeeds.
    sale_failures_remaining: u32,
    pay_amount: Option<f64>,
}

type Shared = Arc<Mutex<StubState>>;

async fn stub_login() -> impl IntoResponse {
    Json(json!({"access_token": "tok-1", "username": "asha", "role": "admin"}))
}

async fn stub_inventory() -> impl IntoResponse {
    Json(json!([{
        "id": 1, "name": "Steel Tiffin", "sku": "ST-1",
        "category": null, "material": null,
        "quantity": 10, "cost_price": 40.0, "selling_price": 60.0,
        "min_stock_level": 2
    }]))
}

async fn stub_top_sellers() -> impl IntoResponse {
    Json(json!([]))
}

async fn stub_create_customer(State(state): State<Shared>) -> impl IntoResponse {
    let mut stub = state.lock().unwrap();
    stub.customers_created += 1;
    Json(json!({
        "id": 101, "name": "Asha", "mobile": null, "email": null,
        "address": null, "current_balance": 0.0
    }))
}

async fn stub_create_sale(State(state): State<Shared>) -> impl IntoResponse {
    let mut stub = state.lock().unwrap();
    stub.sale_attempts += 1;
    if stub.sale_failures_remaining > 0 {
        stub.sale_failures_remaining -= 1;
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Insufficient stock for Steel Tiffin"})),
        )
            .into_response();
    }
    Json(json!({
        "id": 7, "timestamp": "2026-03-01T10:00:00",
        "customer_id": 101, "customer_name": "Asha",
        "payment_status": "Paid", "paid_amount": 120.0,
        "total_amount": 120.0, "total_profit": 40.0,
        "invoice_number": "INV-7", "tax_amount": 0.0, "items": []
    }))
    .into_response()
}

async fn stub_list_sales() -> impl IntoResponse {
    Json(json!([{
        "id": 5, "timestamp": "2026-02-20T15:00:00",
        "customer_id": null, "customer_name": "Walk-in",
        "payment_status": "Partially Paid", "paid_amount": 300.0,
        "total_amount": 500.0, "total_profit": 100.0,
        "invoice_number": null, "tax_amount": 0.0, "items": []
    }]))
}

async fn stub_pay_sale(
    State(state): State<Shared>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let amount = body["amount"].as_f64().unwrap();
    state.lock().unwrap().pay_amount = Some(amount);
    // Message-only acknowledgement; the page re-fetches for the new totals
    Json(json!({"message": "Payment recorded"}))
}

async fn stub_expired_token() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
}

async fn spawn_stub(sale_failures: u32) -> (SocketAddr, Shared) {
    let state: Shared = Arc::new(Mutex::new(StubState {
        sale_failures_remaining: sale_failures,
        ..Default::default()
    }));

    let app = Router::new()
        .route("/auth/login", post(stub_login))
        .route("/inventory/", get(stub_inventory))
        .route("/inventory/top-sellers/", get(stub_top_sellers))
        .route("/customers/", post(stub_create_customer))
        .route("/sales/", post(stub_create_sale).get(stub_list_sales))
        .route("/sales/{id}/pay", post(stub_pay_sale))
        .route("/vendors/", get(stub_expired_token))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(&format!("http://{}", addr), TokenStore::in_memory()).unwrap()
}

fn new_customer_form() -> PartyForm {
    PartyForm {
        name: "Asha".to_string(),
        mobile: Some("9876500000".to_string()),
        email: None,
        address: None,
        current_balance: Money::zero(),
    }
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn test_checkout_with_new_customer() {
    let (addr, state) = spawn_stub(0).await;
    let mut pos = PosPage::new(client_for(addr), 0);

    pos.open().await.unwrap();
    pos.add_to_cart(1, 2).unwrap();
    pos.choose_customer(CustomerChoice::New(new_customer_form()));
    pos.payment_status = PaymentStatus::Paid;

    let sale = pos.checkout().await.unwrap();
    assert_eq!(sale.id, 7);
    assert!(pos.cart.is_empty());
    assert_eq!(pos.stage(), CheckoutStage::ReceiptShown);

    let stub = state.lock().unwrap();
    assert_eq!(stub.customers_created, 1);
    assert_eq!(stub.sale_attempts, 1);
}

/// A failed sale must not orphan-then-duplicate the customer created in
/// the same checkout: the retry reuses the id from the first attempt.
#[tokio::test]
async fn test_checkout_retry_reuses_created_customer() {
    let (addr, state) = spawn_stub(1).await;
    let mut pos = PosPage::new(client_for(addr), 0);

    pos.open().await.unwrap();
    pos.add_to_cart(1, 2).unwrap();
    pos.choose_customer(CustomerChoice::New(new_customer_form()));

    let first = pos.checkout().await;
    assert!(first.is_err());
    assert!(!pos.cart.is_empty(), "cart survives a failed checkout");
    assert_eq!(pos.stage(), CheckoutStage::Failed);

    let second = pos.checkout().await;
    assert!(second.is_ok());
    assert_eq!(pos.stage(), CheckoutStage::ReceiptShown);

    let stub = state.lock().unwrap();
    assert_eq!(stub.customers_created, 1, "retry must not create a second customer");
    assert_eq!(stub.sale_attempts, 2);
}

#[tokio::test]
async fn test_partial_payment_posts_planned_amount() {
    let (addr, state) = spawn_stub(0).await;
    let mut page = SalesHistoryPage::new(client_for(addr), 0);
    page.range = RangePreset::AllTime;

    page.refresh().await.unwrap();
    assert_eq!(page.sales().len(), 1);
    assert_eq!(page.total_outstanding(), Money::from_rupees(200));

    page.apply_payment(5, PaymentMode::Partial(Money::from_rupees(200)))
        .await
        .unwrap();
    assert_eq!(state.lock().unwrap().pay_amount, Some(200.0));
}

#[tokio::test]
async fn test_overpayment_rejected_before_any_request() {
    let (addr, state) = spawn_stub(0).await;
    let mut page = SalesHistoryPage::new(client_for(addr), 0);
    page.range = RangePreset::AllTime;
    page.refresh().await.unwrap();

    let err = page
        .apply_payment(5, PaymentMode::Partial(Money::from_rupees(201)))
        .await;
    assert!(err.is_err());
    assert!(state.lock().unwrap().pay_amount.is_none());
}

#[tokio::test]
async fn test_rejected_token_signs_session_out() {
    let (addr, _state) = spawn_stub(0).await;
    let client = client_for(addr);
    let mut session = Session::new(client.clone());

    session.sign_in("asha", "pw").await.unwrap();
    assert!(session.is_signed_in());

    // The vendors route answers 401 in this stub
    let err = client.vendors().list(None).await.unwrap_err();
    session.note_failure(&kirana_admin::AdminError::Api(err));
    assert!(!session.is_signed_in());
    assert!(!client.tokens().is_present());
}
