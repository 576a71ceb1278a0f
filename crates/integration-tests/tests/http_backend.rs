//! Integration tests for the REST backend client.
//!
//! Each test starts an axum server on an ephemeral localhost port that mimics
//! the storefront backend's JSON endpoints.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum::routing::{get, post};
use axum::{Json, Router};
use greencart_client::api::{
    ApiError, CatalogService, HttpBackend, SellerService, SessionService,
};
use greencart_client::config::BackendConfig;
use greencart_client::notify::TracingNotifier;
use greencart_client::{CartStore, Session, SyncConfig};
use greencart_core::{Cart, ProductId};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

const GOOD_COOKIE: &str = "token=good";

/// Requests the fake backend received on `api/cart/update`.
#[derive(Clone, Default)]
struct Recorded {
    cart_updates: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl Recorded {
    fn cart_updates(&self) -> Vec<(Option<String>, Value)> {
        self.cart_updates.lock().unwrap().clone()
    }
}

fn cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

async fn is_auth(headers: HeaderMap) -> Json<Value> {
    if cookie(&headers).as_deref() == Some(GOOD_COOKIE) {
        Json(json!({
            "success": true,
            "user": {
                "_id": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "cartItems": {"p1": 2, "stale": 0}
            }
        }))
    } else {
        Json(json!({"success": false, "message": "Not Authorized"}))
    }
}

async fn product_list() -> Json<Value> {
    Json(json!({
        "success": true,
        "products": [
            {"_id": "p1", "name": "Apple", "category": "Fruits", "price": 12, "offerPrice": 9.999, "inStock": true},
            {"_id": "p2", "name": "Milk", "offerPrice": "2.50", "inStock": false}
        ]
    }))
}

async fn cart_update(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let rejected = body["cartItems"].get("forbidden").is_some();
    recorded
        .cart_updates
        .lock()
        .unwrap()
        .push((cookie(&headers), body));

    if rejected {
        Json(json!({"success": false, "message": "Product unavailable"}))
    } else {
        Json(json!({"success": true, "message": "Cart Updated"}))
    }
}

async fn seller_is_auth(headers: HeaderMap) -> Json<Value> {
    Json(json!({"success": cookie(&headers).as_deref() == Some("seller=yes")}))
}

/// Start the fake backend and return its base URL.
async fn spawn_backend(recorded: Recorded) -> Url {
    let app = Router::new()
        .route("/api/user/is-auth", get(is_auth))
        .route("/api/product/list", get(product_list))
        .route("/api/cart/update", post(cart_update))
        .route("/api/seller/is-auth", get(seller_is_auth))
        .with_state(recorded);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{addr}/")).unwrap()
}

fn backend(base_url: Url, cookie: Option<&str>) -> HttpBackend {
    HttpBackend::new(&BackendConfig {
        base_url,
        session_cookie: cookie.map(|c| SecretString::from(c.to_string())),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_session_with_cookie_is_authenticated() {
    let url = spawn_backend(Recorded::default()).await;
    let session = backend(url, Some(GOOD_COOKIE)).get_session().await.unwrap();

    let Session::Authenticated(user) = session else {
        panic!("expected an authenticated session");
    };
    assert_eq!(user.id.as_str(), "u1");
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    // Zero-quantity entries from the backend are dropped on load.
    assert_eq!(user.cart_items.len(), 1);
    assert_eq!(user.cart_items.get(&ProductId::new("p1")), Some(2));
}

#[tokio::test]
async fn test_session_without_cookie_is_anonymous() {
    let url = spawn_backend(Recorded::default()).await;
    let session = backend(url, None).get_session().await.unwrap();
    assert_eq!(session, Session::Anonymous);
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/")).unwrap();
    let err = backend(url, Some(GOOD_COOKIE))
        .get_session()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}

// =============================================================================
// Catalog and seller
// =============================================================================

#[tokio::test]
async fn test_product_list_parses_prices() {
    let url = spawn_backend(Recorded::default()).await;
    let products = backend(url, None).list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].offer_price, Decimal::new(9999, 3));
    assert_eq!(products[0].price, Some(Decimal::new(12, 0)));
    assert_eq!(products[1].offer_price, Decimal::new(250, 2));
    assert!(!products[1].in_stock);
}

#[tokio::test]
async fn test_unknown_path_is_status_error() {
    let url = spawn_backend(Recorded::default()).await;
    let prefixed = url.join("missing/").unwrap();
    let err = backend(prefixed, None).list_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_seller_flag() {
    let url = spawn_backend(Recorded::default()).await;
    assert!(backend(url.clone(), Some("seller=yes")).is_seller().await.unwrap());
    assert!(!backend(url, Some(GOOD_COOKIE)).is_seller().await.unwrap());
}

// =============================================================================
// Cart push
// =============================================================================

#[tokio::test]
async fn test_push_cart_sends_cart_items_and_cookie() {
    let recorded = Recorded::default();
    let url = spawn_backend(recorded.clone()).await;

    let cart: Cart = [(ProductId::new("p1"), 3)].into_iter().collect();
    backend(url, Some(GOOD_COOKIE)).push_cart(&cart).await.unwrap();

    let updates = recorded.cart_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0.as_deref(), Some(GOOD_COOKIE));
    assert_eq!(updates[0].1, json!({"cartItems": {"p1": 3}}));
}

#[tokio::test]
async fn test_push_cart_rejection_carries_message() {
    let url = spawn_backend(Recorded::default()).await;

    let cart: Cart = [(ProductId::new("forbidden"), 1)].into_iter().collect();
    let err = backend(url, Some(GOOD_COOKIE))
        .push_cart(&cart)
        .await
        .unwrap_err();
    assert!(matches!(&err, ApiError::Rejected(msg) if msg == "Product unavailable"));
}

// =============================================================================
// Store over HTTP
// =============================================================================

#[tokio::test]
async fn test_store_round_trip_over_http() {
    let recorded = Recorded::default();
    let url = spawn_backend(recorded.clone()).await;

    let mut store = CartStore::new(
        Arc::new(backend(url, Some(GOOD_COOKIE))),
        Arc::new(TracingNotifier),
        SyncConfig::default(),
    );
    store.bootstrap().await;

    assert!(store.is_loaded());
    assert_eq!(store.catalog().len(), 2);
    // 2 x 9.999 = 19.998
    assert_eq!(store.cart_amount().to_string(), "19.99");

    store.add_item(&ProductId::new("p2")).unwrap();
    store.flush().await;

    let updates = recorded.cart_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1, json!({"cartItems": {"p1": 2, "p2": 1}}));
    assert_eq!(store.cart_amount().to_string(), "22.49");
}
