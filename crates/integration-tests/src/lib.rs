//! Integration tests for the GreenCart client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greencart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_sync` - Store behavior against an in-memory [`FakeBackend`]
//! - `http_backend` - `HttpBackend` against an in-process axum server
//!
//! Nothing here talks to a real backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use greencart_client::api::{ApiError, CatalogService, SellerService, SessionService};
use greencart_client::Session;
use greencart_core::{Cart, Product, User};

/// In-memory backend with switchable failures.
///
/// Every push attempt is recorded before it resolves, so tests can tell a
/// discarded snapshot (never attempted) from a failed one.
#[derive(Debug, Default)]
pub struct FakeBackend {
    user: Mutex<Option<User>>,
    products: Mutex<Vec<Product>>,
    seller: AtomicBool,
    fail_session: AtomicBool,
    fail_products: AtomicBool,
    fail_pushes: AtomicBool,
    push_delay: Mutex<Option<Duration>>,
    pushes: Mutex<Vec<Cart>>,
}

impl FakeBackend {
    /// Backend that reports `user` as logged in.
    #[must_use]
    pub fn with_user(user: User) -> Self {
        let backend = Self::default();
        *lock(&backend.user) = Some(user);
        backend
    }

    #[must_use]
    pub fn products(self, products: Vec<Product>) -> Self {
        *lock(&self.products) = products;
        self
    }

    #[must_use]
    pub fn seller(self) -> Self {
        self.seller.store(true, Ordering::SeqCst);
        self
    }

    /// Make every push take `delay` before resolving.
    #[must_use]
    pub fn push_delay(self, delay: Duration) -> Self {
        *lock(&self.push_delay) = Some(delay);
        self
    }

    /// Change who the session endpoint reports; `None` means logged out.
    pub fn set_user(&self, user: Option<User>) {
        *lock(&self.user) = user;
    }

    pub fn fail_session(&self, fail: bool) {
        self.fail_session.store(fail, Ordering::SeqCst);
    }

    pub fn fail_products(&self, fail: bool) {
        self.fail_products.store(fail, Ordering::SeqCst);
    }

    pub fn fail_pushes(&self, fail: bool) {
        self.fail_pushes.store(fail, Ordering::SeqCst);
    }

    /// Snapshots the store tried to push, oldest first.
    #[must_use]
    pub fn pushes(&self) -> Vec<Cart> {
        lock(&self.pushes).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

impl SessionService for FakeBackend {
    async fn get_session(&self) -> Result<Session, ApiError> {
        if self.fail_session.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(Session::from(lock(&self.user).clone()))
    }

    async fn push_cart(&self, cart: &Cart) -> Result<(), ApiError> {
        lock(&self.pushes).push(cart.clone());

        let delay = *lock(&self.push_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_pushes.load(Ordering::SeqCst) {
            return Err(ApiError::Rejected("Cart update failed".to_string()));
        }
        Ok(())
    }
}

impl CatalogService for FakeBackend {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        if self.fail_products.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(lock(&self.products).clone())
    }
}

impl SellerService for FakeBackend {
    async fn is_seller(&self) -> Result<bool, ApiError> {
        Ok(self.seller.load(Ordering::SeqCst))
    }
}
