//! Backend service interfaces and their REST implementation.
//!
//! # Architecture
//!
//! - [`SessionService`], [`CatalogService`] and [`SellerService`] are the
//!   collaborator seams the cart store depends on
//! - [`HttpBackend`] implements all three over `reqwest`
//! - The backend is the source of truth for persisted carts; the store only
//!   ever writes to it, it never reads acknowledgments back
//!
//! # Endpoints
//!
//! | Call | Method | Path |
//! |---|---|---|
//! | session | GET | `api/user/is-auth` |
//! | products | GET | `api/product/list` |
//! | push cart | POST | `api/cart/update` |
//! | seller | GET | `api/seller/is-auth` |

mod http;
pub mod types;

use std::future::Future;

use greencart_core::{Cart, Product};
use thiserror::Error;

pub use http::HttpBackend;

use crate::session::Session;

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Backend answered `{"success": false}`.
    #[error("{0}")]
    Rejected(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configured session cookie is not a valid header value.
    #[error("Invalid session cookie: {0}")]
    InvalidCookie(String),
}

/// Session lookup and cart persistence.
pub trait SessionService: Send + Sync + 'static {
    /// Current session, including the user's persisted cart.
    fn get_session(&self) -> impl Future<Output = Result<Session, ApiError>> + Send;

    /// Persist the full cart for the current user.
    fn push_cart(&self, cart: &Cart) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Product listing used to price carts.
pub trait CatalogService: Send + Sync + 'static {
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}

/// Seller status of the current browser session.
pub trait SellerService: Send + Sync + 'static {
    fn is_seller(&self) -> impl Future<Output = Result<bool, ApiError>> + Send;
}

/// Everything a [`crate::CartStore`] needs from the backend.
pub trait Backend: SessionService + CatalogService + SellerService {}

impl<T> Backend for T where T: SessionService + CatalogService + SellerService {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 502 - bad gateway");
    }

    #[test]
    fn test_rejected_shows_backend_message() {
        let err = ApiError::Rejected("Not Authorized".to_string());
        assert_eq!(err.to_string(), "Not Authorized");
    }
}
