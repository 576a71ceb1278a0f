//! Wire types for the storefront backend's JSON responses.
//!
//! Every endpoint answers `{"success": bool, ...}`; failures carry an
//! optional `message`.

use greencart_core::{Cart, Product, User};
use serde::{Deserialize, Serialize};

use super::ApiError;

/// Default message when the backend rejects without explaining why.
const UNSPECIFIED_REJECTION: &str = "Request was rejected by the server";

/// `GET api/user/is-auth`.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET api/product/list`.
#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    pub success: bool,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Plain `{success, message?}` acknowledgment.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST api/cart/update` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateRequest<'a> {
    pub cart_items: &'a Cart,
}

impl AuthResponse {
    /// The authenticated user, if the backend recognized the session.
    #[must_use]
    pub fn into_user(self) -> Option<User> {
        if self.success { self.user } else { None }
    }
}

impl ProductListResponse {
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when `success` is false.
    pub fn into_products(self) -> Result<Vec<Product>, ApiError> {
        if self.success {
            Ok(self.products)
        } else {
            Err(rejection(self.message))
        }
    }
}

impl StatusResponse {
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when `success` is false.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(rejection(self.message))
        }
    }
}

fn rejection(message: Option<String>) -> ApiError {
    ApiError::Rejected(message.unwrap_or_else(|| UNSPECIFIED_REJECTION.to_string()))
}
