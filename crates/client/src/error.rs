//! Cart operation errors.
//!
//! Backend failures are [`crate::api::ApiError`]; they never reach callers of
//! the cart mutations, which only fail for caller-side reasons listed here.

use greencart_core::ProductId;
use thiserror::Error;

/// Errors returned by [`crate::CartStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A mutation was attempted without a logged-in user.
    #[error("Please login first")]
    NotAuthenticated,

    /// `remove_one` was called for a product that is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// An explicit quantity does not fit a cart quantity.
    #[error("Quantity out of range: {0}")]
    QuantityOutOfRange(i64),

    /// A cart entry has no matching product in the catalog snapshot.
    #[error("Product not found in catalog: {0}")]
    ProductNotFound(ProductId),
}
