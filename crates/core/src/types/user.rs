//! Authenticated storefront user.

use serde::{Deserialize, Serialize};

use super::cart::Cart;
use super::id::UserId;

/// A logged-in user together with their persisted cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Cart persisted by the backend; empty when the user never saved one.
    #[serde(default)]
    pub cart_items: Cart,
}

impl User {
    /// Create a user with the given persisted cart.
    #[must_use]
    pub fn new(id: impl Into<UserId>, cart_items: Cart) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            cart_items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    #[test]
    fn test_deserialize_user_with_cart() {
        let json = r#"{"_id": "u1", "name": "Ada", "email": "ada@example.com", "cartItems": {"p1": 2}}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.cart_items.get(&ProductId::new("p1")), Some(2));
    }

    #[test]
    fn test_missing_cart_items_is_empty() {
        let user: User = serde_json::from_str(r#"{"_id": "u1"}"#).unwrap();
        assert!(user.cart_items.is_empty());
    }
}
