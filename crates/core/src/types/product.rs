//! Catalog product as served by the backend product listing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product from the catalog.
///
/// Only `id` and `offer_price` take part in cart pricing; the remaining
/// fields are carried for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// List price before discount.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Price actually charged per unit.
    pub offer_price: Decimal,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create a product with just the fields needed for pricing.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, offer_price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category: None,
            price: None,
            offer_price,
            in_stock: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_listing_entry() {
        let json = r#"{
            "_id": "p1",
            "name": "Organic Bananas",
            "category": "Fruits",
            "price": 60,
            "offerPrice": 49.99,
            "inStock": true,
            "image": ["a.png"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.offer_price, Decimal::new(4999, 2));
        assert_eq!(product.price, Some(Decimal::new(60, 0)));
        assert!(product.in_stock);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let product: Product = serde_json::from_str(r#"{"_id": "p2", "offerPrice": 3}"#).unwrap();
        assert!(product.name.is_empty());
        assert!(product.category.is_none());
        assert!(product.in_stock);
    }
}
