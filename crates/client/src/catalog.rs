//! Catalog snapshot and cart pricing.

use std::collections::HashMap;

use greencart_core::{Cart, Price, Product, ProductId, Quantity};
use rust_decimal::Decimal;

use crate::error::CartError;

/// Read-only snapshot of the product listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

/// Result of pricing a cart against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotal {
    /// Sum of `offer_price * quantity`, truncated to cents.
    pub amount: Price,
    /// Cart entries with no matching product; they are not in `amount`.
    pub unpriced: Vec<ProductId>,
}

impl Catalog {
    /// Build a snapshot from a listing. Later duplicates of an ID win.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(i, product)| (product.id.clone(), i))
            .collect();
        Self { products, index }
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// Products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Price of `qty` units of one product, truncated to cents.
    ///
    /// Returns `None` if the product is not in this snapshot.
    #[must_use]
    pub fn line_price(&self, id: &ProductId, qty: Quantity) -> Option<Price> {
        self.get(id).map(|product| Price::new(line_amount(product, qty)))
    }

    /// Price a cart, skipping entries whose product is missing.
    #[must_use]
    pub fn price_cart(&self, cart: &Cart) -> CartTotal {
        let mut total = Decimal::ZERO;
        let mut unpriced = Vec::new();

        for (id, qty) in cart.iter() {
            match self.get(id) {
                Some(product) => total = total.saturating_add(line_amount(product, qty)),
                None => unpriced.push(id.clone()),
            }
        }

        CartTotal {
            amount: Price::new(total),
            unpriced,
        }
    }

    /// Price a cart, failing on the first entry with no matching product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the cart references a product
    /// missing from this snapshot.
    pub fn price_cart_strict(&self, cart: &Cart) -> Result<Price, CartError> {
        let mut total = Decimal::ZERO;
        for (id, qty) in cart.iter() {
            let product = self
                .get(id)
                .ok_or_else(|| CartError::ProductNotFound(id.clone()))?;
            total = total.saturating_add(line_amount(product, qty));
        }
        Ok(Price::new(total))
    }
}

fn line_amount(product: &Product, qty: Quantity) -> Decimal {
    product.offer_price.saturating_mul(Decimal::from(qty))
}
