//! Cart contents: product ID to quantity.
//!
//! Every entry in a [`Cart`] has a quantity of at least one. Operations that
//! would leave an entry at zero remove it instead, and deserialization drops
//! entries from older persisted carts whose count is not a positive integer.
//!
//! Updates never mutate in place: each operation builds a new mapping, so a
//! previous snapshot handed to the sync worker is never aliased by a later
//! mutation.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;

/// Quantity of a single product in a cart.
pub type Quantity = u32;

/// Shopping cart contents.
///
/// Serializes as a plain JSON object (`{"<product id>": <quantity>}`), which is
/// the `cartItems` shape the backend stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<ProductId, Quantity>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Quantity of a product, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<Quantity> {
        self.0.get(id).copied()
    }

    /// Whether the product has an entry.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.0.contains_key(id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in product ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, Quantity)> {
        self.0.iter().map(|(id, qty)| (id, *qty))
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.0.values().map(|qty| u64::from(*qty)).sum()
    }

    /// New cart with one more unit of `id` (inserted at 1 when absent).
    #[must_use]
    pub fn incremented(&self, id: &ProductId) -> Self {
        let mut next = self.0.clone();
        let qty = next.entry(id.clone()).or_insert(0);
        *qty = qty.saturating_add(1);
        Self(next)
    }

    /// New cart with one unit of `id` removed.
    ///
    /// The entry is deleted when its quantity reaches zero. Returns `None`
    /// when `id` is not in the cart.
    #[must_use]
    pub fn decremented(&self, id: &ProductId) -> Option<Self> {
        let current = self.get(id)?;
        Some(self.with_quantity(id, current - 1))
    }

    /// New cart with the quantity of `id` set, removing it when `qty` is zero.
    ///
    /// This inserts `id` when absent; callers that must not create entries
    /// check [`Cart::contains`] first.
    #[must_use]
    pub fn with_quantity(&self, id: &ProductId, qty: Quantity) -> Self {
        let mut next = self.0.clone();
        if qty == 0 {
            next.remove(id);
        } else {
            next.insert(id.clone(), qty);
        }
        Self(next)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = (&'a ProductId, &'a Quantity);
    type IntoIter = btree_map::Iter<'a, ProductId, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(ProductId, Quantity)> for Cart {
    fn from_iter<T: IntoIterator<Item = (ProductId, Quantity)>>(iter: T) -> Self {
        Self(iter.into_iter().filter(|(_, qty)| *qty > 0).collect())
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Persisted carts written by older clients may hold zero, negative,
        // fractional or quoted counts; those entries are dropped rather than
        // failing the whole cart.
        let raw = BTreeMap::<ProductId, StoredQuantity>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(id, qty)| match qty {
                StoredQuantity::Count(n) => Quantity::try_from(n).ok().map(|n| (id, n)),
                StoredQuantity::Invalid(_) => None,
            })
            .collect())
    }
}

/// A persisted count; anything that is not an integer lands in `Invalid`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredQuantity {
    Count(i64),
    Invalid(#[allow(dead_code)] IgnoredAny),
}
