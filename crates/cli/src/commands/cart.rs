//! Cart commands.
//!
//! Mutations print the resulting count; the push to the backend happens when
//! the store shuts down.

use greencart_client::api::Backend;
use greencart_client::{CartError, CartStore};
use greencart_core::ProductId;

/// Print cart lines, item count and total.
#[allow(clippy::print_stdout)]
pub fn show<B: Backend>(store: &CartStore<B>, currency: &str) {
    if !store.session().is_authenticated() {
        println!("Not logged in; the cart is empty.");
        return;
    }

    if store.cart().is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for (id, qty) in store.cart().iter() {
        let catalog = store.catalog();
        match catalog.get(id).zip(catalog.line_price(id, qty)) {
            Some((product, line)) => {
                let name = if product.name.is_empty() {
                    id.as_str()
                } else {
                    product.name.as_str()
                };
                println!("{qty:>4} x {name:<32} {}", line.display_with(currency));
            }
            None => println!("{qty:>4} x {id:<32} (no longer available)"),
        }
    }

    let total = store.cart_total();
    println!();
    println!("Items: {}", store.cart_count());
    println!("Total: {}", total.amount.display_with(currency));
    if !total.unpriced.is_empty() {
        println!("({} item(s) could not be priced)", total.unpriced.len());
    }
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CartError::NotAuthenticated` without a session.
pub fn add<B: Backend>(store: &mut CartStore<B>, id: &ProductId) -> Result<(), CartError> {
    if store.catalog().get(id).is_none() && !store.catalog().is_empty() {
        tracing::warn!(product_id = %id, "Product is not in the catalog");
    }
    store.add_item(id)?;
    print_count(store);
    Ok(())
}

/// Set the quantity of a product already in the cart.
///
/// # Errors
///
/// Returns `CartError::QuantityOutOfRange` for quantities that do not fit.
pub fn set<B: Backend>(
    store: &mut CartStore<B>,
    id: &ProductId,
    quantity: i64,
) -> Result<(), CartError> {
    if !store.cart().contains(id) {
        tracing::info!(product_id = %id, "Product is not in the cart, nothing to update");
    }
    store.set_quantity(id, quantity)?;
    print_count(store);
    Ok(())
}

/// Remove one unit of a product.
///
/// # Errors
///
/// Returns `CartError::NotInCart` if the product is not in the cart.
pub fn remove<B: Backend>(store: &mut CartStore<B>, id: &ProductId) -> Result<(), CartError> {
    store.remove_one(id)?;
    print_count(store);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_count<B: Backend>(store: &CartStore<B>) {
    println!("Cart now holds {} item(s).", store.cart_count());
}
