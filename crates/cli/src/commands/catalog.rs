//! Catalog listing command.

use greencart_client::CartStore;
use greencart_client::api::Backend;
use greencart_core::Price;

/// Print every product with its offer price.
#[allow(clippy::print_stdout)]
pub fn list<B: Backend>(store: &CartStore<B>, currency: &str) {
    let catalog = store.catalog();
    if catalog.is_empty() {
        println!("No products available.");
        return;
    }

    for product in catalog.products() {
        let stock = if product.in_stock { "" } else { " (out of stock)" };
        println!(
            "{:<26} {:<32} {}{stock}",
            product.id,
            product.name,
            Price::new(product.offer_price).display_with(currency)
        );
    }
}
