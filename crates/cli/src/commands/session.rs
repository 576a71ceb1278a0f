//! Session inspection command.

use greencart_client::CartStore;
use greencart_client::api::Backend;

/// Print who the backend thinks we are.
#[allow(clippy::print_stdout)]
pub fn whoami<B: Backend>(store: &CartStore<B>) {
    match store.user() {
        Some(user) => {
            let name = user.name.as_deref().unwrap_or("(no name)");
            println!("Logged in as {name} [{}]", user.id);
            if let Some(email) = &user.email {
                println!("Email: {email}");
            }
            println!("Cart items: {}", store.cart_count());
        }
        None => println!("Not logged in."),
    }

    if store.is_seller() {
        println!("Seller session: yes");
    }
}
