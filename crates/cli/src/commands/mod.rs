//! CLI command implementations.
//!
//! Every command boots a [`CartStore`] against the configured backend,
//! runs, then shuts the store down so pending cart pushes reach the backend
//! before the process exits. Notifications raised along the way are printed
//! last.

pub mod cart;
pub mod catalog;
pub mod session;

use std::sync::Arc;

use greencart_client::api::{ApiError, HttpBackend};
use greencart_client::notify::ChannelNotifier;
use greencart_client::{CartError, CartStore, ClientConfig, NotificationLevel};
use greencart_core::ProductId;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::Commands;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Backend client could not be built.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Cart operation was refused.
    #[error("{0}")]
    Cart(#[from] CartError),
}

/// Run a parsed command.
///
/// # Errors
///
/// Returns `CommandError` if the backend client cannot be built or the cart
/// operation is refused.
pub async fn run(command: Commands, config: ClientConfig) -> Result<(), CommandError> {
    let backend = HttpBackend::new(&config.backend)?;
    let (notifier, notifications) = ChannelNotifier::channel();
    let mut store = CartStore::new(Arc::new(backend), Arc::new(notifier), config.sync);

    store.bootstrap().await;

    let result = match command {
        Commands::Cart => {
            cart::show(&store, &config.currency);
            Ok(())
        }
        Commands::Add { product_id } => cart::add(&mut store, &ProductId::from(product_id)),
        Commands::Set {
            product_id,
            quantity,
        } => cart::set(&mut store, &ProductId::from(product_id), quantity),
        Commands::Remove { product_id } => cart::remove(&mut store, &ProductId::from(product_id)),
        Commands::Products => {
            catalog::list(&store, &config.currency);
            Ok(())
        }
        Commands::Whoami => {
            session::whoami(&store);
            Ok(())
        }
    };

    store.shutdown().await;
    print_notifications(notifications);

    result.map_err(CommandError::from)
}

#[allow(clippy::print_stdout)]
fn print_notifications(mut notifications: UnboundedReceiver<greencart_client::Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        let tag = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Info => "info",
            NotificationLevel::Error => "error",
        };
        println!("[{tag}] {}", notification.message);
    }
}
