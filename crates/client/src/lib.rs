//! GreenCart client library.
//!
//! Holds the storefront's client-side state: the session, a catalog snapshot
//! and the shopping cart, which is pushed to the backend after every change.
//!
//! # Architecture
//!
//! - [`store::CartStore`] is an owned value with its collaborators injected;
//!   there is no global state.
//! - [`api`] defines the backend service traits and the `reqwest`
//!   implementation ([`api::HttpBackend`]).
//! - [`sync`] runs the debounced push worker on the tokio runtime.
//! - [`notify`] is the user-facing notification channel.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod store;
pub mod sync;

pub use catalog::{Catalog, CartTotal};
pub use config::ClientConfig;
pub use error::CartError;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use session::Session;
pub use store::CartStore;
pub use sync::SyncConfig;
