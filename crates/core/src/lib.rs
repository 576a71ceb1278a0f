//! GreenCart Core - Shared types library.
//!
//! This crate provides the types shared by the GreenCart client components:
//! - `client` - Cart store, catalog snapshot and backend adapters
//! - `cli` - Command-line driver for the cart store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async runtime. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, carts, products and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
