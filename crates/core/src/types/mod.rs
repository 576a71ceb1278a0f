//! Core types for GreenCart.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use cart::{Cart, Quantity};
pub use id::*;
pub use price::{Price, truncate_to_cents};
pub use product::Product;
pub use user::User;
