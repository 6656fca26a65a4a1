// SPDX-License-Identifier: MIT

//! Durable local key/value storage.

pub mod local;

pub use local::LocalStore;

/// Storage key for the persisted session.
pub const SESSION_KEY: &str = "session";

/// Storage key for the persisted cart.
pub const CART_KEY: &str = "cart";

/// Storage key for a user's saved shipping address.
pub fn address_key(user_id: &str) -> String {
    format!("address_{}", user_id)
}
