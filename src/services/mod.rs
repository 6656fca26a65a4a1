// SPDX-License-Identifier: MIT

//! Services module - client-side state and API access.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod reviews;
pub mod session;

pub use cart::CartStore;
pub use catalog::CatalogClient;
pub use checkout::CheckoutClient;
pub use orders::OrdersClient;
pub use reviews::ReviewsClient;
pub use session::SessionManager;
