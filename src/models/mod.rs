// SPDX-License-Identifier: MIT

//! Data models for the storefront API and local state.

pub mod cart;
pub mod order;
pub mod part;
pub mod review;
pub mod user;

pub use cart::{LineItem, PartSnapshot};
pub use order::{Order, OrderItemInput, OrderSummary, ShippingAddress};
pub use part::{Page, PartDetail, PartFilter, PartSort, SparePart};
pub use review::{Review, ReviewInput};
pub use user::{Role, Session};
