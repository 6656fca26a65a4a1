// SPDX-License-Identifier: MIT

//! Order and shipping models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Shipping address collected at checkout.
///
/// Street, city, and country are required by the API; the postal code is not.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShippingAddress {
    #[validate(length(min = 1, message = "street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

/// One line of an order being placed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemInput {
    pub sparepart_id: String,
    pub quantity: u32,
}

/// A placed order as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub paid: bool,
    #[serde(default)]
    pub total_price: f64,
    pub created_at: Option<String>,
}

/// Compact order view used by the order-history listing.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub status: String,
    pub paid: bool,
    pub total_items: u32,
    pub address: String,
    pub created_at: Option<String>,
}
