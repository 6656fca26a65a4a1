// SPDX-License-Identifier: MIT

//! Cart line-item models.

use serde::{Deserialize, Serialize};

use crate::models::part::SparePart;

/// The part fields the cart keeps a snapshot of.
///
/// Prices are snapshotted at add time so a later catalog change does not
/// silently reprice a cart the user has already reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSnapshot {
    pub id: String,
    pub brand: String,
    pub category: String,
    pub vehicle_type: String,
    pub buying_price: f64,
    pub image: Option<String>,
}

impl From<&SparePart> for PartSnapshot {
    fn from(part: &SparePart) -> Self {
        Self {
            id: part.id.clone(),
            brand: part.brand.clone(),
            category: part.category.clone(),
            vehicle_type: part.vehicle_type.clone(),
            buying_price: part.buying_price,
            image: part.image.clone(),
        }
    }
}

/// One part plus the quantity the visitor intends to buy.
///
/// Invariant: `quantity >= 1`; the cart store removes the line instead of
/// persisting a zero or negative quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub part: PartSnapshot,
    pub quantity: u32,
}

impl LineItem {
    /// Price contribution of this line.
    pub fn subtotal(&self) -> f64 {
        self.part.buying_price * self.quantity as f64
    }
}
