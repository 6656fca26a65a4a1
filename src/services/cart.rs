// SPDX-License-Identifier: MIT

//! Cart store: per-device purchase intents, durable across restarts.
//!
//! The cart is device-scoped, not identity-bound: logging out does not touch
//! it. Every mutation writes the full item list back to local storage, and
//! totals are always derived from the items rather than stored.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{LineItem, PartSnapshot};
use crate::notify::Notifier;
use crate::storage::{LocalStore, CART_KEY};

/// Ordered set of line items with a fixed-key storage backing.
pub struct CartStore {
    store: LocalStore,
    notifier: Arc<dyn Notifier>,
    items: Vec<LineItem>,
}

impl CartStore {
    /// Open the cart, restoring persisted items.
    ///
    /// Absent or unparseable stored state is a silent reset to empty.
    pub fn open(store: LocalStore, notifier: Arc<dyn Notifier>) -> Self {
        let items: Vec<LineItem> = store.get(CART_KEY).unwrap_or_default();
        Self {
            store,
            notifier,
            items,
        }
    }

    /// The current line items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Σ(unit price × quantity) over all line items.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Σ(quantity) over all line items.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `qty` of a part, merging with an existing line for the same id.
    pub fn add_item(&mut self, part: PartSnapshot, qty: u32) -> Result<()> {
        let qty = qty.max(1);
        let message = format!(
            "{} {} for {} added to cart",
            part.brand, part.category, part.vehicle_type
        );

        if let Some(existing) = self.items.iter_mut().find(|i| i.part.id == part.id) {
            existing.quantity += qty;
        } else {
            self.items.push(LineItem {
                part,
                quantity: qty,
            });
        }
        self.persist()?;
        self.notifier.success(&message);
        Ok(())
    }

    /// Remove the line for `part_id`. No-op when absent.
    pub fn remove_item(&mut self, part_id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|i| i.part.id != part_id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()?;
        self.notifier.success("Item removed from cart");
        Ok(())
    }

    /// Set the quantity for `part_id` exactly; `qty < 1` removes the line.
    pub fn update_quantity(&mut self, part_id: &str, qty: u32) -> Result<()> {
        if qty < 1 {
            return self.remove_item(part_id);
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.part.id == part_id) {
            item.quantity = qty;
            self.persist()?;
        }
        Ok(())
    }

    /// Empty the cart. Used after a successful payment.
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.persist()?;
        self.notifier.success("Cart cleared");
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.store.put(CART_KEY, &self.items)
    }
}
