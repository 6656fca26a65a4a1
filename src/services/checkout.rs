// SPDX-License-Identifier: MIT

//! Checkout: turn the cart into a hosted payment session.
//!
//! The payment provider redirect itself is the embedding application's
//! concern; this client stops at the checkout URL and clears the cart once
//! the application reports the payment confirmed.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ClientError, Result};
use crate::models::ShippingAddress;
use crate::services::cart::CartStore;
use crate::services::session::SessionManager;
use crate::storage::{address_key, LocalStore};

/// Client for the `/checkout` endpoint.
#[derive(Clone)]
pub struct CheckoutClient {
    session: SessionManager,
    store: LocalStore,
}

#[derive(Serialize)]
struct CheckoutItem<'a> {
    part_id: &'a str,
    quantity: u32,
}

#[derive(Serialize)]
struct CheckoutRequest<'a> {
    items: Vec<CheckoutItem<'a>>,
}

#[derive(Deserialize)]
struct CheckoutResponse {
    checkout_url: String,
}

impl CheckoutClient {
    pub fn new(session: SessionManager, store: LocalStore) -> Self {
        Self { session, store }
    }

    /// Create a hosted payment session for the cart's contents.
    ///
    /// Fails with a validation error on an empty cart or incomplete address;
    /// neither the cart nor the session is touched on failure. The address
    /// is saved for pre-filling the next checkout.
    pub async fn create_payment_session(
        &self,
        cart: &CartStore,
        address: &ShippingAddress,
    ) -> Result<String> {
        if cart.is_empty() {
            return Err(ClientError::Validation("your cart is empty".to_string()));
        }
        address.validate()?;

        let request = CheckoutRequest {
            items: cart
                .items()
                .iter()
                .map(|item| CheckoutItem {
                    part_id: &item.part.id,
                    quantity: item.quantity,
                })
                .collect(),
        };

        let response: CheckoutResponse = self.session.post_json("/checkout", &request).await?;
        tracing::info!(items = cart.items().len(), "Checkout session created");

        self.save_address(address);
        Ok(response.checkout_url)
    }

    /// Called after the payment provider confirms payment: empties the cart.
    pub fn finalize(&self, cart: &mut CartStore) -> Result<()> {
        cart.clear()
    }

    /// The address used at the last successful checkout, if any.
    pub fn saved_address(&self) -> Option<ShippingAddress> {
        let (user_id, _) = self.session.user()?;
        self.store.get(&address_key(&user_id))
    }

    fn save_address(&self, address: &ShippingAddress) {
        let Some((user_id, _)) = self.session.user() else {
            return;
        };
        if let Err(e) = self.store.put(&address_key(&user_id), address) {
            tracing::warn!(error = %e, "Failed to save checkout address");
        }
    }
}
