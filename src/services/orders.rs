// SPDX-License-Identifier: MIT

//! Order placement, order history, and admin order management.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::models::{Order, OrderItemInput, OrderSummary, ShippingAddress};
use crate::services::session::SessionManager;

/// Client for the `/orders` endpoints. All calls require a session.
#[derive(Clone)]
pub struct OrdersClient {
    session: SessionManager,
}

#[derive(Serialize)]
struct PlaceOrderRequest<'a> {
    items: &'a [OrderItemInput],
    #[serde(flatten)]
    address: &'a ShippingAddress,
}

#[derive(Deserialize)]
struct OrderListResponse {
    orders: Vec<OrderSummary>,
}

#[derive(Serialize)]
struct StatusUpdateRequest<'a> {
    status: &'a str,
}

impl OrdersClient {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    /// Place an order for `items` shipped to `address`.
    pub async fn place_order(
        &self,
        items: &[OrderItemInput],
        address: &ShippingAddress,
    ) -> Result<Order> {
        if items.is_empty() {
            return Err(crate::error::ClientError::Validation(
                "no items provided".to_string(),
            ));
        }
        address.validate()?;

        self.session
            .post_json("/orders", &PlaceOrderRequest { items, address })
            .await
    }

    /// Order history for the logged-in user, newest first per the API.
    pub async fn list_orders(&self) -> Result<Vec<OrderSummary>> {
        let response: OrderListResponse = self.session.get_json("/orders").await?;
        Ok(response.orders)
    }

    /// Cancel one of the caller's own orders. Only pending orders can be
    /// cancelled; the server rejects anything else.
    pub async fn cancel_order(&self, order_id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .session
            .patch_json(
                &format!("/orders/{}", order_id),
                &StatusUpdateRequest { status: "cancelled" },
            )
            .await?;
        Ok(())
    }

    /// All orders across users. The server enforces the admin role.
    pub async fn list_all_orders(&self) -> Result<Vec<Order>> {
        self.session.get_json("/admin/orders").await
    }

    /// Set any order's status (admin). Allowed values are decided server
    /// side: pending, cancelled, delivered.
    pub async fn set_order_status(&self, order_id: &str, status: &str) -> Result<()> {
        let _: serde_json::Value = self
            .session
            .patch_json(
                &format!("/admin/orders/{}", order_id),
                &StatusUpdateRequest { status },
            )
            .await?;
        Ok(())
    }
}
