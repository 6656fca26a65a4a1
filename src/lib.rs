// SPDX-License-Identifier: MIT

//! titan-parts: client SDK for the Titan auto-parts storefront API.
//!
//! Provides the storefront's client-side state and API plumbing: a session
//! manager with transparent access-token refresh, a durable local cart, and
//! typed clients for the catalog, review, order, and checkout endpoints.

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod storage;

use std::sync::Arc;

use config::Config;
use error::Result;
use notify::Notifier;
use services::{
    CartStore, CatalogClient, CheckoutClient, OrdersClient, ReviewsClient, SessionManager,
};
use storage::LocalStore;

/// Everything a storefront frontend needs, wired together.
///
/// Construct one per application; the parts can also be built individually
/// when only a subset is needed.
pub struct Storefront {
    pub session: SessionManager,
    pub cart: CartStore,
    pub catalog: CatalogClient,
    pub reviews: ReviewsClient,
    pub orders: OrdersClient,
    pub checkout: CheckoutClient,
}

impl Storefront {
    /// Build the full client from configuration, restoring persisted
    /// session and cart state.
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let store = LocalStore::open(&config.data_dir)?;
        let session = SessionManager::new(config, store.clone(), notifier.clone());
        let cart = CartStore::open(store.clone(), notifier);

        Ok(Self {
            catalog: CatalogClient::new(session.clone()),
            reviews: ReviewsClient::new(session.clone()),
            orders: OrdersClient::new(session.clone()),
            checkout: CheckoutClient::new(session.clone(), store),
            session,
            cart,
        })
    }
}
