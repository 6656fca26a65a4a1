// SPDX-License-Identifier: MIT

//! Catalog browsing: spare-part listings and details.

use crate::error::Result;
use crate::models::{Page, PartDetail, PartFilter, SparePart};
use crate::services::session::SessionManager;

/// Client for the `/spareparts` endpoints.
///
/// The catalog is readable without a session; requests still go through
/// `auth_fetch` so a logged-in user's token rides along.
#[derive(Clone)]
pub struct CatalogClient {
    session: SessionManager,
}

impl CatalogClient {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    /// List spare parts matching `filter`, paginated.
    pub async fn list_parts(&self, filter: &PartFilter) -> Result<Page<SparePart>> {
        self.session.get_json_query("/spareparts", filter).await
    }

    /// Fetch one part with its reviews embedded.
    pub async fn get_part(&self, part_id: &str) -> Result<PartDetail> {
        self.session
            .get_json(&format!("/spareparts/{}", part_id))
            .await
    }
}
