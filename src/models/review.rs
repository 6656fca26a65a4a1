// SPDX-License-Identifier: MIT

//! Review models.

use serde::{Deserialize, Serialize};

/// A review attached to a spare part.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub sparepart_id: String,
    pub comment: Option<String>,
    pub rating: Option<u8>,
    pub created_at: Option<String>,
}

/// Review content for create and edit calls. Both fields are optional;
/// the server keeps whatever was already set for an omitted field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewInput {
    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
