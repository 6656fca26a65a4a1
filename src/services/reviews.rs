// SPDX-License-Identifier: MIT

//! Product reviews and like/dislike reactions.

use serde::Serialize;

use crate::error::Result;
use crate::models::{Review, ReviewInput};
use crate::services::session::SessionManager;

/// Client for the `/reviews` endpoints. All calls require a session.
#[derive(Clone)]
pub struct ReviewsClient {
    session: SessionManager,
}

#[derive(Serialize)]
struct ReactionRequest {
    is_like: bool,
}

impl ReviewsClient {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    /// Post a review on a part.
    pub async fn post_review(&self, part_id: &str, input: &ReviewInput) -> Result<Review> {
        self.session
            .post_json(&format!("/reviews/{}", part_id), input)
            .await
    }

    /// Edit one of the caller's own reviews; the server rejects edits to
    /// other users' reviews.
    pub async fn edit_review(&self, review_id: &str, input: &ReviewInput) -> Result<Review> {
        self.session
            .patch_json(&format!("/reviews/edit/{}", review_id), input)
            .await
    }

    /// Delete one of the caller's own reviews.
    pub async fn delete_review(&self, review_id: &str) -> Result<()> {
        self.session
            .delete(&format!("/reviews/edit/{}", review_id))
            .await
    }

    /// Like or dislike a review. Reacting again replaces the earlier
    /// reaction rather than stacking.
    pub async fn react(&self, review_id: &str, is_like: bool) -> Result<()> {
        let _: serde_json::Value = self
            .session
            .post_json(
                &format!("/reviews/{}/react", review_id),
                &ReactionRequest { is_like },
            )
            .await?;
        Ok(())
    }

    /// Remove the caller's reaction from a review, if any.
    pub async fn remove_reaction(&self, review_id: &str) -> Result<()> {
        self.session
            .delete(&format!("/reviews/{}/react", review_id))
            .await
    }
}
