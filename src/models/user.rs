// SPDX-License-Identifier: MIT

//! Session and user identity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capability tag assigned at login, enforced server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Admin,
    /// Roles this build of the client does not know about.
    #[serde(other)]
    Other,
}

/// The active credential pair plus the identity it belongs to.
///
/// A session is persisted whole or not at all: every field is populated on
/// successful login, and the entire record is dropped on logout or refresh
/// failure. The access token is replaced in place on refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user id from the access token's `sub` claim
    pub user_id: String,
    /// Email the user logged in with
    pub email: String,
    /// Role returned by the login endpoint
    pub role: Role,
    /// Short-lived bearer credential for API calls
    pub access_token: String,
    /// Long-lived credential used only to mint new access tokens
    pub refresh_token: String,
    /// Decoded expiry of the current access token
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the access token is past (or within `skew` seconds of) expiry.
    pub fn is_stale(&self, now: DateTime<Utc>, skew_secs: i64) -> bool {
        now + chrono::Duration::seconds(skew_secs) >= self.expires_at
    }
}
