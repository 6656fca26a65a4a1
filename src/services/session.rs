// SPDX-License-Identifier: MIT

//! Session manager: login, logout, and authenticated requests with
//! transparent access-token refresh.
//!
//! Handles:
//! - Credential exchange against the `/login` endpoint
//! - Access-token expiry decoding and staleness checks
//! - Proactive refresh via a one-shot timer, plus reactive refresh on 401
//! - Single-flight refresh so a timer and a 401 retry share one exchange
//! - Durable persistence of the full session across restarts

use std::sync::{Arc, Mutex as StdMutex, RwLock as StdRwLock};

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use validator::Validate;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::{Role, Session};
use crate::notify::Notifier;
use crate::storage::{LocalStore, SESSION_KEY};

/// Cloneable handle to the session state shared by all API clients.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    http: reqwest::Client,
    base_url: String,
    skew_secs: i64,
    store: LocalStore,
    notifier: Arc<dyn Notifier>,
    session: StdRwLock<Option<Session>>,
    /// Serializes token refresh so concurrent triggers join one exchange.
    refresh_lock: Mutex<()>,
    /// Pending proactive-refresh timer, replaced on every (re)schedule.
    refresh_timer: StdMutex<Option<JoinHandle<()>>>,
}

/// Login/register payload.
#[derive(Debug, Serialize, Validate)]
struct CredentialsRequest {
    #[validate(email(message = "malformed email address"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
}

/// Login response from the API.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
    role: Role,
}

/// Token refresh response from the API.
#[derive(Debug, Deserialize)]
struct TokenRefreshResponse {
    access_token: String,
}

/// Claims the client reads out of an access token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

impl SessionManager {
    /// Create a session manager, restoring any persisted session.
    ///
    /// A corrupt or missing stored session yields the logged-out state. When
    /// a session is restored inside an async runtime, its proactive refresh
    /// timer is re-armed from the stored expiry.
    pub fn new(config: &Config, store: LocalStore, notifier: Arc<dyn Notifier>) -> Self {
        let restored: Option<Session> = store.get(SESSION_KEY);

        let manager = Self {
            inner: Arc::new(SessionInner {
                http: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                skew_secs: config.refresh_skew_secs,
                store,
                notifier,
                session: StdRwLock::new(restored),
                refresh_lock: Mutex::new(()),
                refresh_timer: StdMutex::new(None),
            }),
        };

        if let Some(session) = manager.session() {
            tracing::debug!(user_id = %session.user_id, "Restored persisted session");
            manager.schedule_refresh(session.expires_at);
        }

        manager
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    /// The current session, if logged in.
    pub fn session(&self) -> Option<Session> {
        self.inner
            .session
            .read()
            .expect("session lock poisoned")
            .clone()
    }

    /// The identity of the logged-in user, if any.
    pub fn user(&self) -> Option<(String, Role)> {
        self.session().map(|s| (s.user_id, s.role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .session
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    fn access_token(&self) -> Option<String> {
        self.inner
            .session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    // ─── Login / logout ──────────────────────────────────────────────────────

    /// Log in with email and password.
    ///
    /// On success the full session (access + refresh token, role) is stored
    /// and a proactive refresh is scheduled. On failure the session is left
    /// unset and the error is surfaced as a notification as well as returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let payload = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        match self.exchange_credentials(&payload).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user_id, "Login successful");
                self.install_session(session)?;
                self.inner.notifier.success("Logged in successfully");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.inner.notifier.error(&format!("Login failed: {}", e));
                Err(e)
            }
        }
    }

    /// Create an account. Does not log in; callers follow up with `login`.
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        let payload = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let response = self
            .inner
            .http
            .post(self.url("/register"))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_response(status.as_u16(), &body);
            self.inner
                .notifier
                .error(&format!("Registration failed: {}", err));
            return Err(err);
        }

        self.inner.notifier.success("Account created successfully");
        Ok(())
    }

    /// Clear the session in memory and on disk, and cancel the pending
    /// proactive-refresh timer. Always succeeds.
    pub fn logout(&self, notify: bool) {
        self.cancel_refresh_timer();
        *self.inner.session.write().expect("session lock poisoned") = None;
        self.inner.store.remove(SESSION_KEY);
        tracing::info!("Session cleared");
        if notify {
            self.inner.notifier.success("Logged out");
        }
    }

    // ─── Authenticated requests ──────────────────────────────────────────────

    /// Build a request against the API base URL. Send it with `auth_fetch`.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.inner.http.request(method, self.url(path))
    }

    /// Send a request with the current credentials.
    ///
    /// A token already past its refresh margin is refreshed before the
    /// request goes out. A 401 response triggers at most one refresh-and-
    /// retry with the new token; a second 401 is returned to the caller.
    pub async fn auth_fetch(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let stale_token = {
            let guard = self.inner.session.read().expect("session lock poisoned");
            guard
                .as_ref()
                .filter(|s| s.is_stale(Utc::now(), self.inner.skew_secs))
                .map(|s| s.access_token.clone())
        };
        if let Some(seen) = stale_token {
            // A failed refresh has already logged the session out; the
            // request still goes out and the server's verdict is returned.
            if let Err(e) = self.refresh_if_current(&seen).await {
                tracing::warn!(error = %e, "Pre-request token refresh failed");
            }
        }

        // Clone before attaching auth so a retry can carry the new token.
        let retry = request.try_clone();
        let used_token = self.access_token();
        let request = match &used_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let (Some(retry), Some(seen)) = (retry, used_token) else {
            return Ok(response);
        };
        if self.refresh_if_current(&seen).await.is_err() {
            return Ok(response);
        }
        let Some(token) = self.access_token() else {
            return Ok(response);
        };
        tracing::debug!("Retrying request with refreshed token after 401");
        Ok(retry.bearer_auth(token).send().await?)
    }

    /// GET a JSON resource through `auth_fetch`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.auth_fetch(self.request(Method::GET, path)).await?;
        check_json(response).await
    }

    /// GET a JSON resource with query parameters.
    pub async fn get_json_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let response = self
            .auth_fetch(self.request(Method::GET, path).query(query))
            .await?;
        check_json(response).await
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .auth_fetch(self.request(Method::POST, path).json(body))
            .await?;
        check_json(response).await
    }

    /// PATCH a JSON body and parse the JSON response.
    pub async fn patch_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .auth_fetch(self.request(Method::PATCH, path).json(body))
            .await?;
        check_json(response).await
    }

    /// DELETE a resource, ignoring the response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.auth_fetch(self.request(Method::DELETE, path)).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_response(status.as_u16(), &body))
    }

    // ─── Token refresh ───────────────────────────────────────────────────────

    /// Exchange the refresh token for a new access token.
    ///
    /// On success the persisted session is updated in place and the
    /// proactive timer is re-armed. On failure the session is logged out and
    /// a "session expired" notification is raised; this is the single path
    /// through which refresh failure reaches the user.
    pub async fn refresh_access_token(&self) -> Result<()> {
        let seen = self.access_token().ok_or(ClientError::Unauthorized)?;
        self.refresh_if_current(&seen).await
    }

    /// Refresh only if the access token is still the one the caller saw.
    ///
    /// Concurrent triggers (proactive timer firing next to a 401 retry) all
    /// serialize on the refresh lock; whoever arrives second finds the token
    /// already replaced and returns without a second exchange.
    async fn refresh_if_current(&self, seen_token: &str) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;

        let refresh_token = {
            let guard = self.inner.session.read().expect("session lock poisoned");
            match guard.as_ref() {
                Some(s) if s.access_token != seen_token => return Ok(()),
                Some(s) => s.refresh_token.clone(),
                None => return Err(ClientError::Unauthorized),
            }
        };

        match self.exchange_refresh_token(&refresh_token).await {
            Ok((access_token, expires_at)) => {
                let updated = {
                    let mut guard =
                        self.inner.session.write().expect("session lock poisoned");
                    let Some(session) = guard.as_mut() else {
                        // Logged out while the exchange was in flight.
                        return Err(ClientError::Unauthorized);
                    };
                    session.access_token = access_token;
                    session.expires_at = expires_at;
                    session.clone()
                };
                self.inner.store.put(SESSION_KEY, &updated)?;
                self.schedule_refresh(updated.expires_at);
                tracing::info!("Access token refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, logging out");
                self.logout(false);
                self.inner
                    .notifier
                    .error("Session expired, please log in again");
                Err(e)
            }
        }
    }

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<(String, DateTime<Utc>)> {
        let response = self
            .inner
            .http
            .post(self.url("/refresh"))
            .bearer_auth(refresh_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        let body: TokenRefreshResponse = response.json().await?;
        let claims = decode_claims(&body.access_token)?;
        let expires_at = expiry_timestamp(claims.exp)?;
        Ok((body.access_token, expires_at))
    }

    async fn exchange_credentials(&self, payload: &CredentialsRequest) -> Result<Session> {
        let response = self
            .inner
            .http
            .post(self.url("/login"))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        let body: LoginResponse = response.json().await?;
        let claims = decode_claims(&body.access_token)?;
        let expires_at = expiry_timestamp(claims.exp)?;

        Ok(Session {
            user_id: claims.sub,
            email: payload.email.clone(),
            role: body.role,
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            expires_at,
        })
    }

    fn install_session(&self, session: Session) -> Result<()> {
        self.inner.store.put(SESSION_KEY, &session)?;
        let expires_at = session.expires_at;
        *self.inner.session.write().expect("session lock poisoned") = Some(session);
        self.schedule_refresh(expires_at);
        Ok(())
    }

    // ─── Proactive refresh timer ─────────────────────────────────────────────

    /// Arm a one-shot refresh at `expires_at - skew`, replacing any previous
    /// timer. Inside the skew window no timer is armed; the next `auth_fetch`
    /// refreshes synchronously instead.
    fn schedule_refresh(&self, expires_at: DateTime<Utc>) {
        self.cancel_refresh_timer();

        let delay = expires_at - Utc::now() - chrono::Duration::seconds(self.inner.skew_secs);
        let Ok(delay) = delay.to_std() else {
            tracing::debug!("Token expiry within refresh skew, no proactive timer");
            return;
        };
        // Scheduling needs a runtime; without one the synchronous path in
        // auth_fetch covers the refresh.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No async runtime, no proactive timer");
            return;
        };

        let weak = Arc::downgrade(&self.inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else { return };
            let manager = SessionManager { inner };
            // Drop our own handle before refreshing so the reschedule inside
            // refresh does not abort the task performing it.
            manager
                .inner
                .refresh_timer
                .lock()
                .expect("refresh timer lock poisoned")
                .take();
            tracing::debug!("Proactive refresh timer fired");
            if let Err(e) = manager.refresh_access_token().await {
                tracing::warn!(error = %e, "Proactive token refresh failed");
            }
        });

        *self
            .inner
            .refresh_timer
            .lock()
            .expect("refresh timer lock poisoned") = Some(task);
    }

    fn cancel_refresh_timer(&self) {
        if let Some(task) = self
            .inner
            .refresh_timer
            .lock()
            .expect("refresh timer lock poisoned")
            .take()
        {
            task.abort();
        }
    }
}

/// Decode the claims of an access token without verifying its signature.
///
/// The client has no signing key; it only needs the subject and expiry the
/// server encoded. The server remains the authority on token validity.
fn decode_claims(token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|_| ClientError::InvalidToken)?;
    Ok(data.claims)
}

fn expiry_timestamp(exp: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| ClientError::Internal(anyhow::anyhow!("token expiry {} out of range", exp)))
}

/// Check response status and parse the JSON body.
async fn check_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_response(status.as_u16(), &body));
    }
    Ok(response.json().await?)
}
