// SPDX-License-Identifier: MIT

//! In-process storefront API for integration tests.
//!
//! Serves the endpoints the SDK talks to on a loopback port, with request
//! counters and failure knobs so tests can assert exactly how many refresh
//! exchanges and retries happened.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

const JWT_SECRET: &[u8] = b"mock-api-secret";
pub const REFRESH_TOKEN: &str = "mock-refresh-token";
pub const USER_ID: &str = "user-1";
pub const PASSWORD: &str = "hunter2";

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Shared state with counters and failure knobs.
pub struct ApiState {
    /// Lifetime (seconds from now) of minted access tokens; may be negative.
    pub access_token_ttl: AtomicI64,
    /// Number of `/refresh` exchanges served.
    pub refresh_calls: AtomicUsize,
    /// Number of `/protected` requests served.
    pub protected_calls: AtomicUsize,
    /// Serve this many unconditional 401s from `/protected` before
    /// validating tokens normally.
    pub force_unauthorized: AtomicUsize,
    /// When set, `/refresh` rejects the exchange.
    pub fail_refresh: AtomicUsize,
}

pub struct MockApi {
    pub base_url: String,
    pub state: Arc<ApiState>,
}

impl MockApi {
    /// Spawn the mock API on an ephemeral loopback port.
    pub async fn spawn() -> Self {
        let state = Arc::new(ApiState {
            access_token_ttl: AtomicI64::new(900),
            refresh_calls: AtomicUsize::new(0),
            protected_calls: AtomicUsize::new(0),
            force_unauthorized: AtomicUsize::new(0),
            fail_refresh: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/login", post(login))
            .route("/register", post(register))
            .route("/refresh", post(refresh))
            .route("/protected", get(protected))
            .route("/spareparts", get(list_parts))
            .route("/spareparts/{id}", get(get_part))
            .route("/checkout", post(checkout))
            .route("/orders", get(list_orders).post(place_order))
            .route("/orders/{id}", axum::routing::patch(update_order))
            .route("/admin/orders", get(admin_orders))
            .route("/admin/orders/{id}", axum::routing::patch(admin_update_order))
            .route("/reviews/{part_id}", post(post_review))
            .route(
                "/reviews/edit/{review_id}",
                axum::routing::patch(edit_review).delete(delete_review),
            )
            .route(
                "/reviews/{review_id}/react",
                post(react).delete(remove_reaction),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock api");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock api");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn protected_calls(&self) -> usize {
        self.state.protected_calls.load(Ordering::SeqCst)
    }

    /// Mint tokens that are already expired / inside any refresh skew.
    pub fn set_access_token_ttl(&self, secs: i64) {
        self.state.access_token_ttl.store(secs, Ordering::SeqCst);
    }

    pub fn force_unauthorized(&self, count: usize) {
        self.state.force_unauthorized.store(count, Ordering::SeqCst);
    }

    pub fn fail_refreshes(&self) {
        self.state.fail_refresh.store(1, Ordering::SeqCst);
    }
}

fn mint_access_token(ttl_secs: i64) -> String {
    let claims = Claims {
        sub: USER_ID.to_string(),
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .expect("mint token")
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn token_is_valid(token: &str) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(JWT_SECRET), &validation)
        .is_ok()
}

#[derive(Deserialize)]
struct CredentialsBody {
    email: String,
    password: String,
}

async fn login(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CredentialsBody>,
) -> (StatusCode, Json<serde_json::Value>) {
    if body.password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        );
    }
    let ttl = state.access_token_ttl.load(Ordering::SeqCst);
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "access_token": mint_access_token(ttl),
            "refresh_token": REFRESH_TOKEN,
            "role": "buyer",
        })),
    )
}

async fn register(Json(body): Json<CredentialsBody>) -> (StatusCode, Json<serde_json::Value>) {
    if body.email == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "Email already exists"})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({"status": "success", "message": "Account created successfully"})),
    )
}

async fn refresh(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<serde_json::Value>) {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    if bearer(&headers) != Some(REFRESH_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid refresh token"})),
        );
    }
    if state.fail_refresh.load(Ordering::SeqCst) > 0 {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Token has been revoked"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"access_token": mint_access_token(900)})),
    )
}

async fn protected(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<serde_json::Value>) {
    state.protected_calls.fetch_add(1, Ordering::SeqCst);

    let forced = state.force_unauthorized.load(Ordering::SeqCst);
    if forced > 0 {
        state.force_unauthorized.store(forced - 1, Ordering::SeqCst);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Token expired"})),
        );
    }

    match bearer(&headers) {
        Some(token) if token_is_valid(token) => (StatusCode::OK, Json(json!({"ok": true}))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing or invalid token"})),
        ),
    }
}

async fn list_parts() -> Json<serde_json::Value> {
    Json(json!({
        "items": [
            {
                "id": "p1",
                "category": "Battery",
                "vehicle_type": "Sedan",
                "brand": "Bosch",
                "colour": null,
                "buying_price": 1000.0,
                "marked_price": 1200.0,
                "discount_amount": 200.0,
                "discount_percentage": 16.7,
                "image": null,
                "description": "12V sedan battery",
                "average_rating": 4.5,
                "total_reviews": 2,
                "total_likes": 3,
                "total_dislikes": 0
            }
        ],
        "total": 1,
        "page": 1,
        "pages": 1
    }))
}

fn part_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "category": "Battery",
        "vehicle_type": "Sedan",
        "brand": "Bosch",
        "colour": null,
        "buying_price": 1000.0,
        "marked_price": 1200.0,
        "discount_amount": 200.0,
        "discount_percentage": 16.7,
        "image": null,
        "description": "12V sedan battery",
        "average_rating": 4.5,
        "total_reviews": 2,
        "total_likes": 3,
        "total_dislikes": 0
    })
}

fn unauthorized() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Missing or invalid token"})),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    matches!(bearer(headers), Some(token) if token_is_valid(token))
}

async fn get_part(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Json<serde_json::Value> {
    let mut part = part_json(&id);
    part["reviews"] = json!([
        {
            "id": "r1",
            "user_id": "user-2",
            "sparepart_id": id,
            "comment": "Starts every time",
            "rating": 5,
            "created_at": "2026-08-01T10:00:00"
        }
    ]);
    Json(part)
}

async fn place_order(
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let items = body["items"].as_array().map(Vec::len).unwrap_or(0);
    if items == 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No items provided"})),
        );
    }
    if body["street"].as_str().unwrap_or("").is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing address fields (street, city, country required)"})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "o1",
            "user_id": USER_ID,
            "status": "pending",
            "paid": true,
            "total_price": 2000.0,
            "created_at": "2026-08-02T09:30:00"
        })),
    )
}

async fn list_orders(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "orders": [
                {
                    "id": "o1",
                    "status": "pending",
                    "paid": true,
                    "total_items": 2,
                    "address": "Moi Avenue 12, Nairobi, KE",
                    "created_at": "2026-08-02T09:30:00"
                }
            ]
        })),
    )
}

async fn update_order(
    headers: HeaderMap,
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let status = body["status"].as_str().unwrap_or("");
    if status != "cancelled" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid status change"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"message": format!("Order {} status updated to {}", id, status)})),
    )
}

async fn admin_orders(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!([
            {
                "id": "o1",
                "user_id": USER_ID,
                "status": "pending",
                "paid": true,
                "total_price": 2000.0,
                "created_at": "2026-08-02T09:30:00"
            }
        ])),
    )
}

async fn admin_update_order(
    headers: HeaderMap,
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let status = body["status"].as_str().unwrap_or("");
    if !matches!(status, "pending" | "cancelled" | "delivered") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid status"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"message": format!("Order {} status updated to {}", id, status)})),
    )
}

async fn post_review(
    headers: HeaderMap,
    axum::extract::Path(part_id): axum::extract::Path<String>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "r2",
            "user_id": USER_ID,
            "sparepart_id": part_id,
            "comment": body["comment"],
            "rating": body["rating"],
            "created_at": "2026-08-02T10:00:00"
        })),
    )
}

async fn edit_review(
    headers: HeaderMap,
    axum::extract::Path(review_id): axum::extract::Path<String>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": review_id,
            "user_id": USER_ID,
            "sparepart_id": "p1",
            "comment": body["comment"],
            "rating": body["rating"],
            "created_at": "2026-08-02T10:00:00"
        })),
    )
}

async fn delete_review(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({"message": "Review deleted"})))
}

async fn react(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({"message": "Reaction updated"})))
}

async fn remove_reaction(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({"message": "Reaction removed"})))
}

async fn checkout(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    match bearer(&headers) {
        Some(token) if token_is_valid(token) => (
            StatusCode::OK,
            Json(json!({"checkout_url": "https://pay.example.com/session/abc123"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing or invalid token"})),
        ),
    }
}
