//! Common test helpers for integration tests.
//!
//! # Note
//!
//! Each integration test file compiles as its own crate, so helpers used by
//! only some files would otherwise warn as dead code.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use wish_wall::api::{AppState, create_router};
use wish_wall::domain::{Gender, Timestamp, UserId, Wish, WishId, WishStatus};
use wish_wall::infrastructure::{
    ActivePageQuery, InMemoryWishRepository, Page, RepositoryError, RepositoryFuture,
    ServerConfig, WishRepository,
};

// =============================================================================
// Fixtures
// =============================================================================

/// Creates an active wish with fixed text fields.
pub fn wish(id: &str, user: &str, created_at: i64) -> Wish {
    Wish {
        wish_id: WishId::new(id),
        user_id: UserId::new(user),
        nickname: format!("nick-{id}"),
        content: format!("content-{id}"),
        gender: Gender::Secret,
        contact: String::new(),
        created_at: Timestamp::from_millis(created_at),
        status: WishStatus::Active,
    }
}

/// JSON body of a valid create request for `user`.
pub fn create_body(user: &str) -> String {
    serde_json::json!({
        "userId": user,
        "nickname": "Ann",
        "content": "Health",
        "gender": "secret",
    })
    .to_string()
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Creates a router over `repository` with the default policy and any origin.
pub fn create_test_router(repository: Arc<dyn WishRepository>) -> Router {
    create_router(AppState::new(repository), &ServerConfig::default())
}

/// Sends `request` and returns the status and the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

pub async fn post_json(router: &Router, body: impl Into<String>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/wishes")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(router, request).await
}

/// Follows `nextToken` from the first page until it runs out, returning
/// every listed wish id in order.
pub async fn collect_feed(router: &Router, limit: u32) -> Vec<String> {
    let mut ids = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let uri = match &token {
            Some(token) => format!("/wishes?limit={limit}&nextToken={token}"),
            None => format!("/wishes?limit={limit}"),
        };
        let (status, json) = get(router, &uri).await;
        assert_eq!(status, StatusCode::OK, "{json}");

        let data = &json["data"];
        for wish in data["wishes"].as_array().unwrap() {
            ids.push(wish["wishId"].as_str().unwrap().to_string());
        }

        match data["nextToken"].as_str() {
            Some(next) => token = Some(next.to_string()),
            None => return ids,
        }
    }
}

// =============================================================================
// Failing Repository
// =============================================================================

/// Wraps an in-memory store and fails selected operations.
#[derive(Debug, Clone, Default)]
pub struct FailingRepository {
    pub inner: InMemoryWishRepository,
    pub fail_scan: bool,
    pub fail_list: bool,
    pub fail_count: bool,
    /// `mark_released` fails for these ids without touching them.
    pub fail_release_for: HashSet<WishId>,
}

impl FailingRepository {
    pub fn new(inner: InMemoryWishRepository) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    fn unavailable<T: Send + 'static>(operation: &str) -> RepositoryFuture<T> {
        let error = RepositoryError::DatabaseError(format!("{operation} unavailable"));
        Box::pin(async move { Err::<T, _>(error) })
    }
}

impl WishRepository for FailingRepository {
    fn save(&self, wish: &Wish) -> RepositoryFuture<()> {
        self.inner.save(wish)
    }

    fn find_by_id(&self, id: &WishId) -> RepositoryFuture<Option<Wish>> {
        self.inner.find_by_id(id)
    }

    fn list_active(&self, query: ActivePageQuery) -> RepositoryFuture<Page<Wish>> {
        if self.fail_list {
            return Self::unavailable("list");
        }
        self.inner.list_active(query)
    }

    fn count_active_by_user(&self, user_id: &UserId) -> RepositoryFuture<u64> {
        if self.fail_count {
            return Self::unavailable("count");
        }
        self.inner.count_active_by_user(user_id)
    }

    fn scan_active(&self) -> RepositoryFuture<Vec<Wish>> {
        if self.fail_scan {
            return Self::unavailable("scan");
        }
        self.inner.scan_active()
    }

    fn mark_released(&self, id: &WishId) -> RepositoryFuture<()> {
        if self.fail_release_for.contains(id) {
            return Self::unavailable("update");
        }
        self.inner.mark_released(id)
    }
}
