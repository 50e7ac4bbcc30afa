//! HTTP handlers for the wish wall.
//!
//! Handlers only translate between HTTP and the application workflows:
//! extract, call the workflow, wrap the result in the response envelope.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
};

use super::dto::{
    ApiResponse, CreateWishRequest, HealthResponse, ListWishesQuery, WishListData, WishResponse,
};
use super::error::ApiErrorResponse;
use crate::application::{self, ListWishesRequest, WishPolicy, parse_limit};
use crate::infrastructure::WishRepository;

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The repository is a trait object so the backend chosen by
/// `RepositoryFactory` at startup can be injected unchanged.
#[derive(Clone)]
pub struct AppState {
    pub wish_repository: Arc<dyn WishRepository>,
    pub policy: WishPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(wish_repository: Arc<dyn WishRepository>) -> Self {
        Self {
            wish_repository,
            policy: WishPolicy::default(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("wish_repository", &"Arc<dyn WishRepository>")
            .field("policy", &self.policy)
            .finish()
    }
}

// =============================================================================
// GET /wishes
// =============================================================================

/// Lists active wishes, newest first.
///
/// # Query Parameters
///
/// - `limit`: page size (default 20, capped at 50)
/// - `nextToken`: token from the previous page
///
/// # Errors
///
/// - 400 if the query string cannot be read, `limit` is not a positive
///   integer, or `nextToken` is malformed
/// - 500 if the store fails
pub async fn list_wishes(
    State(state): State<AppState>,
    query: Result<Query<ListWishesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<WishListData>>, ApiErrorResponse> {
    let Query(query) = query?;
    let request = ListWishesRequest {
        limit: parse_limit(query.limit.as_deref())?,
        next_token: query.next_token,
    };

    let page =
        application::list_wishes(state.wish_repository.as_ref(), &state.policy, &request).await?;

    Ok(Json(ApiResponse::ok(WishListData::from(page))))
}

// =============================================================================
// POST /wishes
// =============================================================================

/// Creates a wish.
///
/// The body is read as raw bytes so that an empty, non-UTF-8, or malformed
/// payload maps to the envelope's 400 instead of a plain-text rejection.
///
/// # Request Body
///
/// ```json
/// {
///   "userId": "u1",
///   "nickname": "Ann",
///   "content": "Health",
///   "gender": "male|female|secret",
///   "contact": "optional"
/// }
/// ```
///
/// # Errors
///
/// - 400 for an empty or malformed body, a missing or overlong field, or an
///   unknown gender
/// - 403 if the user already holds the maximum number of active wishes
/// - 500 if the store fails
pub async fn create_wish(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ApiResponse<WishResponse>>), ApiErrorResponse> {
    let body = body?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiErrorResponse::bad_request(
            "Invalid request body",
            "Request body is required",
        ));
    }

    let request: CreateWishRequest = serde_json::from_slice(&body)
        .map_err(|error| ApiErrorResponse::bad_request("Invalid request body", error.to_string()))?;

    let wish = application::create_wish(
        state.wish_repository.as_ref(),
        &state.policy,
        &request.into(),
    )
    .await?;

    let response = ApiResponse::ok(WishResponse::from(&wish)).with_message("Wish created");
    Ok((StatusCode::CREATED, Json(response)))
}

// =============================================================================
// Other methods on /wishes
// =============================================================================

/// Answers a plain `OPTIONS /wishes` with 200 and an empty body.
///
/// CORS preflights carrying `Access-Control-Request-Method` are answered by
/// the CORS layer before reaching this handler.
#[allow(clippy::unused_async)]
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Rejects any method `/wishes` does not route.
#[allow(clippy::unused_async)]
pub async fn method_not_allowed() -> ApiErrorResponse {
    ApiErrorResponse::method_not_allowed()
}

// =============================================================================
// GET /health
// =============================================================================

/// Health check endpoint.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
