//! Data Transfer Objects for the wish API.
//!
//! Every `/wishes` response uses the [`ApiResponse`] envelope. Absent
//! members are omitted rather than sent as `null`.

use serde::{Deserialize, Serialize};

use crate::application::{CreateWishInput, WishPage};
use crate::domain::{Gender, Wish, WishStatus};

// =============================================================================
// Envelope
// =============================================================================

/// Response envelope: `{success, data?, error?, message?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Creates a failure envelope with no data.
    #[must_use]
    pub fn failure(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /wishes`.
///
/// Every member is optional here so that a missing field surfaces as a
/// validation error naming it rather than as a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl From<CreateWishRequest> for CreateWishInput {
    fn from(request: CreateWishRequest) -> Self {
        Self {
            user_id: request.user_id,
            nickname: request.nickname,
            content: request.content,
            gender: request.gender,
            contact: request.contact,
        }
    }
}

/// Query string of `GET /wishes`.
///
/// `limit` stays a string so a non-numeric value maps to the wall's own
/// `InvalidArgument` response. Query strings serde cannot read at all are
/// mapped through `From<QueryRejection> for ApiErrorResponse`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWishesQuery {
    pub limit: Option<String>,
    pub next_token: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Wire form of a wish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishResponse {
    pub wish_id: String,
    pub user_id: String,
    pub nickname: String,
    pub content: String,
    pub gender: Gender,
    pub contact: String,
    pub created_at: i64,
    pub status: WishStatus,
}

impl From<&Wish> for WishResponse {
    fn from(wish: &Wish) -> Self {
        Self {
            wish_id: wish.wish_id.to_string(),
            user_id: wish.user_id.to_string(),
            nickname: wish.nickname.clone(),
            content: wish.content.clone(),
            gender: wish.gender,
            contact: wish.contact.clone(),
            created_at: wish.created_at.as_millis(),
            status: wish.status,
        }
    }
}

/// `data` member of a `GET /wishes` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishListData {
    pub wishes: Vec<WishResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub total: usize,
}

impl From<WishPage> for WishListData {
    fn from(page: WishPage) -> Self {
        Self {
            wishes: page.wishes.iter().map(WishResponse::from).collect(),
            next_token: page.next_token.map(|token| token.into_string()),
            total: page.total,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
