//! Feed listing workflow.
//!
//! Returns active wishes newest first, one page at a time. The repository's
//! resume key is wrapped in a [`PageToken`] before it leaves this module.

use crate::application::{PageToken, WishError, WishPolicy};
use crate::domain::Wish;
use crate::infrastructure::{ActivePageQuery, RepositoryError, WishRepository};

/// Parameters of one feed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListWishesRequest {
    /// Requested page size; `None` uses the policy default.
    pub limit: Option<u32>,
    /// Token returned by the previous page; blank means the first page.
    pub next_token: Option<String>,
}

/// One page of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishPage {
    pub wishes: Vec<Wish>,
    /// Present only when more active wishes follow.
    pub next_token: Option<PageToken>,
    /// Number of wishes in this page.
    pub total: usize,
}

/// Turns a request into a repository query.
///
/// # Errors
///
/// Returns `WishError::InvalidArgument` for a zero limit or a malformed token.
pub fn build_page_query(
    policy: &WishPolicy,
    request: &ListWishesRequest,
) -> Result<ActivePageQuery, WishError> {
    let limit = policy.page_size(request.limit)?;
    let exclusive_start_key = request
        .next_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(PageToken::decode)
        .transpose()?;

    let query = ActivePageQuery::first(limit);
    Ok(match exclusive_start_key {
        Some(key) => query.after(key),
        None => query,
    })
}

/// Lists one page of active wishes.
///
/// # Errors
///
/// - `WishError::InvalidArgument` if the limit or token is malformed
/// - `WishError::StoreUnavailable` if the repository call fails
pub async fn list_wishes(
    repository: &dyn WishRepository,
    policy: &WishPolicy,
    request: &ListWishesRequest,
) -> Result<WishPage, WishError> {
    let query = build_page_query(policy, request)?;
    let limit = query.limit;

    let page = repository.list_active(query).await.inspect_err(|error| {
        tracing::error!(%error, "Failed to list active wishes");
    })?;

    let next_token = page
        .last_evaluated_key
        .as_ref()
        .map(PageToken::encode)
        .transpose()
        .map_err(|error| {
            tracing::error!(%error, "Failed to encode page token");
            WishError::StoreUnavailable(RepositoryError::SerializationError(error.to_string()))
        })?;
    let total = page.items.len();

    tracing::debug!(limit, total, has_next = next_token.is_some(), "Listed wishes");

    Ok(WishPage {
        wishes: page.items,
        next_token,
        total,
    })
}
