//! Repository trait for wishes.
//!
//! This module defines the storage collaborator the workflows talk to.
//! Every method returns a boxed, `'static` future so the trait stays
//! object-safe and implementations can be swapped at runtime behind
//! `Arc<dyn WishRepository>`.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Timestamp, UserId, Wish, WishId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Entity was not found.
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Primary key already taken.
    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored row could not be mapped back into a wish.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Future returned by every repository operation.
pub type RepositoryFuture<T> = BoxFuture<'static, Result<T, RepositoryError>>;

// =============================================================================
// Pagination
// =============================================================================

/// Resume point inside the `(status, created_at)` listing.
///
/// This is the store's own key shape. It only leaves the process wrapped in
/// an opaque page token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageKey {
    pub wish_id: WishId,
    pub created_at: Timestamp,
}

impl PageKey {
    #[must_use]
    pub const fn new(wish_id: WishId, created_at: Timestamp) -> Self {
        Self {
            wish_id,
            created_at,
        }
    }

    /// Returns the key of the given wish.
    #[must_use]
    pub fn of(wish: &Wish) -> Self {
        Self::new(wish.wish_id.clone(), wish.created_at)
    }

    /// Returns true if `wish` sorts strictly after this key in feed order
    /// (`created_at` descending, then `wish_id` descending).
    #[must_use]
    pub fn precedes(&self, wish: &Wish) -> bool {
        (wish.created_at, &wish.wish_id) < (self.created_at, &self.wish_id)
    }
}

/// Query for one page of active wishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePageQuery {
    /// Maximum number of wishes to return. Always at least 1.
    pub limit: u32,
    /// Continue strictly after this key.
    pub exclusive_start_key: Option<PageKey>,
}

impl ActivePageQuery {
    /// Creates a query for the first page. A `limit` of 0 is raised to 1.
    #[must_use]
    pub const fn first(limit: u32) -> Self {
        Self {
            limit: if limit == 0 { 1 } else { limit },
            exclusive_start_key: None,
        }
    }

    /// Continues after `key`.
    #[must_use]
    pub fn after(self, key: PageKey) -> Self {
        Self {
            exclusive_start_key: Some(key),
            ..self
        }
    }
}

/// One page of wishes in feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Key of the last returned item, present only when more items follow.
    pub last_evaluated_key: Option<PageKey>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, last_evaluated_key: Option<PageKey>) -> Self {
        Self {
            items,
            last_evaluated_key,
        }
    }
}

impl Page<Wish> {
    /// Builds a page from feed-ordered candidates fetched with `limit + 1`.
    ///
    /// The extra candidate only signals that another page exists; it is
    /// dropped and the key of the last kept item becomes the resume point.
    #[must_use]
    pub fn from_overfetch(mut candidates: Vec<Wish>, limit: u32) -> Self {
        let limit = limit as usize;
        if candidates.len() > limit {
            candidates.truncate(limit);
            let last_evaluated_key = candidates.last().map(PageKey::of);
            Self::new(candidates, last_evaluated_key)
        } else {
            Self::new(candidates, None)
        }
    }
}

// =============================================================================
// Wish Repository
// =============================================================================

/// Storage collaborator for wishes.
///
/// Implementations must tolerate a redundant `mark_released` on a record
/// that is already released. Secondary-index reads (`list_active`,
/// `count_active_by_user`) may lag writes.
pub trait WishRepository: Send + Sync {
    /// Inserts a new wish.
    ///
    /// Fails with `RepositoryError::AlreadyExists` if the id is taken.
    fn save(&self, wish: &Wish) -> RepositoryFuture<()>;

    /// Finds a wish by its primary key.
    fn find_by_id(&self, id: &WishId) -> RepositoryFuture<Option<Wish>>;

    /// Lists active wishes newest first.
    fn list_active(&self, query: ActivePageQuery) -> RepositoryFuture<Page<Wish>>;

    /// Counts the active wishes owned by `user_id`.
    fn count_active_by_user(&self, user_id: &UserId) -> RepositoryFuture<u64>;

    /// Returns every active wish, in no particular order.
    fn scan_active(&self) -> RepositoryFuture<Vec<Wish>>;

    /// Sets the wish's status to released.
    ///
    /// Returns `RepositoryError::NotFound` if no such wish exists.
    fn mark_released(&self, id: &WishId) -> RepositoryFuture<()>;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, WishStatus};
    use rstest::rstest;

    fn wish(id: &str, created_at: i64) -> Wish {
        Wish {
            wish_id: WishId::new(id),
            user_id: UserId::new("user"),
            nickname: "nick".to_string(),
            content: "content".to_string(),
            gender: Gender::Male,
            contact: String::new(),
            created_at: Timestamp::from_millis(created_at),
            status: WishStatus::Active,
        }
    }

    #[rstest]
    fn test_page_key_precedes_older_wish() {
        let key = PageKey::of(&wish("b", 200));
        assert!(key.precedes(&wish("z", 100)));
        assert!(!key.precedes(&wish("a", 300)));
    }

    #[rstest]
    fn test_page_key_breaks_ties_by_id_descending() {
        let key = PageKey::of(&wish("b", 200));
        assert!(key.precedes(&wish("a", 200)));
        assert!(!key.precedes(&wish("b", 200)));
        assert!(!key.precedes(&wish("c", 200)));
    }

    #[rstest]
    fn test_page_key_serializes_camel_case() {
        let key = PageKey::new(WishId::new("wish_1"), Timestamp::from_millis(42));
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["wishId"], "wish_1");
        assert_eq!(json["createdAt"], 42);
    }

    #[rstest]
    fn test_from_overfetch_with_extra_item_sets_key() {
        let candidates = vec![wish("c", 3), wish("b", 2), wish("a", 1)];
        let page = Page::from_overfetch(candidates, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.last_evaluated_key,
            Some(PageKey::new(WishId::new("b"), Timestamp::from_millis(2)))
        );
        assert!(page.last_evaluated_key.is_some());
    }

    #[rstest]
    fn test_from_overfetch_exact_fit_has_no_key() {
        let candidates = vec![wish("b", 2), wish("a", 1)];
        let page = Page::from_overfetch(candidates, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.last_evaluated_key.is_none());
    }

    #[rstest]
    fn test_from_overfetch_empty() {
        let page = Page::from_overfetch(Vec::new(), 5);
        assert!(page.items.is_empty());
        assert!(page.last_evaluated_key.is_none());
    }

    #[rstest]
    fn test_first_raises_zero_limit() {
        assert_eq!(ActivePageQuery::first(0).limit, 1);
    }

    #[rstest]
    fn test_active_page_query_after() {
        let key = PageKey::new(WishId::new("x"), Timestamp::from_millis(1));
        let query = ActivePageQuery::first(10).after(key.clone());
        assert_eq!(query.limit, 10);
        assert_eq!(query.exclusive_start_key, Some(key));
    }

    #[rstest]
    fn test_repository_error_display() {
        let error = RepositoryError::NotFound("wish_1".to_string());
        assert_eq!(error.to_string(), "Entity not found: wish_1");

        let error = RepositoryError::DatabaseError("connection refused".to_string());
        assert_eq!(error.to_string(), "Database error: connection refused");
    }
}
