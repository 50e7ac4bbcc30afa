//! In-memory repository implementation.
//!
//! Development and test stub for the wish store. It honours the same
//! contract as the `PostgreSQL` store, including feed ordering and the
//! no-op behaviour of a redundant release.
//!
//! # Features
//!
//! - Thread-safe with `Arc<RwLock<...>>`
//! - All operations return boxed futures for effect encapsulation

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::domain::{UserId, Wish, WishId, WishStatus};
use crate::infrastructure::{
    ActivePageQuery, Page, RepositoryError, RepositoryFuture, WishRepository,
};

/// In-memory implementation of `WishRepository`.
///
/// # Example
///
/// ```ignore
/// use wish_wall::infrastructure::InMemoryWishRepository;
///
/// let repository = InMemoryWishRepository::new();
/// repository.save(&wish).await?;
/// let found = repository.find_by_id(&wish.wish_id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryWishRepository {
    wishes: Arc<RwLock<HashMap<WishId, Wish>>>,
}

impl InMemoryWishRepository {
    /// Creates a new empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `wishes`.
    ///
    /// Later entries overwrite earlier ones with the same id.
    #[must_use]
    pub fn with_wishes(wishes: impl IntoIterator<Item = Wish>) -> Self {
        let map = wishes
            .into_iter()
            .map(|wish| (wish.wish_id.clone(), wish))
            .collect();
        Self {
            wishes: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns the number of stored wishes regardless of status.
    pub async fn len(&self) -> usize {
        self.wishes.read().await.len()
    }

    /// Returns true if nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.wishes.read().await.is_empty()
    }
}

/// Sorts wishes newest first, breaking ties by id descending.
fn sort_feed_order(wishes: &mut [Wish]) {
    wishes.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| right.wish_id.cmp(&left.wish_id))
    });
}

#[allow(clippy::significant_drop_tightening)]
impl WishRepository for InMemoryWishRepository {
    fn save(&self, wish: &Wish) -> RepositoryFuture<()> {
        let wishes = Arc::clone(&self.wishes);
        let wish = wish.clone();
        async move {
            let mut guard = wishes.write().await;
            if guard.contains_key(&wish.wish_id) {
                return Err(RepositoryError::AlreadyExists(wish.wish_id.to_string()));
            }
            guard.insert(wish.wish_id.clone(), wish);
            Ok(())
        }
        .boxed()
    }

    fn find_by_id(&self, id: &WishId) -> RepositoryFuture<Option<Wish>> {
        let wishes = Arc::clone(&self.wishes);
        let id = id.clone();
        async move {
            let guard = wishes.read().await;
            Ok(guard.get(&id).cloned())
        }
        .boxed()
    }

    fn list_active(&self, query: ActivePageQuery) -> RepositoryFuture<Page<Wish>> {
        let wishes = Arc::clone(&self.wishes);
        async move {
            let mut candidates: Vec<Wish> = {
                let guard = wishes.read().await;
                guard
                    .values()
                    .filter(|wish| wish.is_active())
                    .filter(|wish| {
                        query
                            .exclusive_start_key
                            .as_ref()
                            .is_none_or(|key| key.precedes(wish))
                    })
                    .cloned()
                    .collect()
            };

            sort_feed_order(&mut candidates);
            candidates.truncate(query.limit as usize + 1);

            Ok(Page::from_overfetch(candidates, query.limit))
        }
        .boxed()
    }

    fn count_active_by_user(&self, user_id: &UserId) -> RepositoryFuture<u64> {
        let wishes = Arc::clone(&self.wishes);
        let user_id = user_id.clone();
        async move {
            let guard = wishes.read().await;
            let count = guard
                .values()
                .filter(|wish| wish.user_id == user_id && wish.is_active())
                .count();
            Ok(count as u64)
        }
        .boxed()
    }

    fn scan_active(&self) -> RepositoryFuture<Vec<Wish>> {
        let wishes = Arc::clone(&self.wishes);
        async move {
            let guard = wishes.read().await;
            Ok(guard.values().filter(|wish| wish.is_active()).cloned().collect())
        }
        .boxed()
    }

    fn mark_released(&self, id: &WishId) -> RepositoryFuture<()> {
        let wishes = Arc::clone(&self.wishes);
        let id = id.clone();
        async move {
            let mut guard = wishes.write().await;
            match guard.get_mut(&id) {
                Some(wish) => {
                    wish.status = WishStatus::Released;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound(id.to_string())),
            }
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
