//! Tunable limits of the wall.

use super::WishError;

/// Page-size and quota limits applied by the workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishPolicy {
    /// Page size when the caller gives no `limit`.
    pub default_page_size: u32,
    /// Larger requested page sizes are capped to this.
    pub max_page_size: u32,
    /// Active wishes a single user may hold.
    pub max_active_per_user: u64,
}

impl Default for WishPolicy {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 50,
            max_active_per_user: 3,
        }
    }
}

impl WishPolicy {
    /// Resolves the effective page size.
    ///
    /// # Errors
    ///
    /// Returns `WishError::InvalidArgument` if `requested` is 0.
    pub fn page_size(&self, requested: Option<u32>) -> Result<u32, WishError> {
        match requested {
            None => Ok(self.default_page_size.min(self.max_page_size)),
            Some(0) => Err(WishError::InvalidArgument(
                "limit must be a positive integer".to_string(),
            )),
            Some(limit) => Ok(limit.min(self.max_page_size)),
        }
    }

    /// Returns true if a user holding `active_count` wishes may add another.
    #[must_use]
    pub const fn allows_another(&self, active_count: u64) -> bool {
        active_count < self.max_active_per_user
    }
}
