//! Errors surfaced by the wish workflows.

use thiserror::Error;

use crate::infrastructure::RepositoryError;

use super::PageTokenError;

/// Input fields of a create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishField {
    UserId,
    Nickname,
    Content,
    Gender,
    Contact,
}

impl WishField {
    /// Returns the JSON member name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserId => "userId",
            Self::Nickname => "nickname",
            Self::Content => "content",
            Self::Gender => "gender",
            Self::Contact => "contact",
        }
    }

    /// Returns the capitalised label used at the start of messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UserId => "UserId",
            Self::Nickname => "Nickname",
            Self::Content => "Content",
            Self::Gender => "Gender",
            Self::Contact => "Contact",
        }
    }
}

impl std::fmt::Display for WishField {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Failure of a list, create, or release workflow.
///
/// Every variant except `StoreUnavailable` is detected before any write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WishError {
    /// A required field is absent, empty, or whitespace-only.
    #[error("Missing required field: {0}")]
    MissingField(WishField),

    /// A trimmed field is longer than its bound (counted in characters).
    #[error("{} must not exceed {max} characters", .field.label())]
    FieldTooLong { field: WishField, max: usize },

    /// The user already owns the maximum number of active wishes.
    #[error("Wish limit of {limit} reached")]
    QuotaExceeded { limit: u64 },

    /// An input was present but unusable (gender, limit, page token).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The store rejected or failed a call.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
}

impl From<PageTokenError> for WishError {
    fn from(error: PageTokenError) -> Self {
        Self::InvalidArgument(error.to_string())
    }
}
