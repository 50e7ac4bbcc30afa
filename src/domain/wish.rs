//! Wish domain model.
//!
//! A wish is the only persisted entity of the wall. It is created once,
//! flipped from `Active` to `Released` at most once, and never deleted.

use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a wish.
///
/// Opaque to clients. Generated identifiers have the form
/// `wish_<32 hex digits>` built from a time-ordered UUID (v7).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishId(String);

impl WishId {
    /// Wraps an existing identifier without validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh identifier.
    ///
    /// **Note**: This is an impure function (side effect: time + random).
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("wish_{}", Uuid::now_v7().simple()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WishId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Client-supplied identifier grouping wishes for quota purposes.
///
/// Not authenticated; the wall trusts whatever the browser sends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Creation time in milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a `Timestamp` from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the epoch milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the current time.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Self-declared gender shown on the wish card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Secret,
}

impl Gender {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Secret => "secret",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "secret" => Ok(Self::Secret),
            _ => Err(UnknownVariant {
                kind: "gender",
                value: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Lifecycle state of a wish.
///
/// The only legal transition is `Active -> Released`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WishStatus {
    /// Visible on the wall and counted against the user's quota.
    #[default]
    Active,
    /// Released at the deadline; no longer listed or counted.
    Released,
}

impl WishStatus {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Released => "released",
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for WishStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "released" => Ok(Self::Released),
            _ => Err(UnknownVariant {
                kind: "status",
                value: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for WishStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A string did not name any variant of a domain enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// =============================================================================
// Wish
// =============================================================================

/// A wish pinned to the wall.
///
/// Text fields are stored already trimmed; `contact` is empty when the
/// visitor left it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub wish_id: WishId,
    pub user_id: UserId,
    pub nickname: String,
    pub content: String,
    pub gender: Gender,
    pub contact: String,
    pub created_at: Timestamp,
    pub status: WishStatus,
}

impl Wish {
    /// Returns a copy of this wish in the released state.
    ///
    /// Releasing an already released wish returns it unchanged.
    #[must_use]
    pub fn released(self) -> Self {
        Self {
            status: WishStatus::Released,
            ..self
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

// =============================================================================
// Tests
// =============================================================================
