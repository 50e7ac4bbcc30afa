//! Wish creation workflow.
//!
//! # Workflow Steps
//!
//! 1. Validate and trim the request
//! 2. Count the user's active wishes and enforce the quota
//! 3. Assemble the record with a fresh id and the current time
//! 4. Persist it
//!
//! Steps 2 and 4 are separate store calls, so two concurrent requests from
//! one user can both pass the quota check.

use crate::application::{
    CreateWishInput, ValidatedWish, WishError, WishPolicy, validate_create_request,
};
use crate::domain::{Timestamp, Wish, WishId, WishStatus};
use crate::infrastructure::WishRepository;

/// Assembles a new active wish from validated input.
///
/// The id and timestamp are passed in so the function stays pure.
#[must_use]
pub fn build_wish(validated: ValidatedWish, wish_id: WishId, created_at: Timestamp) -> Wish {
    Wish {
        wish_id,
        user_id: validated.user_id,
        nickname: validated.nickname,
        content: validated.content,
        gender: validated.gender,
        contact: validated.contact,
        created_at,
        status: WishStatus::Active,
    }
}

/// Creates and stores a wish.
///
/// # Errors
///
/// - `WishError::MissingField`, `WishError::FieldTooLong`, or
///   `WishError::InvalidArgument` if validation fails
/// - `WishError::QuotaExceeded` if the user already holds the maximum
/// - `WishError::StoreUnavailable` if a repository call fails
pub async fn create_wish(
    repository: &dyn WishRepository,
    policy: &WishPolicy,
    input: &CreateWishInput,
) -> Result<Wish, WishError> {
    let validated = validate_create_request(input)?;

    let active_count = repository
        .count_active_by_user(&validated.user_id)
        .await
        .inspect_err(|error| {
            tracing::error!(%error, user_id = %validated.user_id, "Failed to count active wishes");
        })?;

    if !policy.allows_another(active_count) {
        tracing::info!(
            user_id = %validated.user_id,
            active_count,
            "Wish quota reached"
        );
        return Err(WishError::QuotaExceeded {
            limit: policy.max_active_per_user,
        });
    }

    let wish = build_wish(validated, WishId::generate(), Timestamp::now());

    repository.save(&wish).await.inspect_err(|error| {
        tracing::error!(%error, wish_id = %wish.wish_id, "Failed to save wish");
    })?;

    tracing::info!(wish_id = %wish.wish_id, user_id = %wish.user_id, "Wish created");
    Ok(wish)
}
