//! Input validation for the wish workflows.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. required fields present (`userId`, `nickname`, `content`, `gender`)
//! 2. trimmed lengths within bounds (`nickname`, `content`, `contact`)
//! 3. `gender` is a known value
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use crate::domain::{Gender, UserId};

use super::{WishError, WishField};

/// Maximum nickname length in characters.
pub const MAX_NICKNAME_LENGTH: usize = 20;
/// Maximum wish content length in characters.
pub const MAX_CONTENT_LENGTH: usize = 200;
/// Maximum contact length in characters.
pub const MAX_CONTACT_LENGTH: usize = 100;

/// Raw create request as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateWishInput {
    pub user_id: Option<String>,
    pub nickname: Option<String>,
    pub content: Option<String>,
    pub gender: Option<String>,
    pub contact: Option<String>,
}

/// A create request that passed validation, with text fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWish {
    pub user_id: UserId,
    pub nickname: String,
    pub content: String,
    pub gender: Gender,
    /// Empty when the caller left it out.
    pub contact: String,
}

/// Validates a create request.
///
/// # Errors
///
/// - `WishError::MissingField` for the first absent or blank required field
/// - `WishError::FieldTooLong` for the first field over its bound
/// - `WishError::InvalidArgument` for an unknown gender
pub fn validate_create_request(input: &CreateWishInput) -> Result<ValidatedWish, WishError> {
    let user_id = require(input.user_id.as_deref(), WishField::UserId)?;
    let nickname = require(input.nickname.as_deref(), WishField::Nickname)?;
    let content = require(input.content.as_deref(), WishField::Content)?;
    let gender = require(input.gender.as_deref(), WishField::Gender)?;
    let contact = input.contact.as_deref().map_or("", str::trim);

    check_length(nickname, WishField::Nickname, MAX_NICKNAME_LENGTH)?;
    check_length(content, WishField::Content, MAX_CONTENT_LENGTH)?;
    check_length(contact, WishField::Contact, MAX_CONTACT_LENGTH)?;

    let gender: Gender = gender
        .parse()
        .map_err(|error: crate::domain::UnknownVariant| {
            WishError::InvalidArgument(format!(
                "{error}; expected one of male, female, secret"
            ))
        })?;

    Ok(ValidatedWish {
        user_id: UserId::new(user_id),
        nickname: nickname.to_string(),
        content: content.to_string(),
        gender,
        contact: contact.to_string(),
    })
}

/// Returns the trimmed value, or `MissingField` if it is absent or blank.
fn require(value: Option<&str>, field: WishField) -> Result<&str, WishError> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(WishError::MissingField(field))
}

fn check_length(value: &str, field: WishField, max: usize) -> Result<(), WishError> {
    if value.chars().count() > max {
        return Err(WishError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Parses the `limit` query parameter.
///
/// Blank or absent means "use the default". Values too large for `u32`
/// saturate; the policy caps them anyway.
///
/// # Errors
///
/// Returns `WishError::InvalidArgument` if the value is not a
/// non-negative integer.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<u32>, WishError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    value
        .parse::<u64>()
        .map(|limit| Some(u32::try_from(limit).unwrap_or(u32::MAX)))
        .map_err(|_| {
            WishError::InvalidArgument(format!(
                "limit must be a positive integer, got '{value}'"
            ))
        })
}
