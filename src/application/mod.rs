//! Application layer for the wish wall.
//!
//! - **Validation**: turns a raw create request into trimmed, bounded fields
//! - **Page token**: opaque continuation cursor for the feed
//! - **Workflows**: list, create, and release, each talking to a
//!   [`WishRepository`](crate::infrastructure::WishRepository)
//!
//! Workflows never generate ids or read the clock inside their pure parts;
//! the async entry points inject both before delegating.

pub mod errors;
pub mod page_token;
pub mod policy;
pub mod validation;
pub mod workflows;

pub use errors::{WishError, WishField};
pub use page_token::{PageToken, PageTokenError};
pub use policy::WishPolicy;
pub use validation::{CreateWishInput, ValidatedWish, parse_limit, validate_create_request};
pub use workflows::*;
