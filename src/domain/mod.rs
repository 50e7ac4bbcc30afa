//! Domain module for the wish wall.
//!
//! This module contains the wish entity and its value objects.

pub mod wish;

pub use wish::{Gender, Timestamp, UnknownVariant, UserId, Wish, WishId, WishStatus};
