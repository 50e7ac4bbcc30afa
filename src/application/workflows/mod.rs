//! Wish workflows.
//!
//! Each workflow has a pure core (query building, record assembly, report
//! shaping) and a thin async shell that calls the repository.

pub mod create_wish;
pub mod list_wishes;
pub mod release_wishes;

pub use create_wish::{build_wish, create_wish};
pub use list_wishes::{ListWishesRequest, WishPage, build_page_query, list_wishes};
pub use release_wishes::{ReleaseReport, release_all_wishes};
