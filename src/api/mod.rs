//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use dto::{
    ApiResponse, CreateWishRequest, HealthResponse, ListWishesQuery, WishListData, WishResponse,
};
pub use error::ApiErrorResponse;
pub use handlers::{
    AppState, create_wish, health_check, list_wishes, method_not_allowed, preflight,
};
pub use routes::{cors_layer, create_router};
