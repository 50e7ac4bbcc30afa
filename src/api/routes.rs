//! Route configuration for the wish wall API.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /wishes | `list_wishes` |
//! | POST | /wishes | `create_wish` |
//! | OPTIONS | /wishes | `preflight` |
//! | HEAD, any other | /wishes | `method_not_allowed` |
//! | GET | /health | `health_check` |

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_wish, health_check, list_wishes, method_not_allowed, preflight,
};
use crate::infrastructure::ServerConfig;

const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];
const ALLOWED_HEADERS: [HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];

/// Builds the CORS layer for the configured origin (`*` allows any origin).
///
/// An origin that is not a valid header value allows no cross-origin
/// requests at all.
#[must_use]
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allowed_origin = config.allowed_origin.as_str();
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(allowed_origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(error) => {
                tracing::warn!(%error, allowed_origin, "Ignoring invalid CORS origin");
                AllowOrigin::list([])
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
}

/// Creates the router with all routes, tracing, and CORS applied.
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(repository);
/// let router = create_router(state, &ServerConfig::default());
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/wishes",
            // `get` alone would also answer HEAD.
            get(list_wishes)
                .head(method_not_allowed)
                .post(create_wish)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}
