//! # wish-wall
//!
//! Backend of a seasonal wish wall. Visitors pin short wishes to a shared
//! feed, each visitor may hold a few active wishes at once, and at the
//! deadline a one-shot job releases every wish.
//!
//! ## Layers
//!
//! - [`domain`]: the wish record and its value objects
//! - [`application`]: validation, paging tokens, and the list, create, and
//!   release workflows
//! - [`infrastructure`]: wish stores (in-memory and `PostgreSQL`), backend
//!   selection, configuration, and tracing setup
//! - [`api`]: axum handlers, response envelope, and routing
//!
//! ## Binaries
//!
//! - `wish-wall`: the HTTP API
//! - `wish-release`: runs the release workflow once and exits

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
