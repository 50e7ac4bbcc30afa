//! Infrastructure module for external services.
//!
//! This module contains the wish stores, the runtime backend selection,
//! server configuration, and tracing setup.

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod logging;
pub mod postgres;
pub mod repository;

pub use config::ServerConfig;
pub use factory::{
    ConfigurationError, FactoryError, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryWishRepository;
pub use logging::init_tracing;
pub use postgres::PostgresWishRepository;
pub use repository::{
    ActivePageQuery, Page, PageKey, RepositoryError, RepositoryFuture, WishRepository,
};
