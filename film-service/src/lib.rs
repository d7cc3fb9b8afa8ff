//! # film-service
//!
//! Film catalog REST API. Each request picks its representation (JSON, XML,
//! plain text or YAML) through a `format` query parameter or the `Accept`
//! header, and bodies are parsed according to `Content-Type`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use film_service::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = database::connect(&config.database).await?;
//!     let service = FilmService::new(
//!         SqliteFilmStore::new(pool),
//!         Arc::new(CodecRegistry::standard()),
//!         config.service.base_path.clone(),
//!     );
//!
//!     Server::new(config).serve(router(service)).await
//! }
//! ```

pub mod codec;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod model;
pub mod negotiate;
pub mod observability;
pub mod parser;
pub mod repository;
pub mod response;
pub mod search;
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{Codec, CodecError, CodecRegistry, DecodeOutcome, Format};
    pub use crate::config::Config;
    pub use crate::database;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{router, ApiError, ApiErrorKind, FilmRequest, FilmService};
    pub use crate::health::health;
    pub use crate::model::{Film, Payload};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{FilmStore, Pagination, RepositoryError, SqliteFilmStore};
    pub use crate::search::{Predicate, SearchCriteria, SearchType};
    pub use crate::server::Server;

    pub use axum::Router;
}
