//! HTTP surface for the film catalog
//!
//! [`FilmService`] holds the per-operation logic and is independent of axum
//! extractors; [`router`] adapts it to routes:
//!
//! | Method | Path          | Operation                     |
//! |--------|---------------|-------------------------------|
//! | GET    | `/films`      | list, filtered by criteria    |
//! | POST   | `/films`      | create                        |
//! | GET    | `/films/{id}` | get                           |
//! | PUT    | `/films/{id}` | update                        |
//! | DELETE | `/films/{id}` | delete                        |
//! | GET    | `/search`     | typed or criteria search      |
//!
//! Every success response is rendered in the negotiated format. Errors are
//! always JSON [`ApiErrorResponse`] bodies.

mod error;
mod routes;
mod service;

pub use error::{ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation};
pub use routes::router;
pub use service::{normalize_base_path, FilmRequest, FilmService, DELETED_MESSAGE};
