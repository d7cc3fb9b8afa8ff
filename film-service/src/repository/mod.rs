//! Film persistence
//!
//! [`FilmStore`] is the storage contract the service depends on;
//! [`SqliteFilmStore`] implements it on a sqlx SQLite pool. Search
//! predicates come from [`crate::search`] and are bound positionally.

mod error;
mod pagination;
mod sqlite;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use pagination::{Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE, PAGE_PARAM, PER_PAGE_PARAM};
pub use sqlite::SqliteFilmStore;
pub use traits::{FilmStore, RepositoryResult};
