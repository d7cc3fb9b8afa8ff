//! Film store trait
//!
//! Async methods use return-position `impl Future` so implementations can be
//! written with plain `async fn` and no boxing.

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::Pagination;
use crate::model::Film;
use crate::search::Predicate;

/// Result type for store operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Persistence for films
///
/// Every query returns films ordered by id. Implementations never retry;
/// each call is attempted exactly once.
///
/// # Example
///
/// ```rust,ignore
/// use film_service::repository::FilmStore;
/// use film_service::search::Predicate;
///
/// let id = store.insert(&Film::new("Dune").with_year(2021)).await?;
/// let film = store.find_by_id(id).await?;
/// let everything = store.search(&Predicate::everything()).await?;
/// ```
pub trait FilmStore: Send + Sync {
    /// Every film
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Film>>> + Send;

    /// A film by id, `None` when no row matches
    fn find_by_id(&self, id: i32) -> impl Future<Output = RepositoryResult<Option<Film>>> + Send;

    /// Insert a film and return the id the store assigned
    ///
    /// The `id` field of `film` is ignored.
    fn insert(&self, film: &Film) -> impl Future<Output = RepositoryResult<i32>> + Send;

    /// Overwrite the film whose id is `film.id`
    ///
    /// Returns `false` when no row matched.
    fn update(&self, film: &Film) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Delete a film by id
    ///
    /// Returns `false` when no row matched.
    fn delete(&self, id: i32) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Films matching a predicate
    fn search(
        &self,
        predicate: &Predicate,
    ) -> impl Future<Output = RepositoryResult<Vec<Film>>> + Send;

    /// One page of films matching a predicate
    fn search_page(
        &self,
        predicate: &Predicate,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Vec<Film>>> + Send;
}
