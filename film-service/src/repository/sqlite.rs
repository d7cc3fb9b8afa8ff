//! SQLite film store

use sqlx::SqlitePool;

use super::{FilmStore, Pagination, RepositoryError, RepositoryOperation, RepositoryResult};
use crate::model::Film;
use crate::search::{FilterValue, Predicate};

const COLUMNS: &str = "id, title, year, director, stars, review";

/// [`FilmStore`] backed by a sqlx SQLite pool
///
/// `LIKE` comparisons are case-insensitive for ASCII text, which is SQLite's
/// default.
#[derive(Debug, Clone)]
pub struct SqliteFilmStore {
    pool: SqlitePool,
}

impl SqliteFilmStore {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(
        &self,
        predicate: &Predicate,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<Vec<Film>> {
        let (clause, values) = predicate.to_sql();
        let mut sql = format!("SELECT {COLUMNS} FROM films {clause} ORDER BY id");
        if pagination.is_some() {
            sql.push_str(" LIMIT ? OFFSET ?");
        }

        tracing::debug!(sql = %sql, binds = values.len(), "running film query");

        let mut query = sqlx::query_as::<_, Film>(&sql);
        for value in values {
            query = match value {
                FilterValue::String(s) => query.bind(s.clone()),
                FilterValue::Integer(n) => query.bind(*n),
            };
        }
        if let Some(page) = pagination {
            query = query.bind(page.limit_i64()).bind(page.offset_i64());
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Search, e))
    }
}

impl FilmStore for SqliteFilmStore {
    async fn find_all(&self) -> RepositoryResult<Vec<Film>> {
        self.fetch(&Predicate::everything(), None)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::FindAll))
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Film>> {
        let sql = format!("SELECT {COLUMNS} FROM films WHERE id = ?");
        sqlx::query_as::<_, Film>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::FindById, e)
                    .with_entity("Film", id.to_string())
            })
    }

    async fn insert(&self, film: &Film) -> RepositoryResult<i32> {
        let result = sqlx::query(
            "INSERT INTO films (title, year, director, stars, review) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(film.title.as_deref())
        .bind(film.year)
        .bind(film.director.as_deref())
        .bind(film.stars.as_deref())
        .bind(film.review.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Insert, e))?;

        let rowid = result.last_insert_rowid();
        let id = i32::try_from(rowid).map_err(|_| {
            RepositoryError::database_error(
                RepositoryOperation::Insert,
                format!("assigned id {rowid} does not fit a film id"),
            )
        })?;

        tracing::info!(film_id = id, "film inserted");
        Ok(id)
    }

    async fn update(&self, film: &Film) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE films SET title = ?, year = ?, director = ?, stars = ?, review = ? WHERE id = ?",
        )
        .bind(film.title.as_deref())
        .bind(film.year)
        .bind(film.director.as_deref())
        .bind(film.stars.as_deref())
        .bind(film.review.as_deref())
        .bind(film.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Update, e)
                .with_entity("Film", film.id.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM films WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::Delete, e)
                    .with_entity("Film", id.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, predicate: &Predicate) -> RepositoryResult<Vec<Film>> {
        self.fetch(predicate, None).await
    }

    async fn search_page(
        &self,
        predicate: &Predicate,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Film>> {
        self.fetch(predicate, Some(pagination)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::search::{FilterCondition, SearchField, SearchType};

    async fn seeded_store() -> SqliteFilmStore {
        let store = SqliteFilmStore::new(memory_pool().await.unwrap());
        for film in [
            Film::new("The Matrix")
                .with_year(1999)
                .with_director("Wachowski")
                .with_stars("Keanu Reeves, Carrie-Anne Moss"),
            Film::new("Fight Club").with_year(1999).with_director("Fincher"),
            Film::new("Heat").with_year(1995).with_director("Mann"),
            Film::new("John Wick").with_year(2014).with_stars("Keanu Reeves"),
        ] {
            store.insert(&film).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_in_order() {
        let store = SqliteFilmStore::new(memory_pool().await.unwrap());
        let first = store.insert(&Film::new("A").with_id(99)).await.unwrap();
        let second = store.insert(&Film::new("B")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let film = store.find_by_id(first).await.unwrap().unwrap();
        assert_eq!(film, Film::new("A").with_id(1));
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let store = seeded_store().await;
        let films = store.find_all().await.unwrap();
        let ids: Vec<i32> = films.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let store = seeded_store().await;
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = seeded_store().await;

        let changed = Film::new("Heat").with_id(3).with_year(1995).with_review("Tense");
        assert!(store.update(&changed).await.unwrap());
        assert_eq!(store.find_by_id(3).await.unwrap(), Some(changed));

        assert!(!store.update(&Film::new("Ghost").with_id(77)).await.unwrap());

        assert!(store.delete(3).await.unwrap());
        assert!(!store.delete(3).await.unwrap());
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_exact_year_search() {
        let store = seeded_store().await;
        let predicate = SearchType::Year.predicate("1999").unwrap();
        let titles: Vec<_> = store
            .search(&predicate)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["The Matrix", "Fight Club"]);

        let predicate = SearchType::Year.predicate("199").unwrap();
        assert!(store.search(&predicate).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_substring_search_is_case_insensitive() {
        let store = seeded_store().await;
        let predicate = Predicate::all_of(vec![FilterCondition::contains(SearchField::Stars, "keanu")]);
        assert_eq!(store.search(&predicate).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_all_matches_numeric_columns_as_text() {
        let store = seeded_store().await;
        let predicate = SearchType::All.predicate("201").unwrap();
        let films = store.search(&predicate).await.unwrap();
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].title.as_deref(), Some("John Wick"));
    }

    #[tokio::test]
    async fn test_search_page() {
        let store = seeded_store().await;
        let page = store
            .search_page(&Predicate::everything(), Pagination::page(2, 3))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 4);
    }
}
