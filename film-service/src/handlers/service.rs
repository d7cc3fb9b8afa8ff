//! Per-operation orchestration
//!
//! [`FilmService`] takes a transport-neutral [`FilmRequest`], runs it through
//! the parser or the search builder, calls the store and hands the result to
//! the response writer.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;

use super::error::{ApiError, ApiOperation};
use crate::codec::{CodecRegistry, DecodeOutcome, Format};
use crate::model::{Film, Payload};
use crate::negotiate::negotiate_request;
use crate::parser::{content_type, EntityParser};
use crate::repository::{FilmStore, Pagination, RepositoryError};
use crate::response::{FilmResponse, ResponseWriter};
use crate::search::{search_predicate, Predicate, SearchCriteria};

/// Message returned after a successful delete
pub const DELETED_MESSAGE: &str = "Film deleted successfully.";

/// Request inputs the film operations read
#[derive(Debug, Clone, Default)]
pub struct FilmRequest {
    /// Query parameters
    pub params: HashMap<String, String>,
    /// Request headers
    pub headers: HeaderMap,
    /// Raw body text, empty for reads
    pub body: String,
}

impl FilmRequest {
    /// Request with only query parameters
    pub fn with_params(params: HashMap<String, String>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Negotiated response format
    pub fn response_format(&self) -> Format {
        negotiate_request(&self.params, &self.headers)
    }

    fn content_type(&self) -> Option<&str> {
        content_type(&self.headers)
    }
}

fn store_error(operation: ApiOperation) -> impl FnOnce(RepositoryError) -> ApiError {
    move |err| ApiError::from(err).with_operation(operation)
}

fn parse_id(operation: ApiOperation, raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::invalid_id(operation, raw))
}

/// Film operations over a store
#[derive(Debug)]
pub struct FilmService<S> {
    store: S,
    parser: EntityParser,
    writer: ResponseWriter,
    base_path: String,
}

impl<S: FilmStore> FilmService<S> {
    /// Create a service sharing one codec registry between parser and writer
    pub fn new(store: S, registry: Arc<CodecRegistry>, base_path: impl Into<String>) -> Self {
        Self {
            store,
            parser: EntityParser::new(Arc::clone(&registry)),
            writer: ResponseWriter::new(registry),
            base_path: normalize_base_path(&base_path.into()),
        }
    }

    /// Path prefix the routes are mounted under, empty for the root
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn fetch(
        &self,
        operation: ApiOperation,
        predicate: &Predicate,
        params: &HashMap<String, String>,
    ) -> Result<Vec<Film>, ApiError> {
        let result = match Pagination::from_params(params) {
            Some(page) => self.store.search_page(predicate, page).await,
            None => self.store.search(predicate).await,
        };
        result.map_err(store_error(operation))
    }

    /// Films matching the whitelisted criteria parameters
    ///
    /// An empty result is still `200` with an empty collection.
    pub async fn list(&self, request: &FilmRequest) -> Result<FilmResponse, ApiError> {
        let predicate = SearchCriteria::from_params(&request.params)
            .compile()
            .map_err(|e| ApiError::from_search(ApiOperation::List, &e))?;

        let films = self.fetch(ApiOperation::List, &predicate, &request.params).await?;
        tracing::debug!(count = films.len(), "listed films");

        Ok(self.writer.ok(request.response_format(), films))
    }

    /// Free-text or criteria search; nothing found is `404`
    pub async fn search(&self, request: &FilmRequest) -> Result<FilmResponse, ApiError> {
        let predicate = search_predicate(&request.params)
            .map_err(|e| ApiError::from_search(ApiOperation::Search, &e))?;

        let films = self.fetch(ApiOperation::Search, &predicate, &request.params).await?;
        if films.is_empty() {
            return Err(ApiError::no_films_found());
        }

        tracing::debug!(count = films.len(), "search matched films");
        Ok(self.writer.ok(request.response_format(), films))
    }

    /// A single film by its raw path id
    pub async fn get(&self, raw_id: &str, request: &FilmRequest) -> Result<FilmResponse, ApiError> {
        let id = parse_id(ApiOperation::Get, raw_id)?;

        let film = self
            .store
            .find_by_id(id)
            .await
            .map_err(store_error(ApiOperation::Get))?
            .ok_or_else(|| ApiError::not_found(ApiOperation::Get, id.to_string()))?;

        Ok(self.writer.ok(request.response_format(), film))
    }

    fn decode(&self, operation: ApiOperation, request: &FilmRequest) -> Result<Film, ApiError> {
        let film = match self.parser.parse(&request.body, request.content_type()) {
            DecodeOutcome::Entity(film) => film,
            DecodeOutcome::Absent => {
                return Err(ApiError::bad_request(operation, "Invalid film data"));
            }
            DecodeOutcome::Fatal(err) => return Err(ApiError::from_codec(operation, &err)),
        };

        film.validate()
            .map_err(|msg| ApiError::validation_failed(operation, msg))?;
        Ok(film)
    }

    /// Store a new film; `201` with the stored film and its `Location`
    pub async fn create(&self, request: &FilmRequest) -> Result<FilmResponse, ApiError> {
        let mut film = self.decode(ApiOperation::Create, request)?;

        film.id = self
            .store
            .insert(&film)
            .await
            .map_err(store_error(ApiOperation::Create))?;

        tracing::info!(film_id = film.id, "film created");

        let location = format!("{}/films/{}", self.base_path, film.id);
        Ok(self
            .writer
            .created(request.response_format(), film, location))
    }

    /// Replace a film; the path id wins over any id in the body
    pub async fn update(&self, raw_id: &str, request: &FilmRequest) -> Result<FilmResponse, ApiError> {
        let id = parse_id(ApiOperation::Update, raw_id)?;

        if !EntityParser::is_supported(request.content_type()) {
            return Err(ApiError::bad_request(
                ApiOperation::Update,
                "Unsupported Content-Type",
            ));
        }

        let mut film = self.decode(ApiOperation::Update, request)?;
        film.id = id;

        let updated = self
            .store
            .update(&film)
            .await
            .map_err(store_error(ApiOperation::Update))?;
        if !updated {
            return Err(ApiError::not_found(ApiOperation::Update, id.to_string()));
        }

        tracing::info!(film_id = id, "film updated");
        Ok(self.writer.ok(request.response_format(), film))
    }

    /// Remove a film; a missing id is `404` with nothing changed
    pub async fn delete(&self, raw_id: &str, request: &FilmRequest) -> Result<FilmResponse, ApiError> {
        let id = parse_id(ApiOperation::Delete, raw_id)?;

        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(store_error(ApiOperation::Delete))?;
        if !deleted {
            return Err(ApiError::not_found(ApiOperation::Delete, id.to_string()));
        }

        tracing::info!(film_id = id, "film deleted");
        Ok(self
            .writer
            .ok(request.response_format(), Payload::message(DELETED_MESSAGE)))
    }
}

/// Strip trailing slashes and ensure a leading one; `/` becomes empty
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
