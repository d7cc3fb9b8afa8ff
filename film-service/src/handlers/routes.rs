//! axum adapters for the film operations

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::get,
    Router,
};

use super::error::ApiError;
use super::service::{FilmRequest, FilmService};
use crate::health::health;
use crate::repository::FilmStore;
use crate::response::FilmResponse;

type SharedService<S> = State<Arc<FilmService<S>>>;

/// Build the application router
///
/// Film routes are nested under the service's base path; `/health` always
/// sits at the root.
pub fn router<S: FilmStore + 'static>(service: FilmService<S>) -> Router {
    let base_path = service.base_path().to_string();

    let films = Router::new()
        .route("/films", get(list_films::<S>).post(create_film::<S>))
        .route(
            "/films/{id}",
            get(get_film::<S>)
                .put(update_film::<S>)
                .delete(delete_film::<S>),
        )
        .route("/search", get(search_films::<S>))
        .with_state(Arc::new(service));

    let app = Router::new().route("/health", get(health));
    if base_path.is_empty() {
        app.merge(films)
    } else {
        app.nest(&base_path, films)
    }
}

fn request(params: HashMap<String, String>, headers: HeaderMap, body: String) -> FilmRequest {
    FilmRequest {
        params,
        headers,
        body,
    }
}

async fn list_films<S: FilmStore>(
    State(service): SharedService<S>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<FilmResponse, ApiError> {
    service.list(&request(params, headers, String::new())).await
}

async fn search_films<S: FilmStore>(
    State(service): SharedService<S>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<FilmResponse, ApiError> {
    service.search(&request(params, headers, String::new())).await
}

async fn get_film<S: FilmStore>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<FilmResponse, ApiError> {
    service.get(&id, &request(params, headers, String::new())).await
}

async fn create_film<S: FilmStore>(
    State(service): SharedService<S>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Result<FilmResponse, ApiError> {
    service.create(&request(params, headers, body)).await
}

async fn update_film<S: FilmStore>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Result<FilmResponse, ApiError> {
    service.update(&id, &request(params, headers, body)).await
}

async fn delete_film<S: FilmStore>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<FilmResponse, ApiError> {
    service.delete(&id, &request(params, headers, String::new())).await
}
