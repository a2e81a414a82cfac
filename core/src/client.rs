//! Request construction and response normalization for the movie service.
//!
//! # Design
//! `MovieCatalogClient` holds only a `base_url`, a transport and the
//! search-miss policy, and carries no mutable state between calls. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`. The async
//! operations chain the two around a single `Transport::send`.
//!
//! A client created with [`MovieCatalogClient::detached`] has no transport:
//! it can still build and parse, leaving the round-trip to the caller.

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::paths;
use crate::types::Movie;

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain";

/// How name and year lookups treat a 404 from the service.
///
/// Some service versions answer an unmatched search with `404 Not Found`,
/// others with `200 []`. An empty `200` list is always returned as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMiss {
    /// Surface the 404 as a `ClientError`.
    #[default]
    Error,
    /// Treat the 404 as an empty result.
    Empty,
}

/// Client for the movie catalog service.
#[derive(Debug, Clone)]
pub struct MovieCatalogClient<T = ()> {
    base_url: String,
    transport: T,
    search_miss: SearchMiss,
}

impl MovieCatalogClient<()> {
    /// A client without a transport, for callers that execute requests
    /// themselves.
    pub fn detached(base_url: &str) -> Self {
        Self::new(base_url, ())
    }
}

impl<T> MovieCatalogClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            search_miss: SearchMiss::default(),
        }
    }

    pub fn with_search_miss(mut self, search_miss: SearchMiss) -> Self {
        self.search_miss = search_miss;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn search_miss(&self) -> SearchMiss {
        self.search_miss
    }

    pub fn build_list_all_movies(&self) -> HttpRequest {
        self.get(paths::ALL_MOVIES.to_string())
    }

    pub fn build_get_movie_by_id(&self, id: u64) -> HttpRequest {
        self.get(paths::expand_id(paths::MOVIE_BY_ID, id))
    }

    pub fn build_find_movies_by_name(&self, name: &str) -> HttpRequest {
        self.get(paths::with_query(
            paths::MOVIES_BY_NAME,
            &[(paths::MOVIE_NAME_PARAM, name)],
        ))
    }

    pub fn build_find_movies_by_year(&self, year: i32) -> HttpRequest {
        let year = year.to_string();
        self.get(paths::with_query(
            paths::MOVIES_BY_YEAR,
            &[(paths::YEAR_PARAM, &year)],
        ))
    }

    pub fn build_create_movie(&self, movie: &Movie) -> Result<HttpRequest> {
        self.with_json_body(HttpMethod::Post, paths::ADD_MOVIE.to_string(), movie)
    }

    pub fn build_update_movie(&self, id: u64, movie: &Movie) -> Result<HttpRequest> {
        self.with_json_body(
            HttpMethod::Put,
            paths::expand_id(paths::MOVIE_BY_ID, id),
            movie,
        )
    }

    pub fn build_delete_movie(&self, id: u64) -> HttpRequest {
        self.delete(paths::expand_id(paths::MOVIE_BY_ID, id))
    }

    pub fn build_delete_movie_by_name(&self, name: &str) -> HttpRequest {
        self.delete(paths::with_query(
            paths::MOVIES_BY_NAME,
            &[(paths::MOVIE_NAME_PARAM, name)],
        ))
    }

    /// Decode a JSON array of movies.
    pub fn parse_movies(&self, response: HttpResponse) -> Result<Vec<Movie>> {
        decode(&check_status(response)?)
    }

    /// Like [`parse_movies`](Self::parse_movies), honouring the search-miss
    /// policy for 404 responses.
    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Movie>> {
        if response.status == 404 && self.search_miss == SearchMiss::Empty {
            return Ok(Vec::new());
        }
        self.parse_movies(response)
    }

    /// Decode a single JSON movie.
    pub fn parse_movie(&self, response: HttpResponse) -> Result<Movie> {
        decode(&check_status(response)?)
    }

    /// Return the plain-text body of a delete, untouched.
    pub fn parse_confirmation(&self, response: HttpResponse) -> Result<String> {
        check_status(response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(&path),
            headers: vec![accept(APPLICATION_JSON)],
            body: None,
        }
    }

    fn delete(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(&path),
            headers: vec![accept(TEXT_PLAIN)],
            body: None,
        }
    }

    fn with_json_body(&self, method: HttpMethod, path: String, movie: &Movie) -> Result<HttpRequest> {
        let body = serde_json::to_string(movie).map_err(ClientError::Encode)?;
        Ok(HttpRequest {
            method,
            url: self.url(&path),
            headers: vec![
                ("content-type".to_string(), APPLICATION_JSON.to_string()),
                accept(APPLICATION_JSON),
            ],
            body: Some(body),
        })
    }
}

impl<T: Transport> MovieCatalogClient<T> {
    pub async fn list_all_movies(&self) -> Result<Vec<Movie>> {
        let response = self.execute(self.build_list_all_movies()).await?;
        self.parse_movies(response)
    }

    pub async fn get_movie_by_id(&self, id: u64) -> Result<Movie> {
        let response = self.execute(self.build_get_movie_by_id(id)).await?;
        self.parse_movie(response)
    }

    pub async fn find_movies_by_name(&self, name: &str) -> Result<Vec<Movie>> {
        let response = self.execute(self.build_find_movies_by_name(name)).await?;
        self.parse_search(response)
    }

    pub async fn find_movies_by_year(&self, year: i32) -> Result<Vec<Movie>> {
        let response = self.execute(self.build_find_movies_by_year(year)).await?;
        self.parse_search(response)
    }

    /// Create `movie`; the returned copy carries the server-assigned id.
    pub async fn create_movie(&self, movie: &Movie) -> Result<Movie> {
        let response = self.execute(self.build_create_movie(movie)?).await?;
        self.parse_movie(response)
    }

    /// Send the populated fields of `movie` as an update to movie `id`.
    pub async fn update_movie(&self, id: u64, movie: &Movie) -> Result<Movie> {
        let response = self.execute(self.build_update_movie(id, movie)?).await?;
        self.parse_movie(response)
    }

    pub async fn delete_movie(&self, id: u64) -> Result<String> {
        let response = self.execute(self.build_delete_movie(id)).await?;
        self.parse_confirmation(response)
    }

    pub async fn delete_movie_by_name(&self, name: &str) -> Result<String> {
        let response = self.execute(self.build_delete_movie_by_name(name)).await?;
        self.parse_confirmation(response)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending movie service request");
        self.transport.send(request).await.map_err(|err| {
            tracing::debug!(error = %err, "movie service unreachable");
            ClientError::from(err)
        })
    }
}

fn accept(media_type: &str) -> (String, String) {
    ("accept".to_string(), media_type.to_string())
}

/// Split off error statuses, yielding the body of anything below 400.
fn check_status(response: HttpResponse) -> Result<String> {
    if !response.is_error() {
        return Ok(response.body);
    }
    let err = ClientError::from_status(response.status, response.body);
    tracing::debug!(status = response.status, reason = %err, "movie service returned error status");
    Err(err)
}

fn decode<D: DeserializeOwned>(body: &str) -> Result<D> {
    serde_json::from_str(body).map_err(ClientError::Decode)
}
