//! In-memory movie service speaking the `/movieservice/v1` HTTP surface.
//!
//! Used as the HTTP responder in end-to-end tests of the client, and as a
//! standalone binary for poking at the API by hand.

use std::{collections::BTreeMap, str::FromStr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const DELETED: &str = "Movie deleted successfully";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// How name and year searches answer when nothing matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMissMode {
    /// `404` with a JSON message.
    #[default]
    NotFound,
    /// `200` with an empty array.
    Empty,
}

impl FromStr for SearchMissMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "not_found" | "404" => Ok(Self::NotFound),
            "empty" => Ok(Self::Empty),
            other => Err(format!("unknown search miss mode: {other}")),
        }
    }
}

/// Movies keyed by id, plus the next id to hand out.
#[derive(Debug)]
pub struct Catalog {
    movies: BTreeMap<u64, Movie>,
    next_id: u64,
}

impl Catalog {
    /// Seed with `movies`. Entries without an id get one after the highest
    /// id already present.
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut catalog = Self {
            next_id: movies.iter().filter_map(|m| m.movie_id).max().unwrap_or(0) + 1,
            movies: BTreeMap::new(),
        };
        for movie in movies {
            match movie.movie_id {
                Some(id) => {
                    catalog.movies.insert(id, movie);
                }
                None => {
                    catalog.insert(movie);
                }
            }
        }
        catalog
    }

    pub fn insert(&mut self, mut movie: Movie) -> Movie {
        let id = self.next_id;
        self.next_id += 1;
        movie.movie_id = Some(id);
        self.movies.insert(id, movie.clone());
        movie
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

pub type Db = Arc<RwLock<Catalog>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    search_miss: SearchMissMode,
}

/// Empty catalog, 404 on search misses.
pub fn app() -> Router {
    app_with(Vec::new(), SearchMissMode::default())
}

pub fn app_with(movies: Vec<Movie>, search_miss: SearchMissMode) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Catalog::new(movies))),
        search_miss,
    };
    Router::new()
        .route("/movieservice/v1/allMovies", get(list_movies))
        .route("/movieservice/v1/movie", post(create_movie))
        .route(
            "/movieservice/v1/movie/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route(
            "/movieservice/v1/movieName",
            get(movies_by_name).delete(delete_movies_by_name),
        )
        .route("/movieservice/v1/movieYear", get(movies_by_year))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

/// The fixture movies the service starts with when seeded.
pub fn sample_catalog() -> Vec<Movie> {
    let avengers_cast = "Robert Downey Jr, Chris Evans , Chris HemsWorth";
    let nolan_cast = "Christian Bale, Heath Ledger , Michael Caine";
    vec![
        movie(1, "Batman Begins", 2005, "Christian Bale, Katie Holmes , Liam Neeson", (2005, 6, 15)),
        movie(2, "Dark Knight", 2008, nolan_cast, (2008, 7, 18)),
        movie(3, "The Dark Knight Rises", 2012, nolan_cast, (2012, 7, 20)),
        movie(4, "The Avengers", 2012, avengers_cast, (2012, 5, 4)),
        movie(5, "Avengers: Age of Ultron", 2015, avengers_cast, (2015, 5, 1)),
        movie(6, "Avengers: Infinity War", 2018, avengers_cast, (2018, 4, 27)),
        movie(7, "Avengers: End Game", 2019, avengers_cast, (2019, 4, 26)),
        movie(8, "The Hangover", 2009, "Bradley Cooper, Ed Helms , Zach Galifianakis", (2009, 6, 5)),
    ]
}

fn movie(id: u64, name: &str, year: i32, cast: &str, (y, m, d): (i32, u32, u32)) -> Movie {
    Movie {
        movie_id: Some(id),
        name: Some(name.to_string()),
        year: Some(year),
        cast: Some(cast.to_string()),
        release_date: NaiveDate::from_ymd_opt(y, m, d),
    }
}

/// Error answer: a status plus `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}

#[derive(Deserialize)]
pub struct NameQuery {
    pub movie_name: String,
}

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: i32,
}

async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    let catalog = state.db.read().await;
    Json(catalog.movies.values().cloned().collect())
}

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Movie>, ApiError> {
    let catalog = state.db.read().await;
    catalog
        .movies
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No Movie Available with the given Id - {id}")))
}

async fn movies_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let needle = query.movie_name.to_lowercase();
    let catalog = state.db.read().await;
    let found: Vec<Movie> = catalog
        .movies
        .values()
        .filter(|m| {
            m.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    search_result(
        found,
        state.search_miss,
        format!("No Movie Available with the given name - {}", query.movie_name),
    )
}

async fn movies_by_year(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let catalog = state.db.read().await;
    let found: Vec<Movie> = catalog
        .movies
        .values()
        .filter(|m| m.year == Some(query.year))
        .cloned()
        .collect();
    search_result(
        found,
        state.search_miss,
        format!("No Movie Available with the given year - {}", query.year),
    )
}

fn search_result(
    found: Vec<Movie>,
    search_miss: SearchMissMode,
    message: String,
) -> Result<Json<Vec<Movie>>, ApiError> {
    if found.is_empty() && search_miss == SearchMissMode::NotFound {
        return Err(ApiError::not_found(message));
    }
    Ok(Json(found))
}

async fn create_movie(
    State(state): State<AppState>,
    Json(input): Json<Movie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let mut missing = Vec::new();
    if input.name.as_deref().map_or(true, str::is_empty) {
        missing.push("name");
    }
    if input.year.is_none() {
        missing.push("year");
    }
    if input.release_date.is_none() {
        missing.push("release_date");
    }
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Please pass all the input fields : [{}]",
            missing.join(", ")
        )));
    }

    let created = state.db.write().await.insert(input);
    tracing::info!(movie_id = ?created.movie_id, "movie created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<Movie>,
) -> Result<Json<Movie>, ApiError> {
    let mut catalog = state.db.write().await;
    let movie = catalog
        .movies
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found(format!("No Movie Available with the given Id - {id}")))?;
    if let Some(name) = input.name {
        movie.name = Some(name);
    }
    if let Some(year) = input.year {
        movie.year = Some(year);
    }
    if let Some(cast) = input.cast {
        movie.cast = Some(cast);
    }
    if let Some(release_date) = input.release_date {
        movie.release_date = Some(release_date);
    }
    Ok(Json(movie.clone()))
}

async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<&'static str, ApiError> {
    let mut catalog = state.db.write().await;
    catalog
        .movies
        .remove(&id)
        .map(|_| DELETED)
        .ok_or_else(|| ApiError::not_found(format!("No Movie Available with the given Id - {id}")))
}

async fn delete_movies_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<&'static str, ApiError> {
    let mut catalog = state.db.write().await;
    let before = catalog.movies.len();
    catalog
        .movies
        .retain(|_, m| m.name.as_deref() != Some(query.movie_name.as_str()));
    if catalog.movies.len() == before {
        return Err(ApiError::not_found(format!(
            "No Movie Available with the given name - {}",
            query.movie_name
        )));
    }
    Ok(DELETED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_serializes_absent_fields_as_null() {
        let movie = Movie {
            name: Some("Test".to_string()),
            ..Movie::default()
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["name"], "Test");
        assert!(json["movie_id"].is_null());
        assert!(json["release_date"].is_null());
    }

    #[test]
    fn movie_accepts_partial_payload() {
        let input: Movie = serde_json::from_str(r#"{"cast":"Hugh Laurie"}"#).unwrap();
        assert_eq!(input.cast.as_deref(), Some("Hugh Laurie"));
        assert!(input.name.is_none());
        assert!(input.movie_id.is_none());
    }

    #[test]
    fn release_date_uses_iso_format() {
        let input: Movie = serde_json::from_str(r#"{"release_date":"2012-02-24"}"#).unwrap();
        assert_eq!(input.release_date, NaiveDate::from_ymd_opt(2012, 2, 24));
    }

    #[test]
    fn catalog_assigns_ids_after_seeded_ones() {
        let mut catalog = Catalog::new(sample_catalog());
        assert_eq!(catalog.len(), 8);
        let created = catalog.insert(Movie {
            name: Some("New".to_string()),
            ..Movie::default()
        });
        assert_eq!(created.movie_id, Some(9));
    }

    #[test]
    fn catalog_numbers_unidentified_seed_movies() {
        let catalog = Catalog::new(vec![Movie::default(), Movie::default()]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.movies.contains_key(&1));
        assert!(catalog.movies.contains_key(&2));
    }

    #[test]
    fn empty_catalog_starts_at_one() {
        let mut catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.insert(Movie::default()).movie_id, Some(1));
    }

    #[test]
    fn search_miss_mode_parses_env_values() {
        assert_eq!("error".parse::<SearchMissMode>(), Ok(SearchMissMode::NotFound));
        assert_eq!("EMPTY".parse::<SearchMissMode>(), Ok(SearchMissMode::Empty));
        assert!("sometimes".parse::<SearchMissMode>().is_err());
    }
}
