//! Domain DTO for the movie catalog.
//!
//! # Design
//! A single `Movie` type serves reads, creates, and partial updates. Every
//! field is optional on the wire: the server assigns `movie_id`, and an
//! update only carries the fields the caller wants changed. `None` fields
//! are omitted when encoding so a partial movie never overwrites server data
//! with `null`.
//!
//! The type mirrors the mock-server's schema but is defined independently;
//! integration tests catch any drift between the two crates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie record as exchanged with the catalog service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    /// Server-assigned identifier. `None` until the movie has been created.
    #[serde(rename = "movie_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Free-text cast list, comma separated by convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}

impl Movie {
    /// A complete movie ready to be created. The id is left for the server.
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cast: impl Into<String>,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            year: Some(year),
            cast: Some(cast.into()),
            release_date: Some(release_date),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = Some(cast.into());
        self
    }

    pub fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = Some(release_date);
        self
    }
}
