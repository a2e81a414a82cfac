//! Endpoint paths and URL construction for the movie service.
//!
//! Two strategies, kept apart: the id-bearing endpoint is a path template
//! expanded by [`expand_id`], while name and year lookups append a query
//! string via [`with_query`]. Query values are percent-encoded with the
//! RFC 3986 unreserved set, so a space becomes `%20` and never `+`.

pub const ALL_MOVIES: &str = "/movieservice/v1/allMovies";
pub const MOVIE_BY_ID: &str = "/movieservice/v1/movie/{id}";
pub const MOVIES_BY_NAME: &str = "/movieservice/v1/movieName";
pub const MOVIES_BY_YEAR: &str = "/movieservice/v1/movieYear";
pub const ADD_MOVIE: &str = "/movieservice/v1/movie";

pub const MOVIE_NAME_PARAM: &str = "movie_name";
pub const YEAR_PARAM: &str = "year";

const ID_PLACEHOLDER: &str = "{id}";

/// Substitute `id` into the `{id}` segment of `template`.
pub fn expand_id(template: &str, id: u64) -> String {
    template.replace(ID_PLACEHOLDER, &id.to_string())
}

/// Append `params` to `path` as an encoded query string.
///
/// ```
/// use movie_catalog_core::paths::{with_query, MOVIES_BY_NAME};
///
/// let url = with_query(MOVIES_BY_NAME, &[("movie_name", "The Dark Knight")]);
/// assert_eq!(url, "/movieservice/v1/movieName?movie_name=The%20Dark%20Knight");
/// ```
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_id_fills_placeholder() {
        assert_eq!(expand_id(MOVIE_BY_ID, 11), "/movieservice/v1/movie/11");
    }

    #[test]
    fn spaces_encode_as_percent_twenty() {
        let url = with_query(
            MOVIES_BY_NAME,
            &[(MOVIE_NAME_PARAM, "The Best Exotic Marigold Hotel")],
        );
        assert_eq!(
            url,
            "/movieservice/v1/movieName?movie_name=The%20Best%20Exotic%20Marigold%20Hotel"
        );
        assert!(!url.contains('+'));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let url = with_query(MOVIES_BY_NAME, &[(MOVIE_NAME_PARAM, "Fast & Furious?/#1")]);
        assert_eq!(
            url,
            "/movieservice/v1/movieName?movie_name=Fast%20%26%20Furious%3F%2F%231"
        );
    }

    #[test]
    fn non_ascii_is_utf8_percent_encoded() {
        let url = with_query(MOVIES_BY_NAME, &[(MOVIE_NAME_PARAM, "Amélie")]);
        assert_eq!(url, "/movieservice/v1/movieName?movie_name=Am%C3%A9lie");
    }

    #[test]
    fn query_does_not_touch_path_placeholders() {
        let url = with_query(MOVIES_BY_NAME, &[(MOVIE_NAME_PARAM, "{id}")]);
        assert_eq!(url, "/movieservice/v1/movieName?movie_name=%7Bid%7D");
    }

    #[test]
    fn multiple_params_are_joined() {
        let url = with_query("/x", &[("a", "1"), ("b", "two words")]);
        assert_eq!(url, "/x?a=1&b=two%20words");
    }

    #[test]
    fn no_params_leaves_path_untouched() {
        assert_eq!(with_query(ALL_MOVIES, &[]), ALL_MOVIES);
    }
}
