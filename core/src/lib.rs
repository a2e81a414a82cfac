//! Typed async client for the movie catalog HTTP service.
//!
//! # Overview
//! Lists, searches, creates, updates and deletes movie records through a
//! fixed set of `/movieservice/v1` endpoints, normalizing every failure into
//! a single [`ClientError`].
//!
//! # Design
//! - `MovieCatalogClient` is stateless: it holds the base URL, an injected
//!   [`Transport`] and the search-miss policy. Calls can run concurrently
//!   from many tasks against one client.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response); the async methods glue them around one
//!   `Transport::send`, so the I/O boundary stays explicit.
//! - [`ReqwestTransport`] is the stock transport. Anything implementing
//!   [`Transport`] works, including in-memory stubs.
//! - The crate logs through `tracing` at debug level and installs no
//!   subscriber.
//!
//! # Example
//! ```no_run
//! use movie_catalog_core::{MovieCatalogClient, ReqwestTransport};
//!
//! # async fn run() -> movie_catalog_core::Result<()> {
//! let client = MovieCatalogClient::new("http://localhost:8081", ReqwestTransport::new());
//! for movie in client.find_movies_by_year(2008).await? {
//!     println!("{:?}", movie.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod paths;
pub mod types;

pub use client::{MovieCatalogClient, SearchMiss};
pub use error::{ClientError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::Movie;
