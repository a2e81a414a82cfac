//! Standalone mock movie service.
//!
//! # Environment variables
//!
//! | Variable      | Default | Description                                    |
//! |---------------|---------|------------------------------------------------|
//! | `PORT`        | `3000`  | Port to listen on (127.0.0.1)                   |
//! | `SEARCH_MISS` | `error` | `error` answers unmatched searches with 404, `empty` with `[]` |
//! | `SEED`        | `true`  | Start with the sample catalog                   |
//! | `RUST_LOG`    | `mock_server=info,tower_http=info` | Log filter         |

use mock_server::{app_with, sample_catalog, SearchMissMode};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let search_miss = match std::env::var("SEARCH_MISS") {
        Ok(value) => value.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to 404 on search misses");
            SearchMissMode::NotFound
        }),
        Err(_) => SearchMissMode::default(),
    };
    let seed = std::env::var("SEED")
        .map(|value| value != "false" && value != "0")
        .unwrap_or(true);
    let movies = if seed { sample_catalog() } else { Vec::new() };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, ?search_miss, movies = movies.len(), "listening");
    mock_server::run(listener, app_with(movies, search_miss)).await
}
