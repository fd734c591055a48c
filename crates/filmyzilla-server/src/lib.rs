//! Filmyzilla JSON API
//!
//! Serves scraped listings and download servers to the browsing UI.
//!
//! # Routes
//!
//! - `GET /api/movies` - homepage categories and their latest movies
//! - `GET /api/servers[?url=<page>]` - download servers of a movie page;
//!   without `url` the page named by the sources document is used
//!
//! # Usage
//!
//! ```no_run
//! use clap::Parser;
//! use filmyzilla_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server(ServerConfig::parse()).await
//! }
//! ```

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use filmyzilla_core::{FilmyzillaScraper, ScraperConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

mod config;
pub mod handlers;

pub use config::ServerConfig;

/// Shared state handed to every handler
///
/// The scraper keeps no per-request state, so sharing it needs no lock.
#[derive(Clone)]
pub struct AppState {
    pub(crate) scraper: Arc<FilmyzillaScraper>,
}

impl AppState {
    /// Create a new AppState with the given scraper configuration
    ///
    /// # Errors
    /// Returns error if the configured URLs are invalid or the HTTP client
    /// cannot be built
    pub fn new(config: ScraperConfig) -> filmyzilla_core::Result<Self> {
        let scraper = FilmyzillaScraper::with_config(config)?;
        Ok(Self {
            scraper: Arc::new(scraper),
        })
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/movies", get(handlers::api_movies))
        .route("/api/servers", get(handlers::api_servers))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve until the process stops
///
/// # Errors
/// Returns error if the scraper cannot be configured or the address cannot be bound
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.scraper_config())?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        address = %config.bind,
        upstream = %config.base_url,
        "filmyzilla API listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
