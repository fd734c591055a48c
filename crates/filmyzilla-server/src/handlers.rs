//! JSON API handlers
//!
//! Each handler runs one fetch-and-parse cycle. Any failure becomes a 500
//! carrying the underlying error message; partial results are never sent.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use filmyzilla_core::{CategoryEntry, ServerListing};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::AppState;

const MOVIES_ERROR: &str = "Failed to scrape data";
const SERVERS_ERROR: &str = "Failed to fetch server links";

/// Body of a successful `GET /api/movies`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviesResponse {
    pub success: bool,
    pub total_categories: usize,
    pub data: Vec<CategoryEntry>,
    pub scraped_at: String,
}

/// Body of a successful `GET /api/servers`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServersResponse {
    pub success: bool,
    pub data: ServerListing,
    pub source_url: String,
    pub scraped_at: String,
}

/// Body of every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// Query accepted by `GET /api/servers`
#[derive(Debug, Default, Deserialize)]
pub struct ServersQuery {
    /// Page to scrape instead of the one named by the sources document
    pub url: Option<String>,
}

/// Request failure tagged with the route's summary message
#[derive(Debug)]
pub struct ApiError {
    summary: &'static str,
    message: String,
}

impl ApiError {
    fn new(summary: &'static str, source: impl std::fmt::Display) -> Self {
        Self {
            summary,
            message: source.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.message, "{}", self.summary);

        let body = ErrorResponse {
            success: false,
            error: self.summary.to_string(),
            message: self.message,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn scraped_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `GET /api/movies`
pub async fn api_movies(State(state): State<AppState>) -> Result<Json<MoviesResponse>, ApiError> {
    let categories = state
        .scraper
        .list_categories()
        .await
        .map_err(|e| ApiError::new(MOVIES_ERROR, e))?;

    Ok(Json(MoviesResponse {
        success: true,
        total_categories: categories.len(),
        data: categories,
        scraped_at: scraped_at(),
    }))
}

/// `GET /api/servers[?url=<page>]`
///
/// A malformed query string fails with the same envelope as a scrape error.
pub async fn api_servers(
    State(state): State<AppState>,
    query: Result<Query<ServersQuery>, QueryRejection>,
) -> Result<Json<ServersResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::new(SERVERS_ERROR, e.body_text()))?;
    let target = query.url.as_deref().map(str::trim).filter(|url| !url.is_empty());

    let page = state
        .scraper
        .list_servers(target)
        .await
        .map_err(|e| ApiError::new(SERVERS_ERROR, e))?;

    Ok(Json(ServersResponse {
        success: true,
        data: page.listing,
        source_url: page.source_url,
        scraped_at: scraped_at(),
    }))
}
