//! Filmyzilla Scraper Core Library
//!
//! Provides async API for listing movie categories and resolving download
//! servers from a filmyzilla mirror.
//!
//! # Overview
//!
//! This crate provides a complete scraping solution with:
//! - HTTP client sending browser-like identification
//! - HTML parsers for the homepage listing and download-server pages
//! - High-level API that fetches and parses in one call
//!
//! # Example
//!
//! ```no_run
//! use filmyzilla_core::{FilmyzillaScraper, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = FilmyzillaScraper::new()?;
//!
//!     // Categories and their latest movies
//!     let categories = scraper.list_categories().await?;
//!     for category in &categories {
//!         for movie in &category.movies {
//!             println!("[{}] {} ({})", category.category, movie.title, movie.quality);
//!         }
//!     }
//!
//!     // Download servers of the page named by the sources document
//!     let page = scraper.list_servers(None).await?;
//!     println!("{} servers on {}", page.listing.total_servers, page.source_url);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Upstream drift
//!
//! The upstream markup is not under our control. When it changes, parsers
//! return fewer or no entries rather than an error.

mod client;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, FilmyzillaClient, USER_AGENT};

// Re-export error types
pub use error::{FilmyzillaError, Result};

// Re-export parser functions
pub use parser::{parse_listing, parse_server_links};

// Re-export main scraper API
pub use scraper::{DEFAULT_SOURCES_URL, FilmyzillaScraper, ScraperConfig};

// Re-export data types
pub use types::{CategoryEntry, MovieEntry, ServerEntry, ServerListing, ServerPage, Sources};

// Re-export URL helper functions for convenience
pub use url::{DEFAULT_BASE_URL, normalize_url, origin_of, validate_page_url};
