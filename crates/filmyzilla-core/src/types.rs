//! Core data types for the filmyzilla scraper
//!
//! Everything here lives for one request at most. Field names serialize
//! in camelCase to match the JSON the browsing UI consumes.

use serde::{Deserialize, Serialize};

/// A single movie listed under a homepage category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEntry {
    /// Movie title as shown on the page
    pub title: String,

    /// Absolute URL to the movie page
    pub url: String,

    /// Free-form quality label (e.g., "720p"), "Unknown" when not found
    pub quality: String,
}

/// A homepage category and the movies listed inline under it
///
/// Categories discovered from touch blocks always carry an empty movie list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    /// Display name of the category
    pub category: String,

    /// Absolute URL of the category page
    pub category_url: String,

    /// Movies in document order
    pub movies: Vec<MovieEntry>,
}

/// One download mirror found on a target page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEntry {
    /// Cleaned link text, or a synthesized "Server N" / "Download Link K"
    pub title: String,

    /// Absolute URL of the mirror link
    pub url: String,

    /// Server number taken from the link text or href
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_number: Option<String>,
}

/// Server links extracted from one target page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerListing {
    pub servers: Vec<ServerEntry>,
    pub total_servers: usize,
}

impl From<Vec<ServerEntry>> for ServerListing {
    fn from(servers: Vec<ServerEntry>) -> Self {
        Self {
            total_servers: servers.len(),
            servers,
        }
    }
}

/// Server links together with the page they were scraped from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPage {
    /// Absolute URL of the scraped target page
    pub source_url: String,

    pub listing: ServerListing,
}

/// Remote indirection document naming the live mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sources {
    /// URL of the page to scrape for server links
    pub primary: String,
}
