//! Download-server link parser
//!
//! Parses a target page and extracts the "start download" style links
//! pointing at individual mirrors.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{FilmyzillaError, Result};
use crate::types::ServerEntry;
use crate::url::{normalize_url, origin_of};

/// All server-link shapes, applied as one query in document order
const SERVER_LINK_SELECTOR: &str = concat!(
    r#"a[href*="/downloads/"][class*="newdl"], "#,
    r#"a[href*="/server/"], "#,
    r#"a[href*="/downloads/"], "#,
    r#".newdl, "#,
    r#"a[rel="nofollow"][href*="server"]"#,
);

/// Sort key for entries without a usable server number
const UNNUMBERED: u64 = u64::MAX;

/// Raw link data pulled out of the page before cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerCandidate {
    href: String,
    text: String,
}

/// Compiled patterns used to clean up server links
struct ServerPatterns {
    text_number: Regex,
    href_number: Regex,
    boilerplate: Vec<Regex>,
}

impl ServerPatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            text_number: compile(r"(?i)server\s*(\d+)")?,
            href_number: compile(r"(?i)server[_\s]*(\d+)")?,
            boilerplate: vec![
                compile(r"(?i)start\s+download\s+now\s*-?\s*")?,
                compile(r"(?i)download\s+now\s*-?\s*")?,
                compile(r"(?i)click\s+here\s*-?\s*")?,
            ],
        })
    }

    /// Number from the visible text, else from the href
    fn server_number(&self, candidate: &ServerCandidate) -> Option<String> {
        self.text_number
            .captures(&candidate.text)
            .or_else(|| self.href_number.captures(&candidate.href))
            .map(|caps| caps[1].to_string())
    }

    /// Strips the first occurrence of each boilerplate phrase
    fn clean_title(&self, text: &str) -> String {
        self.boilerplate
            .iter()
            .fold(text.to_string(), |title, re| {
                re.replace(&title, "").into_owned()
            })
            .trim()
            .to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| FilmyzillaError::ParseError(format!("Invalid pattern {}: {}", pattern, e)))
}

/// Parses a target page and returns its download-server links
///
/// # Arguments
/// * `html` - Raw HTML of the target page
/// * `page_url` - Absolute URL the page was fetched from; its origin is
///   used to absolutize relative hrefs
///
/// # Returns
/// Servers deduplicated by URL and sorted by ascending server number.
/// Unnumbered servers come last; discovery order breaks ties.
///
/// # Errors
/// - `InvalidUrl` if `page_url` is not an absolute http(s) URL
/// - `ParseError` if a selector or pattern fails to compile
pub fn parse_server_links(html: &str, page_url: &str) -> Result<Vec<ServerEntry>> {
    let origin = origin_of(page_url)?;
    let document = Html::parse_document(html);
    let selector = Selector::parse(SERVER_LINK_SELECTOR)
        .map_err(|e| FilmyzillaError::ParseError(format!("Invalid selector: {:?}", e)))?;
    let patterns = ServerPatterns::new()?;

    let mut servers: Vec<ServerEntry> = Vec::new();
    for candidate in collect_candidates(&document, &selector) {
        let entry = build_server_entry(&candidate, servers.len() + 1, &origin, &patterns);
        servers.push(entry);
    }

    Ok(dedup_and_sort(servers))
}

/// Links with both an href and visible text, first occurrence of each href
fn collect_candidates(document: &Html, selector: &Selector) -> Vec<ServerCandidate> {
    let mut seen = HashSet::new();

    document
        .select(selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim();
            let text = element.text().collect::<String>().trim().to_string();
            if href.is_empty() || text.is_empty() || !seen.insert(href.to_string()) {
                return None;
            }
            Some(ServerCandidate {
                href: href.to_string(),
                text,
            })
        })
        .collect()
}

/// Turns a candidate into an entry; `position` is its 1-based slot
fn build_server_entry(
    candidate: &ServerCandidate,
    position: usize,
    origin: &str,
    patterns: &ServerPatterns,
) -> ServerEntry {
    let server_number = patterns.server_number(candidate);

    let mut title = patterns.clean_title(&candidate.text);
    if title.is_empty() {
        title = match &server_number {
            Some(n) => format!("Server {}", n),
            None => format!("Download Link {}", position),
        };
    }

    ServerEntry {
        title,
        url: normalize_url(&candidate.href, origin),
        server_number,
    }
}

fn dedup_and_sort(servers: Vec<ServerEntry>) -> Vec<ServerEntry> {
    let mut seen = HashSet::new();
    let mut unique: Vec<ServerEntry> = servers
        .into_iter()
        .filter(|server| seen.insert(server.url.clone()))
        .collect();

    // Stable, so discovery order survives among equal numbers
    unique.sort_by_key(sort_key);
    unique
}

/// Numbered servers too large for `u64` saturate just below `UNNUMBERED`
fn sort_key(server: &ServerEntry) -> u64 {
    server
        .server_number
        .as_deref()
        .map(|n| n.parse().unwrap_or(UNNUMBERED - 1))
        .unwrap_or(UNNUMBERED)
}
