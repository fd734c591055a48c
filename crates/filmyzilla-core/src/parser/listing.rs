//! Homepage listing parser
//!
//! Extracts categories and their inline movies from the homepage.
//!
//! Each update block is tried with a pattern over its serialized markup
//! first. Only when that yields no movies does the DOM walk run; the two
//! strategies are never blended.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{FilmyzillaError, Result};
use crate::types::{CategoryEntry, MovieEntry};
use crate::url::normalize_url;

/// Quality assigned by the DOM walk when no label is found
pub const UNKNOWN_QUALITY: &str = "Unknown";

/// `(movie link, green "[quality]" label)` pair in serialized markup
const MOVIE_PATTERN: &str = r#"(?i)<a href="([^"]*/movies?/[^"]*)"[^>]*>([^<]+)</a>\s*<font[^>]*color="green"[^>]*>\[([^\]]+)\]</font>"#;

/// Number of element siblings scanned for a quality label
const QUALITY_LOOKAHEAD: usize = 3;

/// Raw movie data pulled out of markup before cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
struct MovieCandidate {
    href: String,
    title: String,
    quality: Option<String>,
}

/// Parses homepage HTML into categories
///
/// # Arguments
/// * `html` - Raw homepage HTML
/// * `origin` - Homepage origin used to absolutize relative links
///
/// # Returns
/// Update-block categories with at least one movie, in document order,
/// followed by touch-block categories with empty movie lists
///
/// # Errors
/// Returns `ParseError` if a selector or the movie pattern fails to compile
pub fn parse_listing(html: &str, origin: &str) -> Result<Vec<CategoryEntry>> {
    let document = Html::parse_document(html);

    let update_selector = selector(".update")?;
    let touch_selector = selector(".touch")?;
    let header_link_selector = selector(".black a")?;
    let link_selector = selector("a")?;
    let movie_pattern = Regex::new(MOVIE_PATTERN)
        .map_err(|e| FilmyzillaError::ParseError(format!("Invalid movie pattern: {}", e)))?;

    let mut categories = Vec::new();

    for block in document.select(&update_selector) {
        let Some(header) = block.select(&header_link_selector).next() else {
            continue;
        };
        let Some((category, category_url)) = category_link(&header, origin) else {
            continue;
        };

        let mut movies = normalize_movies(extract_by_pattern(&block, &movie_pattern), origin);
        if movies.is_empty() {
            movies = normalize_movies(extract_by_walk(&block, &link_selector), origin);
            debug!(
                category = %category,
                found = movies.len(),
                "pattern matched nothing, used DOM walk"
            );
        }

        if movies.is_empty() {
            continue;
        }

        categories.push(CategoryEntry {
            category,
            category_url,
            movies,
        });
    }

    for block in document.select(&touch_selector) {
        let Some(link) = block.select(&link_selector).next() else {
            continue;
        };
        if let Some((category, category_url)) = category_link(&link, origin) {
            categories.push(CategoryEntry {
                category,
                category_url,
                movies: Vec::new(),
            });
        }
    }

    Ok(categories)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| FilmyzillaError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}

/// Name and absolute URL of a category link; `None` if either is empty
fn category_link(link: &ElementRef, origin: &str) -> Option<(String, String)> {
    let name = link.text().collect::<String>().trim().to_string();
    let href = link.value().attr("href").map(str::trim).unwrap_or_default();

    if name.is_empty() || href.is_empty() {
        return None;
    }

    Some((name, normalize_url(href, origin)))
}

/// Primary strategy: match `(link, [quality])` pairs in the block's markup
fn extract_by_pattern(block: &ElementRef, pattern: &Regex) -> Vec<MovieCandidate> {
    let markup = block.inner_html();

    pattern
        .captures_iter(&markup)
        .map(|caps| MovieCandidate {
            href: decode_html_entities(&caps[1]),
            title: decode_html_entities(&caps[2]),
            quality: Some(decode_html_entities(&caps[3])),
        })
        .collect()
}

/// Fallback strategy: walk every movie-shaped link in the block
fn extract_by_walk(block: &ElementRef, link_selector: &Selector) -> Vec<MovieCandidate> {
    block
        .select(link_selector)
        .filter(|link| !inside_category_header(link, block))
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            if !href.contains("/movie") {
                return None;
            }
            Some(MovieCandidate {
                href: href.to_string(),
                title: link.text().collect(),
                quality: find_quality_label(&link),
            })
        })
        .collect()
}

/// True when the link sits under a `.black` element within the block
fn inside_category_header(link: &ElementRef, block: &ElementRef) -> bool {
    link.ancestors()
        .take_while(|node| node.id() != block.id())
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().classes().any(|class| class == "black"))
}

/// Scans the next few element siblings for `<font color="green">[label]</font>`
fn find_quality_label(link: &ElementRef) -> Option<String> {
    link.next_siblings()
        .filter_map(ElementRef::wrap)
        .take(QUALITY_LOOKAHEAD)
        .find(|el| {
            el.value().name().eq_ignore_ascii_case("font")
                && el
                    .value()
                    .attr("color")
                    .is_some_and(|color| color.trim().eq_ignore_ascii_case("green"))
        })
        .map(|label| {
            label
                .text()
                .collect::<String>()
                .replace(['[', ']'], "")
                .trim()
                .to_string()
        })
}

fn normalize_movies(candidates: Vec<MovieCandidate>, origin: &str) -> Vec<MovieEntry> {
    candidates
        .into_iter()
        .filter_map(|candidate| normalize_movie(candidate, origin))
        .collect()
}

/// Cleans up a candidate; `None` when title or href is blank
fn normalize_movie(candidate: MovieCandidate, origin: &str) -> Option<MovieEntry> {
    let title = candidate.title.trim();
    let href = candidate.href.trim();
    if title.is_empty() || href.is_empty() {
        return None;
    }

    // A label that was found but is blank stays blank
    let quality = match candidate.quality {
        Some(q) => q.trim().to_string(),
        None => UNKNOWN_QUALITY.to_string(),
    };

    Some(MovieEntry {
        title: title.to_string(),
        url: normalize_url(href, origin),
        quality,
    })
}

/// Decodes the entities the HTML serializer emits
fn decode_html_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
