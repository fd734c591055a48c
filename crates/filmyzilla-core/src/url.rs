//! URL helper functions
//!
//! Provides origin extraction, validation of externally supplied page URLs,
//! and absolutizing of hrefs scraped from markup.

use ::url::Url;

use crate::error::{FilmyzillaError, Result};

/// Default homepage of the listing site
pub const DEFAULT_BASE_URL: &str = "https://www.filmyzilla13.com";

/// Validates that `url` is an absolute http(s) URL with a host
///
/// # Arguments
/// * `url` - URL string supplied by the indirection document or a caller
///
/// # Returns
/// The parsed URL
///
/// # Errors
/// Returns `InvalidUrl` for relative URLs, other schemes, or missing hosts
///
/// # Example
/// ```
/// use filmyzilla_core::url::validate_page_url;
/// assert!(validate_page_url("https://mirror.example/movie/1").is_ok());
/// assert!(validate_page_url("/movie/1").is_err());
/// ```
pub fn validate_page_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| FilmyzillaError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FilmyzillaError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url,
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(FilmyzillaError::InvalidUrl(format!("{}: missing host", url)));
    }

    Ok(parsed)
}

/// Returns the origin (scheme, host and non-default port) of a page URL
///
/// # Example
/// ```
/// use filmyzilla_core::url::origin_of;
/// let origin = origin_of("https://www.filmyzilla13.com/page/2?x=1").unwrap();
/// assert_eq!(origin, "https://www.filmyzilla13.com");
/// ```
pub fn origin_of(url: &str) -> Result<String> {
    let parsed = validate_page_url(url)?;
    Ok(parsed.origin().ascii_serialization())
}

/// Rewrites a scraped href to an absolute URL on `origin`
///
/// Absolute http(s) hrefs are returned unchanged. Protocol-relative hrefs
/// get `https:`. Anything else is joined to the origin with a single `/`.
///
/// # Example
/// ```
/// use filmyzilla_core::url::normalize_url;
/// let url = normalize_url("/movies/x", "https://www.filmyzilla13.com");
/// assert_eq!(url, "https://www.filmyzilla13.com/movies/x");
/// ```
pub fn normalize_url(href: &str, origin: &str) -> String {
    let href = href.trim();

    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{}", rest);
    }

    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.filmyzilla13.com";

    #[test]
    fn test_normalize_relative_path() {
        let url = normalize_url("/movies/x", ORIGIN);
        assert_eq!(url, "https://www.filmyzilla13.com/movies/x");
    }

    #[test]
    fn test_normalize_path_without_leading_slash() {
        let url = normalize_url("category/12/bollywood.html", ORIGIN);
        assert_eq!(url, "https://www.filmyzilla13.com/category/12/bollywood.html");
    }

    #[test]
    fn test_normalize_keeps_absolute_url() {
        let url = normalize_url("https://cdn.example/downloads/abc", ORIGIN);
        assert_eq!(url, "https://cdn.example/downloads/abc");

        let url = normalize_url("http://plain.example/server/1", ORIGIN);
        assert_eq!(url, "http://plain.example/server/1");
    }

    #[test]
    fn test_normalize_protocol_relative() {
        let url = normalize_url("//cdn.example/server/3", ORIGIN);
        assert_eq!(url, "https://cdn.example/server/3");
    }

    #[test]
    fn test_normalize_origin_with_trailing_slash() {
        let url = normalize_url("/downloads/abc", "https://mirror.example/");
        assert_eq!(url, "https://mirror.example/downloads/abc");
    }

    #[test]
    fn test_origin_of_strips_path_and_query() {
        let origin = origin_of("https://mirror.example/movie/abc?page=2").unwrap();
        assert_eq!(origin, "https://mirror.example");
    }

    #[test]
    fn test_origin_of_keeps_custom_port() {
        let origin = origin_of("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(origin, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_validate_rejects_relative() {
        let result = validate_page_url("/downloads/abc");
        assert!(matches!(result, Err(FilmyzillaError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        let result = validate_page_url("ftp://mirror.example/file");
        match result {
            Err(FilmyzillaError::InvalidUrl(msg)) => assert!(msg.contains("ftp")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }
}
