//! Main scraper API
//!
//! Combines the HTTP client with the parsers. Every call performs its own
//! fetch-and-parse cycle; nothing is cached between calls.

use tracing::{debug, info};

use crate::client::{ClientConfig, FilmyzillaClient};
use crate::error::{FilmyzillaError, Result};
use crate::parser::{parse_listing, parse_server_links};
use crate::types::{CategoryEntry, ServerListing, ServerPage};
use crate::url::{DEFAULT_BASE_URL, origin_of, validate_page_url};

/// Default location of the indirection document
pub const DEFAULT_SOURCES_URL: &str =
    "https://raw.githubusercontent.com/username/repo/main/sources.json";

/// Configuration for [`FilmyzillaScraper`]
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Homepage of the listing site
    pub base_url: String,
    /// URL of the JSON document naming the live mirror
    pub sources_url: String,
    /// HTTP client settings
    pub client: ClientConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sources_url: DEFAULT_SOURCES_URL.to_string(),
            client: ClientConfig::default(),
        }
    }
}

/// Main scraper API
///
/// Holds no per-request state; it can be shared freely between
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct FilmyzillaScraper {
    client: FilmyzillaClient,
    base_url: String,
    origin: String,
    sources_url: String,
}

impl FilmyzillaScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new scraper with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` if `base_url` or `sources_url` is not an absolute http(s) URL
    /// - `HttpError` if HTTP client initialization fails
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let origin = origin_of(&config.base_url)?;
        validate_page_url(&config.sources_url)?;
        let client = FilmyzillaClient::with_config(config.client)?;

        Ok(Self {
            client,
            base_url: config.base_url,
            origin,
            sources_url: config.sources_url,
        })
    }

    /// Homepage URL this scraper lists categories from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the homepage and extract its categories
    ///
    /// # Returns
    /// Categories with inline movies first, then link-only categories
    ///
    /// # Errors
    /// - `HttpError` / `UpstreamStatus` if the homepage cannot be fetched
    /// - `ParseError` if the parser cannot be set up
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> filmyzilla_core::Result<()> {
    /// use filmyzilla_core::FilmyzillaScraper;
    /// let scraper = FilmyzillaScraper::new()?;
    /// for category in scraper.list_categories().await? {
    ///     println!("{} ({} movies)", category.category, category.movies.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_categories(&self) -> Result<Vec<CategoryEntry>> {
        let html = self.client.fetch_html(&self.base_url).await?;
        let categories = parse_listing(&html, &self.origin)?;

        info!(
            categories = categories.len(),
            movies = categories.iter().map(|c| c.movies.len()).sum::<usize>(),
            "scraped homepage listing"
        );
        Ok(categories)
    }

    /// Fetch the indirection document and return its validated `primary` URL
    ///
    /// # Errors
    /// - `HttpError` / `UpstreamStatus` if the document cannot be fetched
    /// - `InvalidSource` if it is malformed or `primary` is not an absolute http(s) URL
    pub async fn resolve_primary_source(&self) -> Result<String> {
        let sources = self.client.fetch_sources(&self.sources_url).await?;
        let primary = sources.primary.trim();

        validate_page_url(primary)
            .map_err(|e| FilmyzillaError::InvalidSource(format!("primary: {}", e)))?;

        debug!(primary, "resolved primary source");
        Ok(primary.to_string())
    }

    /// Fetch a target page and extract its download-server links
    ///
    /// # Arguments
    /// * `target` - Page to scrape; when `None` the page named by the
    ///   indirection document is used
    ///
    /// # Errors
    /// - `InvalidUrl` if `target` is not an absolute http(s) URL
    /// - `InvalidSource` if the indirection document is unusable
    /// - `HttpError` / `UpstreamStatus` if any fetch fails
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> filmyzilla_core::Result<()> {
    /// use filmyzilla_core::FilmyzillaScraper;
    /// let scraper = FilmyzillaScraper::new()?;
    /// let page = scraper.list_servers(None).await?;
    /// for server in &page.listing.servers {
    ///     println!("{}: {}", server.title, server.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_servers(&self, target: Option<&str>) -> Result<ServerPage> {
        let source_url = match target {
            Some(url) => {
                validate_page_url(url)?;
                url.trim().to_string()
            }
            None => self.resolve_primary_source().await?,
        };

        let html = self.client.fetch_html(&source_url).await?;
        let servers = parse_server_links(&html, &source_url)?;

        info!(
            source = %source_url,
            servers = servers.len(),
            "scraped server links"
        );
        Ok(ServerPage {
            source_url,
            listing: ServerListing::from(servers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HOMEPAGE: &str = r#"
        <html><body>
            <div class="update">
                <div class="black"><a href="/category/1/latest.html">Latest Updates</a></div>
                <a href="/movies/x">Foo</a> <font color="green">[720p]</font><br>
            </div>
            <div class="touch"><a href="/category/5/hollywood.html">Hollywood</a></div>
        </body></html>
    "#;

    const SERVER_PAGE: &str = r#"
        <html><body>
            <a class="newdl" href="/downloads/b">Download Now - Server 2</a>
            <a class="newdl" href="/downloads/a">Download Now - Server 1</a>
        </body></html>
    "#;

    fn scraper_for(server: &MockServer) -> FilmyzillaScraper {
        FilmyzillaScraper::with_config(ScraperConfig {
            base_url: format!("{}/", server.uri()),
            sources_url: format!("{}/sources.json", server.uri()),
            client: ClientConfig::default(),
        })
        .unwrap()
    }

    async fn mount_page(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_scraper_creation() {
        let scraper = FilmyzillaScraper::new();
        assert!(scraper.is_ok());
        assert_eq!(scraper.unwrap().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_scraper_rejects_relative_base_url() {
        let result = FilmyzillaScraper::with_config(ScraperConfig {
            base_url: "www.filmyzilla13.com".to_string(),
            ..ScraperConfig::default()
        });
        assert!(matches!(result, Err(FilmyzillaError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_list_categories_uses_homepage_origin() {
        let server = MockServer::start().await;
        mount_page(&server, "/", HOMEPAGE).await;

        let categories = scraper_for(&server).list_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].movies[0].url, format!("{}/movies/x", server.uri()));
        assert_eq!(
            categories[1].category_url,
            format!("{}/category/5/hollywood.html", server.uri())
        );
        assert!(categories[1].movies.is_empty());
    }

    #[tokio::test]
    async fn test_list_categories_propagates_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = scraper_for(&server).list_categories().await;
        assert!(matches!(
            result,
            Err(FilmyzillaError::UpstreamStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_list_servers_resolves_primary_source() {
        let server = MockServer::start().await;
        let target = format!("{}/movie/abc", server.uri());
        mount_page(
            &server,
            "/sources.json",
            &format!(r#"{{"primary":"{}"}}"#, target),
        )
        .await;
        mount_page(&server, "/movie/abc", SERVER_PAGE).await;

        let page = scraper_for(&server).list_servers(None).await.unwrap();
        assert_eq!(page.source_url, target);
        assert_eq!(page.listing.total_servers, 2);
        assert_eq!(page.listing.servers[0].title, "Server 1");
        assert_eq!(
            page.listing.servers[0].url,
            format!("{}/downloads/a", server.uri())
        );
    }

    #[tokio::test]
    async fn test_list_servers_uses_explicit_target() {
        let server = MockServer::start().await;
        mount_page(&server, "/movie/explicit", SERVER_PAGE).await;
        Mock::given(method("GET"))
            .and(path("/sources.json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let target = format!("{}/movie/explicit", server.uri());
        let page = scraper_for(&server)
            .list_servers(Some(target.as_str()))
            .await
            .unwrap();
        assert_eq!(page.source_url, target);
        assert_eq!(page.listing.servers.len(), 2);
    }

    #[tokio::test]
    async fn test_list_servers_echoes_target_verbatim() {
        let server = MockServer::start().await;
        mount_page(&server, "/", SERVER_PAGE).await;

        // No trailing slash; the echoed URL must not gain one
        let target = server.uri();
        let padded = format!("  {}  ", target);
        let page = scraper_for(&server)
            .list_servers(Some(padded.as_str()))
            .await
            .unwrap();
        assert_eq!(page.source_url, target);
        assert_eq!(page.listing.total_servers, 2);
    }

    #[tokio::test]
    async fn test_list_servers_rejects_relative_target() {
        let server = MockServer::start().await;
        let result = scraper_for(&server).list_servers(Some("/movie/abc")).await;
        assert!(matches!(result, Err(FilmyzillaError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_resolve_rejects_non_http_primary() {
        let server = MockServer::start().await;
        mount_page(&server, "/sources.json", r#"{"primary":"ftp://mirror.example"}"#).await;

        let result = scraper_for(&server).resolve_primary_source().await;
        match result {
            Err(FilmyzillaError::InvalidSource(msg)) => assert!(msg.starts_with("primary")),
            other => panic!("Expected InvalidSource error, got {:?}", other),
        }
    }
}
