//! Command-line and environment configuration

use std::net::SocketAddr;

use clap::Parser;
use filmyzilla_core::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SOURCES_URL, ScraperConfig};

/// Runtime settings for the API server
///
/// Every flag can also be set through its `FILMYZILLA_*` environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "filmyzilla-server")]
#[command(about = "JSON API serving filmyzilla listings and download servers", version)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "FILMYZILLA_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Homepage of the listing site
    #[arg(long, env = "FILMYZILLA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// JSON document whose `primary` field names the server-link page
    #[arg(long, env = "FILMYZILLA_SOURCES_URL", default_value = DEFAULT_SOURCES_URL)]
    pub sources_url: String,

    /// Outbound request timeout in seconds, 0 disables it
    #[arg(long, env = "FILMYZILLA_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Scraper settings derived from these flags
    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            base_url: self.base_url.clone(),
            sources_url: self.sources_url.clone(),
            client: ClientConfig {
                timeout_secs: (self.timeout_secs > 0).then_some(self.timeout_secs),
                ..ClientConfig::default()
            },
        }
    }
}
