//! HTML parsers for the listing site
//!
//! Contains modules for parsing different page types.

pub mod listing;
pub mod servers;

pub use listing::parse_listing;
pub use servers::parse_server_links;
