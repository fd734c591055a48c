//! Debug script to inspect what the live homepage parses into

use filmyzilla_core::{FilmyzillaClient, DEFAULT_BASE_URL, parse_listing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let origin = filmyzilla_core::origin_of(&base_url)?;

    println!("Fetching {}...\n", base_url);

    let client = FilmyzillaClient::new()?;
    let html = client.fetch_html(&base_url).await?;

    // Save HTML to file for inspection
    std::fs::write("debug_homepage.html", &html)?;
    println!("HTML saved to debug_homepage.html");

    let categories = parse_listing(&html, &origin)?;
    println!("\n=== {} categories ===\n", categories.len());
    for category in &categories {
        println!("{} -> {}", category.category, category.category_url);
        for movie in &category.movies {
            println!("    [{}] {} -> {}", movie.quality, movie.title, movie.url);
        }
    }

    Ok(())
}
