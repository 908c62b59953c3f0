// Export the scraper and readme modules
pub mod error;
pub mod readme;
pub mod scraper;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::error::ComicError;
pub use crate::readme::{find_latest_comic, render_readme, update_readme, LatestComic};
pub use crate::scraper::{
    daily_directory, extract_comic_data, fetch_html, fetch_image, file_extension, project_root,
    sanitize_filename, save_comic, scrape_comic, ComicRecord, QWANTZ_BASE_URL,
};
