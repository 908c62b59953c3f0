use crate::error::ComicError;
use chrono::Local;
use log::debug;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};

/// Origin the daily comic is scraped from.
pub const QWANTZ_BASE_URL: &str = "https://www.qwantz.com/";

// Characters that are invalid in filenames. The dot is included so
// extensions cannot end up embedded mid-name.
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>', '.'];

/// The comic extracted from a single page: the absolute image URL and the
/// title text, which falls back to "unknown" when the page omits it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComicRecord {
    pub image_url: String,
    pub title: String,
}

pub fn fetch_html(url: &str) -> Result<String, ComicError> {
    let client = Client::new();
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|source| ComicError::Fetch {
            url: url.to_string(),
            source,
        })?;

    response.text().map_err(|source| ComicError::Fetch {
        url: url.to_string(),
        source,
    })
}

pub fn fetch_image(url: &str) -> Result<Vec<u8>, ComicError> {
    let client = Client::new();
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|source| ComicError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let bytes = response.bytes().map_err(|source| ComicError::Fetch {
        url: url.to_string(),
        source,
    })?;

    Ok(bytes.to_vec())
}

/// Extract the comic image URL and title from the fetched page.
///
/// Relative image sources are resolved against `base_url`.
pub fn extract_comic_data(html: &str, base_url: &str) -> Result<ComicRecord, ComicError> {
    let document = Html::parse_document(html);

    // Find the comic image
    let comic_selector = Selector::parse("img.comic").unwrap();
    let comic_img =
        document
            .select(&comic_selector)
            .next()
            .ok_or_else(|| ComicError::Extraction {
                reason: "no comic image element on page".to_string(),
            })?;

    let image_src = comic_img
        .value()
        .attr("src")
        .filter(|src| !src.is_empty())
        .ok_or_else(|| ComicError::Extraction {
            reason: "comic image has no source attribute".to_string(),
        })?;

    // Construct the full URL
    let image_url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        image_src.trim_start_matches('/')
    );

    // The title lives in the image's title attribute; strips are
    // occasionally posted without one
    let title = comic_img
        .value()
        .attr("title")
        .unwrap_or("unknown")
        .to_string();

    Ok(ComicRecord { image_url, title })
}

/// Remove characters that are invalid in filenames.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !INVALID_FILENAME_CHARS.contains(c))
        .collect()
}

/// Extract the file extension from a URL, stripping any query string.
pub fn file_extension(url: &str) -> &str {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let after_dot = segment.rsplit('.').next().unwrap_or(segment);
    after_dot.split('?').next().unwrap_or(after_dot)
}

/// Write the comic image and its metadata sidecar into `directory`.
///
/// The metadata file is only written after the image write succeeds, so a
/// failure never leaves a sidecar without an image. Returns the base
/// filename shared by both files.
pub fn save_comic(
    record: &ComicRecord,
    image_bytes: &[u8],
    directory: &Path,
) -> Result<String, ComicError> {
    // Derive the base filename from the image URL
    let image_filename = record.image_url.rsplit('/').next().unwrap_or(&record.image_url);
    let stem = match image_filename.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => image_filename,
    };
    let base_filename = sanitize_filename(stem);
    let extension = file_extension(&record.image_url);

    // Save the image, byte for byte as fetched
    let image_path = directory.join(format!("{}.{}", base_filename, extension));
    fs::write(&image_path, image_bytes).map_err(|source| ComicError::Persist {
        path: image_path.clone(),
        source,
    })?;
    debug!("wrote image to {}", image_path.display());

    // Save the metadata sidecar
    let metadata_path = directory.join(format!("{}_metadata.txt", base_filename));
    let metadata = format!("Title: {}\nImage URL: {}\n", record.title, record.image_url);
    fs::write(&metadata_path, metadata).map_err(|source| ComicError::Persist {
        path: metadata_path.clone(),
        source,
    })?;
    debug!("wrote metadata to {}", metadata_path.display());

    Ok(base_filename)
}

/// Create (if needed) and return today's dated directory under `data_root`.
pub fn daily_directory(data_root: &Path) -> Result<PathBuf, ComicError> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let directory = data_root.join(date);

    fs::create_dir_all(&directory).map_err(|source| ComicError::Persist {
        path: directory.clone(),
        source,
    })?;

    Ok(directory)
}

/// Repository root: the parent of this crate's manifest directory.
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf()
}

/// Download the current comic from `base_url` and archive it in `data_dir`.
///
/// Runs the whole pipeline: fetch the page, extract the comic record, fetch
/// the image, and persist image plus metadata. Stops at the first failure.
pub fn scrape_comic(base_url: &str, data_dir: &Path) -> Result<String, ComicError> {
    println!("Navigating to {}...", base_url);

    let html = fetch_html(base_url)?;
    let record = extract_comic_data(&html, base_url)?;
    debug!("extracted {:?}", record);

    println!("Downloading image from {}...", record.image_url);
    let image_bytes = fetch_image(&record.image_url)?;

    let base_filename = save_comic(&record, &image_bytes, data_dir)?;

    println!("Successfully downloaded current comic: {}", base_filename);
    println!("Title: {}", record.title);

    Ok(base_filename)
}
