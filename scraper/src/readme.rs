use crate::error::ComicError;
use chrono::NaiveDate;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

// The pipeline only ever archives this format
const COMIC_EXTENSION: &str = "png";

const NO_TITLE_FALLBACK: &str = "No title available";

/// The most recently archived comic, resolved from the data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestComic {
    pub date: String,
    pub base_filename: String,
    /// Image path relative to the project root, with spaces escaped as %20
    /// so it can be embedded in a Markdown link.
    pub image_path: String,
    pub title: String,
}

/// Find the most recent comic under `<project_root>/data`.
///
/// Directory names are parsed as dates rather than string-sorted, so the
/// ordering holds even if a name is not zero-padded.
pub fn find_latest_comic(project_root: &Path) -> Result<LatestComic, ComicError> {
    let data_dir = project_root.join("data");

    let entries = fs::read_dir(&data_dir).map_err(|_| ComicError::NotFound {
        path: data_dir.clone(),
    })?;

    // Collect the date directories
    let mut dated_dirs: Vec<(NaiveDate, PathBuf)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        match NaiveDate::parse_from_str(&name, "%Y-%m-%d") {
            Ok(date) => dated_dirs.push((date, path)),
            Err(_) => warn!("ignoring non-date directory {}", path.display()),
        }
    }

    let (date, comic_dir) = dated_dirs
        .into_iter()
        .max_by_key(|(date, _)| *date)
        .ok_or(ComicError::NotFound { path: data_dir })?;

    // Find the archived image in the most recent directory; the archive
    // writer only ever stores one per day
    let image_path = find_comic_image(&comic_dir)?;

    let base_filename = image_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    // Read the title from the metadata sidecar, tolerating its absence
    let metadata_path = comic_dir.join(format!("{}_metadata.txt", base_filename));
    let title = metadata_title(&metadata_path).unwrap_or_else(|| {
        warn!("no metadata title for {}", image_path.display());
        NO_TITLE_FALLBACK.to_string()
    });

    // Relative path from the project root, escaped for Markdown embedding
    let relative = image_path.strip_prefix(project_root).unwrap_or(&image_path);
    let image_path = relative.to_string_lossy().replace(' ', "%20");

    Ok(LatestComic {
        date: date.format("%Y-%m-%d").to_string(),
        base_filename,
        image_path,
        title,
    })
}

fn find_comic_image(comic_dir: &Path) -> Result<PathBuf, ComicError> {
    let entries = fs::read_dir(comic_dir).map_err(|_| ComicError::NotFound {
        path: comic_dir.to_path_buf(),
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == COMIC_EXTENSION) {
            return Ok(path);
        }
    }

    Err(ComicError::NotFound {
        path: comic_dir.to_path_buf(),
    })
}

fn metadata_title(metadata_path: &Path) -> Option<String> {
    let contents = fs::read_to_string(metadata_path).ok()?;
    contents
        .lines()
        .find_map(|line| line.strip_prefix("Title:"))
        .map(|title| title.trim().to_string())
}

/// Render the README for the given comic. Pure; same input, same output.
pub fn render_readme(comic: &LatestComic) -> String {
    format!(
        "# Dinosaur Comics Daily\n\
         \n\
         #### {}\n\
         \n\
         ![{}]({})\n\
         \n\
         **{}**\n\
         \n\
         ---\n\
         \n\
         *This README is automatically updated with the latest Dinosaur Comics comic.*\n",
        comic.date, comic.base_filename, comic.image_path, comic.title
    )
}

/// Regenerate `<project_root>/README.md` from the most recent archived comic.
///
/// The README is fully overwritten; if no comic has been archived yet the
/// existing file is left untouched and `NotFound` is returned.
pub fn update_readme(project_root: &Path) -> Result<LatestComic, ComicError> {
    let comic = find_latest_comic(project_root)?;

    let readme_path = project_root.join("README.md");
    fs::write(&readme_path, render_readme(&comic)).map_err(|source| ComicError::Persist {
        path: readme_path.clone(),
        source,
    })?;

    println!("README updated successfully with comic: {}", comic.base_filename);
    Ok(comic)
}
