use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure cases for the scrape and readme pipelines.
///
/// Each variant carries what was being attempted so binaries and tests can
/// tell failure causes apart without parsing printed text.
#[derive(Debug, Error)]
pub enum ComicError {
    /// Network error or non-success HTTP status while fetching the page or image.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The fetched page did not contain a usable comic image element.
    #[error("could not extract comic data: {reason}")]
    Extraction { reason: String },

    /// Writing the image, metadata, or README to disk failed.
    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No archived comic exists to build a summary from.
    #[error("no archived comic found under {}", path.display())]
    NotFound { path: PathBuf },
}
