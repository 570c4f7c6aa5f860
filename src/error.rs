//! Error types for the content core

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading the post manifest
///
/// [`crate::content::ManifestReader`] turns these into an empty manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures retrieving a post body
///
/// [`crate::content::ContentLoader`] turns these into a metadata-only post.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Refusing to load {0:?}: not a plain file name")]
    InvalidFilename(String),

    #[error("Failed to fetch {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to fetch {url}: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("Content not found: {0}")]
    NotFound(String),
}

/// Failures rendering a page template
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}
