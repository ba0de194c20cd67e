//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, GDAL, JSON, and image-encode errors, and provides
//! semantic variants for each pipeline failure class.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Malformed identifier: {id} (expected a {expected} token)")]
    MalformedIdentifier { id: String, expected: &'static str },

    #[error("Failed to read raster {path}: {source}")]
    RasterRead {
        path: PathBuf,
        source: gdal::errors::GdalError,
    },

    #[error("Failed to write raster {path}: {source}")]
    RasterWrite {
        path: PathBuf,
        source: gdal::errors::GdalError,
    },

    #[error("Invalid value range in {context}: {reason}")]
    InvalidRange {
        context: String,
        reason: &'static str,
    },

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Missing asset: {path}")]
    MissingAsset { path: PathBuf },

    #[error("External process {program} exited with {status}")]
    ExternalProcess { program: String, status: String },
}

impl Error {
    pub fn config<E: std::fmt::Display>(e: E) -> Self {
        Error::Config(e.to_string())
    }
}
