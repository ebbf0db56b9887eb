use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unable to read input image {path}: {source}")]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Degenerate rectangle: {0}")]
    DegenerateRectangle(String),

    #[error("Failed to write card to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
