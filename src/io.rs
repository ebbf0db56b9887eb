use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader, RgbImage};

use crate::error::{ExtractError, Result};

const INDEX_PLACEHOLDER: &str = "{index}";

/// Load and decode an image from disk
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let unreadable = |source| ExtractError::ImageUnreadable {
        path: path.to_path_buf(),
        source,
    };

    ImageReader::open(path)
        .map_err(|e| unreadable(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| unreadable(image::ImageError::IoError(e)))?
        .decode()
        .map_err(unreadable)
}

/// Create the output directory if it doesn't exist yet
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| ExtractError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Destination for rectified cards
pub trait CardWriter {
    fn write(&self, card: &RgbImage, path: &Path) -> Result<()>;
}

/// Writes cards to the filesystem, format picked from the file extension
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCardWriter;

impl CardWriter for FsCardWriter {
    fn write(&self, card: &RgbImage, path: &Path) -> Result<()> {
        card.save(path).map_err(|source| ExtractError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Output filename template such as `card_{index}.jpg`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePattern {
    prefix: String,
    suffix: String,
}

impl FilenamePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let (prefix, suffix) = pattern.split_once(INDEX_PLACEHOLDER).ok_or_else(|| {
            ExtractError::InvalidConfig(format!(
                "filename pattern must contain {}: {:?}",
                INDEX_PLACEHOLDER, pattern
            ))
        })?;

        if suffix.contains(INDEX_PLACEHOLDER) {
            return Err(ExtractError::InvalidConfig(format!(
                "filename pattern must contain {} only once: {:?}",
                INDEX_PLACEHOLDER, pattern
            )));
        }
        if prefix.contains(['/', '\\']) || suffix.contains(['/', '\\']) {
            return Err(ExtractError::InvalidConfig(format!(
                "filename pattern must be a plain file name: {:?}",
                pattern
            )));
        }

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    pub fn render(&self, index: usize) -> String {
        format!("{}{}{}", self.prefix, index, self.suffix)
    }

    pub fn path_in(&self, folder: &Path, index: usize) -> PathBuf {
        folder.join(self.render(index))
    }
}

impl Default for FilenamePattern {
    fn default() -> Self {
        Self {
            prefix: "card_".to_string(),
            suffix: ".jpg".to_string(),
        }
    }
}
