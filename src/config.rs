use std::path::PathBuf;

use crate::error::{ExtractError, Result};
use crate::io::FilenamePattern;

pub const DEFAULT_MIN_AREA_FRACTION: f64 = 0.0075;
pub const DEFAULT_FILENAME_PATTERN: &str = "card_{index}.jpg";

/// What to do when a single card cannot be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Log the failure, record it in the report and keep going
    #[default]
    BestEffort,
    /// Abort the run on the first failed write
    Strict,
}

/// Tunables of the detection stages
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionParams {
    /// Contours must enclose more than this fraction of the image area
    pub min_area_fraction: f64,
    /// Side of the square Gaussian kernel used for denoising (odd)
    pub blur_kernel: usize,
    /// Neighbourhood size of the adaptive threshold (odd)
    pub block_size: usize,
    /// Constant subtracted from the local mean
    pub offset: f32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            min_area_fraction: DEFAULT_MIN_AREA_FRACTION,
            blur_kernel: 5,
            block_size: 11,
            offset: 2.0,
        }
    }
}

impl DetectionParams {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.min_area_fraction) {
            return Err(ExtractError::InvalidConfig(format!(
                "min area fraction must be in [0, 1), got {}",
                self.min_area_fraction
            )));
        }
        for (name, size) in [("blur kernel", self.blur_kernel), ("block size", self.block_size)] {
            if size < 3 || size % 2 == 0 {
                return Err(ExtractError::InvalidConfig(format!(
                    "{} must be odd and at least 3, got {}",
                    name, size
                )));
            }
        }
        Ok(())
    }
}

/// Everything one extraction run needs
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub input_path: PathBuf,
    pub output_folder: PathBuf,
    pub filename_pattern: String,
    pub write_policy: WritePolicy,
    pub detection: DetectionParams,
    /// Save intermediate stages here when set
    pub debug_dir: Option<PathBuf>,
}

impl ExtractConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_folder: output_folder.into(),
            filename_pattern: DEFAULT_FILENAME_PATTERN.to_string(),
            write_policy: WritePolicy::default(),
            detection: DetectionParams::default(),
            debug_dir: None,
        }
    }

    pub fn with_min_area_fraction(mut self, fraction: f64) -> Self {
        self.detection.min_area_fraction = fraction;
        self
    }

    pub fn with_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filename_pattern = pattern.into();
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_debug(mut self, debug_dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(debug_dir.into());
        self
    }

    /// Check the configuration and parse the filename pattern
    pub fn validate(&self) -> Result<FilenamePattern> {
        self.detection.validate()?;
        FilenamePattern::parse(&self.filename_pattern)
    }
}
