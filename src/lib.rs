pub mod config;
pub mod detection;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;

pub use config::{DetectionParams, ExtractConfig, WritePolicy};
pub use detection::CardDetector;
pub use error::{ExtractError, Result};
pub use io::{CardWriter, FilenamePattern, FsCardWriter};
pub use models::{CardCandidate, Contour, CornerSet, OrientedRectangle, RectifiedCard};
pub use pipeline::{ExtractionReport, extract_cards};
