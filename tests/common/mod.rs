#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from cardcut for tests
pub use cardcut::{
    CardDetector, Contour, DetectionParams, ExtractConfig, ExtractError, OrientedRectangle,
    RectifiedCard, WritePolicy,
};
