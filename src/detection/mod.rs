pub mod preprocessing;
pub mod contours;
pub mod geometry;
pub mod rectify;

use image::{DynamicImage, GrayImage, RgbImage};
use log::{debug, warn};

use crate::config::DetectionParams;
use crate::models::{CardCandidate, RectifiedCard};
use preprocessing::Binarized;

/// Card detection orchestrator: binarize, find contours, filter by area,
/// fit rectangles and rectify
#[derive(Debug, Clone, Default)]
pub struct CardDetector {
    pub params: DetectionParams,
}

impl CardDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: DetectionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_min_area_fraction(mut self, fraction: f64) -> Self {
        self.params.min_area_fraction = fraction;
        self
    }

    /// Run the binarization stage only
    pub fn binarize(&self, img: &DynamicImage) -> Binarized {
        preprocessing::binarize(img, &self.params)
    }

    /// Contours of `mask` large enough to be a card, largest first, each
    /// with its fitted rectangle
    pub fn candidates_from_mask(&self, mask: &GrayImage) -> Vec<CardCandidate> {
        let (width, height) = mask.dimensions();
        let min_area = self.params.min_area_fraction * width as f64 * height as f64;

        let mut scored: Vec<_> = contours::find_external_contours(mask)
            .into_iter()
            .map(|contour| (geometry::contour_area(&contour), contour))
            .collect();
        let total = scored.len();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let candidates: Vec<CardCandidate> = scored
            .into_iter()
            .take_while(|(area, _)| *area > min_area)
            .map(|(area, contour)| CardCandidate {
                rect: geometry::min_area_rect(&contour),
                contour,
                area,
            })
            .collect();

        debug!(
            "{} contours found, {} above area threshold {:.1}",
            total,
            candidates.len(),
            min_area
        );
        candidates
    }

    /// Detect candidates in a full image
    pub fn candidates(&self, img: &DynamicImage) -> Vec<CardCandidate> {
        let binarized = self.binarize(img);
        self.candidates_from_mask(&binarized.mask)
    }

    /// Rectify candidates in order, skipping degenerate ones. Indices are
    /// assigned to the survivors only, so they stay contiguous.
    pub fn rectify_candidates(
        &self,
        img: &RgbImage,
        candidates: &[CardCandidate],
    ) -> Vec<RectifiedCard> {
        candidates
            .iter()
            .filter_map(|candidate| match rectify::rectify(img, &candidate.rect) {
                Ok(image) => Some((candidate, image)),
                Err(e) => {
                    warn!(
                        "Skipping candidate at ({:.1}, {:.1}), area {:.1}: {}",
                        candidate.rect.center.0, candidate.rect.center.1, candidate.area, e
                    );
                    None
                }
            })
            .enumerate()
            .map(|(index, (candidate, image))| RectifiedCard {
                index,
                image,
                rect: candidate.rect,
                area: candidate.area,
            })
            .collect()
    }

    /// Run the whole detection on an image. No cards is an empty result.
    pub fn detect(&self, img: &DynamicImage) -> Vec<RectifiedCard> {
        let candidates = self.candidates(img);
        self.rectify_candidates(&img.to_rgb8(), &candidates)
    }
}
