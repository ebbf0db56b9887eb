use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb};
use imageproc::drawing::draw_line_segment_mut;
use log::{debug, info, warn};

use crate::config::{ExtractConfig, WritePolicy};
use crate::detection::CardDetector;
use crate::detection::preprocessing::Binarized;
use crate::error::{ExtractError, Result};
use crate::io::{self, CardWriter};
use crate::models::CardCandidate;

/// Outcome of one extraction run
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Number of cards that survived detection and rectification
    pub cards_detected: usize,
    /// Files written, in index order
    pub written: Vec<PathBuf>,
    /// Cards that could not be written (best-effort mode only)
    pub failed: Vec<(PathBuf, String)>,
}

/// Read the input image, detect and rectify every card and hand each one to
/// `writer` under `{output_folder}/{pattern}`.
///
/// An unreadable input or invalid configuration aborts before anything is
/// written. Write failures follow `config.write_policy`. Debug stage output
/// is best effort: a failed dump is logged and the run carries on.
pub fn extract_cards<W: CardWriter + ?Sized>(
    config: &ExtractConfig,
    writer: &W,
) -> Result<ExtractionReport> {
    let pattern = config.validate()?;

    info!("Loading image: {}", config.input_path.display());
    let img = io::load_image(&config.input_path)?;
    debug!("Image loaded: {}x{}", img.width(), img.height());

    io::ensure_output_dir(&config.output_folder)?;

    let detector = CardDetector::new().with_params(config.detection.clone());
    let binarized = detector.binarize(&img);
    let candidates = detector.candidates_from_mask(&binarized.mask);

    if let Some(debug_dir) = &config.debug_dir {
        if let Err(e) = save_debug_stages(debug_dir, &img, &binarized, &candidates) {
            warn!("Debug output not saved: {}", e);
        }
    }

    let cards = detector.rectify_candidates(&img.to_rgb8(), &candidates);
    let mut report = ExtractionReport {
        cards_detected: cards.len(),
        ..Default::default()
    };

    for card in cards {
        let path = pattern.path_in(&config.output_folder, card.index);
        match writer.write(&card.image, &path) {
            Ok(()) => {
                info!("Card {} saved as {}", card.index, path.display());
                report.written.push(path);
            }
            Err(e) => match config.write_policy {
                WritePolicy::Strict => return Err(e),
                WritePolicy::BestEffort => {
                    warn!("Card {} not saved: {}", card.index, e);
                    report.failed.push((path, e.to_string()));
                }
            },
        }
    }

    Ok(report)
}

/// Save the intermediate stages of a run for inspection
fn save_debug_stages(
    dir: &Path,
    input: &DynamicImage,
    binarized: &Binarized,
    candidates: &[CardCandidate],
) -> Result<()> {
    io::ensure_output_dir(dir)?;

    let save = |name: &str, img: &DynamicImage| -> Result<()> {
        let path = dir.join(name);
        img.save(&path).map_err(|source| ExtractError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Debug: saved {}", path.display());
        Ok(())
    };

    save("00_input.png", input)?;
    save("01_grayscale.png", &DynamicImage::ImageLuma8(binarized.gray.clone()))?;
    save("02_blurred.png", &DynamicImage::ImageLuma8(binarized.blurred.clone()))?;
    save("03_mask.png", &DynamicImage::ImageLuma8(binarized.mask.clone()))?;

    let mut overlay = input.to_rgb8();
    for candidate in candidates {
        let corners = candidate.rect.corners();
        for i in 0..corners.len() {
            let next = corners[(i + 1) % corners.len()];
            draw_line_segment_mut(&mut overlay, corners[i], next, Rgb([255, 0, 0]));
        }
    }
    save("04_candidates.png", &DynamicImage::ImageRgb8(overlay))
}
