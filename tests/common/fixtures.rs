use std::cell::RefCell;
use std::path::{Path, PathBuf};

use cardcut::{CardWriter, ExtractError};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};

/// Axis-aligned rectangle as (x, y, width, height)
pub type Rect = (u32, u32, u32, u32);

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Black canvas with white filled rectangles
pub fn cards_image(width: u32, height: u32, rects: &[Rect]) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let inside = rects
            .iter()
            .any(|&(rx, ry, rw, rh)| x >= rx && x < rx + rw && y >= ry && y < ry + rh);
        if inside { WHITE } else { BLACK }
    });
    DynamicImage::ImageRgb8(img)
}

/// Black canvas with one white rectangle of `card_w` x `card_h` centered at
/// `center` and rotated by `angle_deg`
pub fn rotated_card_image(
    width: u32,
    height: u32,
    center: (f32, f32),
    card_w: f32,
    card_h: f32,
    angle_deg: f32,
) -> DynamicImage {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let dx = x as f32 - center.0;
        let dy = y as f32 - center.1;
        let u = dx * cos + dy * sin;
        let v = -dx * sin + dy * cos;
        if u.abs() <= card_w / 2.0 && v.abs() <= card_h / 2.0 {
            WHITE
        } else {
            BLACK
        }
    });
    DynamicImage::ImageRgb8(img)
}

/// Horizontal two-tone image: `left` for x < split, `right` otherwise
pub fn split_image(width: u32, height: u32, split: u32, left: Rgb<u8>, right: Rgb<u8>) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, _| if x < split { left } else { right })
}

/// Save an image as PNG into `dir` and return its path
pub fn save_png(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// Writer that fails for selected output paths and records the rest
#[derive(Default)]
pub struct FlakyWriter {
    pub fail_names: Vec<String>,
    pub written: RefCell<Vec<(PathBuf, u32, u32)>>,
}

impl FlakyWriter {
    pub fn failing(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|n| n.to_string()).collect(),
            written: RefCell::new(Vec::new()),
        }
    }
}

impl CardWriter for FlakyWriter {
    fn write(&self, card: &RgbImage, path: &Path) -> cardcut::Result<()> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if self.fail_names.iter().any(|f| f == name) {
            return Err(ExtractError::Write {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only destination",
                )),
            });
        }
        self.written
            .borrow_mut()
            .push((path.to_path_buf(), card.width(), card.height()));
        Ok(())
    }
}
