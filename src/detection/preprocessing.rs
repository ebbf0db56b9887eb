use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use imageproc::filter::separable_filter_equal;

use crate::config::DetectionParams;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

type FloatImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Intermediate buffers of the binarization stage
pub struct Binarized {
    pub gray: GrayImage,
    pub blurred: GrayImage,
    pub mask: GrayImage,
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Normalized 1D Gaussian kernel of odd length `size`.
/// Sigma is derived from the size: `0.3 * ((size - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= sum);
    kernel
}

/// Apply a size x size Gaussian blur to reduce noise
pub fn gaussian_blur(img: &GrayImage, size: usize) -> GrayImage {
    let smoothed = smooth(img, size);
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([smoothed.get_pixel(x, y)[0].round().clamp(0.0, 255.0) as u8])
    })
}

/// Gaussian-weighted adaptive threshold with inverted polarity.
///
/// A pixel becomes foreground when it is at least `offset` darker than the
/// Gaussian mean of its `block_size` neighbourhood. Flat regions, bright or
/// dark, end up as background; the dark rim hugging a bright object does not.
pub fn adaptive_threshold_inv(img: &GrayImage, block_size: usize, offset: f32) -> GrayImage {
    let mean = smooth(img, block_size);

    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let local = mean.get_pixel(x, y)[0].round();
        let value = img.get_pixel(x, y)[0] as f32;
        if value <= local - offset {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Full binarization: grayscale, blur, inverted adaptive threshold
pub fn binarize(img: &DynamicImage, params: &DetectionParams) -> Binarized {
    let gray = to_grayscale(img);
    let blurred = gaussian_blur(&gray, params.blur_kernel);
    let mask = adaptive_threshold_inv(&blurred, params.block_size, params.offset);
    Binarized { gray, blurred, mask }
}

/// Gaussian-weighted local mean in floating point, edges replicated
fn smooth(img: &GrayImage, size: usize) -> FloatImage {
    let float = FloatImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([img.get_pixel(x, y)[0] as f32])
    });
    separable_filter_equal(&float, &gaussian_kernel(size))
}
