use image::{Rgb, RgbImage, imageops};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};

use crate::error::{ExtractError, Result};
use crate::models::{CornerSet, OrientedRectangle};

/// Smallest canvas side accepted for a rectified card
pub const MIN_CANVAS_SIDE: u32 = 2;

/// Projective transform taking each `src[i]` to `dst[i]`.
/// Fails when three or more source corners are collinear.
pub fn perspective_transform(src: &CornerSet, dst: &CornerSet) -> Result<Projection> {
    Projection::from_control_points(*src, *dst).ok_or_else(|| {
        ExtractError::DegenerateRectangle(format!(
            "no projective transform for corners {:?}",
            src
        ))
    })
}

/// Destination corners for a `width` x `height` canvas, matching the
/// winding of [`OrientedRectangle::corners`]
pub fn canvas_corners(width: u32, height: u32) -> CornerSet {
    let (w, h) = (width.saturating_sub(1) as f32, height.saturating_sub(1) as f32);
    [(0.0, h), (0.0, 0.0), (w, 0.0), (w, h)]
}

/// Warp the area under `rect` into an upright canvas.
///
/// The canvas is `round(width)` x `round(height)`; landscape results are
/// turned 90 degrees clockwise so every card comes out portrait or square.
pub fn rectify(image: &RgbImage, rect: &OrientedRectangle) -> Result<RgbImage> {
    let width = rect.width.round().max(0.0) as u32;
    let height = rect.height.round().max(0.0) as u32;
    if width < MIN_CANVAS_SIDE || height < MIN_CANVAS_SIDE {
        return Err(ExtractError::DegenerateRectangle(format!(
            "{}x{} canvas is below the {}x{} minimum",
            width, height, MIN_CANVAS_SIDE, MIN_CANVAS_SIDE
        )));
    }

    let projection = perspective_transform(&rect.corners(), &canvas_corners(width, height))?;

    let mut warped = RgbImage::new(width, height);
    warp_into(image, &projection, Interpolation::Bilinear, Rgb([0, 0, 0]), &mut warped);

    if rect.is_landscape() {
        Ok(imageops::rotate90(&warped))
    } else {
        Ok(warped)
    }
}
