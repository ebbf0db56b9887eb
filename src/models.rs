use image::RgbImage;
use imageproc::point::Point;

/// Closed outer boundary of a foreground region, collinear runs compressed
/// to their endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Four corners of an [`OrientedRectangle`], always in the order
/// bottom-left, top-left, top-right, bottom-right of the rectangle's own frame.
pub type CornerSet = [(f32, f32); 4];

/// Rotated rectangle. `width` runs along `angle` (degrees, in `[-45, 45)`),
/// `height` along the perpendicular axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRectangle {
    pub center: (f32, f32),
    pub width: f32,
    pub height: f32,
    pub angle: f32,
}

impl OrientedRectangle {
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_landscape(&self) -> bool {
        self.width.round() > self.height.round()
    }

    /// Corners in the fixed winding used for rectification.
    pub fn corners(&self) -> CornerSet {
        let theta = self.angle.to_radians();
        let (sin, cos) = theta.sin_cos();
        let (cx, cy) = self.center;

        // Half extents along the width axis (cos, sin) and the height axis (-sin, cos)
        let (wx, wy) = (cos * self.width / 2.0, sin * self.width / 2.0);
        let (hx, hy) = (-sin * self.height / 2.0, cos * self.height / 2.0);

        [
            (cx - wx + hx, cy - wy + hy),
            (cx - wx - hx, cy - wy - hy),
            (cx + wx - hx, cy + wy - hy),
            (cx + wx + hx, cy + wy + hy),
        ]
    }
}

/// A detected contour that passed the area filter, with its fitted rectangle.
#[derive(Debug, Clone)]
pub struct CardCandidate {
    pub contour: Contour,
    pub area: f64,
    pub rect: OrientedRectangle,
}

/// Upright, perspective-corrected card. `image` is always portrait or square.
#[derive(Debug, Clone)]
pub struct RectifiedCard {
    pub index: usize,
    pub image: RgbImage,
    pub rect: OrientedRectangle,
    pub area: f64,
}

impl RectifiedCard {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
