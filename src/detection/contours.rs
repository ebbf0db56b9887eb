use image::GrayImage;
use imageproc::contours::{self, BorderType};
use imageproc::point::Point;

use crate::models::Contour;

/// Find the outermost boundaries of foreground regions in a binary mask.
/// Holes and anything nested inside another region are dropped.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    contours::find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter(|c| !c.points.is_empty())
        .map(|c| Contour::new(compress_collinear(&c.points)))
        .collect()
}

/// Drop boundary points lying in the middle of a straight run, keeping
/// only the endpoints of each horizontal, vertical or diagonal segment
pub fn compress_collinear(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            let (ax, ay) = (cur.x - prev.x, cur.y - prev.y);
            let (bx, by) = (next.x - cur.x, next.y - cur.y);
            let cross = ax * by - ay * bx;
            let dot = ax * bx + ay * by;
            // Interior of a run: same direction on both sides
            !(cross == 0 && dot > 0)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() { points[..1].to_vec() } else { kept }
}
