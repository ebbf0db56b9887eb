use imageproc::geometry::{self, convex_hull};

use crate::models::{Contour, OrientedRectangle};

/// Area enclosed by the contour polygon (absolute shoelace area)
pub fn contour_area(contour: &Contour) -> f64 {
    geometry::contour_area(contour.points.as_slice())
}

/// Smallest-area rectangle, at any rotation, enclosing the contour.
///
/// Rotating calipers: one side of the optimal rectangle is collinear with an
/// edge of the convex hull, so every hull edge direction is tried and the
/// tightest box wins. The angle is normalized into `[-45, 45)` degrees,
/// swapping width and height as needed.
pub fn min_area_rect(contour: &Contour) -> OrientedRectangle {
    let hull: Vec<(f64, f64)> = if contour.len() >= 3 {
        convex_hull::<i32>(contour.points.as_slice())
            .into_iter()
            .map(|p| (p.x as f64, p.y as f64))
            .collect()
    } else {
        contour.points.iter().map(|p| (p.x as f64, p.y as f64)).collect()
    };

    let Some(&first) = hull.first() else {
        return OrientedRectangle {
            center: (0.0, 0.0),
            width: 0.0,
            height: 0.0,
            angle: 0.0,
        };
    };

    let mut best: Option<Caliper> = None;
    for i in 0..hull.len() {
        let (ax, ay) = hull[i];
        let (bx, by) = hull[(i + 1) % hull.len()];
        let length = (bx - ax).hypot(by - ay);
        if length < f64::EPSILON {
            continue;
        }

        let caliper = Caliper::along(&hull, ((bx - ax) / length, (by - ay) / length));
        if best.as_ref().is_none_or(|b| caliper.area() < b.area()) {
            best = Some(caliper);
        }
    }

    match best {
        Some(caliper) => caliper.into_rect(),
        // All hull points coincide
        None => OrientedRectangle {
            center: (first.0 as f32, first.1 as f32),
            width: 0.0,
            height: 0.0,
            angle: 0.0,
        },
    }
}

/// Extents of a point set projected on the axes `u` and its normal `v`
struct Caliper {
    u: (f64, f64),
    min_u: f64,
    max_u: f64,
    min_v: f64,
    max_v: f64,
}

impl Caliper {
    fn along(points: &[(f64, f64)], u: (f64, f64)) -> Self {
        let v = (-u.1, u.0);
        let mut caliper = Self {
            u,
            min_u: f64::INFINITY,
            max_u: f64::NEG_INFINITY,
            min_v: f64::INFINITY,
            max_v: f64::NEG_INFINITY,
        };

        for &(x, y) in points {
            let pu = x * u.0 + y * u.1;
            let pv = x * v.0 + y * v.1;
            caliper.min_u = caliper.min_u.min(pu);
            caliper.max_u = caliper.max_u.max(pu);
            caliper.min_v = caliper.min_v.min(pv);
            caliper.max_v = caliper.max_v.max(pv);
        }

        caliper
    }

    fn area(&self) -> f64 {
        (self.max_u - self.min_u) * (self.max_v - self.min_v)
    }

    fn into_rect(self) -> OrientedRectangle {
        let (u, v) = (self.u, (-self.u.1, self.u.0));
        let mid_u = (self.min_u + self.max_u) / 2.0;
        let mid_v = (self.min_v + self.max_v) / 2.0;
        let center = (mid_u * u.0 + mid_v * v.0, mid_u * u.1 + mid_v * v.1);

        let mut angle = u.1.atan2(u.0).to_degrees();
        let mut width = self.max_u - self.min_u;
        let mut height = self.max_v - self.min_v;

        // A quarter turn of the frame swaps the side lengths
        while angle >= 45.0 {
            angle -= 90.0;
            std::mem::swap(&mut width, &mut height);
        }
        while angle < -45.0 {
            angle += 90.0;
            std::mem::swap(&mut width, &mut height);
        }

        OrientedRectangle {
            center: (center.0 as f32, center.1 as f32),
            width: width as f32,
            height: height as f32,
            angle: angle as f32,
        }
    }
}
