//! Point-to-segment and point-to-circle distance

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::circle::{CircleFit, fit_circle};
use crate::error::GeomResult;
use crate::vector::Point3;

/// Shortest distance from a point to a primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDistance {
    /// Euclidean distance
    pub distance: f64,
    /// Closest point on the primitive
    pub nearest: Point3,
}

/// Shortest distance from `point` to the finite segment `a`..`b`.
///
/// The point is projected onto the line through the segment. A projection
/// inside the segment is the answer; otherwise the closer endpoint is, with
/// `a` preferred on a tie. A zero-length segment yields `a`.
pub fn point_segment_distance(point: Point3, a: Point3, b: Point3) -> PointDistance {
    let ab = b - a;
    let len_sq = ab.length_squared();

    if len_sq == 0.0 {
        return PointDistance {
            distance: point.distance(a),
            nearest: a,
        };
    }

    let t = (point - a).dot(ab) / len_sq;
    if (0.0..=1.0).contains(&t) {
        let projection = a + ab * t;
        return PointDistance {
            distance: point.distance(projection),
            nearest: projection,
        };
    }

    let to_a = point.distance(a);
    let to_b = point.distance(b);
    if to_a <= to_b {
        PointDistance {
            distance: to_a,
            nearest: a,
        }
    } else {
        PointDistance {
            distance: to_b,
            nearest: b,
        }
    }
}

/// Shortest distance from `point` to the circumference of a fitted circle.
///
/// The point is projected onto the circle's plane and pushed out to the
/// radius. A point whose projection lands within `tolerance` of the center is
/// equally far from the whole circle; the circle point in the direction of the
/// fit's first input point is reported then.
pub fn point_circle_distance(point: Point3, fit: &CircleFit, tolerance: f64) -> PointDistance {
    let center = fit.center();
    let offset = point - center;
    let in_plane = offset - fit.normal * offset.dot(fit.normal);

    let direction = if in_plane.length() > tolerance {
        in_plane.normalize()
    } else {
        (fit.start - center).try_normalize().unwrap_or(DVec3::ZERO)
    };

    let nearest = center + direction * fit.radius();
    PointDistance {
        distance: point.distance(nearest),
        nearest,
    }
}

/// Fit a circle through `p1`, `p2`, `p3` and measure the distance from `point` to it
///
/// `tolerance` is the linear tolerance for both the fit and the on-axis check.
pub fn point_circle_distance_3p(
    point: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    tolerance: f64,
) -> GeomResult<PointDistance> {
    let fit = fit_circle(p1, p2, p3, tolerance)?;
    Ok(point_circle_distance(point, &fit, tolerance))
}
