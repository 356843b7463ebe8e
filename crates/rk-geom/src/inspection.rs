//! Geometric predicates
//!
//! Collinearity, parallelism and point-on-segment checks.

use std::f64::consts::PI;

use crate::config::LINEAR_TOLERANCE;
use crate::error::{GeomError, GeomResult};
use crate::vector::{Point3, Vector3, angle_between};

/// Threshold on `cos θ + 1` for two vectors to count as opposite
const OPPOSITE_EPS: f64 = 1.0e-8;

/// Check whether three points lie on one line.
///
/// True iff `|(p1 - p3) × (p2 - p3)| < tolerance`.
pub fn collinear(p1: Point3, p2: Point3, p3: Point3, tolerance: f64) -> bool {
    (p1 - p3).cross(p2 - p3).length() < tolerance
}

/// [`collinear`] with the default linear tolerance
pub fn is_collinear(p1: Point3, p2: Point3, p3: Point3) -> bool {
    collinear(p1, p2, p3, LINEAR_TOLERANCE)
}

/// Check whether two directions are parallel or anti-parallel.
///
/// `angular_tolerance` is in radians.
pub fn is_parallel(d1: Vector3, d2: Vector3, angular_tolerance: f64) -> GeomResult<bool> {
    let angle = angle_between(d1, d2).map_err(|_| {
        GeomError::degenerate("zero-length direction in parallel check")
    })?;
    Ok(angle < angular_tolerance || angle > PI - angular_tolerance)
}

/// Check whether `point` lies on the segment `start`..`end`.
///
/// A point within `tolerance` of either endpoint counts as on the segment.
/// Otherwise the vectors towards both endpoints must point in opposite
/// directions.
pub fn point_on_segment(point: Point3, start: Point3, end: Point3, tolerance: f64) -> bool {
    let to_start = start - point;
    let to_end = end - point;
    let len_start = to_start.length();
    let len_end = to_end.length();

    if len_start < tolerance || len_end < tolerance {
        return true;
    }

    let cos_theta = to_start.dot(to_end) / (len_start * len_end);
    (cos_theta + 1.0).abs() < OPPOSITE_EPS
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_collinear_points() {
        let p1 = DVec3::new(0.0, 0.0, 0.0);
        let p2 = DVec3::new(1.0, 1.0, 1.0);
        let p3 = DVec3::new(-2.0, -2.0, -2.0);
        assert!(is_collinear(p1, p2, p3));
    }

    #[test]
    fn test_not_collinear() {
        let p1 = DVec3::new(1.0, 0.0, 0.0);
        let p2 = DVec3::new(0.0, 1.0, 0.0);
        let p3 = DVec3::new(-1.0, 0.0, 0.0);
        assert!(!is_collinear(p1, p2, p3));
    }

    #[test]
    fn test_collinear_tolerance_is_respected() {
        let p1 = DVec3::new(0.0, 0.0, 0.0);
        let p2 = DVec3::new(1.0, 1e-4, 0.0);
        let p3 = DVec3::new(2.0, 0.0, 0.0);
        assert!(!collinear(p1, p2, p3, 1e-6));
        assert!(collinear(p1, p2, p3, 1e-3));
    }

    #[test]
    fn test_coincident_points_are_collinear() {
        let p = DVec3::new(3.0, 4.0, 5.0);
        assert!(is_collinear(p, p, DVec3::ZERO));
    }

    #[test]
    fn test_parallel_directions() {
        let d1 = DVec3::new(0.0, 140.0, 0.0);
        let d2 = DVec3::new(0.0, -2.0, 0.0);
        assert!(is_parallel(d1, d2, 1e-6).unwrap());
        assert!(!is_parallel(d1, DVec3::new(1.0, 1.0, 0.0), 1e-6).unwrap());
        assert!(is_parallel(DVec3::ZERO, d2, 1e-6).is_err());
    }

    #[test]
    fn test_point_on_segment() {
        let a = DVec3::new(0.0, 0.0, 0.0);
        let b = DVec3::new(4.0, 0.0, 0.0);
        assert!(point_on_segment(DVec3::new(1.0, 0.0, 0.0), a, b, 1e-6));
        assert!(point_on_segment(a, a, b, 1e-6));
        assert!(!point_on_segment(DVec3::new(5.0, 0.0, 0.0), a, b, 1e-6));
        assert!(!point_on_segment(DVec3::new(1.0, 0.5, 0.0), a, b, 1e-6));
    }
}
