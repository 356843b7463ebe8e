//! Three-point circle fitting
//!
//! The circle through three points is found with the classical determinant
//! method: the three points and their plane define a sphere family, and the
//! member of that family centred on the plane is the circumscribed circle.

use std::f64::consts::PI;

use glam::{DMat3, DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::error::{GeomError, GeomResult};
use crate::inspection::collinear;
use crate::vector::{Point3, Vector3, angle_between};

/// A circle given by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point
    pub center: Point3,
    /// Radius (never negative)
    pub radius: f64,
}

impl Circle {
    /// Create a circle, rejecting negative or non-finite radii
    pub fn new(center: Point3, radius: f64) -> GeomResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeomError::invalid(format!(
                "circle radius must be finite and non-negative, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }
}

/// Result of fitting a circle through three points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    /// The fitted circle
    pub circle: Circle,
    /// Arc angle subtended by the ordered points, see [`arc_angle`]
    pub arc_angle: f64,
    /// Unit normal of the plane through the three points
    pub normal: Vector3,
    /// The first input point, used to pick a direction in the circle plane
    pub start: Point3,
}

impl CircleFit {
    /// Center of the fitted circle
    pub fn center(&self) -> Point3 {
        self.circle.center
    }

    /// Radius of the fitted circle
    pub fn radius(&self) -> f64 {
        self.circle.radius
    }
}

/// Fit the unique circle through three points.
///
/// Points that are collinear within `tolerance` (see
/// [`collinear`](crate::inspection::collinear)) do not define a circle and are
/// rejected with [`GeomError::DegenerateInput`].
pub fn fit_circle(p1: Point3, p2: Point3, p3: Point3, tolerance: f64) -> GeomResult<CircleFit> {
    if collinear(p1, p2, p3, tolerance) {
        return Err(GeomError::degenerate("collinear points"));
    }

    // Plane through the points: rows [x, y, z, 1]
    let rows = [p1.extend(1.0), p2.extend(1.0), p3.extend(1.0)];
    let m = det3(rows.map(|r| DVec3::new(r.y, r.z, r.w)));
    let n = -det3(rows.map(|r| DVec3::new(r.x, r.z, r.w)));
    let p = det3(rows.map(|r| DVec3::new(r.x, r.y, r.w)));
    let q = -det3([p1, p2, p3]);

    // Rows [|p|², x, y, z, 1] plus the plane row [2q, -m, -n, -p, 0]
    let sphere = [
        [p1.length_squared(), p1.x, p1.y, p1.z, 1.0],
        [p2.length_squared(), p2.x, p2.y, p2.z, 1.0],
        [p3.length_squared(), p3.x, p3.y, p3.z, 1.0],
        [2.0 * q, -m, -n, -p, 0.0],
    ];
    let a = det4_without(&sphere, 0);
    let b = -det4_without(&sphere, 1);
    let c = det4_without(&sphere, 2);
    let d = -det4_without(&sphere, 3);
    let e = det4_without(&sphere, 4);

    if a == 0.0 || !a.is_finite() {
        return Err(GeomError::degenerate(
            "circle determinant vanished (points nearly collinear)",
        ));
    }

    let center = -DVec3::new(b, c, d) / (2.0 * a);
    let radius = (b * b + c * c + d * d - 4.0 * a * e).max(0.0).sqrt() / (2.0 * a.abs());
    let normal = (p1 - p2).cross(p3 - p2).normalize();
    let arc_angle = arc_angle(center, p1, p2, p3)?;

    Ok(CircleFit {
        circle: Circle { center, radius },
        arc_angle,
        normal,
        start: p1,
    })
}

/// Angle of the arc running `p1 → p2 → p3` around `center`.
///
/// The two consecutive angles `p1-center-p2` and `p2-center-p3` are summed;
/// a sum below π is folded to its supplement `π - sum`.
pub fn arc_angle(center: Point3, p1: Point3, p2: Point3, p3: Point3) -> GeomResult<f64> {
    let v1 = p1 - center;
    let v2 = p2 - center;
    let v3 = p3 - center;

    let angle = angle_between(v1, v2)? + angle_between(v2, v3)?;
    if angle < PI {
        Ok(PI - angle)
    } else {
        Ok(angle)
    }
}

fn det3(rows: [DVec3; 3]) -> f64 {
    // det(M) == det(Mᵀ), so rows can be used as columns
    DMat3::from_cols(rows[0], rows[1], rows[2]).determinant()
}

/// Determinant of the 4×4 minor left after deleting column `skip` of a 4×5 matrix
fn det4_without(matrix: &[[f64; 5]; 4], skip: usize) -> f64 {
    let row = |r: &[f64; 5]| {
        let mut kept = [0.0; 4];
        let mut k = 0;
        for (j, value) in r.iter().enumerate() {
            if j != skip {
                kept[k] = *value;
                k += 1;
            }
        }
        DVec4::from_array(kept)
    };
    DMat4::from_cols(
        row(&matrix[0]),
        row(&matrix[1]),
        row(&matrix[2]),
        row(&matrix[3]),
    )
    .determinant()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LINEAR_TOLERANCE;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_unit_circle() {
        let fit = fit_circle(
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(-1.0, 0.0, 0.0),
            LINEAR_TOLERANCE,
        )
        .unwrap();

        assert!(fit.center().abs_diff_eq(DVec3::ZERO, 1e-12));
        assert_relative_eq!(fit.radius(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.arc_angle, PI, epsilon = 1e-12);
        assert!(fit.normal.abs_diff_eq(DVec3::NEG_Z, 1e-12));
    }

    #[test]
    fn test_center_is_equidistant() {
        let triples = [
            (
                DVec3::new(1.0, 2.0, 3.0),
                DVec3::new(4.0, -1.0, 2.0),
                DVec3::new(0.0, 5.0, -2.0),
            ),
            (
                DVec3::new(-212.0055, 70.0, -64.0),
                DVec3::new(-194.3834, -70.0, -64.0),
                DVec3::new(-212.0055, 70.0, -80.0),
            ),
            (
                DVec3::new(0.5, 0.0, 0.0),
                DVec3::new(0.0, 0.0, 0.25),
                DVec3::new(0.0, 3.0, 0.0),
            ),
        ];

        for (p1, p2, p3) in triples {
            let fit = fit_circle(p1, p2, p3, LINEAR_TOLERANCE).unwrap();
            let r = fit.radius();
            assert_relative_eq!(fit.center().distance(p1), r, max_relative = 1e-9);
            assert_relative_eq!(fit.center().distance(p2), r, max_relative = 1e-9);
            assert_relative_eq!(fit.center().distance(p3), r, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_center_lies_in_point_plane() {
        let p1 = DVec3::new(3.0, 0.0, 7.0);
        let p2 = DVec3::new(0.0, 3.0, 7.0);
        let p3 = DVec3::new(-3.0, 0.0, 7.0);
        let fit = fit_circle(p1, p2, p3, LINEAR_TOLERANCE).unwrap();

        assert_abs_diff_eq!(fit.center().z, 7.0, epsilon = 1e-9);
        assert_relative_eq!(fit.radius(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collinear_points_rejected() {
        let result = fit_circle(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(2.0, 2.0, 0.0),
            LINEAR_TOLERANCE,
        );
        assert!(matches!(result, Err(GeomError::DegenerateInput(_))));
    }

    #[test]
    fn test_coincident_points_rejected() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        let result = fit_circle(p, p, DVec3::new(4.0, 0.0, 0.0), LINEAR_TOLERANCE);
        assert!(matches!(result, Err(GeomError::DegenerateInput(_))));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let p1 = DVec3::new(1.0, 2.0, 3.0);
        let p2 = DVec3::new(4.0, -1.0, 2.0);
        let p3 = DVec3::new(0.0, 5.0, -2.0);
        let first = fit_circle(p1, p2, p3, LINEAR_TOLERANCE).unwrap();
        let second = fit_circle(p1, p2, p3, LINEAR_TOLERANCE).unwrap();
        assert_eq!(first.center().to_array(), second.center().to_array());
        assert_eq!(first.radius().to_bits(), second.radius().to_bits());
        assert_eq!(first.arc_angle.to_bits(), second.arc_angle.to_bits());
    }

    #[test]
    fn test_arc_angle_quarter_is_folded() {
        // Two consecutive 45° steps sum to 90°, which folds to 90°
        let c = DVec3::ZERO;
        let p1 = DVec3::X;
        let p2 = DVec3::new(1.0, 1.0, 0.0).normalize();
        let p3 = DVec3::Y;
        assert_relative_eq!(
            arc_angle(c, p1, p2, p3).unwrap(),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_arc_angle_short_arc_folds_to_supplement() {
        // 30° + 30° = 60° < 180°, reported as 120°
        let c = DVec3::ZERO;
        let at = |deg: f64| DVec3::new(deg.to_radians().cos(), deg.to_radians().sin(), 0.0);
        let angle = arc_angle(c, at(0.0), at(30.0), at(60.0)).unwrap();
        assert_relative_eq!(angle, 120f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_arc_angle_major_arc_kept() {
        // 120° + 120° = 240°
        let c = DVec3::ZERO;
        let at = |deg: f64| DVec3::new(deg.to_radians().cos(), deg.to_radians().sin(), 0.0);
        let angle = arc_angle(c, at(0.0), at(120.0), at(240.0)).unwrap();
        assert_relative_eq!(angle, 240f64.to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn test_negative_radius_rejected() {
        assert!(Circle::new(DVec3::ZERO, -1.0).is_err());
        assert!(Circle::new(DVec3::ZERO, 0.0).is_ok());
    }
}
