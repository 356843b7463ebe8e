//! Point and vector primitives
//!
//! Points and vectors share one representation, a double-precision triple.
//! A vector is the difference of two points.

use glam::DVec3;

use crate::error::{GeomError, GeomResult};

/// A point in 3D space
pub type Point3 = DVec3;

/// A direction or offset in 3D space
pub type Vector3 = DVec3;

/// Angle between two vectors, in `[0, π]`.
///
/// Fails with [`GeomError::DegenerateInput`] when either vector has zero
/// length, since the angle is undefined.
pub fn angle_between(u: Vector3, v: Vector3) -> GeomResult<f64> {
    let norms = u.length() * v.length();
    if norms == 0.0 || !norms.is_finite() {
        return Err(GeomError::degenerate("zero-length vector"));
    }
    // Rounding can push the cosine just outside [-1, 1]
    let cos_theta = (u.dot(v) / norms).clamp(-1.0, 1.0);
    Ok(cos_theta.acos())
}

/// Convert a 2D or 3D coordinate slice into a point.
///
/// 2D coordinates are placed on the XY plane (z = 0).
pub fn point_from_slice(coords: &[f64]) -> GeomResult<Point3> {
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(GeomError::invalid(format!(
            "non-finite coordinate in {coords:?}"
        )));
    }
    match *coords {
        [x, y] => Ok(DVec3::new(x, y, 0.0)),
        [x, y, z] => Ok(DVec3::new(x, y, z)),
        _ => Err(GeomError::invalid(format!(
            "only 2D or 3D coordinates are supported, got {} components",
            coords.len()
        ))),
    }
}

/// Convert several coordinate slices that must share one dimensionality.
pub fn points_from_slices(coords: &[&[f64]]) -> GeomResult<Vec<Point3>> {
    if let Some(first) = coords.first() {
        let dim = first.len();
        if let Some(other) = coords.iter().find(|c| c.len() != dim) {
            return Err(GeomError::invalid(format!(
                "inconsistent dimensions: {} and {}",
                dim,
                other.len()
            )));
        }
    }
    coords.iter().map(|c| point_from_slice(c)).collect()
}

/// Arithmetic mean of a set of points
pub fn centroid(points: &[Point3]) -> GeomResult<Point3> {
    if points.is_empty() {
        return Err(GeomError::invalid("centroid of an empty point set"));
    }
    let sum: DVec3 = points.iter().copied().sum();
    Ok(sum / points.len() as f64)
}
