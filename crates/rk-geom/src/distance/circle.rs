//! Line-to-circle and circle-to-circle distance
//!
//! These handle the coplanar case only: the circle is assumed to lie in a
//! plane containing the line (or the other circle's center line). Projecting
//! onto an arbitrarily oriented circle plane is not attempted.

use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::error::{GeomError, GeomResult};
use crate::vector::Point3;

/// Closest points between a line and a circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineCircleDistance {
    /// Foot of the circle center on the line
    pub on_line: Point3,
    /// Circle point closest to the line
    pub on_circle: Point3,
    /// Signed distance; zero or negative when the line meets the circle
    pub distance: f64,
}

/// Closest points between two circles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCircleDistance {
    /// Closest point on the first circle
    pub on_first: Point3,
    /// Closest point on the second circle
    pub on_second: Point3,
    /// Gap between the circles
    pub distance: f64,
}

/// Distance between the infinite line through `a0`, `a1` and a coplanar circle.
///
/// The circle center is projected onto the line, and the circle point facing
/// that projection is reported. The distance is `|projection - center| - radius`
/// and is left signed so callers can tell a crossing line from a clear one.
/// A line passing within `tolerance` of the center reports the circle point
/// along the line direction.
pub fn line_circle_distance(
    a0: Point3,
    a1: Point3,
    center: Point3,
    radius: f64,
    tolerance: f64,
) -> GeomResult<LineCircleDistance> {
    let circle = Circle::new(center, radius)?;

    let Some(dir) = (a1 - a0).try_normalize() else {
        return Err(GeomError::degenerate("zero-length line"));
    };

    let on_line = a0 + dir * dir.dot(center - a0);
    let offset = on_line - center;
    let gap = offset.length();

    let on_circle = if gap > tolerance {
        center + offset / gap * circle.radius
    } else {
        center + dir * circle.radius
    };

    Ok(LineCircleDistance {
        on_line,
        on_circle,
        distance: gap - circle.radius,
    })
}

/// Distance between two circles that do not overlap.
///
/// The closest points lie on the line joining the centers, one radius in from
/// each center. Overlapping or intersecting circles have no such pair and are
/// rejected, as are circles sharing a center.
pub fn circle_circle_distance(
    c1: Point3,
    r1: f64,
    c2: Point3,
    r2: f64,
) -> GeomResult<CircleCircleDistance> {
    let first = Circle::new(c1, r1)?;
    let second = Circle::new(c2, r2)?;

    let axis = second.center - first.center;
    let center_distance = axis.length();

    if center_distance < first.radius + second.radius {
        return Err(GeomError::degenerate("circles overlap or intersect"));
    }
    if center_distance == 0.0 {
        return Err(GeomError::degenerate("circles share a center"));
    }

    let dir = axis / center_distance;
    let on_first = first.center + dir * first.radius;
    let on_second = second.center - dir * second.radius;

    Ok(CircleCircleDistance {
        on_first,
        on_second,
        distance: on_first.distance(on_second),
    })
}
