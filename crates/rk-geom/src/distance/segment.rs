//! Segment-to-segment distance
//!
//! Closest points between two 3D lines, where each of the four endpoints can
//! independently bound its line or leave it running to infinity.
//!
//! # Algorithm
//!
//! 1. Parallel lines (`|â × b̂|²` below the parallel tolerance) have no unique
//!    closest pair unless clamping separates them along their common
//!    direction, in which case the facing endpoints are the answer.
//! 2. Otherwise the closest points of the infinite lines are found with
//!    Cramer's rule on the triple products of `b0 - a0`, the directions and
//!    their cross product.
//! 3. A clamped parameter snaps its point to the endpoint; the point on the
//!    other segment is then re-projected against it, first for A, then for B.
//!    Clamping both independently does not give the constrained minimum.

use serde::{Deserialize, Serialize};

use crate::config::Tolerances;
use crate::vector::{Point3, Vector3};

/// Which segment endpoints bound the closest-point search.
///
/// An unclamped endpoint lets its segment continue as an infinite line past
/// that end. `clamp_all` overrides the four individual flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampFlags {
    /// Clamp every endpoint
    pub clamp_all: bool,
    /// Clamp the start of segment A
    pub clamp_a0: bool,
    /// Clamp the end of segment A
    pub clamp_a1: bool,
    /// Clamp the start of segment B
    pub clamp_b0: bool,
    /// Clamp the end of segment B
    pub clamp_b1: bool,
}

impl Default for ClampFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl ClampFlags {
    /// Both segments finite
    pub fn all() -> Self {
        Self {
            clamp_all: true,
            clamp_a0: false,
            clamp_a1: false,
            clamp_b0: false,
            clamp_b1: false,
        }
    }

    /// Both segments are infinite lines
    pub fn none() -> Self {
        Self {
            clamp_all: false,
            clamp_a0: false,
            clamp_a1: false,
            clamp_b0: false,
            clamp_b1: false,
        }
    }

    /// Choose each endpoint individually
    pub fn ends(a0: bool, a1: bool, b0: bool, b1: bool) -> Self {
        Self {
            clamp_all: false,
            clamp_a0: a0,
            clamp_a1: a1,
            clamp_b0: b0,
            clamp_b1: b1,
        }
    }

    /// Effective clamp on the start of A
    pub fn a0(&self) -> bool {
        self.clamp_all || self.clamp_a0
    }

    /// Effective clamp on the end of A
    pub fn a1(&self) -> bool {
        self.clamp_all || self.clamp_a1
    }

    /// Effective clamp on the start of B
    pub fn b0(&self) -> bool {
        self.clamp_all || self.clamp_b0
    }

    /// Effective clamp on the end of B
    pub fn b1(&self) -> bool {
        self.clamp_all || self.clamp_b1
    }

    /// Whether any endpoint is clamped
    pub fn any(&self) -> bool {
        self.a0() || self.a1() || self.b0() || self.b1()
    }

    /// Flags for the same query with segments A and B exchanged
    pub fn swapped(&self) -> Self {
        Self {
            clamp_all: self.clamp_all,
            clamp_a0: self.clamp_b0,
            clamp_a1: self.clamp_b1,
            clamp_b0: self.clamp_a0,
            clamp_b1: self.clamp_a1,
        }
    }
}

/// Closest points between two segments and their distance.
///
/// The points are `None` when the segments are parallel and overlap, since
/// infinitely many pairs share the minimum distance then.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentDistance {
    /// Closest point on segment A
    pub point_a: Option<Point3>,
    /// Closest point on segment B
    pub point_b: Option<Point3>,
    /// Minimum distance
    pub distance: f64,
}

impl SegmentDistance {
    fn between(point_a: Point3, point_b: Point3) -> Self {
        Self {
            point_a: Some(point_a),
            point_b: Some(point_b),
            distance: point_a.distance(point_b),
        }
    }

    fn overlapping(distance: f64) -> Self {
        Self {
            point_a: None,
            point_b: None,
            distance,
        }
    }

    /// Whether a unique closest pair exists
    pub fn has_unique_points(&self) -> bool {
        self.point_a.is_some() && self.point_b.is_some()
    }

    /// The same result seen from segment B
    pub fn swapped(self) -> Self {
        Self {
            point_a: self.point_b,
            point_b: self.point_a,
            distance: self.distance,
        }
    }
}

/// A segment with its unit direction, length and effective clamps
#[derive(Clone, Copy)]
struct Span {
    origin: Point3,
    end: Point3,
    dir: Vector3,
    len: f64,
    clamp_start: bool,
    clamp_end: bool,
}

impl Span {
    fn new(start: Point3, end: Point3, clamp_start: bool, clamp_end: bool) -> Self {
        let offset = end - start;
        let len = offset.length();
        let dir = if len > 0.0 { offset / len } else { Vector3::ZERO };
        Self {
            origin: start,
            end,
            dir,
            len,
            clamp_start,
            clamp_end,
        }
    }

    /// Closest point to `point` on this span, honouring its clamps
    fn project(&self, point: Point3) -> Point3 {
        let mut s = self.dir.dot(point - self.origin);
        if self.clamp_start && s < 0.0 {
            s = 0.0;
        } else if self.clamp_end && s > self.len {
            s = self.len;
        }
        self.origin + self.dir * s
    }
}

/// Shortest distance between segments `a0`..`a1` and `b0`..`b1`.
///
/// `clamp` decides which endpoints bound the search. Parallel overlapping
/// segments report only the distance. Zero-length segments are treated as
/// points.
pub fn segment_segment_distance(
    a0: Point3,
    a1: Point3,
    b0: Point3,
    b1: Point3,
    clamp: ClampFlags,
    tolerances: &Tolerances,
) -> SegmentDistance {
    let span_a = Span::new(a0, a1, clamp.a0(), clamp.a1());
    let span_b = Span::new(b0, b1, clamp.b0(), clamp.b1());

    if span_a.len == 0.0 || span_b.len == 0.0 {
        return degenerate_distance(&span_a, &span_b);
    }

    let cross = span_a.dir.cross(span_b.dir);
    let denom = cross.length_squared();

    if denom < tolerances.parallel {
        return parallel_distance(&span_a, &span_b, clamp);
    }

    // Closest points of the infinite lines
    let t = b0 - a0;
    let t0 = t.dot(span_b.dir.cross(cross)) / denom;
    let t1 = t.dot(span_a.dir.cross(cross)) / denom;

    let mut point_a = a0 + span_a.dir * t0;
    let mut point_b = b0 + span_b.dir * t1;

    if clamp.any() {
        let a_clamped =
            (span_a.clamp_start && t0 < 0.0) || (span_a.clamp_end && t0 > span_a.len);
        let b_clamped =
            (span_b.clamp_start && t1 < 0.0) || (span_b.clamp_end && t1 > span_b.len);

        if span_a.clamp_start && t0 < 0.0 {
            point_a = a0;
        } else if span_a.clamp_end && t0 > span_a.len {
            point_a = a1;
        }

        if span_b.clamp_start && t1 < 0.0 {
            point_b = b0;
        } else if span_b.clamp_end && t1 > span_b.len {
            point_b = b1;
        }

        if a_clamped {
            point_b = span_b.project(point_a);
        }
        if b_clamped {
            point_a = span_a.project(point_b);
        }
    }

    SegmentDistance::between(point_a, point_b)
}

/// Parallel or collinear segments
fn parallel_distance(span_a: &Span, span_b: &Span, clamp: ClampFlags) -> SegmentDistance {
    let a0 = span_a.origin;
    let a1 = span_a.end;
    let b0 = span_b.origin;
    let b1 = span_b.end;

    let d0 = span_a.dir.dot(b0 - a0);

    if clamp.any() {
        let d1 = span_a.dir.dot(b1 - a0);

        if d0 <= 0.0 && d1 <= 0.0 {
            // B lies entirely before a0; its endpoint facing a0 projects furthest along A
            let (facing, facing_clamped) = if d0 >= d1 {
                (b0, span_b.clamp_start)
            } else {
                (b1, span_b.clamp_end)
            };
            if span_a.clamp_start && facing_clamped {
                return SegmentDistance::between(a0, facing);
            }
        } else if d0 >= span_a.len && d1 >= span_a.len {
            // B lies entirely after a1
            let (facing, facing_clamped) = if d0 <= d1 {
                (b0, span_b.clamp_start)
            } else {
                (b1, span_b.clamp_end)
            };
            if span_a.clamp_end && facing_clamped {
                return SegmentDistance::between(a1, facing);
            }
        }
    }

    tracing::trace!("parallel segments overlap, no unique closest pair");
    SegmentDistance::overlapping(((a0 + span_a.dir * d0) - b0).length())
}

/// At least one segment has zero length and acts as a point
fn degenerate_distance(span_a: &Span, span_b: &Span) -> SegmentDistance {
    match (span_a.len == 0.0, span_b.len == 0.0) {
        (true, true) => SegmentDistance::between(span_a.origin, span_b.origin),
        (true, false) => {
            SegmentDistance::between(span_a.origin, span_b.project(span_a.origin))
        }
        _ => SegmentDistance::between(span_a.project(span_b.origin), span_b.origin),
    }
}

/// Intersection point of two finite segments.
///
/// Segments closer than the intersection tolerance meet at the midpoint of
/// their closest pair. Overlapping collinear segments have no single
/// intersection point and yield `None`; see [`segments_intersect`].
pub fn segment_intersection(
    a0: Point3,
    a1: Point3,
    b0: Point3,
    b1: Point3,
    tolerances: &Tolerances,
) -> Option<Point3> {
    let result = segment_segment_distance(a0, a1, b0, b1, ClampFlags::all(), tolerances);
    if result.distance >= tolerances.intersection {
        return None;
    }
    match (result.point_a, result.point_b) {
        (Some(pa), Some(pb)) => Some((pa + pb) * 0.5),
        _ => None,
    }
}

/// Whether two finite segments touch, including collinear overlap
pub fn segments_intersect(
    a0: Point3,
    a1: Point3,
    b0: Point3,
    b1: Point3,
    tolerances: &Tolerances,
) -> bool {
    segment_segment_distance(a0, a1, b0, b1, ClampFlags::all(), tolerances).distance
        < tolerances.intersection
}
