//! Edge-to-edge distance queries
//!
//! Edges are fetched from an [`EdgeKernel`] and routed to the matching
//! geometry routine by curve type.

use rk_geom::{
    ClampFlags, Point3, SegmentDistance, Tolerances, circle_circle_distance, is_parallel,
    line_circle_distance, point_segment_distance, segment_intersection,
    segment_segment_distance,
};
use serde::{Deserialize, Serialize};

use crate::kernel::{CadError, CadResult, EdgeCurve, EdgeId, EdgeInfo, EdgeKernel};

/// Curve pairing an edge distance was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgePairKind {
    /// Two straight edges
    LineLine,
    /// Two circular edges
    CircleCircle,
    /// A straight edge and a circular edge, in either order
    LineCircle,
}

/// Closest points between two edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDistance {
    /// Which routine produced this result
    pub kind: EdgePairKind,
    /// Closest point on the first edge (`None` for overlapping parallel lines)
    pub point_a: Option<Point3>,
    /// Closest point on the second edge (`None` for overlapping parallel lines)
    pub point_b: Option<Point3>,
    /// Minimum distance. Signed for line/circle pairs: negative when the line
    /// cuts the circle.
    pub distance: f64,
}

impl EdgeDistance {
    fn from_segments(result: SegmentDistance) -> Self {
        Self {
            kind: EdgePairKind::LineLine,
            point_a: result.point_a,
            point_b: result.point_b,
            distance: result.distance,
        }
    }
}

/// Dispatches edge queries to the geometry routines
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeDistanceCalculator {
    /// Endpoint clamping for line/line queries
    pub clamp: ClampFlags,
    /// Numeric tolerances
    pub tolerances: Tolerances,
}

impl EdgeDistanceCalculator {
    /// Create a calculator with full clamping and default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint clamping used for line/line queries
    pub fn with_clamp(mut self, clamp: ClampFlags) -> Self {
        self.clamp = clamp;
        self
    }

    /// Set the numeric tolerances
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Minimum distance between two edges
    ///
    /// Line/line pairs use the clamped segment routine, circle/circle pairs
    /// the center-line construction and mixed pairs the coplanar line/circle
    /// routine. Spline edges are not supported.
    pub fn edge_distance(
        &self,
        kernel: &dyn EdgeKernel,
        a: EdgeId,
        b: EdgeId,
    ) -> CadResult<EdgeDistance> {
        let edge_a = kernel.edge_info(a)?;
        let edge_b = kernel.edge_info(b)?;
        tracing::debug!(
            "Edge distance {} ({}) / {} ({})",
            a,
            edge_a.curve.type_name(),
            b,
            edge_b.curve.type_name()
        );

        match (edge_a.curve, edge_b.curve) {
            (EdgeCurve::Line, EdgeCurve::Line) => {
                Ok(EdgeDistance::from_segments(segment_segment_distance(
                    edge_a.start,
                    edge_a.end,
                    edge_b.start,
                    edge_b.end,
                    self.clamp,
                    &self.tolerances,
                )))
            }
            (
                EdgeCurve::Circle {
                    center: c1,
                    radius: r1,
                },
                EdgeCurve::Circle {
                    center: c2,
                    radius: r2,
                },
            ) => {
                let result = circle_circle_distance(c1, r1, c2, r2)?;
                Ok(EdgeDistance {
                    kind: EdgePairKind::CircleCircle,
                    point_a: Some(result.on_first),
                    point_b: Some(result.on_second),
                    distance: result.distance,
                })
            }
            (EdgeCurve::Line, EdgeCurve::Circle { center, radius }) => {
                let result = line_circle_distance(
                    edge_a.start,
                    edge_a.end,
                    center,
                    radius,
                    self.tolerances.linear,
                )?;
                Ok(EdgeDistance {
                    kind: EdgePairKind::LineCircle,
                    point_a: Some(result.on_line),
                    point_b: Some(result.on_circle),
                    distance: result.distance,
                })
            }
            (EdgeCurve::Circle { center, radius }, EdgeCurve::Line) => {
                // Line goes first; map the points back to the caller's order
                let result = line_circle_distance(
                    edge_b.start,
                    edge_b.end,
                    center,
                    radius,
                    self.tolerances.linear,
                )?;
                Ok(EdgeDistance {
                    kind: EdgePairKind::LineCircle,
                    point_a: Some(result.on_circle),
                    point_b: Some(result.on_line),
                    distance: result.distance,
                })
            }
            _ => Err(unsupported(&edge_a, &edge_b)),
        }
    }

    /// Distance from a point to an edge
    ///
    /// Circles are treated as filled disks: a point within the radius is at
    /// distance zero, anything further out is `|point - center| - radius`.
    pub fn point_edge_distance(
        &self,
        kernel: &dyn EdgeKernel,
        point: Point3,
        edge: EdgeId,
    ) -> CadResult<f64> {
        let info = kernel.edge_info(edge)?;
        match info.curve {
            EdgeCurve::Line => Ok(point_segment_distance(point, info.start, info.end).distance),
            EdgeCurve::Circle { center, radius } => Ok((point.distance(center) - radius).max(0.0)),
            EdgeCurve::Spline => {
                tracing::warn!("Point distance to spline edge {} is not supported", edge);
                Err(CadError::UnsupportedCurve(format!(
                    "point distance to {} edge",
                    info.curve.type_name()
                )))
            }
        }
    }

    /// Whether the chords of two edges are parallel
    pub fn edges_parallel(&self, kernel: &dyn EdgeKernel, a: EdgeId, b: EdgeId) -> CadResult<bool> {
        let (a0, a1) = kernel.edge_endpoints(a)?;
        let (b0, b1) = kernel.edge_endpoints(b)?;
        Ok(is_parallel(a1 - a0, b1 - b0, self.tolerances.angular)?)
    }

    /// Intersection point of two straight edges, if they touch at one point
    pub fn edge_intersection(
        &self,
        kernel: &dyn EdgeKernel,
        a: EdgeId,
        b: EdgeId,
    ) -> CadResult<Option<Point3>> {
        let edge_a = kernel.edge_info(a)?;
        let edge_b = kernel.edge_info(b)?;
        if edge_a.curve != EdgeCurve::Line || edge_b.curve != EdgeCurve::Line {
            return Err(unsupported(&edge_a, &edge_b));
        }
        Ok(segment_intersection(
            edge_a.start,
            edge_a.end,
            edge_b.start,
            edge_b.end,
            &self.tolerances,
        ))
    }
}

fn unsupported(a: &EdgeInfo, b: &EdgeInfo) -> CadError {
    tracing::warn!(
        "Unsupported edge pair {} ({}) / {} ({})",
        a.id,
        a.curve.type_name(),
        b.id,
        b.curve.type_name()
    );
    CadError::UnsupportedCurve(format!(
        "{} / {}",
        a.curve.type_name(),
        b.curve.type_name()
    ))
}
