//! CAD Kernel trait definitions
//!
//! The geometry routines never see kernel objects. A kernel only has to
//! answer two questions about an edge: where its boundary points are, and
//! what kind of curve runs between them.

use std::fmt;

use rk_geom::{GeomError, Point3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an edge within a solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId {
    /// ID of the solid this edge belongs to
    pub solid_id: Uuid,
    /// Index of the edge within the solid
    pub index: u32,
}

impl EdgeId {
    /// Create a new edge ID
    pub fn new(solid_id: Uuid, index: u32) -> Self {
        Self { solid_id, index }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.solid_id, self.index)
    }
}

/// Geometric type of the curve underlying an edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgeCurve {
    /// Straight line between the boundary points
    Line,
    /// Circular arc (or full circle)
    Circle {
        /// Center of the circle
        center: Point3,
        /// Radius of the circle
        radius: f64,
    },
    /// Free-form curve; only its boundary points are usable
    Spline,
}

impl EdgeCurve {
    /// Human-readable curve type name
    pub fn type_name(&self) -> &'static str {
        match self {
            EdgeCurve::Line => "Line",
            EdgeCurve::Circle { .. } => "Circle",
            EdgeCurve::Spline => "Spline",
        }
    }
}

/// Information about an edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeInfo {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Start point of the edge
    pub start: Point3,
    /// End point of the edge
    pub end: Point3,
    /// Underlying curve
    pub curve: EdgeCurve,
}

impl EdgeInfo {
    /// Create a new edge info
    pub fn new(id: EdgeId, start: Point3, end: Point3, curve: EdgeCurve) -> Self {
        Self {
            id,
            start,
            end,
            curve,
        }
    }

    /// Midpoint of the chord between the boundary points
    pub fn chord_midpoint(&self) -> Point3 {
        (self.start + self.end) * 0.5
    }

    /// Length of the chord between the boundary points
    pub fn chord_length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Error type for CAD kernel queries
#[derive(Debug, Clone, Error)]
pub enum CadError {
    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeomError),
}

/// Result type for CAD operations
pub type CadResult<T> = Result<T, CadError>;

/// The edge query interface a CAD kernel provides
///
/// Implementations wrap an actual B-rep kernel (or any other store of edge
/// geometry) and project its edges down to coordinates.
pub trait EdgeKernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if the kernel is available
    fn is_available(&self) -> bool;

    /// Get the two boundary points of an edge
    ///
    /// # Arguments
    /// * `edge` - The edge to query
    fn edge_endpoints(&self, edge: EdgeId) -> CadResult<(Point3, Point3)>;

    /// Get the curve type of an edge, with center and radius for circles
    ///
    /// # Arguments
    /// * `edge` - The edge to query
    fn edge_curve(&self, edge: EdgeId) -> CadResult<EdgeCurve>;

    /// Get endpoints and curve together
    fn edge_info(&self, edge: EdgeId) -> CadResult<EdgeInfo> {
        let (start, end) = self.edge_endpoints(edge)?;
        let curve = self.edge_curve(edge)?;
        Ok(EdgeInfo::new(edge, start, end, curve))
    }
}

/// A null kernel that always returns errors (used when no kernel is available)
#[derive(Debug, Default)]
pub struct NullKernel;

impl EdgeKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn edge_endpoints(&self, _edge: EdgeId) -> CadResult<(Point3, Point3)> {
        Err(CadError::KernelNotAvailable("No CAD kernel available".into()))
    }

    fn edge_curve(&self, _edge: EdgeId) -> CadResult<EdgeCurve> {
        Err(CadError::KernelNotAvailable("No CAD kernel available".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_null_kernel_unavailable() {
        let kernel = NullKernel;
        let edge = EdgeId::new(Uuid::new_v4(), 0);

        assert!(!kernel.is_available());
        assert!(matches!(
            kernel.edge_endpoints(edge),
            Err(CadError::KernelNotAvailable(_))
        ));
        assert!(matches!(
            kernel.edge_info(edge),
            Err(CadError::KernelNotAvailable(_))
        ));
    }

    #[test]
    fn test_edge_info_chord() {
        let edge = EdgeInfo::new(
            EdgeId::new(Uuid::nil(), 3),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(6.0, 8.0, 0.0),
            EdgeCurve::Line,
        );
        assert_eq!(edge.chord_length(), 10.0);
        assert_eq!(edge.chord_midpoint(), DVec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_edge_id_display() {
        let id = EdgeId::new(Uuid::nil(), 7);
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000#7");
    }
}
