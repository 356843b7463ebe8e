//! In-memory edge kernel
//!
//! Holds edge records for callers that already have coordinates, and for tests.

use std::collections::HashMap;

use parking_lot::RwLock;
use rk_geom::{Circle, Point3, fit_circle};
use uuid::Uuid;

use super::traits::{CadError, CadResult, EdgeCurve, EdgeId, EdgeInfo, EdgeKernel};

#[derive(Debug, Default)]
struct EdgeStore {
    edges: HashMap<EdgeId, EdgeInfo>,
    next_index: u32,
}

/// Edge kernel backed by a map of edge records
///
/// All edges belong to a single solid whose ID is fixed at construction.
#[derive(Debug)]
pub struct MemoryKernel {
    solid_id: Uuid,
    store: RwLock<EdgeStore>,
}

impl Default for MemoryKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKernel {
    /// Create an empty kernel with a fresh solid ID
    pub fn new() -> Self {
        Self::with_solid_id(Uuid::new_v4())
    }

    /// Create an empty kernel whose edges belong to `solid_id`
    pub fn with_solid_id(solid_id: Uuid) -> Self {
        Self {
            solid_id,
            store: RwLock::new(EdgeStore::default()),
        }
    }

    /// ID of the solid owning every edge in this kernel
    pub fn solid_id(&self) -> Uuid {
        self.solid_id
    }

    /// Add a straight edge
    pub fn add_line(&self, start: Point3, end: Point3) -> CadResult<EdgeId> {
        self.insert(start, end, EdgeCurve::Line)
    }

    /// Add a circular edge with a known center and radius
    pub fn add_circle(
        &self,
        start: Point3,
        end: Point3,
        center: Point3,
        radius: f64,
    ) -> CadResult<EdgeId> {
        let circle = Circle::new(center, radius)?;
        self.insert(
            start,
            end,
            EdgeCurve::Circle {
                center: circle.center,
                radius: circle.radius,
            },
        )
    }

    /// Add the circular arc running through three points
    ///
    /// The arc starts at `p1` and ends at `p3`.
    pub fn add_arc_through(
        &self,
        p1: Point3,
        p2: Point3,
        p3: Point3,
        tolerance: f64,
    ) -> CadResult<EdgeId> {
        let fit = fit_circle(p1, p2, p3, tolerance)?;
        self.insert(
            p1,
            p3,
            EdgeCurve::Circle {
                center: fit.center(),
                radius: fit.radius(),
            },
        )
    }

    /// Add a free-form edge known only by its endpoints
    pub fn add_spline(&self, start: Point3, end: Point3) -> CadResult<EdgeId> {
        self.insert(start, end, EdgeCurve::Spline)
    }

    /// Remove an edge, returning its record
    pub fn remove_edge(&self, edge: EdgeId) -> Option<EdgeInfo> {
        self.store.write().edges.remove(&edge)
    }

    /// Number of stored edges
    pub fn len(&self) -> usize {
        self.store.read().edges.len()
    }

    /// Whether the kernel holds no edges
    pub fn is_empty(&self) -> bool {
        self.store.read().edges.is_empty()
    }

    /// All stored edges, ordered by index
    pub fn edges(&self) -> Vec<EdgeInfo> {
        let mut edges: Vec<EdgeInfo> = self.store.read().edges.values().copied().collect();
        edges.sort_by_key(|e| e.id.index);
        edges
    }

    fn insert(&self, start: Point3, end: Point3, curve: EdgeCurve) -> CadResult<EdgeId> {
        let mut store = self.store.write();
        let id = EdgeId::new(self.solid_id, store.next_index);
        store.next_index = store.next_index.checked_add(1).ok_or_else(|| {
            CadError::OperationFailed(format!("edge indices exhausted for solid {}", self.solid_id))
        })?;
        store.edges.insert(id, EdgeInfo::new(id, start, end, curve));
        tracing::trace!("Added {} edge {}", curve.type_name(), id);
        Ok(id)
    }

    fn get(&self, edge: EdgeId) -> CadResult<EdgeInfo> {
        self.store
            .read()
            .edges
            .get(&edge)
            .copied()
            .ok_or(CadError::EdgeNotFound(edge))
    }
}

impl EdgeKernel for MemoryKernel {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn edge_endpoints(&self, edge: EdgeId) -> CadResult<(Point3, Point3)> {
        let info = self.get(edge)?;
        Ok((info.start, info.end))
    }

    fn edge_curve(&self, edge: EdgeId) -> CadResult<EdgeCurve> {
        Ok(self.get(edge)?.curve)
    }

    fn edge_info(&self, edge: EdgeId) -> CadResult<EdgeInfo> {
        self.get(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;

    #[test]
    fn test_add_and_query_line() {
        let kernel = MemoryKernel::new();
        let id = kernel.add_line(DVec3::ZERO, DVec3::X).unwrap();

        assert_eq!(id.solid_id, kernel.solid_id());
        assert_eq!(kernel.edge_endpoints(id).unwrap(), (DVec3::ZERO, DVec3::X));
        assert_eq!(kernel.edge_curve(id).unwrap(), EdgeCurve::Line);
    }

    #[test]
    fn test_indices_are_sequential() {
        let kernel = MemoryKernel::new();
        let a = kernel.add_line(DVec3::ZERO, DVec3::X).unwrap();
        let b = kernel.add_spline(DVec3::ZERO, DVec3::Y).unwrap();
        assert_eq!(a.index, 0);
        assert_eq!(b.index, 1);
        assert_eq!(kernel.len(), 2);
        assert_eq!(kernel.edges()[1].curve, EdgeCurve::Spline);
    }

    #[test]
    fn test_arc_through_three_points() {
        let kernel = MemoryKernel::new();
        let id = kernel
            .add_arc_through(
                DVec3::new(2.0, 0.0, 0.0),
                DVec3::new(0.0, 2.0, 0.0),
                DVec3::new(-2.0, 0.0, 0.0),
                1e-6,
            )
            .unwrap();

        let info = kernel.edge_info(id).unwrap();
        assert_eq!(info.start, DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(info.end, DVec3::new(-2.0, 0.0, 0.0));
        match info.curve {
            EdgeCurve::Circle { center, radius } => {
                assert!(center.abs_diff_eq(DVec3::ZERO, 1e-12));
                assert_relative_eq!(radius, 2.0, epsilon = 1e-12);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_arc_through_collinear_points_fails() {
        let kernel = MemoryKernel::new();
        let result = kernel.add_arc_through(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, 1e-6);
        assert!(matches!(result, Err(CadError::Geometry(_))));
        assert!(kernel.is_empty());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let kernel = MemoryKernel::new();
        let result = kernel.add_circle(DVec3::X, DVec3::Y, DVec3::ZERO, -1.0);
        assert!(matches!(result, Err(CadError::Geometry(_))));
    }

    #[test]
    fn test_exhausted_indices_fail() {
        let kernel = MemoryKernel::new();
        kernel.store.write().next_index = u32::MAX - 1;

        let last = kernel.add_line(DVec3::ZERO, DVec3::X).unwrap();
        assert_eq!(last.index, u32::MAX - 1);

        let result = kernel.add_line(DVec3::ZERO, DVec3::Y);
        assert!(matches!(result, Err(CadError::OperationFailed(_))));
        assert_eq!(kernel.len(), 1);
    }

    #[test]
    fn test_removed_edge_not_found() {
        let kernel = MemoryKernel::new();
        let id = kernel.add_line(DVec3::ZERO, DVec3::X).unwrap();
        assert!(kernel.remove_edge(id).is_some());
        assert!(matches!(
            kernel.edge_curve(id),
            Err(CadError::EdgeNotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn test_edge_from_other_solid_not_found() {
        let kernel = MemoryKernel::new();
        kernel.add_line(DVec3::ZERO, DVec3::X).unwrap();
        let foreign = EdgeId::new(Uuid::new_v4(), 0);
        assert!(matches!(
            kernel.edge_endpoints(foreign),
            Err(CadError::EdgeNotFound(_))
        ));
    }
}
