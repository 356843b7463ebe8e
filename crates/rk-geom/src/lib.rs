//! Closest-Distance and Circle-Fitting Geometry
//!
//! This crate provides:
//! - Point/vector primitives on double-precision 3D coordinates
//! - Collinearity, parallelism and point-on-segment predicates
//! - Exact three-point circle fitting with arc angle
//! - Point/segment, segment/segment, line/circle and circle/circle distance
//!   with per-endpoint clamping
//! - A serializable tolerance configuration
//!
//! Every routine is a pure function over value types. Degenerate inputs are
//! reported as [`GeomError`] values rather than non-finite results.

pub mod circle;
pub mod config;
pub mod distance;
pub mod error;
pub mod inspection;
pub mod vector;

// Re-exports for convenience
pub use circle::{Circle, CircleFit, arc_angle, fit_circle};
pub use config::{ConfigError, Tolerances};
pub use distance::{
    CircleCircleDistance, ClampFlags, LineCircleDistance, PointDistance, SegmentDistance,
    circle_circle_distance, line_circle_distance, point_circle_distance,
    point_circle_distance_3p, point_segment_distance, segment_intersection,
    segment_segment_distance, segments_intersect,
};
pub use error::{GeomError, GeomResult};
pub use inspection::{collinear, is_collinear, is_parallel, point_on_segment};
pub use vector::{Point3, Vector3, angle_between, centroid, point_from_slice, points_from_slices};
