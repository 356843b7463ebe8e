//! Closest-distance queries between points, segments and circles

mod circle;
mod point;
mod segment;

pub use circle::{
    CircleCircleDistance, LineCircleDistance, circle_circle_distance, line_circle_distance,
};
pub use point::{
    PointDistance, point_circle_distance, point_circle_distance_3p, point_segment_distance,
};
pub use segment::{
    ClampFlags, SegmentDistance, segment_intersection, segment_segment_distance,
    segments_intersect,
};
