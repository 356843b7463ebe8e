//! CAD Kernel Edge Adapter
//!
//! This crate provides:
//! - An abstract edge kernel trait reporting edge endpoints and curve types
//! - A null kernel and an in-memory kernel
//! - Edge-to-edge and point-to-edge distance dispatched by curve type

pub mod edge_distance;
pub mod kernel;

// Re-exports for convenience
pub use edge_distance::{EdgeDistance, EdgeDistanceCalculator, EdgePairKind};
pub use kernel::{
    CadError, CadResult, EdgeCurve, EdgeId, EdgeInfo, EdgeKernel, MemoryKernel, NullKernel,
    default_kernel,
};
