//! CAD kernel abstraction
//!
//! Kernels expose edges as boundary points plus a curve type.

mod memory;
mod traits;

pub use memory::MemoryKernel;
pub use traits::{CadError, CadResult, EdgeCurve, EdgeId, EdgeInfo, EdgeKernel, NullKernel};

/// Get the default edge kernel
pub fn default_kernel() -> Box<dyn EdgeKernel> {
    Box::new(MemoryKernel::new())
}
