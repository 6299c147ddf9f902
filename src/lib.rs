//! A micro-benchmark suite measuring what it costs to construct the
//! objects a tensor library touches on every tensor creation: backing
//! storage headers, shape/stride metadata headers, fully managed tensors
//! and autograd wrappers, next to raw allocation baselines.
//!
//! The construction surface under test lives in this crate and is
//! deliberately construction-only: [`StorageImpl`] owns a raw device
//! buffer, [`TensorImpl`] describes shape/stride/dtype over a shared
//! storage, [`Tensor`] is the owning handle and [`make_variable`] attaches
//! gradient tracking without copying. All raw memory flows through the
//! [`DeviceAllocator`] seam, so a [`CountingAllocator`] can audit every
//! scenario.
//!
//! Scenarios are plain `(name, operation)` pairs built by [`suite`]; the
//! criterion bench target registers each one under its unique name.
//!
//! ```
//! use tensalloc::{suite, LeakScenarios};
//!
//! for scenario in suite(LeakScenarios::Skip) {
//!     let mut op = scenario.prepare();
//!     op();
//! }
//! ```

pub mod devices;

mod autograd;
mod dtype;
mod error;
mod scenario;
mod slot;
mod storage;
mod tensor;

pub use autograd::*;
pub use devices::*;
pub use dtype::*;
pub use error::*;
pub use scenario::*;
pub use slot::*;
pub use storage::*;
pub use tensor::*;

pub mod prelude {
    //! Typical imports for driving the suite.

    pub use crate::{
        device_allocator, host_allocator, make_variable, suite, suite_in, unique_names, AsDType,
        CountingAllocator, DType, DeviceAllocator, DeviceError, DeviceType, Error, ErrorKind,
        HostAllocator, LeakScenarios, RawSlot, Scenario, StorageImpl, Tensor, TensorImpl,
        TensorOptions, TimedOp, Variable,
    };
}
