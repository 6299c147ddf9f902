//! Device tags and the allocator seam storage construction goes through.

mod allocator;
pub use allocator::*;

/// Identifies the backend whose memory an object lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceType {
    #[default]
    Host,
    Cuda,
}
