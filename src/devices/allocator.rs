use core::alloc::Layout;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::alloc::handle_alloc_error;

use crate::{DeviceError, DeviceType};

/// Raw memory source of a single backend.
///
/// Allocation never returns null: running out of memory aborts through
/// [`handle_alloc_error`], so construction paths stay infallible.
pub trait DeviceAllocator {
    fn alloc_raw(&self, layout: Layout) -> *mut u8;

    /// Releases a block obtained from [`DeviceAllocator::alloc_raw`].
    ///
    /// # Safety
    ///
    /// `ptr` must originate from `alloc_raw` on the same allocator with the
    /// same `layout`, and must not be released twice.
    unsafe fn dealloc_raw(&self, ptr: *mut u8, layout: Layout);

    fn device(&self) -> DeviceType;
}

/// Allocates host memory via [`std::alloc`].
#[derive(Debug, Default)]
pub struct HostAllocator;

impl DeviceAllocator for HostAllocator {
    fn alloc_raw(&self, layout: Layout) -> *mut u8 {
        assert!(layout.size() > 0, "invalid alloc size: 0");
        let ptr = unsafe { std::alloc::alloc(layout) };

        if ptr.is_null() {
            handle_alloc_error(layout);
        }

        ptr
    }

    unsafe fn dealloc_raw(&self, ptr: *mut u8, layout: Layout) {
        unsafe { std::alloc::dealloc(ptr, layout) }
    }

    #[inline]
    fn device(&self) -> DeviceType {
        DeviceType::Host
    }
}

static HOST: HostAllocator = HostAllocator;

/// Returns the process-wide host allocator.
#[inline]
pub fn host_allocator() -> &'static HostAllocator {
    &HOST
}

/// Looks up the allocator registered for `device`.
///
/// # Example
/// ```
/// use tensalloc::{device_allocator, DeviceType};
///
/// assert!(device_allocator(DeviceType::Host).is_ok());
/// assert!(device_allocator(DeviceType::Cuda).is_err());
/// ```
pub fn device_allocator(device: DeviceType) -> crate::Result<&'static dyn DeviceAllocator> {
    match device {
        DeviceType::Host => Ok(&HOST),
        DeviceType::Cuda => Err(DeviceError::NoDeviceAllocator.into()),
    }
}

/// Counts every allocation and release passing through an inner allocator.
///
/// Verifies allocation accounting: outstanding bytes must return to zero
/// after a scenario finishes, except for the labeled leak baselines, which
/// must show a free count of zero.
#[derive(Debug)]
pub struct CountingAllocator<A = HostAllocator> {
    inner: A,
    allocs: AtomicUsize,
    frees: AtomicUsize,
    alloc_bytes: AtomicUsize,
    freed_bytes: AtomicUsize,
}

impl<A> CountingAllocator<A> {
    pub const fn new(inner: A) -> Self {
        CountingAllocator {
            inner,
            allocs: AtomicUsize::new(0),
            frees: AtomicUsize::new(0),
            alloc_bytes: AtomicUsize::new(0),
            freed_bytes: AtomicUsize::new(0),
        }
    }

    /// Number of allocations performed so far.
    #[inline]
    pub fn allocs(&self) -> usize {
        self.allocs.load(Ordering::Relaxed)
    }

    /// Number of releases performed so far.
    #[inline]
    pub fn frees(&self) -> usize {
        self.frees.load(Ordering::Relaxed)
    }

    /// Bytes currently allocated but not yet released.
    #[inline]
    pub fn outstanding_bytes(&self) -> usize {
        self.alloc_bytes.load(Ordering::Relaxed) - self.freed_bytes.load(Ordering::Relaxed)
    }
}

impl<A: DeviceAllocator> DeviceAllocator for CountingAllocator<A> {
    fn alloc_raw(&self, layout: Layout) -> *mut u8 {
        self.allocs.fetch_add(1, Ordering::Relaxed);
        self.alloc_bytes.fetch_add(layout.size(), Ordering::Relaxed);
        self.inner.alloc_raw(layout)
    }

    unsafe fn dealloc_raw(&self, ptr: *mut u8, layout: Layout) {
        self.frees.fetch_add(1, Ordering::Relaxed);
        self.freed_bytes.fetch_add(layout.size(), Ordering::Relaxed);
        unsafe { self.inner.dealloc_raw(ptr, layout) }
    }

    #[inline]
    fn device(&self) -> DeviceType {
        self.inner.device()
    }
}
