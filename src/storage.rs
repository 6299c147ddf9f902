use core::alloc::Layout;
use core::ptr::null_mut;
use std::rc::Rc;

use crate::{DType, DeviceAllocator, DeviceType};

/// Header of the raw buffer backing tensor data, independent of any
/// shape or stride metadata referencing it.
///
/// The buffer is uninitialized on construction and is released through the
/// same allocator it was obtained from. A zero-element storage holds a null
/// pointer and owns no memory.
pub struct StorageImpl {
    data: *mut u8,
    numel: usize,
    dtype: DType,
    device: DeviceType,
    allocator: &'static dyn DeviceAllocator,
    resizable: bool,
}

impl StorageImpl {
    /// Allocates a storage of `numel` elements of `dtype` through `allocator`.
    pub fn new(
        dtype: DType,
        numel: usize,
        allocator: &'static dyn DeviceAllocator,
        resizable: bool,
    ) -> StorageImpl {
        let data = if numel == 0 {
            null_mut()
        } else {
            allocator.alloc_raw(Self::layout(dtype, numel))
        };

        StorageImpl {
            data,
            numel,
            dtype,
            device: allocator.device(),
            allocator,
            resizable,
        }
    }

    /// Refcounted construction, the standard entry point for
    /// library-managed storages.
    ///
    /// # Example
    /// ```
    /// use tensalloc::{host_allocator, DType, StorageImpl};
    ///
    /// let storage = StorageImpl::make(DType::F32, 12, host_allocator(), true);
    /// assert_eq!(storage.numel(), 12);
    /// assert_eq!(storage.nbytes(), 48);
    /// ```
    #[inline]
    pub fn make(
        dtype: DType,
        numel: usize,
        allocator: &'static dyn DeviceAllocator,
        resizable: bool,
    ) -> Rc<StorageImpl> {
        Rc::new(StorageImpl::new(dtype, numel, allocator, resizable))
    }

    fn layout(dtype: DType, numel: usize) -> Layout {
        Layout::from_size_align(numel * dtype.size_of(), dtype.size_of()).unwrap()
    }

    /// The amount of elements the backing buffer holds.
    #[inline]
    pub fn numel(&self) -> usize {
        self.numel
    }

    /// The size of the backing buffer in bytes.
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.numel * self.dtype.size_of()
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn device(&self) -> DeviceType {
        self.device
    }

    #[inline]
    pub fn resizable(&self) -> bool {
        self.resizable
    }

    /// Raw pointer to the backing buffer, null for zero-element storages.
    #[inline]
    pub fn data_ptr(&self) -> *mut u8 {
        self.data
    }
}

impl core::fmt::Debug for StorageImpl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StorageImpl")
            .field("numel", &self.numel)
            .field("dtype", &self.dtype)
            .field("device", &self.device)
            .field("resizable", &self.resizable)
            .finish()
    }
}

impl Drop for StorageImpl {
    fn drop(&mut self) {
        if self.data.is_null() {
            return;
        }

        unsafe {
            self.allocator
                .dealloc_raw(self.data, Self::layout(self.dtype, self.numel))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{host_allocator, CountingAllocator, DType, DeviceType, HostAllocator, StorageImpl};

    #[test]
    fn test_zero_element_storage_owns_no_memory() {
        let storage = StorageImpl::new(DType::F32, 0, host_allocator(), true);
        assert!(storage.data_ptr().is_null());
        assert_eq!(storage.nbytes(), 0);
        assert_eq!(storage.device(), DeviceType::Host);
        assert!(storage.resizable());
    }

    #[test]
    fn test_storage_releases_through_its_allocator() {
        static PROBE: CountingAllocator<HostAllocator> = CountingAllocator::new(HostAllocator);

        {
            let storage = StorageImpl::make(DType::I64, 10, &PROBE, true);
            assert_eq!(storage.nbytes(), 80);
            assert_eq!(PROBE.allocs(), 1);
            assert_eq!(PROBE.outstanding_bytes(), 80);
        }

        assert_eq!(PROBE.frees(), 1);
        assert_eq!(PROBE.outstanding_bytes(), 0);
    }
}
