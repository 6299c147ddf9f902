use core::alloc::Layout;
use core::ptr;

use crate::{host_allocator, DeviceAllocator};

/// A single raw block sized and aligned for one `T`, reused across
/// construct-in-place calls.
///
/// The occupant's lifetime is managed explicitly: [`RawSlot::write`]
/// constructs without dropping a previous occupant, [`RawSlot::destroy`]
/// drops in place. Dropping the slot releases the block itself, never the
/// occupant.
pub struct RawSlot<T> {
    ptr: *mut T,
    allocator: &'static dyn DeviceAllocator,
}

impl<T> RawSlot<T> {
    pub fn new() -> RawSlot<T> {
        Self::new_in(host_allocator())
    }

    pub fn new_in(allocator: &'static dyn DeviceAllocator) -> RawSlot<T> {
        let ptr = allocator.alloc_raw(Layout::new::<T>()).cast();
        RawSlot { ptr, allocator }
    }

    /// Constructs `value` in place, overwriting a previous occupant
    /// without dropping it, like placement-new.
    ///
    /// # Example
    /// ```
    /// use tensalloc::RawSlot;
    ///
    /// let mut slot = RawSlot::<u64>::new();
    /// *slot.write(21) += 21;
    /// assert_eq!(*slot.write(9), 9);
    /// unsafe { slot.destroy() };
    /// ```
    #[inline]
    pub fn write(&mut self, value: T) -> &mut T {
        unsafe {
            ptr::write(self.ptr, value);
            &mut *self.ptr
        }
    }

    /// Drops the occupant in place. The slot stays usable for further
    /// [`RawSlot::write`] calls.
    ///
    /// # Safety
    ///
    /// The slot must hold a value written since the last `destroy`.
    #[inline]
    pub unsafe fn destroy(&mut self) {
        unsafe { ptr::drop_in_place(self.ptr) }
    }
}

impl<T> Default for RawSlot<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawSlot<T> {
    fn drop(&mut self) {
        unsafe {
            self.allocator
                .dealloc_raw(self.ptr.cast(), Layout::new::<T>())
        }
    }
}
