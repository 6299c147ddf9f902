use std::rc::Rc;

use crate::{
    device_allocator, AsDType, DType, DeviceAllocator, DeviceError, DeviceType, StorageImpl,
};

/// Construction-time options: element type and target device.
///
/// # Example
/// ```
/// use tensalloc::{DType, DeviceType, TensorOptions};
///
/// let options = TensorOptions::new(DeviceType::Host).with_dtype(DType::I32);
/// assert_eq!(options.dtype(), DType::I32);
/// assert_eq!(options.device(), DeviceType::Host);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorOptions {
    dtype: DType,
    device: DeviceType,
}

impl Default for TensorOptions {
    #[inline]
    fn default() -> Self {
        TensorOptions {
            dtype: f32::dtype(),
            device: DeviceType::Host,
        }
    }
}

impl TensorOptions {
    #[inline]
    pub fn new(device: DeviceType) -> TensorOptions {
        TensorOptions {
            device,
            ..Default::default()
        }
    }

    #[inline]
    pub fn with_dtype(mut self, dtype: DType) -> TensorOptions {
        self.dtype = dtype;
        self
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn device(&self) -> DeviceType {
        self.device
    }
}

/// Shape, stride, dtype and device metadata referencing a [`StorageImpl`].
#[derive(Debug)]
pub struct TensorImpl {
    storage: Rc<StorageImpl>,
    shape: Vec<usize>,
    strides: Vec<usize>,
    dtype: DType,
    device: DeviceType,
}

fn contiguous_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    let mut acc = 1;

    for i in (0..shape.len()).rev() {
        strides[i] = acc;
        acc *= shape[i].max(1);
    }

    strides
}

impl TensorImpl {
    /// Creates the legacy shape-`[0]` header over an existing storage.
    pub fn new(storage: Rc<StorageImpl>, device: DeviceType) -> TensorImpl {
        let dtype = storage.dtype();

        TensorImpl {
            storage,
            shape: vec![0],
            strides: vec![1],
            dtype,
            device,
        }
    }

    /// Creates a contiguous header of the given shape over an existing
    /// storage. The storage must hold at least as many elements as the
    /// shape describes.
    pub fn with_shape(storage: Rc<StorageImpl>, shape: &[usize]) -> crate::Result<TensorImpl> {
        if shape.iter().product::<usize>() > storage.numel() {
            return Err(DeviceError::StorageTooSmall.into());
        }

        Ok(Self::from_parts(storage, shape.to_vec()))
    }

    fn from_parts(storage: Rc<StorageImpl>, shape: Vec<usize>) -> TensorImpl {
        let strides = contiguous_strides(&shape);
        let dtype = storage.dtype();
        let device = storage.device();

        TensorImpl {
            storage,
            shape,
            strides,
            dtype,
            device,
        }
    }

    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
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
    pub fn storage(&self) -> &Rc<StorageImpl> {
        &self.storage
    }
}

/// Owning, refcounted tensor handle.
#[derive(Debug, Clone)]
pub struct Tensor {
    inner: Rc<TensorImpl>,
}

impl Tensor {
    /// Full managed construction of a tensor over an existing storage.
    #[inline]
    pub fn from_storage(storage: Rc<StorageImpl>, device: DeviceType) -> Tensor {
        Tensor {
            inner: Rc::new(TensorImpl::new(storage, device)),
        }
    }

    /// Allocates an uninitialized tensor of the given shape on the device
    /// selected by `options`.
    ///
    /// # Example
    /// ```
    /// use tensalloc::{DeviceType, Tensor, TensorOptions};
    ///
    /// let tensor = Tensor::empty(&[3, 4], TensorOptions::new(DeviceType::Host)).unwrap();
    /// assert_eq!(tensor.numel(), 12);
    /// assert_eq!(tensor.strides(), &[4, 1]);
    /// ```
    pub fn empty(shape: &[usize], options: TensorOptions) -> crate::Result<Tensor> {
        let allocator = device_allocator(options.device())?;
        Ok(Self::empty_in(shape, options, allocator))
    }

    /// Like [`Tensor::empty`], with an explicitly supplied allocator.
    pub fn empty_in(
        shape: &[usize],
        options: TensorOptions,
        allocator: &'static dyn DeviceAllocator,
    ) -> Tensor {
        let numel = shape.iter().product();
        let storage = StorageImpl::make(options.dtype(), numel, allocator, true);

        Tensor {
            inner: Rc::new(TensorImpl::from_parts(storage, shape.to_vec())),
        }
    }

    #[inline]
    pub fn numel(&self) -> usize {
        self.inner.numel()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.inner.shape()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.inner.strides()
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype()
    }

    #[inline]
    pub fn device(&self) -> DeviceType {
        self.inner.device()
    }

    #[inline]
    pub fn storage(&self) -> &Rc<StorageImpl> {
        self.inner.storage()
    }
}

#[cfg(test)]
mod tests {
    use super::contiguous_strides;

    #[test]
    fn test_contiguous_strides() {
        assert_eq!(contiguous_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(contiguous_strides(&[5]), vec![1]);
        assert_eq!(contiguous_strides(&[0]), vec![1]);
        assert!(contiguous_strides(&[]).is_empty());
    }
}
