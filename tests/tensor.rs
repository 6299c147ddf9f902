use std::rc::Rc;

use tensalloc::prelude::*;

#[test]
fn test_empty_host_tensor() {
    let tensor = Tensor::empty(&[2, 3], TensorOptions::new(DeviceType::Host)).unwrap();

    assert_eq!(tensor.numel(), 6);
    assert_eq!(tensor.strides(), &[3, 1]);
    assert_eq!(tensor.dtype(), DType::F32);
    assert_eq!(tensor.device(), DeviceType::Host);
    assert_eq!(tensor.storage().nbytes(), 24);
}

#[test]
fn test_no_cuda_allocator_registered() {
    let err = Tensor::empty(&[4], TensorOptions::new(DeviceType::Cuda)).unwrap_err();
    assert_eq!(
        err.kind::<DeviceError>(),
        Some(&DeviceError::NoDeviceAllocator)
    );
}

#[test]
fn test_with_shape_rejects_undersized_storage() {
    let storage = StorageImpl::make(DType::F32, 4, host_allocator(), true);
    let err = TensorImpl::with_shape(storage, &[2, 3]).unwrap_err();
    assert_eq!(
        err.kind::<DeviceError>(),
        Some(&DeviceError::StorageTooSmall)
    );
}

#[test]
fn test_from_storage_shares_storage() {
    let storage = StorageImpl::make(DType::F32, 0, host_allocator(), true);
    let tensor = Tensor::from_storage(storage.clone(), DeviceType::Host);

    assert!(Rc::ptr_eq(tensor.storage(), &storage));
    assert_eq!(tensor.shape(), &[0]);
    assert_eq!(tensor.numel(), 0);
    assert_eq!(tensor.strides(), &[1]);
}

#[test]
fn test_variable_wraps_without_copying() {
    let tensor = Tensor::empty(&[16], TensorOptions::new(DeviceType::Host)).unwrap();
    let var = make_variable(&tensor, true);

    assert!(var.requires_grad());
    assert!(Rc::ptr_eq(var.tensor().storage(), tensor.storage()));
    assert_eq!(var.tensor().storage().data_ptr(), tensor.storage().data_ptr());
}

#[cfg(feature = "half")]
#[test]
fn test_f16_tensor_nbytes() {
    let options = TensorOptions::new(DeviceType::Host).with_dtype(DType::F16);
    let tensor = Tensor::empty(&[10], options).unwrap();

    assert_eq!(tensor.storage().nbytes(), 20);
}

#[test]
fn test_randomized_shapes_release_cleanly() {
    static PROBE: CountingAllocator<HostAllocator> = CountingAllocator::new(HostAllocator);

    fastrand::seed(42);

    for _ in 0..100 {
        let dims = fastrand::usize(1..=3);
        let shape: Vec<usize> = (0..dims).map(|_| fastrand::usize(0..64)).collect();

        let tensor = Tensor::empty_in(&shape, TensorOptions::default(), &PROBE);
        assert_eq!(tensor.numel(), shape.iter().product::<usize>());
    }

    assert_eq!(PROBE.outstanding_bytes(), 0);
}
