use tensalloc::{
    suite_in, CountingAllocator, DeviceType, HostAllocator, LeakScenarios, Tensor, TensorOptions,
    ALLOC_SIZES,
};

#[test]
fn test_matrix_covers_declared_sizes() {
    let lens: Vec<usize> = ALLOC_SIZES.iter().map(|&(_, len, _)| len).collect();
    assert_eq!(lens, [1, 9, 1024, 4032, 1_048_576, 8_392_704]);

    assert!(ALLOC_SIZES
        .iter()
        .all(|&(_, _, device)| device == DeviceType::Host));
}

#[test]
fn test_matrix_tensors_have_exact_element_counts() {
    for &(_, len, device) in ALLOC_SIZES {
        let tensor = Tensor::empty(&[len], TensorOptions::new(device)).unwrap();

        assert_eq!(tensor.numel(), len);
        assert_eq!(tensor.shape(), &[len]);
        assert_eq!(tensor.storage().numel(), len);
    }
}

#[test]
fn test_matrix_scenarios_release_before_next_iteration() {
    static PROBE: CountingAllocator<HostAllocator> = CountingAllocator::new(HostAllocator);

    let scenarios = suite_in(LeakScenarios::Skip, &PROBE);

    for &(name, _, _) in ALLOC_SIZES {
        let scenario = scenarios
            .iter()
            .find(|scenario| scenario.name() == name)
            .unwrap();

        let allocs_before = PROBE.allocs();
        let frees_before = PROBE.frees();
        let outstanding_before = PROBE.outstanding_bytes();

        let mut op = scenario.prepare();
        for done in 1..=5 {
            op();
            assert_eq!(PROBE.allocs() - allocs_before, done, "{name}");
            assert_eq!(PROBE.frees() - frees_before, done, "{name}");
        }
        drop(op);

        assert_eq!(PROBE.outstanding_bytes(), outstanding_before, "{name}");
    }
}
