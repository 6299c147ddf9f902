//! The allocation scenario suite.
//!
//! Each scenario performs exactly one allocation-style operation per timed
//! iteration against seed state built once up front. The driver owns
//! iteration counts and timing; every produced value passes through
//! [`black_box`] so the operation cannot be elided.

use core::alloc::Layout;
use std::collections::HashSet;
use std::hint::black_box;

use crate::{
    host_allocator, make_variable, DeviceAllocator, DeviceType, RawSlot, StorageImpl, Tensor,
    TensorImpl, TensorOptions,
};

/// The per-iteration operation of one scenario.
pub type TimedOp = Box<dyn FnMut()>;

/// Whether the intentional-leak baselines are part of the suite.
///
/// The two leak baselines allocate one block per iteration and release
/// none, isolating allocator cost from any matching free. Every other
/// scenario returns to zero outstanding memory once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeakScenarios {
    #[default]
    Skip,
    Include,
}

/// One registered benchmark scenario.
pub struct Scenario {
    name: &'static str,
    leaks: bool,
    build: Box<dyn Fn() -> TimedOp>,
}

impl Scenario {
    fn new(name: &'static str, build: impl Fn() -> TimedOp + 'static) -> Scenario {
        Scenario {
            name,
            leaks: false,
            build: Box::new(build),
        }
    }

    fn leaky(name: &'static str, build: impl Fn() -> TimedOp + 'static) -> Scenario {
        Scenario {
            name,
            leaks: true,
            build: Box::new(build),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `true` for the labeled baselines that allocate without releasing.
    #[inline]
    pub fn leaks(&self) -> bool {
        self.leaks
    }

    /// Runs the one-time setup and returns the per-iteration operation.
    ///
    /// The returned closure is re-entrant and makes no assumption about
    /// how often the driver runs it. Seed objects and scratch memory live
    /// until the closure is dropped.
    #[inline]
    pub fn prepare(&self) -> TimedOp {
        (self.build)()
    }
}

/// The fixed-size allocation matrix: one scenario per `(name, element
/// count, device)` entry. Host only.
pub const ALLOC_SIZES: &[(&str, usize, DeviceType)] = &[
    ("tensor_alloc_small1", 1, DeviceType::Host),
    ("tensor_alloc_small2", 9, DeviceType::Host),
    ("tensor_alloc_medium1", 32 * 32, DeviceType::Host),
    ("tensor_alloc_medium2", 63 * 64, DeviceType::Host),
    ("tensor_alloc_big1", 1024 * 1024, DeviceType::Host),
    ("tensor_alloc_big2", 1024 * 8196, DeviceType::Host),
];

/// Builds the scenario list on the default host allocator.
#[inline]
pub fn suite(leaks: LeakScenarios) -> Vec<Scenario> {
    suite_in(leaks, host_allocator())
}

/// Builds the scenario list, routing every raw allocation through
/// `allocator`.
///
/// # Example
/// ```
/// use tensalloc::{suite, LeakScenarios};
///
/// let scenarios = suite(LeakScenarios::Skip);
/// assert!(scenarios.iter().all(|scenario| !scenario.leaks()));
///
/// let mut op = scenarios[0].prepare();
/// for _ in 0..3 {
///     op();
/// }
/// ```
pub fn suite_in(leaks: LeakScenarios, allocator: &'static dyn DeviceAllocator) -> Vec<Scenario> {
    let mut scenarios = vec![
        Scenario::new("make_storage_impl", move || {
            let options = TensorOptions::new(DeviceType::Host);
            // one zero-length allocation up front, first-use cost must not
            // land in the timed loop
            let _warmup = Tensor::empty_in(&[0], options, allocator);

            Box::new(move || {
                black_box(StorageImpl::make(options.dtype(), 0, allocator, true));
            })
        }),
        Scenario::new("storage_impl_ctor", move || {
            let options = TensorOptions::new(DeviceType::Host);
            let _warmup = Tensor::empty_in(&[0], options, allocator);
            let mut slot = RawSlot::<StorageImpl>::new_in(allocator);

            Box::new(move || {
                black_box(slot.write(StorageImpl::new(options.dtype(), 0, allocator, true)));
                unsafe { slot.destroy() };
            })
        }),
        Scenario::leaky("raw_alloc_storage_impl", move || {
            let layout = Layout::new::<StorageImpl>();

            Box::new(move || {
                // NB: leaks memory
                black_box(allocator.alloc_raw(layout));
            })
        }),
        Scenario::new("tensor_impl_ctor", move || {
            let options = TensorOptions::new(DeviceType::Host);
            let _warmup = Tensor::empty_in(&[0], options, allocator);
            let storage = StorageImpl::make(options.dtype(), 0, allocator, true);
            let device = storage.device();
            let mut slot = RawSlot::<TensorImpl>::new_in(allocator);

            Box::new(move || {
                black_box(slot.write(TensorImpl::new(storage.clone(), device)));
                unsafe { slot.destroy() };
            })
        }),
        Scenario::leaky("raw_alloc_tensor_impl", move || {
            let layout = Layout::new::<TensorImpl>();

            Box::new(move || {
                // NB: leaks memory
                black_box(allocator.alloc_raw(layout));
            })
        }),
        Scenario::new("raw_alloc_1", move || {
            let layout = Layout::new::<u8>();

            Box::new(move || {
                let ptr = black_box(allocator.alloc_raw(layout));
                unsafe { allocator.dealloc_raw(ptr, layout) };
            })
        }),
        Scenario::new("make_tensor_from_storage", move || {
            let options = TensorOptions::new(DeviceType::Host);
            let _warmup = Tensor::empty_in(&[0], options, allocator);
            let storage = StorageImpl::make(options.dtype(), 0, allocator, true);
            let device = storage.device();

            Box::new(move || {
                black_box(Tensor::from_storage(storage.clone(), device));
            })
        }),
        Scenario::new("make_variable_from_tensor", move || {
            let options = TensorOptions::new(DeviceType::Host);
            let tensor = Tensor::empty_in(&[0], options, allocator);

            Box::new(move || {
                black_box(make_variable(&tensor, false));
            })
        }),
    ];

    for &(name, len, device) in ALLOC_SIZES {
        scenarios.push(Scenario::new(name, move || {
            let options = TensorOptions::new(device);

            Box::new(move || {
                black_box(Tensor::empty_in(&[len], options, allocator));
            })
        }));
    }

    if leaks == LeakScenarios::Skip {
        scenarios.retain(|scenario| !scenario.leaks);
    }

    debug_assert!(unique_names(&scenarios));

    scenarios
}

/// `true` if no two scenarios share a registration name.
pub fn unique_names(scenarios: &[Scenario]) -> bool {
    let mut seen = HashSet::with_capacity(scenarios.len());
    scenarios.iter().all(|scenario| seen.insert(scenario.name))
}
