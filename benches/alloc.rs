use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use tensalloc::{suite, LeakScenarios};

#[cfg(feature = "leak-scenarios")]
const LEAKS: LeakScenarios = LeakScenarios::Include;
#[cfg(not(feature = "leak-scenarios"))]
const LEAKS: LeakScenarios = LeakScenarios::Skip;

fn bench_alloc_scenarios(c: &mut Criterion) {
    for scenario in suite(LEAKS) {
        let mut op = scenario.prepare();
        c.bench_function(scenario.name(), move |bench| bench.iter(&mut op));
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_millis(300));
    targets = bench_alloc_scenarios
);
criterion_main!(benches);
