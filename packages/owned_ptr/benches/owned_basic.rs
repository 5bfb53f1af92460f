//! Basic benchmarks for the `owned_ptr` package.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use owned_ptr::{Owned, OwnedArray, make_owned, malloc_owned};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("owned_lifecycle");

    group.bench_function("box_baseline", |b| {
        b.iter(|| drop(black_box(Box::new(TEST_VALUE))));
    });

    group.bench_function("make_owned", |b| {
        b.iter(|| drop(black_box(make_owned(TEST_VALUE))));
    });

    group.bench_function("malloc_owned", |b| {
        b.iter(|| drop(black_box(malloc_owned(TEST_VALUE))));
    });

    group.bench_function("reset_chain", |b| {
        b.iter(|| {
            let mut owned = Owned::<TestItem>::new();
            for _ in 0..100 {
                // SAFETY: Each pointer is a fresh Box allocation owned by nobody else.
                unsafe {
                    owned.reset(Box::into_raw(Box::new(TEST_VALUE)));
                }
            }
            owned
        });
    });

    group.finish();

    let mut transfer_group = c.benchmark_group("owned_transfer");

    transfer_group.bench_function("assign", |b| {
        let mut target = make_owned(TEST_VALUE);
        b.iter(|| {
            let mut source = make_owned(TEST_VALUE);
            target.assign(black_box(&mut source));
        });
    });

    transfer_group.bench_function("swap", |b| {
        let mut left = make_owned(TEST_VALUE);
        let mut right = make_owned(TEST_VALUE);
        b.iter(|| left.swap(black_box(&mut right)));
    });

    transfer_group.finish();

    let mut array_group = c.benchmark_group("owned_array");

    array_group.bench_function("from_fn_1000", |b| {
        b.iter(|| OwnedArray::from_fn(1000, black_box));
    });

    array_group.bench_function("index_sum_1000", |b| {
        let array = OwnedArray::from_fn(1000, |i| i);
        b.iter(|| {
            let mut sum: usize = 0;
            for i in 0..array.len() {
                sum = sum.wrapping_add(array[black_box(i)]);
            }
            sum
        });
    });

    array_group.finish();
}
