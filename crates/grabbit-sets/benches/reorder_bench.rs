//! Benchmarks for reordering, directional resolution, and dispatch.
//!
//! Run with: `cargo bench -p grabbit-sets --bench reorder_bench`
//!
//! Reorders happen on every drag-over and sit on the pointer-move path,
//! so the interesting shapes are the worst cases: dragging the first item
//! over the last (maximum shift for insertion) and full dispatch through
//! the adapter, machines, and set mutation.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use grabbit_core::event::InputEvent;
use grabbit_core::geometry::{Direction, Point, Rect};
use grabbit_core::item::{ItemConfig, ItemKey, SetId};
use grabbit_sets::resolver::resolve;
use grabbit_sets::{
    DragManager, ItemSet, NullHost, ReorderStrategy, SetConfig, plan_moves, resolve_moves,
};

const SIZES: [u64; 3] = [8, 64, 512];

fn fresh_set(n: u64, strategy: ReorderStrategy) -> ItemSet {
    let mut set = ItemSet::with_config(SetId(1), SetConfig::new().with_strategy(strategy));
    for id in 0..n {
        set.push(ItemKey(id));
    }
    set
}

fn row_rects(n: u64) -> Vec<(ItemKey, Rect)> {
    (0..n)
        .map(|id| (ItemKey(id), Rect::new(id as f32 * 20.0, 0.0, 10.0, 10.0)))
        .collect()
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("sets/reorder");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("insertion_first_to_last", n), &n, |b, &n| {
            b.iter_batched(
                || fresh_set(n, ReorderStrategy::Insertion),
                |mut set| black_box(set.reorder(ItemKey(0), ItemKey(n - 1))),
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("swap_ends", n), &n, |b, &n| {
            b.iter_batched(
                || fresh_set(n, ReorderStrategy::Swap),
                |mut set| black_box(set.reorder(ItemKey(0), ItemKey(n - 1))),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sets/resolve");

    for n in SIZES {
        let candidates = row_rects(n);
        let origin = candidates[0].1;
        group.bench_with_input(BenchmarkId::new("row_rightward", n), &candidates, |b, cands| {
            b.iter(|| black_box(resolve(origin, Direction::Right, &cands[1..])));
        });
    }

    group.finish();
}

fn bench_animation_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("sets/animate");

    for n in SIZES {
        let previous: Vec<ItemKey> = (0..n).map(ItemKey).collect();
        // Rotate by one: every slot gains a new occupant.
        let mut current = previous.clone();
        current.rotate_left(1);
        let rects = row_rects(n);

        group.bench_with_input(BenchmarkId::new("rotation", n), &n, |b, _| {
            b.iter(|| {
                let plan = plan_moves(&previous, &current);
                black_box(resolve_moves(&plan, |key| {
                    rects.iter().find(|(k, _)| *k == key).map(|(_, r)| *r)
                }))
            });
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager/dispatch");

    for n in SIZES {
        let mut mgr = DragManager::new();
        mgr.add_set(ItemSet::new(SetId(1))).unwrap();
        for id in 0..n {
            mgr.register_item(ItemKey(id), SetId(1), ItemConfig::new())
                .unwrap();
        }
        let mut host = NullHost;
        mgr.dispatch(
            &InputEvent::PointerDown {
                item: ItemKey(0),
                part: None,
            },
            &mut host,
        )
        .unwrap();
        mgr.dispatch(
            &InputEvent::DragStarted {
                item: ItemKey(0),
                page: Point::ZERO,
                offset: Point::ZERO,
            },
            &mut host,
        )
        .unwrap();

        // Alternate between two targets so every over performs a reorder.
        let targets = [n / 2, n - 1];
        let events: Vec<[InputEvent; 2]> = targets
            .iter()
            .map(|&t| {
                [
                    InputEvent::DragEntered { item: ItemKey(t) },
                    InputEvent::DraggedOver {
                        item: ItemKey(t),
                        page: Point::ZERO,
                        offset: Point::ZERO,
                    },
                ]
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("enter_and_over", n), &n, |b, _| {
            b.iter(|| {
                for pair in &events {
                    for event in pair {
                        mgr.dispatch(black_box(event), &mut host).unwrap();
                    }
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_reorder,
    bench_resolve,
    bench_animation_planning,
    bench_dispatch,
);
criterion_main!(benches);
