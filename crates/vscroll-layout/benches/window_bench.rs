//! Benchmark: rectangle collection and render-window selection.
//!
//! Run with: `cargo bench -p vscroll-layout --bench window_bench`
//!
//! Collection reruns whenever a measurement batch changes a height; selection
//! runs at most once per frame while scrolling. Both are linear in list length.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vscroll_core::diagnostics::IgnoreDiagnostics;
use vscroll_core::geometry::Rectangle;
use vscroll_core::identity::{ItemId, OrderedList};
use vscroll_layout::{HeightTable, collect, render_window, select};

fn list(len: usize) -> OrderedList<u32> {
    OrderedList::ingest(
        0..len as u32,
        |n: &u32| ItemId::from(*n),
        &mut IgnoreDiagnostics,
    )
}

fn measured(list: &OrderedList<u32>) -> HeightTable {
    let mut heights = HeightTable::new();
    heights.record(
        list.iter()
            .map(|item| (item.id.clone(), 20.0 + f64::from(item.data % 7) * 9.0)),
        40.0,
        &mut IgnoreDiagnostics,
    );
    heights
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");
    for &len in &[1_000usize, 10_000, 100_000] {
        let rows = list(len);
        let heights = measured(&rows);
        group.bench_with_input(BenchmarkId::new("measured", len), &rows, |b, rows| {
            b.iter(|| black_box(collect(rows, &heights, 40.0).total_height()));
        });
    }
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    for &len in &[1_000usize, 10_000, 100_000] {
        let rows = list(len);
        let rects = collect(&rows, &measured(&rows), 40.0);
        let middle = rects.total_height() / 2.0;
        let window = render_window(Rectangle::new(middle, 800.0), 1.8);
        group.bench_with_input(BenchmarkId::new("middle", len), &rows, |b, rows| {
            b.iter(|| black_box(select(rows, &rects, window)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_collect, bench_select);
criterion_main!(benches);
