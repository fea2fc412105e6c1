// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the retinote-document layout engine. Pagination
// is specified as a bounded, non-blocking computation proportional to item
// count — this keeps that promise measurable.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use retinote_core::types::DocumentItem;
use retinote_document::{LayoutEngine, LayoutMode};

/// Benchmark grid pagination over a large education-cartoon collection.
fn bench_grid_layout(c: &mut Criterion) {
    let items: Vec<DocumentItem> = (0..500u32)
        .map(|i| DocumentItem::new(format!("cartoon-{i}.png"), i).with_pixel_size(1200, 900))
        .collect();
    let engine = LayoutEngine::a4();

    c.bench_function("grid_layout 2x2 (500 items)", |b| {
        b.iter(|| {
            let plan = engine
                .layout(black_box(&items), LayoutMode::Grid { rows: 2, cols: 2 })
                .expect("layout");
            black_box(plan.page_count());
        });
    });
}

/// Benchmark single-per-page pagination with aspect-fit rects.
fn bench_single_layout(c: &mut Criterion) {
    let items: Vec<DocumentItem> = (0..500u32)
        .map(|i| DocumentItem::new(format!("cartoon-{i}.png"), i).with_pixel_size(1200, 900))
        .collect();
    let engine = LayoutEngine::a4();

    c.bench_function("single_layout (500 items)", |b| {
        b.iter(|| {
            let plan = engine
                .layout(black_box(&items), LayoutMode::Single)
                .expect("layout");
            black_box(plan.page_count());
        });
    });
}

criterion_group!(benches, bench_grid_layout, bench_single_layout);
criterion_main!(benches);
