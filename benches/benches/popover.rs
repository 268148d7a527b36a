// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for per-pass popover work: anchor registry reduction and lookup,
//! outline construction, and full composition.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Rect, Shape};
use understory_popover::{
    AnchorRegistry, ArrowShape, LayoutPass, PopoverKind, Position, anchor_view, popover_view,
};

fn anchor_rect(i: usize) -> Rect {
    let x = (i % 32) as f64 * 40.0;
    let y = (i / 32) as f64 * 24.0;
    Rect::new(x, y, x + 36.0, y + 20.0)
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/registry");

    // Every anchor contributes a single-entry registry that is reduced into the pass.
    for len in [16_usize, 256, 4_096] {
        let views: Vec<_> = (0..len).map(|i| anchor_view(format!("anchor-{i}"))).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("reduce", len), &views, |b, views| {
            b.iter(|| {
                let mut registry = AnchorRegistry::new();
                for (i, view) in views.iter().enumerate() {
                    registry.reduce(view.contribute(anchor_rect(i)));
                }
                black_box(registry);
            });
        });

        let registry: AnchorRegistry = views
            .iter()
            .enumerate()
            .map(|(i, view)| view.contribute(anchor_rect(i)))
            .fold(AnchorRegistry::new(), AnchorRegistry::merge);
        let last = format!("anchor-{}", len - 1);
        group.bench_with_input(BenchmarkId::new("lookup_last", len), &registry, |b, r| {
            b.iter(|| black_box(r.bounds(black_box(&last))));
        });
    }

    group.finish();
}

fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/outline");
    let rect = Rect::new(0.0, 0.0, 240.0, 120.0);

    for position in [Position::None, Position::Top, Position::BottomRight] {
        let shape = ArrowShape::new(rect, position, 20.0, 10.0);
        group.bench_function(BenchmarkId::new("to_path", format!("{position:?}")), |b| {
            b.iter(|| black_box(black_box(&shape).to_path(0.1)));
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/compose");

    let mut pass = LayoutPass::new();
    for i in 0..256 {
        pass.anchor(&anchor_view(format!("anchor-{i}")), anchor_rect(i));
    }

    for kind in [PopoverKind::Popover, PopoverKind::Popout] {
        let view = popover_view(
            0_u32,
            true,
            Rect::new(0.0, 0.0, 200.0, 120.0),
            kind,
            Position::Bottom,
            "anchor-128",
        );
        group.bench_function(BenchmarkId::new("single", format!("{kind:?}")), |b| {
            b.iter(|| black_box(pass.popover(black_box(&view), Affine::IDENTITY)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registry, bench_outline, bench_compose);
criterion_main!(benches);
