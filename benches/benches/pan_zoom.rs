// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use understory_pan_zoom::{PanZoomConfig, PanZoomController, PanZoomMode, TouchId};

const A: TouchId = TouchId(1);
const B: TouchId = TouchId(2);

fn pinching_controller() -> PanZoomController {
    let mut pz = PanZoomController::new(PanZoomConfig {
        pan_bounds: Some(Rect::new(0.0, 0.0, 1_024.0, 768.0)),
        rubber_edges_margin: 200.0,
        ..PanZoomConfig::default()
    });
    pz.touch_began(A, Point::new(400.0, 300.0), 1, &mut ());
    pz.touch_began(B, Point::new(600.0, 400.0), 1, &mut ());
    pz
}

fn bench_pinch_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("pan_zoom/pinch");

    // A pinch alternating between spreading and closing; each move is one
    // anchor-preserving zoom plus a bounds clamp.
    for moves in [64usize, 512, 4_096] {
        group.throughput(Throughput::Elements(moves as u64));
        group.bench_with_input(BenchmarkId::new("moves", moves), &moves, |b, &moves| {
            b.iter_batched(
                pinching_controller,
                |mut pz| {
                    for i in 0..moves {
                        let spread = if i % 2 == 0 { 20.0 } else { -20.0 };
                        let x = 600.0 + spread + (i % 7) as f64;
                        pz.touch_moved(B, Point::new(x, 400.0), &mut ());
                    }
                    black_box(pz.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_frame_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("pan_zoom/tick");

    // Frame-mode autoscroll with a touch held in a corner: zone evaluation,
    // translation, and clamping every tick.
    for ticks in [60usize, 600] {
        group.throughput(Throughput::Elements(ticks as u64));
        group.bench_with_input(BenchmarkId::new("frame", ticks), &ticks, |b, &ticks| {
            b.iter_batched(
                || {
                    let mut pz = PanZoomController::new(PanZoomConfig {
                        mode: PanZoomMode::Frame,
                        pan_bounds: Some(Rect::new(0.0, 0.0, 1_024.0, 768.0)),
                        rubber_edges_margin: 1.0e9,
                        ..PanZoomConfig::default()
                    });
                    pz.touch_began(A, Point::new(10.0, 10.0), 1, &mut ());
                    pz
                },
                |mut pz| {
                    for _ in 0..ticks {
                        pz.tick(1.0 / 60.0, &mut ());
                    }
                    black_box(pz.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pinch_moves, bench_frame_ticks);
criterion_main!(benches);
