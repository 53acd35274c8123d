use criterion::{black_box, BatchSize, Criterion};

use typewriter::output::OutputExt as _;
use typewriter::{Grid, Output, Style};

fn main() {
    let mut c = Criterion::default().configure_from_args();

    let lines: Vec<String> = (0..96)
        .map(|i| "The quick brown fox jumps over the lazy dog. ".repeat(i % 7 + 1))
        .collect();

    c.bench_function("frame", |b| {
        b.iter(|| typewriter::frame(black_box(&lines), black_box(150)));
    });

    let shown = typewriter::frame(&lines, 150);
    c.bench_function("redraw 320x96", |b| {
        b.iter_batched_ref(
            || Grid::new((320, 96)),
            |grid| {
                grid.clear();
                for (y, line) in (0..).zip(&shown) {
                    grid.write((0, y), line, Style::default());
                }
            },
            BatchSize::LargeInput,
        );
    });

    c.final_summary();
}
