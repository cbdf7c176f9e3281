use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ts_core::{DecodedFrame, Transform};

fn gradient(width: u32, height: u32) -> DecodedFrame {
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            rgb.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
    }
    DecodedFrame::new(width, height, rgb)
}

fn bench_transforms(c: &mut Criterion) {
    let frame = gradient(1920, 1080);
    let mut group = c.benchmark_group("pipeline_1080p");
    for t in Transform::ALL {
        group.bench_function(t.name(), |b| {
            b.iter(|| ts_filter::apply(black_box(&frame), t));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
