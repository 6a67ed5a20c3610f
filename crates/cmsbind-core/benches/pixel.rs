//! Single-pixel transform benchmarks
//!
//! Measures the per-call cost of the capsule checks and scratch marshaling
//! on top of one engine call.

use cmsbind_core::{Cms, INTENT_PERCEPTUAL, PixelFormat, SampleKind, flags};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_single_pixel");

    let cms = Cms::new();
    let srgb = cms.create_srgb_profile().unwrap();
    let lab = cms.create_lab_profile().unwrap();

    let cases = [
        ("rgba8_to_rgba8", PixelFormat::Rgba8, &srgb, PixelFormat::Rgba8, SampleKind::Byte),
        ("rgba8_to_lab_dbl", PixelFormat::Rgba8, &lab, PixelFormat::LabDouble, SampleKind::Double),
    ];

    for (name, in_fmt, output, out_fmt, out_kind) in cases {
        for precalc in [true, false] {
            let flags = if precalc { 0 } else { flags::NOTPRECALC };
            let transform = cms
                .build_transform(&srgb, in_fmt, output, out_fmt, INTENT_PERCEPTUAL as i32, flags)
                .unwrap();
            let id = BenchmarkId::new(name, if precalc { "precalc" } else { "notprecalc" });
            group.bench_function(id, |b| {
                b.iter(|| {
                    cms.apply_transform8(&transform, black_box([200, 100, 50, 0]), out_kind)
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

fn bench_normalized(c: &mut Criterion) {
    let cms = Cms::new();
    let srgb = cms.create_srgb_profile().unwrap();
    let transform = cms
        .build_transform(&srgb, PixelFormat::Rgba8, &srgb, PixelFormat::Rgba8, 1, 0)
        .unwrap();

    c.bench_function("apply_normalized", |b| {
        b.iter(|| cms.apply_normalized(&transform, black_box([0.5, 0.25, 1.0, 0.0])).unwrap())
    });
}

criterion_group!(benches, bench_apply, bench_normalized);
criterion_main!(benches);
