//! Binding overhead against direct lcms2 calls
//!
//! Both sides transform the same single pixel through the same native
//! engine; the difference is capsule checking and scratch marshaling.

use cmsbind_core::{Cms, INTENT_RELATIVE_COLORIMETRIC, PixelFormat, SampleKind};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lcms2::{Intent, Profile, Transform};

fn bench_single_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_pixel_srgb_identity");

    let cms = Cms::new();
    let srgb = cms.create_srgb_profile().unwrap();
    let ours = cms
        .build_transform(
            &srgb,
            PixelFormat::Rgba8,
            &srgb,
            PixelFormat::Rgba8,
            INTENT_RELATIVE_COLORIMETRIC as i32,
            0,
        )
        .unwrap();

    let profile = Profile::new_srgb();
    let theirs = Transform::<[u8; 4], [u8; 4]>::new(
        &profile,
        lcms2::PixelFormat::RGBA_8,
        &profile,
        lcms2::PixelFormat::RGBA_8,
        Intent::RelativeColorimetric,
    )
    .unwrap();

    group.bench_function("cmsbind", |b| {
        b.iter(|| {
            cms.apply_transform8(&ours, black_box([200, 100, 50, 0]), SampleKind::Byte)
                .unwrap()
        })
    });

    group.bench_function("lcms2", |b| {
        let mut out = [[0u8; 4]];
        b.iter(|| {
            theirs.transform_pixels(black_box(&[[200, 100, 50, 0]]), &mut out);
            out[0]
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_pixel);
criterion_main!(benches);
