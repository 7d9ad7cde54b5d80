//! Benchmarks for texel operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use texel_core::{Color, Image, PixelFormat, Rect};
use texel_ops::{adjust, composite, convert, generate, resize};

fn test_image(size: u32) -> Image {
    let (inner, outer) = (Color::new(240, 120, 30, 255), Color::new(10, 40, 200, 128));
    generate::gradient_radial(size, size, 0.2, inner, outer).expect("valid size")
}

/// Benchmark bilinear and nearest resize.
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");

    for size in [256u32, 1024].iter() {
        let img = test_image(*size);
        group.throughput(Throughput::Elements((*size as u64) * (*size as u64)));

        group.bench_with_input(BenchmarkId::new("bilinear_half", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                resize::resize(&mut out, black_box(size / 2), black_box(size / 2)).unwrap();
                out
            })
        });

        group.bench_with_input(BenchmarkId::new("nearest_double", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                resize::resize_nearest(&mut out, black_box(size * 2), black_box(size * 2)).unwrap();
                out
            })
        });
    }

    group.finish();
}

/// Benchmark format conversion and dithering.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let img = test_image(512);
    group.throughput(Throughput::Elements(512 * 512));

    for format in [PixelFormat::Grayscale, PixelFormat::R5G6B5, PixelFormat::R8G8B8] {
        group.bench_with_input(BenchmarkId::new("convert", format), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                convert::convert(&mut out, black_box(format)).unwrap();
                out
            })
        });
    }

    group.bench_function("dither_r4g4b4a4", |b| {
        b.iter(|| {
            let mut out = img.clone();
            convert::dither_to(&mut out, black_box(PixelFormat::R4G4B4A4)).unwrap();
            out
        })
    });

    group.finish();
}

/// Benchmark per-pixel adjustments and compositing.
fn bench_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjust");
    let img = test_image(512);
    let shade = Color::new(0, 0, 0, 96);
    let overlay = generate::checkerboard(128, 128, 8, 8, Color::WHITE, shade).unwrap();
    group.throughput(Throughput::Elements(512 * 512));

    group.bench_function("contrast", |b| {
        b.iter(|| {
            let mut out = img.clone();
            adjust::contrast(&mut out, black_box(35.0)).unwrap();
            out
        })
    });

    group.bench_function("tint", |b| {
        b.iter(|| {
            let mut out = img.clone();
            adjust::tint(&mut out, black_box(Color::new(200, 180, 255, 255))).unwrap();
            out
        })
    });

    group.bench_function("draw_scaled", |b| {
        b.iter(|| {
            let mut out = img.clone();
            let target = black_box(Rect::new(-32, 40, 400, 300));
            composite::draw(&mut out, &overlay, overlay.bounds(), target).unwrap();
            out
        })
    });

    group.finish();
}

/// Benchmark procedural generators.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Elements(256 * 256));

    group.bench_function("perlin_fbm_4", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            generate::perlin_fbm(256, 256, black_box(0.02), 4, 2.0, 0.5, &mut rng).unwrap()
        })
    });

    group.bench_function("cellular_16", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            generate::cellular(256, 256, black_box(16), &mut rng).unwrap()
        })
    });

    group.bench_function("white_noise", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            generate::white_noise(256, 256, black_box(0.5), &mut rng).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_resize, bench_convert, bench_adjust, bench_generate);
criterion_main!(benches);
