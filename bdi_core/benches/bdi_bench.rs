use std::hint::black_box;

use bdi_core::Codec;
use criterion::{criterion_group, criterion_main, Criterion};

const PERLBENCH: [u64; 8] = [
    0xc040_39c0,
    0xc040_39c8,
    0xc040_39d0,
    0xc040_39d8,
    0xc040_39e0,
    0xc040_39e8,
    0xc040_39f0,
    0xc040_39f8,
];

const SCATTERED: [u64; 8] = [
    0xa040_39c0_0000_0001,
    0x1b04_39c8,
    0xc040_39d0_0000_0000,
    0xd040_39f8,
    0x0000_0001,
    0xffff_ffff_ffff_0000,
    0x1234,
    0x8000_0000_0000_0000,
];

fn bench_compress(c: &mut Criterion) {
    let codec = Codec::default();
    c.bench_function("compress_perlbench_line", |b| {
        b.iter(|| codec.compress(black_box(&PERLBENCH)))
    });
    c.bench_function("compress_scattered_line", |b| {
        b.iter(|| codec.compress(black_box(&SCATTERED)))
    });
}

fn bench_decompress(c: &mut Criterion) {
    let codec = Codec::default();
    let out = codec.compress(&PERLBENCH).unwrap();
    let bytes = out.to_bytes().unwrap();
    let tag = out.elements[5].tag;
    c.bench_function("decompress_one_value", |b| {
        b.iter(|| codec.decompress(black_box(&bytes), black_box(tag)))
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
