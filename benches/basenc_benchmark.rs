use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use basenc_rs::basenc::{self, Scheme};

fn generate_data(size: usize) -> Vec<u8> {
    let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..size)
        .map(|_| {
            x ^= x << 7;
            x ^= x >> 9;
            x as u8
        })
        .collect()
}

fn encode_to_vec(scheme: Scheme, data: &[u8], wrap: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(scheme.encoded_len(data.len()) + data.len() / 32 + 8);
    basenc::encode_stream(&mut &data[..], &mut out, scheme, wrap).unwrap();
    out
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("basenc_encode");
    let data = generate_data(4 * 1024 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));
    for scheme in [Scheme::Base64, Scheme::Base32, Scheme::Base16, Scheme::Z85] {
        group.bench_with_input(BenchmarkId::new(scheme.name(), "4MB"), &data, |b, data| {
            b.iter(|| encode_to_vec(scheme, black_box(data), basenc::DEFAULT_WRAP))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("basenc_decode");
    let data = generate_data(4 * 1024 * 1024);
    for scheme in [Scheme::Base64, Scheme::Base32, Scheme::Base16, Scheme::Z85] {
        let encoded = encode_to_vec(scheme, &data, basenc::DEFAULT_WRAP);
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new(scheme.name(), "4MB"), &encoded, |b, encoded| {
            b.iter(|| {
                let mut out = Vec::with_capacity(data.len());
                basenc::decode_stream(&mut &encoded[..], &mut out, scheme, false).unwrap();
                out
            })
        });
    }
    group.finish();
}

fn bench_decode_ignore_garbage(c: &mut Criterion) {
    let data = generate_data(1024 * 1024);
    let mut noisy = Vec::new();
    for line in encode_to_vec(Scheme::Base64, &data, 64).split(|&b| b == b'\n') {
        noisy.extend_from_slice(line);
        noisy.extend_from_slice(b" \t*\n");
    }
    c.bench_function("basenc_decode_ignore_garbage_1MB", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(data.len());
            basenc::decode_stream(&mut black_box(&noisy[..]), &mut out, Scheme::Base64, true)
                .unwrap();
            out
        })
    });
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("basenc_wrap");
    let data = generate_data(1024 * 1024);
    for wrap in [0, 64, 76] {
        group.bench_with_input(BenchmarkId::new("base64", wrap), &data, |b, data| {
            b.iter(|| encode_to_vec(Scheme::Base64, black_box(data), wrap))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_decode_ignore_garbage,
    bench_wrap
);
criterion_main!(benches);
