//! Direct vs fast transform throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spectra::{generate, Dft, Fft};

fn bench_transforms(c: &mut Criterion) {
    let signal = generate::tone_sampling(1.0, 1_000.0, 48_000.0, 1024);

    let dft = Dft::new(1024).unwrap();
    c.bench_function("dft_1024", |b| {
        b.iter(|| dft.transform(black_box(&signal)).unwrap())
    });

    let fft = Fft::new(1024).unwrap();
    c.bench_function("fft_1024", |b| {
        b.iter(|| fft.forward(black_box(&signal)).unwrap())
    });

    let padded = Fft::with_working_length(1024, 4096).unwrap();
    c.bench_function("fft_1024_padded_4096", |b| {
        b.iter(|| padded.forward(black_box(&signal)).unwrap())
    });
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
