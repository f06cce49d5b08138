use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strongpass::{analyze, GenerationOptions, Generator, PasswordRng};

fn bench_generate(c: &mut Criterion) {
    let mut generator = Generator::new(PasswordRng::from_seed([42u8; 32]));
    let default = GenerationOptions::default();
    let long = default.with_length(64);

    c.bench_function("generate_12", |b| {
        b.iter(|| generator.generate(black_box(&default)))
    });
    c.bench_function("generate_64", |b| {
        b.iter(|| generator.generate(black_box(&long)))
    });
    c.bench_function("generate_pattern", |b| {
        b.iter(|| generator.generate_pattern(black_box("4u4l4n4s")))
    });
    c.bench_function("generate_memorable", |b| {
        b.iter(|| generator.generate_memorable(black_box(16)))
    });
}

fn bench_analyze(c: &mut Criterion) {
    c.bench_function("analyze_16", |b| {
        b.iter(|| analyze(black_box("Gk7#Rw2!Tz9@Mq4$")))
    });
    c.bench_function("analyze_common", |b| {
        b.iter(|| analyze(black_box("password123")))
    });
}

criterion_group!(benches, bench_generate, bench_analyze);
criterion_main!(benches);
