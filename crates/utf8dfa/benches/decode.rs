use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use utf8dfa::recover::decode_lossy;
use utf8dfa::{decode_slice, validate};

fn corpus(sample: &str, size: usize) -> Vec<u8> {
    sample.bytes().cycle().take(size).collect()
}

pub fn run_benchmarks(c: &mut Criterion) {
    const SIZE: usize = 64 * 1024;

    let inputs = [
        ("ascii", corpus("The quick brown fox jumps over the lazy dog. ", SIZE)),
        ("latin", corpus("Größenwahn, déjà vu, señorita, Ærø. ", SIZE)),
        ("cjk", corpus("日本語の文章と中文文本와 한국어 ", SIZE)),
        ("emoji", corpus("🦀🌸🍵👋🏽 ", SIZE)),
    ];

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(SIZE as u64));

    let mut output = Vec::<u32>::with_capacity(SIZE);
    for (name, input) in inputs.iter() {
        group.bench_function(format!("{}/slice", name), |b| {
            b.iter(|| {
                output.clear();
                decode_slice(black_box(input), &mut output)
            })
        });

        group.bench_function(format!("{}/validate", name), |b| {
            b.iter(|| validate(black_box(input)))
        });

        group.bench_function(format!("{}/std", name), |b| {
            b.iter(|| core::str::from_utf8(black_box(input)).map(|s| s.chars().count()))
        });
    }

    let mut damaged = corpus("Größenwahn, déjà vu, señorita, Ærø. ", SIZE);
    for index in (0..damaged.len()).step_by(97) {
        damaged[index] = 0xff;
    }
    group.bench_function("damaged/lossy", |b| b.iter(|| decode_lossy(black_box(&damaged))));

    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
