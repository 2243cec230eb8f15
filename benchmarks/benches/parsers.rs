use benchmarks::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parser");
    let re = parsing_regex();

    for &input in INPUTS.iter() {
        let version = BenchmarkId::new("pub_version", input);
        group.bench_with_input(version, input, |b, input| {
            b.iter(|| pub_version(black_box(input)))
        });
        let into_semver = BenchmarkId::new("pub_semver_parser_semver", input);
        group.bench_with_input(into_semver, input, |b, input| {
            b.iter(|| pub_semver(black_box(input)))
        });
        let regex_parser = BenchmarkId::new("regex", input);
        group.bench_with_input(regex_parser, input, |b, input| {
            b.iter(|| regex(&re, black_box(input)))
        });
    }

    let semver_parser = BenchmarkId::new("semver_parser", INPUTS[0]);
    group.bench_with_input(semver_parser, INPUTS[0], |b, input| {
        b.iter(|| semver(black_box(input)))
    });

    group.finish();
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ordering");
    let uploads = upload_history();

    group.bench_function("sort", |b| {
        b.iter(|| {
            let mut versions = uploads.clone();
            versions.sort();
            versions
        })
    });
    group.bench_function("latest", |b| b.iter(|| latest(black_box(&uploads)).clone()));

    group.finish();
}

criterion_group!(benches, bench_parsers, bench_ordering);
criterion_main!(benches);
