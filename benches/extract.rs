//! Online extraction benchmark: URL → 15-dim vector (per-request hot path).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urlsentry::features::UrlFeatureExtractor;

const URLS: &[&str] = &[
    "https://www.example.com/",
    "http://192.168.0.1/login.php?user=admin&pass=secret",
    "http://bit.ly/3xYzAbC",
    "paypal-account-verify.security-check.example.net/signin//update?id=%31%32%33",
    "http://[::1",
];

fn bench_extract_single(c: &mut Criterion) {
    let extractor = UrlFeatureExtractor::default();
    c.bench_function("extract_phishing_like_url", |b| {
        b.iter(|| extractor.extract(black_box(URLS[3])))
    });
}

fn bench_extract_by_length(c: &mut Criterion) {
    let extractor = UrlFeatureExtractor::default();
    let mut g = c.benchmark_group("extract_by_length");
    for len in [32, 256, 2048] {
        let url = format!("http://example.com/{}", "a/b%20c".repeat(len / 7));
        g.bench_function(format!("len_{}", len).as_str(), |b| {
            b.iter(|| extractor.extract(black_box(&url)))
        });
    }
    g.finish();
}

fn bench_extract_mixed(c: &mut Criterion) {
    let extractor = UrlFeatureExtractor::default();
    c.bench_function("extract_mixed_5", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(extractor.extract(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, bench_extract_single, bench_extract_by_length, bench_extract_mixed);
criterion_main!(benches);
