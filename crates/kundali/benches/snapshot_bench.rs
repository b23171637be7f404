use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kundali::{generate, AspectSettings, Ayanamsa, Body, ChartBuilder, ChartRequest, GeoLocation, StaticEphemeris};

fn provider() -> StaticEphemeris {
    let mut provider = StaticEphemeris::new()
        .with_node(310.0, -0.05)
        .with_angles(125.0, 35.0);
    for (i, body) in Body::CLASSICAL.iter().enumerate() {
        provider = provider.with_body(*body, 17.0 + i as f64 * 41.0, 1.0);
    }
    provider
}

fn bench_build(c: &mut Criterion) {
    let provider = provider();
    let req = ChartRequest::new("1990-01-01", "06:00", 5.5, GeoLocation::new(19.076, 72.8777))
        .sidereal(Ayanamsa::Lahiri);

    c.bench_function("build_snapshot", |b| {
        b.iter(|| ChartBuilder::new(&provider).build(black_box(&req)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let provider = provider();
    let req = ChartRequest::new("1990-01-01", "06:00", 5.5, GeoLocation::new(19.076, 72.8777));
    let settings = AspectSettings::default();

    c.bench_function("generate", |b| {
        b.iter(|| generate(&provider, black_box(&req), black_box(&settings)))
    });
}

criterion_group!(benches, bench_build, bench_generate);
criterion_main!(benches);
