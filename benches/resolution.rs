//! Performance benchmarks for provenance-config.
//!
//! Resolution happens once per field at construction time, so these mostly guard
//! against regressions in the per-field overhead and in properties parsing.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use provenance_config::prelude::*;
use provenance_config::sources::parse_properties;

/// Benchmark resolving a field that falls all the way through to its fallback
fn benchmark_resolve_fallback(c: &mut Criterion) {
    let env = MapEnvironment::new();
    let source = PropertySource::empty();

    let mut group = c.benchmark_group("resolve");
    group.bench_function("fallback", |b| {
        b.iter(|| {
            let request = ResolutionRequest::new(
                "app.port",
                "APP_PORT",
                "app.port",
                Converter::<u16>::parse(),
                &source,
                &env,
            )
            .fallback(8080);
            black_box(resolve(request).unwrap());
        });
    });
    group.bench_function("system_property", |b| {
        let env = MapEnvironment::new().with_property("app.port", "9000");
        b.iter(|| {
            let request = ResolutionRequest::new(
                "app.port",
                "APP_PORT",
                "app.port",
                Converter::<u16>::parse(),
                &source,
                &env,
            );
            black_box(resolve(request).unwrap());
        });
    });
    group.finish();
}

/// Benchmark a provider-sized session over a populated external file
fn benchmark_field_session(c: &mut Criterion) {
    let ns = Namespace::new("app");
    let names: Vec<String> = (0..9).map(|i| format!("field{}", i)).collect();
    let specs: Vec<FieldSpec<String>> = names
        .iter()
        .map(|name| ns.field(name, Converter::string()).build().unwrap())
        .collect();
    let source = PropertySource::from_entries(
        names
            .iter()
            .map(|name| (ns.external_key(name), format!("value-{}", name))),
    );
    let env = MapEnvironment::new();

    let mut group = c.benchmark_group("session");
    group.throughput(Throughput::Elements(specs.len() as u64));
    group.bench_function("nine_fields", |b| {
        b.iter(|| {
            let mut fields = FieldResolver::new(&source, &env);
            for spec in &specs {
                black_box(fields.value(spec, None).unwrap());
            }
            black_box(fields.finish());
        });
    });
    group.finish();
}

/// Benchmark properties parsing at different file sizes
fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_properties");
    for entries in [10usize, 100, 1000] {
        let text: String = (0..entries)
            .map(|i| format!("# entry {i}\napp.key{i} = value {i}\n"))
            .collect();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entries), &text, |b, text| {
            b.iter(|| black_box(parse_properties(text).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_resolve_fallback,
    benchmark_field_session,
    benchmark_parse
);
criterion_main!(benches);
