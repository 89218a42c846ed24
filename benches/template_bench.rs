use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mtpl::{ScalarValue, TemplateCache, parse};
use std::collections::HashMap;
use std::hint::black_box;

const TEMPLATES: &[(&str, &str)] = &[
    ("text_only", "Service started and listening for connections"),
    ("single", "Request {RequestId} completed"),
    ("typical", "HTTP {Method} {Path} responded {StatusCode} in {Elapsed:0.000} ms"),
    ("aligned", "[{Level,-5}] {Source,20}: {@Payload} ({Count:000})"),
    ("escaped", "{{literal}} {Value} }} {{ {Other,-3:x}"),
    ("malformed", "{unterminated {0} {bad name} {Name,0} {} {Ok}"),
];

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for (name, template) in TEMPLATES {
        group.bench_with_input(BenchmarkId::from_parameter(name), template, |b, &template| {
            b.iter(|| parse(black_box(template)));
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");
    let cache = TemplateCache::new();

    for (name, template) in TEMPLATES {
        cache.get_or_parse(template);
        group.bench_with_input(BenchmarkId::from_parameter(name), template, |b, &template| {
            b.iter(|| cache.get_or_parse(black_box(template)));
        });
    }

    let long = "x".repeat(2048);
    group.bench_function("bypass_long", |b| {
        b.iter(|| cache.get_or_parse(black_box(&long)));
    });

    group.finish();
}

fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderer");

    let mut props = HashMap::new();
    props.insert("Method".to_string(), ScalarValue::from("GET"));
    props.insert("Path".to_string(), ScalarValue::from("/api/items"));
    props.insert("StatusCode".to_string(), ScalarValue::from(200));
    props.insert("Elapsed".to_string(), ScalarValue::from(12.3456));
    props.insert("Level".to_string(), ScalarValue::from("INFO"));
    props.insert("Source".to_string(), ScalarValue::from("worker"));
    props.insert("Count".to_string(), ScalarValue::from(7));

    for (name, template) in TEMPLATES {
        let parsed = parse(template);
        group.bench_function(*name, |b| {
            b.iter(|| parsed.render_to_string(black_box(&props), None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parser, bench_cache, bench_renderer);
criterion_main!(benches);
