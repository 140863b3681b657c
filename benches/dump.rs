use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use yaml_dump::{dump, dump_document, to_string, to_value, Document, DumpOptions, Value};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_dump_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump_array");

    for size in [10, 50, 100, 500].iter() {
        let value = to_value(&products(*size)).unwrap();
        let options = DumpOptions::new();

        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| dump(black_box(value), &options))
        });
    }
    group.finish();
}

fn benchmark_serialize_nested(c: &mut Criterion) {
    let data = NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    };

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });
}

fn benchmark_scalar_styles(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_styles");
    let options = DumpOptions::new();

    let plain = Value::from("short");
    let ambiguous = Value::from("2023-12-31");
    let literal = Value::from("first line\nsecond line\nthird line\n");
    let folded = Value::from(
        "This is a very long string that contains a lot of text and will be folded once it \
         goes past the default line width of eighty characters, probably more than once.",
    );

    group.bench_function("plain", |b| b.iter(|| dump(black_box(&plain), &options)));
    group.bench_function("ambiguous", |b| {
        b.iter(|| dump(black_box(&ambiguous), &options))
    });
    group.bench_function("literal", |b| b.iter(|| dump(black_box(&literal), &options)));
    group.bench_function("folded", |b| b.iter(|| dump(black_box(&folded), &options)));

    group.finish();
}

fn benchmark_shared_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_nodes");

    for size in [10, 100, 1000].iter() {
        let mut doc = Document::default();
        let shared = doc.add(to_value(&products(5)).unwrap());
        doc.set_root(Value::Sequence((0..*size).map(|_| shared.into()).collect()));

        group.bench_with_input(BenchmarkId::new("anchors", size), &doc, |b, doc| {
            b.iter(|| dump_document(black_box(doc), &DumpOptions::new()))
        });
        group.bench_with_input(BenchmarkId::new("no_refs", size), &doc, |b, doc| {
            b.iter(|| dump_document(black_box(doc), &DumpOptions::new().with_no_refs(true)))
        });
    }
    group.finish();
}

fn benchmark_flow_vs_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow_vs_block");
    let value = to_value(&products(100)).unwrap();

    let block = DumpOptions::new();
    let flow = DumpOptions::new().with_flow_level(0);
    let sorted = DumpOptions::new().with_sort_keys(true);

    group.bench_function("block", |b| b.iter(|| dump(black_box(&value), &block)));
    group.bench_function("flow", |b| b.iter(|| dump(black_box(&value), &flow)));
    group.bench_function("sorted", |b| b.iter(|| dump(black_box(&value), &sorted)));

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("yaml_vs_json");
    let data = products(100);

    group.bench_function("yaml", |b| b.iter(|| to_string(black_box(&data))));
    group.bench_function("json", |b| {
        b.iter(|| serde_json::to_string(black_box(&data)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_dump_array,
    benchmark_serialize_nested,
    benchmark_scalar_styles,
    benchmark_shared_nodes,
    benchmark_flow_vs_block,
    benchmark_comparison_with_json,
);
criterion_main!(benches);
