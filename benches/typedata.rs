//! Benchmarks for the type-data cache.
//!
//! Measures the two paths that matter:
//! - Cold build: first introspection of a nested type graph
//! - Hot lookup: repeated requests served from the memo table

extern crate fieldscope;

use criterion::{criterion_group, criterion_main, Criterion};
use fieldscope::prelude::*;
use std::hint::black_box;

static STRING: TypeDescriptor = TypeDescriptor::leaf("string");
static INT64: TypeDescriptor = TypeDescriptor::leaf("int64");

static INNER: TypeDescriptor = TypeDescriptor::structure(
    "Inner",
    &[
        FieldDescriptor::new(
            "Id",
            || &INT64,
            FieldFlags::PUBLIC,
            &[FieldTag::new("json", "id")],
        ),
        FieldDescriptor::new(
            "Label",
            || &STRING,
            FieldFlags::PUBLIC,
            &[FieldTag::new("json", "label,omitempty")],
        ),
    ],
);
static INNER_PTR: TypeDescriptor = TypeDescriptor::pointer("*Inner", || &INNER);
static INNER_LIST: TypeDescriptor = TypeDescriptor::sequence("[]Inner", || &INNER);

static OUTER: TypeDescriptor = TypeDescriptor::structure(
    "Outer",
    &[
        FieldDescriptor::new(
            "Name",
            || &STRING,
            FieldFlags::PUBLIC,
            &[FieldTag::new("json", "name")],
        ),
        FieldDescriptor::new("First", || &INNER, FieldFlags::PUBLIC, &[]),
        FieldDescriptor::new("Second", || &INNER_PTR, FieldFlags::PUBLIC, &[]),
        FieldDescriptor::new("Rest", || &INNER_LIST, FieldFlags::PUBLIC, &[]),
        FieldDescriptor::new("Next", || &OUTER_PTR, FieldFlags::PUBLIC, &[]),
        FieldDescriptor::new(
            "Hidden",
            || &STRING,
            FieldFlags::PUBLIC,
            &[FieldTag::new("json", "-")],
        ),
    ],
);
static OUTER_PTR: TypeDescriptor = TypeDescriptor::pointer("*Outer", || &OUTER);

struct JsonNames;

impl MetadataPolicy for JsonNames {
    type Metadata = ();

    fn tag_namespace(&self) -> &'static str {
        "json"
    }

    fn field_name(&self, tag: &'static str) -> Option<&'static str> {
        tag.split(',').next()
    }

    fn skip(&self, tag: &str) -> bool {
        tag == "-"
    }
}

/// First request for a nested type graph, fresh cache every iteration.
fn bench_cold_build(c: &mut Criterion) {
    c.bench_function("typedata_cold_build", |b| {
        b.iter(|| {
            let cache = TypeDataCache::new(JsonNames);
            black_box(cache.type_data(black_box(&OUTER)))
        });
    });
}

/// Memoized lookup of an already-built tree.
fn bench_hot_lookup(c: &mut Criterion) {
    let cache = TypeDataCache::new(JsonNames);
    let _ = cache.type_data(&OUTER);

    c.bench_function("typedata_hot_lookup", |b| {
        b.iter(|| black_box(cache.type_data(black_box(&OUTER))));
    });
}

/// Name lookup within a published tree.
fn bench_field_by_name(c: &mut Criterion) {
    let cache = TypeDataCache::new(JsonNames);
    let outer = cache.type_data(&OUTER);

    c.bench_function("typedata_field_by_name", |b| {
        b.iter(|| black_box(outer.field_by_name(black_box("name"))));
    });
}

criterion_group!(
    benches,
    bench_cold_build,
    bench_hot_lookup,
    bench_field_by_name
);
criterion_main!(benches);
