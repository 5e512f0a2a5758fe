use std::collections::HashMap;
use std::hint::black_box;
use std::sync::Arc;

use anyhow::Result;
use criterion::{Criterion, criterion_group, criterion_main};
use search_hydrate::{
    FieldKind, IndexDescriptor, LoadOptions, ObjectSource, Response, TypeDescriptor,
};
use serde_json::{Value, json};

struct SynthStore;

impl ObjectSource<u64> for SynthStore {
    fn load_many(&self, _type_name: &str, ids: &[String]) -> Result<HashMap<String, u64>> {
        Ok(ids
            .iter()
            .map(|id| (id.clone(), id.parse().unwrap_or(0)))
            .collect())
    }
}

fn build_indexes() -> Vec<IndexDescriptor<u64>> {
    let store: Arc<dyn ObjectSource<u64>> = Arc::new(SynthStore);
    vec![
        IndexDescriptor::new("places")
            .with_type(
                TypeDescriptor::new("city", Arc::clone(&store))
                    .with_field("name", FieldKind::Text)
                    .with_field("rating", FieldKind::Integer),
            )
            .with_type(
                TypeDescriptor::new("country", store)
                    .with_field("name", FieldKind::Text)
                    .with_field("rating", FieldKind::Integer),
            ),
    ]
}

fn build_response(hit_count: usize) -> Value {
    let hits: Vec<Value> = (0..hit_count)
        .map(|idx| {
            let type_name = if idx % 2 == 0 { "city" } else { "country" };
            json!({
                "_index": "places",
                "_type": type_name,
                "_id": idx.to_string(),
                "_score": (idx % 97) as f64 / 97.0,
                "_source": {
                    "id": idx,
                    "name": format!("{type_name} {idx}"),
                    "rating": (idx % 5) as i64,
                },
            })
        })
        .collect();
    json!({
        "took": 12,
        "timed_out": false,
        "hits": {"total": hit_count, "max_score": 1.0, "hits": hits},
    })
}

fn bench_hydrate(c: &mut Criterion) {
    let indexes = build_indexes();
    let raw = build_response(10_000);

    c.bench_function("hydrate_10k_hits", |b| {
        b.iter(|| {
            let response = Response::new(raw.clone(), &indexes, LoadOptions::default(), false);
            black_box(response.results().unwrap().len())
        })
    });
}

fn bench_load(c: &mut Criterion) {
    let indexes = build_indexes();
    let raw = build_response(10_000);

    c.bench_function("load_10k_objects", |b| {
        b.iter(|| {
            let response = Response::new(raw.clone(), &indexes, LoadOptions::default(), true);
            black_box(response.objects().unwrap().len())
        })
    });
}

criterion_group!(benches, bench_hydrate, bench_load);
criterion_main!(benches);
