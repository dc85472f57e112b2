//! Policy evaluation benchmarks
//!
//! Per-entity decisions must stay O(1) amortized after the first
//! compilation so that filtering large collections stays linear.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hearth_authz::{PolicyDocument, PolicyPermissions};
use serde_json::json;

fn mixed_policy() -> PolicyDocument {
    PolicyDocument::from_value(json!({
        "entities": {
            "domains": {"light": true, "switch": true, "lock": false},
            "entity_ids": {
                "light.porch": false,
                "camera.front_door": true
            }
        }
    }))
    .expect("valid benchmark policy")
}

fn entity_ids(count: usize) -> Vec<String> {
    let domains = ["light", "switch", "lock", "camera", "sensor"];
    (0..count)
        .map(|i| format!("{}.entity_{}", domains[i % domains.len()], i))
        .collect()
}

fn bench_check_entity(c: &mut Criterion) {
    let perms = PolicyPermissions::new(mixed_policy());
    // Warm the compiled-decision cache before timing.
    perms.check_entity("light.kitchen", &[]);

    let mut group = c.benchmark_group("check_entity");
    group.bench_function("domain_match", |b| {
        b.iter(|| perms.check_entity(black_box("light.kitchen"), black_box(&[])))
    });
    group.bench_function("entity_id_override", |b| {
        b.iter(|| perms.check_entity(black_box("light.porch"), black_box(&[])))
    });
    group.bench_function("unmatched", |b| {
        b.iter(|| perms.check_entity(black_box("vacuum.hallway"), black_box(&[])))
    });
    group.finish();
}

fn bench_first_compile(c: &mut Criterion) {
    c.bench_function("first_check_compiles", |b| {
        b.iter_batched(
            || PolicyPermissions::new(mixed_policy()),
            |perms| perms.check_entity(black_box("light.kitchen"), &[]),
            BatchSize::SmallInput,
        )
    });
}

fn bench_filter_entities(c: &mut Criterion) {
    let perms = PolicyPermissions::new(mixed_policy());

    let mut group = c.benchmark_group("filter_entities");
    for count in [100, 1_000, 10_000] {
        let entities = entity_ids(count);
        group.bench_with_input(BenchmarkId::new("entities", count), &entities, |b, entities| {
            b.iter_batched(
                || entities.clone(),
                |entities| perms.filter_entities(black_box(entities)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_check_entity,
    bench_first_compile,
    bench_filter_entities
);
criterion_main!(benches);
