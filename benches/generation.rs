use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proteus::adapters::schema_repository::SchemaRepository;
use proteus::adapters::skeleton_merger::SkeletonMerger;
use proteus::adapters::value_provider::ValueProvider;
use proteus::domain::{ConstraintSet, FieldType};
use serde_json::json;

fn benchmark_fill_flat_skeleton(c: &mut Criterion) {
    let merger = SkeletonMerger::new();
    let skeleton = json!({
        "user": {"firstName": "", "email": "", "age": null, "tags": []}
    });

    c.bench_function("fill_flat_skeleton", |b| {
        b.iter(|| {
            let mut provider = ValueProvider::new();
            merger.fill(black_box(&skeleton), None, &mut provider)
        });
    });
}

fn benchmark_fill_with_schema(c: &mut Criterion) {
    let merger = SkeletonMerger::new();
    let document = json!({
        "definitions": {
            "User": {
                "properties": {
                    "age": {"type": "integer", "minimum": 18, "maximum": 65},
                    "email": {"type": "string"},
                    "tags": {
                        "type": "array",
                        "minItems": 3,
                        "maxItems": 5,
                        "items": {"type": "string"}
                    }
                }
            }
        }
    });
    let repository = SchemaRepository::from_document(&document);
    let skeleton = json!({"User": {"age": null, "email": "", "tags": []}});

    c.bench_function("fill_with_schema", |b| {
        b.iter(|| {
            let mut provider = ValueProvider::new();
            merger.fill(black_box(&skeleton), Some(&repository), &mut provider)
        });
    });
}

fn benchmark_provider_email(c: &mut Criterion) {
    let mut provider = ValueProvider::new();

    c.bench_function("provider_email", |b| {
        b.iter(|| {
            provider.clear_cache();
            provider.generate(
                FieldType::String,
                black_box("email"),
                &ConstraintSet::default(),
            )
        });
    });
}

fn benchmark_validate(c: &mut Criterion) {
    let merger = SkeletonMerger::new();
    let document = json!({
        "definitions": {
            "User": {
                "properties": {
                    "age": {"type": "integer", "minimum": 18, "maximum": 65},
                    "name": {"type": "string", "minLength": 2, "maxLength": 40}
                }
            }
        }
    });
    let repository = SchemaRepository::from_document(&document);
    let data = json!({"User": {"age": 30, "name": "Ada Lovelace"}});

    c.bench_function("validate", |b| {
        b.iter(|| merger.validate(black_box(&data), &repository));
    });
}

criterion_group!(
    benches,
    benchmark_fill_flat_skeleton,
    benchmark_fill_with_schema,
    benchmark_provider_email,
    benchmark_validate
);
criterion_main!(benches);
