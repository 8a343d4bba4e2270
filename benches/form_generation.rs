use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use schema_form::{
    generate_form, FieldOverride, FormOverrides, JsonSchemaImporter, ObjectSchema, RecordSchema,
    SchemaNode,
};
use serde_json::json;

fn create_record(fields: usize) -> RecordSchema {
    let mut object = ObjectSchema::new();
    for i in 0..fields {
        let node = match i % 6 {
            0 => SchemaNode::string(),
            1 => SchemaNode::number().min(0.0).max(100.0).optional(),
            2 => SchemaNode::enumeration(["a", "b", "c"]).nullable(),
            3 => SchemaNode::array(SchemaNode::string()),
            4 => SchemaNode::boolean().with_default(false),
            _ => SchemaNode::date().optional().nullable(),
        };
        object.insert(format!("field_{}", i), node);
    }
    object.refine()
}

fn benchmark_generate_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_form");

    for fields in [6, 60, 600] {
        let record = create_record(fields);
        group.throughput(Throughput::Elements(fields as u64));
        group.bench_function(format!("{}_fields", fields), |b| {
            b.iter(|| generate_form(black_box(&record), None))
        });
    }

    group.finish();
}

fn benchmark_generate_form_with_overrides(c: &mut Criterion) {
    let record = create_record(60);
    let overrides: FormOverrides = (0..60)
        .step_by(2)
        .map(|i| {
            (
                format!("field_{}", i),
                FieldOverride::new().with_meta("label", format!("Field {}", i)),
            )
        })
        .collect();

    c.bench_function("generate_form_with_overrides", |b| {
        b.iter(|| generate_form(black_box(&record), Some(black_box(&overrides))))
    });
}

fn benchmark_json_schema_import(c: &mut Criterion) {
    let document = json!({
        "type": "object",
        "required": ["name", "status"],
        "properties": {
            "name": {"type": "string"},
            "status": {"$ref": "#/definitions/Status"},
            "score": {"type": "number", "minimum": 0, "maximum": 10},
            "tags": {"type": "array", "items": {"type": "string"}},
            "owner": {"anyOf": [{"$ref": "#/definitions/User"}, {"type": "null"}]}
        },
        "definitions": {
            "Status": {"type": "string", "enum": ["open", "closed"]},
            "User": {"type": "object", "properties": {"id": {"type": "string"}}}
        }
    });
    let importer = JsonSchemaImporter::default();

    c.bench_function("json_schema_import", |b| {
        b.iter(|| importer.import_record(black_box(&document)))
    });
}

criterion_group!(
    benches,
    benchmark_generate_form,
    benchmark_generate_form_with_overrides,
    benchmark_json_schema_import
);
criterion_main!(benches);
