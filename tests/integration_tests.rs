//! Integration tests
//!
//! Tests the full end-to-end flow: JSON samples → decoder → inferred schema → schema file

use bqs::cli::{load_schema, render_schema, Cli, Outcome, OutputFormat, Runner};
use bqs::decode::{DecoderFormat, JsonlDecoder, RecordDecoder};
use bqs::schema::Origin;
use bqs::{equal, infer, merge, Error, Field, FieldType, Schema, SchemaAccumulator};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn run(args: &[&str]) -> bqs::Result<Outcome> {
    let cli = Cli::try_parse_from(std::iter::once("bqs").chain(args.iter().copied())).unwrap();
    Runner::new(cli).run()
}

// ============================================================================
// Library Flow Tests
// ============================================================================

#[test]
fn test_decode_and_accumulate_jsonl() {
    let body = r#"
{"id": 1, "name": "alice", "tags": ["a"]}
{"id": 2, "profile": {"age": 30}}
{"id": 3, "name": "carol", "profile": {"age": 41, "city": "Oslo"}}
"#;
    let records = JsonlDecoder::new().decode(body).unwrap();

    let mut acc = SchemaAccumulator::new();
    acc.observe_all("users.jsonl", &records).unwrap();

    assert_eq!(acc.records(), 3);
    let expected = Schema::from(vec![
        Field::new("id", FieldType::Integer),
        Field::new("name", FieldType::String),
        Field::record(
            "profile",
            vec![
                Field::new("age", FieldType::Integer),
                Field::new("city", FieldType::String),
            ],
        ),
        Field::new("tags", FieldType::String).repeated(),
    ]);
    assert!(acc.schema().equivalent(&expected), "{:#?}", acc.schema());
}

#[test]
fn test_accumulator_reports_conflicting_record() {
    let body = "{\"id\": 1}\n{\"id\": \"x\"}\n";
    let records = DecoderFormat::Jsonl.decoder().decode(body).unwrap();

    let mut acc = SchemaAccumulator::new();
    let err = acc.observe_all("ids.jsonl", &records).unwrap_err();

    assert_eq!(
        err.to_string(),
        "ids.jsonl: record 2: conflict field: field='id': type conflict (old=INTEGER, new=STRING)"
    );
    assert_eq!(err.root().conflict_path(), Some("id"));
    assert_eq!(acc.records(), 1);
    assert_eq!(acc.schema().fields(), &[Field::new("id", FieldType::Integer)]);
}

#[test]
fn test_observe_with_explicit_origin() {
    let mut acc =
        SchemaAccumulator::with_base(Schema::from(vec![Field::new("id", FieldType::Integer)]));
    acc.observe(&json!({"id": 5, "ok": true}), &Origin::new("api", 7))
        .unwrap();

    let err = acc
        .observe(&json!({"ok": 1}), &Origin::new("api", 8))
        .unwrap_err();
    assert!(err.to_string().starts_with("api: record 8: "), "{err}");
}

#[test]
fn test_schema_file_round_trip_keeps_equality() {
    let inferred = infer(&json!({
        "id": 1,
        "items": [{"sku": "a", "qty": 2}],
        "at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();

    let json = render_schema(&inferred, OutputFormat::Json).unwrap();
    let yaml = render_schema(&inferred, OutputFormat::Yaml).unwrap();

    assert!(equal(&Schema::from_json(&json).unwrap(), &inferred));
    assert!(equal(&Schema::from_yaml(&yaml).unwrap(), &inferred));
}

#[test]
fn test_merge_live_table_with_extra_attributes() {
    let live = Schema::from_json(
        r#"[
            {"name": "id", "type": "INTEGER", "mode": "REQUIRED", "description": "primary key"},
            {"name": "legacy", "type": "STRING"}
        ]"#,
    )
    .unwrap();
    let observed = infer(&json!({"id": 1, "note": "x"})).unwrap();

    // Observed `id` is nullable while the table requires it
    let err = merge(&live, &observed).unwrap_err();
    assert_eq!(err.conflict_path(), Some("id"));

    let observed = Schema::from(vec![
        Field::new("id", FieldType::Integer).required(),
        Field::new("note", FieldType::String),
    ]);
    let merged = merge(&live, &observed).unwrap();
    let names: Vec<&str> = merged.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["id", "note", "legacy"]);
}

// ============================================================================
// CLI Runner Tests
// ============================================================================

#[test]
fn test_runner_infer_writes_schema_file() {
    let dir = TempDir::new().unwrap();
    let first = write(dir.path(), "a.json", "{\"id\": 1}\n{\"id\": 2, \"tags\": [\"x\"]}\n");
    let second = write(dir.path(), "b.json", "{\"meta\": {\"ok\": true}}");
    let out = dir.path().join("schema.json");
    let out_str = out.display().to_string();

    let outcome = run(&["infer", &first, &second, "-o", &out_str]).unwrap();
    assert_eq!(outcome, Outcome::Done);

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([
            {"name": "meta", "type": "RECORD", "mode": "NULLABLE", "fields": [
                {"name": "ok", "type": "BOOLEAN", "mode": "NULLABLE"}
            ]},
            {"name": "id", "type": "INTEGER", "mode": "NULLABLE"},
            {"name": "tags", "type": "STRING", "mode": "REPEATED"}
        ])
    );
}

#[test]
fn test_runner_infer_with_base_and_yaml_output() {
    let dir = TempDir::new().unwrap();
    let base = write(
        dir.path(),
        "base.yaml",
        "- name: id\n  type: INTEGER\n  mode: REQUIRED\n",
    );
    let input = write(dir.path(), "rows.jsonl", "{\"name\": \"a\"}\n");
    let out = dir.path().join("out.yaml");
    let out_str = out.display().to_string();

    run(&[
        "infer", &input, "--base", &base, "-i", "jsonl", "-f", "yaml", "-o", &out_str,
    ])
    .unwrap();

    let schema = load_schema(&out).unwrap();
    let names: Vec<&str> = schema.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["name", "id"]);
    assert!(schema.get("id").unwrap().required);
}

#[test]
fn test_runner_infer_reports_source_and_record() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "bad.json", "{\"id\": 1}\n{\"id\": [1]}\n");
    let out = dir.path().join("never.json").display().to_string();

    let err = run(&["infer", &input, "-o", &out]).unwrap_err();
    assert!(err.to_string().starts_with(&format!("{input}: record 2: ")), "{err}");
    assert!(err.root().is_conflict());
    assert!(!Path::new(&out).exists());
}

#[test]
fn test_runner_infer_keeps_decode_error_kind() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "broken.jsonl", "{\"id\": 1}\n{\"id\": \n");

    let err = run(&["infer", &input, "-i", "jsonl"]).unwrap_err();
    match &err {
        Error::Decode { message } => {
            assert!(message.starts_with(&format!("{input}: ")), "{message}");
            assert!(message.contains("line 2"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_runner_numbers_records_not_lines() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "gaps.jsonl", "{\"id\": 1}\n\n\n{\"id\": \"x\"}\n");

    let err = run(&["infer", &input, "-i", "jsonl"]).unwrap_err();
    match &err {
        Error::Record { record, .. } => assert_eq!(*record, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with(&format!("{input}: record 2: ")), "{err}");
}

#[test]
fn test_runner_merge_and_compare() {
    let dir = TempDir::new().unwrap();
    let old = write(
        dir.path(),
        "old.json",
        r#"[{"name": "a", "type": "STRING"}, {"name": "b", "type": "INTEGER"}]"#,
    );
    let new = write(dir.path(), "new.json", r#"[{"name": "c", "type": "FLOAT"}]"#);
    let merged = dir.path().join("merged.json").display().to_string();
    let expected = write(
        dir.path(),
        "expected.json",
        r#"[{"name": "b", "type": "INTEGER"}, {"name": "c", "type": "FLOAT"}, {"name": "a", "type": "STRING"}]"#,
    );

    assert_eq!(run(&["merge", &old, &new, "-o", &merged]).unwrap(), Outcome::Done);
    assert_eq!(run(&["compare", &merged, &expected]).unwrap(), Outcome::Done);
    assert_eq!(run(&["compare", &merged, &old]).unwrap(), Outcome::Different);
}

#[test]
fn test_runner_merge_conflict() {
    let dir = TempDir::new().unwrap();
    let old = write(dir.path(), "old.json", r#"[{"name": "Name", "type": "STRING"}]"#);
    let new = write(dir.path(), "new.json", r#"[{"name": "name", "type": "STRING"}]"#);

    let err = run(&["merge", &old, &new]).unwrap_err();
    assert_eq!(err.conflict_path(), Some("name"));
}

#[test]
fn test_runner_missing_schema_file() {
    let err = run(&["compare", "/nonexistent/a.json", "/nonexistent/b.json"]).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/a.json"), "{err}");
}
