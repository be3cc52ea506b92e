mod common;

use assert_matches::assert_matches;
use common::Harness;
use giapha_core::error::CoreError;
use giapha_core::restore::BACKUP_TABLES;
use giapha_pipeline::{backup, PipelineError};
use serde_json::{json, Value};

fn people(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "handle": format!("nguoi-{i:04}"),
                "display_name": format!("Người {i}"),
                "gender": 1,
                "generation": 3,
                "is_living": true,
            })
        })
        .collect()
}

fn document(data: Value) -> Value {
    json!({ "exported_at": "2025-05-01T00:00:00Z", "version": 1, "data": data })
}

#[tokio::test]
async fn export_contains_every_table() {
    let h = Harness::new();
    h.store.seed_table("people", people(2));
    h.store.seed_table(
        "events",
        vec![json!({"id": "e1", "title": "Giỗ tổ", "type": "MEMORIAL", "secret": "drop me"})],
    );

    let doc = backup::export(h.store.as_ref()).await.unwrap();
    assert!(doc["exported_at"].is_string());
    assert_eq!(doc["version"], 1);

    let data = doc["data"].as_object().unwrap();
    assert_eq!(data.len(), BACKUP_TABLES.len());
    assert_eq!(data["people"].as_array().unwrap().len(), 2);
    assert_eq!(data["families"], json!([]));
    assert!(data["events"][0].get("secret").is_none());
}

#[tokio::test]
async fn export_then_restore_into_empty_store() {
    let source = Harness::new();
    source.store.seed_table("people", people(3));
    source
        .store
        .seed_table("families", vec![json!({"handle": "F-1", "father_handle": "nguoi-0000"})]);
    let doc = backup::export(source.store.as_ref()).await.unwrap();

    let target = Harness::new();
    let report = backup::restore(target.store.as_ref(), &target.admin, &doc)
        .await
        .unwrap();
    assert!(report.ok);
    assert!(!report.aborted);
    assert_eq!(report.total_records, 4);
    assert_eq!(target.store.table_rows("people").len(), 3);
    assert_eq!(target.store.table_rows("families").len(), 1);
}

#[tokio::test]
async fn missing_exported_at_is_rejected_before_any_write() {
    let h = Harness::new();
    let err = backup::restore(h.store.as_ref(), &h.admin, &json!({"data": {"people": people(1)}}))
        .await
        .unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::Validation(_)));
    assert!(h.store.upsert_calls().is_empty());
    assert!(h.store.audit_logs().is_empty());
}

#[tokio::test]
async fn rows_are_upserted_in_chunks_of_500() {
    let h = Harness::new();
    let report = backup::restore(h.store.as_ref(), &h.admin, &document(json!({"people": people(1200)})))
        .await
        .unwrap();

    assert!(report.ok);
    assert_eq!(report.total_records, 1200);
    assert_eq!(
        h.store.upsert_calls(),
        vec![
            ("people".to_string(), 500),
            ("people".to_string(), 500),
            ("people".to_string(), 200),
        ]
    );
}

#[tokio::test]
async fn restore_is_idempotent_on_natural_keys() {
    let h = Harness::new();
    let doc = document(json!({"people": people(5)}));
    backup::restore(h.store.as_ref(), &h.admin, &doc).await.unwrap();
    backup::restore(h.store.as_ref(), &h.admin, &doc).await.unwrap();
    assert_eq!(h.store.table_rows("people").len(), 5);
}

#[tokio::test]
async fn critical_failure_aborts_remaining_tables() {
    let h = Harness::new();
    h.store.fail_on("upsert:people");
    let doc = document(json!({
        "people": people(3),
        "families": [{"handle": "F-1"}],
        "posts": [{"id": "p1", "content": "x"}],
    }));

    let report = backup::restore(h.store.as_ref(), &h.admin, &doc).await.unwrap();
    assert!(!report.ok);
    assert!(report.aborted);
    assert!(!report.partial);
    assert!(report.results[0].error.is_some());
    assert!(report.results[1..].iter().all(|r| r.error.is_none() && r.upserted == 0));
    assert_eq!(report.results.len(), BACKUP_TABLES.len());
    assert_eq!(h.store.upsert_calls(), vec![("people".to_string(), 3)]);

    let audit = h.store.audit_logs();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, "backup.restore");
    assert_eq!(audit[0].metadata["aborted"], true);
}

#[tokio::test]
async fn non_critical_failure_is_partial() {
    let h = Harness::new();
    h.store.fail_on("upsert:events");
    let doc = document(json!({
        "people": people(2),
        "events": [{"id": "e1", "title": "Họp"}],
        "posts": [{"id": "p1", "content": "x"}],
        "media": "not an array",
    }));

    let report = backup::restore(h.store.as_ref(), &h.admin, &doc).await.unwrap();
    assert!(!report.ok);
    assert!(report.partial);
    assert!(!report.aborted);

    let failed: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.error.is_some())
        .map(|r| r.table.as_str())
        .collect();
    assert_eq!(failed, vec!["events", "media"]);
    assert_eq!(report.total_records, 3);
    assert_eq!(h.store.table_rows("posts").len(), 1);
    assert_eq!(h.store.audit_logs().len(), 1);
}
