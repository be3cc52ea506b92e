//! Full-dataset export and restore.

use chrono::Utc;
use giapha_core::audit::{ACTION_RESTORE, ENTITY_BACKUP};
use giapha_core::restore::{
    require_exported_at, RestoreReport, TableOutcome, TableSpec, BACKUP_FORMAT_VERSION,
    BACKUP_TABLES, RESTORE_CHUNK_SIZE,
};
use giapha_db::Store;
use serde_json::{json, Map, Value};

use crate::actor::Actor;
use crate::audit;
use crate::error::PipelineResult;

/// Export every backup table as `{ exported_at, version, data }`.
pub async fn export(store: &dyn Store) -> PipelineResult<Value> {
    let mut data = Map::new();
    let mut total = 0;
    for table in BACKUP_TABLES {
        let rows = store.export_table(table).await?;
        total += rows.len();
        data.insert(table.name.to_string(), Value::Array(rows));
    }
    tracing::info!(tables = BACKUP_TABLES.len(), rows = total, "Backup exported");
    Ok(json!({
        "exported_at": Utc::now().to_rfc3339(),
        "version": BACKUP_FORMAT_VERSION,
        "data": data,
    }))
}

/// Upsert `rows` in chunks; stops at the first failing chunk.
async fn restore_table(store: &dyn Store, table: &TableSpec, rows: &[Value]) -> TableOutcome {
    let mut upserted = 0;
    for chunk in rows.chunks(RESTORE_CHUNK_SIZE) {
        match store.upsert_rows(table, chunk).await {
            Ok(n) => upserted += n,
            Err(e) => {
                tracing::error!(table = table.name, upserted, error = %e, "Restore chunk failed");
                return TableOutcome::failed(table.name, upserted, e.to_string());
            }
        }
    }
    TableOutcome::ok(table.name, upserted)
}

/// Restore a backup document table by table in dependency order.
///
/// A document without `exported_at` is rejected before anything is written.
/// A failure on a critical table stops the run; the remaining tables are
/// reported with nothing upserted.
pub async fn restore(store: &dyn Store, actor: &Actor, backup: &Value) -> PipelineResult<RestoreReport> {
    let exported_at = require_exported_at(backup)?;
    let data = backup.get("data");

    let mut results = Vec::with_capacity(BACKUP_TABLES.len());
    let mut aborted = false;

    for table in BACKUP_TABLES {
        if aborted {
            results.push(TableOutcome::ok(table.name, 0));
            continue;
        }
        let outcome = match data.and_then(|d| d.get(table.name)) {
            None | Some(Value::Null) => TableOutcome::ok(table.name, 0),
            Some(Value::Array(rows)) => restore_table(store, table, rows).await,
            Some(_) => TableOutcome::failed(table.name, 0, "Dữ liệu bảng không phải là mảng"),
        };
        if outcome.error.is_some() && table.critical {
            tracing::error!(table = table.name, "Critical table failed; aborting restore");
            aborted = true;
        }
        results.push(outcome);
    }

    let report = RestoreReport::from_outcomes(results, aborted);
    audit::record(
        store,
        actor,
        ACTION_RESTORE,
        ENTITY_BACKUP,
        None,
        json!({
            "exported_at": exported_at,
            "ok": report.ok,
            "partial": report.partial,
            "aborted": report.aborted,
            "total_records": report.total_records,
            "results": report.results,
        }),
    )
    .await;

    tracing::info!(
        user_id = %actor.id,
        ok = report.ok,
        aborted = report.aborted,
        total_records = report.total_records,
        "Restore finished",
    );
    Ok(report)
}
