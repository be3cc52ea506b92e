//! Generic export and upsert over the tables named in the backup plan.
//!
//! Table and column names come only from the static `TableSpec` list and
//! are quoted; row data always travels as a bound JSONB parameter.

use giapha_core::restore::TableSpec;
use sqlx::PgPool;

pub struct BackupRepo;

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn column_list(table: &TableSpec) -> String {
    table
        .columns
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the `INSERT ... ON CONFLICT` statement for one table.
pub(crate) fn upsert_sql(table: &TableSpec) -> String {
    let name = quote(table.name);
    let columns = column_list(table);
    let target = table
        .conflict_target
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(", ");
    let updates: Vec<String> = table
        .update_columns()
        .map(|c| {
            let c = quote(c);
            format!("{c} = EXCLUDED.{c}")
        })
        .collect();
    let action = if updates.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", updates.join(", "))
    };

    format!(
        "INSERT INTO {name} ({columns}) \
         SELECT {columns} FROM jsonb_populate_recordset(NULL::{name}, $1) \
         ON CONFLICT ({target}) {action}"
    )
}

/// Build the export query for one table.
pub(crate) fn export_sql(table: &TableSpec) -> String {
    format!(
        "SELECT COALESCE(jsonb_agg(to_jsonb(t)), '[]'::jsonb) FROM (SELECT {} FROM {}) t",
        column_list(table),
        quote(table.name)
    )
}

impl BackupRepo {
    pub async fn export_table(
        pool: &PgPool,
        table: &TableSpec,
    ) -> Result<Vec<serde_json::Value>, sqlx::Error> {
        let rows = sqlx::query_scalar::<_, serde_json::Value>(&export_sql(table))
            .fetch_one(pool)
            .await?;
        Ok(match rows {
            serde_json::Value::Array(rows) => rows,
            _ => Vec::new(),
        })
    }

    /// Upsert a chunk of rows and return how many were sent. Keys outside
    /// `table.columns` are ignored by `jsonb_populate_recordset`.
    pub async fn upsert_rows(
        pool: &PgPool,
        table: &TableSpec,
        rows: &[serde_json::Value],
    ) -> Result<usize, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }
        let payload = serde_json::Value::Array(rows.to_vec());
        let result = sqlx::query(&upsert_sql(table))
            .bind(&payload)
            .execute(pool)
            .await?;
        tracing::debug!(
            table = table.name,
            sent = rows.len(),
            affected = result.rows_affected(),
            "Upserted restore chunk",
        );
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giapha_core::restore::table_spec;

    #[test]
    fn upsert_targets_natural_key_and_skips_it_in_updates() {
        let people = table_spec("people").unwrap();
        let sql = upsert_sql(people);
        assert!(sql.starts_with("INSERT INTO \"people\""));
        assert!(sql.contains("ON CONFLICT (\"handle\") DO UPDATE SET"));
        assert!(!sql.contains("\"handle\" = EXCLUDED"));
        assert!(!sql.contains("\"id\" = EXCLUDED"));
        assert!(sql.contains("\"display_name\" = EXCLUDED.\"display_name\""));
        assert!(sql.contains("jsonb_populate_recordset(NULL::\"people\", $1)"));
    }

    #[test]
    fn reserved_column_names_are_quoted() {
        let events = table_spec("events").unwrap();
        assert!(upsert_sql(events).contains("\"type\" = EXCLUDED.\"type\""));
        assert!(export_sql(events).contains("\"type\""));
    }
}
