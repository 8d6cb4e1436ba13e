use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::params_from_iter;

use crate::infra::sqlite::connection::open_connection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub table: String,
    pub row_count: i64,
}

/// Loads a CSV file into a new table whose TEXT columns are named after
/// the header row. Short records are padded with empty strings.
pub fn import_csv(db_path: &Path, table: &str, csv_path: &Path) -> Result<ImportResult> {
    if table.trim().is_empty() {
        anyhow::bail!("table name is required")
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let column_list = headers
        .iter()
        .map(|name| format!("{} TEXT", quote_identifier(name)))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=headers.len())
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ");
    let table_name = quote_identifier(table);

    let mut conn = open_connection(db_path)?;
    let tx = conn.transaction().context("failed to start transaction")?;

    tx.execute(&format!("CREATE TABLE {table_name} ({column_list})"), [])
        .with_context(|| format!("failed to create table {table}"))?;

    let mut insert_row = tx
        .prepare(&format!("INSERT INTO {table_name} VALUES ({placeholders})"))
        .context("failed to prepare row insert")?;

    let mut row_count = 0_i64;
    let header_len = headers.len();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        let values = (0..header_len).map(|col_idx| record.get(col_idx).unwrap_or(""));
        insert_row
            .execute(params_from_iter(values))
            .context("failed to insert row")?;
        row_count += 1;
    }
    drop(insert_row);

    tx.commit().context("failed to commit import transaction")?;
    log::info!("imported {row_count} rows into {table} ({})", db_path.display());

    Ok(ImportResult {
        table: table.to_string(),
        row_count,
    })
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
